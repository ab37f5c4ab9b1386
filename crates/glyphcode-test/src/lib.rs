//! glyphcode-test - Regression test framework for glyphcode
//!
//! Provides the [`RegParams`] harness used by the `tests/*_reg.rs` suites
//! across the workspace, supporting three modes:
//!
//! - **Generate**: record golden values
//! - **Compare**: compare results against expectations (default)
//! - **Display**: run without comparison (visual inspection of the log)
//!
//! # Usage
//!
//! ```
//! use glyphcode_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_ints(4, 2 + 2);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "generate", "compare", or "display"

mod params;

pub use params::{RegParams, RegTestMode};
