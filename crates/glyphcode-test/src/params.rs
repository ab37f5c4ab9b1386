//! Regression test parameters and operations

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Record values as golden output
    Generate,
    /// Compare with expected values (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of one regression test: its name, the index of the
/// current comparison, the mode, and the failures seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "chaincode")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode.
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if self.mode == RegTestMode::Display {
            eprintln!(
                "{}_reg [{}]: expected = {}, actual = {}",
                self.test_name, self.index, expected, actual
            );
            return true;
        }
        let diff = (expected - actual).abs();
        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            return false;
        }
        true
    }

    /// Compare two integers exactly.
    pub fn compare_ints(&mut self, expected: i64, actual: i64) -> bool {
        self.index += 1;
        if self.mode == RegTestMode::Display {
            eprintln!(
                "{}_reg [{}]: expected = {}, actual = {}",
                self.test_name, self.index, expected, actual
            );
            return true;
        }
        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: integer comparison for index {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, expected, actual
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            return false;
        }
        true
    }

    /// Record a named condition that must hold.
    pub fn check(&mut self, label: &str, condition: bool) -> bool {
        self.index += 1;
        if self.mode == RegTestMode::Display {
            eprintln!(
                "{}_reg [{}] {}: {}",
                self.test_name, self.index, label, condition
            );
            return true;
        }
        if !condition {
            let msg = format!(
                "Failure in {}_reg: condition '{}' at index {}",
                self.test_name, label, self.index
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            return false;
        }
        true
    }

    /// Report the overall result. Returns `true` if every comparison
    /// passed.
    pub fn cleanup(&self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg ({} checks)", self.test_name, self.index);
        } else {
            eprintln!(
                "FAILURE: {}_reg ({} of {} checks failed)",
                self.test_name,
                self.failures.len(),
                self.index
            );
        }
        self.success
    }
}
