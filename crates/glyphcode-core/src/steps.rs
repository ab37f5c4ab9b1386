//! Direction step symbols
//!
//! Each unit step of a rope is a single byte on the numeric-keypad layout:
//!
//! ```text
//!  (-1,-1) (0,-1) (1,-1)          '7' '8' '9'
//!  (-1, 0) (0, 0) (1, 0)    ->    '4' '5' '6'
//!  (-1, 1) (0, 1) (1, 1)          '1' '2' '3'
//! ```
//!
//! The 4-connected extractor only ever emits `'2'`, `'4'`, `'6'` and `'8'`;
//! the diagonal symbols are defined for completeness.

/// Step symbol for a unit displacement.
///
/// # Panics
///
/// Debug-asserts that `dx` and `dy` are each in `-1..=1`.
#[inline]
pub fn step_char(dx: i32, dy: i32) -> u8 {
    debug_assert!((-1..=1).contains(&dx) && (-1..=1).contains(&dy));
    (b'5' as i32 + dx - 3 * dy) as u8
}

/// Horizontal displacement of a step symbol.
#[inline]
pub fn step_dx(c: u8) -> i32 {
    (c - b'1') as i32 % 3 - 1
}

/// Vertical displacement of a step symbol.
#[inline]
pub fn step_dy(c: u8) -> i32 {
    -((c - b'1') as i32 / 3 - 1)
}

/// The opposite direction: `'8'` becomes `'2'`, `'6'` becomes `'4'`, and
/// so on. The keypad layout makes this a reflection through `'5'`.
#[inline]
pub fn reverse_step(c: u8) -> u8 {
    b'1' + b'9' - c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let c = step_char(dx, dy);
                assert!(c.is_ascii_digit());
                assert_eq!(step_dx(c), dx);
                assert_eq!(step_dy(c), dy);
            }
        }
    }

    #[test]
    fn test_cardinal_symbols() {
        assert_eq!(step_char(0, -1), b'8');
        assert_eq!(step_char(0, 1), b'2');
        assert_eq!(step_char(-1, 0), b'4');
        assert_eq!(step_char(1, 0), b'6');
    }

    #[test]
    fn test_reverse() {
        for c in b'1'..=b'9' {
            let r = reverse_step(c);
            assert_eq!(step_dx(r), -step_dx(c));
            assert_eq!(step_dy(r), -step_dy(c));
            assert_eq!(reverse_step(r), c);
        }
    }
}
