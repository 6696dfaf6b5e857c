//! Magnitude-code decoding for damage columns.
//!
//! Damage is recorded as a coefficient plus an optional one-letter scale
//! (`K` thousand, `M` million, `B` billion). Anything else is taken as
//! already being in base units.

/// Scale factor for a magnitude code. Unknown or absent codes scale by 1.
pub fn multiplier(code: Option<char>) -> f64 {
    match code.map(|c| c.to_ascii_uppercase()) {
        Some('K') => 1e3,
        Some('M') => 1e6,
        Some('B') => 1e9,
        _ => 1.0,
    }
}

/// Absolute value of a coefficient + magnitude code pair.
///
/// Zero and negative coefficients are scaled like any other; nothing is rejected here.
pub fn decode(coefficient: f64, code: Option<char>) -> f64 {
    coefficient * multiplier(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(decode(3.0, Some('K')), 3000.0);
        assert_eq!(decode(3.0, Some('k')), 3000.0);
        assert_eq!(decode(2.5, Some('M')), 2_500_000.0);
        assert_eq!(decode(1.5, Some('b')), 1_500_000_000.0);
    }

    #[test]
    fn test_absent_code_is_base_units() {
        assert_eq!(decode(5.0, None), 5.0);
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(decode(2.0, Some('X')), 2.0);
        assert_eq!(decode(2.0, Some('+')), 2.0);
        assert_eq!(decode(2.0, Some('5')), 2.0);
        assert_eq!(decode(2.0, Some('h')), 2.0);
    }

    #[test]
    fn test_zero_and_negative_pass_through() {
        assert_eq!(decode(0.0, Some('B')), 0.0);
        assert_eq!(decode(-4.0, Some('K')), -4000.0);
        assert_eq!(decode(-4.0, None), -4.0);
    }
}
