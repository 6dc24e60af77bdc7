//! Display formatting of the selected value.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a value with exactly one decimal place, rounding half up.
///
/// Rounding happens on the exact binary value of the float, so `12.25`
/// (exactly representable) becomes `"12.3"` while `0.15` (stored slightly
/// below) becomes `"0.1"`.
pub fn format_value(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(1);
            rounded.to_string()
        }
        None => format!("{value:.1}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_one_decimal_place() {
        assert_eq!(format_value(50.0), "50.0");
        assert_eq!(format_value(10.0), "10.0");
        assert_eq!(format_value(12.3), "12.3");
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(format_value(12.25), "12.3");
        assert_eq!(format_value(12.75), "12.8");
        assert_eq!(format_value(12.24), "12.2");
    }

    #[test]
    fn rounds_the_exact_binary_value() {
        // 0.15 is stored as 0.1499999999999999944...
        assert_eq!(format_value(0.15), "0.1");
    }
}
