//! Strict decimal parsing and formatting for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Caller-supplied amounts are parsed into `rust_decimal::Decimal` at the
//! boundary; malformed input is a validation error, never silently
//! coerced to zero inside business logic.

use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

/// Parses a caller-supplied amount string into a `Decimal`.
///
/// Accepts an optional leading sign and thousands separators
/// (`"1,234.56"`). Empty or non-numeric input is rejected.
///
/// # Errors
///
/// Returns `AppError::Validation` when the input is not a valid decimal.
pub fn parse_amount(field: &str, raw: &str) -> AppResult<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }

    cleaned
        .parse::<Decimal>()
        .map_err(|_| AppError::Validation(format!("{field} must be a valid number")))
}

/// Parses an amount that must be zero or greater.
///
/// # Errors
///
/// Returns `AppError::Validation` when the input is malformed or negative.
pub fn parse_non_negative_amount(field: &str, raw: &str) -> AppResult<Decimal> {
    let amount = parse_amount(field, raw)?;

    if amount.is_sign_negative() {
        return Err(AppError::Validation(format!(
            "{field} must be a valid non-negative number"
        )));
    }

    Ok(amount)
}

/// Formats an amount with thousands separators and two decimal places,
/// e.g. `1234567.5` -> `"1,234,567.50"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{rounded:.2}");

    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let (sign, digits) = integer
        .strip_prefix('-')
        .map_or(("", integer), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("150000", dec!(150000))]
    #[case("1,234.56", dec!(1234.56))]
    #[case("  42.5  ", dec!(42.5))]
    #[case("-10", dec!(-10))]
    fn test_parse_amount_valid(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount("releases", raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("12.3.4")]
    #[case("NaN")]
    fn test_parse_amount_invalid(#[case] raw: &str) {
        let err = parse_amount("releases", raw).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_parse_non_negative_rejects_negative() {
        let err = parse_non_negative_amount("appropriation", "-500").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("non-negative"));
    }

    #[rstest]
    #[case(dec!(0), "0.00")]
    #[case(dec!(950.5), "950.50")]
    #[case(dec!(1234567.891), "1,234,567.89")]
    #[case(dec!(-42000), "-42,000.00")]
    fn test_format_amount(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }
}
