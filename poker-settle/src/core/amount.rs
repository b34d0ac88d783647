//! Monetary Amounts
//!
//! Parsing, rounding and display rules for buy-ins, stacks and profit/loss.
//!
//! ## Parsing policy
//!
//! Amount input is parsed permissively: the longest leading decimal literal
//! is used (`"12abc"` reads as `12`) and anything without a literal reads
//! as `0`. Nothing in this module ever rejects input.
//!
//! ```text
//! ┌──────────────────┬──────────┐
//! │  input           │  amount  │
//! ├──────────────────┼──────────┤
//! │  "250"           │  250.0   │
//! │  "  12.5 chips"  │  12.5    │
//! │  "-40"           │  -40.0   │
//! │  "not-a-number"  │  0.0     │
//! │  ""              │  0.0     │
//! └──────────────────┴──────────┘
//! ```

/// Amount type used throughout the ledger.
pub type Amount = f64;

/// Largest absolute total still considered a balanced table.
///
/// Absorbs drift from repeated decimal arithmetic on `f64`.
pub const BALANCE_TOLERANCE: Amount = 0.01;

/// Decimal places shown for every amount.
pub const DISPLAY_DECIMALS: usize = 2;

/// Find the longest leading decimal literal in `raw` and parse it.
///
/// Returns `None` when no literal is present.
fn leading_literal(raw: &str) -> Option<Amount> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<Amount>().ok()
}

/// Parse raw user input into an amount.
///
/// Invalid, missing or non-finite input yields `0.0`. Negative values pass
/// through unchanged.
pub fn parse_amount(raw: &str) -> Amount {
    match leading_literal(raw) {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Whether raw input would be highlighted as acceptable by an input field.
///
/// Presentation hint only: the ledger stores whatever [`parse_amount`]
/// returns regardless of this check.
pub fn is_valid_amount_input(raw: &str) -> bool {
    leading_literal(raw).is_some_and(|value| value.is_finite() && value >= 0.0)
}

/// Round to two decimal places, half away from zero.
#[inline]
pub fn round2(value: Amount) -> Amount {
    (value * 100.0).round() / 100.0
}

/// Format an amount with two decimals and no sign decoration.
pub fn format_amount(value: Amount) -> String {
    format!("{:.*}", DISPLAY_DECIMALS, round2(value))
}

/// Format a profit/loss figure for display.
///
/// Strictly positive values get a leading `+`, negative values carry their
/// own `-`, and zero is exactly `0.00`.
pub fn format_profit_loss(value: Amount) -> String {
    if value > 0.0 {
        format!("+{}", format_amount(value))
    } else if value < 0.0 {
        format_amount(value)
    } else {
        "0.00".to_string()
    }
}

/// Whether a table total is within [`BALANCE_TOLERANCE`] of zero.
#[inline]
pub fn is_balanced(total: Amount) -> bool {
    total.abs() < BALANCE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("100"), 100.0);
        assert_eq!(parse_amount("250.75"), 250.75);
        assert_eq!(parse_amount("-40"), -40.0);
        assert_eq!(parse_amount("+15"), 15.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
    }

    #[test]
    fn test_parse_leading_literal() {
        assert_eq!(parse_amount("  12.5 chips"), 12.5);
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("3.2.1"), 3.2);
        assert_eq!(parse_amount("1e2"), 100.0);
        assert_eq!(parse_amount("1e"), 1.0);
        assert_eq!(parse_amount("2E-1x"), 0.2);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_amount("not-a-number"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("abc12"), 0.0);
        assert_eq!(parse_amount("Infinity"), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
    }

    #[test]
    fn test_valid_input_hint() {
        assert!(is_valid_amount_input("100"));
        assert!(is_valid_amount_input("0"));
        assert!(!is_valid_amount_input("-1"));
        assert!(!is_valid_amount_input("abc"));
        assert!(!is_valid_amount_input(""));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round2(150.0), 150.0);
    }

    #[test]
    fn test_format_profit_loss() {
        assert_eq!(format_profit_loss(150.0), "+150.00");
        assert_eq!(format_profit_loss(-60.0), "-60.00");
        assert_eq!(format_profit_loss(0.0), "0.00");
        assert_eq!(format_profit_loss(12.3456), "+12.35");
        assert_eq!(format_profit_loss(-7.1), "-7.10");
    }

    #[test]
    fn test_balance_tolerance() {
        assert!(is_balanced(0.0));
        assert!(is_balanced(0.009));
        assert!(is_balanced(-0.009));
        assert!(!is_balanced(0.01));
        assert!(!is_balanced(1.0));
        assert!(is_balanced(0.1 + 0.2 - 0.3));
    }
}
