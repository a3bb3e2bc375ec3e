use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two places using half-up (commercial rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary amount as fixed-point with exactly two fractional digits.
///
/// No thousands separators and no currency symbol: `5` → `"5.00"`,
/// `1234.5` → `"1234.50"`, `5.005` → `"5.01"`.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_money(value);
    // Decimal keeps the scale of its input; pin it so `5` prints as `5.00`.
    rounded.rescale(2);
    if rounded.is_zero() {
        // -0.004 rounds to a negative zero
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}
