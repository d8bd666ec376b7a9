//! Decimal rounding of published figures.

/// Rounds to `digits` decimal places, halves away from zero.
///
/// ```rust
/// use kupon_analytics::round_to;
///
/// assert_eq!(round_to(0.10388, 4), 0.1039);
/// assert_eq!(round_to(5.205, 1), 5.2);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    let ratio = 10f64.powi(digits as i32);
    (value * ratio).round() / ratio
}
