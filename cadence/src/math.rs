//! Shared typing-metric formulas.

/// The average word length assumed by typing trainers (industry standard).
///
/// Used to convert correct characters into words for WPM.
pub const AVERAGE_WORD_LENGTH: usize = 5;

/// Net words per minute: `(correct_chars / 5) / minutes`.
///
/// Returns `0.0` for non-positive durations so callers never divide by zero.
///
/// # Examples
///
/// ```rust
/// use cadence::math::net_wpm;
///
/// // 250 correct characters in 1 minute = 50 WPM
/// assert_eq!(net_wpm(250, 1.0), 50.0);
/// assert_eq!(net_wpm(100, 0.0), 0.0);
/// ```
pub fn net_wpm(correct_chars: usize, minutes: f64) -> f64 {
    if minutes <= 0.0 {
        return 0.0;
    }
    (correct_chars as f64 / AVERAGE_WORD_LENGTH as f64) / minutes
}

/// Arithmetic mean. `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
