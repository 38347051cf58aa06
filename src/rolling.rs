//! Trailing-window arithmetic means over per-project period sequences
//!
//! The flag engine computes rolling CPI/SPI/float means for every project
//! period. A window that cannot be filled (too few prior rows, or a gap in
//! the underlying series) yields `None` rather than a partial mean, so
//! consumers never mistake a warm-up value for a real trend.

/// Trailing mean over `window` consecutive values ending at each index.
///
/// Output has the same length as the input. Position `i` is `Some(mean)`
/// only when all of `values[i + 1 - window ..= i]` exist; otherwise `None`.
/// A zero-length window has no defined mean and yields all `None`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                return None;
            }
            let tail = &values[i + 1 - window..=i];
            let mut sum = 0.0;
            for value in tail {
                sum += (*value)?;
            }
            Some(sum / window as f64)
        })
        .collect()
}

/// Trailing mean over a dense series (every value present).
#[must_use]
pub fn trailing_mean_dense(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    trailing_mean(&wrapped, window)
}
