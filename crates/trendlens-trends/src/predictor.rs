//! Trajectory prediction for emerging trends.
//!
//! A least-squares line through a trend's score history, extrapolated 24
//! hours past the prediction time.

use chrono::{DateTime, Duration, Utc};

use crate::error::TrackerError;
use crate::scorer::MAX_VIRAL_SCORE;
use crate::tracker::TrendStore;
use crate::types::{TrackedTrend, Trajectory, TrendPrediction};

pub const MIN_DATA_POINTS: usize = 3;
const HORIZON_HOURS: i64 = 24;
const PEAK_OFFSET_HOURS: i64 = 48;
/// Confidence lost per unit of variance in successive score changes.
const VARIANCE_PENALTY: f64 = 10.0;

/// Predicts every emerging trend in `store` with at least
/// [`MIN_DATA_POINTS`] snapshots, most confident first.
///
/// # Errors
///
/// Returns [`TrackerError`] if the store cannot be read.
pub fn get_trend_predictions<S: TrendStore + ?Sized>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<Vec<TrendPrediction>, TrackerError> {
    let mut predictions: Vec<TrendPrediction> = store
        .emerging()?
        .iter()
        .filter_map(|trend| predict(trend, now))
        .collect();
    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(predictions)
}

/// Forecast for one trend, or `None` with fewer than [`MIN_DATA_POINTS`]
/// snapshots.
///
/// When every snapshot shares one timestamp the fit degenerates to a flat
/// line at the mean score.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn predict(trend: &TrackedTrend, now: DateTime<Utc>) -> Option<TrendPrediction> {
    if trend.history.len() < MIN_DATA_POINTS {
        return None;
    }

    let xs: Vec<f64> = trend
        .history
        .iter()
        .map(|s| s.timestamp.timestamp_millis() as f64)
        .collect();
    let ys: Vec<f64> = trend.history.iter().map(|s| s.metrics.viral_score).collect();

    let (slope, mean_x, mean_y) = least_squares(&xs, &ys);
    let future_x = (now + Duration::hours(HORIZON_HOURS)).timestamp_millis() as f64;
    // centred form of slope * x + intercept; keeps precision with epoch-sized x
    let predicted = mean_y + slope * (future_x - mean_x);

    let rising = slope > 0.0;
    let confidence = (100.0 - successive_diff_variance(&ys) * VARIANCE_PENALTY)
        .max(0.0)
        .round();

    Some(TrendPrediction {
        identifier: trend.identifier.clone(),
        current_score: ys.last().copied().unwrap_or_default(),
        predicted_score_24h: predicted.clamp(0.0, MAX_VIRAL_SCORE),
        current_trajectory: if rising {
            Trajectory::Rising
        } else {
            Trajectory::Declining
        },
        confidence,
        peak_time: rising.then(|| now + Duration::hours(PEAK_OFFSET_HOURS)),
        data_points: trend.history.len(),
    })
}

/// Ordinary least squares. Returns `(slope, mean_x, mean_y)`; the slope is
/// zero when all `xs` are equal.
#[allow(clippy::cast_precision_loss)]
fn least_squares(xs: &[f64], ys: &[f64]) -> (f64, f64, f64) {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (sxy, sxx) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    (slope, mean_x, mean_y)
}

/// Population variance of consecutive differences.
#[allow(clippy::cast_precision_loss)]
fn successive_diff_variance(ys: &[f64]) -> f64 {
    let diffs: Vec<f64> = ys.windows(2).map(|w| w[1] - w[0]).collect();
    if diffs.is_empty() {
        return 0.0;
    }
    let n = diffs.len() as f64;
    let mean = diffs.iter().sum::<f64>() / n;
    diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n
}
