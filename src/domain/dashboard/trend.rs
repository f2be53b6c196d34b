//! Per-minute volume and revenue trend.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::AppointmentRow;

/// Gap filling stops beyond this many buckets (one day of minutes).
pub const MAX_FILLED_TREND_BUCKETS: i64 = 1_440;

/// One left-closed minute interval `[bucket_start, bucket_start + 1min)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBucket {
    pub bucket_start: DateTime<Utc>,
    pub appointments: usize,
    pub revenue: f64,
}

/// Buckets timestamped rows into wall-clock minutes, ascending.
///
/// Rows without a timestamp do not contribute; with no timestamped rows the
/// trend is empty. Empty minutes between the first and last bucket are
/// emitted as zero buckets unless the span exceeds
/// [`MAX_FILLED_TREND_BUCKETS`].
pub fn minute_trend(rows: &[AppointmentRow]) -> Vec<TrendBucket> {
    let mut minutes: BTreeMap<i64, (usize, f64)> = BTreeMap::new();
    for row in rows {
        if let Some(timestamp) = row.timestamp {
            let minute = timestamp.timestamp().div_euclid(60);
            let entry = minutes.entry(minute).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += row.cost;
        }
    }

    let (first, last) = match (minutes.keys().next(), minutes.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let keys: Vec<i64> = if last - first < MAX_FILLED_TREND_BUCKETS {
        (first..=last).collect()
    } else {
        minutes.keys().copied().collect()
    };

    keys.into_iter()
        .filter_map(|minute| {
            let (appointments, revenue) = minutes.get(&minute).copied().unwrap_or((0, 0.0));
            DateTime::<Utc>::from_timestamp(minute * 60, 0).map(|bucket_start| TrendBucket {
                bucket_start,
                appointments,
                revenue,
            })
        })
        .collect()
}
