use serde::Serialize;

use crate::models::WateringRecord;

/// Share of the history compared at each end when computing trends.
pub const TREND_SEGMENT: f64 = 0.3;
/// Relative change (%) below which a trend is stable.
pub const TREND_STABLE_PERCENT: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryStats {
    pub count: usize,
    pub avg_ec: f64,
    pub avg_ph: f64,
    pub avg_drainage: f64,
    pub avg_volume: f64,
    pub ec_trend: Trend,
    pub ph_trend: Trend,
    pub drainage_trend: Trend,
    pub volume_trend: Trend,
}

/// Averages and early-vs-late trends over a watering history.
///
/// Records are ordered by date; the mean of the oldest 30 % (at least one
/// record) is compared against the newest 30 %. Returns `None` for an empty
/// history.
pub fn history_stats(records: &[WateringRecord]) -> Option<HistoryStats> {
    if records.is_empty() {
        return None;
    }

    let mut sorted: Vec<&WateringRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let segment = ((sorted.len() as f64 * TREND_SEGMENT).floor() as usize).max(1);
    let first = &sorted[..segment];
    let last = &sorted[sorted.len() - segment..];

    let trend_of = |field: fn(&WateringRecord) -> f64| trend(mean(first, field), mean(last, field));

    Some(HistoryStats {
        count: records.len(),
        avg_ec: mean(&sorted, |r| r.ec),
        avg_ph: mean(&sorted, |r| r.ph),
        avg_drainage: mean(&sorted, |r| r.drainage),
        avg_volume: mean(&sorted, |r| r.volume_liters),
        ec_trend: trend_of(|r| r.ec),
        ph_trend: trend_of(|r| r.ph),
        drainage_trend: trend_of(|r| r.drainage),
        volume_trend: trend_of(|r| r.volume_liters),
    })
}

fn mean(records: &[&WateringRecord], field: fn(&WateringRecord) -> f64) -> f64 {
    records.iter().map(|r| field(r)).sum::<f64>() / records.len() as f64
}

fn trend(before: f64, after: f64) -> Trend {
    if before == 0.0 {
        return match after.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => Trend::Up,
            Some(std::cmp::Ordering::Less) => Trend::Down,
            _ => Trend::Stable,
        };
    }
    let change = (after - before) / before * 100.0;
    if change.abs() < TREND_STABLE_PERCENT {
        Trend::Stable
    } else if change > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}
