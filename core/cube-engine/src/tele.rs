//! FILENAME: core/cube-engine/src/tele.rs
//! Week-keyed activity cube for the telesales fact table.
//!
//! Unlike the charter/HR cubes, the telesales table has a single stored
//! dimension (the week); its month is derived via the week resolver. The
//! cube therefore indexes by week and by derived month, with each month
//! remembering which weeks fed it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::metrics::{Metrics, TeleMetrics};
use crate::week::{week_number, week_to_month};

/// One week's activity plus its derived month bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekActivity {
    pub month: String,
    pub metrics: TeleMetrics,
}

/// One month's accumulated activity plus the weeks that fed it, in
/// first-seen order. A month bucket never spans more than five weeks, plus
/// headroom for mislabelled input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthActivity {
    pub weeks: SmallVec<[String; 6]>,
    pub metrics: TeleMetrics,
}

/// Week/month co-indexed aggregate over telesales activity.
///
/// `week_keys` is kept sorted by extracted week number so traversal follows
/// the year regardless of row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleCube {
    pub by_week: FxHashMap<String, WeekActivity>,
    pub by_month: FxHashMap<String, MonthActivity>,
    pub totals: TeleMetrics,
    pub week_keys: Vec<String>,
}

impl TeleCube {
    pub fn new() -> Self {
        TeleCube::default()
    }

    /// Folds one week's counts into the cube. Duplicate week labels
    /// accumulate, matching `FactCube::insert`.
    pub fn insert(&mut self, week: &str, metrics: TeleMetrics) {
        let month = week_to_month(week);

        match self.by_week.get_mut(week) {
            Some(activity) => activity.metrics.accumulate(&metrics),
            None => {
                self.by_week.insert(
                    week.to_string(),
                    WeekActivity {
                        month: month.to_string(),
                        metrics,
                    },
                );
                let ordinal = week_number(week).unwrap_or(1);
                let pos = self
                    .week_keys
                    .partition_point(|w| week_number(w).unwrap_or(1) <= ordinal);
                self.week_keys.insert(pos, week.to_string());
            }
        }

        let month_entry = self.by_month.entry(month.to_string()).or_default();
        month_entry.metrics.accumulate(&metrics);
        if !month_entry.weeks.iter().any(|w| w == week) {
            month_entry.weeks.push(week.to_string());
        }

        self.totals.accumulate(&metrics);
    }

    /// Builds a cube from an ordered sequence of (week label, metrics) rows.
    pub fn build(rows: impl IntoIterator<Item = (String, TeleMetrics)>) -> Self {
        let mut cube = TeleCube::new();
        for (week, metrics) in rows {
            cube.insert(&week, metrics);
        }
        cube
    }

    pub fn is_empty(&self) -> bool {
        self.by_week.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booked(busbuddy_booked: f64, taxi_booked: f64) -> TeleMetrics {
        TeleMetrics {
            busbuddy_booked,
            taxi_booked,
            ..Default::default()
        }
    }

    #[test]
    fn test_month_derivation() {
        let mut cube = TeleCube::new();
        cube.insert("Week 4", booked(10.0, 2.0));
        cube.insert("Week 5", booked(5.0, 1.0));

        assert_eq!(cube.by_week["Week 4"].month, "January");
        assert_eq!(cube.by_week["Week 5"].month, "February");
        assert_eq!(cube.by_month["January"].metrics.busbuddy_booked, 10.0);
        assert_eq!(cube.totals.busbuddy_booked, 15.0);
    }

    #[test]
    fn test_weeks_of_same_month_accumulate() {
        let mut cube = TeleCube::new();
        cube.insert("Week 1", booked(3.0, 0.0));
        cube.insert("Week 2", booked(4.0, 0.0));
        cube.insert("Week 2", booked(1.0, 0.0)); // duplicate week sums

        let january = &cube.by_month["January"];
        assert_eq!(january.metrics.busbuddy_booked, 8.0);
        assert_eq!(january.weeks.as_slice(), ["Week 1", "Week 2"]);
        assert_eq!(cube.by_week["Week 2"].metrics.busbuddy_booked, 5.0);
    }

    #[test]
    fn test_week_keys_sorted_numerically() {
        let mut cube = TeleCube::new();
        cube.insert("Week 10", booked(1.0, 0.0));
        cube.insert("Week 2", booked(1.0, 0.0));
        cube.insert("Week 33", booked(1.0, 0.0));

        assert_eq!(cube.week_keys, vec!["Week 2", "Week 10", "Week 33"]);
    }
}
