//! FILENAME: core/cube-engine/src/metrics.rs
//! Metric record schemas for the three fact tables.
//!
//! Every fact table carries a fixed set of numeric measures; a cube
//! aggregates them by plain elementwise addition. All records default to
//! zero and use `#[serde(default)]` so snapshots written before a metric
//! existed still load.

use serde::{Deserialize, Serialize};

/// A fixed set of numeric measures that aggregates by elementwise addition.
pub trait Metrics: Clone + Default {
    /// Adds every field of `other` into `self`.
    fn accumulate(&mut self, other: &Self);
}

// ============================================================================
// CHARTER (revenue by month x associate)
// ============================================================================

/// Revenue measures for one (month, associate) observation.
///
/// `total_*` is the authoritative total: the explicit spreadsheet value when
/// one was supplied, otherwise the sum of the three components (resolved at
/// ingestion time, not here).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharterMetrics {
    pub new_business_2025: f64,
    pub existing_business_2025: f64,
    pub busbuddy_2025: f64,
    pub total_2025: f64,
    pub new_business_2026: f64,
    pub existing_business_2026: f64,
    pub busbuddy_2026: f64,
    pub total_2026: f64,
    pub target_2026: f64,
}

impl Metrics for CharterMetrics {
    fn accumulate(&mut self, other: &Self) {
        self.new_business_2025 += other.new_business_2025;
        self.existing_business_2025 += other.existing_business_2025;
        self.busbuddy_2025 += other.busbuddy_2025;
        self.total_2025 += other.total_2025;
        self.new_business_2026 += other.new_business_2026;
        self.existing_business_2026 += other.existing_business_2026;
        self.busbuddy_2026 += other.busbuddy_2026;
        self.total_2026 += other.total_2026;
        self.target_2026 += other.target_2026;
    }
}

// ============================================================================
// HR (target tracking by month x business unit)
// ============================================================================

/// Target/actual pair for one (month, business) observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrMetrics {
    pub target_2026: f64,
    pub actual_2026: f64,
}

impl Metrics for HrMetrics {
    fn accumulate(&mut self, other: &Self) {
        self.target_2026 += other.target_2026;
        self.actual_2026 += other.actual_2026;
    }
}

// ============================================================================
// TELESALES (weekly funnel counts)
// ============================================================================

/// Funnel counts for one week of telesales activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleMetrics {
    pub busbuddy_booked: f64,
    pub busbuddy_attended: f64,
    pub busbuddy_trials: f64,
    pub taxi_booked: f64,
    pub taxi_attended: f64,
    pub taxi_closed: f64,
}

impl Metrics for TeleMetrics {
    fn accumulate(&mut self, other: &Self) {
        self.busbuddy_booked += other.busbuddy_booked;
        self.busbuddy_attended += other.busbuddy_attended;
        self.busbuddy_trials += other.busbuddy_trials;
        self.taxi_booked += other.taxi_booked;
        self.taxi_attended += other.taxi_attended;
        self.taxi_closed += other.taxi_closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_charter() {
        let mut a = CharterMetrics {
            total_2026: 100.0,
            target_2026: 50.0,
            ..Default::default()
        };
        let b = CharterMetrics {
            total_2026: 25.0,
            target_2026: 10.0,
            new_business_2026: 5.0,
            ..Default::default()
        };
        a.accumulate(&b);
        assert_eq!(a.total_2026, 125.0);
        assert_eq!(a.target_2026, 60.0);
        assert_eq!(a.new_business_2026, 5.0);
    }

    #[test]
    fn test_default_is_zero() {
        let m = TeleMetrics::default();
        assert_eq!(m.busbuddy_booked, 0.0);
        assert_eq!(m.taxi_closed, 0.0);
    }
}
