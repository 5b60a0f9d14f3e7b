//! FILENAME: core/cube-engine/src/summary.rs
//! Cross-cube scalar KPIs derived from the fact cubes' grand totals.
//!
//! Charter and HR measure different activities, but the overall figures
//! combine them by construction: overall 2026 revenue is charter revenue
//! plus HR actuals, overall target is the sum of both targets.

use serde::{Deserialize, Serialize};

use crate::cube::{FactCube, MONTHS};
use crate::metrics::{CharterMetrics, HrMetrics};
use crate::tele::TeleCube;

/// Business-policy ratio applied to gross 2026 revenue to derive the net
/// figure. The default applies no deduction; callers with a different
/// policy override it through `SummaryOptions`.
pub const DEFAULT_NET_REVENUE_RATIO: f64 = 1.0;

/// Achievement percentage, guarded against a zero target.
pub fn achievement(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        actual / target * 100.0
    } else {
        0.0
    }
}

/// Year-over-year growth percentage, guarded against a zero prior year.
pub fn yoy_growth(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// Tunable business-policy constants used while summarizing.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub net_revenue_ratio: f64,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            net_revenue_ratio: DEFAULT_NET_REVENUE_RATIO,
        }
    }
}

// ============================================================================
// SUMMARY RECORDS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharterSummary {
    pub total_2025: f64,
    pub total_2026: f64,
    pub target_2026: f64,
    pub achievement: f64,
    pub yoy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrSummary {
    pub actual_2026: f64,
    pub target_2026: f64,
    pub achievement: f64,
}

/// Funnel conversion rates over the telesales totals, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleSummary {
    pub busbuddy_attend_rate: f64,
    pub taxi_close_rate: f64,
    pub overall_close_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallSummary {
    pub total_2025: f64,
    pub total_2026: f64,
    pub target_2026: f64,
    pub net_2026: f64,
    pub achievement: f64,
    pub yoy: f64,
}

/// The scalar KPI record persisted alongside the cubes, plus the distinct
/// dimension values seen during ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub charter: CharterSummary,
    pub hr: HrSummary,
    pub tele: TeleSummary,
    pub overall: OverallSummary,
    pub associates: Vec<String>,
    pub businesses: Vec<String>,
    pub months: Vec<String>,
}

impl Summary {
    /// Derives all KPIs from the three cubes' totals.
    pub fn compute(
        charter: &FactCube<CharterMetrics>,
        hr: &FactCube<HrMetrics>,
        tele: &TeleCube,
        options: &SummaryOptions,
    ) -> Self {
        let c = &charter.grand_totals;
        let h = &hr.grand_totals;
        let t = &tele.totals;

        let overall_total_2025 = c.total_2025;
        let overall_total_2026 = c.total_2026 + h.actual_2026;
        let overall_target_2026 = c.target_2026 + h.target_2026;

        Summary {
            charter: CharterSummary {
                total_2025: c.total_2025,
                total_2026: c.total_2026,
                target_2026: c.target_2026,
                achievement: achievement(c.total_2026, c.target_2026),
                yoy: yoy_growth(c.total_2026, c.total_2025),
            },
            hr: HrSummary {
                actual_2026: h.actual_2026,
                target_2026: h.target_2026,
                achievement: achievement(h.actual_2026, h.target_2026),
            },
            tele: TeleSummary {
                busbuddy_attend_rate: achievement(t.busbuddy_attended, t.busbuddy_booked),
                taxi_close_rate: achievement(t.taxi_closed, t.taxi_booked),
                overall_close_rate: achievement(
                    t.taxi_closed + t.busbuddy_trials,
                    t.busbuddy_booked + t.taxi_booked,
                ),
            },
            overall: OverallSummary {
                total_2025: overall_total_2025,
                total_2026: overall_total_2026,
                target_2026: overall_target_2026,
                net_2026: overall_total_2026 * options.net_revenue_ratio,
                achievement: achievement(overall_total_2026, overall_target_2026),
                yoy: yoy_growth(overall_total_2026, overall_total_2025),
            },
            associates: charter.secondary_keys.clone(),
            businesses: hr.secondary_keys.clone(),
            months: MONTHS.iter().map(|m| m.to_string()).collect(),
        }
    }
}
