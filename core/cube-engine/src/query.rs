//! FILENAME: core/cube-engine/src/query.rs
//! Read-only filter engine over the fact cubes.
//!
//! A filter never mutates a cube: it derives a transient sub-cube whose
//! totals equal the sum of exactly the leaves it keeps. Filtering one
//! dimension rebuilds the other index consistently, so a dashboard can
//! still traverse a by-month view after restricting to one associate.

use serde::Serialize;

use crate::cube::{DimensionSlice, FactCube};
use crate::metrics::{CharterMetrics, HrMetrics, Metrics, TeleMetrics};
use crate::snapshot::Snapshot;
use crate::summary::Summary;
use crate::tele::TeleCube;

/// Universal wildcard sentinel: every filter surface uses `"All"` for
/// "unfiltered", never an absent value.
pub const ALL: &str = "All";

/// Restricts a cube to one value of either or both dimensions.
///
/// Exactly four states exist: (All, All) copies the cube; a single-sided
/// restriction keeps one slice and rebuilds the other index from it; a
/// two-sided restriction keeps one cell. A filter value missing from the
/// cube yields an empty cube with zero totals, not an error.
pub fn filter_cube<M: Metrics>(cube: &FactCube<M>, primary: &str, secondary: &str) -> FactCube<M> {
    match (primary == ALL, secondary == ALL) {
        (true, true) => cube.clone(),

        (true, false) => {
            let mut filtered = FactCube::new();
            if let Some(slice) = cube.by_secondary.get(secondary) {
                for (p, metrics) in &slice.cells {
                    filtered
                        .by_primary
                        .insert(p.clone(), DimensionSlice::single(secondary, metrics.clone()));
                }
                filtered.primary_keys = cube
                    .primary_keys
                    .iter()
                    .filter(|k| slice.cells.contains_key(*k))
                    .cloned()
                    .collect();
                filtered.grand_totals = slice.totals.clone();
                filtered
                    .by_secondary
                    .insert(secondary.to_string(), slice.clone());
                filtered.secondary_keys.push(secondary.to_string());
            }
            filtered
        }

        (false, true) => {
            let mut filtered = FactCube::new();
            if let Some(slice) = cube.by_primary.get(primary) {
                for (s, metrics) in &slice.cells {
                    filtered
                        .by_secondary
                        .insert(s.clone(), DimensionSlice::single(primary, metrics.clone()));
                }
                filtered.secondary_keys = cube
                    .secondary_keys
                    .iter()
                    .filter(|k| slice.cells.contains_key(*k))
                    .cloned()
                    .collect();
                filtered.grand_totals = slice.totals.clone();
                filtered
                    .by_primary
                    .insert(primary.to_string(), slice.clone());
                filtered.primary_keys.push(primary.to_string());
            }
            filtered
        }

        (false, false) => {
            let mut filtered = FactCube::new();
            if let Some(metrics) = cube.cell(primary, secondary) {
                filtered
                    .by_primary
                    .insert(primary.to_string(), DimensionSlice::single(secondary, metrics.clone()));
                filtered
                    .by_secondary
                    .insert(secondary.to_string(), DimensionSlice::single(primary, metrics.clone()));
                filtered.grand_totals = metrics.clone();
                filtered.primary_keys.push(primary.to_string());
                filtered.secondary_keys.push(secondary.to_string());
            }
            filtered
        }
    }
}

// ============================================================================
// TELE VIEW
// ============================================================================

/// The telesales slice a dashboard renders: aggregated metrics plus the
/// ordered weeks that contributed to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeleView {
    pub metrics: TeleMetrics,
    pub weeks: Vec<String>,
}

impl TeleView {
    /// Explicit "no data" state for the presentation layer.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Restricts the telesales cube. A specific week wins over a month filter;
/// otherwise a specific month selects its weeks; otherwise everything.
pub fn tele_view(cube: &TeleCube, month: &str, week: &str) -> TeleView {
    if week != ALL {
        match cube.by_week.get(week) {
            Some(activity) => TeleView {
                metrics: activity.metrics,
                weeks: vec![week.to_string()],
            },
            None => TeleView::default(),
        }
    } else if month != ALL {
        match cube.by_month.get(month) {
            Some(activity) => TeleView {
                metrics: activity.metrics,
                weeks: activity.weeks.iter().cloned().collect(),
            },
            None => TeleView::default(),
        }
    } else {
        TeleView {
            metrics: cube.totals,
            weeks: cube.week_keys.clone(),
        }
    }
}

// ============================================================================
// DASHBOARD VIEW
// ============================================================================

/// One filter setting per dashboard dimension; `"All"` means unfiltered.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardFilters {
    pub month: String,
    pub associate: String,
    pub business: String,
    pub week: String,
}

impl Default for DashboardFilters {
    fn default() -> Self {
        DashboardFilters {
            month: ALL.to_string(),
            associate: ALL.to_string(),
            business: ALL.to_string(),
            week: ALL.to_string(),
        }
    }
}

/// The transient, fully filtered structure one dashboard render consumes.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub charter: FactCube<CharterMetrics>,
    pub hr: FactCube<HrMetrics>,
    pub tele: TeleView,
    pub summary: Summary,
    pub filters: DashboardFilters,
}

/// Applies the requested filters to every cube of a snapshot. The summary
/// is passed through unfiltered; it always describes the whole dataset.
pub fn dashboard_view(snapshot: &Snapshot, filters: &DashboardFilters) -> DashboardView {
    DashboardView {
        charter: filter_cube(&snapshot.charter, &filters.month, &filters.associate),
        hr: filter_cube(&snapshot.hr, &filters.month, &filters.business),
        tele: tele_view(&snapshot.tele, &filters.month, &filters.week),
        summary: snapshot.summary.clone(),
        filters: filters.clone(),
    }
}
