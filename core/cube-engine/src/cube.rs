//! FILENAME: core/cube-engine/src/cube.rs
//! The three-way-indexed fact cube and its single-pass builder.
//!
//! A `FactCube` holds the same underlying observations under two indexes
//! (primary dimension and secondary dimension) plus grand totals. For any
//! (primary, secondary) pair the leaf metrics record stored under both
//! indexes is the same value, so a reader sees identical numbers no matter
//! which index it traverses.
//!
//! Invariant: for every metric field,
//! `grand_totals == Σ by_primary[*].totals == Σ by_secondary[*].totals`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

/// Canonical month labels, in calendar order.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Position of a month label in the calendar, case-insensitive.
pub fn month_index(label: &str) -> Option<usize> {
    MONTHS.iter().position(|m| m.eq_ignore_ascii_case(label))
}

// ============================================================================
// DIMENSION SLICE
// ============================================================================

/// One index entry: the cells keyed by the *other* dimension, plus the
/// running total over those cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "M: serde::Deserialize<'de> + Default"))]
pub struct DimensionSlice<M> {
    pub cells: FxHashMap<String, M>,
    pub totals: M,
}

impl<M: Metrics> DimensionSlice<M> {
    /// A slice containing exactly one cell, with totals equal to that cell.
    pub fn single(key: &str, metrics: M) -> Self {
        let mut cells = FxHashMap::default();
        cells.insert(key.to_string(), metrics.clone());
        DimensionSlice {
            cells,
            totals: metrics,
        }
    }
}

// ============================================================================
// FACT CUBE
// ============================================================================

/// Co-indexed aggregate over one fact table.
///
/// `primary_keys` / `secondary_keys` record distinct dimension values in
/// first-seen order; `sort_primary_canonical` reorders the primary list to
/// calendar order for month-keyed cubes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "M: serde::Deserialize<'de> + Default"))]
pub struct FactCube<M> {
    pub by_primary: FxHashMap<String, DimensionSlice<M>>,
    pub by_secondary: FxHashMap<String, DimensionSlice<M>>,
    pub grand_totals: M,
    pub primary_keys: Vec<String>,
    pub secondary_keys: Vec<String>,
}

impl<M: Metrics> FactCube<M> {
    pub fn new() -> Self {
        FactCube::default()
    }

    /// Folds one observation into the cube.
    ///
    /// Duplicate (primary, secondary) pairs accumulate by addition. Totals
    /// at the slice and grand level accumulate on every call, so additivity
    /// holds for any input, duplicates included.
    pub fn insert(&mut self, primary: &str, secondary: &str, metrics: M) {
        if !self.by_primary.contains_key(primary) {
            self.primary_keys.push(primary.to_string());
        }
        if !self.by_secondary.contains_key(secondary) {
            self.secondary_keys.push(secondary.to_string());
        }

        let p_slice = self.by_primary.entry(primary.to_string()).or_default();
        p_slice
            .cells
            .entry(secondary.to_string())
            .or_default()
            .accumulate(&metrics);
        p_slice.totals.accumulate(&metrics);

        let s_slice = self.by_secondary.entry(secondary.to_string()).or_default();
        s_slice
            .cells
            .entry(primary.to_string())
            .or_default()
            .accumulate(&metrics);
        s_slice.totals.accumulate(&metrics);

        self.grand_totals.accumulate(&metrics);
    }

    /// Builds a cube from an ordered sequence of (primary, secondary,
    /// metrics) rows. Pure function of its input.
    pub fn build(rows: impl IntoIterator<Item = (String, String, M)>) -> Self {
        let mut cube = FactCube::new();
        for (primary, secondary, metrics) in rows {
            cube.insert(&primary, &secondary, metrics);
        }
        cube
    }

    /// The leaf metrics for one (primary, secondary) pair, if present.
    pub fn cell(&self, primary: &str, secondary: &str) -> Option<&M> {
        self.by_primary.get(primary)?.cells.get(secondary)
    }

    pub fn is_empty(&self) -> bool {
        self.by_primary.is_empty()
    }

    /// Reorders `primary_keys` to calendar-month order. Labels that are not
    /// month names sort after the known months, keeping their relative
    /// order.
    pub fn sort_primary_canonical(&mut self) {
        self.primary_keys
            .sort_by_key(|k| month_index(k).unwrap_or(usize::MAX));
    }
}
