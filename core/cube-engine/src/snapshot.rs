//! FILENAME: core/cube-engine/src/snapshot.rs
//! The full persistable application state.

use serde::{Deserialize, Serialize};

use crate::cube::FactCube;
use crate::metrics::{CharterMetrics, HrMetrics};
use crate::summary::Summary;
use crate::tele::TeleCube;

/// Everything one ingestion produces and one dashboard session consumes.
///
/// Built fresh on every successful ingestion (full replace, never an
/// incremental merge) and never mutated by dashboard queries; filtering
/// derives transient copies. Container-level `#[serde(default)]` lets
/// snapshots persisted before a fact table existed (the tele cube arrived
/// after charter/HR) load with that table empty instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub charter: FactCube<CharterMetrics>,
    pub hr: FactCube<HrMetrics>,
    pub tele: TeleCube,
    pub summary: Summary,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.charter.is_empty() && self.hr.is_empty() && self.tele.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CharterMetrics;

    #[test]
    fn test_serde_roundtrip() {
        let mut snapshot = Snapshot::default();
        snapshot.charter.insert(
            "January",
            "a@x",
            CharterMetrics {
                total_2026: 42.0,
                ..Default::default()
            },
        );

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let back: Snapshot = serde_json::from_str(r#"{"charter":{}}"#).unwrap();
        assert!(back.is_empty());
        assert!(back.tele.by_week.is_empty());
        assert_eq!(back.summary.months.len(), 0);
    }
}
