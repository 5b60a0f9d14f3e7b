//! FILENAME: core/ingest/src/normalize.rs
//! Header resolution and numeric coercion for raw sheet rows.
//!
//! Source workbooks spell the same column many ways ("Total Revenue_2025",
//! "Total Revenue 2025", "totalrevenue2025"). Resolution works over a
//! static alias table: each semantic field lists its accepted spellings in
//! order, and both sides are folded (lowercased, whitespace and underscores
//! stripped) before comparison. First match wins.

use calamine::Data;
use rustc_hash::FxHashMap;

/// Folds a header for matching: lowercase, whitespace and underscores
/// removed.
pub fn fold_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Coerces a cell to a number. Blank and unparseable cells become 0;
/// malformed data degrades silently rather than failing an ingestion.
pub fn clean_number(value: &Data) -> f64 {
    match value {
        Data::Empty => 0.0,
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',').collect();
            cleaned.trim().parse().unwrap_or(0.0)
        }
        Data::DateTime(dt) => dt.as_f64(),
        Data::Error(_) => 0.0,
    }
}

// ============================================================================
// ALIAS TABLES
// ============================================================================

/// Accepted header spellings per semantic field, in match order. Folding
/// makes the match case-, whitespace-, and underscore-insensitive, so only
/// genuinely different spellings need separate entries.
pub mod aliases {
    pub const MONTH: &[&str] = &["Month"];
    pub const ASSOCIATE: &[&str] = &["Associate"];
    pub const BUSINESS: &[&str] = &["Business"];

    pub const NEW_BUSINESS_2025: &[&str] = &["new business revenue_2025"];
    pub const EXISTING_BUSINESS_2025: &[&str] = &["existing business revenue_2025"];
    pub const BUSBUDDY_2025: &[&str] = &["busbuddy revenue_2025"];
    pub const TOTAL_2025: &[&str] = &["Total Revenue_2025"];
    pub const NEW_BUSINESS_2026: &[&str] = &["new business revenue_2026"];
    pub const EXISTING_BUSINESS_2026: &[&str] = &["existing business revenue_2026"];
    pub const BUSBUDDY_2026: &[&str] = &["busbuddy revenue_2026"];
    pub const TOTAL_2026: &[&str] = &["Total Revenue_2026"];
    pub const TARGET_2026: &[&str] = &["Target 2026"];

    pub const HR_TARGET_2026: &[&str] = &["2026 Target", "target 2026"];
    pub const HR_ACTUAL_2026: &[&str] = &["2026 Actual", "actual 2026"];

    pub const WEEK: &[&str] = &["WeekNumber", "Week"];
    pub const BUSBUDDY_BOOKED: &[&str] = &["BusBuddy_meetings_booked"];
    pub const BUSBUDDY_ATTENDED: &[&str] = &["BusBuddy_meetings_attended"];
    pub const BUSBUDDY_TRIALS: &[&str] = &["BusBuddy_trials"];
    pub const TAXI_BOOKED: &[&str] = &["Taxi_meetings_booked"];
    pub const TAXI_ATTENDED: &[&str] = &["Taxi_meetings_attended"];
    pub const TAXI_CLOSED: &[&str] = &["Taxi_meetings_closed"];
}

// ============================================================================
// RAW ROW
// ============================================================================

/// One sheet row, re-keyed by folded header. When a sheet repeats a folded
/// header, the first occurrence wins.
#[derive(Debug, Clone)]
pub struct RawRow {
    cells: FxHashMap<String, Data>,
}

impl RawRow {
    pub fn new(headers: &[String], row: &[Data]) -> Self {
        let mut cells = FxHashMap::default();
        for (header, cell) in headers.iter().zip(row) {
            if header.is_empty() {
                continue;
            }
            cells.entry(fold_header(header)).or_insert_with(|| cell.clone());
        }
        RawRow { cells }
    }

    fn lookup(&self, field_aliases: &[&str]) -> Option<&Data> {
        field_aliases
            .iter()
            .find_map(|alias| self.cells.get(&fold_header(alias)))
    }

    /// Resolves a numeric field; missing resolves to 0 like a blank cell.
    pub fn number(&self, field_aliases: &[&str]) -> f64 {
        self.lookup(field_aliases).map(clean_number).unwrap_or(0.0)
    }

    /// Resolves a textual dimension value. Blank or non-text cells count as
    /// missing; the caller skips such rows.
    pub fn text(&self, field_aliases: &[&str]) -> Option<String> {
        match self.lookup(field_aliases)? {
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            _ => None,
        }
    }

    /// Resolves a week label. Numeric cells become `"Week {n}"` so both
    /// `42` and `"Week 42"` source columns produce the same key.
    pub fn week_label(&self, field_aliases: &[&str]) -> Option<String> {
        match self.lookup(field_aliases)? {
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Data::Float(f) => Some(format!("Week {}", *f as i64)),
            Data::Int(i) => Some(format!("Week {}", i)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Data)]) -> RawRow {
        let headers: Vec<String> = pairs.iter().map(|(h, _)| h.to_string()).collect();
        let cells: Vec<Data> = pairs.iter().map(|(_, c)| c.clone()).collect();
        RawRow::new(&headers, &cells)
    }

    #[test]
    fn test_fold_header() {
        assert_eq!(fold_header("Total Revenue_2025"), "totalrevenue2025");
        assert_eq!(fold_header("Total Revenue 2025"), "totalrevenue2025");
        assert_eq!(fold_header("totalrevenue2025"), "totalrevenue2025");
        assert_eq!(fold_header("BusBuddy_meetings_booked"), "busbuddymeetingsbooked");
    }

    #[test]
    fn test_header_spelling_variants_resolve_identically() {
        for header in ["Total Revenue_2025", "Total Revenue 2025", "totalrevenue2025"] {
            let r = row(&[(header, Data::Float(1481940.0))]);
            assert_eq!(r.number(aliases::TOTAL_2025), 1481940.0, "header {header:?}");
        }
    }

    #[test]
    fn test_clean_number_coercion() {
        assert_eq!(clean_number(&Data::Empty), 0.0);
        assert_eq!(clean_number(&Data::Float(42.5)), 42.5);
        assert_eq!(clean_number(&Data::Int(7)), 7.0);
        assert_eq!(clean_number(&Data::String("1,481,940".to_string())), 1481940.0);
        assert_eq!(clean_number(&Data::String(" 250.75 ".to_string())), 250.75);
        assert_eq!(clean_number(&Data::String("n/a".to_string())), 0.0);
        assert_eq!(clean_number(&Data::String(String::new())), 0.0);
    }

    #[test]
    fn test_alias_order_first_match_wins() {
        let r = row(&[
            ("target 2026", Data::Float(100.0)),
            ("2026 Target", Data::Float(200.0)),
        ]);
        // "2026 Target" is listed first in the alias table.
        assert_eq!(r.number(aliases::HR_TARGET_2026), 200.0);
    }

    #[test]
    fn test_text_dimension_resolution() {
        let r = row(&[("Month", Data::String("  January ".to_string()))]);
        assert_eq!(r.text(aliases::MONTH), Some("January".to_string()));

        let blank = row(&[("Month", Data::String("   ".to_string()))]);
        assert_eq!(blank.text(aliases::MONTH), None);

        let missing = row(&[("Associate", Data::String("a@x".to_string()))]);
        assert_eq!(missing.text(aliases::MONTH), None);
    }

    #[test]
    fn test_week_label_from_number_or_text() {
        let numeric = row(&[("WeekNumber", Data::Float(7.0))]);
        assert_eq!(numeric.week_label(aliases::WEEK), Some("Week 7".to_string()));

        let text = row(&[("Week", Data::String("Week 7".to_string()))]);
        assert_eq!(text.week_label(aliases::WEEK), Some("Week 7".to_string()));
    }
}
