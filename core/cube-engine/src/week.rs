//! FILENAME: core/cube-engine/src/week.rs
//! Week-ordinal to calendar-month mapping.
//!
//! The telesales fact table is keyed by week, but the dashboards group it by
//! month. The mapping uses fixed-width buckets approximating 4-5 week
//! months; it does not correspond to any real calendar and is deliberately
//! not adjustable at call time.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cube::MONTHS;

static WEEK_ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Extracts the first integer substring from a week label, e.g.
/// `"Week 12"` -> `Some(12)`.
pub fn week_number(label: &str) -> Option<u32> {
    WEEK_ORDINAL
        .find(label)
        .and_then(|m| m.as_str().parse().ok())
}

/// Maps a week label to its month bucket.
///
/// Labels without a number fall back to week 1 (January). Weeks beyond 49
/// all land in December.
pub fn week_to_month(label: &str) -> &'static str {
    let week = week_number(label).unwrap_or(1);
    match week {
        0..=4 => MONTHS[0],
        5..=8 => MONTHS[1],
        9..=13 => MONTHS[2],
        14..=17 => MONTHS[3],
        18..=21 => MONTHS[4],
        22..=26 => MONTHS[5],
        27..=30 => MONTHS[6],
        31..=35 => MONTHS[7],
        36..=39 => MONTHS[8],
        40..=43 => MONTHS[9],
        44..=48 => MONTHS[10],
        _ => MONTHS[11],
    }
}
