//! FILENAME: core/ingest/src/reader.rs
//! Workbook decoding and the full ingestion pipeline.
//!
//! One workbook carries up to three fact sheets: charter revenue, HR
//! target tracking, and telesales activity. Sheets are picked by name
//! (case-insensitive), with a positional fallback for the first two; a
//! missing tele sheet simply yields an empty tele cube.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use log::{debug, warn};

use cube_engine::{
    CharterMetrics, FactCube, HrMetrics, Snapshot, Summary, SummaryOptions, TeleCube, TeleMetrics,
};

use crate::error::IngestError;
use crate::normalize::{aliases, RawRow};

/// Tolerance above which an explicit total that disagrees with its
/// component sum gets logged. The explicit value is kept either way.
pub const RECONCILE_EPSILON: f64 = 0.01;

/// Outcome of one successful ingestion: the freshly built snapshot plus
/// counts the upload surface reports back to the user.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub snapshot: Snapshot,
    pub charter_rows: usize,
    pub hr_rows: usize,
    pub tele_rows: usize,
    /// Rows dropped across all sheets for missing a required dimension.
    pub skipped_rows: usize,
}

/// Ingests a workbook from disk.
pub fn ingest_workbook(path: &Path) -> Result<IngestReport, IngestError> {
    let workbook: Xlsx<_> = open_workbook(path)?;
    ingest(workbook)
}

/// Ingests a workbook already held in memory (e.g. an upload buffer).
pub fn ingest_workbook_bytes(bytes: &[u8]) -> Result<IngestReport, IngestError> {
    let workbook = Xlsx::new(Cursor::new(bytes.to_vec()))?;
    ingest(workbook)
}

fn ingest<R: std::io::Read + std::io::Seek>(
    mut workbook: Xlsx<R>,
) -> Result<IngestReport, IngestError> {
    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(IngestError::NoSheets);
    }

    let charter_sheet = pick_sheet(&sheet_names, |n| n.contains("charter"), Some(0));
    let hr_sheet = pick_sheet(&sheet_names, |n| n == "hr", Some(1));
    let tele_sheet = pick_sheet(&sheet_names, |n| n.contains("tele"), None);
    debug!(
        "sheet selection: charter={:?} hr={:?} tele={:?}",
        charter_sheet, hr_sheet, tele_sheet
    );

    let mut skipped_rows = 0usize;

    let charter_raw = match &charter_sheet {
        Some(name) => sheet_rows(&mut workbook, name)?,
        None => Vec::new(),
    };
    let hr_raw = match &hr_sheet {
        Some(name) => sheet_rows(&mut workbook, name)?,
        None => Vec::new(),
    };
    let tele_raw = match &tele_sheet {
        Some(name) => sheet_rows(&mut workbook, name)?,
        None => Vec::new(),
    };

    let mut charter = parse_charter(&charter_raw, &mut skipped_rows);
    let mut hr = parse_hr(&hr_raw, &mut skipped_rows);
    let tele = parse_tele(&tele_raw, &mut skipped_rows);

    charter.sort_primary_canonical();
    hr.sort_primary_canonical();

    let summary = Summary::compute(&charter, &hr, &tele, &SummaryOptions::default());

    debug!(
        "ingestion complete: {} charter rows, {} hr rows, {} tele rows, {} skipped",
        charter_raw.len(),
        hr_raw.len(),
        tele_raw.len(),
        skipped_rows
    );

    Ok(IngestReport {
        snapshot: Snapshot {
            charter,
            hr,
            tele,
            summary,
        },
        charter_rows: charter_raw.len(),
        hr_rows: hr_raw.len(),
        tele_rows: tele_raw.len(),
        skipped_rows,
    })
}

// ============================================================================
// SHEET SELECTION
// ============================================================================

/// Picks the first sheet whose lowercased name satisfies the predicate,
/// falling back to a fixed position when no name matches.
fn pick_sheet(
    names: &[String],
    predicate: impl Fn(&str) -> bool,
    fallback: Option<usize>,
) -> Option<String> {
    names
        .iter()
        .find(|name| predicate(&name.to_lowercase()))
        .or_else(|| fallback.and_then(|index| names.get(index)))
        .cloned()
}

/// Reads one sheet into normalized rows. The first sheet row is the header
/// row; a sheet without one yields no rows.
fn sheet_rows<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Vec<RawRow>, IngestError> {
    let range = workbook
        .worksheet_range(name)
        .map_err(|e| IngestError::InvalidFormat(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => return Ok(Vec::new()),
    };

    Ok(rows.map(|cells| RawRow::new(&headers, cells)).collect())
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// FACT TABLE PARSERS
// ============================================================================

fn parse_charter(rows: &[RawRow], skipped: &mut usize) -> FactCube<CharterMetrics> {
    let mut cube = FactCube::new();

    for (index, row) in rows.iter().enumerate() {
        let (Some(month), Some(associate)) =
            (row.text(aliases::MONTH), row.text(aliases::ASSOCIATE))
        else {
            warn!("skipping charter row {index}: missing month or associate");
            *skipped += 1;
            continue;
        };

        let new_business_2025 = row.number(aliases::NEW_BUSINESS_2025);
        let existing_business_2025 = row.number(aliases::EXISTING_BUSINESS_2025);
        let busbuddy_2025 = row.number(aliases::BUSBUDDY_2025);
        let total_2025 = resolve_total(
            row.number(aliases::TOTAL_2025),
            new_business_2025 + existing_business_2025 + busbuddy_2025,
            &month,
            &associate,
            2025,
        );

        let new_business_2026 = row.number(aliases::NEW_BUSINESS_2026);
        let existing_business_2026 = row.number(aliases::EXISTING_BUSINESS_2026);
        let busbuddy_2026 = row.number(aliases::BUSBUDDY_2026);
        let total_2026 = resolve_total(
            row.number(aliases::TOTAL_2026),
            new_business_2026 + existing_business_2026 + busbuddy_2026,
            &month,
            &associate,
            2026,
        );

        cube.insert(
            &month,
            &associate,
            CharterMetrics {
                new_business_2025,
                existing_business_2025,
                busbuddy_2025,
                total_2025,
                new_business_2026,
                existing_business_2026,
                busbuddy_2026,
                total_2026,
                target_2026: row.number(aliases::TARGET_2026),
            },
        );
    }

    cube
}

/// Resolves a row's total revenue. An explicit nonzero total is
/// authoritative (an explicit 0 counts as absent and falls back to the
/// component sum). Disagreements beyond `RECONCILE_EPSILON` are logged but
/// never corrected; the log line is a data-quality signal.
fn resolve_total(explicit: f64, computed: f64, month: &str, associate: &str, year: u16) -> f64 {
    if explicit == 0.0 {
        return computed;
    }
    if computed != 0.0 && (explicit - computed).abs() > RECONCILE_EPSILON {
        warn!(
            "{month} / {associate}: explicit {year} total {explicit} differs from component sum {computed}"
        );
    }
    explicit
}

fn parse_hr(rows: &[RawRow], skipped: &mut usize) -> FactCube<HrMetrics> {
    let mut cube = FactCube::new();

    for (index, row) in rows.iter().enumerate() {
        let (Some(month), Some(business)) = (row.text(aliases::MONTH), row.text(aliases::BUSINESS))
        else {
            warn!("skipping hr row {index}: missing month or business");
            *skipped += 1;
            continue;
        };

        cube.insert(
            &month,
            &business,
            HrMetrics {
                target_2026: row.number(aliases::HR_TARGET_2026),
                actual_2026: row.number(aliases::HR_ACTUAL_2026),
            },
        );
    }

    cube
}

fn parse_tele(rows: &[RawRow], skipped: &mut usize) -> TeleCube {
    let mut cube = TeleCube::new();

    for (index, row) in rows.iter().enumerate() {
        let Some(week) = row.week_label(aliases::WEEK) else {
            warn!("skipping tele row {index}: missing week");
            *skipped += 1;
            continue;
        };

        cube.insert(
            &week,
            TeleMetrics {
                busbuddy_booked: row.number(aliases::BUSBUDDY_BOOKED),
                busbuddy_attended: row.number(aliases::BUSBUDDY_ATTENDED),
                busbuddy_trials: row.number(aliases::BUSBUDDY_TRIALS),
                taxi_booked: row.number(aliases::TAXI_BOOKED),
                taxi_attended: row.number(aliases::TAXI_ATTENDED),
                taxi_closed: row.number(aliases::TAXI_CLOSED),
            },
        );
    }

    cube
}
