//! FILENAME: core/ingest/src/lib.rs
//! Workbook ingestion for the dashboard aggregation core.
//!
//! Decodes an uploaded workbook (via calamine), normalizes its
//! inconsistently-headed rows, and folds them into the fact cubes. The
//! pipeline is a pure function of the workbook bytes: each ingestion builds
//! a fresh `Snapshot`, never merging with earlier uploads.

mod error;
mod normalize;
mod reader;

pub use error::IngestError;
pub use normalize::{aliases, clean_number, fold_header, RawRow};
pub use reader::{
    ingest_workbook, ingest_workbook_bytes, IngestReport, RECONCILE_EPSILON,
};
