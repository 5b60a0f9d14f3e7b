//! FILENAME: core/ingest/src/error.rs

use thiserror::Error;

/// Terminal ingestion failures. Anything recoverable (malformed cells,
/// rows missing a dimension) degrades inside the pipeline instead of
/// surfacing here.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("invalid workbook: {0}")]
    InvalidFormat(String),
}
