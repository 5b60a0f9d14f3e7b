//! FILENAME: core/cube-engine/src/lib.rs
//! Aggregation core for the sales/HR/telesales dashboards.
//!
//! This crate turns normalized fact rows into cross-tabulated, co-indexed
//! aggregates and answers filtered dashboard queries over them. It knows
//! nothing about workbooks, storage, or rendering; those live in the
//! `ingest` and `persistence` crates and in presentation collaborators.
//!
//! Layers:
//! - `metrics`: The per-fact-table metric record schemas
//! - `cube`: The three-way-indexed aggregate and its single-pass builder
//! - `tele`: The week-keyed activity cube with its derived month dimension
//! - `week`: Week-ordinal to month-bucket mapping
//! - `summary`: Cross-cube scalar KPIs (achievement, YoY, funnel rates)
//! - `query`: Read-only filter engine producing transient sub-cubes
//! - `snapshot`: The full persistable application state
//! - `format`: Display formatting for amounts, counts, and percentages

pub mod cube;
pub mod format;
pub mod metrics;
pub mod query;
pub mod snapshot;
pub mod summary;
pub mod tele;
pub mod week;

pub use cube::{DimensionSlice, FactCube, MONTHS};
pub use format::{format_amount, format_count, format_percent};
pub use metrics::{CharterMetrics, HrMetrics, Metrics, TeleMetrics};
pub use query::{
    dashboard_view, filter_cube, tele_view, DashboardFilters, DashboardView, TeleView, ALL,
};
pub use snapshot::Snapshot;
pub use summary::{
    achievement, yoy_growth, CharterSummary, HrSummary, OverallSummary, Summary, SummaryOptions,
    TeleSummary, DEFAULT_NET_REVENUE_RATIO,
};
pub use tele::{MonthActivity, TeleCube, WeekActivity};
pub use week::{week_number, week_to_month};
