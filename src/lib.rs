pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod record;

pub use config::{Config, DashboardSettings};
pub use dashboard::{
    aggregate, build_view, filter_records, matches, Aggregation, DashboardView, FilterQuery,
    KpiSummary, SortDirection, SortKey, TableState, ViewState, YearFilter,
};
pub use error::{DashboardError, Result};
pub use record::{load_records, InvoiceStatus, Record};
