mod aggregate;
mod filter;
mod table;
mod view;

pub use aggregate::{
    aggregate, available_years, Aggregation, ClientBreakdownPoint, KpiSummary, MonthlySalesPoint,
    StatusDistributionPoint, YearFilter, TOP_CLIENTS,
};
pub use filter::{
    company_options, filter_records, matches, status_options, CompanyFilter, FilterQuery,
    StatusFilter,
};
pub use table::{
    page, sort_records, total_pages, PageInfo, SortDirection, SortKey, TableState, PAGE_SIZE,
};
pub use view::{build_view, DashboardView, ViewState};
