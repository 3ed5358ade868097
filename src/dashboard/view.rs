use super::aggregate::{aggregate, Aggregation, YearFilter};
use super::filter::{company_options, filter_records, FilterQuery};
use super::table::{page, PageInfo, TableState};
use crate::record::Record;

/// Snapshot of every user-controlled input of the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub year: YearFilter,
    pub query: FilterQuery,
    pub table: TableState,
}

impl ViewState {
    /// Replace the table filters. The page is kept as is; display clamps it
    /// when the filtered list shrinks.
    pub fn with_query(self, query: FilterQuery) -> Self {
        Self { query, ..self }
    }

    pub fn with_year(self, year: YearFilter) -> Self {
        Self { year, ..self }
    }

    pub fn with_table(self, table: TableState) -> Self {
        Self { table, ..self }
    }
}

/// Everything needed to draw one frame of the dashboard
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub aggregation: Aggregation,
    pub companies: Vec<&'a str>,
    pub rows: Vec<&'a Record>,
    pub page: PageInfo,
    pub filtered_count: usize,
    /// Table state with its page clamped to the filtered rows
    pub table: TableState,
}

/// Recompute the whole dashboard from `records` and the current `state`.
///
/// Aggregates use the year filter; the table uses the search, company and
/// status filters over the full record list. A requested page past the end
/// of the filtered rows is clamped here, so callers need not count first.
pub fn build_view<'a>(
    records: &'a [Record],
    state: &ViewState,
    page_size: usize,
) -> DashboardView<'a> {
    let aggregation = aggregate(records, state.year);
    let filtered = filter_records(records, &state.query);
    let table = state
        .table
        .set_page(state.table.current_page, filtered.len(), page_size);
    let rows = page(&filtered, &table, page_size);

    DashboardView {
        aggregation,
        companies: company_options(records),
        page: PageInfo::new(&table, filtered.len(), page_size),
        filtered_count: filtered.len(),
        table,
        rows,
    }
}
