use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::record::{InvoiceStatus, Record};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompanyFilter {
    #[default]
    All,
    /// Exact, case-sensitive company name
    Only(String),
}

impl CompanyFilter {
    /// "all" (or nothing) selects every company
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            None | Some("all") => CompanyFilter::All,
            Some(name) => CompanyFilter::Only(name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl FromStr for StatusFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Search, company and status filters of the invoice table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterQuery {
    pub search_text: String,
    pub company: CompanyFilter,
    pub status: StatusFilter,
}

/// True when `record` passes every filter of `query`.
///
/// Search text matches case-insensitively against client, company, concept
/// and invoice number; any one field is enough.
pub fn matches(record: &Record, query: &FilterQuery) -> bool {
    matches_search(record, &query.search_text.to_lowercase())
        && matches_company(record, &query.company)
        && matches_status(record, query.status)
}

fn matches_search(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &record.client_name,
        &record.company_name,
        &record.concept,
        &record.invoice_number,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn matches_company(record: &Record, company: &CompanyFilter) -> bool {
    match company {
        CompanyFilter::All => true,
        CompanyFilter::Only(name) => record.company_name == *name,
    }
}

fn matches_status(record: &Record, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Only(s) => record.status == s,
    }
}

/// Records passing `query`, in input order
pub fn filter_records<'a>(records: &'a [Record], query: &FilterQuery) -> Vec<&'a Record> {
    let filtered: Vec<&Record> = records.iter().filter(|r| matches(r, query)).collect();
    tracing::debug!(
        total = records.len(),
        matched = filtered.len(),
        "filtered records"
    );
    filtered
}

/// Distinct company names across the loaded records, sorted ascending
pub fn company_options(records: &[Record]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.company_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Status choices offered by the status filter
pub fn status_options() -> &'static [InvoiceStatus] {
    InvoiceStatus::selectable()
}
