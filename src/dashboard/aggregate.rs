use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::record::{InvoiceStatus, Record};

/// Number of clients kept in the ranking
pub const TOP_CLIENTS: usize = 10;

/// Restricts aggregation to one calendar year, or none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => date.year() == *year,
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str("all"),
            YearFilter::Year(year) => write!(f, "{year}"),
        }
    }
}

impl FromStr for YearFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(YearFilter::All);
        }
        trimmed
            .parse::<i32>()
            .map(YearFilter::Year)
            .map_err(|_| DashboardError::InvalidYear(s.to_string()))
    }
}

/// Headline metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_billed: Decimal,
    pub total_collected: Decimal,
    pub total_unpaid: Decimal,
    pub invoice_count: usize,
}

impl KpiSummary {
    /// Billed amount not yet collected (unpaid, pending and voided alike)
    pub fn outstanding(&self) -> Decimal {
        self.total_billed - self.total_collected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySalesPoint {
    /// Short month name, e.g. "Jan"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientBreakdownPoint {
    pub label: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDistributionPoint {
    pub status: InvoiceStatus,
    pub label: String,
    pub count: usize,
}

/// Everything the cards and charts render
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    pub kpi: KpiSummary,
    pub monthly_sales: Vec<MonthlySalesPoint>,
    pub top_clients: Vec<ClientBreakdownPoint>,
    pub status_distribution: Vec<StatusDistributionPoint>,
    /// Always derived from the unfiltered records, ascending
    pub available_years: Vec<i32>,
}

/// Derive every dashboard metric from `records`.
///
/// The year filter applies to all metrics except `available_years`, so the
/// year selector keeps its options whatever year is selected. Voided records
/// count towards billed totals like any other record.
pub fn aggregate(records: &[Record], year: YearFilter) -> Aggregation {
    let selected: Vec<&Record> = records
        .iter()
        .filter(|r| year.includes(r.registration_date))
        .collect();

    tracing::debug!(
        total = records.len(),
        selected = selected.len(),
        year = %year,
        "aggregating records"
    );

    Aggregation {
        kpi: kpi_summary(&selected),
        monthly_sales: monthly_sales(&selected),
        top_clients: top_clients(&selected, TOP_CLIENTS),
        status_distribution: status_distribution(&selected),
        available_years: available_years(records),
    }
}

/// Distinct registration years, ascending
pub fn available_years(records: &[Record]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.registration_date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn kpi_summary(records: &[&Record]) -> KpiSummary {
    records.iter().fold(KpiSummary::default(), |mut kpi, r| {
        kpi.total_billed += r.subtotal_with_vat;
        match r.status {
            InvoiceStatus::Collected => kpi.total_collected += r.subtotal_with_vat,
            InvoiceStatus::Unpaid => kpi.total_unpaid += r.subtotal_with_vat,
            // Pending is in flight; voided has no counterpart card
            InvoiceStatus::Pending | InvoiceStatus::Voided => {}
        }
        kpi.invoice_count += 1;
        kpi
    })
}

fn monthly_sales(records: &[&Record]) -> Vec<MonthlySalesPoint> {
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for r in records {
        let date = r.registration_date;
        *buckets
            .entry((date.year(), date.month()))
            .or_insert(Decimal::ZERO) += r.subtotal_with_vat;
    }

    buckets
        .into_iter()
        .map(|((year, month), total)| MonthlySalesPoint {
            label: month_label(year, month),
            year,
            month,
            total,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

fn top_clients(records: &[&Record], limit: usize) -> Vec<ClientBreakdownPoint> {
    // First-encountered order is kept so the stable sort breaks ties by it
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ClientBreakdownPoint> = Vec::new();

    for r in records {
        match index.get(r.client_name.as_str()) {
            Some(&idx) => totals[idx].total += r.subtotal_with_vat,
            None => {
                index.insert(r.client_name.as_str(), totals.len());
                totals.push(ClientBreakdownPoint {
                    label: r.client_name.clone(),
                    total: r.subtotal_with_vat,
                });
            }
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(limit);
    totals
}

fn status_distribution(records: &[&Record]) -> Vec<StatusDistributionPoint> {
    InvoiceStatus::ALL
        .iter()
        .filter_map(|&status| {
            let count = records.iter().filter(|r| r.status == status).count();
            (count > 0).then(|| StatusDistributionPoint {
                status,
                label: status.to_string(),
                count,
            })
        })
        .collect()
}
