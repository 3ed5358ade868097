use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::record::Record;

/// Rows shown per table page
pub const PAGE_SIZE: usize = 15;

/// Sortable table columns, one per record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    ClientName,
    CompanyName,
    SaleOrderPointId,
    RegistrationDate,
    InvoiceNumber,
    Concept,
    Quantity,
    UnitPrice,
    Subtotal,
    VatRate,
    SubtotalWithVat,
    Status,
    PeriodLabel,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ClientName => "clientName",
            SortKey::CompanyName => "companyName",
            SortKey::SaleOrderPointId => "saleOrderPointId",
            SortKey::RegistrationDate => "registrationDate",
            SortKey::InvoiceNumber => "invoiceNumber",
            SortKey::Concept => "concept",
            SortKey::Quantity => "quantity",
            SortKey::UnitPrice => "unitPrice",
            SortKey::Subtotal => "subtotal",
            SortKey::VatRate => "vatRate",
            SortKey::SubtotalWithVat => "subtotalWithVat",
            SortKey::Status => "status",
            SortKey::PeriodLabel => "periodLabel",
        }
    }

    /// Natural ascending order of two records on this column. Status orders
    /// by lifecycle: collected, unpaid, pending, voided.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::ClientName => a.client_name.cmp(&b.client_name),
            SortKey::CompanyName => a.company_name.cmp(&b.company_name),
            SortKey::SaleOrderPointId => a.sale_order_point_id.cmp(&b.sale_order_point_id),
            SortKey::RegistrationDate => a.registration_date.cmp(&b.registration_date),
            SortKey::InvoiceNumber => a.invoice_number.cmp(&b.invoice_number),
            SortKey::Concept => a.concept.cmp(&b.concept),
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::UnitPrice => a.unit_price.cmp(&b.unit_price),
            SortKey::Subtotal => a.subtotal.cmp(&b.subtotal),
            SortKey::VatRate => a.vat_rate.cmp(&b.vat_rate),
            SortKey::SubtotalWithVat => a.subtotal_with_vat.cmp(&b.subtotal_with_vat),
            SortKey::Status => a.status.cmp(&b.status),
            SortKey::PeriodLabel => a.period_label.cmp(&b.period_label),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        let key = match normalized.as_str() {
            "clientname" | "client" => SortKey::ClientName,
            "companyname" | "company" => SortKey::CompanyName,
            "saleorderpointid" | "pos" => SortKey::SaleOrderPointId,
            "registrationdate" | "date" => SortKey::RegistrationDate,
            "invoicenumber" | "invoice" => SortKey::InvoiceNumber,
            "concept" => SortKey::Concept,
            "quantity" => SortKey::Quantity,
            "unitprice" => SortKey::UnitPrice,
            "subtotal" => SortKey::Subtotal,
            "vatrate" | "vat" => SortKey::VatRate,
            "subtotalwithvat" | "total" => SortKey::SubtotalWithVat,
            "status" => SortKey::Status,
            "periodlabel" | "period" => SortKey::PeriodLabel,
            _ => return Err(DashboardError::InvalidSortKey(s.to_string())),
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

/// Sort and pagination state of the invoice table.
///
/// Transitions return a new state; the caller owns the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState {
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// 1-based
    pub current_page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::RegistrationDate,
            direction: SortDirection::Descending,
            current_page: 1,
        }
    }
}

impl TableState {
    /// Re-sorting by the active ascending column flips it to descending;
    /// any other request sorts ascending by `key`. Always back to page 1.
    pub fn request_sort(self, key: SortKey) -> Self {
        let direction = if key == self.sort_key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self {
            sort_key: key,
            direction,
            current_page: 1,
        }
    }

    pub fn set_page(self, page: usize, filtered_count: usize, page_size: usize) -> Self {
        let last = total_pages(filtered_count, page_size);
        let clamped = page.clamp(1, last);
        if clamped != page {
            tracing::debug!(requested = page, clamped, "page out of range");
        }
        Self {
            current_page: clamped,
            ..self
        }
    }

    /// Current page clamped against `filtered_count`, for display after the
    /// upstream list shrank under a stale page
    pub fn effective_page(&self, filtered_count: usize, page_size: usize) -> usize {
        self.current_page.clamp(1, total_pages(filtered_count, page_size))
    }
}

/// Number of pages for `filtered_count` rows; at least one
pub fn total_pages(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1)).max(1)
}

/// Stable sort of `rows` by `key`; equal keys keep their input order
pub fn sort_records(rows: &mut [&Record], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = key.compare(a, b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Position of the visible page within the filtered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when there are no rows
    pub first: usize,
    /// 1-based index of the last row shown, 0 when there are no rows
    pub last: usize,
    pub total: usize,
}

impl PageInfo {
    pub fn new(state: &TableState, filtered_count: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page = state.effective_page(filtered_count, page_size);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(filtered_count);
        Self {
            page,
            total_pages: total_pages(filtered_count, page_size),
            first: if end > start { start + 1 } else { 0 },
            last: end,
            total: filtered_count,
        }
    }
}

/// Sort `rows` per `state` and return the current page
pub fn page<'a>(rows: &[&'a Record], state: &TableState, page_size: usize) -> Vec<&'a Record> {
    let page_size = page_size.max(1);
    let mut sorted = rows.to_vec();
    sort_records(&mut sorted, state.sort_key, state.direction);

    let current = state.effective_page(sorted.len(), page_size);
    sorted
        .into_iter()
        .skip((current - 1) * page_size)
        .take(page_size)
        .collect()
}
