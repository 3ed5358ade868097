mod invoice;
mod status;

pub use invoice::Record;
pub use status::InvoiceStatus;

use crate::error::{DashboardError, Result};
use std::fs;
use std::path::Path;

/// Load a JSON array of records, rejecting entries with negative amounts.
/// An empty array is a valid, empty record list.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        return Err(DashboardError::RecordsNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let records: Vec<Record> =
        serde_json::from_str(&content).map_err(|e| DashboardError::RecordsParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    if let Some((index, reason)) = records
        .iter()
        .enumerate()
        .find_map(|(idx, r)| r.defect().map(|reason| (idx + 1, reason)))
    {
        return Err(DashboardError::InvalidRecord { index, reason });
    }

    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Sample data written by `dashboard init`
pub const RECORDS_TEMPLATE: &str = r#"[
  {
    "clientName": "ACME Corp",
    "companyName": "Northwind Services",
    "saleOrderPointId": 1,
    "registrationDate": "2024-01-15",
    "invoiceNumber": "0001-00000101",
    "concept": "Monthly maintenance",
    "quantity": 1,
    "unitPrice": 1000.0,
    "subtotal": 1000.0,
    "vatRate": 0.21,
    "subtotalWithVat": 1210.0,
    "status": "COLLECTED",
    "periodLabel": "1st half January 2024"
  },
  {
    "clientName": "Globex",
    "companyName": "Northwind Services",
    "saleOrderPointId": 1,
    "registrationDate": "2024-02-01",
    "invoiceNumber": "0001-00000102",
    "concept": "Network audit",
    "quantity": 2,
    "unitPrice": 250.0,
    "subtotal": 500.0,
    "vatRate": 0.21,
    "subtotalWithVat": 605.0,
    "status": "UNPAID",
    "periodLabel": "1st half February 2024"
  },
  {
    "clientName": "Initech",
    "companyName": "Southwind Consulting",
    "saleOrderPointId": 2,
    "registrationDate": "2024-02-20",
    "invoiceNumber": "0002-00000040",
    "concept": "Cloud migration",
    "quantity": 1,
    "unitPrice": 800.0,
    "subtotal": 800.0,
    "vatRate": 0.21,
    "subtotalWithVat": 968.0,
    "status": "PENDING",
    "periodLabel": "2nd half February 2024"
  },
  {
    "clientName": "ACME Corp",
    "companyName": "Southwind Consulting",
    "saleOrderPointId": 2,
    "registrationDate": "2025-03-03",
    "invoiceNumber": "0002-00000041",
    "concept": "Support hours",
    "quantity": 10,
    "unitPrice": 50.0,
    "subtotal": 500.0,
    "vatRate": 0.21,
    "subtotalWithVat": 605.0,
    "status": "VOIDED",
    "periodLabel": "1st half March 2025"
  }
]
"#;
