use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Lifecycle tag of an invoice record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[serde(alias = "COBRADO")]
    Collected,
    #[serde(alias = "IMPAGO")]
    Unpaid,
    #[serde(alias = "PENDIENTE")]
    Pending,
    #[serde(alias = "ANULADO")]
    Voided,
}

impl InvoiceStatus {
    /// Every status, in declaration order
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Collected,
        InvoiceStatus::Unpaid,
        InvoiceStatus::Pending,
        InvoiceStatus::Voided,
    ];

    const SELECTABLE: [InvoiceStatus; 3] = [
        InvoiceStatus::Collected,
        InvoiceStatus::Unpaid,
        InvoiceStatus::Pending,
    ];

    /// Statuses offered as status-filter choices. Voided is never offered.
    pub fn selectable() -> &'static [InvoiceStatus] {
        &Self::SELECTABLE
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Collected => "COLLECTED",
            InvoiceStatus::Unpaid => "UNPAID",
            InvoiceStatus::Pending => "PENDING",
            InvoiceStatus::Voided => "VOIDED",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COLLECTED" | "COBRADO" => Ok(InvoiceStatus::Collected),
            "UNPAID" | "IMPAGO" => Ok(InvoiceStatus::Unpaid),
            "PENDING" | "PENDIENTE" => Ok(InvoiceStatus::Pending),
            "VOIDED" | "ANULADO" => Ok(InvoiceStatus::Voided),
            _ => Err(DashboardError::InvalidStatus(s.to_string())),
        }
    }
}
