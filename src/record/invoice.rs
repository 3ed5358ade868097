use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InvoiceStatus;

/// One invoice/billing line as delivered by the data source.
///
/// `subtotal` and `subtotal_with_vat` are trusted as given and never
/// recomputed from quantity, unit price and VAT rate. Field names also
/// accept the Spanish spellings of the original export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(alias = "razonSocial")]
    pub client_name: String,
    #[serde(alias = "empresa")]
    pub company_name: String,
    #[serde(alias = "puntoVenta")]
    pub sale_order_point_id: u32,
    #[serde(alias = "fechaRegistro")]
    pub registration_date: NaiveDate,
    #[serde(alias = "facturaN")]
    pub invoice_number: String,
    #[serde(alias = "concepto")]
    pub concept: String,
    #[serde(alias = "cantidad")]
    pub quantity: u32,
    #[serde(alias = "precioUnitario")]
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    #[serde(alias = "alicuotaIva")]
    pub vat_rate: Decimal,
    #[serde(alias = "subtotalConIva")]
    pub subtotal_with_vat: Decimal,
    #[serde(alias = "estado")]
    pub status: InvoiceStatus,
    /// Half-month billing period label, informational only
    #[serde(default, alias = "quincenaTexto")]
    pub period_label: String,
}

impl Record {
    /// Reason this record breaks the loader contract, if any
    pub(crate) fn defect(&self) -> Option<String> {
        let amounts = [
            ("unitPrice", self.unit_price),
            ("subtotal", self.subtotal),
            ("vatRate", self.vat_rate),
            ("subtotalWithVat", self.subtotal_with_vat),
        ];
        amounts.iter().find_map(|(field, value)| {
            (*value < Decimal::ZERO)
                .then(|| format!("{field} must not be negative (got {value})"))
        })
    }
}
