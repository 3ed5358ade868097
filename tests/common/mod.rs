#![allow(dead_code)]

use std::str::FromStr;

use chrono::NaiveDate;
use invoice_dashboard::{InvoiceStatus, Record};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

/// Record with the fields the tests care about; the rest are filler
pub fn record(client: &str, date: NaiveDate, total: &str, status: InvoiceStatus) -> Record {
    let total = dec(total);
    Record {
        client_name: client.to_string(),
        company_name: "Northwind".to_string(),
        sale_order_point_id: 1,
        registration_date: date,
        invoice_number: format!("0001-{}", date.format("%Y%m%d")),
        concept: "Services".to_string(),
        quantity: 1,
        unit_price: total,
        subtotal: total,
        vat_rate: Decimal::ZERO,
        subtotal_with_vat: total,
        status,
        period_label: String::new(),
    }
}

pub fn numbered(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, mut r)| {
            r.invoice_number = format!("INV-{:04}", idx + 1);
            r
        })
        .collect()
}
