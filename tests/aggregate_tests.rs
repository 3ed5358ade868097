mod common;

use common::{date, dec, record};
use invoice_dashboard::dashboard::{aggregate, available_years, YearFilter, TOP_CLIENTS};
use invoice_dashboard::InvoiceStatus::{self, Collected, Pending, Unpaid, Voided};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[test]
fn test_kpi_totals_by_status() {
    let records = vec![
        record("A", date(2024, 1, 10), "100", Collected),
        record("B", date(2024, 1, 11), "50", Unpaid),
        record("C", date(2024, 1, 12), "30", Pending),
    ];

    let kpi = aggregate(&records, YearFilter::All).kpi;
    assert_eq!(kpi.total_billed, dec("180"));
    assert_eq!(kpi.total_collected, dec("100"));
    assert_eq!(kpi.total_unpaid, dec("50"));
    assert_eq!(kpi.invoice_count, 3);
    assert_eq!(kpi.outstanding(), dec("80"));
}

#[test]
fn test_voided_counts_as_billed_only() {
    let records = vec![
        record("A", date(2024, 1, 10), "100", Collected),
        record("B", date(2024, 1, 11), "40", Voided),
    ];

    let kpi = aggregate(&records, YearFilter::All).kpi;
    assert_eq!(kpi.total_billed, dec("140"));
    assert_eq!(kpi.total_collected, dec("100"));
    assert_eq!(kpi.total_unpaid, Decimal::ZERO);
    assert!(kpi.total_collected + kpi.total_unpaid <= kpi.total_billed);
}

#[test]
fn test_monthly_series_is_chronological() {
    let records = vec![
        record("A", date(2024, 2, 3), "50", Collected),
        record("A", date(2024, 1, 15), "100", Collected),
        record("B", date(2024, 2, 20), "50", Unpaid),
    ];

    let monthly = aggregate(&records, YearFilter::All).monthly_sales;
    let points: Vec<(&str, Decimal)> = monthly.iter().map(|p| (p.label.as_str(), p.total)).collect();
    assert_eq!(points, vec![("Jan", dec("100")), ("Feb", dec("100"))]);
}

#[test]
fn test_monthly_series_orders_across_years() {
    let records = vec![
        record("A", date(2025, 1, 5), "10", Collected),
        record("A", date(2024, 12, 5), "20", Collected),
        record("A", date(2024, 3, 5), "30", Collected),
    ];

    let monthly = aggregate(&records, YearFilter::All).monthly_sales;
    let keys: Vec<(i32, u32)> = monthly.iter().map(|p| (p.year, p.month)).collect();
    assert_eq!(keys, vec![(2024, 3), (2024, 12), (2025, 1)]);
    assert_eq!(monthly[1].label, "Dec");
}

#[test]
fn test_top_clients_descending_and_truncated() {
    let mut records = Vec::new();
    for i in 0..12 {
        let name = format!("Client {i:02}");
        records.push(record(&name, date(2024, 1, 1), &((i + 1) * 10).to_string(), Collected));
    }
    // Client 00 climbs to the top with a second invoice
    records.push(record("Client 00", date(2024, 2, 1), "500", Unpaid));

    let top = aggregate(&records, YearFilter::All).top_clients;
    assert_eq!(top.len(), TOP_CLIENTS);
    assert_eq!(top[0].label, "Client 00");
    assert_eq!(top[0].total, dec("510"));
    assert_eq!(top[1].label, "Client 11");
    assert!(top.windows(2).all(|w| w[0].total >= w[1].total));
    assert!(!top.iter().any(|p| p.label == "Client 01"));
}

#[test]
fn test_top_clients_ties_keep_first_seen_order() {
    let records = vec![
        record("Zeta", date(2024, 1, 1), "100", Collected),
        record("Alpha", date(2024, 1, 2), "100", Collected),
        record("Mid", date(2024, 1, 3), "100", Collected),
    ];

    let top = aggregate(&records, YearFilter::All).top_clients;
    let labels: Vec<&str> = top.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_status_distribution_in_declaration_order() {
    let records = vec![
        record("A", date(2024, 1, 1), "1", Pending),
        record("B", date(2024, 1, 1), "1", Collected),
        record("C", date(2024, 1, 1), "1", Pending),
    ];

    let dist = aggregate(&records, YearFilter::All).status_distribution;
    let points: Vec<(&str, usize)> = dist.iter().map(|p| (p.label.as_str(), p.count)).collect();
    assert_eq!(points, vec![("COLLECTED", 1), ("PENDING", 2)]);
}

#[test]
fn test_year_filter_keeps_all_available_years() {
    let records = vec![
        record("A", date(2023, 6, 1), "10", Collected),
        record("B", date(2024, 6, 1), "20", Unpaid),
        record("C", date(2024, 7, 1), "30", Collected),
    ];

    let agg = aggregate(&records, YearFilter::Year(2024));
    assert_eq!(agg.kpi.invoice_count, 2);
    assert_eq!(agg.kpi.total_billed, dec("50"));
    assert_eq!(agg.available_years, vec![2023, 2024]);
    assert!(agg.top_clients.iter().all(|p| p.label != "A"));

    let none = aggregate(&records, YearFilter::Year(2020));
    assert_eq!(none.kpi.invoice_count, 0);
    assert!(none.monthly_sales.is_empty());
    assert_eq!(none.available_years, vec![2023, 2024]);
}

#[test]
fn test_empty_records() {
    let agg = aggregate(&[], YearFilter::All);
    assert_eq!(agg.kpi.total_billed, Decimal::ZERO);
    assert_eq!(agg.kpi.total_collected, Decimal::ZERO);
    assert_eq!(agg.kpi.total_unpaid, Decimal::ZERO);
    assert_eq!(agg.kpi.invoice_count, 0);
    assert!(agg.monthly_sales.is_empty());
    assert!(agg.top_clients.is_empty());
    assert!(agg.status_distribution.is_empty());
    assert!(agg.available_years.is_empty());
    assert!(available_years(&[]).is_empty());
}

#[test]
fn test_aggregate_is_deterministic() {
    let records = vec![
        record("A", date(2024, 3, 1), "12.5", Collected),
        record("B", date(2024, 1, 1), "7.25", Unpaid),
        record("A", date(2025, 3, 1), "3", Pending),
    ];

    assert_eq!(
        aggregate(&records, YearFilter::All),
        aggregate(&records, YearFilter::All)
    );
}

#[test]
fn test_year_filter_parse() {
    assert_eq!("all".parse::<YearFilter>().unwrap(), YearFilter::All);
    assert_eq!("ALL".parse::<YearFilter>().unwrap(), YearFilter::All);
    assert_eq!("2024".parse::<YearFilter>().unwrap(), YearFilter::Year(2024));
    assert!("last-year".parse::<YearFilter>().is_err());
}

#[test]
fn test_two_decimal_totals_sum_exactly() {
    let records = vec![
        record("A", date(2024, 1, 1), "736.63", Collected),
        record("B", date(2024, 1, 2), "90.38", Unpaid),
        record("C", date(2024, 1, 3), "85.79", Unpaid),
        record("D", date(2024, 1, 4), "859.69", Collected),
        record("E", date(2024, 1, 5), "732.61", Collected),
    ];

    let kpi = aggregate(&records, YearFilter::All).kpi;
    assert_eq!(kpi.total_billed, dec("2505.10"));
    assert_eq!(kpi.total_collected, dec("2328.93"));
    assert_eq!(kpi.total_unpaid, dec("176.17"));
    assert!(kpi.total_collected + kpi.total_unpaid <= kpi.total_billed);
    assert_eq!(kpi.outstanding(), kpi.total_unpaid);
}

const STATUSES: [InvoiceStatus; 4] = [Collected, Unpaid, Pending, Voided];

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    #[test]
    fn test_totals_agree_across_breakdowns(
        lines in prop::collection::vec((1i64..10_000_000i64, 0usize..4, 1u32..=12, 0usize..8), 1..60)
    ) {
        let records: Vec<_> = lines
            .iter()
            .map(|&(cents, status, month, client)| {
                let amount = Decimal::new(cents, 2).to_string();
                record(&format!("Client {client}"), date(2024, month, 1), &amount, STATUSES[status])
            })
            .collect();

        let agg = aggregate(&records, YearFilter::All);
        let billed: Decimal = records.iter().map(|r| r.subtotal_with_vat).sum();
        let by_status = |status: InvoiceStatus| -> Decimal {
            records
                .iter()
                .filter(|r| r.status == status)
                .map(|r| r.subtotal_with_vat)
                .sum()
        };

        prop_assert_eq!(agg.kpi.total_billed, billed);
        prop_assert_eq!(agg.kpi.total_collected, by_status(Collected));
        prop_assert_eq!(agg.kpi.total_unpaid, by_status(Unpaid));
        prop_assert!(agg.kpi.total_collected + agg.kpi.total_unpaid <= agg.kpi.total_billed);
        prop_assert_eq!(
            by_status(Collected) + by_status(Unpaid) + by_status(Pending) + by_status(Voided),
            agg.kpi.total_billed
        );

        let monthly: Decimal = agg.monthly_sales.iter().map(|p| p.total).sum();
        prop_assert_eq!(monthly, agg.kpi.total_billed);

        // At most eight distinct clients, so none fall outside the ranking
        let clients: Decimal = agg.top_clients.iter().map(|p| p.total).sum();
        prop_assert_eq!(clients, agg.kpi.total_billed);
    }
}
