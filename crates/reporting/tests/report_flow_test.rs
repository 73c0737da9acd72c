//! End-to-end report flow against the seeded mock accounts.

use adsim_cache::StructureCache;
use adsim_core::report::{OrderBy, ReportQuery, SortDirection};
use adsim_core::types::{Dimension, MetricName, MetricValue};
use adsim_reporting::ReportBuilder;
use chrono::NaiveDate;
use std::sync::Arc;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn builder() -> ReportBuilder {
    ReportBuilder::new(Arc::new(StructureCache::new()))
}

fn count(value: Option<MetricValue>) -> u64 {
    match value {
        Some(MetricValue::Count(n)) => n,
        other => panic!("expected a count, got {other:?}"),
    }
}

#[test]
fn test_single_day_impressions_and_clicks() {
    let mut query = ReportQuery::new("123-456-7890", day("2024-01-15"), day("2024-01-15"));
    query.dimensions = Some(vec![]);
    query.metrics = Some(vec![MetricName::Impressions, MetricName::Clicks]);

    let report = builder().build_report(&query).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.metadata.total_rows, 1);
    assert!(report.next_page_token.is_none());

    let metrics = &report.rows[0].metrics;
    assert_eq!(metrics.len(), 2);
    let impressions = count(metrics.get("impressions"));
    let clicks = count(metrics.get("clicks"));
    assert!(clicks <= impressions);
    assert!(impressions > 0);
}

#[test]
fn test_single_day_golden_totals() {
    let mut query = ReportQuery::new("123-456-7890", day("2024-01-15"), day("2024-01-15"));
    query.metrics = Some(vec![MetricName::Impressions, MetricName::Clicks, MetricName::Cost]);

    let report = builder().build_report(&query).unwrap();
    let json = serde_json::to_value(&report.rows[0].metrics).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"impressions": 1787425, "clicks": 31571, "cost": 44949.5})
    );
}

#[test]
fn test_zero_dimensions_equal_full_aggregate() {
    let b = builder();
    let mut total = ReportQuery::new("234-567-8901", day("2024-02-01"), day("2024-02-03"));
    total.metrics = Some(vec![
        MetricName::Impressions,
        MetricName::Clicks,
        MetricName::Conversions,
        MetricName::Cost,
    ]);
    let mut fine = total.clone();
    fine.dimensions = Some(Dimension::ALL.to_vec());
    fine.page_size = Some(usize::MAX);

    let collapsed = b.build_report(&total).unwrap();
    let detailed = b.build_report(&fine).unwrap();
    assert_eq!(collapsed.rows.len(), 1);
    assert_eq!(detailed.rows.len(), detailed.metadata.total_rows);

    let sum = |field: &str| -> u64 { detailed.rows.iter().map(|r| count(r.metrics.get(field))).sum() };
    let row = &collapsed.rows[0].metrics;
    assert_eq!(count(row.get("impressions")), sum("impressions"));
    assert_eq!(count(row.get("clicks")), sum("clicks"));
    assert_eq!(count(row.get("conversions")), sum("conversions"));

    let detailed_cost: f64 = detailed
        .rows
        .iter()
        .map(|r| r.metrics.get("cost").unwrap().as_f64())
        .sum();
    let collapsed_cost = row.get("cost").unwrap().as_f64();
    assert!((collapsed_cost - detailed_cost).abs() < 0.01 * detailed.rows.len() as f64);
}

#[test]
fn test_paging_through_ten_days() {
    let b = builder();
    let mut query = ReportQuery::new("456-789-0123", day("2024-03-01"), day("2024-03-10"));
    query.dimensions = Some(vec![Dimension::Date]);
    query.page_size = Some(4);

    let all_rows = {
        let mut q = query.clone();
        q.page_size = Some(10);
        b.build_report(&q).unwrap().rows
    };
    assert_eq!(all_rows.len(), 10);

    let first = b.build_report(&query).unwrap();
    assert_eq!(first.metadata.total_rows, 10);
    assert_eq!(first.rows, all_rows[0..4].to_vec());
    assert_eq!(first.next_page_token.as_deref(), Some("4"));

    query.page_offset = 4;
    let second = b.build_report(&query).unwrap();
    assert_eq!(second.rows, all_rows[4..8].to_vec());
    assert_eq!(second.next_page_token.as_deref(), Some("8"));

    query.page_offset = 8;
    let last = b.build_report(&query).unwrap();
    assert_eq!(last.rows, all_rows[8..10].to_vec());
    assert!(last.next_page_token.is_none());
}

#[test]
fn test_rows_follow_date_order_without_sorting() {
    let mut query = ReportQuery::new("567-890-1234", day("2024-01-01"), day("2024-01-05"));
    query.dimensions = Some(vec![Dimension::Date]);
    let report = builder().build_report(&query).unwrap();
    let dates: Vec<String> = report
        .rows
        .iter()
        .map(|r| r.dimensions.date.unwrap().to_string())
        .collect();
    assert_eq!(
        dates,
        ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
    );
}

#[test]
fn test_cost_ordering_across_campaigns() {
    let mut query = ReportQuery::new("123-456-7890", day("2024-01-08"), day("2024-01-14"));
    query.dimensions = Some(vec![Dimension::Campaign]);
    query.metrics = Some(vec![MetricName::Cost, MetricName::Roas]);
    query.order_by = Some(OrderBy {
        field: "cost".into(),
        direction: SortDirection::Desc,
    });
    let report = builder().build_report(&query).unwrap();
    let costs: Vec<f64> = report
        .rows
        .iter()
        .map(|r| r.metrics.get("cost").unwrap().as_f64())
        .collect();
    assert!(!costs.is_empty());
    assert!(costs.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_response_json_shape() {
    let mut query = ReportQuery::new("345-678-9012", day("2024-01-15"), day("2024-01-16"));
    query.dimensions = Some(vec![Dimension::Device]);
    query.metrics = Some(vec![MetricName::Clicks, MetricName::Ctr]);
    query.page_size = Some(2);

    let report = builder().build_report(&query).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["metadata"]["accountId"], "345-678-9012");
    assert_eq!(json["metadata"]["accountName"], "Metro Plumbing Services");
    assert_eq!(json["metadata"]["dateRange"]["startDate"], "2024-01-15");
    assert_eq!(json["metadata"]["dimensions"][0], "device");
    assert_eq!(json["metadata"]["metrics"][1], "ctr");
    assert_eq!(json["metadata"]["totalRows"], 3);
    assert_eq!(json["nextPageToken"], "2");
    assert!(json["rows"][0]["dimensions"]["device"].is_string());
    assert!(json["rows"][0]["metrics"]["clicks"].is_u64());
}
