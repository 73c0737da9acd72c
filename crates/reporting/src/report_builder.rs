//! Report builder: expands a query into leaf cells, synthesizes metrics for
//! each, groups them by the requested dimensions, then sorts and paginates.

use adsim_cache::StructureCache;
use adsim_core::config::ReportsConfig;
use adsim_core::report::{
    AdGroupRef, CampaignRef, DateRange, DimensionValues, KeywordRef, MetricValues, OrderBy,
    ReportFilters, ReportMetadata, ReportQuery, ReportResponse, ReportRow, SortDirection,
};
use adsim_core::types::{
    AdGroup, BaseMetrics, Campaign, Device, Dimension, EntityStatus, Keyword, MetricName, Network,
};
use adsim_core::{AdSimError, AdSimResult};
use adsim_generator::dates::expand_date_range;
use adsim_generator::metrics::{accumulate, full_metrics};
use adsim_generator::{synthesize_base, MetricsContext};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_PAGE_SIZE: usize = 1000;

const KEY_SEPARATOR: &str = "|";

// ─── Types ──────────────────────────────────────────────────────────────────

/// Finest-granularity data point: one (date, campaign, ad group, keyword,
/// device, network) combination and its synthesized metrics.
#[derive(Debug, Clone, Copy)]
struct LeafCell<'a> {
    date: NaiveDate,
    campaign: &'a Campaign,
    ad_group: &'a AdGroup,
    keyword: &'a Keyword,
    device: Device,
    network: Network,
    metrics: BaseMetrics,
}

struct Group<'a> {
    representative: LeafCell<'a>,
    metrics: BaseMetrics,
}

/// Buckets leaf cells by the values of the requested dimensions. Groups
/// keep first-seen order.
struct Grouper<'a> {
    dimensions: Vec<Dimension>,
    index: HashMap<String, usize>,
    groups: Vec<Group<'a>>,
}

impl<'a> Grouper<'a> {
    fn new(requested: &[Dimension]) -> Self {
        Self {
            dimensions: Dimension::ALL
                .into_iter()
                .filter(|d| requested.contains(d))
                .collect(),
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn key(&self, cell: &LeafCell<'_>) -> String {
        self.dimensions
            .iter()
            .map(|dim| match dim {
                Dimension::Date => cell.date.to_string(),
                Dimension::Campaign => cell.campaign.id.clone(),
                Dimension::AdGroup => cell.ad_group.id.clone(),
                Dimension::Keyword => cell.keyword.id.clone(),
                Dimension::Device => cell.device.as_str().to_string(),
                Dimension::Network => cell.network.as_str().to_string(),
            })
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }

    fn add(&mut self, cell: LeafCell<'a>) {
        let key = self.key(&cell);
        match self.index.get(&key) {
            Some(&idx) => {
                let group = &mut self.groups[idx];
                group.metrics = accumulate(&group.metrics, &cell.metrics);
            }
            None => {
                self.index.insert(key, self.groups.len());
                self.groups.push(Group {
                    metrics: accumulate(&BaseMetrics::default(), &cell.metrics),
                    representative: cell,
                });
            }
        }
    }

    fn snapshot(&self, cell: &LeafCell<'_>) -> DimensionValues {
        let mut values = DimensionValues::default();
        for dim in &self.dimensions {
            match dim {
                Dimension::Date => values.date = Some(cell.date),
                Dimension::Campaign => {
                    values.campaign = Some(CampaignRef {
                        id: cell.campaign.id.clone(),
                        name: cell.campaign.name.clone(),
                        status: cell.campaign.status,
                    })
                }
                Dimension::AdGroup => {
                    values.ad_group = Some(AdGroupRef {
                        id: cell.ad_group.id.clone(),
                        name: cell.ad_group.name.clone(),
                        status: cell.ad_group.status,
                        campaign_id: cell.ad_group.campaign_id.clone(),
                    })
                }
                Dimension::Keyword => {
                    values.keyword = Some(KeywordRef {
                        id: cell.keyword.id.clone(),
                        text: cell.keyword.text.clone(),
                        match_type: cell.keyword.match_type,
                        ad_group_id: cell.keyword.ad_group_id.clone(),
                    })
                }
                Dimension::Device => values.device = Some(cell.device),
                Dimension::Network => values.network = Some(cell.network),
            }
        }
        values
    }

    fn into_rows(self, metrics: &[MetricName]) -> Vec<ReportRow> {
        self.groups
            .iter()
            .map(|group| {
                let full = full_metrics(group.metrics);
                ReportRow {
                    dimensions: self.snapshot(&group.representative),
                    metrics: MetricValues(metrics.iter().map(|m| (*m, full.value(*m))).collect()),
                }
            })
            .collect()
    }
}

// ─── Report Builder ─────────────────────────────────────────────────────────

pub struct ReportBuilder {
    cache: Arc<StructureCache>,
    default_page_size: usize,
}

impl ReportBuilder {
    pub fn new(cache: Arc<StructureCache>) -> Self {
        Self {
            cache,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn from_config(cache: Arc<StructureCache>, config: &ReportsConfig) -> Self {
        Self {
            cache,
            default_page_size: config.default_page_size,
        }
    }

    pub fn cache(&self) -> &Arc<StructureCache> {
        &self.cache
    }

    pub fn build_report(&self, query: &ReportQuery) -> AdSimResult<ReportResponse> {
        let structure = self.cache.get_or_generate(&query.account_id).ok_or_else(|| {
            metrics::counter!("reports.not_found").increment(1);
            warn!(account_id = %query.account_id, "Report requested for unknown account");
            AdSimError::AccountNotFound(query.account_id.clone())
        })?;
        let account = &structure.account;

        let dimensions = first_occurrences(query.dimensions.as_deref().unwrap_or_default());
        let metric_names = first_occurrences(query.metrics.as_deref().unwrap_or(&MetricName::ALL));
        let dates = expand_date_range(query.start_date, query.end_date);

        let mut grouper = Grouper::new(&dimensions);
        let mut leaf_cells = 0usize;

        for &date in &dates {
            for campaign in &structure.campaigns {
                if !campaign_selected(campaign, &query.filters) {
                    continue;
                }
                for ad_group in structure.ad_groups_for(&campaign.id) {
                    if !ad_group_selected(ad_group, &query.filters) {
                        continue;
                    }
                    for keyword in structure.keywords_for(&ad_group.id) {
                        if keyword.status == EntityStatus::Removed {
                            continue;
                        }
                        for device in Device::ALL {
                            for network in Network::ALL {
                                let ctx = MetricsContext {
                                    account_id: account.id,
                                    campaign_id: &campaign.id,
                                    ad_group_id: &ad_group.id,
                                    keyword_id: Some(keyword.id.as_str()),
                                    date,
                                    device,
                                    network,
                                    industry: account.industry,
                                    campaign_type: campaign.campaign_type,
                                };
                                grouper.add(LeafCell {
                                    date,
                                    campaign,
                                    ad_group,
                                    keyword,
                                    device,
                                    network,
                                    metrics: synthesize_base(&ctx),
                                });
                                leaf_cells += 1;
                            }
                        }
                    }
                }
            }
        }

        debug!(
            account_id = account.id,
            days = dates.len(),
            leaf_cells,
            groups = grouper.groups.len(),
            "Leaf cells aggregated"
        );

        let mut rows = grouper.into_rows(&metric_names);
        if let Some(order) = &query.order_by {
            sort_rows(&mut rows, order);
        }

        let total_rows = rows.len();
        let page_size = query.page_size.unwrap_or(self.default_page_size);
        let (rows, next_page_token) = paginate(rows, query.page_offset, page_size);

        metrics::counter!("reports.generated").increment(1);
        metrics::histogram!("reports.leaf_cells").record(leaf_cells as f64);
        metrics::histogram!("reports.rows").record(total_rows as f64);
        info!(
            account_id = account.id,
            total_rows,
            page_rows = rows.len(),
            has_next_page = next_page_token.is_some(),
            "Report generated"
        );

        Ok(ReportResponse {
            metadata: ReportMetadata {
                account_id: account.id.to_string(),
                account_name: account.name.to_string(),
                date_range: DateRange {
                    start_date: query.start_date,
                    end_date: query.end_date,
                },
                dimensions,
                metrics: metric_names,
                total_rows,
                generated_at: Utc::now(),
            },
            rows,
            next_page_token,
        })
    }
}

// ─── Filtering, sorting, paging ─────────────────────────────────────────────

fn campaign_selected(campaign: &Campaign, filters: &ReportFilters) -> bool {
    entity_selected(
        &campaign.id,
        campaign.status,
        filters.campaign_ids.as_deref(),
        filters.campaign_status,
    )
}

fn ad_group_selected(ad_group: &AdGroup, filters: &ReportFilters) -> bool {
    entity_selected(
        &ad_group.id,
        ad_group.status,
        filters.ad_group_ids.as_deref(),
        filters.ad_group_status,
    )
}

/// Removed entities only survive when the caller filters for a status.
fn entity_selected(
    id: &str,
    status: EntityStatus,
    allowed_ids: Option<&[String]>,
    status_filter: Option<EntityStatus>,
) -> bool {
    if let Some(ids) = allowed_ids {
        if !ids.iter().any(|allowed| allowed == id) {
            return false;
        }
    }
    match status_filter {
        Some(wanted) => status == wanted,
        None => status != EntityStatus::Removed,
    }
}

fn first_occurrences<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(item) {
            unique.push(*item);
        }
    }
    unique
}

/// Stable sort on a metric looked up by wire name; absent metrics count as 0.
fn sort_rows(rows: &mut [ReportRow], order: &OrderBy) {
    let value = |row: &ReportRow| {
        row.metrics
            .get(&order.field)
            .map(|v| v.as_f64())
            .unwrap_or(0.0)
    };
    rows.sort_by(|a, b| {
        let (a, b) = (value(a), value(b));
        match order.direction {
            SortDirection::Asc => a.total_cmp(&b),
            SortDirection::Desc => b.total_cmp(&a),
        }
    });
}

/// Slice one page starting at `offset`. The next token is the next offset.
fn paginate(rows: Vec<ReportRow>, offset: usize, page_size: usize) -> (Vec<ReportRow>, Option<String>) {
    let page_size = page_size.max(1);
    let total = rows.len();
    let end = offset.saturating_add(page_size);
    let next_page_token = (end < total).then(|| end.to_string());
    let page = rows.into_iter().skip(offset).take(page_size).collect();
    (page, next_page_token)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use adsim_core::types::MetricValue;

    const ECOMMERCE: &str = "123-456-7890";

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn builder() -> ReportBuilder {
        ReportBuilder::new(Arc::new(StructureCache::new()))
    }

    fn query(start: &str, end: &str) -> ReportQuery {
        ReportQuery::new(ECOMMERCE, day(start), day(end))
    }

    fn row(value: f64) -> ReportRow {
        ReportRow {
            dimensions: DimensionValues::default(),
            metrics: MetricValues(vec![(MetricName::Cost, MetricValue::Amount(value))]),
        }
    }

    #[test]
    fn test_unknown_account_fails() {
        let mut q = query("2024-01-15", "2024-01-15");
        q.account_id = "999-999-9999".into();
        let err = builder().build_report(&q).unwrap_err();
        assert!(matches!(err, AdSimError::AccountNotFound(ref id) if id == "999-999-9999"));
    }

    #[test]
    fn test_defaults_to_all_metrics_and_no_dimensions() {
        let report = builder().build_report(&query("2024-01-15", "2024-01-15")).unwrap();
        assert_eq!(report.metadata.metrics, MetricName::ALL.to_vec());
        assert!(report.metadata.dimensions.is_empty());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].metrics.len(), MetricName::ALL.len());
        assert_eq!(report.rows[0].dimensions, DimensionValues::default());
        assert_eq!(report.metadata.account_name, "Acme E-Commerce Store");
    }

    #[test]
    fn test_metrics_projection_follows_request_order() {
        let mut q = query("2024-01-15", "2024-01-15");
        q.metrics = Some(vec![MetricName::Roas, MetricName::Impressions]);
        let report = builder().build_report(&q).unwrap();
        let names: Vec<MetricName> = report.rows[0].metrics.0.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![MetricName::Roas, MetricName::Impressions]);
    }

    #[test]
    fn test_repeated_names_collapse() {
        let mut q = query("2024-01-15", "2024-01-15");
        q.dimensions = Some(vec![Dimension::Device, Dimension::Device]);
        q.metrics = Some(vec![MetricName::Clicks, MetricName::Clicks]);
        let report = builder().build_report(&q).unwrap();
        assert_eq!(report.metadata.dimensions, vec![Dimension::Device]);
        assert_eq!(report.metadata.metrics, vec![MetricName::Clicks]);
        assert_eq!(report.rows.len(), 3);

        let json = serde_json::to_value(&report.rows[0].metrics).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_same_query_same_rows() {
        let b = builder();
        let mut q = query("2024-01-01", "2024-01-03");
        q.dimensions = Some(vec![Dimension::Date, Dimension::Device]);
        let first = b.build_report(&q).unwrap();
        let second = b.build_report(&q).unwrap();
        assert_eq!(first.rows, second.rows);
        assert_eq!(first.rows.len(), 9);
    }

    #[test]
    fn test_removed_campaigns_excluded_by_default() {
        let b = builder();
        let structure = b.cache().get_or_generate(ECOMMERCE).unwrap();
        let mut q = query("2024-01-15", "2024-01-15");
        q.dimensions = Some(vec![Dimension::Campaign, Dimension::AdGroup]);
        let report = b.build_report(&q).unwrap();
        for row in &report.rows {
            let campaign = row.dimensions.campaign.as_ref().unwrap();
            let ad_group = row.dimensions.ad_group.as_ref().unwrap();
            assert_ne!(campaign.status, EntityStatus::Removed);
            assert_ne!(ad_group.status, EntityStatus::Removed);
            assert_eq!(ad_group.campaign_id, campaign.id);
            assert!(structure.campaign(&campaign.id).is_some());
        }
    }

    #[test]
    fn test_campaign_status_filter_is_exact() {
        let mut q = query("2024-01-15", "2024-01-15");
        q.dimensions = Some(vec![Dimension::Campaign]);
        q.filters.campaign_status = Some(EntityStatus::Paused);
        let report = builder().build_report(&q).unwrap();
        assert!(report
            .rows
            .iter()
            .all(|r| r.dimensions.campaign.as_ref().unwrap().status == EntityStatus::Paused));
    }

    #[test]
    fn test_campaign_id_filter() {
        let mut q = query("2024-01-15", "2024-01-15");
        q.dimensions = Some(vec![Dimension::Campaign]);
        q.filters.campaign_ids = Some(vec!["camp_002".into(), "camp_404".into()]);
        q.filters.campaign_status = Some(EntityStatus::Enabled);
        let report = builder().build_report(&q).unwrap();
        assert!(report.rows.len() <= 1);
        for row in &report.rows {
            assert_eq!(row.dimensions.campaign.as_ref().unwrap().id, "camp_002");
        }
    }

    #[test]
    fn test_keyword_dimension_never_shows_removed_keywords() {
        let b = builder();
        let structure = b.cache().get_or_generate(ECOMMERCE).unwrap();
        let mut q = query("2024-01-15", "2024-01-15");
        q.dimensions = Some(vec![Dimension::Keyword]);
        let report = b.build_report(&q).unwrap();
        for row in &report.rows {
            let kw = row.dimensions.keyword.as_ref().unwrap();
            let source = structure.keywords.iter().find(|k| k.id == kw.id).unwrap();
            assert_ne!(source.status, EntityStatus::Removed);
            assert_eq!(source.text, kw.text);
        }
    }

    #[test]
    fn test_sort_descending_by_default_and_ascending_on_request() {
        let mut q = query("2024-01-01", "2024-01-07");
        q.dimensions = Some(vec![Dimension::Date]);
        q.order_by = Some(OrderBy {
            field: "impressions".into(),
            direction: SortDirection::Desc,
        });
        let b = builder();
        let desc = b.build_report(&q).unwrap();
        let values: Vec<f64> = desc
            .rows
            .iter()
            .map(|r| r.metrics.get("impressions").unwrap().as_f64())
            .collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));

        q.order_by = Some(OrderBy {
            field: "impressions".into(),
            direction: SortDirection::Asc,
        });
        let asc = b.build_report(&q).unwrap();
        let values: Vec<f64> = asc
            .rows
            .iter()
            .map(|r| r.metrics.get("impressions").unwrap().as_f64())
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let mut rows = vec![row(1.0), row(3.0), row(2.0)];
        sort_rows(
            &mut rows,
            &OrderBy {
                field: "bogus".into(),
                direction: SortDirection::Desc,
            },
        );
        let costs: Vec<f64> = rows.iter().map(|r| r.metrics.get("cost").unwrap().as_f64()).collect();
        assert_eq!(costs, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_paginate_ten_rows_by_four() {
        let rows: Vec<ReportRow> = (0..10).map(|i| row(i as f64)).collect();

        let (page, token) = paginate(rows.clone(), 0, 4);
        assert_eq!(page, rows[0..4].to_vec());
        assert_eq!(token.as_deref(), Some("4"));

        let (page, token) = paginate(rows.clone(), 4, 4);
        assert_eq!(page, rows[4..8].to_vec());
        assert_eq!(token.as_deref(), Some("8"));

        let (page, token) = paginate(rows.clone(), 8, 4);
        assert_eq!(page, rows[8..10].to_vec());
        assert!(token.is_none());

        let (page, token) = paginate(rows, 40, 4);
        assert!(page.is_empty());
        assert!(token.is_none());
    }

    #[test]
    fn test_entity_selection_rules() {
        let ids = vec!["camp_001".to_string()];
        assert!(entity_selected("camp_001", EntityStatus::Paused, Some(&ids), None));
        assert!(!entity_selected("camp_002", EntityStatus::Enabled, Some(&ids), None));
        assert!(!entity_selected("camp_001", EntityStatus::Removed, None, None));
        assert!(entity_selected(
            "camp_001",
            EntityStatus::Removed,
            None,
            Some(EntityStatus::Removed)
        ));
        assert!(!entity_selected(
            "camp_001",
            EntityStatus::Enabled,
            None,
            Some(EntityStatus::Paused)
        ));
    }
}
