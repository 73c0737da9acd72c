//! Report query and response types shared by the pipeline and the API layer.

use crate::types::{Device, Dimension, EntityStatus, MatchType, MetricName, MetricValue, Network};
use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

// ─── Query ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_group_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_status: Option<EntityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_group_status: Option<EntityStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort instruction. `field` is a raw metric name; unknown fields sort every
/// row as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// A report request that has passed boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub account_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `None` means fully aggregated.
    pub dimensions: Option<Vec<Dimension>>,
    /// `None` means every known metric.
    pub metrics: Option<Vec<MetricName>>,
    pub filters: ReportFilters,
    /// `None` falls back to the builder's configured default.
    pub page_size: Option<usize>,
    /// Zero-based row offset decoded from the page token.
    pub page_offset: usize,
    pub order_by: Option<OrderBy>,
}

impl ReportQuery {
    pub fn new(account_id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            account_id: account_id.into(),
            start_date,
            end_date,
            dimensions: None,
            metrics: None,
            filters: ReportFilters::default(),
            page_size: None,
            page_offset: 0,
            order_by: None,
        }
    }
}

// ─── Response ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRef {
    pub id: String,
    pub name: String,
    pub status: EntityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupRef {
    pub id: String,
    pub name: String,
    pub status: EntityStatus,
    pub campaign_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRef {
    pub id: String,
    pub text: String,
    pub match_type: MatchType,
    pub ad_group_id: String,
}

/// Snapshot of the requested dimension values for one report row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DimensionValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<AdGroupRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<KeywordRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
}

/// Requested metrics for a row, serialized as a JSON object whose key order
/// follows the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricValues(pub Vec<(MetricName, MetricValue)>);

impl MetricValues {
    /// Look up a metric by its wire name.
    pub fn get(&self, field: &str) -> Option<MetricValue> {
        self.0
            .iter()
            .find(|(name, _)| name.as_str() == field)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for MetricValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name.as_str(), value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportRow {
    pub dimensions: DimensionValues,
    #[schema(value_type = Object)]
    pub metrics: MetricValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub account_id: String,
    pub account_name: String,
    pub date_range: DateRange,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<MetricName>,
    pub total_rows: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub metadata: ReportMetadata,
    pub rows: Vec<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
