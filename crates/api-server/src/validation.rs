//! Report request validation at the API boundary.
//!
//! Both wire shapes (JSON body and query string) are normalized into a
//! [`ReportRequest`] and then checked in one pass that collects every
//! problem before giving up.

use crate::error::FieldIssue;
use adsim_core::config::ReportsConfig;
use adsim_core::report::{OrderBy, ReportFilters, ReportQuery, SortDirection};
use adsim_core::types::{Dimension, EntityStatus, MetricName};
use adsim_generator::dates::parse_date;
use serde::Deserialize;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

// ─── Wire types ─────────────────────────────────────────────────────────────

/// Report request as sent by clients. Required fields are optional here so
/// that their absence is reported alongside every other issue.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[schema(example = "123-456-7890")]
    pub account_id: Option<String>,
    pub date_range: Option<DateRangeRequest>,
    #[schema(example = json!(["date", "campaign"]))]
    pub dimensions: Option<Vec<String>>,
    #[schema(example = json!(["impressions", "clicks", "cost"]))]
    pub metrics: Option<Vec<String>>,
    pub filters: Option<FiltersRequest>,
    pub page_size: Option<i64>,
    pub page_token: Option<String>,
    pub order_by: Option<OrderByRequest>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeRequest {
    #[schema(example = "2024-01-01")]
    pub start_date: Option<String>,
    #[schema(example = "2024-01-31")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FiltersRequest {
    pub campaign_ids: Option<Vec<String>>,
    pub ad_group_ids: Option<Vec<String>>,
    pub campaign_status: Option<String>,
    pub ad_group_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderByRequest {
    pub field: Option<String>,
    /// `ASC` or `DESC`; defaults to `DESC`.
    pub direction: Option<String>,
}

/// Query-string variant of the report request. List values are
/// comma-separated.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dimensions: Option<String>,
    pub metrics: Option<String>,
    pub campaign_ids: Option<String>,
    pub ad_group_ids: Option<String>,
    pub campaign_status: Option<String>,
    pub ad_group_status: Option<String>,
    pub page_size: Option<String>,
    pub page_token: Option<String>,
    pub order_by: Option<String>,
    pub order_direction: Option<String>,
}

impl ReportParams {
    /// Fold the path's account id and the query string into a body-shaped
    /// request. A non-numeric page size is reported here since the body
    /// shape cannot carry it.
    pub fn into_request(self, account_id: String) -> (ReportRequest, Vec<FieldIssue>) {
        let mut issues = Vec::new();
        let page_size = self.page_size.and_then(|raw| match raw.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                issues.push(FieldIssue::new("pageSize", "pageSize must be an integer"));
                None
            }
        });

        let filters = FiltersRequest {
            campaign_ids: self.campaign_ids.as_deref().map(split_list),
            ad_group_ids: self.ad_group_ids.as_deref().map(split_list),
            campaign_status: self.campaign_status,
            ad_group_status: self.ad_group_status,
        };
        let order_by = match (self.order_by, self.order_direction) {
            (None, None) => None,
            (field, direction) => Some(OrderByRequest { field, direction }),
        };

        let request = ReportRequest {
            account_id: Some(account_id),
            date_range: Some(DateRangeRequest {
                start_date: self.start_date,
                end_date: self.end_date,
            }),
            dimensions: self.dimensions.as_deref().map(split_list),
            metrics: self.metrics.as_deref().map(split_list),
            filters: Some(filters),
            page_size,
            page_token: self.page_token,
            order_by,
        };
        (request, issues)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ─── Validation ─────────────────────────────────────────────────────────────

/// Check a wire request against the configured limits and convert it.
pub fn validate_report_request(
    request: ReportRequest,
    limits: &ReportsConfig,
) -> Result<ReportQuery, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let account_id = match request.account_id {
        None => {
            issues.push(FieldIssue::new("accountId", "accountId is required"));
            None
        }
        Some(id) if !is_account_id(&id) => {
            issues.push(FieldIssue::new(
                "accountId",
                "accountId must be in format XXX-XXX-XXXX",
            ));
            None
        }
        Some(id) => Some(id),
    };

    let range = request.date_range.unwrap_or_default();
    let start = required_date(range.start_date, "dateRange.startDate", &mut issues);
    let end = required_date(range.end_date, "dateRange.endDate", &mut issues);
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            issues.push(FieldIssue::new(
                "dateRange",
                "startDate must be before or equal to endDate",
            ));
        } else if limits.max_date_range_days > 0
            && (end - start).num_days() + 1 > limits.max_date_range_days
        {
            issues.push(FieldIssue::new(
                "dateRange",
                format!(
                    "Date range exceeds this deployment's limit of {} days",
                    limits.max_date_range_days
                ),
            ));
        }
    }

    let dimensions = request
        .dimensions
        .map(|names| parse_names::<Dimension>(&names, "dimensions", &mut issues));
    let metrics = request
        .metrics
        .map(|names| parse_names::<MetricName>(&names, "metrics", &mut issues));

    let filters = request.filters.unwrap_or_default();
    let filters = ReportFilters {
        campaign_ids: filters.campaign_ids,
        ad_group_ids: filters.ad_group_ids,
        campaign_status: parse_status(filters.campaign_status, "filters.campaignStatus", &mut issues),
        ad_group_status: parse_status(filters.ad_group_status, "filters.adGroupStatus", &mut issues),
    };

    let page_size = match request.page_size {
        None => None,
        Some(n) if n >= 1 && n as u64 <= limits.max_page_size as u64 => Some(n as usize),
        Some(_) => {
            issues.push(FieldIssue::new(
                "pageSize",
                format!("pageSize must be between 1 and {}", limits.max_page_size),
            ));
            None
        }
    };

    let page_offset = match request.page_token.as_deref() {
        None | Some("") => 0,
        Some(token) => match token.parse::<usize>() {
            Ok(offset) => offset,
            Err(_) => {
                issues.push(FieldIssue::new(
                    "pageToken",
                    "pageToken must be a non-negative integer",
                ));
                0
            }
        },
    };

    let order_by = request
        .order_by
        .and_then(|order| parse_order_by(order, &mut issues));

    match (account_id, start, end) {
        (Some(account_id), Some(start_date), Some(end_date)) if issues.is_empty() => Ok(ReportQuery {
            account_id,
            start_date,
            end_date,
            dimensions,
            metrics,
            filters,
            page_size: Some(page_size.unwrap_or(limits.default_page_size)),
            page_offset,
            order_by,
        }),
        _ => Err(issues),
    }
}

/// `\d{3}-\d{3}-\d{4}`
fn is_account_id(id: &str) -> bool {
    let groups: Vec<&str> = id.split('-').collect();
    groups.len() == 3
        && groups
            .iter()
            .zip([3, 3, 4])
            .all(|(g, len)| g.len() == len && g.bytes().all(|b| b.is_ascii_digit()))
}

fn required_date(
    value: Option<String>,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<chrono::NaiveDate> {
    match value {
        None => {
            issues.push(FieldIssue::new(path, format!("{path} is required")));
            None
        }
        Some(raw) => {
            let parsed = parse_date(&raw);
            if parsed.is_none() {
                issues.push(FieldIssue::new(path, "Date must be in YYYY-MM-DD format"));
            }
            parsed
        }
    }
}

/// Parse a name list. Repeats after the first occurrence are dropped.
fn parse_names<T: FromStr + PartialEq>(
    names: &[String],
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Vec<T> {
    let mut parsed: Vec<T> = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        match name.parse::<T>() {
            Ok(value) if parsed.contains(&value) => {}
            Ok(value) => parsed.push(value),
            Err(_) => issues.push(FieldIssue::new(
                format!("{path}.{idx}"),
                format!("Unknown value '{name}'"),
            )),
        }
    }
    parsed
}

fn parse_status(
    value: Option<String>,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<EntityStatus> {
    let raw = value?;
    match raw.parse() {
        Ok(status) => Some(status),
        Err(_) => {
            issues.push(FieldIssue::new(
                path,
                "Expected one of ENABLED, PAUSED, REMOVED",
            ));
            None
        }
    }
}

fn parse_order_by(order: OrderByRequest, issues: &mut Vec<FieldIssue>) -> Option<OrderBy> {
    let direction = match order.direction.as_deref() {
        None => SortDirection::Desc,
        Some("ASC") => SortDirection::Asc,
        Some("DESC") => SortDirection::Desc,
        Some(_) => {
            issues.push(FieldIssue::new("orderBy.direction", "Expected ASC or DESC"));
            return None;
        }
    };
    match order.field {
        Some(field) if !field.is_empty() => Some(OrderBy { field, direction }),
        _ => {
            issues.push(FieldIssue::new("orderBy.field", "orderBy.field is required"));
            None
        }
    }
}
