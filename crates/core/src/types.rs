//! Core domain types: accounts, the campaign hierarchy, traffic segments
//! and performance metrics.

use crate::error::AdSimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

// ─── Accounts ───────────────────────────────────────────────────────────────

/// Business vertical of a mock account. Drives templates and benchmarks;
/// never exposed in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Ecommerce,
    Saas,
    LocalServices,
    Travel,
    Finance,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub currency_code: String,
    pub timezone: String,
}

/// Static seed-table entry an account's hierarchy is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub currency_code: &'static str,
    pub timezone: &'static str,
    pub industry: Industry,
}

impl AccountSeed {
    /// Strip the industry classification for outbound use.
    pub fn to_account(&self) -> Account {
        Account {
            id: self.id.to_string(),
            name: self.name.to_string(),
            currency_code: self.currency_code.to_string(),
            timezone: self.timezone.to_string(),
        }
    }
}

// ─── Hierarchy ──────────────────────────────────────────────────────────────

/// Status shared by campaigns, ad groups and keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Enabled,
    Paused,
    Removed,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "ENABLED",
            Self::Paused => "PAUSED",
            Self::Removed => "REMOVED",
        }
    }
}

impl FromStr for EntityStatus {
    type Err = AdSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENABLED" => Ok(Self::Enabled),
            "PAUSED" => Ok(Self::Paused),
            "REMOVED" => Ok(Self::Removed),
            other => Err(AdSimError::InvalidRequest(format!("unknown status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignType {
    Search,
    Display,
    Video,
    Shopping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,
    Phrase,
    Broad,
}

impl MatchType {
    pub const ALL: [MatchType; 3] = [Self::Exact, Self::Phrase, Self::Broad];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub status: EntityStatus,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub daily_budget: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub status: EntityStatus,
    pub cpc_bid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub id: String,
    pub ad_group_id: String,
    pub text: String,
    pub match_type: MatchType,
    pub status: EntityStatus,
}

/// A fully generated account: the seed plus its campaign → ad group →
/// keyword tree. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStructure {
    pub account: AccountSeed,
    pub campaigns: Vec<Campaign>,
    pub ad_groups: Vec<AdGroup>,
    pub keywords: Vec<Keyword>,
}

impl AccountStructure {
    pub fn campaign(&self, campaign_id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == campaign_id)
    }

    pub fn ad_group(&self, ad_group_id: &str) -> Option<&AdGroup> {
        self.ad_groups.iter().find(|ag| ag.id == ad_group_id)
    }

    pub fn ad_groups_for<'a>(&'a self, campaign_id: &'a str) -> impl Iterator<Item = &'a AdGroup> {
        self.ad_groups
            .iter()
            .filter(move |ag| ag.campaign_id == campaign_id)
    }

    pub fn keywords_for<'a>(&'a self, ad_group_id: &'a str) -> impl Iterator<Item = &'a Keyword> {
        self.keywords
            .iter()
            .filter(move |kw| kw.ad_group_id == ad_group_id)
    }
}

// ─── Traffic segments ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Device {
    Mobile,
    Desktop,
    Tablet,
}

impl Device {
    pub const ALL: [Device; 3] = [Self::Mobile, Self::Desktop, Self::Tablet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "MOBILE",
            Self::Desktop => "DESKTOP",
            Self::Tablet => "TABLET",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Network {
    Search,
    Display,
    Youtube,
}

impl Network {
    pub const ALL: [Network; 3] = [Self::Search, Self::Display, Self::Youtube];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "SEARCH",
            Self::Display => "DISPLAY",
            Self::Youtube => "YOUTUBE",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Report axes ────────────────────────────────────────────────────────────

/// Grouping axis for report aggregation, in canonical key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Date,
    Campaign,
    AdGroup,
    Keyword,
    Device,
    Network,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Self::Date,
        Self::Campaign,
        Self::AdGroup,
        Self::Keyword,
        Self::Device,
        Self::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Campaign => "campaign",
            Self::AdGroup => "adGroup",
            Self::Keyword => "keyword",
            Self::Device => "device",
            Self::Network => "network",
        }
    }
}

impl FromStr for Dimension {
    type Err = AdSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| AdSimError::InvalidRequest(format!("unknown dimension '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum MetricName {
    Impressions,
    Clicks,
    Cost,
    Conversions,
    ConversionValue,
    Ctr,
    Cpc,
    Cpm,
    ConversionRate,
    CostPerConversion,
    Roas,
}

impl MetricName {
    /// Base metrics first, then derived, matching the default report order.
    pub const ALL: [MetricName; 11] = [
        Self::Impressions,
        Self::Clicks,
        Self::Cost,
        Self::Conversions,
        Self::ConversionValue,
        Self::Ctr,
        Self::Cpc,
        Self::Cpm,
        Self::ConversionRate,
        Self::CostPerConversion,
        Self::Roas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Impressions => "impressions",
            Self::Clicks => "clicks",
            Self::Cost => "cost",
            Self::Conversions => "conversions",
            Self::ConversionValue => "conversionValue",
            Self::Ctr => "ctr",
            Self::Cpc => "cpc",
            Self::Cpm => "cpm",
            Self::ConversionRate => "conversionRate",
            Self::CostPerConversion => "costPerConversion",
            Self::Roas => "roas",
        }
    }
}

impl FromStr for MetricName {
    type Err = AdSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AdSimError::InvalidRequest(format!("unknown metric '{s}'")))
    }
}

// ─── Metrics ────────────────────────────────────────────────────────────────

/// Volumetric metrics synthesized per leaf cell. Invariant:
/// `conversions <= clicks <= impressions`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub cost: f64,
    pub conversions: u64,
    pub conversion_value: f64,
}

/// Ratio metrics computed from [`BaseMetrics`]. Zero denominators yield 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub conversion_rate: f64,
    pub cost_per_conversion: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FullMetrics {
    #[serde(flatten)]
    pub base: BaseMetrics,
    #[serde(flatten)]
    pub derived: DerivedMetrics,
}

impl FullMetrics {
    pub fn value(&self, name: MetricName) -> MetricValue {
        match name {
            MetricName::Impressions => MetricValue::Count(self.base.impressions),
            MetricName::Clicks => MetricValue::Count(self.base.clicks),
            MetricName::Cost => MetricValue::Amount(self.base.cost),
            MetricName::Conversions => MetricValue::Count(self.base.conversions),
            MetricName::ConversionValue => MetricValue::Amount(self.base.conversion_value),
            MetricName::Ctr => MetricValue::Amount(self.derived.ctr),
            MetricName::Cpc => MetricValue::Amount(self.derived.cpc),
            MetricName::Cpm => MetricValue::Amount(self.derived.cpm),
            MetricName::ConversionRate => MetricValue::Amount(self.derived.conversion_rate),
            MetricName::CostPerConversion => MetricValue::Amount(self.derived.cost_per_conversion),
            MetricName::Roas => MetricValue::Amount(self.derived.roas),
        }
    }
}

/// A single metric value. Counts serialize as JSON integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Amount(f64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Count(n) => n as f64,
            Self::Amount(v) => v,
        }
    }
}
