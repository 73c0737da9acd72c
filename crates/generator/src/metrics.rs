//! Metrics synthesizer: statistically shaped base metrics per leaf cell,
//! derived ratios, and aggregation.

use crate::benchmarks::{benchmarks_for, device_weight, network_weight};
use crate::random::{create_seed, SeededRandom};
use adsim_core::types::{
    BaseMetrics, CampaignType, DerivedMetrics, Device, FullMetrics, Industry, Network,
};
use chrono::{Datelike, NaiveDate};

/// Weekday traffic uplift; weekends are divided by the same factor.
const WEEKDAY_MULTIPLIER: f64 = 1.15;
/// Seed part used when a cell is not keyword-specific.
const ALL_KEYWORDS: &str = "all";

/// Everything that determines one synthetic draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsContext<'a> {
    pub account_id: &'a str,
    pub campaign_id: &'a str,
    pub ad_group_id: &'a str,
    pub keyword_id: Option<&'a str>,
    pub date: NaiveDate,
    pub device: Device,
    pub network: Network,
    pub industry: Industry,
    pub campaign_type: CampaignType,
}

impl MetricsContext<'_> {
    fn seed(&self) -> String {
        create_seed(&[
            &self.account_id,
            &self.campaign_id,
            &self.ad_group_id,
            &self.keyword_id.unwrap_or(ALL_KEYWORDS),
            &self.date,
            &self.device,
            &self.network,
        ])
    }
}

pub fn synthesize_base(ctx: &MetricsContext<'_>) -> BaseMetrics {
    let mut rng = SeededRandom::new(&ctx.seed());
    let bench = benchmarks_for(ctx.industry, ctx.campaign_type);

    let mean = bench.avg_daily_impressions * device_weight(ctx.device) * network_weight(ctx.network);
    let drawn = rng.gaussian(mean, mean * bench.impression_variance).round();
    let adjusted = rng
        .with_weekday_variance(drawn, ctx.date.weekday(), WEEKDAY_MULTIPLIER)
        .round();
    let impressions = adjusted.max(0.0) as u64;

    let ctr = rng.float_range(bench.min_ctr, bench.max_ctr) / 100.0;
    let clicks = ((impressions as f64 * ctr).round() as u64).min(impressions);

    let cpc = rng.float_range(bench.min_cpc, bench.max_cpc);
    let cost = round_cents(clicks as f64 * cpc);

    let conversion_rate = rng.float_range(bench.min_conversion_rate, bench.max_conversion_rate) / 100.0;
    let conversions = ((clicks as f64 * conversion_rate).round() as u64).min(clicks);

    let aov = rng.float_range(bench.min_aov, bench.max_aov);
    let conversion_value = round_cents(conversions as f64 * aov);

    BaseMetrics {
        impressions,
        clicks,
        cost,
        conversions,
        conversion_value,
    }
}

pub fn derive_metrics(base: &BaseMetrics) -> DerivedMetrics {
    let impressions = base.impressions as f64;
    let clicks = base.clicks as f64;
    let conversions = base.conversions as f64;

    DerivedMetrics {
        ctr: ratio(clicks * 100.0, impressions),
        cpc: ratio(base.cost, clicks),
        cpm: ratio(base.cost * 1000.0, impressions),
        conversion_rate: ratio(conversions * 100.0, clicks),
        cost_per_conversion: ratio(base.cost, conversions),
        roas: ratio(base.conversion_value, base.cost),
    }
}

pub fn full_metrics(base: BaseMetrics) -> FullMetrics {
    FullMetrics {
        derived: derive_metrics(&base),
        base,
    }
}

/// Element-wise sum. Money is rounded to cents after every step.
pub fn aggregate_metrics<'a, I>(metrics: I) -> BaseMetrics
where
    I: IntoIterator<Item = &'a BaseMetrics>,
{
    metrics
        .into_iter()
        .fold(BaseMetrics::default(), |acc, m| accumulate(&acc, m))
}

/// One aggregation step, shared with streaming accumulators.
pub fn accumulate(acc: &BaseMetrics, m: &BaseMetrics) -> BaseMetrics {
    BaseMetrics {
        impressions: acc.impressions + m.impressions,
        clicks: acc.clicks + m.clicks,
        cost: round_cents(acc.cost + m.cost),
        conversions: acc.conversions + m.conversions,
        conversion_value: round_cents(acc.conversion_value + m.conversion_value),
    }
}

/// `numerator / denominator` rounded to 2 places; 0 for a zero denominator.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        round_cents(numerator / denominator)
    } else {
        0.0
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
