//! Statistical benchmarks per industry and campaign type, plus traffic-share
//! weights per device and network.

use adsim_core::types::{CampaignType, Device, Industry, Network};

/// Ranges every synthesized metric is drawn from. CTR and conversion rate
/// are percentages; CPC and order value are currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBenchmarks {
    pub avg_daily_impressions: f64,
    /// Standard deviation as a fraction of the mean.
    pub impression_variance: f64,
    pub min_ctr: f64,
    pub max_ctr: f64,
    pub min_cpc: f64,
    pub max_cpc: f64,
    pub min_conversion_rate: f64,
    pub max_conversion_rate: f64,
    pub min_aov: f64,
    pub max_aov: f64,
}

/// Partial benchmark override for a campaign type. `None` keeps the
/// industry baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BenchmarkOverride {
    pub avg_daily_impressions: Option<f64>,
    pub min_ctr: Option<f64>,
    pub max_ctr: Option<f64>,
    pub min_cpc: Option<f64>,
    pub max_cpc: Option<f64>,
    pub min_conversion_rate: Option<f64>,
    pub max_conversion_rate: Option<f64>,
}

impl MetricBenchmarks {
    pub fn merged(self, overrides: &BenchmarkOverride) -> Self {
        Self {
            avg_daily_impressions: overrides.avg_daily_impressions.unwrap_or(self.avg_daily_impressions),
            min_ctr: overrides.min_ctr.unwrap_or(self.min_ctr),
            max_ctr: overrides.max_ctr.unwrap_or(self.max_ctr),
            min_cpc: overrides.min_cpc.unwrap_or(self.min_cpc),
            max_cpc: overrides.max_cpc.unwrap_or(self.max_cpc),
            min_conversion_rate: overrides.min_conversion_rate.unwrap_or(self.min_conversion_rate),
            max_conversion_rate: overrides.max_conversion_rate.unwrap_or(self.max_conversion_rate),
            ..self
        }
    }
}

pub fn industry_benchmarks(industry: Industry) -> MetricBenchmarks {
    match industry {
        Industry::Ecommerce => MetricBenchmarks {
            avg_daily_impressions: 8000.0,
            impression_variance: 0.3,
            min_ctr: 1.5,
            max_ctr: 4.5,
            min_cpc: 0.5,
            max_cpc: 2.5,
            min_conversion_rate: 2.0,
            max_conversion_rate: 5.0,
            min_aov: 50.0,
            max_aov: 200.0,
        },
        Industry::Saas => MetricBenchmarks {
            avg_daily_impressions: 5000.0,
            impression_variance: 0.35,
            min_ctr: 2.0,
            max_ctr: 5.0,
            min_cpc: 2.0,
            max_cpc: 8.0,
            min_conversion_rate: 3.0,
            max_conversion_rate: 8.0,
            min_aov: 100.0,
            max_aov: 500.0,
        },
        Industry::LocalServices => MetricBenchmarks {
            avg_daily_impressions: 3000.0,
            impression_variance: 0.4,
            min_ctr: 3.0,
            max_ctr: 7.0,
            min_cpc: 3.0,
            max_cpc: 15.0,
            min_conversion_rate: 5.0,
            max_conversion_rate: 12.0,
            min_aov: 150.0,
            max_aov: 800.0,
        },
        Industry::Travel => MetricBenchmarks {
            avg_daily_impressions: 10000.0,
            impression_variance: 0.35,
            min_ctr: 2.0,
            max_ctr: 5.5,
            min_cpc: 0.8,
            max_cpc: 3.0,
            min_conversion_rate: 1.5,
            max_conversion_rate: 4.0,
            min_aov: 500.0,
            max_aov: 3000.0,
        },
        Industry::Finance => MetricBenchmarks {
            avg_daily_impressions: 4000.0,
            impression_variance: 0.3,
            min_ctr: 2.5,
            max_ctr: 6.0,
            min_cpc: 3.0,
            max_cpc: 20.0,
            min_conversion_rate: 2.0,
            max_conversion_rate: 6.0,
            min_aov: 200.0,
            max_aov: 2000.0,
        },
    }
}

pub fn campaign_type_override(campaign_type: CampaignType) -> BenchmarkOverride {
    match campaign_type {
        CampaignType::Search => BenchmarkOverride::default(),
        // Far more inventory, far lower engagement and price.
        CampaignType::Display => BenchmarkOverride {
            avg_daily_impressions: Some(25000.0),
            min_ctr: Some(0.1),
            max_ctr: Some(0.8),
            min_cpc: Some(0.1),
            max_cpc: Some(1.0),
            ..Default::default()
        },
        // Cost-per-view pricing.
        CampaignType::Video => BenchmarkOverride {
            avg_daily_impressions: Some(15000.0),
            min_ctr: Some(0.5),
            max_ctr: Some(2.0),
            min_cpc: Some(0.05),
            max_cpc: Some(0.3),
            ..Default::default()
        },
        CampaignType::Shopping => BenchmarkOverride {
            avg_daily_impressions: Some(6000.0),
            min_ctr: Some(1.0),
            max_ctr: Some(3.0),
            min_conversion_rate: Some(1.5),
            max_conversion_rate: Some(4.0),
            ..Default::default()
        },
    }
}

/// Industry baseline with the campaign type's overrides applied field by field.
pub fn benchmarks_for(industry: Industry, campaign_type: CampaignType) -> MetricBenchmarks {
    industry_benchmarks(industry).merged(&campaign_type_override(campaign_type))
}

// ─── Traffic shares ─────────────────────────────────────────────────────────

pub fn device_weight(device: Device) -> f64 {
    match device {
        Device::Mobile => 0.55,
        Device::Desktop => 0.35,
        Device::Tablet => 0.1,
    }
}

pub fn network_weight(network: Network) -> f64 {
    match network {
        Network::Search => 0.7,
        Network::Display => 0.25,
        Network::Youtube => 0.05,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_keeps_baseline() {
        assert_eq!(
            benchmarks_for(Industry::Saas, CampaignType::Search),
            industry_benchmarks(Industry::Saas)
        );
    }

    #[test]
    fn test_display_overrides_volume_and_price_only() {
        let base = industry_benchmarks(Industry::Ecommerce);
        let display = benchmarks_for(Industry::Ecommerce, CampaignType::Display);
        assert_eq!(display.avg_daily_impressions, 25000.0);
        assert_eq!(display.max_ctr, 0.8);
        assert_eq!(display.max_cpc, 1.0);
        assert_eq!(display.impression_variance, base.impression_variance);
        assert_eq!(display.min_conversion_rate, base.min_conversion_rate);
        assert_eq!(display.max_aov, base.max_aov);
    }

    #[test]
    fn test_shopping_narrows_conversion_rate() {
        let shopping = benchmarks_for(Industry::LocalServices, CampaignType::Shopping);
        assert_eq!(shopping.min_conversion_rate, 1.5);
        assert_eq!(shopping.max_conversion_rate, 4.0);
        assert_eq!(shopping.min_cpc, 3.0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let devices: f64 = Device::ALL.iter().map(|d| device_weight(*d)).sum();
        let networks: f64 = Network::ALL.iter().map(|n| network_weight(*n)).sum();
        assert!((devices - 1.0).abs() < 1e-9);
        assert!((networks - 1.0).abs() < 1e-9);
    }
}
