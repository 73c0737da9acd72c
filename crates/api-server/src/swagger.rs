//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AdSim Mock Ads API",
        version = "0.1.0",
        description = "Deterministic mock of an ad-platform reporting API.\n\nServes reproducible account hierarchies and synthetic performance reports for integration testing.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Operations", description = "Health, readiness, and liveness probes"),
        (name = "Accounts", description = "Mock accounts and their campaign hierarchy"),
        (name = "Reports", description = "Synthetic performance reports"),
    ),
    paths(
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
        // Accounts
        crate::account_rest::list_accounts,
        crate::account_rest::get_account,
        crate::account_rest::list_campaigns,
        crate::account_rest::list_ad_groups,
        crate::account_rest::list_keywords,
        // Reports
        crate::report_rest::create_report,
        crate::report_rest::query_report,
    ),
    components(schemas(
        // Hierarchy types
        adsim_core::types::Account,
        adsim_core::types::Campaign,
        adsim_core::types::AdGroup,
        adsim_core::types::Keyword,
        adsim_core::types::EntityStatus,
        adsim_core::types::CampaignType,
        adsim_core::types::MatchType,
        adsim_core::types::Device,
        adsim_core::types::Network,
        adsim_core::types::Dimension,
        adsim_core::types::MetricName,
        // Report types
        adsim_core::report::DateRange,
        adsim_core::report::CampaignRef,
        adsim_core::report::AdGroupRef,
        adsim_core::report::KeywordRef,
        adsim_core::report::DimensionValues,
        adsim_core::report::ReportRow,
        adsim_core::report::ReportMetadata,
        adsim_core::report::ReportResponse,
        crate::validation::ReportRequest,
        crate::validation::DateRangeRequest,
        crate::validation::FiltersRequest,
        crate::validation::OrderByRequest,
        // Envelopes
        crate::auth::AuthStatus,
        crate::account_rest::AccountsResponse,
        crate::account_rest::AccountResponse,
        crate::account_rest::CampaignsResponse,
        crate::account_rest::AdGroupsResponse,
        crate::account_rest::KeywordsResponse,
        crate::rest::HealthResponse,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        crate::error::FieldIssue,
    ))
)]
pub struct ApiDoc;
