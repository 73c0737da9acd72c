//! Account and hierarchy lookup endpoints.

use crate::auth::AuthStatus;
use crate::error::{ApiError, ErrorResponse};
use crate::rest::AppState;
use adsim_core::types::{Account, AccountStructure, AdGroup, Campaign, Keyword};
use adsim_core::AdSimError;
use adsim_generator::{all_accounts, find_account};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct AccountsResponse {
    pub authentication: AuthStatus,
    pub accounts: Vec<Account>,
}

#[derive(Serialize, ToSchema)]
pub struct AccountResponse {
    pub authentication: AuthStatus,
    #[serde(flatten)]
    pub account: Account,
}

#[derive(Serialize, ToSchema)]
pub struct CampaignsResponse {
    pub authentication: AuthStatus,
    pub campaigns: Vec<Campaign>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupsResponse {
    pub authentication: AuthStatus,
    pub ad_groups: Vec<AdGroup>,
}

#[derive(Serialize, ToSchema)]
pub struct KeywordsResponse {
    pub authentication: AuthStatus,
    pub keywords: Vec<Keyword>,
}

fn structure_for(state: &AppState, account_id: &str) -> Result<Arc<AccountStructure>, ApiError> {
    state.builder.cache().get_or_generate(account_id).ok_or_else(|| {
        warn!(account_id, "Unknown account requested");
        AdSimError::AccountNotFound(account_id.to_string()).into()
    })
}

/// GET /api/v1/gads/accounts: List every mock account.
#[utoipa::path(
    get,
    path = "/api/v1/gads/accounts",
    tag = "Accounts",
    responses(
        (status = 200, description = "All accounts", body = AccountsResponse),
    )
)]
pub async fn list_accounts(Extension(auth): Extension<AuthStatus>) -> Json<AccountsResponse> {
    Json(AccountsResponse {
        authentication: auth,
        accounts: all_accounts().iter().map(|seed| seed.to_account()).collect(),
    })
}

/// GET /api/v1/gads/accounts/:id: Look up one account.
#[utoipa::path(
    get,
    path = "/api/v1/gads/accounts/{id}",
    tag = "Accounts",
    params(("id" = String, Path, description = "Account id, e.g. 123-456-7890")),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 404, description = "Unknown account", body = ErrorResponse),
    )
)]
pub async fn get_account(
    Extension(auth): Extension<AuthStatus>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let seed = find_account(&id).ok_or_else(|| AdSimError::AccountNotFound(id.clone()))?;
    Ok(Json(AccountResponse {
        authentication: auth,
        account: seed.to_account(),
    }))
}

/// GET /api/v1/gads/accounts/:id/campaigns: Campaigns of an account.
#[utoipa::path(
    get,
    path = "/api/v1/gads/accounts/{id}/campaigns",
    tag = "Accounts",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Campaigns", body = CampaignsResponse),
        (status = 404, description = "Unknown account", body = ErrorResponse),
    )
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthStatus>,
    Path(id): Path<String>,
) -> Result<Json<CampaignsResponse>, ApiError> {
    let structure = structure_for(&state, &id)?;
    Ok(Json(CampaignsResponse {
        authentication: auth,
        campaigns: structure.campaigns.clone(),
    }))
}

/// GET /api/v1/gads/accounts/:id/campaigns/:campaign_id/ad-groups
///
/// An unknown campaign yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/gads/accounts/{id}/campaigns/{campaign_id}/ad-groups",
    tag = "Accounts",
    params(
        ("id" = String, Path, description = "Account id"),
        ("campaign_id" = String, Path, description = "Campaign id, e.g. camp_001"),
    ),
    responses(
        (status = 200, description = "Ad groups of the campaign", body = AdGroupsResponse),
        (status = 404, description = "Unknown account", body = ErrorResponse),
    )
)]
pub async fn list_ad_groups(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthStatus>,
    Path((id, campaign_id)): Path<(String, String)>,
) -> Result<Json<AdGroupsResponse>, ApiError> {
    let structure = structure_for(&state, &id)?;
    Ok(Json(AdGroupsResponse {
        authentication: auth,
        ad_groups: structure.ad_groups_for(&campaign_id).cloned().collect(),
    }))
}

/// GET /api/v1/gads/accounts/:id/ad-groups/:ad_group_id/keywords
///
/// An unknown ad group yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/gads/accounts/{id}/ad-groups/{ad_group_id}/keywords",
    tag = "Accounts",
    params(
        ("id" = String, Path, description = "Account id"),
        ("ad_group_id" = String, Path, description = "Ad group id, e.g. camp_001_ag_01"),
    ),
    responses(
        (status = 200, description = "Keywords of the ad group", body = KeywordsResponse),
        (status = 404, description = "Unknown account", body = ErrorResponse),
    )
)]
pub async fn list_keywords(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthStatus>,
    Path((id, ad_group_id)): Path<(String, String)>,
) -> Result<Json<KeywordsResponse>, ApiError> {
    let structure = structure_for(&state, &id)?;
    Ok(Json(KeywordsResponse {
        authentication: auth,
        keywords: structure.keywords_for(&ad_group_id).cloned().collect(),
    }))
}
