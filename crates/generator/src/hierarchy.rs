//! Account hierarchy generator: campaigns, ad groups and keywords built
//! deterministically from an account seed.

use crate::random::{create_seed, SeededRandom};
use crate::templates::{campaign_templates, generate_keywords};
use adsim_core::types::{
    AccountSeed, AccountStructure, AdGroup, Campaign, EntityStatus, Keyword, MatchType,
};
use tracing::debug;

const CAMPAIGN_ENABLED_PROBABILITY: f64 = 0.8;
const AD_GROUP_ENABLED_PROBABILITY: f64 = 0.85;
const KEYWORD_ENABLED_PROBABILITY: f64 = 0.9;
/// Share of the non-enabled remainder that is paused rather than removed.
const PAUSED_SHARE_OF_REMAINDER: f64 = 0.7;

const KEYWORDS_PER_AD_GROUP: (i64, i64) = (5, 12);
const BUDGET_STEPS: (i64, i64) = (50, 500);
const BUDGET_STEP: i64 = 10;
const CPC_BID_RANGE: (f64, f64) = (0.5, 5.0);

/// Build the full hierarchy for an account. Same seed, same tree.
pub fn generate_structure(account: &AccountSeed) -> AccountStructure {
    let mut rng = SeededRandom::new(&create_seed(&[&"structure", &account.id]));

    let mut campaigns = Vec::new();
    let mut ad_groups = Vec::new();
    let mut keywords = Vec::new();

    for (campaign_idx, template) in campaign_templates(account.industry).iter().enumerate() {
        let campaign_id = format!("camp_{:03}", campaign_idx + 1);
        let status = pick_status(&mut rng, CAMPAIGN_ENABLED_PROBABILITY);
        let daily_budget = (rng.int_range(BUDGET_STEPS.0, BUDGET_STEPS.1) * BUDGET_STEP) as u32;

        campaigns.push(Campaign {
            id: campaign_id.clone(),
            account_id: account.id.to_string(),
            name: template.name.to_string(),
            status,
            campaign_type: template.campaign_type,
            daily_budget,
        });

        for (ad_group_idx, ad_group_name) in template.ad_group_names.iter().enumerate() {
            let ad_group_id = format!("{campaign_id}_ag_{:02}", ad_group_idx + 1);
            let ad_group_status = inherit_or_draw(status, &mut rng, AD_GROUP_ENABLED_PROBABILITY);
            let cpc_bid = round_cents(rng.float_range(CPC_BID_RANGE.0, CPC_BID_RANGE.1));

            ad_groups.push(AdGroup {
                id: ad_group_id.clone(),
                campaign_id: campaign_id.clone(),
                name: ad_group_name.to_string(),
                status: ad_group_status,
                cpc_bid,
            });

            let count = rng.int_range(KEYWORDS_PER_AD_GROUP.0, KEYWORDS_PER_AD_GROUP.1) as usize;
            let phrases = generate_keywords(account.industry, count, &mut rng);

            for (keyword_idx, text) in phrases.into_iter().enumerate() {
                let keyword_status =
                    inherit_or_draw(ad_group_status, &mut rng, KEYWORD_ENABLED_PROBABILITY);
                let match_type = rng.pick(&MatchType::ALL).copied().unwrap_or(MatchType::Broad);

                keywords.push(Keyword {
                    id: format!("{ad_group_id}_kw_{:02}", keyword_idx + 1),
                    ad_group_id: ad_group_id.clone(),
                    text,
                    match_type,
                    status: keyword_status,
                });
            }
        }
    }

    debug!(
        account_id = account.id,
        campaigns = campaigns.len(),
        ad_groups = ad_groups.len(),
        keywords = keywords.len(),
        "Generated account structure"
    );

    AccountStructure {
        account: *account,
        campaigns,
        ad_groups,
        keywords,
    }
}

/// A removed parent forces removal without consuming a draw.
fn inherit_or_draw(parent: EntityStatus, rng: &mut SeededRandom, enabled_probability: f64) -> EntityStatus {
    match parent {
        EntityStatus::Removed => EntityStatus::Removed,
        _ => pick_status(rng, enabled_probability),
    }
}

/// One draw against two cumulative thresholds: enabled, then paused.
fn pick_status(rng: &mut SeededRandom, enabled_probability: f64) -> EntityStatus {
    let roll = rng.uniform();
    let paused_threshold =
        enabled_probability + (1.0 - enabled_probability) * PAUSED_SHARE_OF_REMAINDER;
    if roll < enabled_probability {
        EntityStatus::Enabled
    } else if roll < paused_threshold {
        EntityStatus::Paused
    } else {
        EntityStatus::Removed
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::all_accounts;
    use std::collections::HashMap;

    #[test]
    fn test_generation_is_deterministic() {
        for account in all_accounts() {
            assert_eq!(generate_structure(account), generate_structure(account));
        }
    }

    #[test]
    fn test_ids_are_ordinal_and_nested() {
        let structure = generate_structure(&all_accounts()[0]);
        assert_eq!(structure.campaigns[0].id, "camp_001");
        assert_eq!(structure.ad_groups[0].id, "camp_001_ag_01");
        assert_eq!(structure.keywords[0].id, "camp_001_ag_01_kw_01");
        for ad_group in &structure.ad_groups {
            assert!(ad_group.id.starts_with(&format!("{}_ag_", ad_group.campaign_id)));
        }
        for keyword in &structure.keywords {
            assert!(keyword.id.starts_with(&format!("{}_kw_", keyword.ad_group_id)));
        }
    }

    #[test]
    fn test_follows_campaign_templates() {
        for account in all_accounts() {
            let structure = generate_structure(account);
            let templates = campaign_templates(account.industry);
            assert_eq!(structure.campaigns.len(), templates.len());
            let expected_groups: usize = templates.iter().map(|t| t.ad_group_names.len()).sum();
            assert_eq!(structure.ad_groups.len(), expected_groups);
            for (campaign, template) in structure.campaigns.iter().zip(templates) {
                assert_eq!(campaign.name, template.name);
                assert_eq!(campaign.campaign_type, template.campaign_type);
            }
        }
    }

    #[test]
    fn test_status_propagates_downward() {
        for account in all_accounts() {
            let structure = generate_structure(account);
            let campaign_status: HashMap<&str, EntityStatus> = structure
                .campaigns
                .iter()
                .map(|c| (c.id.as_str(), c.status))
                .collect();
            let ad_group_status: HashMap<&str, EntityStatus> = structure
                .ad_groups
                .iter()
                .map(|ag| (ag.id.as_str(), ag.status))
                .collect();

            for ad_group in &structure.ad_groups {
                if campaign_status[ad_group.campaign_id.as_str()] == EntityStatus::Removed {
                    assert_eq!(ad_group.status, EntityStatus::Removed);
                }
            }
            for keyword in &structure.keywords {
                if ad_group_status[keyword.ad_group_id.as_str()] == EntityStatus::Removed {
                    assert_eq!(keyword.status, EntityStatus::Removed);
                }
            }
        }
    }

    #[test]
    fn test_drawn_values_within_ranges() {
        for account in all_accounts() {
            let structure = generate_structure(account);
            for campaign in &structure.campaigns {
                assert!((500..=5000).contains(&campaign.daily_budget));
                assert_eq!(campaign.daily_budget % 10, 0);
            }
            for ad_group in &structure.ad_groups {
                assert!((0.5..=5.0).contains(&ad_group.cpc_bid));
                let count = structure.keywords_for(&ad_group.id).count();
                assert!((1..=12).contains(&count), "{} has {count} keywords", ad_group.id);
            }
        }
    }

    #[test]
    fn test_keyword_text_unique_within_ad_group() {
        let structure = generate_structure(&all_accounts()[3]);
        for ad_group in &structure.ad_groups {
            let mut texts: Vec<&str> = structure
                .keywords_for(&ad_group.id)
                .map(|kw| kw.text.as_str())
                .collect();
            let total = texts.len();
            texts.sort_unstable();
            texts.dedup();
            assert_eq!(texts.len(), total);
        }
    }

    #[test]
    fn test_status_ladder_shape() {
        let mut rng = SeededRandom::new("ladder");
        let mut counts: HashMap<EntityStatus, usize> = HashMap::new();
        let n = 20_000;
        for _ in 0..n {
            *counts.entry(pick_status(&mut rng, 0.8)).or_default() += 1;
        }
        let share = |s: EntityStatus| counts.get(&s).copied().unwrap_or(0) as f64 / n as f64;
        assert!((share(EntityStatus::Enabled) - 0.80).abs() < 0.02);
        assert!((share(EntityStatus::Paused) - 0.14).abs() < 0.02);
        assert!((share(EntityStatus::Removed) - 0.06).abs() < 0.02);
    }
}
