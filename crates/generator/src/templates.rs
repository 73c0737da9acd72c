//! Campaign and keyword templates by industry.

use crate::random::SeededRandom;
use adsim_core::types::{CampaignType, Industry};
use std::collections::HashSet;

// ─── Campaigns ──────────────────────────────────────────────────────────────

pub struct CampaignTemplate {
    pub name: &'static str,
    pub campaign_type: CampaignType,
    pub ad_group_names: &'static [&'static str],
}

const fn campaign(
    name: &'static str,
    campaign_type: CampaignType,
    ad_group_names: &'static [&'static str],
) -> CampaignTemplate {
    CampaignTemplate {
        name,
        campaign_type,
        ad_group_names,
    }
}

static ECOMMERCE_CAMPAIGNS: [CampaignTemplate; 5] = [
    campaign("Brand Awareness", CampaignType::Search, &["Brand Terms", "Company Name", "Brand + Product"]),
    campaign("Electronics", CampaignType::Search, &["Laptops", "Smartphones", "Tablets", "Accessories"]),
    campaign("Home & Garden", CampaignType::Search, &["Furniture", "Outdoor", "Decor", "Kitchen"]),
    campaign("Shopping - Best Sellers", CampaignType::Shopping, &["Top Products", "Trending Items", "Sale Items"]),
    campaign("Retargeting - Display", CampaignType::Display, &["Cart Abandoners", "Past Buyers", "Product Viewers"]),
];

static SAAS_CAMPAIGNS: [CampaignTemplate; 5] = [
    campaign("Product - Core Features", CampaignType::Search, &["Analytics", "Automation", "Integration", "Reporting"]),
    campaign("Competitor Targeting", CampaignType::Search, &["vs Competitor A", "vs Competitor B", "Alternative To"]),
    campaign("Free Trial Campaigns", CampaignType::Search, &["Free Trial", "Demo Request", "Get Started"]),
    campaign("Enterprise Solutions", CampaignType::Search, &["Enterprise", "Team Plans", "Custom Solutions"]),
    campaign("Thought Leadership - Video", CampaignType::Video, &["Tutorials", "Webinars", "Case Studies"]),
];

static LOCAL_SERVICES_CAMPAIGNS: [CampaignTemplate; 4] = [
    campaign("Emergency Services", CampaignType::Search, &["24/7 Emergency", "Same Day Service", "Urgent Repairs"]),
    campaign("Service Types", CampaignType::Search, &["Repairs", "Installation", "Maintenance", "Inspection"]),
    campaign("Location Targeting", CampaignType::Search, &["Downtown", "Suburbs", "Metro Area", "Nearby"]),
    campaign("Seasonal Promotions", CampaignType::Search, &["Winter Specials", "Summer Deals", "Holiday Offers"]),
];

static TRAVEL_CAMPAIGNS: [CampaignTemplate; 5] = [
    campaign("Destinations - Beach", CampaignType::Search, &["Caribbean", "Mediterranean", "Hawaii", "Mexico"]),
    campaign("Destinations - Adventure", CampaignType::Search, &["Mountain Trips", "Safari", "Hiking Tours", "Ski Resorts"]),
    campaign("Travel Deals", CampaignType::Search, &["Last Minute", "Early Bird", "Package Deals", "Flash Sales"]),
    campaign("Video - Destination Showcase", CampaignType::Video, &["Resort Tours", "City Guides", "Travel Tips"]),
    campaign("Display - Retargeting", CampaignType::Display, &["Search Abandoners", "Past Travelers", "Newsletter Subscribers"]),
];

static FINANCE_CAMPAIGNS: [CampaignTemplate; 4] = [
    campaign("Investment Products", CampaignType::Search, &["Retirement Planning", "Stock Trading", "Mutual Funds", "ETFs"]),
    campaign("Banking Services", CampaignType::Search, &["Savings Accounts", "Checking Accounts", "Credit Cards", "Loans"]),
    campaign("Financial Education", CampaignType::Search, &["Investing Tips", "Tax Planning", "Budgeting", "Wealth Management"]),
    campaign("High Net Worth", CampaignType::Search, &["Private Banking", "Wealth Advisory", "Estate Planning"]),
];

/// Campaign templates in the fixed order hierarchy ids are derived from.
pub fn campaign_templates(industry: Industry) -> &'static [CampaignTemplate] {
    match industry {
        Industry::Ecommerce => &ECOMMERCE_CAMPAIGNS,
        Industry::Saas => &SAAS_CAMPAIGNS,
        Industry::LocalServices => &LOCAL_SERVICES_CAMPAIGNS,
        Industry::Travel => &TRAVEL_CAMPAIGNS,
        Industry::Finance => &FINANCE_CAMPAIGNS,
    }
}

// ─── Keywords ───────────────────────────────────────────────────────────────

/// Location-style placeholder, always filled with [`LOCATION_SUBSTITUTE`].
pub const LOCATION_PLACEHOLDER: &str = "{location}";
pub const LOCATION_SUBSTITUTE: &str = "downtown";

pub struct KeywordTemplate {
    pub patterns: &'static [&'static str],
    pub placeholder: &'static str,
    pub substitutions: &'static [&'static str],
}

static ECOMMERCE_KEYWORDS: KeywordTemplate = KeywordTemplate {
    patterns: &[
        "buy {product} online",
        "{product} for sale",
        "best {product}",
        "cheap {product}",
        "{product} deals",
        "{product} discount",
        "shop {product}",
        "{product} store",
        "{product} price",
        "{product} reviews",
    ],
    placeholder: "{product}",
    substitutions: &[
        "laptop", "smartphone", "headphones", "tablet", "camera", "watch", "furniture", "clothing",
        "shoes", "accessories",
    ],
};

static SAAS_KEYWORDS: KeywordTemplate = KeywordTemplate {
    patterns: &[
        "{product} software",
        "best {product} tool",
        "{product} platform",
        "{product} for business",
        "{product} solution",
        "cloud {product}",
        "{product} app",
        "{product} system",
        "enterprise {product}",
        "{product} automation",
    ],
    placeholder: "{product}",
    substitutions: &[
        "project management", "CRM", "analytics", "marketing", "HR", "accounting",
        "collaboration", "workflow", "reporting", "integration",
    ],
};

static LOCAL_SERVICES_KEYWORDS: KeywordTemplate = KeywordTemplate {
    patterns: &[
        "{service} near me",
        "{service} in {location}",
        "emergency {service}",
        "24 hour {service}",
        "best {service}",
        "affordable {service}",
        "{service} company",
        "local {service}",
        "{service} services",
        "{service} repair",
    ],
    placeholder: "{service}",
    substitutions: &[
        "plumber", "electrician", "HVAC", "roofing", "landscaping", "cleaning", "handyman",
        "pest control", "locksmith", "appliance repair",
    ],
};

static TRAVEL_KEYWORDS: KeywordTemplate = KeywordTemplate {
    patterns: &[
        "{destination} vacation",
        "flights to {destination}",
        "{destination} hotels",
        "{destination} travel deals",
        "{destination} packages",
        "cheap {destination} trips",
        "{destination} resorts",
        "best time to visit {destination}",
        "{destination} tours",
        "{destination} all inclusive",
    ],
    placeholder: "{destination}",
    substitutions: &[
        "Hawaii", "Cancun", "Paris", "Caribbean", "Italy", "Japan", "Costa Rica", "Greece", "Bali",
        "London",
    ],
};

static FINANCE_KEYWORDS: KeywordTemplate = KeywordTemplate {
    patterns: &[
        "{product} account",
        "best {product} rates",
        "{product} for beginners",
        "how to {product}",
        "{product} calculator",
        "{product} advisor",
        "{product} services",
        "online {product}",
        "{product} tips",
        "{product} comparison",
    ],
    placeholder: "{product}",
    substitutions: &[
        "savings", "investment", "retirement", "mortgage", "credit card", "loan", "insurance",
        "trading", "banking", "wealth management",
    ],
};

pub fn keyword_template(industry: Industry) -> &'static KeywordTemplate {
    match industry {
        Industry::Ecommerce => &ECOMMERCE_KEYWORDS,
        Industry::Saas => &SAAS_KEYWORDS,
        Industry::LocalServices => &LOCAL_SERVICES_KEYWORDS,
        Industry::Travel => &TRAVEL_KEYWORDS,
        Industry::Finance => &FINANCE_KEYWORDS,
    }
}

/// Draw `count` phrases (pattern, then substitution, per phrase) and drop
/// duplicates, keeping first occurrences in draw order.
pub fn generate_keywords(industry: Industry, count: usize, rng: &mut SeededRandom) -> Vec<String> {
    let template = keyword_template(industry);
    let mut seen = HashSet::with_capacity(count);
    let mut phrases = Vec::with_capacity(count);

    for _ in 0..count {
        let (Some(pattern), Some(substitute)) =
            (rng.pick(template.patterns), rng.pick(template.substitutions))
        else {
            break;
        };
        let phrase = pattern
            .replacen(template.placeholder, substitute, 1)
            .replacen(LOCATION_PLACEHOLDER, LOCATION_SUBSTITUTE, 1);
        if seen.insert(phrase.clone()) {
            phrases.push(phrase);
        }
    }

    phrases
}
