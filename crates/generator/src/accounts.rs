//! Static table of mock accounts, one per industry.

use adsim_core::types::{AccountSeed, Industry};

pub static MOCK_ACCOUNTS: [AccountSeed; 5] = [
    AccountSeed {
        id: "123-456-7890",
        name: "Acme E-Commerce Store",
        currency_code: "USD",
        timezone: "America/New_York",
        industry: Industry::Ecommerce,
    },
    AccountSeed {
        id: "234-567-8901",
        name: "CloudFlow SaaS Platform",
        currency_code: "USD",
        timezone: "America/Los_Angeles",
        industry: Industry::Saas,
    },
    AccountSeed {
        id: "345-678-9012",
        name: "Metro Plumbing Services",
        currency_code: "USD",
        timezone: "America/Chicago",
        industry: Industry::LocalServices,
    },
    AccountSeed {
        id: "456-789-0123",
        name: "Wanderlust Travel Agency",
        currency_code: "USD",
        timezone: "America/Denver",
        industry: Industry::Travel,
    },
    AccountSeed {
        id: "567-890-1234",
        name: "Apex Financial Advisors",
        currency_code: "USD",
        timezone: "America/New_York",
        industry: Industry::Finance,
    },
];

pub fn find_account(id: &str) -> Option<&'static AccountSeed> {
    MOCK_ACCOUNTS.iter().find(|a| a.id == id)
}

pub fn all_accounts() -> &'static [AccountSeed] {
    &MOCK_ACCOUNTS
}
