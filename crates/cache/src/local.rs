//! In-process account-structure cache backed by DashMap.
//!
//! Structures are generated lazily on first lookup and kept for the
//! lifetime of the cache. Inputs are static, so entries are never evicted.

use adsim_core::types::{AccountSeed, AccountStructure};
use adsim_generator::{find_account, generate_structure};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

type Generator = dyn Fn(&AccountSeed) -> AccountStructure + Send + Sync;

/// Insert-if-absent map from account id to its generated hierarchy.
pub struct StructureCache {
    store: DashMap<String, Arc<AccountStructure>>,
    generator: Box<Generator>,
    generations: AtomicUsize,
}

impl StructureCache {
    pub fn new() -> Self {
        Self::with_generator(generate_structure)
    }

    /// Use a custom generator, e.g. to observe generation in tests.
    pub fn with_generator<F>(generator: F) -> Self
    where
        F: Fn(&AccountSeed) -> AccountStructure + Send + Sync + 'static,
    {
        Self {
            store: DashMap::new(),
            generator: Box::new(generator),
            generations: AtomicUsize::new(0),
        }
    }

    /// Resolve an account's structure, generating it on first use.
    /// Returns `None` for ids missing from the seed table.
    pub fn get_or_generate(&self, account_id: &str) -> Option<Arc<AccountStructure>> {
        if let Some(entry) = self.store.get(account_id) {
            metrics::counter!("structure_cache.hits").increment(1);
            return Some(entry.value().clone());
        }

        let seed = find_account(account_id)?;
        metrics::counter!("structure_cache.misses").increment(1);

        // The shard stays locked while generating, so each id is built once.
        let entry = self.store.entry(account_id.to_string()).or_insert_with(|| {
            self.generations.fetch_add(1, Ordering::Relaxed);
            debug!(account_id, "Generating account structure");
            Arc::new((self.generator)(seed))
        });
        Some(entry.value().clone())
    }

    /// Number of times the generator has run.
    pub fn generations(&self) -> usize {
        self.generations.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for StructureCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_unknown_account_is_not_cached() {
        let cache = StructureCache::new();
        assert!(cache.get_or_generate("999-999-9999").is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.generations(), 0);
    }

    #[test]
    fn test_generates_once_per_account() {
        let cache = StructureCache::new();
        let first = cache.get_or_generate("123-456-7890").unwrap();
        let second = cache.get_or_generate("123-456-7890").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.generations(), 1);

        cache.get_or_generate("234-567-8901").unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.generations(), 2);
    }

    #[test]
    fn test_concurrent_lookups_share_one_structure() {
        let cache = Arc::new(StructureCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || cache.get_or_generate("345-678-9012").unwrap())
            })
            .collect();
        let results: Vec<Arc<AccountStructure>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.generations(), 1);
    }

    #[test]
    fn test_custom_generator_is_used() {
        let cache = StructureCache::with_generator(|seed| AccountStructure {
            account: *seed,
            campaigns: vec![],
            ad_groups: vec![],
            keywords: vec![],
        });
        let structure = cache.get_or_generate("567-890-1234").unwrap();
        assert!(structure.campaigns.is_empty());
        assert_eq!(structure.account.id, "567-890-1234");
    }

    #[test]
    fn test_cached_structure_matches_fresh_generation() {
        let cache = StructureCache::new();
        let cached = cache.get_or_generate("456-789-0123").unwrap();
        let seed = find_account("456-789-0123").unwrap();
        assert_eq!(*cached, generate_structure(seed));
    }
}
