//! Deterministic random number generation.
//!
//! Every generated value flows from a [`SeededRandom`] keyed by a string.
//! The string is hashed with SHA-256 and the first 16 bytes seed a PCG
//! stream, so the same key yields the same sequence across runs and
//! restarts.

use chrono::Weekday;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use sha2::{Digest, Sha256};
use std::fmt;

/// Separator between seed parts. Changing it reshuffles every stream.
pub const SEED_DELIMITER: &str = ":";

/// Floor for the first Box-Muller draw so `ln(0)` never happens.
const GAUSSIAN_EPSILON: f64 = 1e-4;

/// Join seed parts in the given order, each rendered with `Display`.
pub fn create_seed(parts: &[&dyn fmt::Display]) -> String {
    parts
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join(SEED_DELIMITER)
}

/// A reproducible random stream derived from a string seed.
pub struct SeededRandom {
    inner: Pcg64Mcg,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self {
            inner: Pcg64Mcg::from_seed(bytes),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn uniform(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Integer in `[min, max]`, inclusive on both ends.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        (self.uniform() * (max - min + 1) as f64).floor() as i64 + min
    }

    pub fn float_range(&mut self, min: f64, max: f64) -> f64 {
        self.uniform() * (max - min) + min
    }

    /// Uniformly pick one element. An empty slice yields `None` without
    /// consuming a draw.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.int_range(0, items.len() as i64 - 1) as usize;
        items.get(idx)
    }

    /// Pick `n` elements without replacement. Returns the whole slice
    /// (in draw order) when `n` exceeds its length.
    pub fn pick_many<T: Clone>(&mut self, items: &[T], n: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        let count = n.min(pool.len());
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let idx = self.int_range(0, pool.len() as i64 - 1) as usize;
            picked.push(pool.remove(idx));
        }
        picked
    }

    /// Normal draw via the Box-Muller transform (two uniform draws).
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.uniform();
        let u2 = self.uniform();
        let u1 = if u1 > 0.0 { u1 } else { GAUSSIAN_EPSILON };
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + z * std_dev
    }

    /// Scale up on weekdays and down on Saturday/Sunday.
    pub fn with_weekday_variance(&self, value: f64, weekday: Weekday, weekday_multiplier: f64) -> f64 {
        match weekday {
            Weekday::Sat | Weekday::Sun => value / weekday_multiplier,
            _ => value * weekday_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new("test-seed");
        let mut b = SeededRandom::new("test-seed");
        let left: Vec<f64> = (0..16).map(|_| a.uniform()).collect();
        let right: Vec<f64> = (0..16).map(|_| b.uniform()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SeededRandom::new("seed-1");
        let mut b = SeededRandom::new("seed-2");
        let left: Vec<f64> = (0..4).map(|_| a.uniform()).collect();
        let right: Vec<f64> = (0..4).map(|_| b.uniform()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn test_uniform_in_unit_interval() {
        let mut rng = SeededRandom::new("unit");
        for _ in 0..1000 {
            let v = rng.uniform();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_int_range_inclusive() {
        let mut rng = SeededRandom::new("test");
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let v = rng.int_range(5, 10);
            assert!((5..=10).contains(&v));
            seen_min |= v == 5;
            seen_max |= v == 10;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_float_range_bounds() {
        let mut rng = SeededRandom::new("test");
        for _ in 0..100 {
            let v = rng.float_range(1.5, 3.5);
            assert!((1.5..=3.5).contains(&v));
        }
    }

    #[test]
    fn test_pick_is_reproducible() {
        let options = ["a", "b", "c", "d", "e"];
        let mut a = SeededRandom::new("pick-test");
        let mut b = SeededRandom::new("pick-test");
        let left: Vec<&str> = (0..3).map(|_| *a.pick(&options).unwrap()).collect();
        let right: Vec<&str> = (0..3).map(|_| *b.pick(&options).unwrap()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_pick_from_empty_is_none() {
        let empty: [u8; 0] = [];
        let mut rng = SeededRandom::new("test-seed");
        assert!(rng.pick(&empty).is_none());
        // No draw was consumed.
        assert_eq!(rng.uniform(), 0.7618080132664149);
    }

    #[test]
    fn test_uniform_golden_values() {
        let mut rng = SeededRandom::new("test-seed");
        assert_eq!(rng.uniform(), 0.7618080132664149);
        assert_eq!(rng.uniform(), 0.031225105876880543);
        assert_eq!(rng.uniform(), 0.763596469147886);
    }

    #[test]
    fn test_pick_many_without_replacement() {
        let mut rng = SeededRandom::new("many");
        let items: Vec<u32> = (0..10).collect();
        let mut picked = rng.pick_many(&items, 4);
        assert_eq!(picked.len(), 4);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 4);

        let mut all = rng.pick_many(&items, 25);
        all.sort_unstable();
        assert_eq!(all, items);
    }

    #[test]
    fn test_gaussian_is_finite_and_centred() {
        let mut rng = SeededRandom::new("gauss");
        let n = 2000;
        let mut sum = 0.0;
        for _ in 0..n {
            let v = rng.gaussian(100.0, 10.0);
            assert!(v.is_finite());
            sum += v;
        }
        let mean = sum / n as f64;
        assert!((mean - 100.0).abs() < 2.0, "sample mean {mean}");
    }

    #[test]
    fn test_weekday_variance() {
        let rng = SeededRandom::new("dow");
        assert!((rng.with_weekday_variance(100.0, Weekday::Mon, 1.15) - 115.0).abs() < 1e-9);
        assert!((rng.with_weekday_variance(115.0, Weekday::Sun, 1.15) - 100.0).abs() < 1e-9);
        assert!((rng.with_weekday_variance(115.0, Weekday::Sat, 1.15) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_create_seed_joins_in_order() {
        let seed = create_seed(&[&"account", &123, &"campaign", &"456"]);
        assert_eq!(seed, "account:123:campaign:456");
        assert_ne!(create_seed(&[&"a", &"b"]), create_seed(&[&"a", &"c"]));
    }
}
