//! Reproducible per-extraction RNGs.
//!
//! A master seed is expanded into one sub-seed per `(file, extraction)`
//! pair with BLAKE3, so extraction #n of a file can be replayed from the
//! CLI without replaying extractions 0..n first.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct ExtractionSeeds {
    master_seed: u64,
}

impl ExtractionSeeds {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Master seed drawn from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().next_u64())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Deterministic sub-seed for one extraction of one file.
    pub fn sub_seed(&self, file_name: &str, extraction: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(file_name.as_bytes());
        hasher.update(&extraction.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn rng_for(&self, file_name: &str, extraction: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(file_name, extraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn sub_seeds_are_deterministic() {
        let seeds = ExtractionSeeds::new(42);
        assert_eq!(seeds.sub_seed("btc.csv", 0), seeds.sub_seed("btc.csv", 0));
    }

    #[test]
    fn different_files_different_seeds() {
        let seeds = ExtractionSeeds::new(42);
        assert_ne!(seeds.sub_seed("btc.csv", 0), seeds.sub_seed("eth.csv", 0));
    }

    #[test]
    fn different_extractions_different_seeds() {
        let seeds = ExtractionSeeds::new(42);
        assert_ne!(seeds.sub_seed("btc.csv", 0), seeds.sub_seed("btc.csv", 1));
    }

    #[test]
    fn replaying_an_extraction_is_order_independent() {
        let seeds = ExtractionSeeds::new(7);
        let third: u32 = seeds.rng_for("btc.csv", 3).gen();
        let _first: u32 = seeds.rng_for("btc.csv", 0).gen();
        let third_again: u32 = seeds.rng_for("btc.csv", 3).gen();
        assert_eq!(third, third_again);
    }

    #[test]
    fn different_master_seeds_different_output() {
        let a = ExtractionSeeds::new(42);
        let b = ExtractionSeeds::new(43);
        assert_ne!(a.sub_seed("btc.csv", 0), b.sub_seed("btc.csv", 0));
    }
}
