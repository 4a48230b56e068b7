//! Draw context: every random decision a selection makes goes through here.
//!
//! Both draws must be uniform: the initial hand over all combinations, the
//! replacement over all not-currently-chosen entries.

use rand::seq::index::sample;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

/// Seedable source of uniform draws.
///
/// Production sessions seed from OS entropy; tests and simulations pin a
/// seed for reproducible hands.
#[derive(Debug, Clone)]
pub struct DrawContext {
    rng: Box<ChaCha8Rng>,
}

impl DrawContext {
    pub fn from_entropy() -> Self {
        Self {
            rng: Box::new(ChaCha8Rng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Draw `amount` distinct indices from `0..pool_len` without
    /// replacement, every combination equally likely.
    pub(crate) fn draw_distinct(&mut self, pool_len: usize, amount: usize) -> Vec<u32> {
        assert!(
            amount <= pool_len,
            "draw_distinct: amount {} exceeds pool of {}",
            amount,
            pool_len
        );
        sample(&mut *self.rng, pool_len, amount)
            .into_iter()
            .map(|i| i as u32)
            .collect()
    }

    /// Draw one index from `0..pool_len` that is not in `taken`, uniformly
    /// over the free entries.
    ///
    /// An empty complement means the caller broke the creation
    /// precondition (pool must exceed the hand whenever rerolls exist).
    pub(crate) fn draw_replacement(&mut self, pool_len: usize, taken: &[u32]) -> u32 {
        let free: Vec<u32> = (0..pool_len as u32).filter(|i| !taken.contains(i)).collect();
        assert!(!free.is_empty(), "draw_replacement: no free entries left");
        free[self.rng.gen_range(0..free.len())]
    }
}
