//! # Reviewer Selection
//!
//! Candidate pools are fetched deterministically from the store and narrowed here. Picking is uniformly
//! random without replacement over whatever pool remains after exclusions.
//!
//! The random source is injected so tests can seed it; production uses an OS-seeded [`StdRng`].

use std::sync::{Arc, Mutex, PoisonError};

use rand::{
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
    SeedableRng,
};

/// Maximum reviewers assigned when a pull request is created.
pub const INITIAL_REVIEWER_LIMIT: usize = 2;

/// Pool for initial assignment: active teammates other than the author.
pub fn initial_pool(active_member_ids: Vec<String>, author_id: &str) -> Vec<String> {
    active_member_ids
        .into_iter()
        .filter(|id| id != author_id)
        .collect()
}

/// Pool for a replacement: active teammates of the old reviewer minus every excluded id.
///
/// The exclusion list must be derived from the current pull request state: the old reviewer, the author,
/// and every reviewer currently assigned.
pub fn replacement_pool(active_member_ids: Vec<String>, excluded: &[&str]) -> Vec<String> {
    active_member_ids
        .into_iter()
        .filter(|id| !excluded.contains(&id.as_str()))
        .collect()
}

/// Shared random source for reviewer picks.
#[derive(Debug, Clone)]
pub struct ReviewerSelector {
    rng: Arc<Mutex<StdRng>>,
}

impl ReviewerSelector {
    /// Selector seeded from the operating system.
    pub fn new() -> Self { Self::from_rng(StdRng::from_os_rng()) }

    /// Selector with a fixed seed, for reproducible picks.
    pub fn seeded(seed: u64) -> Self { Self::from_rng(StdRng::seed_from_u64(seed)) }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Pick up to `limit` distinct ids from `pool`.
    ///
    /// Returns the whole pool, shuffled, when it holds `limit` ids or fewer.
    pub fn pick_many(&self, mut pool: Vec<String>, limit: usize) -> Vec<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let amount = limit.min(pool.len());
        let (picked, _) = pool.partial_shuffle(&mut *rng, amount);
        picked.to_vec()
    }

    /// Pick one id from `pool`, or `None` when it is empty.
    pub fn pick_one(&self, pool: &[String]) -> Option<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pool.choose(&mut *rng).cloned()
    }

    /// Initial reviewers for a pull request by `author_id`.
    pub fn select_initial(&self, active_member_ids: Vec<String>, author_id: &str, limit: usize) -> Vec<String> {
        self.pick_many(initial_pool(active_member_ids, author_id), limit)
    }

    /// Replacement reviewer, or `None` when nobody is eligible.
    pub fn select_replacement(&self, active_member_ids: Vec<String>, excluded: &[&str]) -> Option<String> {
        self.pick_one(&replacement_pool(active_member_ids, excluded))
    }
}

impl Default for ReviewerSelector {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(values: &[&str]) -> Vec<String> { values.iter().map(|v| v.to_string()).collect() }

    #[test]
    fn test_initial_pool_excludes_author() {
        assert_eq!(initial_pool(ids(&["a", "r1", "r2"]), "a"), ids(&["r1", "r2"]));
    }

    #[test]
    fn test_replacement_pool_applies_exclusions() {
        let pool = replacement_pool(ids(&["a", "r1", "r2", "r3"]), &["r1", "a", "r2"]);
        assert_eq!(pool, ids(&["r3"]));
    }

    #[test]
    fn test_select_initial_bounds() {
        for seed in 0 .. 64 {
            let selector = ReviewerSelector::seeded(seed);
            let picked = selector.select_initial(ids(&["a", "r1", "r2", "r3", "r4"]), "a", INITIAL_REVIEWER_LIMIT);

            assert_eq!(picked.len(), 2);
            assert!(!picked.contains(&"a".to_string()));
            let unique: HashSet<&String> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
        }
    }

    #[test]
    fn test_select_initial_small_pool() {
        let selector = ReviewerSelector::seeded(1);
        assert_eq!(selector.select_initial(ids(&["a", "r1"]), "a", 2), ids(&["r1"]));
        assert!(selector.select_initial(ids(&["a"]), "a", 2).is_empty());
        assert!(selector.select_initial(Vec::new(), "a", 2).is_empty());
    }

    #[test]
    fn test_select_initial_reaches_every_member() {
        let selector = ReviewerSelector::seeded(7);
        let mut seen = HashSet::new();
        for _ in 0 .. 200 {
            seen.extend(selector.select_initial(ids(&["a", "r1", "r2", "r3"]), "a", 2));
        }
        assert_eq!(seen, ids(&["r1", "r2", "r3"]).into_iter().collect());
    }

    #[test]
    fn test_select_replacement() {
        let selector = ReviewerSelector::seeded(3);
        for _ in 0 .. 32 {
            let picked = selector
                .select_replacement(ids(&["a", "r1", "r2", "r3", "r4"]), &["r1", "a", "r2"])
                .unwrap();
            assert!(picked == "r3" || picked == "r4");
        }
    }

    #[test]
    fn test_select_replacement_empty_pool() {
        let selector = ReviewerSelector::seeded(3);
        assert_eq!(selector.select_replacement(ids(&["a", "r1"]), &["r1", "a"]), None);
    }

    #[test]
    fn test_same_seed_same_picks() {
        let first = ReviewerSelector::seeded(42);
        let second = ReviewerSelector::seeded(42);
        let pool = ids(&["r1", "r2", "r3", "r4", "r5"]);
        assert_eq!(first.pick_many(pool.clone(), 2), second.pick_many(pool, 2));
    }
}
