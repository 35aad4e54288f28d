//! Ranking Index Module
//!
//! Orders cached short codes by access count for popularity-based eviction.

use std::collections::{BTreeSet, HashMap};

// == Ranking Index ==
/// Tracks the access-count score of every cached short code.
///
/// Scores live in two places:
/// - `scores` maps a key to its current score for O(1) lookup
/// - `order` holds `(score, key)` pairs sorted ascending, so the lowest
///   scores come first and ties fall back to key order
#[derive(Debug, Default)]
pub struct RankingIndex {
    scores: HashMap<String, u64>,
    order: BTreeSet<(u64, String)>,
}

impl RankingIndex {
    // == Constructor ==
    /// Creates a new empty ranking.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set Score ==
    /// Inserts a key or updates its score.
    pub fn set_score(&mut self, key: &str, score: u64) {
        if let Some(old) = self.scores.insert(key.to_string(), score) {
            self.order.remove(&(old, key.to_string()));
        }
        self.order.insert((score, key.to_string()));
    }

    // == Score ==
    /// Returns the score of a key, if ranked.
    pub fn score(&self, key: &str) -> Option<u64> {
        self.scores.get(key).copied()
    }

    // == Remove ==
    /// Removes a key from the ranking. Returns the score it had.
    pub fn remove(&mut self, key: &str) -> Option<u64> {
        let score = self.scores.remove(key)?;
        self.order.remove(&(score, key.to_string()));
        Some(score)
    }

    // == Lowest ==
    /// Returns up to `k` keys with the lowest scores, lowest first.
    pub fn lowest(&self, k: usize) -> Vec<String> {
        self.order
            .iter()
            .take(k)
            .map(|(_, key)| key.clone())
            .collect()
    }

    // == Length ==
    /// Returns the number of ranked keys.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.scores.contains_key(key)
    }
}
