use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scores kept per difficulty tier
pub const MAX_HIGH_SCORES: usize = 5;

/// Best scores per difficulty tier, each list sorted descending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    tiers: BTreeMap<String, Vec<u32>>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finished game's score.
    ///
    /// Returns the 1-based rank if the score made the table.
    pub fn record(&mut self, tier: &str, score: u32) -> Option<usize> {
        let scores = self.tiers.entry(tier.to_string()).or_default();

        // Equal scores rank after the ones already there
        let index = scores.partition_point(|s| *s >= score);
        if index >= MAX_HIGH_SCORES {
            return None;
        }

        scores.insert(index, score);
        scores.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    pub fn scores(&self, tier: &str) -> &[u32] {
        self.tiers.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn best(&self, tier: &str) -> Option<u32> {
        self.scores(tier).first().copied()
    }

    pub fn tiers(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.tiers
            .iter()
            .map(|(tier, scores)| (tier.as_str(), scores.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }

    /// Restore ordering and size limits, e.g. after loading a hand-edited file
    pub fn normalize(&mut self) {
        for scores in self.tiers.values_mut() {
            scores.sort_unstable_by(|a, b| b.cmp(a));
            scores.truncate(MAX_HIGH_SCORES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_record_sorted_and_bounded() {
        let mut table = HighScoreTable::new();
        for score in [3, 10, 7, 1, 12, 5, 8] {
            table.record("medium", score);
        }

        assert_eq!(table.scores("medium"), &[12, 10, 8, 7, 5]);
        assert_eq!(table.best("medium"), Some(12));
    }

    #[test]
    fn test_rank() {
        let mut table = HighScoreTable::new();
        assert_eq!(table.record("easy", 10), Some(1));
        assert_eq!(table.record("easy", 20), Some(1));
        assert_eq!(table.record("easy", 15), Some(2));
        assert_eq!(table.record("easy", 15), Some(3));
        for score in [30, 40] {
            table.record("easy", score);
        }
        // Full table of [40, 30, 20, 15, 15]; 1 does not make it
        assert_eq!(table.record("easy", 1), None);
        assert_eq!(table.scores("easy"), &[40, 30, 20, 15, 15]);

        // A tie with the last entry does not push it out
        assert_eq!(table.record("easy", 15), None);
        assert_eq!(table.record("easy", 16), Some(4));
        assert_eq!(table.scores("easy"), &[40, 30, 20, 16, 15]);
    }

    #[test]
    fn test_tiers_are_independent() {
        let mut table = HighScoreTable::new();
        table.record("easy", 4);
        table.record("hard", 9);

        assert_eq!(table.scores("easy"), &[4]);
        assert_eq!(table.scores("hard"), &[9]);
        assert!(table.scores("medium").is_empty());
        assert_eq!(table.tiers().count(), 2);
    }

    #[test]
    fn test_invariants_hold_for_random_input() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut table = HighScoreTable::new();

        for _ in 0..500 {
            let tier = ["easy", "medium", "hard"][rng.gen_range(0..3)];
            table.record(tier, rng.gen_range(0..100));

            for (_, scores) in table.tiers() {
                assert!(scores.len() <= MAX_HIGH_SCORES);
                assert!(scores.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }

    #[test]
    fn test_json_layout() {
        let mut table = HighScoreTable::new();
        table.record("easy", 3);
        table.record("easy", 8);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"easy":[8,3]}"#);

        let mut loaded: HighScoreTable =
            serde_json::from_str(r#"{"hard":[1,9,4,4,2,7]}"#).unwrap();
        loaded.normalize();
        assert_eq!(loaded.scores("hard"), &[9, 7, 4, 4, 2]);
    }
}
