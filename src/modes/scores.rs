use crate::game::{DifficultyProfile, HighScoreTable};

/// Prints the saved high scores, configured tiers first
pub struct ScoresMode<'a> {
    table: &'a HighScoreTable,
    profiles: &'a [DifficultyProfile],
}

impl<'a> ScoresMode<'a> {
    pub fn new(table: &'a HighScoreTable, profiles: &'a [DifficultyProfile]) -> Self {
        Self { table, profiles }
    }

    pub fn run(&self) {
        print!("{}", self.format_table());
    }

    pub fn format_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "=".repeat(40)));
        out.push_str("High Scores\n");
        out.push_str(&format!("{}\n", "=".repeat(40)));

        // Tiers that only exist in the file (e.g. from an older config) go last
        let mut tiers: Vec<&str> = self.profiles.iter().map(|p| p.name.as_str()).collect();
        for (tier, _) in self.table.tiers() {
            if !tiers.contains(&tier) {
                tiers.push(tier);
            }
        }

        for tier in tiers {
            out.push_str(&format!("{}:\n", tier));
            let scores = self.table.scores(tier);
            if scores.is_empty() {
                out.push_str("  (none)\n");
            }
            for (rank, score) in scores.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", rank + 1, score));
            }
        }

        out
    }
}
