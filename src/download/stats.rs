//! Materialization outcome tracking.

use std::collections::HashMap;

/// Result of one attempted media write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Downloaded and written during this run.
    New,
    /// Already on disk; no network call was made.
    Cached,
    /// Download or write failed; logged and skipped.
    Failed,
}

/// Outcome counts accumulated over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    counts: HashMap<Outcome, u64>,
}

/// Totals per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub new: u64,
    pub cached: u64,
    pub failed: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Count of one outcome, zero if never recorded.
    pub fn count(&self, outcome: Outcome) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of recorded attempts of any outcome.
    pub fn attempts(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            new: self.count(Outcome::New),
            cached: self.count(Outcome::Cached),
            failed: self.count(Outcome::Failed),
        }
    }
}
