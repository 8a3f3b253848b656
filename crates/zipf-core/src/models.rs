use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, ZipfError};

/// One `word,count` row of a word-count CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The word, as written in the file.
    pub word: String,
    /// Number of occurrences.
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Running tally of word occurrences.
///
/// The count for a word is always the sum of every amount added for it, so
/// merging the tallies of several files yields per-word totals across all of
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: HashMap<String, u64>,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `word`.
    ///
    /// Fails with [`ZipfError::CountOverflow`] instead of wrapping.
    pub fn add(&mut self, word: &str, count: u64) -> Result<()> {
        match self.counts.get_mut(word) {
            Some(existing) => {
                *existing = existing
                    .checked_add(count)
                    .ok_or_else(|| ZipfError::CountOverflow(word.to_string()))?;
            }
            None => {
                self.counts.insert(word.to_string(), count);
            }
        }
        Ok(())
    }

    /// Record a single occurrence of `word`.
    pub fn increment(&mut self, word: &str) -> Result<()> {
        self.add(word, 1)
    }

    /// Fold every count from `other` into `self`.
    pub fn merge(&mut self, other: WordCounts) -> Result<()> {
        for (word, count) in other.counts {
            self.add(&word, count)?;
        }
        Ok(())
    }

    /// Count for `word`, zero when never seen.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Rows ordered by count descending, ties broken by word ascending.
    ///
    /// `num` keeps only the first `num` rows; `None` keeps all of them.
    pub fn most_common(&self, num: Option<usize>) -> Vec<WordCount> {
        let mut rows: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, &count)| WordCount::new(word.clone(), count))
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        if let Some(n) = num {
            rows.truncate(n);
        }
        rows
    }

    /// Raw counts in no particular order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }
}
