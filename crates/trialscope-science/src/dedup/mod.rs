//! Cross-source deduplication: one ordered pass that resolves each candidate
//! against the records admitted so far and merges duplicates in place.

pub mod index;
pub mod resolver;

use serde::Serialize;
use tracing::{debug, info};
use trialscope_core::{CandidateRecord, CanonicalRecord, DedupConfig};

pub use index::{DedupIndex, ExactKeys};
pub use resolver::{DedupKey, IdentityResolver, MatchKind, MatchOutcome};

use crate::merge::MergeRecord;
use crate::text::truncate_chars;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DedupReport {
    pub records: Vec<CanonicalRecord>,
    pub input_count: usize,
    pub merges: usize,
    pub exact_merges: usize,
    pub fuzzy_merges: usize,
}

impl DedupReport {
    pub fn unique_count(&self) -> usize {
        self.records.len()
    }
}

#[derive(Debug, Clone)]
pub struct Deduplicator {
    resolver: IdentityResolver,
    retroactive_indexing: bool,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self {
            resolver: IdentityResolver::default(),
            retroactive_indexing: true,
        }
    }
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DedupConfig) -> Self {
        Self {
            resolver: IdentityResolver::new().with_title_threshold(config.threshold()),
            retroactive_indexing: config.retroactive_indexing,
        }
    }

    pub fn with_title_threshold(mut self, threshold: f64) -> Self {
        self.resolver = self.resolver.with_title_threshold(threshold);
        self
    }

    /// When enabled, identifiers a record gains through a merge become exact
    /// keys for later candidates.
    pub fn with_retroactive_indexing(mut self, enabled: bool) -> Self {
        self.retroactive_indexing = enabled;
        self
    }

    /// Collapse `candidates` into canonical records, in order of first
    /// appearance.
    pub fn deduplicate(&self, candidates: Vec<CandidateRecord>) -> DedupReport {
        let input_count = candidates.len();
        let mut index = DedupIndex::new();
        let mut records: Vec<CanonicalRecord> = Vec::with_capacity(input_count);
        let mut exact_merges = 0usize;
        let mut fuzzy_merges = 0usize;

        for candidate in candidates {
            match self.resolver.resolve(&candidate, &index, &records) {
                MatchOutcome::Existing { index: found, kind } => {
                    let record = records[found].merge_with(&candidate);
                    if kind.is_exact() {
                        exact_merges += 1;
                    } else {
                        fuzzy_merges += 1;
                    }
                    debug!(
                        key = %DedupKey::for_candidate(&candidate),
                        "Merged record via {kind}: {}...",
                        truncate_chars(&candidate.metadata.title, 50)
                    );

                    if self.retroactive_indexing {
                        index.register(&ExactKeys::from_identifiers(&record.identifiers), found);
                    }
                }
                MatchOutcome::New => {
                    let position = records.len();
                    index.register(&ExactKeys::from_identifiers(&candidate.identifiers), position);
                    index.admit_fuzzy(position);
                    records.push(CanonicalRecord::from_candidate(candidate));
                }
            }
        }

        let merges = exact_merges + fuzzy_merges;
        info!(
            "Deduplication: {} records -> {} unique ({} merges)",
            input_count,
            records.len(),
            merges
        );

        DedupReport {
            records,
            input_count,
            merges,
            exact_merges,
            fuzzy_merges,
        }
    }
}

/// Deduplicates with default settings.
pub fn deduplicate_records(candidates: Vec<CandidateRecord>) -> DedupReport {
    Deduplicator::default().deduplicate(candidates)
}
