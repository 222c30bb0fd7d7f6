use std::fmt;

use trialscope_core::{CandidateRecord, CanonicalRecord};

use super::index::{DedupIndex, ExactKeys};
use crate::text::{first_author_last_name, normalize_title, trigram_similarity};

pub const DEFAULT_TITLE_THRESHOLD: f64 = 0.90;

const FUZZY_KEY_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Doi,
    Pmid,
    Pmcid,
    Fuzzy,
}

impl MatchKind {
    pub fn is_exact(&self) -> bool {
        !matches!(self, Self::Fuzzy)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Doi => "doi",
            Self::Pmid => "pmid",
            Self::Pmcid => "pmcid",
            Self::Fuzzy => "fuzzy",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No existing record describes this paper.
    New,
    /// Merge into the canonical record at `index`.
    Existing { index: usize, kind: MatchKind },
}

/// The key a candidate is grouped under: its strongest identifier, or a
/// normalized title/author/year fingerprint when it carries none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    Doi(String),
    Pmid(String),
    Pmcid(String),
    Fuzzy {
        title: String,
        author: String,
        year: Option<i32>,
    },
}

impl DedupKey {
    pub fn for_candidate(candidate: &CandidateRecord) -> Self {
        let keys = ExactKeys::from_identifiers(&candidate.identifiers);
        if let Some(doi) = keys.doi {
            return Self::Doi(doi);
        }
        if let Some(pmid) = keys.pmid {
            return Self::Pmid(pmid);
        }
        if let Some(pmcid) = keys.pmcid {
            return Self::Pmcid(pmcid);
        }

        let title: String = normalize_title(&candidate.metadata.title)
            .chars()
            .take(FUZZY_KEY_TITLE_CHARS)
            .collect();
        let author = first_author_last_name(&candidate.metadata.authors)
            .map(str::to_lowercase)
            .unwrap_or_default();
        Self::Fuzzy {
            title,
            author,
            year: candidate.metadata.publication_year,
        }
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doi(doi) => write!(f, "doi:{doi}"),
            Self::Pmid(pmid) => write!(f, "pmid:{pmid}"),
            Self::Pmcid(pmcid) => write!(f, "pmcid:{pmcid}"),
            Self::Fuzzy {
                title,
                author,
                year,
            } => {
                let year = year.map(|y| y.to_string()).unwrap_or_default();
                write!(f, "fuzzy:{title}|{author}|{year}")
            }
        }
    }
}

/// Decides whether a candidate describes a paper already admitted in the run.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    title_similarity_threshold: f64,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self {
            title_similarity_threshold: DEFAULT_TITLE_THRESHOLD,
        }
    }
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_threshold(mut self, threshold: f64) -> Self {
        self.title_similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Exact identifiers first. The fuzzy scan only runs for candidates with
    /// no DOI, PMID or PMCID, and takes the first record in the pool that
    /// satisfies every criterion.
    pub fn resolve(
        &self,
        candidate: &CandidateRecord,
        index: &DedupIndex,
        records: &[CanonicalRecord],
    ) -> MatchOutcome {
        let keys = ExactKeys::from_identifiers(&candidate.identifiers);
        if let Some((found, kind)) = index.lookup(&keys) {
            return MatchOutcome::Existing { index: found, kind };
        }
        if !keys.is_empty() {
            return MatchOutcome::New;
        }

        index
            .fuzzy_pool()
            .iter()
            .copied()
            .find(|&idx| {
                records
                    .get(idx)
                    .is_some_and(|existing| self.is_fuzzy_match(candidate, existing))
            })
            .map_or(MatchOutcome::New, |idx| MatchOutcome::Existing {
                index: idx,
                kind: MatchKind::Fuzzy,
            })
    }

    pub fn is_fuzzy_match(&self, candidate: &CandidateRecord, existing: &CanonicalRecord) -> bool {
        let incoming = &candidate.metadata;
        let current = &existing.metadata;

        if incoming.title.trim().is_empty() || current.title.trim().is_empty() {
            return false;
        }

        if let (Some(a), Some(b)) = (incoming.publication_year, current.publication_year)
            && a != b
        {
            return false;
        }

        if trigram_similarity(&incoming.title, &current.title) < self.title_similarity_threshold {
            return false;
        }

        match (
            first_author_last_name(&incoming.authors),
            first_author_last_name(&current.authors),
        ) {
            (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
            _ => true,
        }
    }
}
