use std::collections::HashMap;

use trialscope_core::RecordIdentifiers;

use super::resolver::MatchKind;
use crate::identifiers::{normalize_doi, normalize_pmcid, normalize_pmid};

/// Normalized exact-match keys of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExactKeys {
    pub doi: Option<String>,
    pub pmid: Option<String>,
    pub pmcid: Option<String>,
}

impl ExactKeys {
    pub fn from_identifiers(ids: &RecordIdentifiers) -> Self {
        Self {
            doi: ids.doi.as_deref().and_then(normalize_doi),
            pmid: ids.pmid.as_deref().and_then(normalize_pmid),
            pmcid: ids.pmcid.as_deref().and_then(normalize_pmcid),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.doi.is_none() && self.pmid.is_none() && self.pmcid.is_none()
    }
}

/// Per-run lookup state of the deduplication pass. Values are positions in
/// the run's canonical record list.
#[derive(Debug, Default)]
pub struct DedupIndex {
    by_doi: HashMap<String, usize>,
    by_pmid: HashMap<String, usize>,
    by_pmcid: HashMap<String, usize>,
    fuzzy_pool: Vec<usize>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// DOI first, then PMID, then PMCID.
    pub fn lookup(&self, keys: &ExactKeys) -> Option<(usize, MatchKind)> {
        let probe = |map: &HashMap<String, usize>, key: &Option<String>| {
            key.as_ref().and_then(|k| map.get(k)).copied()
        };

        probe(&self.by_doi, &keys.doi)
            .map(|idx| (idx, MatchKind::Doi))
            .or_else(|| probe(&self.by_pmid, &keys.pmid).map(|idx| (idx, MatchKind::Pmid)))
            .or_else(|| probe(&self.by_pmcid, &keys.pmcid).map(|idx| (idx, MatchKind::Pmcid)))
    }

    /// Points every key in `keys` at `record`. A key already owned by another
    /// record keeps its first owner.
    pub fn register(&mut self, keys: &ExactKeys, record: usize) {
        if let Some(doi) = &keys.doi {
            self.by_doi.entry(doi.clone()).or_insert(record);
        }
        if let Some(pmid) = &keys.pmid {
            self.by_pmid.entry(pmid.clone()).or_insert(record);
        }
        if let Some(pmcid) = &keys.pmcid {
            self.by_pmcid.entry(pmcid.clone()).or_insert(record);
        }
    }

    /// Records eligible for fuzzy matching, in order of admission.
    pub fn fuzzy_pool(&self) -> &[usize] {
        &self.fuzzy_pool
    }

    pub fn admit_fuzzy(&mut self, record: usize) {
        self.fuzzy_pool.push(record);
    }

    pub fn len(&self) -> usize {
        self.by_doi.len() + self.by_pmid.len() + self.by_pmcid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(doi: Option<&str>, pmid: Option<&str>, pmcid: Option<&str>) -> ExactKeys {
        ExactKeys::from_identifiers(&RecordIdentifiers {
            doi: doi.map(str::to_string),
            pmid: pmid.map(str::to_string),
            pmcid: pmcid.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn exact_keys_are_normalized() {
        let k = keys(Some("https://doi.org/10.1/ABC"), Some(" 111 "), Some(""));
        assert_eq!(k.doi.as_deref(), Some("10.1/abc"));
        assert_eq!(k.pmid.as_deref(), Some("111"));
        assert_eq!(k.pmcid, None);
        assert!(keys(None, Some("  "), None).is_empty());
    }

    #[test]
    fn lookup_follows_identifier_priority() {
        let mut index = DedupIndex::new();
        index.register(&keys(None, Some("111"), None), 0);
        index.register(&keys(Some("10.1/x"), None, None), 1);

        let probe = keys(Some("10.1/X"), Some("111"), None);
        assert_eq!(index.lookup(&probe), Some((1, MatchKind::Doi)));

        let probe = keys(Some("10.1/other"), Some("111"), None);
        assert_eq!(index.lookup(&probe), Some((0, MatchKind::Pmid)));

        assert_eq!(index.lookup(&keys(None, None, Some("PMC1"))), None);
    }

    #[test]
    fn first_owner_keeps_a_key() {
        let mut index = DedupIndex::new();
        index.register(&keys(Some("10.1/x"), None, None), 0);
        index.register(&keys(Some("10.1/x"), Some("5"), None), 3);

        assert_eq!(index.lookup(&keys(Some("10.1/x"), None, None)), Some((0, MatchKind::Doi)));
        assert_eq!(index.lookup(&keys(None, Some("5"), None)), Some((3, MatchKind::Pmid)));
        assert_eq!(index.len(), 2);
    }
}
