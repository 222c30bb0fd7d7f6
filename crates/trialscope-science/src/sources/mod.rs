//! The boundary between live connectors and the reconciliation core.

pub mod json_file;

use tracing::warn;
use trialscope_core::{CandidateRecord, SourceKind};

pub use json_file::JsonFileSource;

use crate::Result;
use crate::dates::{SearchWindow, parse_publication_date};
use crate::detection::{assess_candidate, is_preprint_venue};
use crate::identifiers::{parse_pmcid, parse_pmid};

/// Supplies candidate records for one bibliographic service.
pub trait CandidateSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn name(&self) -> &str {
        self.kind().name()
    }

    /// Candidates published inside `window`, each carrying an RCT assessment.
    fn fetch(&self, window: &SearchWindow) -> Result<Vec<CandidateRecord>>;
}

/// Fills the fields a connector may have left empty: RCT assessment,
/// publication year, preprint flag. Malformed PubMed identifiers are kept
/// verbatim with a warning.
pub fn complete_candidate(mut candidate: CandidateRecord) -> CandidateRecord {
    if !candidate.rct.is_assessed() {
        candidate.rct = assess_candidate(&candidate);
    }

    if let Some(raw) = candidate.metadata.publication_date.clone() {
        match parse_publication_date(&raw) {
            Some(parsed) => {
                candidate.metadata.publication_date = Some(parsed.iso());
                candidate.metadata.publication_year.get_or_insert(parsed.year);
            }
            None => warn!(date = %raw, "Unparseable publication date"),
        }
    }

    if !candidate.metadata.is_preprint {
        let venues = [&candidate.metadata.journal, &candidate.metadata.publisher];
        candidate.metadata.is_preprint = venues
            .into_iter()
            .flatten()
            .any(|venue| is_preprint_venue(venue));
    }

    if let Some(pmid) = candidate.identifiers.pmid.as_deref()
        && parse_pmid(pmid).is_err()
    {
        warn!(pmid = %pmid, "Non-numeric PMID, keeping it verbatim");
    }
    if let Some(pmcid) = candidate.identifiers.pmcid.as_deref()
        && parse_pmcid(pmcid).is_err()
    {
        warn!(pmcid = %pmcid, "Malformed PMCID, keeping it verbatim");
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_missing_fields() {
        let mut candidate = CandidateRecord::new(SourceKind::Crossref, "A Randomized Controlled Trial of X");
        candidate.metadata.publication_date = Some("2024/03/05".to_string());
        candidate.metadata.publisher = Some("Cold Spring Harbor Laboratory (medRxiv)".to_string());

        let completed = complete_candidate(candidate);
        assert!(completed.rct.is_rct);
        assert_eq!(completed.metadata.publication_date.as_deref(), Some("2024-03-05"));
        assert_eq!(completed.metadata.publication_year, Some(2024));
        assert!(completed.metadata.is_preprint);
    }

    #[test]
    fn keeps_source_supplied_values() {
        let mut candidate = CandidateRecord::new(SourceKind::PubMed, "Cohort of adults");
        candidate.rct = trialscope_core::RctAssessment::positive("Publication type: Randomized Controlled Trial");
        candidate.metadata.publication_date = Some("2023-12-30".to_string());
        candidate.metadata.publication_year = Some(2024);

        let completed = complete_candidate(candidate);
        assert!(completed.rct.is_rct);
        assert_eq!(completed.metadata.publication_year, Some(2024));
        assert!(!completed.metadata.is_preprint);
    }
}
