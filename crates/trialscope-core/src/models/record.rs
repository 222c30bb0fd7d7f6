use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::identifiers::RecordIdentifiers;
use super::source::SourceKind;
use super::specialty::Specialty;

/// Bibliographic metadata shared by candidate and canonical records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperMetadata {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub mesh_terms: Vec<String>,
    pub keywords: Vec<String>,
    pub fields_of_study: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub is_preprint: bool,
}

impl PaperMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Outcome of RCT detection: the flag plus the rationale explaining which
/// signal fired. An empty rationale means no detector has run yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RctAssessment {
    #[serde(rename = "rct_flag", default)]
    pub is_rct: bool,
    #[serde(rename = "rct_detection_method", default)]
    pub method: String,
}

impl RctAssessment {
    pub fn positive(method: impl Into<String>) -> Self {
        Self {
            is_rct: true,
            method: method.into(),
        }
    }

    pub fn negative(method: impl Into<String>) -> Self {
        Self {
            is_rct: false,
            method: method.into(),
        }
    }

    pub fn is_assessed(&self) -> bool {
        !self.method.trim().is_empty()
    }
}

/// One source's report of a paper, before deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub source: SourceKind,
    #[serde(flatten)]
    pub identifiers: RecordIdentifiers,
    #[serde(flatten)]
    pub metadata: PaperMetadata,
    /// Publication types as the source labels them (e.g. PubMed's
    /// "Randomized Controlled Trial"). Only consulted by RCT detection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publication_types: Vec<String>,
    #[serde(flatten)]
    pub rct: RctAssessment,
}

impl CandidateRecord {
    pub fn new(source: SourceKind, title: impl Into<String>) -> Self {
        Self {
            source,
            identifiers: RecordIdentifiers::default(),
            metadata: PaperMetadata::new(title),
            publication_types: Vec::new(),
            rct: RctAssessment::default(),
        }
    }
}

/// Input field category consulted while classifying a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceField {
    #[serde(rename = "MeSH terms")]
    MeshTerms,
    #[serde(rename = "fields_of_study")]
    FieldsOfStudy,
    #[serde(rename = "keywords")]
    Keywords,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "abstract")]
    Abstract,
    #[serde(rename = "journal")]
    Journal,
}

impl EvidenceField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MeshTerms => "MeSH terms",
            Self::FieldsOfStudy => "fields_of_study",
            Self::Keywords => "keywords",
            Self::Title => "title",
            Self::Abstract => "abstract",
            Self::Journal => "journal",
        }
    }
}

impl fmt::Display for EvidenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Specialty label assigned to a canonical record, with an explanation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub topic: Specialty,
    #[serde(rename = "classification_reason")]
    pub rationale: String,
    #[serde(rename = "classification_inputs_used")]
    pub inputs_used: Vec<EvidenceField>,
}

/// Deduplicated, merged representation of one real-world paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub source_primary: SourceKind,
    pub sources_found_in: Vec<SourceKind>,
    #[serde(flatten)]
    pub identifiers: RecordIdentifiers,
    #[serde(flatten)]
    pub metadata: PaperMetadata,
    #[serde(flatten)]
    pub rct: RctAssessment,
    #[serde(flatten)]
    pub classification: Classification,
}

impl CanonicalRecord {
    /// Admit a candidate as the first member of a new canonical record. The
    /// candidate fixes title, authors, dates, preprint flag and RCT flag for
    /// the lifetime of the record.
    pub fn from_candidate(candidate: CandidateRecord) -> Self {
        let mut metadata = candidate.metadata;
        for terms in [
            &mut metadata.mesh_terms,
            &mut metadata.keywords,
            &mut metadata.fields_of_study,
        ] {
            retain_first_occurrences(terms);
        }

        Self {
            source_primary: candidate.source,
            sources_found_in: vec![candidate.source],
            identifiers: candidate.identifiers,
            metadata,
            rct: candidate.rct,
            classification: Classification::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}

/// Term lists are sets kept in first-seen order.
fn retain_first_occurrences(terms: &mut Vec<String>) {
    let mut seen = HashSet::new();
    terms.retain(|term| seen.insert(term.clone()));
}
