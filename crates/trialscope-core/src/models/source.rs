use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrialscopeError;

/// Bibliographic service a candidate record was retrieved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "PubMed")]
    PubMed,
    #[serde(rename = "Semantic Scholar")]
    SemanticScholar,
    #[serde(rename = "Europe PMC")]
    EuropePmc,
    #[serde(rename = "Crossref")]
    Crossref,
    #[serde(rename = "OpenAlex")]
    OpenAlex,
    #[serde(rename = "Scopus")]
    Scopus,
    #[serde(rename = "Web of Science")]
    WebOfScience,
    #[serde(rename = "Dimensions")]
    Dimensions,
}

impl SourceKind {
    pub const ALL: [SourceKind; 8] = [
        Self::PubMed,
        Self::SemanticScholar,
        Self::EuropePmc,
        Self::Crossref,
        Self::OpenAlex,
        Self::Scopus,
        Self::WebOfScience,
        Self::Dimensions,
    ];

    /// Display name, as written into `sources_found_in`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PubMed => "PubMed",
            Self::SemanticScholar => "Semantic Scholar",
            Self::EuropePmc => "Europe PMC",
            Self::Crossref => "Crossref",
            Self::OpenAlex => "OpenAlex",
            Self::Scopus => "Scopus",
            Self::WebOfScience => "Web of Science",
            Self::Dimensions => "Dimensions",
        }
    }

    /// Short lowercase key used on the command line and in config files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PubMed => "pubmed",
            Self::SemanticScholar => "semanticscholar",
            Self::EuropePmc => "europepmc",
            Self::Crossref => "crossref",
            Self::OpenAlex => "openalex",
            Self::Scopus => "scopus",
            Self::WebOfScience => "wos",
            Self::Dimensions => "dimensions",
        }
    }

    /// Enterprise sources require an institutional API key.
    pub fn is_enterprise(&self) -> bool {
        matches!(self, Self::Scopus | Self::WebOfScience | Self::Dimensions)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = TrialscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == wanted.to_lowercase() || kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrialscopeError::UnknownSource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_display_names() {
        assert_eq!("pubmed".parse::<SourceKind>().unwrap(), SourceKind::PubMed);
        assert_eq!("Europe PMC".parse::<SourceKind>().unwrap(), SourceKind::EuropePmc);
        assert_eq!("WOS".parse::<SourceKind>().unwrap(), SourceKind::WebOfScience);
        assert!("scholar".parse::<SourceKind>().is_err());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&SourceKind::SemanticScholar).unwrap();
        assert_eq!(json, "\"Semantic Scholar\"");
    }

    #[test]
    fn enterprise_sources() {
        assert!(SourceKind::Scopus.is_enterprise());
        assert!(!SourceKind::OpenAlex.is_enterprise());
    }
}
