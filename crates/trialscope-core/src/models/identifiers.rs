use serde::{Deserialize, Serialize};

/// External identifiers a source attached to a paper. Every field is optional;
/// values are stored as the source reported them and normalized only when
/// compared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordIdentifiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmcid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s2_paper_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openalex_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopus_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wos_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions_id: Option<String>,
}

impl RecordIdentifiers {
    pub fn is_empty(&self) -> bool {
        self.doi.is_none()
            && self.pmid.is_none()
            && self.pmcid.is_none()
            && self.s2_paper_id.is_none()
            && self.openalex_id.is_none()
            && self.scopus_id.is_none()
            && self.wos_id.is_none()
            && self.dimensions_id.is_none()
    }

    /// True when DOI, PMID or PMCID is present and non-blank. Only these three
    /// take part in exact identity matching.
    pub fn has_exact_key(&self) -> bool {
        [&self.doi, &self.pmid, &self.pmcid]
            .into_iter()
            .any(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_is_empty() {
        let empty = RecordIdentifiers::default();
        assert!(empty.is_empty());
        assert!(!empty.has_exact_key());

        let with_openalex = RecordIdentifiers {
            openalex_id: Some("W123".to_string()),
            ..Default::default()
        };
        assert!(!with_openalex.is_empty());
        assert!(!with_openalex.has_exact_key());
    }

    #[test]
    fn blank_pmid_is_not_an_exact_key() {
        let ids = RecordIdentifiers {
            pmid: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!ids.has_exact_key());

        let ids = RecordIdentifiers {
            pmcid: Some("PMC42".to_string()),
            ..Default::default()
        };
        assert!(ids.has_exact_key());
    }
}
