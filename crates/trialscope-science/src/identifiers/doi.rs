use serde::{Deserialize, Serialize};

use crate::error::{Result, ScienceError};

const DOI_PREFIXES: [&str; 5] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doi {
    pub raw: String,
    pub normalized: String,
    pub url: String,
}

impl Doi {
    /// Strict parse: the stripped value must look like `10.<registrant>/<suffix>`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let stripped = strip_doi_prefix(input);

        if !stripped.starts_with("10.") {
            return Err(ScienceError::InvalidDoi(input.to_string()));
        }
        let slash_pos = stripped
            .find('/')
            .ok_or_else(|| ScienceError::InvalidDoi(input.to_string()))?;
        if stripped[slash_pos + 1..].is_empty() {
            return Err(ScienceError::InvalidDoi(input.to_string()));
        }

        let normalized = stripped.to_lowercase();
        let url = format!("https://doi.org/{normalized}");

        Ok(Self {
            raw: input.to_string(),
            normalized,
            url,
        })
    }
}

/// Lenient normalization used as the dedup key: trim, drop one resolver or
/// `doi:` prefix, lowercase. Values that are not well-formed DOIs are kept
/// so two sources reporting the same malformed string still collide.
pub fn normalize_doi(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Doi::parse(trimmed) {
        Ok(doi) => Some(doi.normalized),
        Err(_) => {
            let fallback = strip_doi_prefix(trimmed).to_lowercase();
            if fallback.is_empty() {
                return None;
            }
            tracing::warn!(doi = %trimmed, "Unparseable DOI, keeping it verbatim");
            Some(fallback)
        }
    }
}

fn strip_doi_prefix(input: &str) -> &str {
    for prefix in DOI_PREFIXES {
        if input.len() >= prefix.len()
            && input.is_char_boundary(prefix.len())
            && input[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return input[prefix.len()..].trim_start();
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_doi() {
        let doi = Doi::parse("10.1000/xyz123").unwrap();
        assert_eq!(doi.normalized, "10.1000/xyz123");
        assert_eq!(doi.url, "https://doi.org/10.1000/xyz123");
    }

    #[test]
    fn doi_with_resolver_prefixes() {
        for raw in [
            "https://doi.org/10.1000/xyz123",
            "http://dx.doi.org/10.1000/xyz123",
            "HTTPS://DOI.ORG/10.1000/XYZ123",
            "doi:10.1000/xyz123",
            "DOI: 10.1000/xyz123",
        ] {
            assert_eq!(Doi::parse(raw).unwrap().normalized, "10.1000/xyz123", "{raw}");
        }
    }

    #[test]
    fn reject_not_a_doi() {
        assert!(Doi::parse("not-a-doi").is_err());
        assert!(Doi::parse("10.1000").is_err());
        assert!(Doi::parse("").is_err());
    }

    #[test]
    fn doi_case_and_prefix_normalize_to_same_key() {
        assert_eq!(normalize_doi("10.1/ABC"), normalize_doi("https://doi.org/10.1/abc"));
        assert_eq!(normalize_doi(" 10.1/X "), Some("10.1/x".to_string()));
    }

    #[test]
    fn malformed_doi_is_kept_lowercased() {
        assert_eq!(normalize_doi("S0140-6736(24)X"), Some("s0140-6736(24)x".to_string()));
        assert_eq!(normalize_doi("   "), None);
        assert_eq!(normalize_doi("doi:"), None);
    }
}
