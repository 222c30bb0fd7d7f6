//! PubMed and PubMed Central identifiers.

use crate::error::{Result, ScienceError};

/// Normalized exact-match key for a PMID: surrounding whitespace removed.
pub fn normalize_pmid(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Normalized exact-match key for a PMCID: surrounding whitespace removed.
pub fn normalize_pmcid(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Strict PMID check: all digits.
pub fn parse_pmid(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ScienceError::InvalidPmid(input.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| ScienceError::InvalidPmid(input.to_string()))
}

/// Strict PMCID check: `PMC` followed by digits. Returns the canonical
/// upper-case form.
pub fn parse_pmcid(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let digits = trimmed
        .get(..3)
        .filter(|prefix| prefix.eq_ignore_ascii_case("pmc"))
        .map(|_| &trimmed[3..])
        .ok_or_else(|| ScienceError::InvalidPmcid(input.to_string()))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ScienceError::InvalidPmcid(input.to_string()));
    }
    Ok(format!("PMC{digits}"))
}
