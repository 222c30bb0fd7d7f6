//! Text-signal RCT detection.
//!
//! Signals are grouped into tiers of decreasing individual reliability. The
//! tiers are plain data tables; [`detect_rct_from_text`] is the only consumer.

use once_cell::sync::Lazy;
use regex::Regex;
use trialscope_core::{CandidateRecord, RctAssessment};

use crate::text::TermMatcher;

/// A labelled detection pattern. Patterns are matched case-insensitively
/// against lowercased text.
#[derive(Debug)]
pub struct SignalPattern {
    pub label: &'static str,
    pub regex: Regex,
}

fn compile(table: &[(&'static str, &str)]) -> Vec<SignalPattern> {
    table
        .iter()
        .map(|&(label, source)| SignalPattern {
            label,
            regex: Regex::new(&format!("(?i){source}")).expect("valid regex"),
        })
        .collect()
}

const STRONG_TABLE: [(&str, &str); 8] = [
    ("randomized controlled trial", r"\brandomized\s+controlled\s+trial\b"),
    ("randomised controlled trial", r"\brandomised\s+controlled\s+trial\b"),
    ("randomized clinical trial", r"\brandomized\s+clinical\s+trial\b"),
    ("randomised clinical trial", r"\brandomised\s+clinical\s+trial\b"),
    ("placebo-controlled", r"\bplacebo[- ]controlled\s+(?:trial|study)\b"),
    ("double-blind randomized", r"\bdouble[- ]blind(?:ed)?\s+(?:randomized|randomised)\b"),
    ("randomized-controlled", r"\brandomized[- ]controlled\b"),
    ("randomised-controlled", r"\brandomised[- ]controlled\b"),
];

const MODERATE_TABLE: [(&str, &str); 16] = [
    ("randomized", r"\brandomized\b"),
    ("randomised", r"\brandomised\b"),
    ("randomization", r"\brandomization\b"),
    ("randomisation", r"\brandomisation\b"),
    ("placebo", r"\bplacebo\b"),
    ("double-blind", r"\bdouble[- ]blind(?:ed)?\b"),
    ("single-blind", r"\bsingle[- ]blind(?:ed)?\b"),
    ("triple-blind", r"\btriple[- ]blind(?:ed)?\b"),
    ("controlled trial", r"\bcontrolled\s+trial\b"),
    ("clinical trial", r"\bclinical\s+trial\b"),
    ("random allocation", r"\brandom\s+(?:allocation|assignment)\b"),
    ("intention-to-treat", r"\bintention[- ]to[- ]treat\b"),
    ("intent-to-treat", r"\bintent[- ]to[- ]treat\b"),
    ("ITT analysis", r"\bitt\s+(?:analysis|population)\b"),
    ("per-protocol", r"\bper[- ]protocol\b"),
    ("CONSORT", r"\bconsort\b"),
];

const WEAK_TABLE: [(&str, &str); 11] = [
    ("study arms", r"\barms?\b.*\b(?:intervention|treatment|control)\b"),
    ("intervention group", r"\b(?:intervention|treatment)\s+(?:group|arm)\b"),
    ("control group", r"\bcontrol\s+(?:group|arm)\b"),
    ("primary endpoint", r"\bprimary\s+(?:endpoint|outcome)\b"),
    ("secondary endpoint", r"\bsecondary\s+(?:endpoint|outcome)\b"),
    ("enrollment", r"\benrollment\b"),
    ("enrolment", r"\benrolment\b"),
    ("washout", r"\bwash[- ]?out\b"),
    ("crossover", r"\bcrossover\b"),
    ("cross-over", r"\bcross[- ]over\b"),
    ("parallel-group", r"\bparallel[- ]group\b"),
];

const NEGATIVE_TABLE: [(&str, &str); 15] = [
    ("retrospective", r"\bretrospective\b"),
    ("observational study", r"\bobservational\s+study\b"),
    ("cohort study", r"\bcohort\s+study\b"),
    ("case-control", r"\bcase[- ]control\b"),
    ("cross-sectional", r"\bcross[- ]sectional\b"),
    ("meta-analysis", r"\bmeta[- ]analysis\b"),
    ("systematic review", r"\bsystematic\s+review\b"),
    ("case report", r"\bcase\s+report\b"),
    ("case series", r"\bcase\s+series\b"),
    ("review article", r"\breview\s+article\b"),
    ("editorial", r"\beditorial\b"),
    ("commentary", r"\bcommentary\b"),
    ("letter to", r"\bletter\s+to\b"),
    ("protocol for", r"\bprotocol\s+(?:for|of)\b"),
    ("study protocol", r"\bstudy\s+protocol\b"),
];

pub static STRONG_PATTERNS: Lazy<Vec<SignalPattern>> = Lazy::new(|| compile(&STRONG_TABLE));
pub static MODERATE_PATTERNS: Lazy<Vec<SignalPattern>> = Lazy::new(|| compile(&MODERATE_TABLE));
pub static WEAK_PATTERNS: Lazy<Vec<SignalPattern>> = Lazy::new(|| compile(&WEAK_TABLE));
pub static NEGATIVE_PATTERNS: Lazy<Vec<SignalPattern>> = Lazy::new(|| compile(&NEGATIVE_TABLE));

/// An explicit RCT claim in the title outranks negative evidence elsewhere.
static TITLE_RCT_CLAIM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\brandomi[sz]ed\s+controlled\s+trial\b").expect("valid regex")
});

static RCT_PUBLICATION_TYPES: Lazy<Vec<TermMatcher>> = Lazy::new(|| {
    [
        "randomized controlled trial",
        "randomised controlled trial",
        "controlled clinical trial",
        "clinical trial",
        "rct",
    ]
    .into_iter()
    .map(TermMatcher::new)
    .collect()
});

const PREPRINT_VENUES: [&str; 7] = [
    "medrxiv",
    "biorxiv",
    "arxiv",
    "ssrn",
    "preprints",
    "research square",
    "authorea",
];

const MAX_LISTED_SIGNALS: usize = 3;

/// Decide from free text whether a paper reports a randomized controlled trial.
pub fn detect_rct_from_text(
    title: &str,
    abstract_text: Option<&str>,
    keywords: &[String],
) -> RctAssessment {
    let abstract_text = abstract_text.unwrap_or_default();
    if title.trim().is_empty() && abstract_text.trim().is_empty() {
        return RctAssessment::negative("No title or abstract available");
    }

    let mut buffer = format!("{title} {abstract_text}");
    if !keywords.is_empty() {
        buffer.push(' ');
        buffer.push_str(&keywords.join(" "));
    }
    let text = buffer.to_lowercase();
    let title_lower = title.to_lowercase();

    let negatives = matching_labels(&NEGATIVE_PATTERNS, &text);
    if negatives.len() >= 2 && !TITLE_RCT_CLAIM.is_match(&title_lower) {
        return RctAssessment::negative(format!(
            "Negative signals detected: {}",
            first_n(&negatives, MAX_LISTED_SIGNALS)
        ));
    }

    for pattern in STRONG_PATTERNS.iter() {
        if let Some(found) = pattern.regex.find(&text) {
            let location = if pattern.regex.is_match(&title_lower) {
                "title"
            } else {
                "abstract"
            };
            return RctAssessment::positive(format!(
                "Strong RCT signal in {location}: '{}'",
                found.as_str()
            ));
        }
    }

    let moderate = matching_labels(&MODERATE_PATTERNS, &text);
    if moderate.len() >= 2 {
        return RctAssessment::positive(format!(
            "Multiple RCT signals detected: {}",
            first_n(&moderate, MAX_LISTED_SIGNALS)
        ));
    }

    if let [single] = moderate.as_slice() {
        let weak = matching_labels(&WEAK_PATTERNS, &text);
        if weak.len() >= 2 {
            return RctAssessment::positive(format!(
                "RCT signal ({single}) with supporting evidence"
            ));
        }
    }

    RctAssessment::negative("No sufficient RCT signals detected")
}

/// Positive assessment when any of the source's publication types names a
/// controlled trial; `None` when no type qualifies.
pub fn is_rct_publication_type(publication_types: &[String]) -> Option<RctAssessment> {
    publication_types.iter().find_map(|publication_type| {
        let lowered = publication_type.to_lowercase();
        RCT_PUBLICATION_TYPES
            .iter()
            .any(|rct_type| rct_type.is_match(&lowered))
            .then(|| RctAssessment::positive(format!("Publication type: {publication_type}")))
    })
}

/// Journal or publisher names that identify a preprint server.
pub fn is_preprint_venue(venue: &str) -> bool {
    let lowered = venue.to_lowercase();
    PREPRINT_VENUES.iter().any(|server| lowered.contains(server))
}

/// Assessment for a candidate whose source supplied none: publication types
/// first, then the text signals.
pub fn assess_candidate(candidate: &CandidateRecord) -> RctAssessment {
    if let Some(assessment) = is_rct_publication_type(&candidate.publication_types) {
        return assessment;
    }
    detect_rct_from_text(
        &candidate.metadata.title,
        candidate.metadata.abstract_text.as_deref(),
        &candidate.metadata.keywords,
    )
}

fn matching_labels(patterns: &[SignalPattern], text: &str) -> Vec<&'static str> {
    patterns
        .iter()
        .filter(|pattern| pattern.regex.is_match(text))
        .map(|pattern| pattern.label)
        .collect()
}

fn first_n(labels: &[&str], n: usize) -> String {
    labels.iter().take(n).copied().collect::<Vec<_>>().join(", ")
}
