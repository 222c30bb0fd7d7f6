use std::collections::HashSet;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use trialscope_core::{
    CanonicalRecord, Classification, ClassificationConfig, ClassificationWeights, EvidenceField,
    Specialty,
};

use super::tables::{JOURNAL_KEYWORDS, MESH_IGNORE, SPECIALTY_TERMS};
use crate::text::TermMatcher;

static COMPILED_TERMS: Lazy<Vec<(Specialty, Vec<TermMatcher>)>> = Lazy::new(|| {
    SPECIALTY_TERMS
        .iter()
        .map(|(specialty, terms)| (*specialty, terms.iter().map(|t| TermMatcher::new(t)).collect()))
        .collect()
});

const TOP_PARTIAL_SCORES: usize = 3;

/// Running score and evidence for one specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialtyScore {
    pub specialty: Specialty,
    pub score: u32,
    pub evidence: Vec<String>,
}

/// Per-specialty scores for one record, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    pub scores: Vec<SpecialtyScore>,
    pub inputs_used: Vec<EvidenceField>,
}

impl Scorecard {
    fn new() -> Self {
        Self {
            scores: Specialty::SCORED
                .iter()
                .map(|specialty| SpecialtyScore {
                    specialty: *specialty,
                    score: 0,
                    evidence: Vec::new(),
                })
                .collect(),
            inputs_used: Vec::new(),
        }
    }

    fn slot_mut(&mut self, specialty: Specialty) -> Option<&mut SpecialtyScore> {
        self.scores.iter_mut().find(|slot| slot.specialty == specialty)
    }

    pub fn score_of(&self, specialty: Specialty) -> u32 {
        self.scores
            .iter()
            .find(|slot| slot.specialty == specialty)
            .map_or(0, |slot| slot.score)
    }

    pub fn max_score(&self) -> u32 {
        self.scores.iter().map(|slot| slot.score).max().unwrap_or(0)
    }
}

/// Rule-based specialty classifier. Pure: the same record always yields the
/// same classification.
#[derive(Debug, Clone)]
pub struct SpecialtyClassifier {
    weights: ClassificationWeights,
    threshold: u32,
    evidence_cap: usize,
    preference_order: Vec<Specialty>,
    mesh_ignore: HashSet<String>,
}

impl Default for SpecialtyClassifier {
    fn default() -> Self {
        Self::from_config(&ClassificationConfig::default())
    }
}

impl SpecialtyClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ClassificationConfig) -> Self {
        let mesh_ignore = MESH_IGNORE
            .iter()
            .map(|term| term.to_string())
            .chain(config.mesh_ignore.iter().cloned())
            .map(|term| term.trim().to_lowercase())
            .collect();

        Self {
            weights: config.weights,
            threshold: config.threshold(),
            evidence_cap: config.evidence_cap.max(1),
            preference_order: config.resolved_preference_order(),
            mesh_ignore,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Scores every specialty against every populated field of `record`.
    pub fn score(&self, record: &CanonicalRecord) -> Scorecard {
        let metadata = &record.metadata;
        let mut card = Scorecard::new();

        if !metadata.mesh_terms.is_empty() {
            card.inputs_used.push(EvidenceField::MeshTerms);
            let relevant: Vec<String> = metadata
                .mesh_terms
                .iter()
                .filter(|term| !self.mesh_ignore.contains(&term.trim().to_lowercase()))
                .cloned()
                .collect();
            score_term_list(&mut card, &relevant, self.weights.mesh, "MeSH");
        }

        if !metadata.fields_of_study.is_empty() {
            card.inputs_used.push(EvidenceField::FieldsOfStudy);
            score_term_list(&mut card, &metadata.fields_of_study, self.weights.field, "field");
        }

        if !metadata.keywords.is_empty() {
            card.inputs_used.push(EvidenceField::Keywords);
            score_term_list(&mut card, &metadata.keywords, self.weights.keyword, "keyword");
        }

        if !metadata.title.trim().is_empty() {
            card.inputs_used.push(EvidenceField::Title);
            let title = metadata.title.to_lowercase();
            for (specialty, matchers) in COMPILED_TERMS.iter() {
                let matched: Vec<&str> = matchers
                    .iter()
                    .filter(|m| m.is_match(&title))
                    .map(TermMatcher::term)
                    .collect();
                if matched.is_empty() {
                    continue;
                }
                if let Some(slot) = card.slot_mut(*specialty) {
                    slot.score += self.weights.title * matched.len() as u32;
                    slot.evidence.extend(
                        matched
                            .iter()
                            .take(self.evidence_cap)
                            .map(|term| format!("title:{term}")),
                    );
                }
            }
        }

        if let Some(abstract_text) = metadata
            .abstract_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
        {
            card.inputs_used.push(EvidenceField::Abstract);
            let abstract_text = abstract_text.to_lowercase();
            for (specialty, matchers) in COMPILED_TERMS.iter() {
                let distinct = matchers.iter().filter(|m| m.is_match(&abstract_text)).count();
                if distinct == 0 {
                    continue;
                }
                if let Some(slot) = card.slot_mut(*specialty) {
                    slot.score += self.weights.abstract_text * distinct as u32;
                    slot.evidence.push(format!("abstract:{distinct} terms"));
                }
            }
        }

        if let Some(journal) = metadata
            .journal
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            card.inputs_used.push(EvidenceField::Journal);
            let lowered = journal.to_lowercase();
            for (specialty, keywords) in JOURNAL_KEYWORDS.iter() {
                if keywords.iter().any(|keyword| lowered.contains(keyword))
                    && let Some(slot) = card.slot_mut(*specialty)
                {
                    slot.score += self.weights.journal;
                    slot.evidence.push(format!("journal:{journal}"));
                }
            }
        }

        card
    }

    pub fn classify(&self, record: &CanonicalRecord) -> Classification {
        let card = self.score(record);
        let (topic, rationale) = self.decide(&card);
        Classification {
            topic,
            rationale,
            inputs_used: card.inputs_used,
        }
    }

    /// Classifies every record in place, in parallel.
    pub fn classify_all(&self, records: &mut [CanonicalRecord]) {
        records.par_iter_mut().for_each(|record| {
            record.classification = self.classify(record);
        });

        let unclear = records
            .iter()
            .filter(|record| record.classification.topic == Specialty::OtherUnclear)
            .count();
        info!(
            "Classification: {} records ({} Other/Unclear)",
            records.len(),
            unclear
        );
    }

    fn decide(&self, card: &Scorecard) -> (Specialty, String) {
        let max = card.max_score();

        if max < self.threshold {
            if max == 0 {
                return (
                    Specialty::OtherUnclear,
                    "No matching terms found in any field".to_string(),
                );
            }
            let mut partial: Vec<&SpecialtyScore> =
                card.scores.iter().filter(|slot| slot.score > 0).collect();
            partial.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| self.rank(a.specialty).cmp(&self.rank(b.specialty)))
            });
            let listed = partial
                .iter()
                .take(TOP_PARTIAL_SCORES)
                .map(|slot| format!("{}:{}", slot.specialty, slot.score))
                .collect::<Vec<_>>()
                .join(", ");
            return (
                Specialty::OtherUnclear,
                format!("Below threshold. Top scores: {listed}"),
            );
        }

        let mut tied: Vec<Specialty> = card
            .scores
            .iter()
            .filter(|slot| slot.score == max)
            .map(|slot| slot.specialty)
            .collect();
        tied.sort_by_key(|specialty| self.rank(*specialty));

        let winner = tied[0];
        let matches = card
            .scores
            .iter()
            .find(|slot| slot.specialty == winner)
            .map(|slot| {
                slot.evidence
                    .iter()
                    .take(self.evidence_cap)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        if tied.len() == 1 {
            let runner_up = card
                .scores
                .iter()
                .filter(|slot| slot.specialty != winner)
                .map(|slot| slot.score)
                .max()
                .unwrap_or(0);
            return (
                winner,
                format!("Score {max} vs next {runner_up}. Matches: {matches}"),
            );
        }

        let others = tied[1..]
            .iter()
            .map(Specialty::label)
            .collect::<Vec<_>>()
            .join(", ");
        (
            winner,
            format!(
                "Tied at {max} with {others}; chose {winner} by specificity order. Matches: {matches}"
            ),
        )
    }

    fn rank(&self, specialty: Specialty) -> usize {
        self.preference_order
            .iter()
            .position(|candidate| *candidate == specialty)
            .unwrap_or(usize::MAX)
    }
}

/// One point bucket per distinct record term and specialty.
fn score_term_list(card: &mut Scorecard, values: &[String], weight: u32, prefix: &str) {
    let mut seen = HashSet::new();
    for value in values {
        let lowered = value.trim().to_lowercase();
        if lowered.is_empty() || !seen.insert(lowered.clone()) {
            continue;
        }
        for (specialty, matchers) in COMPILED_TERMS.iter() {
            if matchers.iter().any(|m| m.is_match(&lowered))
                && let Some(slot) = card.slot_mut(*specialty)
            {
                slot.score += weight;
                slot.evidence.push(format!("{prefix}:{}", value.trim()));
            }
        }
    }
}
