//! A full run: gather candidates from every source, filter, deduplicate,
//! classify.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, error, info};
use trialscope_core::{AppConfig, CandidateRecord, CanonicalRecord};

use crate::classification::SpecialtyClassifier;
use crate::dates::SearchWindow;
use crate::dedup::Deduplicator;
use crate::sources::CandidateSource;

pub const EXCLUDED_NOT_RCT: &str = "not_rct";
pub const EXCLUDED_PREPRINT: &str = "preprint";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub window_start: String,
    pub window_end: String,
    pub include_preprints: bool,
    /// Retained candidates per source name; failed sources count as 0.
    pub per_source: BTreeMap<String, usize>,
    pub failed_sources: Vec<String>,
    pub total_retrieved: usize,
    pub deduplicated: usize,
    pub merges: usize,
    pub excluded: BTreeMap<String, usize>,
    pub by_topic: BTreeMap<String, usize>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search window: {} to {}", self.window_start, self.window_end)?;
        writeln!(f, "Include preprints: {}", self.include_preprints)?;
        writeln!(f)?;
        writeln!(f, "Records retrieved per source:")?;
        for (source, count) in &self.per_source {
            writeln!(f, "  {source}: {count}")?;
        }
        writeln!(f)?;
        writeln!(f, "Total retrieved: {}", self.total_retrieved)?;
        writeln!(
            f,
            "After deduplication: {} ({} merges)",
            self.deduplicated, self.merges
        )?;
        if !self.excluded.is_empty() {
            writeln!(f)?;
            writeln!(f, "Excluded:")?;
            for (reason, count) in &self.excluded {
                writeln!(f, "  {reason}: {count}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "By topic:")?;
        for (topic, count) in &self.by_topic {
            writeln!(f, "  {topic}: {count}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub records: Vec<CanonicalRecord>,
    pub summary: RunSummary,
}

pub struct RunPipeline {
    config: AppConfig,
    sources: Vec<Box<dyn CandidateSource>>,
}

impl RunPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: Box<dyn CandidateSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn add_source(&mut self, source: Box<dyn CandidateSource>) {
        self.sources.push(source);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs every configured source over `window`. A failing source is
    /// logged and counted as zero; it never aborts the run.
    pub fn run(&self, window: &SearchWindow) -> RunOutput {
        let pipeline = &self.config.pipeline;
        let (window_start, window_end) = window.iso_bounds();
        let mut summary = RunSummary {
            window_start,
            window_end,
            include_preprints: pipeline.include_preprints,
            ..Default::default()
        };
        let mut gathered: Vec<CandidateRecord> = Vec::new();

        for source in &self.sources {
            if !pipeline.allows(source.kind()) {
                debug!("Skipping {}: not in pipeline.sources", source.name());
                continue;
            }

            info!("Querying {}...", source.name());
            match source.fetch(window) {
                Ok(mut candidates) => {
                    if let Some(limit) = pipeline.max_records_per_source {
                        candidates.truncate(limit);
                    }
                    let retained = self.filter_candidates(candidates, &mut summary);
                    info!("{}: Retrieved {} RCT records", source.name(), retained.len());
                    *summary.per_source.entry(source.name().to_string()).or_default() +=
                        retained.len();
                    gathered.extend(retained);
                }
                Err(e) => {
                    error!("Error querying {}: {e}", source.name());
                    summary.per_source.entry(source.name().to_string()).or_default();
                    summary.failed_sources.push(source.name().to_string());
                }
            }
        }

        summary.total_retrieved = gathered.len();
        let (records, merges) = self.reconcile(gathered);
        summary.deduplicated = records.len();
        summary.merges = merges;
        for record in &records {
            *summary
                .by_topic
                .entry(record.classification.topic.label().to_string())
                .or_default() += 1;
        }

        RunOutput { records, summary }
    }

    /// Deduplicates and classifies already-filtered candidates. Returns the
    /// canonical records and the number of merges performed.
    pub fn reconcile(&self, candidates: Vec<CandidateRecord>) -> (Vec<CanonicalRecord>, usize) {
        let report = Deduplicator::from_config(&self.config.dedup).deduplicate(candidates);
        let mut records = report.records;
        SpecialtyClassifier::from_config(&self.config.classification).classify_all(&mut records);
        (records, report.merges)
    }

    fn filter_candidates(
        &self,
        candidates: Vec<CandidateRecord>,
        summary: &mut RunSummary,
    ) -> Vec<CandidateRecord> {
        let include_preprints = self.config.pipeline.include_preprints;
        let mut retained = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !candidate.rct.is_rct {
                *summary.excluded.entry(EXCLUDED_NOT_RCT.to_string()).or_default() += 1;
            } else if !include_preprints && candidate.metadata.is_preprint {
                *summary.excluded.entry(EXCLUDED_PREPRINT.to_string()).or_default() += 1;
            } else {
                retained.push(candidate);
            }
        }
        retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trialscope_core::{SourceKind, Specialty};

    use crate::dates::search_window;
    use crate::detection::assess_candidate;
    use crate::error::{Result, ScienceError};

    struct StaticSource {
        kind: SourceKind,
        candidates: Vec<CandidateRecord>,
        fail: bool,
    }

    impl StaticSource {
        fn boxed(kind: SourceKind, candidates: Vec<CandidateRecord>) -> Box<dyn CandidateSource> {
            Box::new(Self {
                kind,
                candidates,
                fail: false,
            })
        }
    }

    impl CandidateSource for StaticSource {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        fn fetch(&self, _window: &SearchWindow) -> Result<Vec<CandidateRecord>> {
            if self.fail {
                return Err(ScienceError::SourceUnavailable(self.kind.name().to_string()));
            }
            Ok(self.candidates.clone())
        }
    }

    fn window() -> SearchWindow {
        search_window(30, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
    }

    fn assessed(mut candidate: CandidateRecord) -> CandidateRecord {
        candidate.rct = assess_candidate(&candidate);
        candidate
    }

    fn trial(source: SourceKind, title: &str) -> CandidateRecord {
        assessed(CandidateRecord::new(source, title))
    }

    #[test]
    fn end_to_end_three_sources_collapse_into_one_cardiology_record() {
        let mut a = CandidateRecord::new(
            SourceKind::PubMed,
            "Effect of Drug A: A Randomized Controlled Trial",
        );
        a.identifiers.pmid = Some("111".to_string());
        a.identifiers.doi = Some("10.1/x".to_string());
        a.metadata.journal = Some("Circulation".to_string());
        a.metadata.authors = vec!["Smith, John".to_string()];
        a.metadata.publication_year = Some(2024);

        let mut b = CandidateRecord::new(
            SourceKind::Crossref,
            "Effect of drug A: a randomized controlled trial",
        );
        b.identifiers.doi = Some("10.1/X".to_string());
        b.metadata.publication_year = Some(2024);

        let mut c = CandidateRecord::new(
            SourceKind::OpenAlex,
            "The Effect of Drug A: A Randomized Controlled Trial",
        );
        c.metadata.authors = vec!["J. Smith".to_string()];
        c.metadata.publication_year = Some(2024);

        let pipeline = RunPipeline::new(AppConfig::default())
            .with_source(StaticSource::boxed(SourceKind::PubMed, vec![assessed(a)]))
            .with_source(StaticSource::boxed(SourceKind::Crossref, vec![assessed(b)]))
            .with_source(StaticSource::boxed(SourceKind::OpenAlex, vec![assessed(c)]));

        let output = pipeline.run(&window());
        assert_eq!(output.records.len(), 1);

        let record = &output.records[0];
        assert_eq!(
            record.sources_found_in,
            vec![SourceKind::PubMed, SourceKind::Crossref, SourceKind::OpenAlex]
        );
        assert_eq!(record.metadata.journal.as_deref(), Some("Circulation"));
        assert_eq!(record.identifiers.pmid.as_deref(), Some("111"));
        assert_eq!(record.classification.topic, Specialty::Cardiology);
        assert!(record.classification.rationale.contains("journal:Circulation"));

        assert_eq!(output.summary.total_retrieved, 3);
        assert_eq!(output.summary.deduplicated, 1);
        assert_eq!(output.summary.merges, 2);
        assert_eq!(output.summary.by_topic.get("Cardiology"), Some(&1));
    }

    #[test]
    fn excludes_non_rcts_and_preprints() {
        let mut preprint = trial(SourceKind::EuropePmc, "A Randomized Controlled Trial of Y");
        preprint.metadata.is_preprint = true;
        let candidates = vec![
            trial(SourceKind::EuropePmc, "A Randomized Controlled Trial of X"),
            trial(SourceKind::EuropePmc, "Retrospective cohort study of Z"),
            preprint,
        ];

        let pipeline = RunPipeline::new(AppConfig::default())
            .with_source(StaticSource::boxed(SourceKind::EuropePmc, candidates.clone()));
        let summary = pipeline.run(&window()).summary;
        assert_eq!(summary.per_source.get("Europe PMC"), Some(&1));
        assert_eq!(summary.excluded.get(EXCLUDED_NOT_RCT), Some(&1));
        assert_eq!(summary.excluded.get(EXCLUDED_PREPRINT), Some(&1));

        let mut config = AppConfig::default();
        config.pipeline.include_preprints = true;
        let pipeline = RunPipeline::new(config)
            .with_source(StaticSource::boxed(SourceKind::EuropePmc, candidates));
        let summary = pipeline.run(&window()).summary;
        assert_eq!(summary.per_source.get("Europe PMC"), Some(&2));
        assert_eq!(summary.excluded.get(EXCLUDED_PREPRINT), None);
    }

    #[test]
    fn failing_source_counts_as_zero() {
        let failing = Box::new(StaticSource {
            kind: SourceKind::Scopus,
            candidates: Vec::new(),
            fail: true,
        });
        let pipeline = RunPipeline::new(AppConfig::default())
            .with_source(failing)
            .with_source(StaticSource::boxed(
                SourceKind::PubMed,
                vec![trial(SourceKind::PubMed, "A Randomized Controlled Trial of X")],
            ));

        let output = pipeline.run(&window());
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.summary.per_source.get("Scopus"), Some(&0));
        assert_eq!(output.summary.failed_sources, vec!["Scopus".to_string()]);
    }

    #[test]
    fn honours_record_limit_and_source_allow_list() {
        let candidates = vec![
            trial(SourceKind::PubMed, "A Randomized Controlled Trial of A"),
            trial(SourceKind::PubMed, "A Randomized Controlled Trial of B"),
            trial(SourceKind::PubMed, "A Randomized Controlled Trial of C"),
        ];
        let mut config = AppConfig::default();
        config.pipeline.max_records_per_source = Some(2);
        config.pipeline.sources = Some(vec!["pubmed".to_string()]);

        let pipeline = RunPipeline::new(config)
            .with_source(StaticSource::boxed(SourceKind::PubMed, candidates.clone()))
            .with_source(StaticSource::boxed(SourceKind::Crossref, candidates));

        let summary = pipeline.run(&window()).summary;
        assert_eq!(summary.per_source.get("PubMed"), Some(&2));
        assert!(!summary.per_source.contains_key("Crossref"));
        assert_eq!(summary.total_retrieved, 2);
    }
}
