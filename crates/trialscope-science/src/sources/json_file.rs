use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use trialscope_core::{CandidateRecord, SourceKind};

use super::{CandidateSource, complete_candidate};
use crate::dates::{SearchWindow, parse_publication_date};
use crate::error::{Result, ScienceError};

/// Candidates exported by a connector as a JSON array or JSON lines. The
/// file is attributed to one source, overriding any `source` field inside.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    kind: SourceKind,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Parses a `NAME=PATH` command-line pair.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let (name, path) = spec
            .split_once('=')
            .filter(|(name, path)| !name.trim().is_empty() && !path.trim().is_empty())
            .ok_or_else(|| ScienceError::Parse(format!("expected NAME=PATH, got '{spec}'")))?;
        let kind: SourceKind = name.parse()?;
        Ok(Self::new(kind, path.trim()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_values(&self, contents: &str) -> Result<Vec<Value>> {
        let trimmed = contents.trim_start();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        if trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(ScienceError::from))
            .collect()
    }

    fn to_candidate(&self, mut value: Value) -> Result<CandidateRecord> {
        let object = value
            .as_object_mut()
            .ok_or_else(|| ScienceError::Parse(format!("{}: expected a JSON object", self.path.display())))?;
        object.insert("source".to_string(), Value::String(self.kind.name().to_string()));
        let candidate: CandidateRecord = serde_json::from_value(value)?;
        Ok(complete_candidate(candidate))
    }
}

impl CandidateSource for JsonFileSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn fetch(&self, window: &SearchWindow) -> Result<Vec<CandidateRecord>> {
        debug!(
            path = %self.path.display(),
            start = %window.start,
            end = %window.end,
            "Reading candidate file"
        );
        let contents = std::fs::read_to_string(&self.path)?;
        let candidates = self
            .parse_values(&contents)?
            .into_iter()
            .map(|value| self.to_candidate(value))
            .collect::<Result<Vec<_>>>()?;

        let outside = candidates
            .iter()
            .filter_map(|c| c.metadata.publication_date.as_deref())
            .filter_map(parse_publication_date)
            .filter(|date| !window.contains(date.date))
            .count();
        if outside > 0 {
            debug!("{}: {outside} candidates dated outside the search window", self.kind);
        }

        info!("{}: read {} candidate records", self.kind, candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn window() -> SearchWindow {
        crate::dates::search_window(30, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
    }

    #[test]
    fn reads_json_array_and_overrides_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pubmed.json");
        std::fs::write(
            &path,
            r#"[
                {"source": "Crossref", "pmid": "111", "title": "A Randomized Controlled Trial of X"},
                {"title": "Editorial", "rct_flag": false, "rct_detection_method": "Publication type filter"}
            ]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(SourceKind::PubMed, &path);
        let candidates = source.fetch(&window()).unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.source == SourceKind::PubMed));
        assert!(candidates[0].rct.is_rct);
        assert_eq!(candidates[1].rct.method, "Publication type filter");
    }

    #[test]
    fn reads_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("openalex.jsonl");
        std::fs::write(
            &path,
            "{\"title\": \"First\", \"openalex_id\": \"W1\"}\n\n{\"title\": \"Second\"}\n",
        )
        .unwrap();

        let candidates = JsonFileSource::new(SourceKind::OpenAlex, &path)
            .fetch(&window())
            .unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].identifiers.openalex_id.as_deref(), Some("W1"));
        assert!(!candidates[1].rct.is_rct);
    }

    #[test]
    fn keeps_candidates_dated_outside_window() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crossref.jsonl");
        std::fs::write(
            &path,
            "{\"title\": \"Old\", \"publication_date\": \"2019-01-05\"}\n\
             {\"title\": \"New\", \"publication_date\": \"2024/03/20\"}\n",
        )
        .unwrap();

        let candidates = JsonFileSource::new(SourceKind::Crossref, &path)
            .fetch(&window())
            .unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].metadata.publication_year, Some(2019));
        assert!(!window().contains(NaiveDate::from_ymd_opt(2019, 1, 5).unwrap()));
        assert_eq!(candidates[1].metadata.publication_date.as_deref(), Some("2024-03-20"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileSource::new(SourceKind::Crossref, dir.path().join("none.json"));
        assert!(matches!(source.fetch(&window()), Err(ScienceError::Io(_))));
    }

    #[test]
    fn non_object_entries_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let source = JsonFileSource::new(SourceKind::Crossref, &path);
        assert!(matches!(source.fetch(&window()), Err(ScienceError::Parse(_))));
    }

    #[test]
    fn parses_name_path_specs() {
        let source = JsonFileSource::from_spec("europepmc=/tmp/epmc.json").unwrap();
        assert_eq!(source.kind(), SourceKind::EuropePmc);
        assert_eq!(source.path(), Path::new("/tmp/epmc.json"));
        assert_eq!(source.name(), "Europe PMC");

        assert!(JsonFileSource::from_spec("pubmed").is_err());
        assert!(JsonFileSource::from_spec("nowhere=/tmp/x.json").is_err());
    }
}
