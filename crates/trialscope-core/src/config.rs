use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::models::{SourceKind, Specialty};

/// Root application configuration, loaded from `~/.config/trialscope/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub dedup: DedupConfig,
    pub classification: ClassificationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Length of the publication window handed to candidate sources.
    pub days: u32,
    pub include_preprints: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_records_per_source: Option<usize>,
    /// Source keys allowed to contribute. `None` admits every source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub title_similarity_threshold: f64,
    /// Register identifiers gained through a merge as exact-match keys.
    pub retroactive_indexing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub min_score: u32,
    pub weights: ClassificationWeights,
    /// Maximum number of title evidence strings kept per specialty.
    pub evidence_cap: usize,
    /// Tie-break order, most specific first. Labels as in the output.
    pub preference_order: Vec<String>,
    /// MeSH terms skipped on top of the built-in ignore list.
    pub mesh_ignore: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationWeights {
    pub mesh: u32,
    pub field: u32,
    pub keyword: u32,
    pub title: u32,
    #[serde(rename = "abstract")]
    pub abstract_text: u32,
    pub journal: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Joins list-valued columns in tabular output.
    pub delimiter: String,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            days: 30,
            include_preprints: false,
            max_records_per_source: None,
            sources: None,
        }
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            title_similarity_threshold: 0.90,
            retroactive_indexing: true,
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            min_score: 3,
            weights: ClassificationWeights::default(),
            evidence_cap: 5,
            preference_order: Specialty::default_preference_order()
                .iter()
                .map(|s| s.label().to_string())
                .collect(),
            mesh_ignore: Vec::new(),
        }
    }
}

impl Default for ClassificationWeights {
    fn default() -> Self {
        Self {
            mesh: 3,
            field: 2,
            keyword: 2,
            title: 2,
            abstract_text: 1,
            journal: 4,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: "; ".to_string(),
        }
    }
}

// ─── Resolved values ───────────────────────────────────────

impl PipelineConfig {
    /// True when `source` may contribute under the configured allow-list.
    pub fn allows(&self, source: SourceKind) -> bool {
        match &self.sources {
            None => true,
            Some(keys) => keys.iter().any(|key| {
                key.parse::<SourceKind>()
                    .map(|kind| kind == source)
                    .unwrap_or(false)
            }),
        }
    }
}

impl DedupConfig {
    /// Similarity threshold clamped into `0.0..=1.0`.
    pub fn threshold(&self) -> f64 {
        if self.title_similarity_threshold.is_nan() {
            return DedupConfig::default().title_similarity_threshold;
        }
        self.title_similarity_threshold.clamp(0.0, 1.0)
    }
}

impl ClassificationConfig {
    /// Parses `preference_order` into specialties. Unknown labels are skipped
    /// with a warning; specialties the list omits follow in table order.
    pub fn resolved_preference_order(&self) -> Vec<Specialty> {
        let mut order: Vec<Specialty> = Vec::with_capacity(Specialty::SCORED.len());
        for label in &self.preference_order {
            match label.parse::<Specialty>() {
                Ok(Specialty::OtherUnclear) => {
                    warn!("Ignoring Other/Unclear in classification.preference_order");
                }
                Ok(specialty) if !order.contains(&specialty) => order.push(specialty),
                Ok(_) => {}
                Err(_) => warn!(label = %label, "Unknown specialty in classification.preference_order"),
            }
        }
        for specialty in Specialty::SCORED {
            if !order.contains(&specialty) {
                order.push(specialty);
            }
        }
        order
    }

    /// Threshold is never allowed to drop to zero, so an empty record stays
    /// Other/Unclear.
    pub fn threshold(&self) -> u32 {
        self.min_score.max(1)
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/trialscope/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("TRIALSCOPE_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("trialscope")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the standard path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pipeline.days, 30);
        assert_eq!(cfg.dedup.title_similarity_threshold, 0.90);
        assert!(cfg.dedup.retroactive_indexing);
        assert_eq!(cfg.classification.min_score, 3);
        assert_eq!(cfg.classification.weights.journal, 4);
        assert_eq!(cfg.output.delimiter, "; ");
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.pipeline.max_records_per_source = Some(50);
        cfg.classification.min_score = 4;
        cfg.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.pipeline.max_records_per_source, Some(50));
        assert_eq!(loaded.classification.min_score, 4);
        assert_eq!(
            loaded.classification.preference_order,
            cfg.classification.preference_order
        );
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(cfg.pipeline.days, 30);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[classification]\nmin_score = 4\n\n[classification.weights]\njournal = 3\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.classification.min_score, 4);
        assert_eq!(cfg.classification.weights.journal, 3);
        assert_eq!(cfg.classification.weights.mesh, 3);
        assert_eq!(cfg.dedup.title_similarity_threshold, 0.90);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dedup\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn preference_order_appends_missing_specialties() {
        let cfg = ClassificationConfig {
            preference_order: vec![
                "Emergency Medicine".to_string(),
                "Podiatry".to_string(),
                "Cardiology".to_string(),
            ],
            ..Default::default()
        };

        let order = cfg.resolved_preference_order();
        assert_eq!(order.len(), Specialty::SCORED.len());
        assert_eq!(order[0], Specialty::EmergencyMedicine);
        assert_eq!(order[1], Specialty::Cardiology);
        assert_eq!(order[2], Specialty::Gastroenterology);
    }

    #[test]
    fn thresholds_are_clamped() {
        let dedup = DedupConfig {
            title_similarity_threshold: 1.7,
            ..Default::default()
        };
        assert_eq!(dedup.threshold(), 1.0);

        let classification = ClassificationConfig {
            min_score: 0,
            ..Default::default()
        };
        assert_eq!(classification.threshold(), 1);
    }

    #[test]
    fn source_allow_list() {
        let mut pipeline = PipelineConfig::default();
        assert!(pipeline.allows(SourceKind::Scopus));

        pipeline.sources = Some(vec!["pubmed".to_string(), "OpenAlex".to_string()]);
        assert!(pipeline.allows(SourceKind::PubMed));
        assert!(pipeline.allows(SourceKind::OpenAlex));
        assert!(!pipeline.allows(SourceKind::Crossref));
    }
}
