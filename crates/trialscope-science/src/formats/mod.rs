//! Tabular output of classified canonical records.

pub mod csv;
pub mod json;

use trialscope_core::CanonicalRecord;

pub use self::csv::{save_csv, write_csv};
pub use self::json::{save_json, write_json};

/// Column order of tabular output.
pub const OUTPUT_COLUMNS: [&str; 24] = [
    "source_primary",
    "sources_found_in",
    "pmid",
    "pmcid",
    "doi",
    "s2_paper_id",
    "openalex_id",
    "title",
    "authors",
    "journal",
    "issn",
    "publication_date",
    "publication_year",
    "language",
    "abstract",
    "mesh_terms",
    "keywords",
    "fields_of_study",
    "url",
    "publisher",
    "rct_flag",
    "rct_detection_method",
    "topic",
    "classification_reason",
];

/// Flattens a record into cells matching [`OUTPUT_COLUMNS`]. List-valued
/// fields are joined with `delimiter`; absent values become empty cells.
pub fn record_row(record: &CanonicalRecord, delimiter: &str) -> Vec<String> {
    let ids = &record.identifiers;
    let meta = &record.metadata;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let sources: Vec<&str> = record.sources_found_in.iter().map(|s| s.name()).collect();

    vec![
        record.source_primary.name().to_string(),
        sources.join(delimiter),
        text(&ids.pmid),
        text(&ids.pmcid),
        text(&ids.doi),
        text(&ids.s2_paper_id),
        text(&ids.openalex_id),
        meta.title.clone(),
        meta.authors.join(delimiter),
        text(&meta.journal),
        text(&meta.issn),
        text(&meta.publication_date),
        meta.publication_year.map(|y| y.to_string()).unwrap_or_default(),
        text(&meta.language),
        text(&meta.abstract_text),
        meta.mesh_terms.join(delimiter),
        meta.keywords.join(delimiter),
        meta.fields_of_study.join(delimiter),
        text(&meta.url),
        text(&meta.publisher),
        record.rct.is_rct.to_string(),
        record.rct.method.clone(),
        record.classification.topic.label().to_string(),
        record.classification.rationale.clone(),
    ]
}
