use trialscope_core::{CandidateRecord, CanonicalRecord, PaperMetadata, RecordIdentifiers};

/// Folds a duplicate candidate into an existing canonical record.
pub trait MergeRecord {
    /// Mutates `self` in place and returns it for chaining. Repeating the
    /// same merge leaves the record unchanged.
    fn merge_with(&mut self, incoming: &CandidateRecord) -> &mut Self;
}

impl MergeRecord for CanonicalRecord {
    fn merge_with(&mut self, incoming: &CandidateRecord) -> &mut Self {
        if !self.sources_found_in.contains(&incoming.source) {
            self.sources_found_in.push(incoming.source);
        }
        merge_identifiers(&mut self.identifiers, &incoming.identifiers);
        merge_metadata(&mut self.metadata, &incoming.metadata);
        self
    }
}

fn merge_identifiers(target: &mut RecordIdentifiers, incoming: &RecordIdentifiers) {
    fill_if_absent(&mut target.doi, &incoming.doi);
    fill_if_absent(&mut target.pmid, &incoming.pmid);
    fill_if_absent(&mut target.pmcid, &incoming.pmcid);
    fill_if_absent(&mut target.s2_paper_id, &incoming.s2_paper_id);
    fill_if_absent(&mut target.openalex_id, &incoming.openalex_id);
    fill_if_absent(&mut target.scopus_id, &incoming.scopus_id);
    fill_if_absent(&mut target.wos_id, &incoming.wos_id);
    fill_if_absent(&mut target.dimensions_id, &incoming.dimensions_id);
}

// Title, authors, dates, preprint flag stay as the first source reported them.
fn merge_metadata(target: &mut PaperMetadata, incoming: &PaperMetadata) {
    fill_if_absent(&mut target.abstract_text, &incoming.abstract_text);
    fill_if_absent(&mut target.journal, &incoming.journal);
    fill_if_absent(&mut target.issn, &incoming.issn);
    fill_if_absent(&mut target.publisher, &incoming.publisher);
    fill_if_absent(&mut target.url, &incoming.url);
    fill_if_absent(&mut target.language, &incoming.language);

    append_unique(&mut target.mesh_terms, &incoming.mesh_terms);
    append_unique(&mut target.keywords, &incoming.keywords);
    append_unique(&mut target.fields_of_study, &incoming.fields_of_study);
}

/// First non-blank value wins and is never replaced.
fn fill_if_absent(target: &mut Option<String>, incoming: &Option<String>) {
    let has_value = target.as_deref().is_some_and(|s| !s.trim().is_empty());
    if has_value {
        return;
    }
    if let Some(value) = incoming
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        *target = Some(value.to_string());
    }
}

fn append_unique<T>(target: &mut Vec<T>, incoming: &[T])
where
    T: Clone + PartialEq,
{
    for item in incoming {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}
