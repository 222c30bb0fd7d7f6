pub mod doi;
pub mod pubmed;

pub use doi::{Doi, normalize_doi};
pub use pubmed::{normalize_pmcid, normalize_pmid, parse_pmcid, parse_pmid};
