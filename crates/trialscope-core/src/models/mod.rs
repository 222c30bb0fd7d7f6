pub mod identifiers;
pub mod record;
pub mod source;
pub mod specialty;

pub use identifiers::RecordIdentifiers;
pub use record::{
    CandidateRecord, CanonicalRecord, Classification, EvidenceField, PaperMetadata, RctAssessment,
};
pub use source::SourceKind;
pub use specialty::Specialty;
