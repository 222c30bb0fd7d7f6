//! Specialty classification: weighted term scoring over the record's fields,
//! then a threshold and a specificity-ordered tie-break.

pub mod classifier;
pub mod tables;

pub use classifier::{Scorecard, SpecialtyClassifier, SpecialtyScore};
