use std::fs::File;
use std::io::Write;
use std::path::Path;

use trialscope_core::CanonicalRecord;

use super::{OUTPUT_COLUMNS, record_row};
use crate::error::Result;

pub fn write_csv<W: Write>(writer: W, records: &[CanonicalRecord], delimiter: &str) -> Result<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        csv_writer.write_record(record_row(record, delimiter))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `records` to `path`, creating parent directories.
pub fn save_csv(path: &Path, records: &[CanonicalRecord], delimiter: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_csv(File::create(path)?, records, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use trialscope_core::{CandidateRecord, SourceKind};

    fn sample() -> CanonicalRecord {
        let mut candidate = CandidateRecord::new(SourceKind::OpenAlex, "Drug A, a trial");
        candidate.metadata.keywords = vec!["asthma".to_string(), "inhaler".to_string()];
        CanonicalRecord::from_candidate(candidate)
    }

    #[test]
    fn writes_header_and_quoted_rows() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[sample()], "; ").unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next().unwrap(), OUTPUT_COLUMNS.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("OpenAlex,OpenAlex,"));
        assert!(row.contains("\"Drug A, a trial\""));
        assert!(row.contains("asthma; inhaler"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("rcts.csv");
        save_csv(&path, &[sample(), sample()], "; ").unwrap();

        let mut reader = ::csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 2);
    }
}
