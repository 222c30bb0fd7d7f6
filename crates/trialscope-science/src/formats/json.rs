use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use trialscope_core::CanonicalRecord;

use crate::error::Result;

pub fn write_json<W: Write>(writer: W, records: &[CanonicalRecord]) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

pub fn save_json(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
