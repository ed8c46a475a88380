use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

/// Export rows to a pretty-printed JSON array.
///
/// Two-space indent, non-ASCII characters preserved literally. An empty
/// row set produces the literal empty array.
pub fn export_json(rows: &[Value], path: &Path) -> Result<()> {
    debug!("Exporting {} records to JSON: {}", rows.len(), path.display());

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;

    Ok(())
}
