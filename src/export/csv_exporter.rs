use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use serde_json::Value;
use tracing::debug;

/// Well-known record keys, emitted first and in this order; any other
/// keys follow lexically.
const PREFERRED_COLUMNS: &[&str] = &[
    "name",
    "profileUrl",
    "userId",
    "profileImage",
    "coverImage",
    "images",
    "userData",
    "_fetchedAt",
    "_source",
];

/// Export rows to CSV, flattening structured values to their JSON text.
///
/// Columns are the union of keys across all rows; nulls and missing keys
/// render as empty cells. An empty row set still produces a header line.
pub fn export_csv(rows: &[Value], path: &Path) -> Result<()> {
    debug!("Exporting {} records to CSV: {}", rows.len(), path.display());

    let columns = collect_columns(rows);
    if columns.is_empty() {
        // Header row with an empty column set
        std::fs::write(path, "\n")?;
        return Ok(());
    }

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    writer.write_record(&columns)?;
    for row in rows {
        let mut record = Vec::with_capacity(columns.len());
        for column in &columns {
            record.push(cell_text(row.get(column.as_str()))?);
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Union of keys across all rows: preferred keys first, the rest sorted
fn collect_columns(rows: &[Value]) -> Vec<String> {
    let mut keys: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        if let Some(object) = row.as_object() {
            keys.extend(object.keys().cloned());
        }
    }

    let mut columns: Vec<String> = PREFERRED_COLUMNS
        .iter()
        .filter(|key| keys.contains(**key))
        .map(|key| key.to_string())
        .collect();
    columns.extend(
        keys.into_iter()
            .filter(|key| !PREFERRED_COLUMNS.contains(&key.as_str())),
    );
    columns
}

fn cell_text(value: Option<&Value>) -> Result<String> {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(structured) => serde_json::to_string(structured)?,
    };
    Ok(text)
}
