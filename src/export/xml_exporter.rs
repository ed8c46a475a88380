use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use tracing::debug;

/// Export rows to XML under a configurable root/item tag pair.
///
/// Rows are serialized by a generic recursion over the JSON value model:
/// mappings become child elements named by key, lists become a wrapper
/// element with one `item` child per entry, scalars become text content,
/// and null renders as empty text.
pub fn export_xml(rows: &[Value], path: &Path, root_tag: &str, item_tag: &str) -> Result<()> {
    debug!("Exporting {} records to XML: {}", rows.len(), path.display());

    let file = File::create(path)?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(root_tag)))?;
    for row in rows {
        write_value(&mut writer, item_tag, row)?;
    }
    writer.write_event(Event::End(BytesEnd::new(root_tag)))?;

    writer.into_inner().flush()?;
    Ok(())
}

/// Serialize one JSON value as an element named `tag`
fn write_value<W: Write>(writer: &mut Writer<W>, tag: &str, value: &Value) -> Result<()> {
    match value {
        Value::Object(fields) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, child) in fields {
                write_value(writer, key, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        Value::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for item in items {
                write_value(writer, "item", item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        Value::Null => write_text_element(writer, tag, "")?,
        Value::String(text) => write_text_element(writer, tag, text)?,
        Value::Number(number) => write_text_element(writer, tag, &number.to_string())?,
        Value::Bool(flag) => write_text_element(writer, tag, &flag.to_string())?,
    }
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
