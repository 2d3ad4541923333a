//! Tabular export of a record set, image column omitted.
//!
//! Column order is `Material, Properties, Pros, Cons`, one row per record,
//! header row included. Fields containing commas, quotes, or line breaks
//! are quoted so free-text prose survives the round trip.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use materio_core::record::MaterialRecordSet;

const HEADER: &str = "Material,Properties,Pros,Cons";

/// Write the CSV projection of `records` to `writer`.
pub fn write_csv<W: Write>(records: &MaterialRecordSet, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{HEADER}")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{}",
            csv_field(&record.name),
            csv_field(&record.properties),
            csv_field(&record.pros),
            csv_field(&record.cons),
        )?;
    }
    Ok(())
}

/// Write the CSV projection to a file path.
pub fn write_csv_file(records: &MaterialRecordSet, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("cannot create output file: {}", path.display()))?;
    write_csv(records, &mut file)
        .with_context(|| format!("failed writing CSV to {}", path.display()))?;
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
