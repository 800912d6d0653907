// Tabular export of extracted records

use crate::model::Record;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const CSV_COLUMNS: [&str; 6] = ["title", "id", "otype", "parent", "composition", "resultType"];

/// Write the header and one row per record.
pub fn write_records_csv<W: Write>(records: &[Record], mut out: W) -> io::Result<()> {
    write_row(&mut out, CSV_COLUMNS.iter().map(|c| Cow::Borrowed(*c)))?;

    for record in records {
        let composition = record
            .composition
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_default();
        let row = [
            Cow::Borrowed(record.title.as_str()),
            Cow::Borrowed(record.id.as_str()),
            Cow::Borrowed(record.otype.as_str()),
            Cow::Borrowed(record.parent.as_deref().unwrap_or("")),
            Cow::Owned(composition),
            Cow::Borrowed(record.result_type.as_deref().unwrap_or("")),
        ];
        write_row(&mut out, row.into_iter())?;
    }

    out.flush()
}

pub fn records_to_csv(records: &[Record]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_records_csv(records, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn save_records_csv(records: &[Record], path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_records_csv(records, BufWriter::new(file))
}

fn write_row<'a, W, I>(out: &mut W, fields: I) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = Cow<'a, str>>,
{
    for (idx, field) in fields.enumerate() {
        if idx > 0 {
            out.write_all(b",")?;
        }
        out.write_all(escape_field(&field).as_bytes())?;
    }
    out.write_all(b"\n")
}

/// Quote a field when it contains a delimiter, quote or line break.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
