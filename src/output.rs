//! Destinations and encodings for rendered schedules.
//!
//! Everything is written to stdout unless a path other than `-` is given.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use csv::QuoteStyle;
use serde::Serialize;

use crate::rows::Row;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn open_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(std::io::stdout()),
    })
}

/// Writes the visible rows, all columns, as RFC 4180 CSV.
pub fn write_csv<W: Write>(writer: W, headers: &[&str], rows: &[&Row]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);
    csv_writer
        .write_record(headers)
        .context("Writing CSV header")?;
    for (idx, row) in rows.iter().enumerate() {
        let record = headers
            .iter()
            .map(|header| row.get(header).unwrap_or_default());
        csv_writer
            .write_record(record)
            .with_context(|| format!("Writing CSV row {}", idx + 1))?;
    }
    csv_writer.flush().context("Flushing CSV output")?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(mut writer: W, payload: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, payload).context("Serializing JSON output")?;
    writeln!(writer).context("Writing JSON output")?;
    writer.flush().context("Flushing JSON output")?;
    Ok(())
}

pub fn write_text<W: Write>(mut writer: W, text: &str) -> Result<()> {
    writer
        .write_all(text.as_bytes())
        .context("Writing output")?;
    writer.flush().context("Flushing output")?;
    Ok(())
}
