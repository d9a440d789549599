//! Writes normalized records as CSV.

use std::{fs::File, io, path::Path};

use anyhow::{Context, Result};
use strum::IntoEnumIterator;

use crate::record::{Field, TransactionRecord};

/// Writes a header row followed by one row per record.
///
/// The header is written even when there are no records.
pub fn write_records<W: io::Write>(writer: W, records: &[TransactionRecord]) -> Result<()> {
    let mut output = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(writer);

    output
        .write_record(Field::iter().map(<&'static str>::from))
        .context("writing header row")?;

    for (row_index, record) in records.iter().enumerate() {
        output
            .serialize(record)
            .with_context(|| format!("writing row index {row_index}"))?;
    }

    output.flush().context("flushing CSV output")?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes the records to it.
pub fn write_records_to_path(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating output file {path:?}"))?;
    write_records(file, records).with_context(|| format!("writing CSV to {path:?}"))
}
