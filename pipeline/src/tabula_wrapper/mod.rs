pub mod singlethreaded;

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    config::{Config, TabulaExtractionMethod},
    table::{RawTable, Row},
};

/// Extracts every table from a PDF file.
///
/// Separates the processing from Tabula, which needs a JVM.
pub trait TableExtractor {
    fn extract_tables(&self, request: &ExtractionRequest) -> Result<Vec<RawTable>>;
}

/// Single request to a [TableExtractor] to extract all tables from all pages of a PDF file.
#[derive(Clone, Debug)]
pub struct ExtractionRequest {
    pub pdf_path: PathBuf,
    pub guess: bool,
    pub method: TabulaExtractionMethod,
}

impl ExtractionRequest {
    /// Creates a request for `pdf_path` using the extraction settings in `config`.
    pub fn new(pdf_path: &Path, config: &Config) -> Self {
        Self {
            pdf_path: pdf_path.to_owned(),
            guess: config.guess,
            method: config.extraction_method,
        }
    }
}

/// Parses Tabula's JSON output into tables.
pub fn parse_table_set<R: io::Read>(reader: R) -> Result<Vec<RawTable>> {
    let table_set: JsonTableSet =
        serde_json::from_reader(reader).context("parsing extracted PDF table data")?;
    let tables = table_set
        .0
        .into_iter()
        .enumerate()
        .map(|(index, table)| {
            log::debug!(
                "#{index}: {} rows on page {}.",
                table.data.len(),
                table.page_number
            );
            RawTable::from(table)
        })
        .collect();
    Ok(tables)
}

/// A sequence of extracted tables from a PDF file.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct JsonTableSet(pub Vec<JsonTable>);

/// A single extracted table from a PDF file.
#[derive(Deserialize, Debug)]
pub struct JsonTable {
    /// Only used for logging.
    pub page_number: i32,
    pub data: Vec<JsonRow>,
}

/// A single extracted table row from a PDF file.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct JsonRow(pub Vec<JsonCell>);

/// A single extracted table cell from a PDF file. Only the text is of interest.
#[derive(Deserialize, Debug)]
pub struct JsonCell {
    pub text: String,
}

/// The first row becomes the header, the rest become data rows.
impl From<JsonTable> for RawTable {
    fn from(value: JsonTable) -> Self {
        let mut rows = value.data.into_iter().map(Row::from);
        let header = rows.next().unwrap_or_default();
        RawTable::new(header, rows.collect())
    }
}

impl From<JsonRow> for Row {
    fn from(value: JsonRow) -> Self {
        value.0.iter().map(|cell| cell.text.as_str()).collect::<Vec<_>>().into()
    }
}
