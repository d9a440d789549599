use anyhow::{Context, Result};

use crate::{
    table::RawTable,
    tabula_wrapper::{self, ExtractionRequest},
};

/// Single threaded implementation of [tabula_wrapper::TableExtractor].
///
/// Must be created and run on the thread that attached to the JVM.
pub struct SingleThreadedTabulaExtractor<'env> {
    tabula_env: tabula::TabulaEnv<'env>,
}

impl<'env> SingleThreadedTabulaExtractor<'env> {
    /// Creates a [SingleThreadedTabulaExtractor] with the given [tabula::TabulaEnv].
    pub fn new(tabula_env: tabula::TabulaEnv<'env>) -> Self {
        Self { tabula_env }
    }
}

impl tabula_wrapper::TableExtractor for SingleThreadedTabulaExtractor<'_> {
    fn extract_tables(&self, request: &ExtractionRequest) -> Result<Vec<RawTable>> {
        // No page areas and no page list covers the whole document.
        let tabula = self
            .tabula_env
            .configure_tabula(
                None,
                None,
                tabula::OutputFormat::Json,
                request.guess,
                request.method.to_tabula_extraction_method(),
                false,
                None,
            )
            .context("configuring Tabula to extract tables")?;

        let extracted_file = tempfile::NamedTempFile::new()
            .context("creating temporary file for extracting PDF table data")?;
        tabula
            .parse_document_into(&request.pdf_path, extracted_file.path())
            .with_context(|| format!("extracting tables from {:?}", request.pdf_path))?;

        let tables = tabula_wrapper::parse_table_set(extracted_file)?;
        log::debug!(
            "Extracted {} tables from {:?}.",
            tables.len(),
            request.pdf_path
        );
        Ok(tables)
    }
}
