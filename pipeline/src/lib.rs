//! Converts the transactions tables of an EquatePlus statement PDF into typed records.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod normalize;
pub mod output_csv;
pub mod parseutil;
pub mod record;
pub mod table;
pub mod tabula_wrapper;
#[cfg(test)]
mod tests;
#[cfg(test)]
mod testutil;

use anyhow::{Context, Result};

pub use config::Config;
pub use error::NormalizeError;
pub use record::{Field, TransactionRecord};
pub use table::RawTable;
pub use tabula_wrapper::{ExtractionRequest, TableExtractor};

/// Extracts all tables from the requested PDF and converts its transactions tables to records.
pub fn convert_pdf(
    extractor: &dyn TableExtractor,
    request: &ExtractionRequest,
    config: &Config,
) -> Result<Vec<TransactionRecord>> {
    let tables = extractor
        .extract_tables(request)
        .with_context(|| format!("extracting tables from {:?}", request.pdf_path))?;
    process_tables(&tables, config)
}

/// Converts the transactions tables among `tables` to records, in table order.
///
/// Stops at the first table that fails to normalize.
pub fn process_tables(tables: &[RawTable], config: &Config) -> Result<Vec<TransactionRecord>> {
    log::info!("Found {} tables.", tables.len());
    let classified = classify::classify_tables(tables);
    log::info!(
        "{} transactions tables, {} positions tables, {} other tables.",
        classified.transactions.len(),
        classified.num_positions,
        classified.num_other,
    );

    let record_sets = classified
        .transactions
        .iter()
        .map(|(index, table)| {
            normalize::normalize_transaction_table(table, config)
                .with_context(|| format!("normalizing transactions table #{index}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(aggregate::concat(record_sets))
}
