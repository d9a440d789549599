use crate::{normalize::TaxOrFee, record::Field};

/// Failure to normalize a transactions table.
///
/// None of these are recoverable: each means the table no longer looks the way the normalizer
/// expects, and any output from it could be misaligned.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// A column label differs from the expected one, so fixed column offsets no longer apply.
    #[error("column {index}: expected header {expected:?}, got {}", describe_cell(.actual))]
    HeaderMismatch {
        index: usize,
        expected: &'static str,
        actual: Option<String>,
    },
    /// A data cell does not have the shape its column requires.
    #[error("column {index} ({label:?}) row {row}: {reason}, got {cell:?}")]
    CellShape {
        index: usize,
        label: &'static str,
        row: usize,
        cell: String,
        reason: CellShapeReason,
    },
    /// An entry of the taxes and fees column is not on the kind of row its position implies, so
    /// taxes and fees can no longer be told apart.
    #[error(
        "taxes and fees column row {row}: expected a {expected} entry on a row {}, got {cell:?}",
        describe_placement(*.expected)
    )]
    TaxFeeMisaligned {
        row: usize,
        cell: String,
        expected: TaxOrFee,
    },
    /// Output fields were assembled with different numbers of values.
    #[error("output field lengths differ: {}", describe_lengths(.lengths))]
    LengthMismatch { lengths: Vec<(Field, usize)> },
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CellShapeReason {
    #[error("expected {expected} whitespace separated tokens")]
    TokenCount { expected: usize },
    #[error("expected a number in {token:?}")]
    NotANumber { token: String },
    #[error("expected a value followed by a currency code")]
    MissingCurrency,
    #[error("expected an amount in {home_currency} or a bare number of units")]
    NotCashOrUnits { home_currency: String },
}

fn describe_cell(cell: &Option<String>) -> String {
    match cell {
        Some(text) => format!("{text:?}"),
        None => "an empty cell".to_string(),
    }
}

fn describe_placement(entry: TaxOrFee) -> &'static str {
    match entry {
        TaxOrFee::Tax => "with a transaction ID",
        TaxOrFee::Fee => "without a transaction ID",
    }
}

fn describe_lengths(lengths: &[(Field, usize)]) -> String {
    lengths
        .iter()
        .map(|(field, len)| format!("{field}={len}"))
        .collect::<Vec<_>>()
        .join(", ")
}
