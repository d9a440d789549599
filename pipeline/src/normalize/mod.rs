//! Reconstructs typed transaction records from a transactions table.
//!
//! The PDF renderer merges several logical fields into each visual column, and offsets some
//! columns' data by an extra sub-header row. Rather than trying to reassemble rows, each column is
//! parsed on its own into the output fields it carries, driven by [TRANSACTION_COLUMNS]. The
//! [RecordBuilder] then checks that every field came out with the same number of values before
//! pairing them into records.


use crate::{
    config::Config,
    error::{CellShapeReason, NormalizeError},
    parseutil,
    record::{Amount, NetProceeds, RecordBuilder, TransactionRecord},
    table::RawTable,
};

/// Row holding the column labels.
pub const LABEL_ROW: usize = 1;

/// Column holding the transaction ID, whose presence marks the first row of a transaction.
const TRANSACTION_ID_COLUMN: usize = 0;

/// Declarative description of one column of a transactions table.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSpec {
    pub index: usize,
    /// Expected text of the column's cell in [LABEL_ROW].
    pub label: &'static str,
    /// First row holding data, after any header fragments.
    pub first_data_row: usize,
    pub selection: RowSelection,
    pub parser: ColumnParser,
}

/// Which cells of a column, from its first data row on, are passed to its parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowSelection {
    /// Every non-empty cell.
    NonEmpty,
    /// The cell in every row that has a transaction ID, empty or not.
    WithTransactionId,
}

/// How the selected cells of a column become output values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnParser {
    /// Verbatim text as the transaction ID.
    TransactionId,
    /// Verbatim text as the execution date.
    ExecutionDate,
    /// `<type> <quantity>`.
    TypeAndQuantity,
    /// Verbatim text as the order type, if any.
    OrderType,
    /// Validated header only.
    Discard,
    /// `<price> <currency> <cost> <currency>`.
    PriceAndCost,
    /// Alternating `<tax> <currency>` and `<fee> <currency>` entries.
    TaxesAndFees,
    /// `<amount> <home currency>` or `<units>`.
    CashOrUnits,
}

/// The columns of a transactions table, in order.
pub const TRANSACTION_COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec {
        index: 0,
        label: "Transaction ID",
        first_data_row: 2,
        selection: RowSelection::NonEmpty,
        parser: ColumnParser::TransactionId,
    },
    ColumnSpec {
        index: 1,
        label: "Execution date",
        first_data_row: 2,
        selection: RowSelection::NonEmpty,
        parser: ColumnParser::ExecutionDate,
    },
    ColumnSpec {
        index: 2,
        label: "Transaction type Quantity",
        first_data_row: 2,
        selection: RowSelection::NonEmpty,
        parser: ColumnParser::TypeAndQuantity,
    },
    ColumnSpec {
        index: 3,
        label: "Order type",
        first_data_row: 2,
        selection: RowSelection::WithTransactionId,
        parser: ColumnParser::OrderType,
    },
    ColumnSpec {
        index: 4,
        label: "Exchange",
        first_data_row: 2,
        selection: RowSelection::NonEmpty,
        parser: ColumnParser::Discard,
    },
    // Row 2 holds the "cost" half of the label.
    ColumnSpec {
        index: 5,
        label: "Execution price Option execution",
        first_data_row: 3,
        selection: RowSelection::NonEmpty,
        parser: ColumnParser::PriceAndCost,
    },
    // The label is cut short from "Taxes / Fees", with the rest in row 2.
    ColumnSpec {
        index: 6,
        label: "Taxes /",
        first_data_row: 3,
        selection: RowSelection::NonEmpty,
        parser: ColumnParser::TaxesAndFees,
    },
    // Likewise from "Cash / Units".
    ColumnSpec {
        index: 7,
        label: "Cash /",
        first_data_row: 3,
        selection: RowSelection::NonEmpty,
        parser: ColumnParser::CashOrUnits,
    },
];

/// A cell selected for parsing, and the row it came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SelectedCell<'a> {
    pub row: usize,
    pub text: Option<&'a str>,
    /// Whether the row starts a transaction.
    pub has_transaction_id: bool,
}

/// Normalizes a transactions table into one record per transaction.
///
/// All column labels are checked before any data is parsed, so a table from a changed layout fails
/// without producing anything.
pub fn normalize_transaction_table(
    table: &RawTable,
    config: &Config,
) -> Result<Vec<TransactionRecord>, NormalizeError> {
    for column in &TRANSACTION_COLUMNS {
        column.check_label(table)?;
    }

    let mut builder = RecordBuilder::default();
    for column in &TRANSACTION_COLUMNS {
        let cells = column.select_cells(table);
        column.parse(&cells, &mut builder, config)?;
    }

    let records = builder.build()?;
    log::debug!("Normalized {} transactions.", records.len());
    Ok(records)
}

impl ColumnSpec {
    /// Checks that the column's label is the expected one.
    pub fn check_label(&self, table: &RawTable) -> Result<(), NormalizeError> {
        let actual = table.cell(LABEL_ROW, self.index);
        if actual == Some(self.label) {
            Ok(())
        } else {
            Err(NormalizeError::HeaderMismatch {
                index: self.index,
                expected: self.label,
                actual: actual.map(str::to_string),
            })
        }
    }

    /// Selects the column's data cells according to [Self::selection].
    pub fn select_cells<'a>(&self, table: &'a RawTable) -> Vec<SelectedCell<'a>> {
        let cells = table
            .column_from(self.index, self.first_data_row)
            .map(|(row, text)| SelectedCell {
                row,
                text,
                has_transaction_id: table.cell(row, TRANSACTION_ID_COLUMN).is_some(),
            });
        match self.selection {
            RowSelection::NonEmpty => cells.filter(|cell| cell.text.is_some()).collect(),
            RowSelection::WithTransactionId => {
                cells.filter(|cell| cell.has_transaction_id).collect()
            }
        }
    }

    /// Parses the selected cells into `builder`.
    pub fn parse(
        &self,
        cells: &[SelectedCell],
        builder: &mut RecordBuilder,
        config: &Config,
    ) -> Result<(), NormalizeError> {
        match self.parser {
            ColumnParser::TransactionId => {
                for (_, text) in non_empty(cells) {
                    builder.push_transaction_id(text.to_string());
                }
            }
            ColumnParser::ExecutionDate => {
                for (_, text) in non_empty(cells) {
                    builder.push_execution_date(text.to_string());
                }
            }
            ColumnParser::TypeAndQuantity => {
                for (row, text) in non_empty(cells) {
                    let [transaction_type, quantity] = self.tokens::<2>(row, text)?;
                    let quantity = self.number(row, text, quantity)?;
                    builder.push_type_and_quantity(transaction_type.to_string(), quantity);
                }
            }
            ColumnParser::OrderType => {
                for cell in cells {
                    builder.push_order_type(cell.text.map(str::to_string));
                }
            }
            ColumnParser::Discard => {}
            ColumnParser::PriceAndCost => {
                for (row, text) in non_empty(cells) {
                    let [price, price_currency, cost, cost_currency] =
                        self.tokens::<4>(row, text)?;
                    let price = Amount::new(self.number(row, text, price)?, price_currency);
                    let cost = Amount::new(self.number(row, text, cost)?, cost_currency);
                    builder.push_price_and_cost(price, cost);
                }
            }
            ColumnParser::TaxesAndFees => self.parse_taxes_and_fees(cells, builder)?,
            ColumnParser::CashOrUnits => {
                for (row, text) in non_empty(cells) {
                    let net_proceeds = self.cash_or_units(row, text, &config.home_currency)?;
                    builder.push_net_proceeds(net_proceeds);
                }
            }
        }
        Ok(())
    }

    /// Splits the taxes and fees column between the two fields.
    ///
    /// The renderer merges the "Taxes" and "Fees" columns into one, giving each transaction a tax
    /// entry on its first row followed by a fee entry on the row below. Nothing in an entry says
    /// which of the two it is, so the field is decided by position, and the position must agree
    /// with the row: a tax on a row with a transaction ID, a fee on a row without one. If the
    /// column ends on a tax entry, that last transaction has no fee.
    fn parse_taxes_and_fees(
        &self,
        cells: &[SelectedCell],
        builder: &mut RecordBuilder,
    ) -> Result<(), NormalizeError> {
        let mut num_taxes = 0;
        let mut num_fees = 0;
        let entries = cells
            .iter()
            .filter_map(|cell| cell.text.map(|text| (cell, text)));
        for (position, (cell, text)) in entries.enumerate() {
            let expected = TaxOrFee::at_position(position);
            if cell.has_transaction_id != (expected == TaxOrFee::Tax) {
                return Err(NormalizeError::TaxFeeMisaligned {
                    row: cell.row,
                    cell: text.to_string(),
                    expected,
                });
            }
            let amount = self.amount(cell.row, text)?;
            match expected {
                TaxOrFee::Tax => {
                    builder.push_tax(amount);
                    num_taxes += 1;
                }
                TaxOrFee::Fee => {
                    builder.push_fee(Some(amount));
                    num_fees += 1;
                }
            }
        }
        if num_taxes > num_fees {
            builder.push_fee(None);
        }
        Ok(())
    }

    /// Parses a `<value> <currency>` entry. The value may itself be split by whitespace, as in
    /// `1 234.50 USD`.
    fn amount(&self, row: usize, text: &str) -> Result<Amount, NormalizeError> {
        let (value, currency) = parseutil::split_last_token(text)
            .ok_or_else(|| self.shape_error(row, text, CellShapeReason::MissingCurrency))?;
        let value: String = value.split_whitespace().collect();
        Ok(Amount::new(self.number(row, text, &value)?, currency))
    }

    fn cash_or_units(
        &self,
        row: usize,
        text: &str,
        home_currency: &str,
    ) -> Result<NetProceeds, NormalizeError> {
        if let Some((value, currency)) = parseutil::split_last_token(text) {
            if currency == home_currency {
                let value = self.number(row, text, value)?;
                return Ok(NetProceeds::Cash(Amount::new(value, currency)));
            }
        }
        match parseutil::parse_number(text) {
            Some(units) => Ok(NetProceeds::Units(units)),
            None => Err(self.shape_error(
                row,
                text,
                CellShapeReason::NotCashOrUnits {
                    home_currency: home_currency.to_string(),
                },
            )),
        }
    }

    fn tokens<'t, const N: usize>(
        &self,
        row: usize,
        text: &'t str,
    ) -> Result<[&'t str; N], NormalizeError> {
        parseutil::split_tokens::<N>(text).ok_or_else(|| {
            self.shape_error(row, text, CellShapeReason::TokenCount { expected: N })
        })
    }

    fn number(&self, row: usize, text: &str, token: &str) -> Result<f64, NormalizeError> {
        parseutil::parse_number(token).ok_or_else(|| {
            self.shape_error(
                row,
                text,
                CellShapeReason::NotANumber {
                    token: token.to_string(),
                },
            )
        })
    }

    fn shape_error(&self, row: usize, text: &str, reason: CellShapeReason) -> NormalizeError {
        NormalizeError::CellShape {
            index: self.index,
            label: self.label,
            row,
            cell: text.to_string(),
            reason,
        }
    }
}

/// Output field for an entry of the taxes and fees column.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum TaxOrFee {
    #[strum(serialize = "tax")]
    Tax,
    #[strum(serialize = "fee")]
    Fee,
}

impl TaxOrFee {
    /// Field for the entry at `position` among the column's non-empty cells.
    pub fn at_position(position: usize) -> Self {
        if position % 2 == 0 {
            TaxOrFee::Tax
        } else {
            TaxOrFee::Fee
        }
    }
}

fn non_empty<'a>(cells: &'a [SelectedCell<'a>]) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    cells
        .iter()
        .filter_map(|cell| cell.text.map(|text| (cell.row, text)))
}
