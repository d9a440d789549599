use crate::{
    classify::TRANSACTIONS_CAPTION,
    normalize::LABEL_ROW,
    parseutil,
    table::RawTable,
};

/// Column labels of a transactions table, as the extractor renders them.
pub const TRANSACTION_LABELS: [&str; 8] = [
    "Transaction ID",
    "Execution date",
    "Transaction type Quantity",
    "Order type",
    "Exchange",
    "Execution price Option execution",
    "Taxes /",
    "Cash /",
];

/// Single sale, as in a statement with one transaction.
pub const SALE_ROW: [&str; 8] = [
    "TX1",
    "2021-05-01",
    "Sale 10.0",
    "Market",
    "NYSE",
    "25.5 USD 0.0 USD",
    "12.0 USD",
    "1000.0 CHF",
];

/// Continuation row holding only an entry in the taxes and fees column.
pub fn fee_row(fee: &'static str) -> [&'static str; 8] {
    let mut row = [""; 8];
    row[6] = fee;
    row
}

/// Builds a transactions table with the header fragments the renderer produces, followed by
/// `data_rows` starting at row 3.
pub fn transactions_table(data_rows: &[[&str; 8]]) -> RawTable {
    let mut rows: Vec<Vec<&str>> = vec![
        vec!["", "", TRANSACTIONS_CAPTION, "", "", "", "", ""],
        vec!["", "", "", "", "", "", "", ""],
        TRANSACTION_LABELS.to_vec(),
        vec!["", "", "", "", "", "cost", "Fees", "Units"],
    ];
    rows.extend(data_rows.iter().map(|row| row.to_vec()));
    RawTable::from(rows)
}

/// Replaces the label of `column`.
pub fn set_label(table: &mut RawTable, column: usize, label: &str) {
    table.rows[LABEL_ROW][column] = parseutil::clean_cell(label);
}

/// Builds a table that is not a transactions table, captioned with `caption` in column 2.
pub fn captioned_table(caption: &str) -> RawTable {
    RawTable::from([
        vec!["", "", caption, ""],
        vec!["Grant ID", "Grant date", "Plan", "Quantity"],
        vec!["G1", "01.01.2020", "RSU", "100"],
    ])
}
