//! Picks out the transactions tables among everything extracted from a statement.

use crate::table::RawTable;

/// Header caption of a transactions table.
pub const TRANSACTIONS_CAPTION: &str = "Transaction details";
/// Header caption of a positions table.
pub const POSITIONS_CAPTION: &str = "Grant details";

/// Header column holding the caption that identifies a table.
const CAPTION_COLUMN: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableKind {
    /// Individual stock plan transactions.
    Transactions,
    /// Grants and holdings. Recognised, but not output.
    Positions,
    /// Anything else, such as page furniture picked up as a table.
    Other,
}

/// Identifies a table by its header caption.
pub fn classify(table: &RawTable) -> TableKind {
    match table.header.cell(CAPTION_COLUMN) {
        Some(TRANSACTIONS_CAPTION) => TableKind::Transactions,
        Some(POSITIONS_CAPTION) => TableKind::Positions,
        _ => TableKind::Other,
    }
}

/// Result of classifying the tables extracted from a statement.
#[derive(Debug, Default, PartialEq)]
pub struct ClassifiedTables<'a> {
    /// Transactions tables with their index among all extracted tables, in extraction order.
    pub transactions: Vec<(usize, &'a RawTable)>,
    pub num_positions: usize,
    pub num_other: usize,
}

/// Classifies each of `tables`, keeping the transactions tables.
pub fn classify_tables(tables: &[RawTable]) -> ClassifiedTables<'_> {
    let mut classified = ClassifiedTables::default();
    for (index, table) in tables.iter().enumerate() {
        match classify(table) {
            TableKind::Transactions => {
                log::info!("#{index}: transactions table");
                classified.transactions.push((index, table));
            }
            TableKind::Positions => {
                log::info!("#{index}: positions table");
                classified.num_positions += 1;
            }
            TableKind::Other => {
                log::debug!("#{index}: unrecognised table, skipping");
                classified.num_other += 1;
            }
        }
    }
    classified
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use crate::testutil::{SALE_ROW, captioned_table, transactions_table};

    use super::*;

    #[gtest]
    fn test_classify() {
        expect_eq!(
            classify(&transactions_table(&[SALE_ROW])),
            TableKind::Transactions
        );
        expect_eq!(
            classify(&captioned_table(POSITIONS_CAPTION)),
            TableKind::Positions
        );
        expect_eq!(classify(&captioned_table("Summary")), TableKind::Other);
        expect_eq!(classify(&captioned_table("")), TableKind::Other);
        expect_eq!(classify(&RawTable::default()), TableKind::Other);
    }

    #[gtest]
    fn test_caption_must_be_in_column_2() {
        let table = RawTable::from([vec![TRANSACTIONS_CAPTION, "", ""]]);
        expect_eq!(classify(&table), TableKind::Other);
    }

    #[gtest]
    #[test_log::test]
    fn test_classify_tables_keeps_transactions_in_order() {
        // GIVEN: a positions table, two transactions tables, and an unrelated one.
        let tables = vec![
            captioned_table(POSITIONS_CAPTION),
            transactions_table(&[SALE_ROW]),
            captioned_table("Summary"),
            transactions_table(&[]),
        ];

        // WHEN:
        let classified = classify_tables(&tables);

        // THEN: the positions table is counted but excluded.
        expect_eq!(
            classified,
            ClassifiedTables {
                transactions: vec![(1, &tables[1]), (3, &tables[3])],
                num_positions: 1,
                num_other: 1,
            }
        );
    }
}
