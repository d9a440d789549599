use std::ops::{Deref, DerefMut};

use crate::parseutil;

/// A table as produced by the extractor, before any interpretation of its contents.
///
/// The extractor does not know where the headers of a table are. `header` is simply the first
/// row it produced, and `rows` holds every row beneath that (header fragments included), indexed
/// from zero.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawTable {
    pub header: Row,
    pub rows: Vec<Row>,
}

impl RawTable {
    pub fn new(header: Row, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// Returns the text of the cell at `row`, `column`, or `None` if the cell is empty or absent.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.cell(column))
    }

    /// Iterates over the cells of `column`, starting at `first_row`.
    ///
    /// Yields `(row_index, cell)` for every row, including those where the cell is absent.
    pub fn column_from(
        &self,
        column: usize,
        first_row: usize,
    ) -> impl Iterator<Item = (usize, Option<&str>)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .skip(first_row)
            .map(move |(row_index, row)| (row_index, row.cell(column)))
    }
}

/// Builds a table from rows of text, the first of which becomes the header.
impl<C, R> From<C> for RawTable
where
    C: IntoIterator<Item = R>,
    R: Into<Row>,
{
    fn from(value: C) -> Self {
        let mut rows = value.into_iter().map(Into::into);
        let header = rows.next().unwrap_or_default();
        RawTable {
            header,
            rows: rows.collect(),
        }
    }
}

/// Single row of a [RawTable]. Empty cells are `None`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row(pub Vec<Option<String>>);

impl Row {
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.0.get(column).and_then(|cell| cell.as_deref())
    }
}

impl Deref for Row {
    type Target = Vec<Option<String>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Builds a row from cell text. Whitespace is normalised, and blank text becomes an empty cell.
impl<C, S> From<C> for Row
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fn from(value: C) -> Self {
        Row(value.into_iter().map(parseutil::clean_cell).collect())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[gtest]
    fn test_from_rows_splits_off_header() {
        let table = RawTable::from([
            vec!["", "", "Transaction details"],
            vec!["a", " ", "c  d"],
            vec!["e"],
        ]);

        expect_eq!(table.header.cell(2), Some("Transaction details"));
        expect_eq!(table.header.cell(0), None);
        expect_eq!(table.rows.len(), 2);
        expect_eq!(table.cell(0, 0), Some("a"));
        expect_eq!(table.cell(0, 1), None);
        expect_eq!(table.cell(0, 2), Some("c d"));
        // Ragged row.
        expect_eq!(table.cell(1, 2), None);
        // Beyond the last row.
        expect_eq!(table.cell(5, 0), None);
    }

    #[gtest]
    fn test_column_from_includes_absent_cells() {
        let table = RawTable::from([
            vec!["header"],
            vec!["r0"],
            vec!["r1"],
            vec![""],
            vec!["r3"],
        ]);

        let column: Vec<_> = table.column_from(0, 1).collect();
        expect_eq!(column, vec![(1, Some("r1")), (2, None), (3, Some("r3"))]);
    }

    #[gtest]
    fn test_empty_input_is_empty_table() {
        let table = RawTable::from(Vec::<Vec<&str>>::new());
        expect_eq!(table, RawTable::default());
    }
}
