use std::{cell::RefCell, path::Path};

use anyhow::{Result, anyhow};
use googletest::prelude::*;
use testutils::anyhow_downcasts_to;

use crate::{
    testutil::{SALE_ROW, captioned_table, fee_row, set_label, transactions_table},
    *,
};

/// Returns canned tables, and records the requests it was given.
struct FakeExtractor {
    tables: Vec<RawTable>,
    requests: RefCell<Vec<ExtractionRequest>>,
}

impl FakeExtractor {
    fn new(tables: Vec<RawTable>) -> Self {
        Self {
            tables,
            requests: RefCell::new(vec![]),
        }
    }
}

impl TableExtractor for FakeExtractor {
    fn extract_tables(&self, request: &ExtractionRequest) -> Result<Vec<RawTable>> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.tables.clone())
    }
}

struct FailingExtractor;

impl TableExtractor for FailingExtractor {
    fn extract_tables(&self, _request: &ExtractionRequest) -> Result<Vec<RawTable>> {
        Err(anyhow!("no JVM"))
    }
}

fn sale_row(id: &'static str) -> [&'static str; 8] {
    let mut row = SALE_ROW;
    row[0] = id;
    row
}

#[gtest]
#[test_log::test]
fn test_convert_pdf_concatenates_transactions_tables() -> Result<()> {
    // GIVEN: two transactions tables, separated by a positions table and an unrelated table.
    let extractor = FakeExtractor::new(vec![
        transactions_table(&[sale_row("TX1"), fee_row("0.5 USD"), sale_row("TX2")]),
        captioned_table(classify::POSITIONS_CAPTION),
        captioned_table("Something else"),
        transactions_table(&[sale_row("TX3")]),
    ]);
    let config = Config::default();
    let request = ExtractionRequest::new(Path::new("statement.pdf"), &config);

    // WHEN:
    let records = convert_pdf(&extractor, &request, &config)?;

    // THEN:
    let ids: Vec<&str> = records
        .iter()
        .map(|record| record.transaction_id.as_str())
        .collect();
    expect_eq!(ids, vec!["TX1", "TX2", "TX3"]);
    expect_eq!(extractor.requests.borrow().len(), 1);
    Ok(())
}

#[gtest]
fn test_no_transactions_tables_gives_no_records() -> Result<()> {
    let tables = vec![captioned_table(classify::POSITIONS_CAPTION), RawTable::default()];

    let records = process_tables(&tables, &Config::default())?;

    expect_that!(records, is_empty());
    Ok(())
}

#[gtest]
fn test_malformed_table_fails_naming_table() {
    // GIVEN: the second table has a changed layout.
    let mut bad_table = transactions_table(&[sale_row("TX2")]);
    set_label(&mut bad_table, 2, "Wrong Header");
    let tables = vec![
        transactions_table(&[sale_row("TX1")]),
        captioned_table(classify::POSITIONS_CAPTION),
        bad_table,
    ];

    // WHEN:
    let err = process_tables(&tables, &Config::default()).unwrap_err();

    // THEN:
    expect_that!(
        err,
        anyhow_downcasts_to::<NormalizeError, _>(eq(&NormalizeError::HeaderMismatch {
            index: 2,
            expected: "Transaction type Quantity",
            actual: Some("Wrong Header".to_string()),
        }))
    );
    expect_that!(
        err.to_string(),
        contains_substring("normalizing transactions table #2")
    );
}

#[gtest]
fn test_extraction_failure_is_reported() {
    let config = Config::default();
    let request = ExtractionRequest::new(Path::new("statement.pdf"), &config);

    let err = convert_pdf(&FailingExtractor, &request, &config).unwrap_err();

    expect_that!(
        format!("{err:#}"),
        all!(
            contains_substring("extracting tables from \"statement.pdf\""),
            contains_substring("no JVM")
        )
    );
}
