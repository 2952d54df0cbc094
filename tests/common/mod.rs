#![allow(dead_code)]

use fiflag::domain::error::FiflagError;
use fiflag::domain::pipeline::ResultTable;
use fiflag::domain::record_table::RawTable;
use fiflag::ports::table_port::{ResultSink, TableSource};
use std::cell::RefCell;

pub const HEADERS: [&str; 6] = [
    "TradeId",
    "AssetClass",
    "UnitPrice",
    "IssueDate",
    "BuyDate",
    "NegotiationCode",
];

pub struct MockTableSource {
    pub table: RawTable,
    pub error: Option<String>,
}

impl MockTableSource {
    pub fn new(table: RawTable) -> Self {
        Self { table, error: None }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            table: RawTable::default(),
            error: Some(reason.to_string()),
        }
    }
}

impl TableSource for MockTableSource {
    fn read_table(&self) -> Result<RawTable, FiflagError> {
        match &self.error {
            Some(reason) => Err(FiflagError::Csv {
                path: "mock".into(),
                reason: reason.clone(),
            }),
            None => Ok(self.table.clone()),
        }
    }
}

/// Keeps the last table written to it.
#[derive(Default)]
pub struct RecordingSink {
    pub written: RefCell<Option<ResultTable>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<ResultTable> {
        self.written.borrow_mut().take()
    }
}

impl ResultSink for RecordingSink {
    fn write_results(&self, table: &ResultTable) -> Result<(), FiflagError> {
        *self.written.borrow_mut() = Some(table.clone());
        Ok(())
    }
}

/// One input row in [`HEADERS`] order.
pub fn make_row(
    id: &str,
    asset_class: &str,
    unit_price: &str,
    issue_date: &str,
    buy_date: &str,
    code: &str,
) -> Vec<String> {
    [id, asset_class, unit_price, issue_date, buy_date, code]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn make_table(rows: Vec<Vec<String>>) -> RawTable {
    RawTable {
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

/// A mixed batch covering every subset, including failures.
pub fn sample_rows() -> Vec<Vec<String>> {
    vec![
        make_row("1", "CDB", "100", "15/01/24", "15/01/24", "CDB0240AB12"),
        make_row("2", "CRI", "1000", "15/03/23", "15/03/23", "2303XYZW001"),
        make_row("3", "LCA", "1", "15/01/24", "15/01/24", "LCA0240AB12"),
        make_row("4", "CRA", "98.31", "10/06/22", "11/07/22", "CRA0220QQ77"),
        make_row("5", "COE", "0.1", "01/12/21", "02/12/21", "2112ABCDEFG"),
        make_row("6", "CDB", "1000", "15/01/24", "15/01/24", "CDB0230AB1"),
        make_row("7", "CRI", "abc", "", "15/01/24", ""),
    ]
}
