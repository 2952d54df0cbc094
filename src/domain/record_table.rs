//! Typed transaction records, validated once at ingestion.
//!
//! Adapters hand over a [`RawTable`] of strings; [`RecordTable::from_raw`]
//! resolves the required columns by name and parses each row into a
//! [`TransactionRecord`]. Extra columns are carried through untouched.

use crate::domain::error::FiflagError;
use std::collections::HashSet;

pub const ASSET_CLASS: &str = "AssetClass";
pub const UNIT_PRICE: &str = "UnitPrice";
pub const ISSUE_DATE: &str = "IssueDate";
pub const BUY_DATE: &str = "BuyDate";
pub const NEGOTIATION_CODE: &str = "NegotiationCode";

pub const REQUIRED_COLUMNS: [&str; 5] =
    [ASSET_CLASS, UNIT_PRICE, ISSUE_DATE, BUY_DATE, NEGOTIATION_CODE];

/// Columns produced by the pipeline, in output order.
pub const DERIVED_COLUMNS: [&str; 8] = [
    "CheckUnitPrices",
    "CheckBoughtOnIssueDates",
    "CheckUnitAndDate",
    "CheckAssetClass",
    "CheckLengthOfNegotiationCode",
    "CheckNegotiationCode",
    "Subset",
    "Flag",
];

/// Untyped table as read from a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Zero-based position in the input.
    pub index: usize,
    /// Raw cells aligned with [`RecordTable::headers`].
    pub fields: Vec<String>,
    pub asset_class: String,
    pub unit_price: Option<f64>,
    pub issue_date: Option<String>,
    pub buy_date: Option<String>,
    pub negotiation_code: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub headers: Vec<String>,
    pub records: Vec<TransactionRecord>,
}

struct ColumnIndex {
    asset_class: usize,
    unit_price: usize,
    issue_date: usize,
    buy_date: usize,
    negotiation_code: usize,
}

impl RecordTable {
    /// Validates the schema and types every row.
    ///
    /// Columns named like a derived column, or a leading column with an empty
    /// header (the index column of a previous result file), are dropped so
    /// results can be re-validated.
    pub fn from_raw(raw: RawTable) -> Result<Self, FiflagError> {
        let kept: Vec<usize> = raw
            .headers
            .iter()
            .enumerate()
            .filter(|&(i, h)| !is_discarded_column(i, h))
            .map(|(i, _)| i)
            .collect();
        let headers: Vec<String> = kept.iter().map(|&i| raw.headers[i].clone()).collect();

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(FiflagError::DuplicateColumn {
                    column: header.clone(),
                });
            }
        }

        let columns = ColumnIndex {
            asset_class: position(&headers, ASSET_CLASS)?,
            unit_price: position(&headers, UNIT_PRICE)?,
            issue_date: position(&headers, ISSUE_DATE)?,
            buy_date: position(&headers, BUY_DATE)?,
            negotiation_code: position(&headers, NEGOTIATION_CODE)?,
        };

        let records = raw
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let fields: Vec<String> = kept
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect();
                TransactionRecord::from_fields(index, fields, &columns)
            })
            .collect();

        Ok(Self { headers, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TransactionRecord {
    fn from_fields(index: usize, fields: Vec<String>, columns: &ColumnIndex) -> Self {
        let cell = |i: usize| fields[i].as_str();
        Self {
            index,
            asset_class: cell(columns.asset_class).to_string(),
            unit_price: parse_price(cell(columns.unit_price)),
            issue_date: non_empty(cell(columns.issue_date)),
            buy_date: non_empty(cell(columns.buy_date)),
            negotiation_code: cell(columns.negotiation_code).to_string(),
            fields,
        }
    }
}

/// A blank header only marks the index column when it comes first.
fn is_discarded_column(position: usize, header: &str) -> bool {
    (position == 0 && header.trim().is_empty()) || DERIVED_COLUMNS.contains(&header)
}

fn position(headers: &[String], column: &str) -> Result<usize, FiflagError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| FiflagError::MissingColumn {
            column: column.to_string(),
        })
}

/// `None` for empty or non-numeric cells.
fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|p| !p.is_nan())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
