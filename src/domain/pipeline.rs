//! Validation pipeline: partition, check, recombine, flag.
//!
//! 1. Records are split into subsets (see [`partition`]).
//! 2. Each partition gets its [`ValidationColumns`] and `Subset` stamp.
//! 3. Processed partitions are concatenated once, in emission order.
//! 4. `Flag` is computed over the combined table.
//!
//! `CheckNegotiationCode` is not part of `Flag` unless
//! [`PipelineOptions::flag_includes_negotiation_code`] is set.

use crate::domain::asset_class::Subset;
use crate::domain::negotiation_rule;
use crate::domain::partition::{partition, Partition};
use crate::domain::predicate::{
    check_asset_class, check_bought_on_issue_date, check_length_of_negotiation_code,
    check_unit_and_date, check_unit_price,
};
use crate::domain::record_table::{RecordTable, TransactionRecord};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub flag_includes_negotiation_code: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationColumns {
    pub check_unit_prices: bool,
    pub check_bought_on_issue_dates: bool,
    pub check_unit_and_date: bool,
    pub check_asset_class: bool,
    pub check_length_of_negotiation_code: bool,
    /// `None` for the Others subset, where no rule layout applies.
    pub check_negotiation_code: Option<bool>,
}

impl ValidationColumns {
    pub fn compute(record: &TransactionRecord, subset: Subset) -> Self {
        let check_unit_prices = check_unit_price(record.unit_price);
        let check_bought_on_issue_dates =
            check_bought_on_issue_date(record.issue_date.as_deref(), record.buy_date.as_deref());

        Self {
            check_unit_prices,
            check_bought_on_issue_dates,
            check_unit_and_date: check_unit_and_date(
                check_unit_prices,
                check_bought_on_issue_dates,
            ),
            check_asset_class: check_asset_class(&record.asset_class, subset),
            check_length_of_negotiation_code: check_length_of_negotiation_code(
                &record.negotiation_code,
            ),
            check_negotiation_code: subset.asset_class().map(|class| {
                negotiation_rule::evaluate(
                    class,
                    &record.negotiation_code,
                    record.issue_date.as_deref(),
                )
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub record: TransactionRecord,
    pub subset: Subset,
    pub checks: ValidationColumns,
    pub flag: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    /// Original input headers; derived columns are appended on output.
    pub headers: Vec<String>,
    pub records: Vec<ResultRecord>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs the whole pipeline over an ingested table.
pub fn run(table: RecordTable, options: PipelineOptions) -> ResultTable {
    let RecordTable { headers, records } = table;

    let processed: Vec<Vec<ResultRecord>> = partition(records)
        .into_iter()
        .map(validate_partition)
        .collect();

    let combined = processed.into_iter().flatten().collect();

    ResultTable {
        headers,
        records: build_flag(combined, options),
    }
}

/// Computes checks for one partition and stamps its subset. `flag` is left
/// false until [`build_flag`] runs over the combined table.
pub fn validate_partition(partition: Partition) -> Vec<ResultRecord> {
    let Partition { subset, records } = partition;
    debug!(subset = %subset, rows = records.len(), "validating partition");
    if subset == Subset::Others && !records.is_empty() {
        warn!(
            rows = records.len(),
            "rows with unrecognized asset class routed to Others"
        );
    }

    records
        .into_iter()
        .map(|record| ResultRecord {
            checks: ValidationColumns::compute(&record, subset),
            record,
            subset,
            flag: false,
        })
        .collect()
}

pub fn build_flag(records: Vec<ResultRecord>, options: PipelineOptions) -> Vec<ResultRecord> {
    records
        .into_iter()
        .map(|r| ResultRecord {
            flag: flag(&r.checks, options),
            ..r
        })
        .collect()
}

pub fn flag(checks: &ValidationColumns, options: PipelineOptions) -> bool {
    let base = checks.check_unit_and_date
        && checks.check_asset_class
        && checks.check_length_of_negotiation_code;
    if options.flag_includes_negotiation_code {
        base && checks.check_negotiation_code.unwrap_or(false)
    } else {
        base
    }
}
