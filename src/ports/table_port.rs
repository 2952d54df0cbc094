//! Tabular input and output port traits.

use crate::domain::error::FiflagError;
use crate::domain::pipeline::ResultTable;
use crate::domain::record_table::RawTable;

/// Supplies the raw transaction table.
pub trait TableSource {
    fn read_table(&self) -> Result<RawTable, FiflagError>;
}

/// Persists a validated result table.
pub trait ResultSink {
    fn write_results(&self, table: &ResultTable) -> Result<(), FiflagError>;
}
