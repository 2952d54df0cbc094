//! Delimited-text table adapters.
//!
//! Input defaults to `;`-separated UTF-8. Output appends the derived columns
//! after the original ones, writes booleans as `True`/`False`, leaves
//! `CheckNegotiationCode` empty for the Others subset and optionally
//! prefixes an unlabeled row-index column.

use crate::domain::error::FiflagError;
use crate::domain::pipeline::{ResultRecord, ResultTable};
use crate::domain::record_table::{RawTable, DERIVED_COLUMNS};
use crate::ports::table_port::{ResultSink, TableSource};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvTableSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvTableSource {
    pub fn new(path: PathBuf, delimiter: u8) -> Self {
        Self { path, delimiter }
    }

    /// Reads from any reader; `origin` only labels errors.
    pub fn read_from<R: Read>(
        reader: R,
        delimiter: u8,
        origin: &str,
    ) -> Result<RawTable, FiflagError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| csv_error(origin, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| csv_error(origin, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawTable { headers, rows })
    }
}

impl TableSource for CsvTableSource {
    fn read_table(&self) -> Result<RawTable, FiflagError> {
        let origin = self.path.display().to_string();
        let file = File::open(&self.path)?;
        let table = Self::read_from(file, self.delimiter, &origin)?;
        info!(path = %origin, rows = table.rows.len(), "loaded transactions");
        Ok(table)
    }
}

pub struct CsvResultSink {
    path: PathBuf,
    delimiter: u8,
    include_index: bool,
}

impl CsvResultSink {
    pub fn new(path: PathBuf, delimiter: u8, include_index: bool) -> Self {
        Self {
            path,
            delimiter,
            include_index,
        }
    }

    pub fn write_to<W: Write>(
        table: &ResultTable,
        writer: W,
        delimiter: u8,
        include_index: bool,
        origin: &str,
    ) -> Result<(), FiflagError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        let mut header: Vec<&str> = Vec::with_capacity(table.headers.len() + 9);
        if include_index {
            header.push("");
        }
        header.extend(table.headers.iter().map(String::as_str));
        header.extend(DERIVED_COLUMNS);
        wtr.write_record(&header).map_err(|e| csv_error(origin, e))?;

        for row in &table.records {
            wtr.write_record(output_row(row, include_index))
                .map_err(|e| csv_error(origin, e))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl ResultSink for CsvResultSink {
    fn write_results(&self, table: &ResultTable) -> Result<(), FiflagError> {
        let origin = self.path.display().to_string();
        ensure_parent_dir(&self.path)?;
        let file = File::create(&self.path)?;
        Self::write_to(table, file, self.delimiter, self.include_index, &origin)?;
        info!(path = %origin, rows = table.len(), "wrote results");
        Ok(())
    }
}

fn output_row(row: &ResultRecord, include_index: bool) -> Vec<String> {
    let checks = &row.checks;
    let mut out = Vec::with_capacity(row.record.fields.len() + 9);
    if include_index {
        out.push(row.record.index.to_string());
    }
    out.extend(row.record.fields.iter().cloned());
    out.push(format_bool(checks.check_unit_prices));
    out.push(format_bool(checks.check_bought_on_issue_dates));
    out.push(format_bool(checks.check_unit_and_date));
    out.push(format_bool(checks.check_asset_class));
    out.push(format_bool(checks.check_length_of_negotiation_code));
    out.push(
        checks
            .check_negotiation_code
            .map(format_bool)
            .unwrap_or_default(),
    );
    out.push(row.subset.key().to_string());
    out.push(format_bool(row.flag));
    out
}

fn format_bool(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

fn ensure_parent_dir(path: &Path) -> Result<(), FiflagError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn csv_error(origin: &str, e: csv::Error) -> FiflagError {
    FiflagError::Csv {
        path: origin.to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::{run, PipelineOptions};
    use crate::domain::record_table::RecordTable;
    use tempfile::TempDir;

    const INPUT: &str = "Id;AssetClass;UnitPrice;IssueDate;BuyDate;NegotiationCode\n\
        7;CRI;1000;15/01/24;15/01/24;2401ABCD123\n\
        8;LCI;97.5;15/01/24;20/02/24;LCI0240AB12\n\
        9;CDB;100;15/01/24;15/01/24;CDB0240AB12\n";

    fn result_table() -> ResultTable {
        let raw = CsvTableSource::read_from(INPUT.as_bytes(), b';', "inline").unwrap();
        run(RecordTable::from_raw(raw).unwrap(), PipelineOptions::default())
    }

    fn render(table: &ResultTable, include_index: bool) -> String {
        let mut buf = Vec::new();
        CsvResultSink::write_to(table, &mut buf, b',', include_index, "buffer").unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn read_from_splits_on_semicolon() {
        let raw = CsvTableSource::read_from(INPUT.as_bytes(), b';', "inline").unwrap();
        assert_eq!(raw.headers.len(), 6);
        assert_eq!(raw.headers[1], "AssetClass");
        assert_eq!(raw.rows.len(), 3);
        assert_eq!(raw.rows[1][2], "97.5");
    }

    #[test]
    fn write_with_index_column() {
        let text = render(&result_table(), true);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            ",Id,AssetClass,UnitPrice,IssueDate,BuyDate,NegotiationCode,\
             CheckUnitPrices,CheckBoughtOnIssueDates,CheckUnitAndDate,CheckAssetClass,\
             CheckLengthOfNegotiationCode,CheckNegotiationCode,Subset,Flag"
        );
        assert_eq!(
            lines[1],
            "2,9,CDB,100,15/01/24,15/01/24,CDB0240AB12,True,True,True,True,True,True,CDB,True"
        );
        assert_eq!(
            lines[2],
            "0,7,CRI,1000,15/01/24,15/01/24,2401ABCD123,True,True,True,True,True,True,CRI,True"
        );
        assert_eq!(
            lines[3],
            "1,8,LCI,97.5,15/01/24,20/02/24,LCI0240AB12,False,False,True,False,True,,Others,False"
        );
    }

    #[test]
    fn write_without_index_column() {
        let text = render(&result_table(), false);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("Id,AssetClass"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = CsvTableSource::new(PathBuf::from("/nonexistent/data.csv"), b';');
        assert!(matches!(source.read_table(), Err(FiflagError::Io(_))));
    }

    #[test]
    fn sink_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("result.csv");
        let sink = CsvResultSink::new(path.clone(), b',', true);
        sink.write_results(&result_table()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 4);
    }

    #[test]
    fn source_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, INPUT).unwrap();
        let raw = CsvTableSource::new(path, b';').read_table().unwrap();
        assert_eq!(raw.rows.len(), 3);
    }
}
