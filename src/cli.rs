//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::{CsvResultSink, CsvTableSource};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::asset_class::AssetClass;
use crate::domain::config_validation::{parse_delimiter, validate_run_config};
use crate::domain::error::FiflagError;
use crate::domain::negotiation_rule;
use crate::domain::pipeline::{self, PipelineOptions};
use crate::domain::record_table::RecordTable;
use crate::domain::run_config::RunConfig;
use crate::domain::summary::RunSummary;
use crate::ports::config_port::ConfigPort;
use crate::ports::table_port::{ResultSink, TableSource};

#[derive(Parser, Debug)]
#[command(name = "fiflag", about = "Fixed-income transaction validator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a transaction table and write the flagged result
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Omit the leading row-index column
        #[arg(long)]
        no_index: bool,
        /// Include CheckNegotiationCode in Flag
        #[arg(long)]
        strict_flag: bool,
    },
    /// Check a single negotiation code and show each rule
    CheckCode {
        #[arg(long = "class")]
        asset_class: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        issue_date: Option<String>,
    },
    /// Validate a configuration file
    ValidateConfig {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub no_index: bool,
    pub strict_flag: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            input,
            output,
            no_index,
            strict_flag,
        } => {
            let overrides = RunOverrides {
                input,
                output,
                no_index,
                strict_flag,
            };
            run_pipeline_command(config.as_ref(), &overrides)
        }
        Command::CheckCode {
            asset_class,
            code,
            issue_date,
        } => run_check_code(&asset_class, &code, issue_date.as_deref()),
        Command::ValidateConfig { config } => run_validate_config(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, FiflagError> {
    FileConfigAdapter::from_file(path).map_err(|e| FiflagError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Resolves the run configuration: defaults, then config file, then flags.
pub fn build_run_config(
    adapter: Option<&dyn ConfigPort>,
    overrides: &RunOverrides,
) -> Result<RunConfig, FiflagError> {
    let mut config = RunConfig::default();

    if let Some(adapter) = adapter {
        validate_run_config(adapter)?;

        if let Some(path) = adapter.get_string("input", "path") {
            config.input_path = PathBuf::from(path.trim());
        }
        if let Some(d) = adapter.get_string("input", "delimiter") {
            config.input_delimiter = parse_delimiter("input", &d)?;
        }
        if let Some(path) = adapter.get_string("output", "path") {
            config.output_path = PathBuf::from(path.trim());
        }
        if let Some(d) = adapter.get_string("output", "delimiter") {
            config.output_delimiter = parse_delimiter("output", &d)?;
        }
        config.include_index = adapter.get_bool("output", "include_index", true);
        config.pipeline = PipelineOptions {
            flag_includes_negotiation_code: adapter.get_bool(
                "validation",
                "flag_includes_negotiation_code",
                false,
            ),
        };
    }

    if let Some(input) = &overrides.input {
        config.input_path = input.clone();
    }
    if let Some(output) = &overrides.output {
        config.output_path = output.clone();
    }
    if overrides.no_index {
        config.include_index = false;
    }
    if overrides.strict_flag {
        config.pipeline.flag_includes_negotiation_code = true;
    }

    Ok(config)
}

/// Read, validate and write one table. Schema errors abort before anything
/// is written.
pub fn run_validation(
    source: &dyn TableSource,
    sink: &dyn ResultSink,
    options: PipelineOptions,
) -> Result<RunSummary, FiflagError> {
    let raw = source.read_table()?;
    let table = RecordTable::from_raw(raw)?;
    info!(
        rows = table.len(),
        columns = table.headers.len(),
        "schema validated"
    );

    let result = pipeline::run(table, options);
    sink.write_results(&result)?;

    Ok(RunSummary::compute(&result))
}

fn run_pipeline_command(config_path: Option<&PathBuf>, overrides: &RunOverrides) -> ExitCode {
    let adapter = match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            match load_config(path) {
                Ok(a) => Some(a),
                Err(e) => return report(&e),
            }
        }
        None => None,
    };

    let config = match build_run_config(adapter.as_ref().map(|a| a as &dyn ConfigPort), overrides)
    {
        Ok(c) => c,
        Err(e) => return report(&e),
    };

    let source = CsvTableSource::new(config.input_path.clone(), config.input_delimiter);
    let sink = CsvResultSink::new(
        config.output_path.clone(),
        config.output_delimiter,
        config.include_index,
    );

    match run_validation(&source, &sink, config.pipeline) {
        Ok(summary) => {
            print_summary(&summary);
            eprintln!("\nResults written to: {}", config.output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

pub fn print_summary(summary: &RunSummary) {
    eprintln!("\n=== Validation Summary ===");
    for s in &summary.subsets {
        eprintln!(
            "  {:<7} {:>6} rows, {:>6} flagged, {:>6} rejected, {:>6} bad codes",
            s.subset.key(),
            s.rows,
            s.flagged,
            s.rejected,
            s.negotiation_code_failures,
        );
    }
    eprintln!(
        "  {:<7} {:>6} rows, {:>6} flagged, {:>6} rejected",
        "Total",
        summary.total_rows(),
        summary.total_flagged(),
        summary.total_rejected(),
    );
}

fn run_check_code(asset_class: &str, code: &str, issue_date: Option<&str>) -> ExitCode {
    let class: AssetClass = match asset_class.parse() {
        Ok(c) => c,
        Err(e) => return report(&e),
    };

    let outcomes = negotiation_rule::explain(class, code, issue_date);
    for outcome in &outcomes {
        let mark = if outcome.passed { "ok" } else { "FAIL" };
        println!("{:<26} {:<10} {}", outcome.name, format!("{:?}", outcome.segment), mark);
    }

    let valid = outcomes.iter().all(|o| o.passed);
    println!("CheckNegotiationCode: {}", valid);
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(6)
    }
}

fn run_validate_config(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return report(&e),
    };

    match build_run_config(Some(&adapter as &dyn ConfigPort), &RunOverrides::default()) {
        Ok(config) => {
            eprintln!("Config validated successfully");
            eprintln!("  input:  {}", config.input_path.display());
            eprintln!("  output: {}", config.output_path.display());
            eprintln!(
                "  flag includes CheckNegotiationCode: {}",
                config.pipeline.flag_includes_negotiation_code
            );
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn report(err: &FiflagError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}
