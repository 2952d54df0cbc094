//! Parameters of a validation run.

use crate::domain::pipeline::PipelineOptions;
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "data/data.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "data/result.csv";
pub const DEFAULT_INPUT_DELIMITER: u8 = b';';
pub const DEFAULT_OUTPUT_DELIMITER: u8 = b',';

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub input_delimiter: u8,
    pub output_path: PathBuf,
    pub output_delimiter: u8,
    pub include_index: bool,
    pub pipeline: PipelineOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            input_delimiter: DEFAULT_INPUT_DELIMITER,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_delimiter: DEFAULT_OUTPUT_DELIMITER,
            include_index: true,
            pipeline: PipelineOptions::default(),
        }
    }
}
