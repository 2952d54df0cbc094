//! Configuration validation.
//!
//! Every key is optional; present values must be well formed before a run
//! starts.

use crate::domain::error::FiflagError;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), FiflagError> {
    validate_path(config, "input")?;
    validate_path(config, "output")?;
    validate_delimiter(config, "input")?;
    validate_delimiter(config, "output")?;
    validate_bool(config, "output", "include_index")?;
    validate_bool(config, "validation", "flag_includes_negotiation_code")?;
    Ok(())
}

/// A delimiter is a single ASCII character or one of `comma`, `semicolon`,
/// `tab`, `pipe`. Names exist because INI parsers treat `;` as a comment.
pub fn parse_delimiter(section: &str, value: &str) -> Result<u8, FiflagError> {
    match value.trim().to_lowercase().as_str() {
        "comma" => return Ok(b','),
        "semicolon" => return Ok(b';'),
        "tab" => return Ok(b'\t'),
        "pipe" => return Ok(b'|'),
        _ => {}
    }
    match value.as_bytes() {
        [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
        _ => Err(FiflagError::ConfigInvalid {
            section: section.to_string(),
            key: "delimiter".to_string(),
            reason: format!("expected a single ASCII character, got {:?}", value),
        }),
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn validate_path(config: &dyn ConfigPort, section: &str) -> Result<(), FiflagError> {
    match config.get_string(section, "path") {
        Some(p) if p.trim().is_empty() => Err(FiflagError::ConfigInvalid {
            section: section.to_string(),
            key: "path".to_string(),
            reason: "path must not be empty".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_delimiter(config: &dyn ConfigPort, section: &str) -> Result<(), FiflagError> {
    match config.get_string(section, "delimiter") {
        Some(d) => parse_delimiter(section, &d).map(|_| ()),
        None => Ok(()),
    }
}

fn validate_bool(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), FiflagError> {
    match config.get_string(section, key) {
        Some(v) if parse_bool(&v).is_none() => Err(FiflagError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("expected true/false, got {:?}", v),
        }),
        _ => Ok(()),
    }
}
