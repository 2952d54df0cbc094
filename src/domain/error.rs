//! Domain error types.

/// Top-level error type for fiflag.
///
/// Malformed field values are never errors: they resolve to `false` checks.
/// Only schema, configuration and I/O failures abort a run.
#[derive(Debug, thiserror::Error)]
pub enum FiflagError {
    #[error("missing required column {column}")]
    MissingColumn { column: String },

    #[error("duplicate column {column}")]
    DuplicateColumn { column: String },

    #[error("csv error in {path}: {reason}")]
    Csv { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown asset class {value:?} (expected one of CDB, CRI, CRA, COE)")]
    UnknownAssetClass { value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FiflagError> for std::process::ExitCode {
    fn from(err: &FiflagError) -> Self {
        let code: u8 = match err {
            FiflagError::Io(_) => 1,
            FiflagError::ConfigParse { .. } | FiflagError::ConfigInvalid { .. } => 2,
            FiflagError::MissingColumn { .. } | FiflagError::DuplicateColumn { .. } => 3,
            FiflagError::Csv { .. } => 4,
            FiflagError::UnknownAssetClass { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
