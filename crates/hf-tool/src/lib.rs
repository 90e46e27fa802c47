mod case;
mod runner;
mod source;

pub use case::{FillCase, CASE_SCHEMA_V1, DEFAULT_EXPECTED_FILE, DEFAULT_TEMPLATE_FILE};
pub use runner::{assert_case, assert_case_file, run_case, CaseOutcome};
pub use source::{find_case_files, read_fill_case};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HfToolError {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse case {path}: {source}")]
    ParseCase {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid case schema version \"{found}\", expected \"{expected}\".")]
    InvalidSchemaVersion { expected: String, found: String },
    #[error("No case.json files under {path}.")]
    CasesEmpty { path: PathBuf },
    #[error("Fill failed unexpectedly with {code}: {message}")]
    UnexpectedFailure { code: String, message: String },
    #[error("Fill succeeded but error code {expected} was expected.")]
    UnexpectedSuccess { expected: String },
    #[error("Error code mismatch: expected {expected}, actual {actual} ({message}).")]
    ErrorCodeMismatch {
        expected: String,
        actual: String,
        message: String,
    },
    #[error("Output mismatch at line {line}. expected={expected:?} actual={actual:?}")]
    OutputMismatch {
        line: usize,
        expected: String,
        actual: String,
    },
}
