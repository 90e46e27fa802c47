use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{FillCase, HfToolError, CASE_SCHEMA_V1};

const CASE_FILE_NAME: &str = "case.json";

pub(crate) fn read_file(path: &Path) -> Result<String, HfToolError> {
    fs::read_to_string(path).map_err(|source| HfToolError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_fill_case(case_path: &Path) -> Result<FillCase, HfToolError> {
    let raw = read_file(case_path)?;
    let parsed: FillCase = serde_json::from_str(&raw).map_err(|source| HfToolError::ParseCase {
        path: case_path.to_path_buf(),
        source,
    })?;

    if parsed.schema_version != CASE_SCHEMA_V1 {
        return Err(HfToolError::InvalidSchemaVersion {
            expected: CASE_SCHEMA_V1.to_string(),
            found: parsed.schema_version,
        });
    }

    Ok(parsed)
}

pub fn find_case_files(root: &Path) -> Result<Vec<PathBuf>, HfToolError> {
    let mut cases: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == CASE_FILE_NAME)
        .map(|entry| entry.into_path())
        .collect();

    if cases.is_empty() {
        return Err(HfToolError::CasesEmpty {
            path: root.to_path_buf(),
        });
    }

    cases.sort();
    Ok(cases)
}
