use std::path::Path;

use hf_api::{fill_html, FillOptions};

use crate::source::{read_file, read_fill_case};
use crate::{FillCase, HfToolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Filled(String),
    Failed { code: String, message: String },
}

pub fn run_case(case_dir: &Path, case: &FillCase) -> Result<CaseOutcome, HfToolError> {
    let template = read_file(&case_dir.join(&case.template))?;
    let options = FillOptions {
        defaults: case.defaults.clone(),
        errors: case.errors.clone(),
        use_all_keys: case.use_all_keys,
        error_formatters: None,
        radio_uses_checked: case.radio_uses_checked,
    }
    .with_builtin_formatters();

    let outcome = match fill_html(options, &template) {
        Ok(output) => CaseOutcome::Filled(output),
        Err(error) => CaseOutcome::Failed {
            code: error.code,
            message: error.message,
        },
    };
    tracing::debug!(target: "hf_tool", case_dir = %case_dir.display(), ?outcome, "ran case");
    Ok(outcome)
}

pub fn assert_case(case_dir: &Path, case: &FillCase) -> Result<(), HfToolError> {
    let outcome = run_case(case_dir, case)?;

    match (&case.expected_error_code, outcome) {
        (Some(expected), CaseOutcome::Failed { code, message }) => {
            if *expected == code {
                Ok(())
            } else {
                Err(HfToolError::ErrorCodeMismatch {
                    expected: expected.clone(),
                    actual: code,
                    message,
                })
            }
        }
        (Some(expected), CaseOutcome::Filled(_)) => Err(HfToolError::UnexpectedSuccess {
            expected: expected.clone(),
        }),
        (None, CaseOutcome::Failed { code, message }) => {
            Err(HfToolError::UnexpectedFailure { code, message })
        }
        (None, CaseOutcome::Filled(output)) => {
            let expected = read_file(&case_dir.join(case.expected_file()))?;
            compare_output(&expected, &output)
        }
    }
}

pub fn assert_case_file(case_path: &Path) -> Result<(), HfToolError> {
    let case = read_fill_case(case_path)?;
    let case_dir = case_path.parent().unwrap_or_else(|| Path::new("."));
    assert_case(case_dir, &case)
}

fn compare_output(expected: &str, actual: &str) -> Result<(), HfToolError> {
    if expected == actual {
        return Ok(());
    }

    let mut expected_lines = expected.split('\n');
    let mut actual_lines = actual.split('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(left), Some(right)) if left == right => line += 1,
            (left, right) => {
                return Err(HfToolError::OutputMismatch {
                    line,
                    expected: left.unwrap_or_default().to_string(),
                    actual: right.unwrap_or_default().to_string(),
                })
            }
        }
    }
}
