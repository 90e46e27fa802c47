use std::path::{Path, PathBuf};

use hf_core::HtmlFillError;
use hf_tool::{assert_case_file, find_case_files};

use crate::{json_string, map_cli_cases_scan, CheckArgs};

pub(crate) fn run_check(args: CheckArgs) -> Result<i32, HtmlFillError> {
    let root = PathBuf::from(&args.cases_dir);
    let cases = find_case_files(&root).map_err(map_cli_cases_scan)?;

    let mut failures = 0usize;
    for case_path in &cases {
        let label = case_label(&root, case_path);
        match assert_case_file(case_path) {
            Ok(()) => println!("CASE:OK|{}", label),
            Err(error) => {
                failures += 1;
                println!("CASE:FAIL|{}|{}", label, json_string(&error.to_string()));
            }
        }
    }
    tracing::info!(target: "hf_cli", total = cases.len(), failures, "checked cases");

    if failures == 0 {
        println!("RESULT:OK");
        return Ok(0);
    }
    println!("RESULT:FAIL");
    println!("FAILED:{}/{}", failures, cases.len());
    Ok(1)
}

pub(crate) fn case_label(root: &Path, case_path: &Path) -> String {
    case_path
        .parent()
        .and_then(|dir| dir.strip_prefix(root).ok())
        .map(|relative| relative.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|| case_path.display().to_string())
}
