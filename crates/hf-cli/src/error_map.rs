use hf_core::HtmlFillError;
use hf_tool::HfToolError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> HtmlFillError {
    HtmlFillError::io(code, error.to_string())
}

pub(crate) fn emit_error(error: HtmlFillError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!("ERROR_MSG_JSON:{}", json_string(&error.message));
    1
}

pub(crate) fn json_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

pub(crate) fn map_cli_input_read(error: std::io::Error) -> HtmlFillError {
    map_error("IO_READ", error)
}

pub(crate) fn map_cli_output_write(error: std::io::Error) -> HtmlFillError {
    map_error("IO_WRITE", error)
}

pub(crate) fn map_cli_cases_scan(error: HfToolError) -> HtmlFillError {
    map_error("CLI_CASES_SCAN", error)
}
