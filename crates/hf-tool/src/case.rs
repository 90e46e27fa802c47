use hf_core::{ErrorMapping, ValueMapping};
use serde::{Deserialize, Serialize};

pub const CASE_SCHEMA_V1: &str = "htmlfill-case.v1";
pub const DEFAULT_TEMPLATE_FILE: &str = "form.html";
pub const DEFAULT_EXPECTED_FILE: &str = "expected.html";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillCase {
    pub schema_version: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub defaults: ValueMapping,
    #[serde(default)]
    pub errors: Option<ErrorMapping>,
    #[serde(default)]
    pub use_all_keys: bool,
    #[serde(default)]
    pub radio_uses_checked: bool,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub expected_error_code: Option<String>,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE_FILE.to_string()
}

impl FillCase {
    pub fn expected_file(&self) -> &str {
        self.expected.as_deref().unwrap_or(DEFAULT_EXPECTED_FILE)
    }
}
