use std::fs;
use std::path::Path;

pub use hf_core::{ErrorKind, ErrorMapping, FieldValue, HtmlFillError, ValueMapping};
pub use hf_engine::{ErrorFormatterRegistry, FillReport, FillingEngine, KeyUsageReport};
use hf_engine::FillEngineOptions;

#[derive(Clone, Debug, Default)]
pub struct FillOptions {
    pub defaults: ValueMapping,
    pub errors: Option<ErrorMapping>,
    pub use_all_keys: bool,
    pub error_formatters: Option<ErrorFormatterRegistry>,
    pub radio_uses_checked: bool,
}

impl FillOptions {
    pub fn new(defaults: ValueMapping) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn with_builtin_formatters(mut self) -> Self {
        self.error_formatters = Some(ErrorFormatterRegistry::with_builtins());
        self
    }
}

pub fn create_engine(options: FillOptions) -> FillingEngine {
    FillingEngine::new(FillEngineOptions {
        defaults: options.defaults,
        errors: options.errors,
        use_all_keys: options.use_all_keys,
        error_formatters: options.error_formatters,
        radio_uses_checked: options.radio_uses_checked,
    })
}

pub fn fill_html(options: FillOptions, template: &str) -> Result<String, HtmlFillError> {
    create_engine(options).fill(template)
}

pub fn fill_html_with_report(
    options: FillOptions,
    template: &str,
) -> Result<FillReport, HtmlFillError> {
    create_engine(options).fill_with_report(template)
}

pub fn fill_html_file(options: FillOptions, path: &Path) -> Result<String, HtmlFillError> {
    let template = read_template(path)?;
    tracing::debug!(target: "hf_api", path = %path.display(), "filling template file");
    fill_html(options, &template)
}

pub fn read_template(path: &Path) -> Result<String, HtmlFillError> {
    fs::read_to_string(path).map_err(|error| {
        HtmlFillError::io(
            "IO_READ",
            format!("Failed to read {}: {}", path.display(), error),
        )
    })
}

pub fn parse_values_json(raw: &str) -> Result<ValueMapping, HtmlFillError> {
    serde_json::from_str(raw).map_err(|error| {
        HtmlFillError::io(
            "API_JSON_INVALID",
            format!("Defaults must be a JSON object of scalars: {}", error),
        )
    })
}

pub fn parse_errors_json(raw: &str) -> Result<ErrorMapping, HtmlFillError> {
    serde_json::from_str(raw).map_err(|error| {
        HtmlFillError::io(
            "API_JSON_INVALID",
            format!("Errors must be a JSON object of strings: {}", error),
        )
    })
}
