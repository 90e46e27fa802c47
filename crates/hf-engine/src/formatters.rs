use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use html_escape::encode_text;

pub const DEFAULT_FORMATTER: &str = "default";

pub type ErrorFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

pub fn default_formatter(message: &str) -> String {
    format!("<span class=\"error\">{}</span><br>\n", encode_text(message))
}

#[derive(Clone)]
pub struct ErrorFormatterRegistry {
    formatters: BTreeMap<String, ErrorFormatter>,
}

impl ErrorFormatterRegistry {
    pub fn new() -> Self {
        let mut formatters: BTreeMap<String, ErrorFormatter> = BTreeMap::new();
        formatters.insert(DEFAULT_FORMATTER.to_string(), Arc::new(default_formatter));
        Self { formatters }
    }

    pub fn with_builtins() -> Self {
        Self::new()
            .with("none", |message| message.to_string())
            .with("escape", |message| encode_text(message).into_owned())
            .with("ignore", |_| String::new())
    }

    pub fn register<F>(&mut self, name: impl Into<String>, formatter: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.formatters.insert(name.into(), Arc::new(formatter));
    }

    pub fn with<F>(mut self, name: impl Into<String>, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register(name, formatter);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn format(&self, name: &str, message: &str) -> Option<String> {
        self.formatters.get(name).map(|formatter| formatter(message))
    }

    pub fn names(&self) -> Vec<&str> {
        self.formatters.keys().map(String::as_str).collect()
    }
}

impl Default for ErrorFormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorFormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFormatterRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod formatters_tests {
    use super::*;

    #[test]
    fn new_registry_only_has_default() {
        let registry = ErrorFormatterRegistry::new();
        assert_eq!(registry.names(), vec!["default"]);
        assert_eq!(
            registry.format("default", "Required").as_deref(),
            Some("<span class=\"error\">Required</span><br>\n")
        );
    }

    #[test]
    fn default_formatter_escapes_message_text() {
        assert_eq!(
            default_formatter("a < b & c"),
            "<span class=\"error\">a &lt; b &amp; c</span><br>\n"
        );
    }

    #[test]
    fn builtins_cover_plain_and_ignored_output() {
        let registry = ErrorFormatterRegistry::with_builtins();
        assert_eq!(registry.format("none", "<x>").as_deref(), Some("<x>"));
        assert_eq!(registry.format("escape", "a&b").as_deref(), Some("a&amp;b"));
        assert_eq!(registry.format("ignore", "gone").as_deref(), Some(""));
        assert!(registry.contains("default"));
    }

    #[test]
    fn register_replaces_and_adds_formatters() {
        let mut registry = ErrorFormatterRegistry::new();
        registry.register("default", |message| format!("!{}", message));
        registry.register("upper", |message| message.to_uppercase());
        assert_eq!(registry.format("default", "x").as_deref(), Some("!x"));
        assert_eq!(registry.format("upper", "x").as_deref(), Some("X"));
        assert_eq!(registry.format("missing", "x"), None);
    }
}
