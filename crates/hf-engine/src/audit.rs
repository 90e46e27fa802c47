use std::collections::{BTreeMap, BTreeSet};

use hf_core::HtmlFillError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyUsage {
    values: BTreeSet<String>,
    errors: BTreeSet<String>,
}

impl KeyUsage {
    pub fn mark_value(&mut self, key: &str) {
        if !self.values.contains(key) {
            self.values.insert(key.to_string());
        }
    }

    pub fn mark_error(&mut self, key: &str) {
        if !self.errors.contains(key) {
            self.errors.insert(key.to_string());
        }
    }

    pub fn used_values(&self) -> &BTreeSet<String> {
        &self.values
    }

    pub fn used_errors(&self) -> &BTreeSet<String> {
        &self.errors
    }

    pub fn report<V, E>(&self, defaults: &BTreeMap<String, V>, errors: &BTreeMap<String, E>) -> KeyUsageReport {
        KeyUsageReport {
            unused_values: defaults
                .keys()
                .filter(|key| !self.values.contains(*key))
                .cloned()
                .collect(),
            unused_errors: errors
                .keys()
                .filter(|key| !self.errors.contains(*key))
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyUsageReport {
    pub unused_values: Vec<String>,
    pub unused_errors: Vec<String>,
}

impl KeyUsageReport {
    pub fn is_clean(&self) -> bool {
        self.unused_values.is_empty() && self.unused_errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), HtmlFillError> {
        if self.is_clean() {
            return Ok(());
        }
        let mut problems = Vec::new();
        if !self.unused_values.is_empty() {
            problems.push(format!(
                "These keys from defaults were not used in the form: {}",
                self.unused_values.join(", ")
            ));
        }
        if !self.unused_errors.is_empty() {
            problems.push(format!(
                "These keys from errors were not used in the form: {}",
                self.unused_errors.join(", ")
            ));
        }
        Err(HtmlFillError::configuration(
            "CONFIG_UNUSED_KEYS",
            problems.join("; "),
        ))
    }
}
