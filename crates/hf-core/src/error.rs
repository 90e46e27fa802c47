use crate::types::SourceSpan;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Template,
    Configuration,
    Io,
}

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct HtmlFillError {
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
    pub span: Option<SourceSpan>,
}

impl HtmlFillError {
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            span: None,
        }
    }

    pub fn template(code: impl Into<String>, message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            kind: ErrorKind::Template,
            code: code.into(),
            message: message.into(),
            span: Some(span),
        }
    }

    pub fn configuration(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, code, message)
    }

    pub fn io(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, code, message)
    }

    pub fn is_template_error(&self) -> bool {
        self.kind == ErrorKind::Template
    }

    pub fn is_configuration_error(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }
}
