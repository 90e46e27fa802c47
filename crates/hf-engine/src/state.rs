use crate::audit::KeyUsage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTag {
    Input,
    Textarea,
    Select,
    Option,
    FormError,
    FormIfError,
    Other,
}

impl ControlTag {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "input" => Self::Input,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "option" => Self::Option,
            "form:error" => Self::FormError,
            "form:iferror" => Self::FormIfError,
            _ => Self::Other,
        }
    }
}

/// Whether source text between events is copied to the output.
///
/// `InTextarea` drops the original textarea content, which was already
/// replaced. `SuppressedError` drops everything, generated markup included,
/// until the `form:iferror` that opened it is closed; `depth` counts the
/// `form:iferror` blocks opened since then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    InTextarea,
    SuppressedError { depth: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectContext {
    pub(crate) name: Option<String>,
}

#[derive(Debug)]
pub(crate) struct EngineState {
    pub(crate) output: String,
    pub(crate) mode: Mode,
    pub(crate) current_select: Option<SelectContext>,
    pub(crate) error_fields: Vec<String>,
    pub(crate) pending_skip: bool,
    pub(crate) usage: KeyUsage,
}

impl EngineState {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            mode: Mode::Normal,
            current_select: None,
            error_fields: Vec::new(),
            pending_skip: false,
            usage: KeyUsage::default(),
        }
    }

    pub(crate) fn is_suppressed(&self) -> bool {
        matches!(self.mode, Mode::SuppressedError { .. })
    }

    pub(crate) fn current_error_field(&self) -> Option<&str> {
        self.error_fields.last().map(String::as_str)
    }

    pub(crate) fn enter_iferror(&mut self, field: &str, show: bool) {
        self.error_fields.push(field.to_string());
        self.mode = match self.mode {
            Mode::SuppressedError { depth } => Mode::SuppressedError { depth: depth + 1 },
            mode if show => mode,
            _ => Mode::SuppressedError { depth: 1 },
        };
        self.pending_skip = true;
    }

    pub(crate) fn leave_iferror(&mut self) {
        self.error_fields.pop();
        if let Mode::SuppressedError { depth } = self.mode {
            self.mode = if depth > 1 {
                Mode::SuppressedError { depth: depth - 1 }
            } else {
                Mode::Normal
            };
        }
        self.pending_skip = true;
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn control_tag_lookup_ignores_case() {
        assert_eq!(ControlTag::from_name("INPUT"), ControlTag::Input);
        assert_eq!(ControlTag::from_name("Form:IfError"), ControlTag::FormIfError);
        assert_eq!(ControlTag::from_name("form:error"), ControlTag::FormError);
        assert_eq!(ControlTag::from_name("div"), ControlTag::Other);
    }

    #[test]
    fn nested_iferror_blocks_track_suppression_depth() {
        let mut state = EngineState::new(0);
        state.enter_iferror("outer", true);
        assert_eq!(state.mode, Mode::Normal);
        state.enter_iferror("inner", false);
        assert_eq!(state.mode, Mode::SuppressedError { depth: 1 });
        state.enter_iferror("deeper", true);
        assert_eq!(state.mode, Mode::SuppressedError { depth: 2 });
        assert_eq!(state.current_error_field(), Some("deeper"));

        state.leave_iferror();
        assert_eq!(state.mode, Mode::SuppressedError { depth: 1 });
        state.leave_iferror();
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.current_error_field(), Some("outer"));
        state.leave_iferror();
        assert_eq!(state.current_error_field(), None);
        assert!(state.pending_skip);
    }
}
