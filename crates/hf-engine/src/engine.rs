use hf_core::{ErrorMapping, FieldValue, HtmlFillError, SourceLocation, SourceSpan, Tag, ValueMapping};
use hf_parser::{tokenize_html, HtmlEvent};
use html_escape::encode_text;

use crate::audit::KeyUsageReport;
use crate::formatters::{ErrorFormatterRegistry, DEFAULT_FORMATTER};
use crate::state::{ControlTag, EngineState, Mode, SelectContext};
use crate::tracker::PositionTracker;

const TEXT_INPUT_TYPES: &[&str] = &[
    "text",
    "password",
    "hidden",
    "email",
    "search",
    "tel",
    "url",
    "number",
    "date",
    "datetime-local",
    "month",
    "week",
    "time",
    "color",
    "range",
];

const PASSTHROUGH_INPUT_TYPES: &[&str] = &["file", "button", "submit", "reset", "image"];

#[derive(Clone, Debug, Default)]
pub struct FillEngineOptions {
    pub defaults: ValueMapping,
    pub errors: Option<ErrorMapping>,
    pub use_all_keys: bool,
    pub error_formatters: Option<ErrorFormatterRegistry>,
    pub radio_uses_checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub output: String,
    pub usage: KeyUsageReport,
}

#[derive(Clone, Debug)]
pub struct FillingEngine {
    defaults: ValueMapping,
    errors: ErrorMapping,
    use_all_keys: bool,
    formatters: ErrorFormatterRegistry,
    radio_uses_checked: bool,
}

impl FillingEngine {
    pub fn new(options: FillEngineOptions) -> Self {
        Self {
            defaults: options.defaults,
            errors: options.errors.unwrap_or_default(),
            use_all_keys: options.use_all_keys,
            formatters: options.error_formatters.unwrap_or_default(),
            radio_uses_checked: options.radio_uses_checked,
        }
    }

    pub fn fill(&self, template: &str) -> Result<String, HtmlFillError> {
        self.fill_with_report(template).map(|report| report.output)
    }

    pub fn fill_with_report(&self, template: &str) -> Result<FillReport, HtmlFillError> {
        let mut run = FillRun::new(self, template);
        run.run()?;
        let FillRun { state, .. } = run;

        let usage = state.usage.report(&self.defaults, &self.errors);
        tracing::debug!(
            target: "hf_engine",
            input_bytes = template.len(),
            output_bytes = state.output.len(),
            used_values = state.usage.used_values().len(),
            used_errors = state.usage.used_errors().len(),
            "filled template"
        );
        if self.use_all_keys {
            usage.clone().into_result()?;
        }

        Ok(FillReport {
            output: state.output,
            usage,
        })
    }

    fn lookup(&self, name: Option<&str>) -> Option<&FieldValue> {
        name.and_then(|name| self.defaults.get(name))
            .filter(|value| !matches!(value, FieldValue::Null))
    }

    fn has_error(&self, name: &str) -> bool {
        self.errors
            .get(name)
            .is_some_and(|message| !message.is_empty())
    }
}

struct FillRun<'a> {
    engine: &'a FillingEngine,
    source: &'a str,
    tracker: PositionTracker<'a>,
    state: EngineState,
}

impl<'a> FillRun<'a> {
    fn new(engine: &'a FillingEngine, source: &'a str) -> Self {
        Self {
            engine,
            source,
            tracker: PositionTracker::new(source),
            state: EngineState::new(source.len()),
        }
    }

    fn run(&mut self) -> Result<(), HtmlFillError> {
        let source = self.source;
        for token in tokenize_html(source) {
            self.advance_to(token.span.start);
            match token.event {
                HtmlEvent::StartTag(tag) => {
                    let raw = &source[token.range.clone()];
                    self.handle_start_tag(tag, raw, &token.span)?;
                }
                HtmlEvent::EndTag { name } => self.close_element(ControlTag::from_name(&name)),
                HtmlEvent::Text
                | HtmlEvent::Comment
                | HtmlEvent::Declaration
                | HtmlEvent::ProcessingInstruction => {}
            }
        }
        let end = self.tracker.end_location();
        self.advance_to(end);
        Ok(())
    }

    fn advance_to(&mut self, target: SourceLocation) {
        let pending_skip = std::mem::take(&mut self.state.pending_skip);
        if pending_skip || self.state.mode != Mode::Normal {
            self.tracker.skip_to(target);
        } else {
            self.tracker.copy_until(target, &mut self.state.output);
        }
    }

    fn emit(&mut self, text: &str) {
        if !self.state.is_suppressed() {
            self.state.output.push_str(text);
        }
    }

    fn replace_tag(&mut self, tag: &Tag) {
        let rendered = tag.render();
        self.emit(&rendered);
        self.state.pending_skip = true;
    }

    fn handle_start_tag(&mut self, tag: Tag, raw: &str, span: &SourceSpan) -> Result<(), HtmlFillError> {
        let control = ControlTag::from_name(&tag.name);
        if control == ControlTag::Other {
            return Ok(());
        }
        tracing::trace!(
            target: "hf_engine",
            tag = %tag.name,
            line = span.start.line,
            column = span.start.column,
            mode = ?self.state.mode,
            "control tag"
        );

        let self_closing = tag.self_closing;
        match control {
            ControlTag::Input => self.handle_input(tag, span)?,
            ControlTag::Textarea => self.handle_textarea(tag, raw),
            ControlTag::Select => {
                self.state.current_select = Some(SelectContext {
                    name: tag.get_attr("name").map(str::to_string),
                });
            }
            ControlTag::Option => self.handle_option(tag, span)?,
            ControlTag::FormError => self.handle_error(&tag, span)?,
            ControlTag::FormIfError => self.handle_iferror(&tag, span)?,
            ControlTag::Other => {}
        }
        if self_closing {
            self.close_element(control);
        }
        Ok(())
    }

    fn close_element(&mut self, control: ControlTag) {
        match control {
            ControlTag::Textarea => {
                if self.state.mode == Mode::InTextarea {
                    self.state.mode = Mode::Normal;
                    self.state.pending_skip = true;
                }
            }
            ControlTag::Select => self.state.current_select = None,
            ControlTag::FormIfError => self.state.leave_iferror(),
            ControlTag::Input
            | ControlTag::Option
            | ControlTag::FormError
            | ControlTag::Other => {}
        }
    }

    fn handle_input(&mut self, mut tag: Tag, span: &SourceSpan) -> Result<(), HtmlFillError> {
        let input_type = tag
            .non_empty_attr("type")
            .unwrap_or("text")
            .to_ascii_lowercase();
        let name = tag.get_attr("name").map(str::to_string);
        let value = self.engine.lookup(name.as_deref());

        if TEXT_INPUT_TYPES.contains(&input_type.as_str()) {
            tag.set_attr("value", value.map(FieldValue::render).unwrap_or_default());
        } else if input_type == "checkbox" {
            toggle_attr(&mut tag, "checked", value);
        } else if input_type == "radio" {
            let attr = if self.engine.radio_uses_checked {
                "checked"
            } else {
                "selected"
            };
            toggle_attr(&mut tag, attr, value);
        } else if PASSTHROUGH_INPUT_TYPES.contains(&input_type.as_str()) {
            return Ok(());
        } else {
            return Err(HtmlFillError::template(
                "TEMPLATE_INPUT_TYPE_UNKNOWN",
                format!(
                    "Unknown <input> type \"{}\" at {}.",
                    input_type, span.start
                ),
                span.clone(),
            ));
        }

        self.replace_tag(&tag);
        if let Some(name) = &name {
            self.state.usage.mark_value(name);
        }
        Ok(())
    }

    fn handle_textarea(&mut self, tag: Tag, raw: &str) {
        let name = tag.get_attr("name");
        let value = self
            .engine
            .lookup(name)
            .map(FieldValue::render)
            .unwrap_or_default();
        if let Some(name) = name {
            self.state.usage.mark_value(name);
        }
        if self.state.is_suppressed() {
            return;
        }

        if tag.self_closing {
            let mut opening = tag.clone();
            opening.self_closing = false;
            self.emit(&opening.render());
        } else {
            self.emit(raw);
        }
        self.emit(&encode_text(&value));
        self.emit("</textarea>");
        self.state.mode = Mode::InTextarea;
    }

    fn handle_option(&mut self, mut tag: Tag, span: &SourceSpan) -> Result<(), HtmlFillError> {
        let Some(select) = &self.state.current_select else {
            return Err(HtmlFillError::template(
                "TEMPLATE_OPTION_OUTSIDE_SELECT",
                format!("<option> outside of <select> at {}.", span.start),
                span.clone(),
            ));
        };
        let select_name = select.name.clone();
        let value = self.engine.lookup(select_name.as_deref());

        if value_matches(value, tag.get_attr("value")) {
            tag.set_attr("selected", "selected");
            if let Some(name) = &select_name {
                self.state.usage.mark_value(name);
            }
        } else {
            tag.remove_attr("selected");
        }
        self.replace_tag(&tag);
        Ok(())
    }

    fn handle_iferror(&mut self, tag: &Tag, span: &SourceSpan) -> Result<(), HtmlFillError> {
        let Some(raw_name) = tag.non_empty_attr("name") else {
            return Err(HtmlFillError::template(
                "TEMPLATE_IFERROR_NAME_MISSING",
                format!("Name attribute in <form:iferror> required at {}.", span.start),
                span.clone(),
            ));
        };
        let (field, inverted) = match raw_name.trim().strip_prefix("not ") {
            Some(rest) => (rest.trim(), true),
            None => (raw_name.trim(), false),
        };
        let show = self.engine.has_error(field) != inverted;
        self.state.enter_iferror(field, show);
        Ok(())
    }

    fn handle_error(&mut self, tag: &Tag, span: &SourceSpan) -> Result<(), HtmlFillError> {
        let name = tag
            .non_empty_attr("name")
            .or_else(|| self.state.current_error_field())
            .map(str::to_string);
        let Some(name) = name else {
            return Err(HtmlFillError::template(
                "TEMPLATE_ERROR_NAME_MISSING",
                format!(
                    "Name attribute in <form:error> required if not contained in <form:iferror> at {}.",
                    span.start
                ),
                span.clone(),
            ));
        };
        let format = tag.non_empty_attr("format").unwrap_or(DEFAULT_FORMATTER);
        if !self.engine.formatters.contains(format) {
            return Err(HtmlFillError::template(
                "TEMPLATE_FORMATTER_UNKNOWN",
                format!("Unknown error formatter \"{}\" at {}.", format, span.start),
                span.clone(),
            ));
        }

        self.state.usage.mark_error(&name);
        let message = self
            .engine
            .errors
            .get(&name)
            .filter(|message| !message.is_empty());
        if let Some(formatted) = message.and_then(|message| self.engine.formatters.format(format, message)) {
            self.emit(&formatted);
        }
        self.state.pending_skip = true;
        Ok(())
    }
}

fn value_matches(value: Option<&FieldValue>, attr: Option<&str>) -> bool {
    match (value, attr) {
        (Some(value), Some(attr)) => value.render() == attr,
        _ => false,
    }
}

fn toggle_attr(tag: &mut Tag, attr: &str, value: Option<&FieldValue>) {
    if value_matches(value, tag.get_attr("value")) {
        tag.set_attr(attr, attr);
    } else {
        tag.remove_attr(attr);
    }
}
