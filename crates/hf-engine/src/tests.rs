use hf_core::{ErrorMapping, FieldValue, HtmlFillError, SourceLocation, ValueMapping};
use pretty_assertions::assert_eq;

use crate::{ErrorFormatterRegistry, FillEngineOptions, FillingEngine};

fn values(entries: &[(&str, FieldValue)]) -> ValueMapping {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

fn errors(entries: &[(&str, &str)]) -> ErrorMapping {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn text(value: &str) -> FieldValue {
    FieldValue::from(value)
}

fn fill(defaults: ValueMapping, template: &str) -> String {
    FillingEngine::new(FillEngineOptions {
        defaults,
        ..FillEngineOptions::default()
    })
    .fill(template)
    .expect("fill should succeed")
}

fn fill_with_errors(defaults: ValueMapping, errs: ErrorMapping, template: &str) -> String {
    FillingEngine::new(FillEngineOptions {
        defaults,
        errors: Some(errs),
        use_all_keys: true,
        ..FillEngineOptions::default()
    })
    .fill(template)
    .expect("fill should succeed")
}

fn fill_err(defaults: ValueMapping, template: &str) -> HtmlFillError {
    FillingEngine::new(FillEngineOptions {
        defaults,
        ..FillEngineOptions::default()
    })
    .fill(template)
    .expect_err("fill should fail")
}

#[test]
fn template_without_controls_passes_through_verbatim() {
    let template = "<!DOCTYPE html>\n<html><head><title>Form</title>\n<style>p > a { color: red }</style></head>\n<body class=main>\n  <!-- a comment -->\n  <p>Some &amp; text <b>bold</b></p>\n  <?php echo 1 ?>\n</body></html>\n";
    assert_eq!(fill(ValueMapping::new(), template), template);
}

#[test]
fn empty_template_fills_to_empty_output() {
    assert_eq!(fill(ValueMapping::new(), ""), "");
}

#[test]
fn fills_a_complete_form() {
    let template = r#"<input type="text" name="name" value="fill">
<select name="occupation"><option value="">Default</option>
<option value="Crazy Cultist">Crazy cultist</option>
</select> <textarea cols=20 style="width: 100%" name="address">An address
</textarea> <input type="radio" name="living" value="yes">
<input type="radio" name="living" value="no">
<input type="checkbox" name="nice_guy" checked="checked">
"#;
    let expected = r#"<input type="text" name="name" value="Bob Jones">
<select name="occupation"><option value="">Default</option>
<option value="Crazy Cultist" selected="selected">Crazy cultist</option>
</select> <textarea cols=20 style="width: 100%" name="address">14 W. Canal
New Guinea</textarea> <input type="radio" name="living" value="yes">
<input type="radio" name="living" value="no" selected="selected">
<input type="checkbox" name="nice_guy">
"#;
    let defaults = values(&[
        ("name", text("Bob Jones")),
        ("occupation", text("Crazy Cultist")),
        ("address", text("14 W. Canal\nNew Guinea")),
        ("living", text("no")),
        ("nice_guy", FieldValue::Integer(0)),
    ]);
    let output = FillingEngine::new(FillEngineOptions {
        defaults,
        use_all_keys: true,
        ..FillEngineOptions::default()
    })
    .fill(template)
    .expect("every key should be used");
    assert_eq!(output, expected);
}

#[test]
fn text_input_value_is_replaced_or_appended() {
    let defaults = values(&[("a", text("x")), ("b", FieldValue::Integer(42))]);
    assert_eq!(
        fill(defaults, r#"<input name="a" value="old"> <INPUT TYPE=TEXT NAME=b>"#),
        r#"<input name="a" value="x"> <input type="TEXT" name="b" value="42">"#
    );
}

#[test]
fn missing_or_null_default_clears_text_input() {
    let defaults = values(&[("b", FieldValue::Null)]);
    assert_eq!(
        fill(defaults, r#"<input name="a" value="old"><input name="b" value="old">"#),
        r#"<input name="a" value=""><input name="b" value="">"#
    );
}

#[test]
fn text_like_input_types_are_filled() {
    let defaults = values(&[("secret", text("pw")), ("mail", text("a@b.c"))]);
    assert_eq!(
        fill(
            defaults,
            r#"<input type="password" name="secret"><input type="email" name="mail">"#
        ),
        r#"<input type="password" name="secret" value="pw"><input type="email" name="mail" value="a@b.c">"#
    );
}

#[test]
fn attribute_values_are_escaped_when_rewritten() {
    let defaults = values(&[("q", text(r#"say "hi" & <go>"#))]);
    assert_eq!(
        fill(defaults, r#"<input name="q">"#),
        r#"<input name="q" value="say &quot;hi&quot; &amp; &lt;go&gt;">"#
    );
}

#[test]
fn refilling_text_inputs_is_stable() {
    let defaults = values(&[("name", text("Bob")), ("city", text("Delft"))]);
    let template = "<form>\n  <input name=\"name\" value=\"x\">\n  <input type=text name=city>\n</form>\n";
    let once = fill(defaults.clone(), template);
    let twice = fill(defaults, &once);
    assert_eq!(once, twice);
}

#[test]
fn self_closing_input_keeps_its_form() {
    let defaults = values(&[("a", text("v"))]);
    assert_eq!(
        fill(defaults, r#"<input name="a" />"#),
        r#"<input name="a" value="v" />"#
    );
}

#[test]
fn checkbox_is_checked_only_on_exact_match() {
    let defaults = values(&[("n", FieldValue::Integer(0)), ("s", text("on"))]);
    let template = concat!(
        r#"<input type="checkbox" name="n" value="0">"#,
        r#"<input type="checkbox" name="n" checked>"#,
        r#"<input type="checkbox" name="s" value="off" checked="checked">"#,
        r#"<input type="checkbox" name="s" value="on">"#,
    );
    assert_eq!(
        fill(defaults, template),
        concat!(
            r#"<input type="checkbox" name="n" value="0" checked="checked">"#,
            r#"<input type="checkbox" name="n">"#,
            r#"<input type="checkbox" name="s" value="off">"#,
            r#"<input type="checkbox" name="s" value="on" checked="checked">"#,
        )
    );
}

#[test]
fn checkbox_without_default_is_unchecked() {
    assert_eq!(
        fill(
            ValueMapping::new(),
            r#"<input type="checkbox" name="x" value="None" checked>"#
        ),
        r#"<input type="checkbox" name="x" value="None">"#
    );
}

#[test]
fn radio_uses_selected_attribute_by_default() {
    let defaults = values(&[("living", text("no"))]);
    assert_eq!(
        fill(
            defaults,
            r#"<input type="radio" name="living" value="yes" selected><input type="radio" name="living" value="no">"#
        ),
        r#"<input type="radio" name="living" value="yes"><input type="radio" name="living" value="no" selected="selected">"#
    );
}

#[test]
fn radio_can_use_checked_attribute() {
    let engine = FillingEngine::new(FillEngineOptions {
        defaults: values(&[("living", text("no"))]),
        radio_uses_checked: true,
        ..FillEngineOptions::default()
    });
    let output = engine
        .fill(r#"<input type="radio" name="living" value="yes" checked><input type="radio" name="living" value="no">"#)
        .expect("fill should succeed");
    assert_eq!(
        output,
        r#"<input type="radio" name="living" value="yes"><input type="radio" name="living" value="no" checked="checked">"#
    );
}

#[test]
fn button_like_inputs_pass_through_untouched() {
    let template = r#"<input type=submit name=go value='Go!'><INPUT type="file" name="f"><input type="reset">"#;
    let report = FillingEngine::new(FillEngineOptions {
        defaults: values(&[("go", text("x"))]),
        ..FillEngineOptions::default()
    })
    .fill_with_report(template)
    .expect("fill should succeed");
    assert_eq!(report.output, template);
    assert_eq!(report.usage.unused_values, vec!["go".to_string()]);
}

#[test]
fn unknown_input_type_is_a_template_error() {
    let error = fill_err(
        ValueMapping::new(),
        "<p>\n  <input type=\"bogus\" name=\"x\">\n</p>",
    );
    assert!(error.is_template_error());
    assert_eq!(error.code, "TEMPLATE_INPUT_TYPE_UNKNOWN");
    assert_eq!(
        error.span.map(|span| span.start),
        Some(SourceLocation::new(2, 2))
    );
    assert!(error.message.contains("bogus"));
}

#[test]
fn textarea_content_is_replaced_and_escaped() {
    let defaults = values(&[("bio", text("<b> & co"))]);
    assert_eq!(
        fill(
            defaults,
            "<p><textarea name=\"bio\" rows=3>old <i>content</i>\nmore</textarea></p>"
        ),
        "<p><textarea name=\"bio\" rows=3>&lt;b&gt; &amp; co</textarea></p>"
    );
}

#[test]
fn textarea_without_default_is_emptied() {
    assert_eq!(
        fill(ValueMapping::new(), "<textarea name=\"x\">keep?</textarea>!"),
        "<textarea name=\"x\"></textarea>!"
    );
}

#[test]
fn self_closing_textarea_is_expanded() {
    let defaults = values(&[("x", text("v"))]);
    assert_eq!(
        fill(defaults, "<textarea name=\"x\"/>after"),
        "<textarea name=\"x\">v</textarea>after"
    );
}

#[test]
fn select_marks_at_most_one_matching_option() {
    let template = r#"<select name="pick"><option value="a" selected>A</option><option value="b">B</option><option value="c">C</option></select>"#;
    let picked = fill(values(&[("pick", text("b"))]), template);
    assert_eq!(
        picked,
        r#"<select name="pick"><option value="a">A</option><option value="b" selected="selected">B</option><option value="c">C</option></select>"#
    );
    assert_eq!(picked.matches("selected=\"selected\"").count(), 1);

    let none = fill(values(&[("pick", text("z"))]), template);
    assert_eq!(none.matches("selected=\"selected\"").count(), 0);
}

#[test]
fn numeric_defaults_match_option_values() {
    let template = r#"<select name="n"><option value="1">one</option><option value="2">two</option></select>"#;
    assert_eq!(
        fill(values(&[("n", FieldValue::Integer(2))]), template),
        r#"<select name="n"><option value="1">one</option><option value="2" selected="selected">two</option></select>"#
    );
}

#[test]
fn select_without_name_never_matches() {
    assert_eq!(
        fill(
            values(&[("a", text("a"))]),
            r#"<select><option value="a" selected>A</option></select>"#
        ),
        r#"<select><option value="a">A</option></select>"#
    );
}

#[test]
fn option_outside_select_is_a_template_error() {
    let error = fill_err(
        ValueMapping::new(),
        r#"<select name="a"></select><option value="x">X</option>"#,
    );
    assert_eq!(error.code, "TEMPLATE_OPTION_OUTSIDE_SELECT");
    assert_eq!(
        error.span.map(|span| span.start),
        Some(SourceLocation::new(1, 26))
    );
}

#[test]
fn iferror_block_shows_content_and_error_when_field_has_error() {
    let output = fill_with_errors(
        ValueMapping::new(),
        errors(&[("name", "Required")]),
        r#"<p><form:iferror name="name">BAD<form:error name="name"/></form:iferror></p>"#,
    );
    assert_eq!(
        output,
        "<p>BAD<span class=\"error\">Required</span><br>\n</p>"
    );
}

#[test]
fn iferror_block_is_dropped_when_field_has_no_error() {
    let output = fill_with_errors(
        values(&[("age", FieldValue::Integer(3))]),
        errors(&[("name", "Required")]),
        "before<form:iferror name=\"age\">hidden\n<input name=\"age\">\n</form:iferror>after<form:error name=\"name\">",
    );
    assert_eq!(
        output,
        "beforeafter<span class=\"error\">Required</span><br>\n"
    );
}

#[test]
fn empty_error_message_counts_as_no_error() {
    let output = fill_with_errors(
        ValueMapping::new(),
        errors(&[("name", "")]),
        r#"[<form:iferror name="name">x<form:error></form:iferror>]"#,
    );
    assert_eq!(output, "[]");
}

#[test]
fn bare_error_uses_enclosing_iferror_field() {
    let output = fill_with_errors(
        ValueMapping::new(),
        errors(&[("email", "Invalid")]),
        r#"<form:iferror name="email"><div><form:error></div></form:iferror>"#,
    );
    assert_eq!(
        output,
        "<div><span class=\"error\">Invalid</span><br>\n</div>"
    );
}

#[test]
fn nested_iferror_blocks_restore_outer_state() {
    let output = fill_with_errors(
        ValueMapping::new(),
        errors(&[("outer", "Outer")]),
        r#"<form:iferror name="outer">[<form:error>]<form:iferror name="inner">X<form:error/></form:iferror>]</form:iferror>"#,
    );
    assert_eq!(output, "[<span class=\"error\">Outer</span><br>\n]]");
}

#[test]
fn negated_iferror_shows_block_only_without_error() {
    let template = r#"<form:iferror name="not email">ok</form:iferror>!"#;
    let engine = |errs: ErrorMapping| {
        FillingEngine::new(FillEngineOptions {
            errors: Some(errs),
            ..FillEngineOptions::default()
        })
    };
    assert_eq!(
        engine(ErrorMapping::new())
            .fill(template)
            .expect("fill should succeed"),
        "ok!"
    );
    assert_eq!(
        engine(errors(&[("email", "Bad")]))
            .fill(template)
            .expect("fill should succeed"),
        "!"
    );
}

#[test]
fn self_closing_iferror_is_elided() {
    assert_eq!(
        fill(ValueMapping::new(), r#"a<form:iferror name="x"/>b"#),
        "ab"
    );
}

#[test]
fn iferror_without_name_is_a_template_error() {
    let error = fill_err(ValueMapping::new(), "<form:iferror>x</form:iferror>");
    assert_eq!(error.code, "TEMPLATE_IFERROR_NAME_MISSING");
}

#[test]
fn error_without_resolvable_name_is_a_template_error() {
    let error = fill_err(ValueMapping::new(), "<p><form:error></p>");
    assert_eq!(error.code, "TEMPLATE_ERROR_NAME_MISSING");
    assert!(error.is_template_error());
}

#[test]
fn custom_formatters_render_errors() {
    let engine = FillingEngine::new(FillEngineOptions {
        errors: Some(errors(&[("a", "Oops")])),
        error_formatters: Some(
            ErrorFormatterRegistry::new().with("bold", |message| format!("<b>{}</b>", message)),
        ),
        ..FillEngineOptions::default()
    });
    assert_eq!(
        engine
            .fill(r#"<form:error name="a" format="bold"> <form:error name="a">"#)
            .expect("fill should succeed"),
        "<b>Oops</b> <span class=\"error\">Oops</span><br>\n"
    );
}

#[test]
fn unknown_formatter_is_a_template_error() {
    let engine = FillingEngine::new(FillEngineOptions::default());
    let error = engine
        .fill(r#"<form:error name="a" format="nope">"#)
        .expect_err("unknown formatter should fail");
    assert_eq!(error.code, "TEMPLATE_FORMATTER_UNKNOWN");
}

#[test]
fn strict_mode_rejects_unused_default_keys() {
    let template = "<p>no fields here</p>";
    let strict = FillingEngine::new(FillEngineOptions {
        defaults: values(&[("unused", text("x"))]),
        use_all_keys: true,
        ..FillEngineOptions::default()
    });
    let error = strict.fill(template).expect_err("unused key should fail");
    assert!(error.is_configuration_error());
    assert_eq!(error.code, "CONFIG_UNUSED_KEYS");
    assert!(error.message.contains("unused"));

    let lenient = FillingEngine::new(FillEngineOptions {
        defaults: values(&[("unused", text("x"))]),
        ..FillEngineOptions::default()
    });
    assert_eq!(
        lenient.fill(template).expect("lenient fill should pass"),
        template
    );
}

#[test]
fn strict_mode_rejects_unused_error_keys() {
    let engine = FillingEngine::new(FillEngineOptions {
        defaults: values(&[("email", text("x"))]),
        errors: Some(errors(&[("email", "bad"), ("age", "Too young")])),
        use_all_keys: true,
        ..FillEngineOptions::default()
    });
    let error = engine
        .fill(r#"<input name="email"><form:error name="email"><form:iferror name="age">!</form:iferror>"#)
        .expect_err("unused error key should fail");
    assert_eq!(error.code, "CONFIG_UNUSED_KEYS");
    assert!(error.message.contains("errors were not used in the form: age"));
    assert!(!error.message.contains("defaults were not used"));
}

#[test]
fn option_key_counts_as_used_only_on_match() {
    let template = r#"<select name="s"><option value="a">A</option></select>"#;
    let report = FillingEngine::new(FillEngineOptions {
        defaults: values(&[("s", text("zzz"))]),
        ..FillEngineOptions::default()
    })
    .fill_with_report(template)
    .expect("fill should succeed");
    assert_eq!(report.usage.unused_values, vec!["s".to_string()]);
}

#[test]
fn multi_line_text_is_copied_with_line_breaks() {
    let template = "<div>\n  line one\n  line two\n  line three\n</div>\n<input name=\"a\">\n";
    assert_eq!(
        fill(values(&[("a", text("x"))]), template),
        "<div>\n  line one\n  line two\n  line three\n</div>\n<input name=\"a\" value=\"x\">\n"
    );
}

#[test]
fn crlf_line_endings_round_trip() {
    assert_eq!(
        fill(values(&[("a", text("v"))]), "<p>\r\n<input name=a>\r\n</p>\r\n"),
        "<p>\r\n<input name=\"a\" value=\"v\">\r\n</p>\r\n"
    );
}

#[test]
fn raw_text_elements_hide_markup_from_the_engine() {
    let template = r#"<script>var s = "<input type=bogus>";</script><input name="a">"#;
    assert_eq!(
        fill(values(&[("a", text("1"))]), template),
        r#"<script>var s = "<input type=bogus>";</script><input name="a" value="1">"#
    );
}

#[test]
fn multibyte_text_around_controls_is_preserved() {
    assert_eq!(
        fill(
            values(&[("naam", text("Zoë"))]),
            "Naam ✓ <input name=\"naam\"> — klaar\n"
        ),
        "Naam ✓ <input name=\"naam\" value=\"Zoë\"> — klaar\n"
    );
}

#[test]
fn one_engine_serves_concurrent_fills() {
    let engine = FillingEngine::new(FillEngineOptions {
        defaults: values(&[("a", text("x"))]),
        ..FillEngineOptions::default()
    });
    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|index| {
                let engine = &engine;
                scope.spawn(move || {
                    engine
                        .fill(&format!("<p>{}</p><input name=\"a\">", index))
                        .expect("fill should succeed")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread should finish"))
            .collect()
    });
    for (index, output) in outputs.iter().enumerate() {
        assert_eq!(output, &format!("<p>{}</p><input name=\"a\" value=\"x\">", index));
    }
}
