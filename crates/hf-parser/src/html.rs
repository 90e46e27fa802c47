use std::ops::Range;
use std::sync::OnceLock;

use hf_core::{Attribute, SourceSpan, Tag};
use html_escape::decode_html_entities;
use regex::Regex;

use crate::line_index::LineIndex;

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlEvent {
    StartTag(Tag),
    EndTag { name: String },
    Text,
    Comment,
    Declaration,
    ProcessingInstruction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlToken {
    pub event: HtmlEvent,
    pub range: Range<usize>,
    pub span: SourceSpan,
}

/// Splits `source` into a flat event stream. The tokenizer never fails:
/// markup it cannot make sense of is reported as text, so the token ranges
/// always cover the whole source without gaps or overlap.
pub fn tokenize_html(source: &str) -> Vec<HtmlToken> {
    let index = LineIndex::new(source);
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut raw_text: Option<String> = None;

    while pos < bytes.len() {
        if let Some(element) = raw_text.take() {
            let end = find_closing_tag(source, pos, &element).unwrap_or(bytes.len());
            if end > pos {
                push_token(&mut tokens, &index, HtmlEvent::Text, pos..end);
            }
            pos = end;
            continue;
        }

        if bytes[pos] == b'<' {
            if let Some((event, end)) = scan_markup(source, pos) {
                if let HtmlEvent::StartTag(tag) = &event {
                    if !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
                        raw_text = Some(tag.name.clone());
                    }
                }
                push_token(&mut tokens, &index, event, pos..end);
                pos = end;
                continue;
            }
        }

        let search_from = if bytes[pos] == b'<' { pos + 1 } else { pos };
        let end = source[search_from..]
            .find('<')
            .map(|offset| search_from + offset)
            .unwrap_or(bytes.len());
        push_token(&mut tokens, &index, HtmlEvent::Text, pos..end);
        pos = end;
    }

    tokens
}

fn push_token(tokens: &mut Vec<HtmlToken>, index: &LineIndex, event: HtmlEvent, range: Range<usize>) {
    let span = index.span(range.start, range.end);
    tracing::trace!(target: "hf_parser::html", ?event, line = span.start.line, column = span.start.column, "token");
    tokens.push(HtmlToken { event, range, span });
}

fn scan_markup(source: &str, start: usize) -> Option<(HtmlEvent, usize)> {
    let rest = &source[start..];
    if rest.starts_with("<!--") {
        let end = rest[4..].find("-->")? + 4 + 3;
        return Some((HtmlEvent::Comment, start + end));
    }
    if rest.starts_with("<![") {
        let end = rest.find("]]>")? + 3;
        return Some((HtmlEvent::Declaration, start + end));
    }
    if rest.starts_with("<!") {
        let end = rest.find('>')? + 1;
        return Some((HtmlEvent::Declaration, start + end));
    }
    if rest.starts_with("<?") {
        let end = rest.find('>')? + 1;
        return Some((HtmlEvent::ProcessingInstruction, start + end));
    }
    if let Some(after) = rest.strip_prefix("</") {
        let name = tag_name_regex().find(after)?;
        let end = after.find('>')? + 2 + 1;
        return Some((
            HtmlEvent::EndTag {
                name: name.as_str().to_ascii_lowercase(),
            },
            start + end,
        ));
    }

    let name = tag_name_regex().find(&rest[1..])?;
    let attrs_start = 1 + name.end();
    let close = find_tag_close(rest, attrs_start)?;
    let (attributes, self_closing) = parse_attributes(&rest[attrs_start..close]);
    let tag = Tag {
        name: name.as_str().to_ascii_lowercase(),
        attributes,
        self_closing,
    };
    Some((HtmlEvent::StartTag(tag), start + close + 1))
}

fn find_tag_close(tag: &str, from: usize) -> Option<usize> {
    let bytes = tag.as_bytes();
    let mut quote: Option<u8> = None;
    let mut last_significant = 0u8;
    for (offset, byte) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(open) => {
                if *byte == open {
                    quote = None;
                    last_significant = *byte;
                }
            }
            None => match byte {
                b'>' => return Some(offset),
                b'"' | b'\'' if last_significant == b'=' => quote = Some(*byte),
                byte if byte.is_ascii_whitespace() => {}
                byte => last_significant = *byte,
            },
        }
    }
    None
}

fn parse_attributes(raw: &str) -> (Vec<Attribute>, bool) {
    let mut attributes = Vec::new();
    let mut consumed = 0usize;
    for caps in attribute_regex().captures_iter(raw) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        consumed = whole.end();
        let name = caps
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        let value = caps.get(2).map(|m| unquote_attribute_value(m.as_str()));
        attributes.push(Attribute::new(name, value));
    }
    let self_closing = raw[consumed..].trim() == "/";
    (attributes, self_closing)
}

fn unquote_attribute_value(raw: &str) -> String {
    let inner = if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')))
    {
        &raw[1..raw.len() - 1]
    } else {
        raw
    };
    decode_html_entities(inner).into_owned()
}

fn find_closing_tag(source: &str, from: usize, element: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut search = from;
    while let Some(offset) = source[search..].find("</") {
        let at = search + offset;
        let name_start = at + 2;
        let name_end = name_start + element.len();
        if name_end <= bytes.len()
            && bytes[name_start..name_end].eq_ignore_ascii_case(element.as_bytes())
        {
            match bytes.get(name_end) {
                None => return Some(at),
                Some(next) if next.is_ascii_whitespace() || *next == b'/' || *next == b'>' => {
                    return Some(at)
                }
                _ => {}
            }
        }
        search = at + 2;
    }
    None
}

fn tag_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z][-.a-zA-Z0-9:_]*").expect("tag name regex"))
}

fn attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"([^\s/>="'][^\s/>="']*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'>][^\s>]*))?"#)
            .expect("attribute regex")
    })
}
