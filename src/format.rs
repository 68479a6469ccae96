//! Reply formatting.
//!
//! Turns the raw text returned by the model into a [`FormattedReply`]: an
//! ordered list of prose segments and highlighted code blocks. Fenced code is
//! recognised first, then bare JSON payloads, and anything else is kept as a
//! single plain text segment.
//!
//! Rendering goes through [`FormattedReply::to_html`], which escapes all prose
//! and labels. Highlighted markup is produced by syntect, which escapes the
//! code it wraps, so model output never reaches the page as raw markup.

use crate::error::ChatError;
use once_cell::sync::Lazy;
use regex::Regex;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

pub const DEFAULT_LANGUAGE: &str = "text";
const JSON_LANGUAGE: &str = "json";
const FENCE_DELIMITER: &str = "```";
const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

// A language tag only counts when whitespace follows it, so the body of an
// untagged one-line fence such as ```ls``` is not taken for a tag.
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:([A-Za-z0-9_+#.\-]+)(?:[ \t]*\r?\n|[ \t]+)|[ \t]*\r?\n?)((?s:.*?))```")
        .expect("fenced block pattern is valid")
});

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static THEME: Lazy<Theme> = Lazy::new(|| {
    let mut themes = ThemeSet::load_defaults();
    themes.themes.remove(HIGHLIGHT_THEME).unwrap_or_default()
});

/// A highlighted code region with its language label.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeBlock {
    pub language: String,
    pub source: String,
    pub highlighted: String,
}

impl CodeBlock {
    pub fn new(language: &str, source: &str) -> Self {
        let highlighted = highlight(language, source).unwrap_or_else(|err| {
            tracing::debug!(language, %err, "highlighting failed, using escaped source");
            escape_html(source)
        });
        Self {
            language: language.to_string(),
            source: source.to_string(),
            highlighted,
        }
    }

    pub fn to_html(&self) -> String {
        let language = escape_html(&self.language);
        format!(
            "<div class=\"code-block\"><div class=\"code-header\"><span class=\"code-language\">{language}</span></div><pre class=\"code-body\"><code class=\"language-{language}\">{}</code></pre></div>",
            self.highlighted
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Text(String),
    Code(CodeBlock),
}

impl Segment {
    fn to_html(&self) -> String {
        match self {
            Segment::Text(text) => format!("<div class=\"reply-text\">{}</div>", escape_html(text)),
            Segment::Code(block) => block.to_html(),
        }
    }
}

/// Display-ready form of a model reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormattedReply {
    segments: Vec<Segment>,
}

impl FormattedReply {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Code(block) => Some(block),
            Segment::Text(_) => None,
        })
    }

    /// The text of a reply that was kept as a single plain segment.
    pub fn as_plain_text(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [Segment::Text(text)] => Some(text),
            _ => None,
        }
    }

    pub fn to_html(&self) -> String {
        self.segments.iter().map(Segment::to_html).collect()
    }
}

pub fn format_reply(raw: &str) -> FormattedReply {
    if raw.is_empty() {
        return FormattedReply::default();
    }

    if raw.contains(FENCE_DELIMITER) {
        if let Some(segments) = split_fenced_blocks(raw) {
            return FormattedReply { segments };
        }
    }

    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        match pretty_json(trimmed) {
            Ok(pretty) => {
                return FormattedReply {
                    segments: vec![Segment::Code(CodeBlock::new(JSON_LANGUAGE, &pretty))],
                };
            }
            Err(err) => tracing::debug!(%err, "reply looked like JSON but did not parse"),
        }
    }

    FormattedReply {
        segments: vec![Segment::Text(raw.to_string())],
    }
}

fn split_fenced_blocks(text: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut matched = false;

    for caps in FENCED_BLOCK.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        matched = true;
        push_prose(&mut segments, &text[cursor..whole.start()]);

        let language = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE);
        let body = caps.get(2).map_or("", |m| m.as_str());
        segments.push(Segment::Code(CodeBlock::new(language, strip_closing_newline(body))));
        cursor = whole.end();
    }

    if !matched {
        return None;
    }
    push_prose(&mut segments, &text[cursor..]);
    Some(segments)
}

fn push_prose(segments: &mut Vec<Segment>, prose: &str) {
    if !prose.is_empty() {
        segments.push(Segment::Text(prose.to_string()));
    }
}

fn strip_closing_newline(body: &str) -> &str {
    match body.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => body,
    }
}

fn pretty_json(text: &str) -> Result<String, ChatError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn highlight(language: &str, source: &str) -> Result<String, ChatError> {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(language)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, &THEME);
    let mut html = String::with_capacity(source.len() * 2);
    for line in LinesWithEndings::from(source) {
        let regions = highlighter
            .highlight_line(line, &SYNTAX_SET)
            .map_err(|err| ChatError::Format(err.to_string()))?;
        let line_html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
            .map_err(|err| ChatError::Format(err.to_string()))?;
        html.push_str(&line_html);
    }
    Ok(html)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
