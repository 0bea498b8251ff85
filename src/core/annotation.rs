//! Annotation scanning for deploy-doc markers in markdown text.
//!
//! A marker is an HTML comment of the form `<!-- deploy-doc KIND [PARAM…] -->`
//! on its own line, annotating the fenced code block that follows it. The
//! scanner recognizes only markers and fences; it never interprets the rest
//! of the markdown grammar.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Inclusive 1-based line range of a fenced block in its source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One parsed marker together with the fenced block it annotates.
///
/// `line_span` covers the block's extent (opening fence through closing
/// fence), never the marker's own line. `content` is the block body,
/// verbatim and untrimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub kind: String,
    pub params: Vec<String>,
    pub source_name: String,
    pub line_span: LineSpan,
    pub content: String,
}

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"^<!--\s*deploy-doc\s+(\S+)(.*?)\s*-->\s*$").expect("marker pattern compiles")
    })
}

/// Scan `text` top to bottom for annotation markers and return the parsed
/// annotations in document order.
///
/// Kinds are not validated here; unknown kinds pass through and later
/// stages ignore them. A document without markers yields an empty vec.
/// Markers not followed by a fenced block (blank lines in between are
/// allowed) annotate nothing and are dropped, as is a block whose fence
/// is never closed.
pub fn parse(text: &str, source_name: &str) -> Vec<Annotation> {
    let lines: Vec<&str> = text.lines().collect();
    let mut annotations = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = marker_regex().captures(lines[i]) else {
            i += 1;
            continue;
        };

        let kind = caps[1].to_string();
        let params: Vec<String> = caps[2].split_whitespace().map(str::to_string).collect();

        // Skip blank lines between the marker and its block.
        let mut fence_open = i + 1;
        while fence_open < lines.len() && lines[fence_open].trim().is_empty() {
            fence_open += 1;
        }

        if fence_open >= lines.len() || !is_fence(lines[fence_open]) {
            i += 1;
            continue;
        }

        let mut fence_close = fence_open + 1;
        let mut content = String::new();
        while fence_close < lines.len() && !is_fence(lines[fence_close]) {
            content.push_str(lines[fence_close]);
            content.push('\n');
            fence_close += 1;
        }

        if fence_close >= lines.len() {
            // Unterminated fence: nothing well-formed to annotate.
            break;
        }

        annotations.push(Annotation {
            kind,
            params,
            source_name: source_name.to_string(),
            // 1-based, fence to fence inclusive.
            line_span: LineSpan::new(fence_open + 1, fence_close + 1),
            content,
        });

        i = fence_close + 1;
    }

    annotations
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}
