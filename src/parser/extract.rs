//! Extractor: turns merged spans into field blobs with attached snippets.

use crate::delimiters::{DelimiterSpec, Markers};
use crate::model::{FieldBlob, Span, SpanKind};
use crate::parser::regions::Token;

struct Extraction<'s> {
    spec: &'s DelimiterSpec,
    markers: &'s Markers,
    blobs: Vec<FieldBlob>,
    next_snippet: usize,
}

impl Extraction<'_> {
    /// Normalize `raw` and attach it to the most recently opened blob.
    fn attach(&mut self, raw: &str) {
        let code = normalize_snippet(raw, self.spec, self.markers);
        if code.is_empty() {
            tracing::trace!("skipping empty code snippet");
            return;
        }
        match self.blobs.last_mut() {
            Some(blob) => {
                blob.push_snippet(self.next_snippet, code);
                self.next_snippet += 1;
            }
            None => tracing::debug!("dropping code snippet found before any documentation block"),
        }
    }
}

/// Produce one field blob per documentation span, in span order.
///
/// Snippet spans attach to the blob opened last; snippets nested inside a
/// documentation span are cut out of its text and attach to it. A
/// documentation span whose text does not start with the tag delimiter is
/// narrative and is attached like a snippet.
pub fn extract(
    text: &str,
    tokens: &[Token<'_>],
    spans: &[Span],
    spec: &DelimiterSpec,
    markers: &Markers,
) -> Vec<FieldBlob> {
    let mut ex = Extraction {
        spec,
        markers,
        blobs: Vec::new(),
        next_snippet: 0,
    };

    for span in spans {
        match span.kind {
            SpanKind::Doc => {
                let nested: Vec<&Span> = spans
                    .iter()
                    .filter(|s| s.kind == SpanKind::Snippet && span.encloses(s))
                    .collect();
                let body = strip_decoration(
                    &body_without(text, tokens, span, &nested),
                    spec,
                    markers.tag,
                );

                if body.trim_start().starts_with(markers.tag) {
                    ex.blobs.push(FieldBlob::new(body));
                } else if body.trim().is_empty() {
                    tracing::trace!("skipping empty documentation block");
                } else {
                    ex.attach(&body);
                }
                for snippet in nested {
                    ex.attach(between(text, tokens, snippet));
                }
            }
            SpanKind::Snippet => {
                let nested = spans
                    .iter()
                    .any(|doc| doc.kind == SpanKind::Doc && doc.encloses(span));
                if !nested {
                    ex.attach(between(text, tokens, span));
                }
            }
        }
    }
    ex.blobs
}

/// Text strictly between a span's two delimiter tokens.
fn between<'t>(text: &'t str, tokens: &[Token<'_>], span: &Span) -> &'t str {
    match span.close {
        Some(close) => &text[tokens[span.start].end..tokens[close].start],
        None => "",
    }
}

/// Span text with the regions of `nested` snippets removed.
fn body_without(text: &str, tokens: &[Token<'_>], span: &Span, nested: &[&Span]) -> String {
    let Some(close) = span.close else {
        return String::new();
    };
    let mut body = String::new();
    let mut cursor = tokens[span.start].end;
    for snippet in nested {
        let Some(snippet_close) = snippet.close else {
            continue;
        };
        body.push_str(&text[cursor..tokens[snippet.start].start]);
        cursor = tokens[snippet_close].end;
    }
    body.push_str(&text[cursor..tokens[close].start]);
    body
}

/// Remove the indentation shared by the interior lines of a snippet.
///
/// The minimum leading tab count and the minimum leading space count are
/// taken over all lines except the first and the last (the delimiter lines),
/// ignoring blank ones; that many tabs and spaces are then removed from the
/// leading whitespace of every line. Applying it twice changes nothing.
pub fn normalize_indentation(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let interior: &[&str] = if lines.len() > 2 {
        &lines[1..lines.len() - 1]
    } else {
        &[]
    };

    let counts: Vec<(usize, usize)> = interior
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_counts(line))
        .collect();
    let min_tabs = counts.iter().map(|c| c.0).min().unwrap_or(0);
    let min_spaces = counts.iter().map(|c| c.1).min().unwrap_or(0);
    if min_tabs == 0 && min_spaces == 0 {
        return text.to_string();
    }

    lines
        .iter()
        .map(|line| strip_leading(line, min_tabs, min_spaces))
        .collect::<Vec<_>>()
        .join("\n")
}

/// (tabs, spaces) in the leading whitespace run of `line`.
fn leading_counts(line: &str) -> (usize, usize) {
    line.chars()
        .take_while(|c| *c == '\t' || *c == ' ')
        .fold((0, 0), |(tabs, spaces), c| match c {
            '\t' => (tabs + 1, spaces),
            _ => (tabs, spaces + 1),
        })
}

fn strip_leading(line: &str, mut tabs: usize, mut spaces: usize) -> String {
    let rest = line.trim_start_matches(['\t', ' ']);
    let run = &line[..line.len() - rest.len()];
    let mut out = String::with_capacity(line.len());
    for c in run.chars() {
        match c {
            '\t' if tabs > 0 => tabs -= 1,
            ' ' if spaces > 0 => spaces -= 1,
            _ => out.push(c),
        }
    }
    out.push_str(rest);
    out
}

/// Turn the raw text of a snippet region into the code to render.
///
/// Escaped markers lose their escape, indentation is normalized, the
/// delimiter lines are dropped when they hold nothing but comment symbols,
/// and blank lines at either end are trimmed.
pub fn normalize_snippet(raw: &str, spec: &DelimiterSpec, markers: &Markers) -> String {
    let unescaped = unescape_markers(raw, markers);
    let normalized = normalize_indentation(&unescaped);
    let mut lines: Vec<&str> = normalized.split('\n').map(str::trim_end).collect();

    // text glued to the start marker carries no indentation of its own
    if let Some(&first) = lines.first() {
        if is_remnant(first, spec) {
            lines.remove(0);
        } else {
            lines[0] = first.trim_start();
        }
    }
    if lines.last().is_some_and(|line| is_remnant(line, spec)) {
        lines.pop();
    }
    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// A line made only of comment symbols and whitespace (` */`, `/* `, `# `).
fn is_remnant(line: &str, spec: &DelimiterSpec) -> bool {
    let symbols = spec.remnant_symbols();
    let mut rest = line.trim();
    loop {
        let before = rest.len();
        for symbol in &symbols {
            if let Some(stripped) = rest.strip_prefix(*symbol) {
                rest = stripped.trim_start();
            }
        }
        if rest.len() == before {
            break;
        }
    }
    rest.is_empty()
}

fn unescape_markers(raw: &str, markers: &Markers) -> String {
    let mut text = raw.to_string();
    for marker in [&markers.code_start, &markers.code_end, &markers.open, &markers.close] {
        let escaped = format!("{}{}", markers.escape, marker);
        text = text.replace(&escaped, marker);
    }
    text
}

/// Strip comment decoration from a documentation body.
///
/// Applies when every non-blank line after the first starts with the same
/// line-comment or noise symbol and at least one of them carries a tag, as
/// in javadoc-style blocks (` * @name: x`) or `#`-commented Python.
pub fn strip_decoration(body: &str, spec: &DelimiterSpec, tag: char) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let rest: Vec<&str> = lines
        .iter()
        .skip(1)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    if rest.is_empty() {
        return body.to_string();
    }

    for symbol in spec.decoration_symbols() {
        if !rest.iter().all(|line| line.starts_with(symbol)) {
            continue;
        }
        let carries_tag = rest
            .iter()
            .any(|line| line[symbol.len()..].trim_start().starts_with(tag));
        if !carries_tag {
            continue;
        }

        let mut out = vec![lines[0].to_string()];
        for line in &lines[1..] {
            match line.trim_start().strip_prefix(symbol) {
                Some(stripped) => out.push(stripped.strip_prefix(' ').unwrap_or(stripped).to_string()),
                None => out.push(line.to_string()),
            }
        }
        return out.join("\n");
    }
    body.to_string()
}
