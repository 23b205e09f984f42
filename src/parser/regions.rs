//! Region finder: pairs start/end marker tokens into spans.
//!
//! Matching works on whitespace-separated tokens so that `#@` never matches
//! inside `#@codestart@#`. Each token keeps its byte range, which lets the
//! extractor slice the text between two markers verbatim.

use crate::delimiters::DelimiterSpec;
use crate::model::{Span, SpanKind};

/// One whitespace-separated word of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split `text` into whitespace-separated tokens with their byte offsets.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut current: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), current) {
            (true, Some(start)) => {
                tokens.push(Token {
                    text: &text[start..i],
                    start,
                    end: i,
                });
                current = None;
            }
            (false, None) => current = Some(i),
            _ => {}
        }
    }
    if let Some(start) = current {
        tokens.push(Token {
            text: &text[start..],
            start,
            end: text.len(),
        });
    }
    tokens
}

/// Whether `token` is `marker`, possibly glued to a comment delimiter.
///
/// `/*#@`, `@#*/` and `//#@codestart@#` all count. An escaped marker
/// (`\#@codeend@#`) never does.
pub fn is_marker(token: &str, marker: &str, spec: &DelimiterSpec) -> bool {
    if token == marker {
        return true;
    }
    let prefixes = std::iter::once(spec.block_start.as_str()).chain(spec.line_comment.as_deref());
    let heads: Vec<&str> = prefixes
        .filter_map(|prefix| token.strip_prefix(prefix))
        .chain(std::iter::once(token))
        .collect();

    heads.iter().any(|head| {
        *head == marker
            || head
                .strip_suffix(spec.block_end.as_str())
                .is_some_and(|rest| rest == marker)
    })
}

/// Find the spans delimited by `start` and `end`, greedy and left to right.
///
/// The first unmatched start pairs with the first end after it; starts seen
/// while a span is open and ends seen while none is open are ignored. A start
/// without a matching end is dropped. Tokens inside `exclude` are skipped.
pub fn find_spans(
    tokens: &[Token<'_>],
    start: &str,
    end: &str,
    kind: SpanKind,
    spec: &DelimiterSpec,
    exclude: &[Span],
) -> Vec<Span> {
    debug_assert_ne!(start, end, "paired markers must differ");
    let mut spans: Vec<Span> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if exclude.iter().any(|span| covers(span, i)) {
            continue;
        }
        let open = spans.last().is_some_and(|span| span.close.is_none());
        if is_marker(token.text, start, spec) {
            if !open {
                spans.push(Span::open(i, kind));
            }
        } else if is_marker(token.text, end, spec) && open {
            if let Some(span) = spans.last_mut() {
                span.close = Some(i);
            }
        }
    }

    if let Some(dangling) = spans.last().filter(|span| span.close.is_none()) {
        tracing::debug!(
            offset = tokens[dangling.start].start,
            marker = start,
            "dropping incomplete block"
        );
        spans.pop();
    }
    spans
}

fn covers(span: &Span, index: usize) -> bool {
    span.close
        .is_some_and(|close| span.start <= index && index <= close)
}

/// Interleave snippet spans with documentation spans in source order.
///
/// A snippet goes immediately before the first documentation span whose
/// close lies beyond the snippet's start, or at the end if there is none.
pub fn merge(docs: Vec<Span>, snippets: Vec<Span>) -> Vec<Span> {
    if snippets.is_empty() {
        return docs;
    }
    let mut merged = docs;
    for snippet in snippets {
        let position = merged.iter().position(|span| {
            span.kind == SpanKind::Doc && span.close.is_some_and(|close| close > snippet.start)
        });
        match position {
            Some(i) => merged.insert(i, snippet),
            None => merged.push(snippet),
        }
    }
    merged
}
