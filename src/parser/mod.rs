//! Parsing of one source file into tagged blocks.

pub mod extract;
pub mod regions;
pub mod tagger;

use crate::delimiters::{extension_of, DelimiterSpec, DelimiterTable, Markers};
use crate::error::{EasygenError, Result};
use crate::model::{ParsedFile, SourceFile, SpanKind};
use tagger::Tagger;

/// Runs region finding, extraction and tagging over one file.
#[derive(Debug, Clone)]
pub struct Parser {
    markers: Markers,
    tagger: Tagger,
}

impl Parser {
    pub fn new(markers: Markers) -> Result<Self> {
        let tagger = Tagger::new(&markers)?;
        Ok(Self { markers, tagger })
    }

    /// Parse `text` with the comment syntax of `spec`.
    ///
    /// Blocks that yield no field are left out; a block whose tags and
    /// contents do not line up fails the whole file.
    pub fn parse(&self, name: &str, text: &str, spec: &DelimiterSpec) -> Result<ParsedFile> {
        let text = text.replace("\r\n", "\n");
        let tokens = regions::tokenize(&text);
        let m = &self.markers;

        let snippets = regions::find_spans(&tokens, &m.code_start, &m.code_end, SpanKind::Snippet, spec, &[]);
        let docs = regions::find_spans(&tokens, &m.open, &m.close, SpanKind::Doc, spec, &snippets);
        tracing::debug!(
            file = name,
            blocks = docs.len(),
            snippets = snippets.len(),
            "found regions"
        );

        let spans = regions::merge(docs, snippets);
        let mut blocks = Vec::new();
        for blob in extract::extract(&text, &tokens, &spans, spec, m) {
            let map = self
                .tagger
                .tag(&blob)
                .map_err(|source| EasygenError::Structural {
                    file: name.to_string(),
                    source,
                })?;
            if !map.is_empty() {
                blocks.push(map);
            }
        }

        Ok(ParsedFile {
            name: name.to_string(),
            extension: spec.extension.clone(),
            blocks,
        })
    }
}

/// Parse a source file, picking the delimiters from its extension.
pub fn parse_file(file: &SourceFile, table: &DelimiterTable) -> Result<ParsedFile> {
    let spec = table
        .for_file(&file.name)
        .ok_or_else(|| EasygenError::UnsupportedExtension {
            file: file.name.clone(),
            extension: extension_of(&file.name).unwrap_or_default().to_string(),
        })?;
    Parser::new(Markers::default())?.parse(&file.name, &file.text, spec)
}
