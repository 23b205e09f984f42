//! Data model for extracted documentation: format-agnostic.

use crate::delimiters::Markers;
use serde::Serialize;
use std::fmt;

/// One input file as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Which delimiter pair produced a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Doc,
    Snippet,
}

/// A region of the token stream between a start and an end delimiter.
///
/// `start` and `close` index the delimiter tokens themselves. `close` is only
/// `None` while the region finder is still scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub close: Option<usize>,
    pub kind: SpanKind,
}

impl Span {
    pub fn open(start: usize, kind: SpanKind) -> Self {
        Self {
            start,
            close: None,
            kind,
        }
    }

    pub fn closed(start: usize, close: usize, kind: SpanKind) -> Self {
        Self {
            start,
            close: Some(close),
            kind,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.close.is_some_and(|close| close > self.start)
    }

    /// Whether `other` lies strictly between this span's delimiters.
    pub fn encloses(&self, other: &Span) -> bool {
        match (self.close, other.close) {
            (Some(close), Some(other_close)) => self.start < other.start && other_close < close,
            _ => false,
        }
    }
}

/// A code snippet attached to a field blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub index: usize,
    pub text: String,
}

/// Raw content of one documentation unit plus its attached snippets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBlob {
    pub body: String,
    pub snippets: Vec<Snippet>,
}

impl FieldBlob {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            snippets: Vec::new(),
        }
    }

    pub fn push_snippet(&mut self, index: usize, text: impl Into<String>) {
        self.snippets.push(Snippet {
            index,
            text: text.into(),
        });
    }
}

/// Textual form: the body followed by `@_code_snippet_<N>:<text>` lines.
impl fmt::Display for FieldBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markers = Markers::default();
        f.write_str(&self.body)?;
        for snippet in &self.snippets {
            writeln!(
                f,
                "{}{}{}{}",
                markers.tag,
                Markers::snippet_tag(snippet.index),
                markers.description,
                snippet.text
            )?;
        }
        Ok(())
    }
}

/// The reserved tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservedTag {
    Name,
    Brief,
    Notes,
    Inputs,
    Outputs,
}

impl ReservedTag {
    /// Map a lowercase tag name to a reserved tag; `note` is an alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "brief" => Some(Self::Brief),
            "notes" | "note" => Some(Self::Notes),
            "inputs" => Some(Self::Inputs),
            "outputs" => Some(Self::Outputs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Brief => "brief",
            Self::Notes => "notes",
            Self::Inputs => "inputs",
            Self::Outputs => "outputs",
        }
    }
}

/// One tagged field, classified once by the tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Field {
    Reserved { tag: ReservedTag, content: String },
    Custom { name: String, content: String },
    Snippet { index: usize, content: String },
}

impl Field {
    /// Classify a lowercase tag name written in a block.
    ///
    /// Written names are reserved or custom only; snippets are attached by
    /// the extractor and never come from parsed text.
    pub fn classify(name: &str, content: String) -> Self {
        match ReservedTag::from_name(name) {
            Some(tag) => Self::Reserved { tag, content },
            None => Self::Custom {
                name: name.to_string(),
                content,
            },
        }
    }

    /// The slot this field occupies in a `TagMap`.
    pub fn key(&self) -> FieldKey<'_> {
        match self {
            Self::Reserved { tag, .. } => FieldKey::Reserved(*tag),
            Self::Custom { name, .. } => FieldKey::Custom(name),
            Self::Snippet { index, .. } => FieldKey::Snippet(*index),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Reserved { content, .. }
            | Self::Custom { content, .. }
            | Self::Snippet { content, .. } => content,
        }
    }
}

/// Identity of a field inside one block. A custom tag spelled like a
/// snippet tag is still a different slot from the snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey<'a> {
    Reserved(ReservedTag),
    Custom(&'a str),
    Snippet(usize),
}

/// Ordered tag → content mapping for one documentation block.
///
/// Re-defining a tag replaces its content but keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagMap {
    fields: Vec<Field>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field) {
        let slot = self.fields.iter().position(|f| f.key() == field.key());
        match slot {
            Some(i) => self.fields[i] = field,
            None => self.fields.push(field),
        }
    }

    /// Content of a reserved or custom tag by (case-insensitive) name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        let key = match ReservedTag::from_name(&name) {
            Some(tag) => FieldKey::Reserved(tag),
            None => FieldKey::Custom(name.as_str()),
        };
        self.fields
            .iter()
            .find(|f| f.key() == key)
            .map(Field::content)
    }

    pub fn reserved(&self, tag: ReservedTag) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            Field::Reserved { tag: t, content } if *t == tag => Some(content.as_str()),
            _ => None,
        })
    }

    /// Custom fields in insertion order.
    pub fn custom(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|f| match f {
            Field::Custom { name, content } => Some((name.as_str(), content.as_str())),
            _ => None,
        })
    }

    /// Snippets sorted by ascending index.
    pub fn snippets(&self) -> Vec<(usize, &str)> {
        let mut snippets: Vec<(usize, &str)> = self
            .fields
            .iter()
            .filter_map(|f| match f {
                Field::Snippet { index, content } => Some((*index, content.as_str())),
                _ => None,
            })
            .collect();
        snippets.sort_by_key(|(index, _)| *index);
        snippets
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All documentation blocks of one file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFile {
    pub name: String,
    pub extension: String,
    pub blocks: Vec<TagMap>,
}

/// Rendered sections accumulated over one run.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuffer {
    sections: Vec<String>,
}

impl DocumentBuffer {
    pub fn push_section(&mut self, section: String) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Per-file result itemized to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Documented { blocks: usize },
    NoDocumentation,
    Unsupported { extension: Option<String> },
    Malformed { reason: String },
}

impl FileStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Documented { .. })
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Documented { blocks: 1 } => write!(f, "1 block"),
            Self::Documented { blocks } => write!(f, "{} blocks", blocks),
            Self::NoDocumentation => write!(f, "no documentation found"),
            Self::Unsupported { extension: Some(ext) } => write!(f, "'.{}' is not supported", ext),
            Self::Unsupported { extension: None } => write!(f, "not supported"),
            Self::Malformed { reason } => write!(f, "{}", reason),
        }
    }
}
