use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for extraction and rendering operations.
pub type Result<T> = std::result::Result<T, EasygenError>;

/// Error variants raised by the extraction pipeline.
#[derive(Debug, Error)]
pub enum EasygenError {
    /// The file's extension has no entry in the delimiter table.
    #[error("unsupported file type '{extension}' for {file}")]
    UnsupportedExtension { file: String, extension: String },

    /// A documentation block whose tags and contents do not line up.
    #[error("malformed documentation block in {file}: {source}")]
    Structural {
        file: String,
        #[source]
        source: StructuralError,
    },

    /// Failed to read a source file or configuration file.
    #[error("failed to read '{path}': {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// The languages file could not be parsed.
    #[error("invalid languages file '{path}': {error}")]
    Config {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    /// A delimiter specification violates the table invariants.
    #[error("invalid delimiters for '{extension}': {reason}")]
    InvalidDelimiter { extension: String, reason: String },

    /// The tag boundary pattern built from the markers did not compile.
    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A file argument is neither a path nor a valid glob pattern.
    #[error("invalid glob pattern '{pattern}': {error}")]
    Glob {
        pattern: String,
        #[source]
        error: glob::PatternError,
    },

    /// No renderer is registered under this name.
    #[error("unknown format: {0}. Use markdown or json")]
    UnknownFormat(String),

    /// Serializing the parsed model failed.
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Tags and contents of one field blob that do not pair up one to one.
///
/// Carries both lists so the user can locate the offending comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_mismatch(.tags, .contents))]
pub struct StructuralError {
    pub tags: Vec<String>,
    pub contents: Vec<String>,
}

fn describe_mismatch(tags: &[String], contents: &[String]) -> String {
    format!(
        "the tags do not line up with the contents \
         (maybe a tag without contents was added?)\n\
         Tags found: {}, Contents found: {}\n\
         Tags:\n{}\n\
         Contents:\n{}",
        tags.len(),
        contents.len(),
        tags.join("\n---\n"),
        contents.join("\n---\n")
    )
}

impl EasygenError {
    /// Returns `true` for the tag/content mismatch raised by the tagger.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }
}
