//! Delimiter table: per-language comment syntax and the marker vocabulary.
//!
//! The table maps a lowercase file extension to its comment delimiters. It is
//! loaded once at startup (built-ins, optionally extended by a JSON languages
//! file) and only read afterwards.

use crate::error::{EasygenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Comment syntax for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterSpec {
    pub extension: String,
    pub block_start: String,
    pub block_end: String,
    #[serde(default)]
    pub line_comment: Option<String>,
    /// Symbols that decorate comment lines (` * ` in javadoc blocks).
    #[serde(default)]
    pub noise_symbols: Vec<String>,
}

impl DelimiterSpec {
    pub fn new(extension: &str, block_start: &str, block_end: &str) -> Self {
        Self {
            extension: extension.to_lowercase(),
            block_start: block_start.to_string(),
            block_end: block_end.to_string(),
            line_comment: None,
            noise_symbols: Vec::new(),
        }
    }

    pub fn with_line_comment(mut self, symbol: &str) -> Self {
        self.line_comment = Some(symbol.to_string());
        self
    }

    pub fn with_noise(mut self, symbols: &[&str]) -> Self {
        self.noise_symbols = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Check the table invariants: a bare extension and non-empty delimiters.
    ///
    /// Symmetric pairs (Python's `'''`) are accepted: regions are paired on the
    /// `#@`/`@#` markers, never on the comment delimiters themselves.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| EasygenError::InvalidDelimiter {
            extension: self.extension.clone(),
            reason: reason.to_string(),
        };
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(invalid("extension must be non-empty and without a dot"));
        }
        if self.block_start.trim().is_empty() || self.block_end.trim().is_empty() {
            return Err(invalid("block delimiters must be non-empty"));
        }
        if self.line_comment.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(invalid("line comment symbol must be non-empty"));
        }
        if self.noise_symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(invalid("noise symbols must be non-empty"));
        }
        Ok(())
    }

    /// Comment symbols that may start a decorated comment line, longest first.
    pub fn decoration_symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self
            .line_comment
            .iter()
            .chain(self.noise_symbols.iter())
            .map(String::as_str)
            .collect();
        symbols.sort_by_key(|s| std::cmp::Reverse(s.len()));
        symbols.dedup();
        symbols
    }

    /// Every symbol of this language that can be left over on a marker line.
    pub fn remnant_symbols(&self) -> Vec<&str> {
        let mut symbols = vec![self.block_start.as_str(), self.block_end.as_str()];
        symbols.extend(self.decoration_symbols());
        symbols.sort_by_key(|s| std::cmp::Reverse(s.len()));
        symbols.dedup();
        symbols
    }
}

/// The fixed marker vocabulary recognized inside comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub open: String,
    pub close: String,
    pub tag: char,
    pub description: char,
    pub code_start: String,
    pub code_end: String,
    pub escape: char,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            open: "#@".to_string(),
            close: "@#".to_string(),
            tag: '@',
            description: ':',
            code_start: "#@codestart@#".to_string(),
            code_end: "#@codeend@#".to_string(),
            escape: '\\',
        }
    }
}

impl Markers {
    /// Name given to the synthetic field holding snippet `index`.
    pub fn snippet_tag(index: usize) -> String {
        format!("{}{}", SNIPPET_TAG_PREFIX, index)
    }
}

/// Prefix of the synthetic tags generated for code snippets.
pub const SNIPPET_TAG_PREFIX: &str = "_code_snippet_";

#[derive(Deserialize)]
struct LanguagesFile {
    languages: Vec<DelimiterSpec>,
}

/// Extension → delimiter lookup table.
#[derive(Debug, Clone, Default)]
pub struct DelimiterTable {
    specs: BTreeMap<String, DelimiterSpec>,
}

impl DelimiterTable {
    /// The languages supported out of the box.
    pub fn builtin() -> Self {
        let c_like = |ext: &str| {
            DelimiterSpec::new(ext, "/*", "*/")
                .with_line_comment("//")
                .with_noise(&["/", "*"])
        };
        let mut specs = BTreeMap::new();
        for ext in ["c", "h", "cpp", "hpp", "cs", "java", "js", "ts", "rs", "go"] {
            specs.insert(ext.to_string(), c_like(ext));
        }
        specs.insert(
            "py".to_string(),
            DelimiterSpec::new("py", "'''", "'''").with_line_comment("#"),
        );
        specs.insert(
            "m".to_string(),
            DelimiterSpec::new("m", "%{", "%}")
                .with_line_comment("%")
                .with_noise(&["{", "}"]),
        );
        Self { specs }
    }

    /// Add or replace the entry for `spec.extension`.
    pub fn insert(&mut self, mut spec: DelimiterSpec) -> Result<()> {
        spec.extension = spec.extension.trim_start_matches('.').to_lowercase();
        spec.validate()?;
        self.specs.insert(spec.extension.clone(), spec);
        Ok(())
    }

    /// Load a JSON languages file and merge it into the table.
    ///
    /// ```json
    /// { "languages": [ { "extension": "kt", "block_start": "/*", "block_end": "*/" } ] }
    /// ```
    ///
    /// Entries replace built-ins with the same extension. Nothing is merged
    /// unless every entry is valid.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let json = fs::read_to_string(path).map_err(|error| EasygenError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let file: LanguagesFile =
            serde_json::from_str(&json).map_err(|error| EasygenError::Config {
                path: path.to_path_buf(),
                error,
            })?;

        let mut staged = self.clone();
        for spec in file.languages.iter().cloned() {
            staged.insert(spec)?;
        }
        *self = staged;
        tracing::debug!(path = %path.display(), count = file.languages.len(), "loaded languages file");
        Ok(file.languages.len())
    }

    pub fn get(&self, extension: &str) -> Option<&DelimiterSpec> {
        self.specs.get(&extension.to_lowercase())
    }

    /// Look up the delimiters for a file name by its last extension.
    pub fn for_file(&self, file_name: &str) -> Option<&DelimiterSpec> {
        extension_of(file_name).and_then(|ext| self.get(ext))
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DelimiterSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// The text after the last `.` of the base name, if any.
///
/// "src/math.js" → "js", "archive.tar.gz" → "gz", "Makefile" → None
pub fn extension_of(file_name: &str) -> Option<&str> {
    let base = base_name(file_name);
    match base.rfind('.') {
        Some(pos) if pos + 1 < base.len() => Some(&base[pos + 1..]),
        _ => None,
    }
}

/// The final path component of `file_name`, for both separators.
pub fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
}
