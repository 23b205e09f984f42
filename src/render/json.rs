//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the parsed model directly; the document is an array with one
//! object per documented file.

use crate::error::Result;
use crate::model::{DocumentBuffer, ParsedFile};
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render_file(&self, file: &ParsedFile) -> Result<String> {
        Ok(serde_json::to_string_pretty(file)?)
    }

    /// The footer has no place in JSON and is ignored.
    fn assemble(&self, buffer: &DocumentBuffer, _footer: Option<&str>) -> String {
        format!("[\n{}\n]\n", buffer.sections().join(",\n"))
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
