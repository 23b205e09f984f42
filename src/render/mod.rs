//! Output formats behind the `Renderer` trait.

pub mod json;
pub mod markdown;

use crate::error::{EasygenError, Result};
use crate::model::{DocumentBuffer, ParsedFile};

/// Line appended once at the end of a Markdown document.
pub const FOOTER: &str = "generated with [EasyGen](https://github.com/dede-amdp/easygen)";

/// Trait for rendering parsed files into a specific output format.
pub trait Renderer {
    /// Render one file's section. Called only for files with at least one block.
    fn render_file(&self, file: &ParsedFile) -> Result<String>;

    /// Join the sections of a run into the final document.
    fn assemble(&self, buffer: &DocumentBuffer, footer: Option<&str>) -> String;

    /// Extension of the default output file name.
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(EasygenError::UnknownFormat(format.to_string())),
    }
}
