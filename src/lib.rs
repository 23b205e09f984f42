//! easygen: documentation extracted from `#@ ... @#` comment blocks.
//!
//! This crate provides:
//! - A per-language delimiter table, extendable from a JSON file.
//! - A parser that finds documentation blocks and code snippets in raw text
//!   and splits them into tagged fields.
//! - Renderers for Markdown and JSON output.
//! - A pipeline that runs a host (file selection, status display, delivery)
//!   through one documentation run.

pub mod delimiters;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

pub use delimiters::{DelimiterSpec, DelimiterTable, Markers};
pub use error::{EasygenError, Result, StructuralError};
pub use model::{
    DocumentBuffer, Field, FieldBlob, FieldKey, FileStatus, ParsedFile, ReservedTag, SourceFile,
    TagMap,
};
pub use parser::{parse_file, Parser};
pub use pipeline::{HostAdapter, MalformedPolicy, Outcome, Pipeline};
pub use render::{create_renderer, Renderer};
