//! Pipeline: drives a host through one documentation run.
//!
//! Files are handled strictly in the order the host selects them. Each file
//! is parsed, rendered and appended to the document buffer before the next
//! one is looked at; its status is reported as soon as it is known.

use crate::delimiters::{extension_of, DelimiterTable, Markers};
use crate::error::Result;
use crate::model::{DocumentBuffer, FileStatus, SourceFile};
use crate::parser::Parser;
use crate::render::{markdown::MarkdownRenderer, Renderer, FOOTER};

const MALFORMED: &str = "malformed documentation block";

/// The outer surface: file selection, progress display and delivery.
pub trait HostAdapter {
    /// The ordered `(name, text)` pairs to document.
    fn select_files(&mut self) -> Result<Vec<SourceFile>>;

    /// Called once per file, in order, before anything is delivered.
    fn report_status(&mut self, name: &str, status: &FileStatus);

    /// Receives the finished document. Not called for an empty run.
    fn deliver(&mut self, document: &str) -> Result<()>;
}

/// What to do with a file whose block has misaligned tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Stop the run; nothing is delivered.
    #[default]
    Abort,
    /// Leave the file out and carry on.
    SkipFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered { documented: usize, skipped: usize },
    /// No file was selected or none had documentation.
    Empty,
}

pub struct Pipeline {
    table: DelimiterTable,
    parser: Parser,
    renderer: Box<dyn Renderer>,
    policy: MalformedPolicy,
    footer: bool,
}

impl Pipeline {
    pub fn new(table: DelimiterTable) -> Result<Self> {
        Ok(Self {
            table,
            parser: Parser::new(Markers::default())?,
            renderer: Box::new(MarkdownRenderer),
            policy: MalformedPolicy::default(),
            footer: true,
        })
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn on_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_footer(mut self, footer: bool) -> Self {
        self.footer = footer;
        self
    }

    /// Run once over the files the host selects.
    pub fn run(&self, host: &mut dyn HostAdapter) -> Result<Outcome> {
        let files = host.select_files()?;
        if files.is_empty() {
            tracing::info!("no files selected");
            return Ok(Outcome::Empty);
        }

        let mut buffer = DocumentBuffer::default();
        let mut skipped = 0;
        for file in &files {
            let status = self.process(file, &mut buffer);
            let status = match status {
                Ok(status) => status,
                Err(err) if err.is_structural() && self.policy == MalformedPolicy::SkipFile => {
                    tracing::warn!(file = %file.name, error = %err, "skipping malformed file");
                    FileStatus::Malformed {
                        reason: MALFORMED.to_string(),
                    }
                }
                Err(err) => {
                    if err.is_structural() {
                        host.report_status(
                            &file.name,
                            &FileStatus::Malformed {
                                reason: MALFORMED.to_string(),
                            },
                        );
                    }
                    return Err(err);
                }
            };
            if !status.is_ok() {
                skipped += 1;
            }
            host.report_status(&file.name, &status);
        }

        if buffer.is_empty() {
            tracing::info!(files = files.len(), "no documentation found");
            return Ok(Outcome::Empty);
        }
        let footer = self.footer.then_some(FOOTER);
        host.deliver(&self.renderer.assemble(&buffer, footer))?;
        Ok(Outcome::Delivered {
            documented: buffer.len(),
            skipped,
        })
    }

    fn process(&self, file: &SourceFile, buffer: &mut DocumentBuffer) -> Result<FileStatus> {
        let Some(spec) = self.table.for_file(&file.name) else {
            tracing::debug!(file = %file.name, "unsupported extension");
            return Ok(FileStatus::Unsupported {
                extension: extension_of(&file.name).map(str::to_string),
            });
        };

        let parsed = self.parser.parse(&file.name, &file.text, spec)?;
        if parsed.blocks.is_empty() {
            return Ok(FileStatus::NoDocumentation);
        }
        buffer.push_section(self.renderer.render_file(&parsed)?);
        Ok(FileStatus::Documented {
            blocks: parsed.blocks.len(),
        })
    }
}
