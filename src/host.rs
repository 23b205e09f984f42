//! Command-line host: files from arguments, status on stderr, document to a
//! file or stdout.

use easygen::{EasygenError, FileStatus, HostAdapter, Result, SourceFile};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub struct CliHost {
    patterns: Vec<String>,
    /// Extensions picked up when a directory is given.
    extensions: Vec<String>,
    stdin_name: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
}

impl CliHost {
    pub fn new(patterns: Vec<String>, extensions: Vec<String>) -> Self {
        Self {
            patterns,
            extensions,
            stdin_name: None,
            output: None,
            quiet: false,
        }
    }

    /// Read one extra file from stdin, shown under `name`.
    pub fn with_stdin(mut self, name: Option<String>) -> Self {
        self.stdin_name = name;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl HostAdapter for CliHost {
    fn select_files(&mut self) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        if let Some(name) = &self.stdin_name {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|error| EasygenError::Io {
                    path: PathBuf::from("<stdin>"),
                    error,
                })?;
            files.push(SourceFile::new(name.clone(), decode(name, &bytes)));
        }

        for path in expand_globs(&self.patterns, &self.extensions)? {
            let bytes = fs::read(&path).map_err(|error| EasygenError::Io {
                path: path.clone(),
                error,
            })?;
            let name = path.to_string_lossy();
            let text = decode(&name, &bytes);
            files.push(SourceFile::new(name, text));
        }
        Ok(files)
    }

    fn report_status(&mut self, name: &str, status: &FileStatus) {
        if self.quiet {
            return;
        }
        let mark = if status.is_ok() { "✔️" } else { "❌" };
        eprintln!("{} {} ({})", mark, name, status);
    }

    fn deliver(&mut self, document: &str) -> Result<()> {
        match &self.output {
            Some(path) => fs::write(path, document).map_err(|error| EasygenError::Io {
                path: path.clone(),
                error,
            }),
            None => io::stdout()
                .write_all(document.as_bytes())
                .map_err(|error| EasygenError::Io {
                    path: PathBuf::from("<stdout>"),
                    error,
                }),
        }
    }
}

/// Expand file arguments into real file paths.
///
/// Arguments keep their command-line order. A directory is scanned
/// (non-recursive) for files with one of `extensions`; directory and glob
/// matches are sorted. A path seen twice keeps its first position.
fn expand_globs(patterns: &[String], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            push_unique(&mut files, path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|error| EasygenError::Io {
                path: path.to_path_buf(),
                error,
            })?;
            let mut matches: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_extension(p, extensions))
                .collect();
            matches.sort();
            for p in matches {
                push_unique(&mut files, p);
            }
            continue;
        }

        let mut matches: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|error| EasygenError::Glob {
                pattern: pattern.clone(),
                error,
            })?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        matches.sort();
        for p in matches {
            push_unique(&mut files, p);
        }
    }
    Ok(files)
}

/// Invalid UTF-8 sequences become U+FFFD so one odd file does not stop the run.
fn decode(name: &str, bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if let std::borrow::Cow::Owned(_) = text {
        tracing::warn!("{} is not valid UTF-8; invalid bytes replaced", name);
    }
    text.into_owned()
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}
