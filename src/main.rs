//! easygen: generate Markdown documentation from `#@ ... @#` comment blocks.
//!
//! - **file mode**: `easygen -o docs.md src/*.js lib/`
//! - **stdin mode**: `easygen --stdin math.js < math.js`

mod host;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use easygen::{create_renderer, DelimiterTable, MalformedPolicy, Outcome, Pipeline, Renderer};
use host::CliHost;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "easygen",
    version,
    about = "Generate Markdown documentation from #@ ... @# comment blocks"
)]
struct Cli {
    /// Input files, directories or glob patterns, documented in this order
    files: Vec<String>,

    /// Write the document here instead of stdout; a directory gets documentation.<format extension>
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Read one file from stdin and show it under NAME (its extension picks the language)
    #[arg(long, value_name = "NAME")]
    stdin: Option<String>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// JSON file with extra or overriding language delimiters
    #[arg(short = 'l', long, value_name = "FILE")]
    languages: Option<PathBuf>,

    /// Skip files with malformed blocks instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Omit the "generated with" footer
    #[arg(long)]
    no_footer: bool,

    /// Print the supported languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only, no per-file status
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet);

    let mut table = DelimiterTable::builtin();
    if let Some(path) = &cli.languages {
        let count = table
            .load(path)
            .with_context(|| format!("failed to load languages from {}", path.display()))?;
        tracing::info!("loaded {} language(s) from {}", count, path.display());
    }

    if cli.list_languages {
        for spec in table.iter() {
            let line = spec.line_comment.as_deref().unwrap_or("-");
            println!("{}\t{} {}\t{}", spec.extension, spec.block_start, spec.block_end, line);
        }
        return Ok(());
    }

    let renderer = create_renderer(&cli.format)?;
    let output = cli.output.map(|path| output_path(path, renderer.as_ref()));
    let policy = if cli.keep_going {
        MalformedPolicy::SkipFile
    } else {
        MalformedPolicy::Abort
    };
    let extensions: Vec<String> = table.extensions().map(str::to_string).collect();
    let pipeline = Pipeline::new(table)?
        .with_renderer(renderer)
        .on_malformed(policy)
        .with_footer(!cli.no_footer);

    let mut host = CliHost::new(cli.files, extensions)
        .with_stdin(cli.stdin)
        .with_output(output.clone())
        .quiet(cli.quiet);

    match pipeline.run(&mut host)? {
        Outcome::Delivered {
            documented,
            skipped,
        } => {
            if let Some(path) = &output {
                tracing::info!("wrote {}", path.display());
            }
            if !cli.quiet {
                eprintln!("✔️ Your docs are ready! ({} documented, {} skipped)", documented, skipped);
            }
        }
        Outcome::Empty => {
            if !cli.quiet {
                eprintln!("❌ Nothing to document");
            }
        }
    }
    Ok(())
}

/// An existing directory receives the default document name.
fn output_path(path: PathBuf, renderer: &dyn Renderer) -> PathBuf {
    if path.is_dir() {
        path.join(format!("documentation.{}", renderer.file_extension()))
    } else {
        path
    }
}
