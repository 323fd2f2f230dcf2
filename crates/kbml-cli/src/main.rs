//! kbml — compile knowledge-base articles from the command line.
//!
//! Thin front end over `kbml-engine`: reads an article file, runs the
//! compiler, and prints the result as JSON (for the back office) or as an
//! HTML fragment (for quick inspection).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use relative_path::RelativePath;
use tracing::debug;

use kbml_engine::{compile, extract_headings, io, render};

/// kbml — knowledge-base article compiler.
#[derive(Parser)]
#[command(
    name = "kbml",
    version,
    about = "Compile knowledge-base articles into render blocks and TOC data."
)]
struct Cli {
    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Root directory article paths are resolved against.
    #[arg(long, default_value = ".", global = true)]
    articles_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile an article into render blocks and TOC entries.
    Compile {
        /// Article file, relative to the articles root.
        file: String,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print the table of contents of an article.
    Toc {
        /// Article file, relative to the articles root.
        file: String,
    },

    /// List article files under the articles root.
    List,
}

/// Compile output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile { file, format } => {
            let body = io::read_article(RelativePath::new(&file), &cli.articles_root)?;
            let article = compile(&body);
            debug!(
                blocks = article.blocks.len(),
                headings = article.headings.len(),
                "article compiled"
            );
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&article)?),
                Format::Html => println!("{}", render::to_html(&article.blocks)),
            }
        }
        Command::Toc { file } => {
            let body = io::read_article(RelativePath::new(&file), &cli.articles_root)?;
            for entry in extract_headings(&body) {
                let indent = "  ".repeat(usize::from(entry.level - 2));
                println!("{indent}{} #{}", entry.text, entry.id);
            }
        }
        Command::List => {
            for path in io::scan_articles(&cli.articles_root)? {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// Map `-v` counts onto a tracing env filter, honoring `RUST_LOG` overrides.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "kbml=warn,kbml_engine=warn",
        1 => "kbml=debug,kbml_engine=debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
