use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use atom_entry::{EntryInput, WriterConfig};

/// Get the default config file path (~/.config/atom-entry/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("atom-entry")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(
    name = "atom-entry",
    about = "Render Atom entry XML from TOML or JSON entry descriptions"
)]
struct Args {
    /// Entry description files (.toml or .json)
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Writer config file (defaults to ~/.config/atom-entry/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write each entry on a single line
    #[arg(long)]
    compact: bool,

    /// Omit the XML declaration
    #[arg(long)]
    no_declaration: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = WriterConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if args.compact {
        config.indent = false;
    }
    if args.no_declaration {
        config.xml_declaration = false;
    }

    // Render everything before printing so a bad input produces no output
    let mut documents = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let entry = EntryInput::load(path)
            .with_context(|| format!("Failed to read entry file {}", path.display()))?
            .into_entry();
        let document = entry
            .to_document(&config)
            .with_context(|| format!("Failed to render entry from {}", path.display()))?;
        documents.push(document);
    }
    tracing::info!(entries = documents.len(), "Rendered entries");

    let mut stdout = std::io::stdout().lock();
    for document in &documents {
        stdout
            .write_all(document.as_bytes())
            .context("Failed to write to stdout")?;
    }
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
