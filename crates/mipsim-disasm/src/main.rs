use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mipsim_disasm::{build_listing, load_word_file, render_text, write_output, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "mipsim disassembler CLI", long_about = None)]
struct Cli {
    /// Binary word file (one 8-digit hex word per line)
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Show the raw word next to each instruction (text format only)
    #[arg(long)]
    show_words: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let words = load_word_file(&cli.input)?;
    let entries = build_listing(&words);

    let text = match cli.format {
        OutputFormat::Text => render_text(&entries, cli.show_words),
        OutputFormat::Json => serde_json::to_string_pretty(&entries)? + "\n",
    };
    write_output(cli.out.as_deref(), &text)
}
