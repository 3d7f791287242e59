use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mipsim::disasm::fmt_word;
use mipsim::loader::{assemble, format_word_file};
use mipsim_disasm::bin_path_for;

#[derive(Parser, Debug)]
#[command(author, version, about = "mipsim assembler")]
struct Opts {
    /// Input assembly file (one instruction per line)
    #[arg(value_name = "SOURCE")]
    input: PathBuf,
    /// Output word file (default: <SOURCE>.bin)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Don't echo source lines and their disassembly
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let asm = assemble(&text);

    if !opts.quiet {
        for l in &asm.lines {
            println!("{}", l.source);
            println!("\t{}", fmt_word(l.word));
        }
    }
    for s in &asm.skipped {
        eprintln!("line {}: {}, ignored", s.line, s.error);
    }

    let out = opts.output.unwrap_or_else(|| bin_path_for(&opts.input));
    fs::write(&out, format_word_file(&asm.words()))
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
