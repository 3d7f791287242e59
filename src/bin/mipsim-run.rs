use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mipsim::loader::{assemble, parse_word_file};
use mipsim::trace;
use mipsim::workload::{sample_inputs, ArraySum};
use mipsim::{SimConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run a program on the mipsim single-cycle datapath"
)]
struct Opts {
    /// Binary word file (one 8-digit hex word per line)
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Treat the input as assembly source and assemble it first
    #[arg(long)]
    asm: bool,
    /// JSON simulator config; flags below override its fields
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(short, long)]
    entry: Option<u32>,
    /// Post-step PC at or above this halts the run
    #[arg(long)]
    halt_pc: Option<u32>,
    /// Instruction cap; 0 disables it
    #[arg(long)]
    max_steps: Option<u64>,
    /// Preset a register, e.g. `--reg 1=5` (repeatable)
    #[arg(long = "reg", value_name = "N=VALUE", value_parser = parse_reg_preset)]
    regs: Vec<(u8, i32)>,
    /// Seed data memory for the array-sum program and verify it afterwards
    #[arg(long)]
    array_sum: bool,
    /// Array length for --array-sum
    #[arg(long, default_value_t = 16usize)]
    n: usize,
    /// Input seed for --array-sum
    #[arg(long, default_value_t = 1u32)]
    seed: u32,
    /// Write the per-stage trace to FILE
    #[arg(long, value_name = "FILE")]
    trace: Option<PathBuf>,
    /// Print the final register snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn parse_reg_preset(s: &str) -> Result<(u8, i32), String> {
    let (r, v) = s.split_once('=').ok_or("expected N=VALUE")?;
    let r: u8 = r
        .trim()
        .trim_start_matches(|c| c == '$' || c == 's')
        .parse()
        .map_err(|e| format!("bad register {r:?}: {e}"))?;
    if r == 0 || usize::from(r) >= mipsim::registers::NUM_REGS {
        return Err(format!("register {r} cannot be preset"));
    }
    let v: i32 = v.trim().parse().map_err(|e| format!("bad value {v:?}: {e}"))?;
    Ok((r, v))
}

fn load_config(opts: &Opts) -> Result<SimConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let txt = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&txt)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(e) = opts.entry {
        cfg.entry = e;
    }
    if let Some(h) = opts.halt_pc {
        cfg.halt_pc = h;
    }
    if let Some(m) = opts.max_steps {
        cfg.max_steps = (m != 0).then_some(m);
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let cfg = load_config(&opts)?;

    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let words = if opts.asm {
        assemble(&text).words()
    } else {
        parse_word_file(&text)?
    };
    if words.is_empty() {
        bail!("{} holds no instructions", opts.input.display());
    }

    let mut sim = Simulator::new(cfg);
    sim.load_program(&words).context("program does not fit in instruction memory")?;
    for &(r, v) in &opts.regs {
        sim.cpu.regs.write(r, v);
    }

    let workload = ArraySum::new(opts.n);
    let inputs = sample_inputs(opts.n, opts.seed);
    if opts.array_sum {
        workload
            .prepare(&mut sim, &inputs)
            .context("array does not fit in data memory")?;
    }

    let mut trace_lines: Vec<String> = Vec::new();
    let tracing_enabled = opts.trace.is_some();
    let summary = sim.run_with(|dp| {
        if tracing_enabled {
            trace_lines.extend(trace::render(dp));
        }
    })?;
    let verdict = if opts.array_sum {
        let v = workload.judge(&sim, &inputs, &summary)?;
        println!("{}", v.message());
        Some(v)
    } else {
        None
    };
    trace_lines.extend(trace::closing_lines(&summary, verdict.as_ref()));

    if let Some(path) = &opts.trace {
        let mut f = fs::File::create(path)
            .with_context(|| format!("creating trace file {}", path.display()))?;
        for l in &trace_lines {
            writeln!(f, "{l}")?;
        }
    }

    println!("{}", trace::halt_line(&summary.halt));
    println!("Num of Instruction Executed: {}", summary.executed);
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    }
    Ok(())
}
