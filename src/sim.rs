use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::cpu::{Cpu, Trap};
use crate::datapath::Datapath;
use crate::memory::{LinearMemory, MemError};
use crate::registers::NUM_REGS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub imem_size: usize,
    pub dmem_size: usize,
    pub entry: u32,
    /// A post-step PC at or above this halts the run cleanly. Programs end
    /// by jumping far past their last instruction.
    pub halt_pc: u32,
    /// Safety cap on executed instructions; `None` runs until a halt PC.
    pub max_steps: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            imem_size: 1024 * 1024,
            dmem_size: 1024 * 1024,
            entry: 0,
            halt_pc: 9999,
            max_steps: Some(10_000_000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Halt {
    /// Jumped to or past the configured sentinel.
    Sentinel { pc: u32 },
    /// Came back around to address 0; treated as a runaway loop.
    LoopBack,
    /// Hit `max_steps` without halting.
    StepLimit { limit: u64 },
}

impl Halt {
    pub fn is_clean(&self) -> bool {
        matches!(self, Halt::Sentinel { .. })
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::Sentinel { pc } => write!(f, "halted at sentinel PC {pc}"),
            Halt::LoopBack => f.write_str("simulation went into an infinite loop, terminating"),
            Halt::StepLimit { limit } => write!(f, "stopped after the {limit}-instruction limit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub halt: Halt,
    pub executed: u64,
}

/// Final machine state, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub pc: u32,
    pub executed: u64,
    pub regs: [i32; NUM_REGS],
}

#[derive(Debug)]
pub struct Simulator {
    pub cpu: Cpu,
    pub imem: LinearMemory,
    pub dmem: LinearMemory,
    cfg: SimConfig,
    executed: u64,
}

impl Simulator {
    pub fn new(cfg: SimConfig) -> Self {
        let mut cpu = Cpu::new();
        cpu.reset(cfg.entry);
        Self {
            cpu,
            imem: LinearMemory::new(cfg.imem_size),
            dmem: LinearMemory::new(cfg.dmem_size),
            cfg,
            executed: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Places `words` in instruction memory from offset 0, in order.
    pub fn load_program(&mut self, words: &[u32]) -> Result<(), MemError> {
        self.imem.store_words(0, words)
    }

    pub fn step(&mut self) -> Result<Datapath, Trap> {
        let dp = self.cpu.step(&mut self.imem, &mut self.dmem)?;
        self.executed += 1;
        debug!(
            n = self.executed,
            pc = dp.pc,
            pc_next = dp.pc_next,
            "retired"
        );
        Ok(dp)
    }

    /// Terminal condition on the current PC, if any.
    pub fn halt_condition(&self) -> Option<Halt> {
        let pc = self.cpu.pc;
        if pc >= self.cfg.halt_pc {
            Some(Halt::Sentinel { pc })
        } else if pc == 0 {
            Some(Halt::LoopBack)
        } else {
            None
        }
    }

    pub fn run(&mut self) -> Result<RunSummary, Trap> {
        self.run_with(|_| {})
    }

    /// Runs until a halt, handing each finished instruction to `observer`.
    pub fn run_with<F: FnMut(&Datapath)>(&mut self, mut observer: F) -> Result<RunSummary, Trap> {
        loop {
            if let Some(limit) = self.cfg.max_steps {
                if self.executed >= limit {
                    warn!(limit, pc = self.cpu.pc, "step limit reached");
                    return Ok(self.summary(Halt::StepLimit { limit }));
                }
            }
            let dp = self.step()?;
            observer(&dp);
            if let Some(halt) = self.halt_condition() {
                info!(executed = self.executed, %halt, "halt");
                return Ok(self.summary(halt));
            }
        }
    }

    fn summary(&self, halt: Halt) -> RunSummary {
        RunSummary {
            halt,
            executed: self.executed,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.cpu.pc,
            executed: self.executed,
            regs: self.cpu.regs.values(),
        }
    }
}
