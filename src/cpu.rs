use serde::{Deserialize, Serialize};
use std::fmt;

use crate::datapath::Datapath;
use crate::memory::{Bus, MemError};
use crate::registers::RegisterFile;

/// Architectural state that survives between instructions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: u32, // byte offset into instruction memory
    pub regs: RegisterFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Fetch,
    Load,
    Store,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Access::Fetch => "fetch",
            Access::Load => "load",
            Access::Store => "store",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Trap {
    #[error("unaligned {access} at {addr:#010x}")]
    Unaligned { access: Access, addr: u32 },
    #[error("{access} fault at {addr:#010x}: {source}")]
    Bus {
        access: Access,
        addr: u32,
        #[source]
        source: MemError,
    },
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, reset_pc: u32) {
        self.pc = reset_pc;
    }

    /// Executes one instruction start to finish and returns the datapath
    /// values it produced. On a trap the PC and registers are untouched.
    pub fn step<I: Bus, D: Bus>(&mut self, imem: &mut I, dmem: &mut D) -> Result<Datapath, Trap> {
        let mut dp = Datapath::fetch(self.pc, imem)?;
        dp.decode();
        dp.control_and_register_fetch(&self.regs);
        dp.execute();
        dp.memory(dmem)?;
        dp.write_back(&mut self.regs);
        self.pc = dp.pc_next;
        Ok(dp)
    }
}
