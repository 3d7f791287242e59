pub mod alu;
pub mod codec;
pub mod control;
pub mod cpu;
pub mod datapath;
pub mod decoder;
pub mod disasm;
pub mod instructions;
pub mod loader;
pub mod memory;
pub mod registers;
pub mod sim;
pub mod trace;
pub mod workload;

pub mod isa {
    pub mod field; // shift-and-mask accessors for the word layouts
    pub mod func;
}

pub use codec::{decode, encode, encode_line, CodecError, Instruction};
pub use cpu::{Cpu, Trap};
pub use memory::{Bus, LinearMemory};
pub use sim::{Halt, RunSummary, SimConfig, Simulator};
