use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::isa::func::Func;

bitflags! {
/// The single-bit control lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lines: u16 {
const REG_DST = 1 << 0; // write-back index is Rd (else Rt)
const JUMP = 1 << 1;
const BRANCH = 1 << 2;
const MEM_READ = 1 << 3;
const MEM_TO_REG = 1 << 4; // write-back value is the loaded word (else ALU result)
const MEM_WRITE = 1 << 5;
const ALU_SRC = 1 << 6; // ALU input 2 is the immediate (else Rt value)
const REG_WRITE = 1 << 7;
}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AluOp {
    #[default]
    Add,
    Sub,
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSignals {
    pub lines: Lines,
    pub alu_op: AluOp,
}

impl Default for ControlSignals {
    fn default() -> Self {
        Self::INERT
    }
}

impl ControlSignals {
    /// Every line deasserted: the instruction reads registers and runs the
    /// ALU but changes nothing and falls through to PC+4.
    pub const INERT: Self = Self {
        lines: Lines::empty(),
        alu_op: AluOp::Add,
    };

    const fn new(lines: Lines, alu_op: AluOp) -> Self {
        Self { lines, alu_op }
    }

    /// Control vector for a raw func code. Unknown codes and the reserved
    /// LWR get [`ControlSignals::INERT`].
    pub fn for_func(func: u8) -> Self {
        Func::from_bits(func).map_or(Self::INERT, Self::for_op)
    }

    pub const fn for_op(op: Func) -> Self {
        match op {
            Func::Add => Self::new(Lines::REG_DST.union(Lines::REG_WRITE), AluOp::Add),
            Func::Sub => Self::new(Lines::REG_DST.union(Lines::REG_WRITE), AluOp::Sub),
            Func::Lw => Self::new(
                Lines::MEM_READ
                    .union(Lines::MEM_TO_REG)
                    .union(Lines::ALU_SRC)
                    .union(Lines::REG_WRITE),
                AluOp::Add,
            ),
            Func::Sw => Self::new(Lines::MEM_WRITE.union(Lines::ALU_SRC), AluOp::Add),
            Func::Beq => Self::new(Lines::BRANCH, AluOp::Sub),
            Func::Addi => Self::new(Lines::ALU_SRC.union(Lines::REG_WRITE), AluOp::Add),
            Func::J => Self::new(Lines::JUMP, AluOp::Add),
            Func::Lwr => Self::INERT,
        }
    }

    pub fn reg_dst(&self) -> bool {
        self.lines.contains(Lines::REG_DST)
    }
    pub fn jump(&self) -> bool {
        self.lines.contains(Lines::JUMP)
    }
    pub fn branch(&self) -> bool {
        self.lines.contains(Lines::BRANCH)
    }
    pub fn mem_read(&self) -> bool {
        self.lines.contains(Lines::MEM_READ)
    }
    pub fn mem_to_reg(&self) -> bool {
        self.lines.contains(Lines::MEM_TO_REG)
    }
    pub fn mem_write(&self) -> bool {
        self.lines.contains(Lines::MEM_WRITE)
    }
    pub fn alu_src(&self) -> bool {
        self.lines.contains(Lines::ALU_SRC)
    }
    pub fn reg_write(&self) -> bool {
        self.lines.contains(Lines::REG_WRITE)
    }
}
