use serde::{Deserialize, Serialize};
use std::fmt;

/// The 6-bit function code in bits 31..26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Func {
    Add = 0,
    Sub = 1,
    /// Reserved. Has a name but no encoding and no control behaviour.
    Lwr = 2,
    Addi = 5,
    Lw = 8,
    Sw = 9,
    Beq = 12,
    J = 15,
}

/// Instruction word layout, selected by func alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// func, Rs, Rt, Rd, 11 unused bits
    R,
    /// func, Rs, Rt, signed 16-bit immediate
    I,
    /// func, signed 26-bit immediate
    J,
}

impl Func {
    pub const ALL: [Func; 8] = [
        Func::Add,
        Func::Sub,
        Func::Lwr,
        Func::Addi,
        Func::Lw,
        Func::Sw,
        Func::Beq,
        Func::J,
    ];

    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|f| *f as u8 == bits)
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Func::Add => "ADD",
            Func::Sub => "SUB",
            Func::Lwr => "LWR",
            Func::Addi => "ADDI",
            Func::Lw => "LW",
            Func::Sw => "SW",
            Func::Beq => "BEQ",
            Func::J => "J",
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name for a raw func value, as printed in traces. Unknown codes render as `???`.
pub fn func_name(bits: u8) -> &'static str {
    Func::from_bits(bits).map_or("???", Func::name)
}
