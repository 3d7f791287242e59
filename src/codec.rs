//! Assembly text <-> instruction word.
//!
//! Source lines look like `ADD, $s3, $s1, $s2`: comma separated, mnemonic
//! case-insensitive, whitespace around every token ignored. Register
//! operands may carry any run of `$` and `s` characters in front of the
//! index. Immediates wrap silently to their field width (16 bits for I-type,
//! 26 bits for J) instead of being rejected.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::instructions::{self, InstrDesc};
use crate::isa::field::{FUNC, IMM16, IMM26, RD, RS, RT};
use crate::isa::func::{Format, Func};

pub const NUM_REG_BITS: u32 = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unrecognized instruction: {0}")]
    UnrecognizedMnemonic(String),
    #[error("unrecognized func {func} in word {word:#010x}")]
    UnrecognizedFunc { func: u8, word: u32 },
    #[error("{mnemonic} takes {expected} operands, found {found}")]
    OperandCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("bad register operand: {0:?}")]
    BadRegister(String),
    #[error("bad immediate: {0:?}")]
    BadImmediate(String),
}

/// Operands in the order they appear in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operands {
    /// `ADD, rd, rs, rt`
    R { rd: u8, rs: u8, rt: u8 },
    /// `LW, rt, rs, imm`
    I { rt: u8, rs: u8, imm: i16 },
    /// `J, imm` (26-bit signed)
    J { imm: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operand {
    Reg(u8),
    Imm(i32),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "$s{r}"),
            Operand::Imm(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub func: Func,
    pub operands: Operands,
}

impl Instruction {
    pub fn add(rd: u8, rs: u8, rt: u8) -> Self {
        Self::r(Func::Add, rd, rs, rt)
    }

    pub fn sub(rd: u8, rs: u8, rt: u8) -> Self {
        Self::r(Func::Sub, rd, rs, rt)
    }

    pub fn addi(rt: u8, rs: u8, imm: i16) -> Self {
        Self::i(Func::Addi, rt, rs, imm)
    }

    pub fn lw(rt: u8, rs: u8, imm: i16) -> Self {
        Self::i(Func::Lw, rt, rs, imm)
    }

    pub fn sw(rt: u8, rs: u8, imm: i16) -> Self {
        Self::i(Func::Sw, rt, rs, imm)
    }

    pub fn beq(rt: u8, rs: u8, imm: i16) -> Self {
        Self::i(Func::Beq, rt, rs, imm)
    }

    /// The immediate wraps to 26 bits.
    pub fn j(imm: i32) -> Self {
        Self {
            func: Func::J,
            operands: Operands::J {
                imm: IMM26.wrap_signed(i64::from(imm)),
            },
        }
    }

    fn r(func: Func, rd: u8, rs: u8, rt: u8) -> Self {
        debug_assert!(
            [rd, rs, rt].into_iter().all(reg_in_range),
            "register index out of range: {rd}, {rs}, {rt}"
        );
        Self {
            func,
            operands: Operands::R { rd, rs, rt },
        }
    }

    fn i(func: Func, rt: u8, rs: u8, imm: i16) -> Self {
        debug_assert!(
            reg_in_range(rt) && reg_in_range(rs),
            "register index out of range: {rt}, {rs}"
        );
        Self {
            func,
            operands: Operands::I { rt, rs, imm },
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        self.func.name()
    }

    pub fn format(&self) -> Format {
        match self.operands {
            Operands::R { .. } => Format::R,
            Operands::I { .. } => Format::I,
            Operands::J { .. } => Format::J,
        }
    }

    /// Operands in source order, i.e. the order `encode` expects them.
    pub fn operand_list(&self) -> Vec<Operand> {
        match self.operands {
            Operands::R { rd, rs, rt } => {
                vec![Operand::Reg(rd), Operand::Reg(rs), Operand::Reg(rt)]
            }
            Operands::I { rt, rs, imm } => {
                vec![Operand::Reg(rt), Operand::Reg(rs), Operand::Imm(i32::from(imm))]
            }
            Operands::J { imm } => vec![Operand::Imm(imm)],
        }
    }

    /// Builds an instruction from a mnemonic and its textual operands.
    pub fn parse<S: AsRef<str>>(mnemonic: &str, operands: &[S]) -> Result<Self, CodecError> {
        let mnemonic = mnemonic.trim();
        let desc = instructions::by_mnemonic(mnemonic)
            .ok_or_else(|| CodecError::UnrecognizedMnemonic(mnemonic.to_string()))?;
        let ops: Vec<&str> = operands.iter().map(|s| s.as_ref().trim()).collect();
        let expected = match desc.format {
            Format::R | Format::I => 3,
            Format::J => 1,
        };
        if ops.len() != expected {
            return Err(CodecError::OperandCount {
                mnemonic: desc.mnemonic,
                expected,
                found: ops.len(),
            });
        }
        let operands = match desc.format {
            Format::R => Operands::R {
                rd: parse_reg(ops[0])?,
                rs: parse_reg(ops[1])?,
                rt: parse_reg(ops[2])?,
            },
            Format::I => Operands::I {
                rt: parse_reg(ops[0])?,
                rs: parse_reg(ops[1])?,
                imm: IMM16.wrap_signed(parse_imm(ops[2])?) as i16,
            },
            Format::J => Operands::J {
                imm: IMM26.wrap_signed(parse_imm(ops[0])?),
            },
        };
        Ok(Self {
            func: desc.func,
            operands,
        })
    }

    /// Register indices must be below 32; wider values would be masked.
    pub fn encode(&self) -> u32 {
        debug_assert!(
            self.operand_list().iter().all(|op| match op {
                Operand::Reg(r) => reg_in_range(*r),
                Operand::Imm(_) => true,
            }),
            "register index out of range in {self:?}"
        );
        let w = FUNC.put(0, u32::from(self.func.bits()));
        match self.operands {
            Operands::R { rd, rs, rt } => {
                let w = RS.put(w, u32::from(rs));
                let w = RT.put(w, u32::from(rt));
                RD.put(w, u32::from(rd))
            }
            Operands::I { rt, rs, imm } => {
                let w = RS.put(w, u32::from(rs));
                let w = RT.put(w, u32::from(rt));
                IMM16.put(w, imm as u16 as u32)
            }
            Operands::J { imm } => IMM26.put(w, imm as u32),
        }
    }

    pub fn decode(word: u32) -> Result<Self, CodecError> {
        let func = FUNC.get(word) as u8;
        let desc: &InstrDesc =
            instructions::by_func(func).ok_or(CodecError::UnrecognizedFunc { func, word })?;
        let rs = RS.get(word) as u8;
        let rt = RT.get(word) as u8;
        let operands = match desc.format {
            Format::R => Operands::R {
                rd: RD.get(word) as u8,
                rs,
                rt,
            },
            Format::I => Operands::I {
                rt,
                rs,
                imm: IMM16.get_signed(word) as i16,
            },
            Format::J => Operands::J {
                imm: IMM26.get_signed(word),
            },
        };
        Ok(Self {
            func: desc.func,
            operands,
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())?;
        for op in self.operand_list() {
            write!(f, ", {op}")?;
        }
        Ok(())
    }
}

impl FromStr for Instruction {
    type Err = CodecError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split(',');
        let mnemonic = parts.next().unwrap_or_default();
        let operands: Vec<&str> = parts.collect();
        Self::parse(mnemonic, &operands)
    }
}

/// Encodes a mnemonic and its operands into an instruction word.
pub fn encode<S: AsRef<str>>(mnemonic: &str, operands: &[S]) -> Result<u32, CodecError> {
    Instruction::parse(mnemonic, operands).map(|i| i.encode())
}

/// Encodes one full source line, e.g. `addi, $s1, $s0, -4`.
pub fn encode_line(line: &str) -> Result<u32, CodecError> {
    line.parse::<Instruction>().map(|i| i.encode())
}

/// Decodes a word into its mnemonic and operands, in encode order.
pub fn decode(word: u32) -> Result<(&'static str, Vec<Operand>), CodecError> {
    let ins = Instruction::decode(word)?;
    Ok((ins.mnemonic(), ins.operand_list()))
}

fn reg_in_range(r: u8) -> bool {
    u32::from(r) < (1 << NUM_REG_BITS)
}

fn strip_reg_marker(s: &str) -> &str {
    s.trim_start_matches(|c| c == '$' || c == 's')
}

fn parse_reg(s: &str) -> Result<u8, CodecError> {
    match strip_reg_marker(s).parse::<u8>() {
        Ok(r) if reg_in_range(r) => Ok(r),
        _ => Err(CodecError::BadRegister(s.to_string())),
    }
}

/// Immediates take the same optional `$`/`s` marker as registers, so
/// `BEQ, $s1, $s2, $s3` branches by 3.
fn parse_imm(s: &str) -> Result<i64, CodecError> {
    let bad = || CodecError::BadImmediate(s.to_string());
    let t = strip_reg_marker(s);
    let (neg, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let v = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).map_err(|_| bad())?
    } else {
        body.parse::<i64>().map_err(|_| bad())?
    };
    if neg {
        v.checked_neg().ok_or_else(bad)
    } else {
        Ok(v)
    }
}
