use serde::{Deserialize, Serialize};

use crate::isa::field::{FUNC, IMM16, IMM26, RD, RS, RT};

/// Every field of an instruction word, split out regardless of which format
/// the word actually uses. Fields that do not apply to the word's format
/// simply carry whatever bits sit in that position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub func: u8,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    /// bits 15..0, sign-extended
    pub imm: i32,
    /// bits 25..0, sign-extended
    pub jump_imm: i32,
}

impl Decoded {
    pub fn from_word(raw32: u32) -> Self {
        Self {
            func: FUNC.get(raw32) as u8,
            rs: RS.get(raw32) as u8,
            rt: RT.get(raw32) as u8,
            rd: RD.get(raw32) as u8,
            imm: IMM16.get_signed(raw32),
            jump_imm: IMM26.get_signed(raw32),
        }
    }
}
