use crate::isa::func::{Format, Func};

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub func: Func,
    pub mnemonic: &'static str,
    pub format: Format,
}

/// Every encodable instruction. LWR is reserved and has no entry.
pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        func: Func::Add,
        mnemonic: "ADD",
        format: Format::R,
    },
    InstrDesc {
        func: Func::Sub,
        mnemonic: "SUB",
        format: Format::R,
    },
    InstrDesc {
        func: Func::Lw,
        mnemonic: "LW",
        format: Format::I,
    },
    InstrDesc {
        func: Func::Sw,
        mnemonic: "SW",
        format: Format::I,
    },
    InstrDesc {
        func: Func::Beq,
        mnemonic: "BEQ",
        format: Format::I,
    },
    InstrDesc {
        func: Func::Addi,
        mnemonic: "ADDI",
        format: Format::I,
    },
    InstrDesc {
        func: Func::J,
        mnemonic: "J",
        format: Format::J,
    },
];

/// Case-insensitive mnemonic lookup.
pub fn by_mnemonic(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE
        .iter()
        .find(|d| d.mnemonic.eq_ignore_ascii_case(mnemonic))
}

pub fn by_func(bits: u8) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.func.bits() == bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_agree() {
        for d in TABLE {
            assert_eq!(by_func(d.func.bits()).unwrap().mnemonic, d.mnemonic);
            assert_eq!(by_mnemonic(&d.mnemonic.to_lowercase()).unwrap().func, d.func);
        }
        assert!(by_mnemonic("lwr").is_none());
        assert!(by_func(Func::Lwr.bits()).is_none());
        assert!(by_func(63).is_none());
    }
}
