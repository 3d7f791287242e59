use serde::{Deserialize, Serialize};

pub const NUM_REGS: usize = 32;

/// 32 signed 32-bit registers. Register 0 is hard-wired to zero: writes to
/// it are dropped, so it reads 0 no matter what was executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFile {
    regs: [i32; NUM_REGS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// # Panics
    ///
    /// If `idx` is not below [`NUM_REGS`]. Decoded register fields are 5 bits
    /// wide and always in range.
    pub fn read(&self, idx: u8) -> i32 {
        self.regs[usize::from(idx)]
    }

    /// Writes `val` to register `idx`; a write to register 0 is a no-op.
    ///
    /// # Panics
    ///
    /// If `idx` is not below [`NUM_REGS`].
    pub fn write(&mut self, idx: u8, val: i32) {
        if idx == 0 {
            return;
        }
        self.regs[usize::from(idx)] = val;
    }

    pub fn values(&self) -> [i32; NUM_REGS] {
        self.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_register_ignores_writes() {
        let mut rf = RegisterFile::new();
        rf.write(0, 42);
        rf.write(31, -7);
        assert_eq!(rf.read(0), 0);
        assert_eq!(rf.read(31), -7);
    }
}
