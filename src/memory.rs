use std::fmt;
use std::ops::Range;

pub const WORD_BYTES: u32 = 4;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemError {
    #[error("access of {len} bytes at {addr:#010x} is outside the {size}-byte memory")]
    OutOfRange { addr: u32, len: usize, size: usize },
}

/// Byte-addressed storage. Words are little-endian.
pub trait Bus {
    fn read_u8(&mut self, addr: u32) -> Result<u8, MemError>;
    fn read_u32(&mut self, addr: u32) -> Result<u32, MemError>;
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), MemError>;
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), MemError>;
}

/// A fixed-capacity byte arena starting at address 0.
#[derive(Clone)]
pub struct LinearMemory {
    pub mem: Vec<u8>,
}

impl LinearMemory {
    pub fn new(size: usize) -> Self {
        Self { mem: vec![0; size] }
    }

    pub fn size(&self) -> usize {
        self.mem.len()
    }

    fn span(&self, addr: u32, len: usize) -> Result<Range<usize>, MemError> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.mem.len() => Ok(start..end),
            _ => Err(MemError::OutOfRange {
                addr,
                len,
                size: self.mem.len(),
            }),
        }
    }

    fn load_le_u32(&self, addr: u32) -> Result<u32, MemError> {
        let r = self.span(addr, 4)?;
        let b = &self.mem[r];
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn store_le_u32(&mut self, addr: u32, v: u32) -> Result<(), MemError> {
        let r = self.span(addr, 4)?;
        self.mem[r].copy_from_slice(&v.to_le_bytes());
        Ok(())
    }

    /// Reads a word without needing `&mut`, for inspecting a finished run.
    pub fn peek_u32(&self, addr: u32) -> Result<u32, MemError> {
        self.load_le_u32(addr)
    }

    /// Stores `words` back to back starting at `addr`.
    pub fn store_words(&mut self, addr: u32, words: &[u32]) -> Result<(), MemError> {
        let mut at = addr;
        for &w in words {
            self.store_le_u32(at, w)?;
            at = at.wrapping_add(WORD_BYTES);
        }
        Ok(())
    }
}

impl fmt::Debug for LinearMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearMemory")
            .field("size", &self.mem.len())
            .finish_non_exhaustive()
    }
}

impl Bus for LinearMemory {
    fn read_u8(&mut self, addr: u32) -> Result<u8, MemError> {
        let r = self.span(addr, 1)?;
        Ok(self.mem[r.start])
    }
    fn read_u32(&mut self, addr: u32) -> Result<u32, MemError> {
        self.load_le_u32(addr)
    }
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), MemError> {
        let r = self.span(addr, 1)?;
        self.mem[r.start] = val;
        Ok(())
    }
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), MemError> {
        self.store_le_u32(addr, val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_little_endian() {
        let mut m = LinearMemory::new(8);
        m.write_u32(4, 0x1122_3344).unwrap();
        assert_eq!(m.read_u8(4).unwrap(), 0x44);
        assert_eq!(m.read_u8(7).unwrap(), 0x11);
        assert_eq!(m.peek_u32(4).unwrap(), 0x1122_3344);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut m = LinearMemory::new(8);
        assert_eq!(
            m.read_u32(6),
            Err(MemError::OutOfRange { addr: 6, len: 4, size: 8 })
        );
        assert!(m.write_u8(8, 1).is_err());
        assert!(m.read_u32(u32::MAX).is_err());
        assert!(m.store_words(4, &[1, 2]).is_err());
    }
}
