/// A bit field inside a 32-bit instruction word, described by its lowest
/// bit and its width. All instruction layouts are expressed as sets of these
/// over a single `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub lsb: u32,
    pub width: u32,
}

/// func, bits 31..26 (every format)
pub const FUNC: Field = Field::new(26, 6);
/// Rs, bits 25..21 (R and I)
pub const RS: Field = Field::new(21, 5);
/// Rt, bits 20..16 (R and I)
pub const RT: Field = Field::new(16, 5);
/// Rd, bits 15..11 (R only)
pub const RD: Field = Field::new(11, 5);
/// signed immediate, bits 15..0 (I)
pub const IMM16: Field = Field::new(0, 16);
/// signed jump immediate, bits 25..0 (J)
pub const IMM26: Field = Field::new(0, 26);

impl Field {
    pub const fn new(lsb: u32, width: u32) -> Self {
        Self { lsb, width }
    }

    /// Right-aligned mask of `width` ones.
    pub const fn mask(self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    pub const fn get(self, word: u32) -> u32 {
        (word >> self.lsb) & self.mask()
    }

    /// Reads the field as two's complement and sign-extends it to 32 bits.
    pub const fn get_signed(self, word: u32) -> i32 {
        sign_ext(self.get(word), self.width)
    }

    /// Returns `word` with this field replaced by the low `width` bits of `value`.
    pub const fn put(self, word: u32, value: u32) -> u32 {
        let m = self.mask() << self.lsb;
        (word & !m) | ((value & self.mask()) << self.lsb)
    }

    /// Truncates a signed value to this field's width, then sign-extends it
    /// back. Values outside the field's range wrap.
    pub const fn wrap_signed(self, value: i64) -> i32 {
        sign_ext((value as u32) & self.mask(), self.width)
    }
}

#[inline]
const fn sign_ext(v: u32, bits: u32) -> i32 {
    if bits >= 32 {
        return v as i32;
    }
    let s = 32 - bits;
    ((v << s) as i32) >> s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_tile_the_r_layout() {
        let w = FUNC.put(0, 0x3F) | RS.put(0, 0x1F) | RT.put(0, 0x1F) | RD.put(0, 0x1F);
        assert_eq!(w, 0xFFFF_F800);
    }

    #[test]
    fn signed_reads_extend() {
        assert_eq!(IMM16.get_signed(0x0000_FFFF), -1);
        assert_eq!(IMM16.get_signed(0x0000_7FFF), 32767);
        assert_eq!(IMM26.get_signed(0x03FF_FFFF), -1);
        assert_eq!(IMM26.get_signed(0x0200_0000), -(1 << 25));
    }

    #[test]
    fn put_leaves_other_bits_alone() {
        let w = 0xFFFF_FFFF;
        assert_eq!(RT.put(w, 0), 0xFFE0_FFFF);
        assert_eq!(IMM16.put(0, 0x1_2345), 0x2345);
    }

    #[test]
    fn wrap_signed_truncates() {
        assert_eq!(IMM16.wrap_signed(32768), -32768);
        assert_eq!(IMM16.wrap_signed(65535), -1);
        assert_eq!(IMM16.wrap_signed(-32769), 32767);
        assert_eq!(IMM26.wrap_signed(1 << 25), -(1 << 25));
    }
}
