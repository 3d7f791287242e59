use crate::codec::{CodecError, Instruction};
use crate::memory::WORD_BYTES;

/// `0x00221800: ADD, $s3, $s1, $s2`
pub fn fmt_word(word: u32) -> String {
    format!("{word:#010x}: {}", fmt_text(word))
}

/// Just the instruction text, or a `.word` marker when the func has no
/// encoding.
pub fn fmt_text(word: u32) -> String {
    match Instruction::decode(word) {
        Ok(ins) => ins.to_string(),
        Err(CodecError::UnrecognizedFunc { func, .. }) => {
            format!(".word (unrecognized func {func})")
        }
        Err(e) => format!(".word ({e})"),
    }
}

/// `(address, word, text)` for each word of a program loaded at 0.
pub fn listing(words: &[u32]) -> impl Iterator<Item = (u32, u32, String)> + '_ {
    words
        .iter()
        .enumerate()
        .map(|(i, &w)| ((i as u32).wrapping_mul(WORD_BYTES), w, fmt_text(w)))
}
