use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;

use mipsim::disasm::listing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub addr: u32,
    pub word: u32,
    pub text: String,
}

pub fn build_listing(words: &[u32]) -> Vec<ListingEntry> {
    listing(words)
        .map(|(addr, word, text)| ListingEntry { addr, word, text })
        .collect()
}

pub fn render_text(entries: &[ListingEntry], show_words: bool) -> String {
    let mut buf = String::new();
    for e in entries {
        if show_words {
            let _ = writeln!(buf, "{:#010x}: {:08x}  {}", e.addr, e.word, e.text);
        } else {
            let _ = writeln!(buf, "{:#010x}: {}", e.addr, e.text);
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use mipsim::Instruction;

    #[test]
    fn listing_addresses_step_by_four() {
        let words = [
            Instruction::add(3, 1, 2).encode(),
            0xFC00_0000, // func 63
            Instruction::j(3000).encode(),
        ];
        let entries = build_listing(&words);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].addr, 4);
        assert_eq!(entries[2].text, "J, 3000");
        let txt = render_text(&entries, false);
        assert!(txt.starts_with("0x00000000: ADD, $s3, $s1, $s2\n"));
        assert!(txt.contains("0x00000004: .word (unrecognized func 63)"));
    }
}
