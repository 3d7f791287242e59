use tracing::warn;

use crate::codec::{CodecError, Instruction};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: expected a hex instruction word, found {text:?}")]
    BadWord { line: usize, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledLine {
    pub line: usize, // 1-based
    pub source: String,
    pub word: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub source: String,
    pub error: CodecError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub lines: Vec<AssembledLine>,
    pub skipped: Vec<SkippedLine>,
}

impl Assembly {
    pub fn words(&self) -> Vec<u32> {
        self.lines.iter().map(|l| l.word).collect()
    }
}

/// Blank lines and lines whose first non-blank character is `#`.
pub fn is_ignored(line: &str) -> bool {
    let t = line.trim_start();
    t.is_empty() || t.starts_with('#')
}

/// Assembles source text line by line. Lines that fail to encode are logged
/// and skipped; they never abort the rest of the file.
pub fn assemble(source: &str) -> Assembly {
    let mut out = Assembly::default();
    for (i, raw) in source.lines().enumerate() {
        if is_ignored(raw) {
            continue;
        }
        let line = i + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        match text.parse::<Instruction>() {
            Ok(ins) => out.lines.push(AssembledLine {
                line,
                source: text.to_string(),
                word: ins.encode(),
            }),
            Err(error) => {
                warn!(line, %error, "ignoring line");
                out.skipped.push(SkippedLine {
                    line,
                    source: text.to_string(),
                    error,
                });
            }
        }
    }
    out
}

/// One lower-case, zero-padded 8-digit hex word per line.
pub fn format_word_file(words: &[u32]) -> String {
    let mut s = String::with_capacity(words.len() * 9);
    for w in words {
        s.push_str(&format!("{w:08x}\n"));
    }
    s
}

pub fn parse_word_file(text: &str) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let t = raw.trim();
        if t.is_empty() {
            continue;
        }
        let bad = || LoadError::BadWord {
            line: i + 1,
            text: t.to_string(),
        };
        if t.len() > 8 || !t.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        words.push(u32::from_str_radix(t, 16).map_err(|_| bad())?);
    }
    Ok(words)
}
