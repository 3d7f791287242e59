use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use mipsim::loader::parse_word_file;

/// Reads a binary word file (one hex word per line).
pub fn load_word_file(path: &Path) -> Result<Vec<u32>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let words = parse_word_file(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(words)
}

/// `prog.asm` -> `prog.asm.bin`
pub fn bin_path_for(src: &Path) -> PathBuf {
    let mut s = src.as_os_str().to_os_string();
    s.push(".bin");
    PathBuf::from(s)
}

/// Writes to `out` when given, stdout otherwise.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_word_file_from_disk() {
        let path = std::env::temp_dir().join("_mipsim_model_test.bin");
        std::fs::write(&path, "00221800\n3c000bb8\n").unwrap();
        let words = load_word_file(&path).unwrap();
        assert_eq!(words, vec![0x0022_1800, 0x3C00_0BB8]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn bin_path_appends_suffix() {
        assert_eq!(bin_path_for(Path::new("dir/test.asm")), PathBuf::from("dir/test.asm.bin"));
    }
}
