use pretty_assertions::assert_eq;

use mipsim::loader::{assemble, format_word_file, parse_word_file, LoadError};
use mipsim::CodecError;

const SOURCE: &str = "\
# header comment

ADD, $s3, $s1, $s2
   # indented comment
MUL, $s1, $s2, $s3
ADDI, $s1, $s0, 0x10   # trailing comment
J, 3000
";

#[test]
fn assemble_skips_comments_and_blank_lines() {
    let asm = assemble(SOURCE);
    let lines: Vec<usize> = asm.lines.iter().map(|l| l.line).collect();
    assert_eq!(lines, vec![3, 6, 7]);
    assert_eq!(asm.lines[1].source, "ADDI, $s1, $s0, 0x10");
    assert_eq!(asm.words()[0], 0x0022_1800);
    assert_eq!(asm.words()[1] & 0xFFFF, 0x10);
}

#[test]
fn bad_lines_are_reported_not_fatal() {
    let asm = assemble(SOURCE);
    assert_eq!(asm.skipped.len(), 1);
    let skipped = &asm.skipped[0];
    assert_eq!(skipped.line, 5);
    assert_eq!(skipped.error, CodecError::UnrecognizedMnemonic("MUL".into()));
    assert_eq!(asm.words().len(), 3);
}

#[test]
fn empty_source_assembles_to_nothing() {
    let asm = assemble("\n\n# nothing here\n");
    assert!(asm.lines.is_empty());
    assert!(asm.skipped.is_empty());
}

#[test]
fn word_file_round_trip() {
    let words = assemble(SOURCE).words();
    let text = format_word_file(&words);
    assert_eq!(text.lines().next(), Some("00221800"));
    assert_eq!(text.lines().count(), 3);
    assert_eq!(parse_word_file(&text).unwrap(), words);
}

#[test]
fn word_file_tolerates_blank_lines_and_short_words() {
    assert_eq!(
        parse_word_file("\n  1f \n\nFFFFFFFF\n").unwrap(),
        vec![0x1F, 0xFFFF_FFFF]
    );
}

#[test]
fn word_file_rejects_garbage() {
    assert_eq!(
        parse_word_file("00221800\nnot-hex\n"),
        Err(LoadError::BadWord {
            line: 2,
            text: "not-hex".into()
        })
    );
    assert!(matches!(
        parse_word_file("123456789"),
        Err(LoadError::BadWord { line: 1, .. })
    ));
    assert!(parse_word_file("0x10").is_err());
}
