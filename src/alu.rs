use crate::control::AluOp;

/// Runs one ALU operation. Arithmetic wraps at 32 bits; the second value is
/// the Zero flag.
pub fn execute(op: AluOp, a: i32, b: i32) -> (i32, bool) {
    let res = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
    };
    (res, res == 0)
}
