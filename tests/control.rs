use pretty_assertions::assert_eq;

use mipsim::control::{AluOp, ControlSignals, Lines};
use mipsim::isa::func::Func;

fn lines(func: Func) -> Lines {
    ControlSignals::for_op(func).lines
}

#[test]
fn r_type_writes_rd() {
    for f in [Func::Add, Func::Sub] {
        let c = ControlSignals::for_op(f);
        assert!(c.reg_dst() && c.reg_write());
        assert!(!c.alu_src() && !c.mem_read() && !c.mem_write() && !c.mem_to_reg());
        assert!(!c.jump() && !c.branch());
    }
    assert_eq!(ControlSignals::for_op(Func::Add).alu_op, AluOp::Add);
    assert_eq!(ControlSignals::for_op(Func::Sub).alu_op, AluOp::Sub);
}

#[test]
fn load_store_table() {
    assert_eq!(
        lines(Func::Lw),
        Lines::MEM_READ | Lines::MEM_TO_REG | Lines::ALU_SRC | Lines::REG_WRITE
    );
    assert_eq!(lines(Func::Sw), Lines::MEM_WRITE | Lines::ALU_SRC);
    assert_eq!(ControlSignals::for_op(Func::Lw).alu_op, AluOp::Add);
    assert_eq!(ControlSignals::for_op(Func::Sw).alu_op, AluOp::Add);
}

#[test]
fn branch_jump_addi_table() {
    assert_eq!(lines(Func::Beq), Lines::BRANCH);
    assert_eq!(ControlSignals::for_op(Func::Beq).alu_op, AluOp::Sub);
    assert_eq!(lines(Func::Addi), Lines::ALU_SRC | Lines::REG_WRITE);
    assert_eq!(lines(Func::J), Lines::JUMP);
}

#[test]
fn unknown_and_reserved_funcs_are_inert() {
    assert_eq!(ControlSignals::for_func(2), ControlSignals::INERT);
    assert_eq!(ControlSignals::for_func(63), ControlSignals::INERT);
    assert_eq!(ControlSignals::for_func(3).lines, Lines::empty());
    assert_eq!(ControlSignals::default(), ControlSignals::INERT);
}

#[test]
fn raw_func_matches_enum() {
    for f in Func::ALL {
        assert_eq!(ControlSignals::for_func(f.bits()), ControlSignals::for_op(f));
    }
}
