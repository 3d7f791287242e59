//! Human-readable execution trace, one line per stage of each instruction.
//! The wording is for people reading a trace file and carries no
//! compatibility promise.

use crate::datapath::Datapath;
use crate::isa::func::func_name;
use crate::sim::{Halt, RunSummary};
use crate::workload::Verdict;

pub fn render(dp: &Datapath) -> Vec<String> {
    let d = &dp.fields;
    let mut out = vec![
        format!("Fetch instruction {:08x} at PC {}", dp.ir, dp.pc),
        format!(
            "\tDecode instruction (fun rs rt rd Imm JTImm): {} {} {} {} {} {}",
            func_name(d.func),
            d.rs,
            d.rt,
            d.rd,
            d.imm,
            d.jump_imm
        ),
        format!(
            "\tFetch register: Rs: Reg[{}]={}, Rt: Reg[{}]={}",
            d.rs, dp.rs_value, d.rt, dp.rt_value
        ),
        format!(
            "\tEXE: Ops {}, ALUout: {}, Zero: {}, BTaddr: {}",
            dp.ctrl.alu_op,
            dp.alu_out,
            u8::from(dp.zero),
            dp.branch_target
        ),
    ];
    if dp.ctrl.mem_read() {
        out.push(format!(
            "\tMEM: LW from {}, value: {}",
            dp.alu_out, dp.mem_out
        ));
    }
    if dp.ctrl.mem_write() {
        out.push(format!(
            "\tMEM: SW at {}, value: {}",
            dp.alu_out, dp.rt_value
        ));
    }
    out.push(format!("\tMEM: PCnext: {}", dp.pc_next));
    if dp.ctrl.reg_write() {
        out.push(format!("\tWB: Reg[{}] = {}", dp.rw_select, dp.rw_value));
    }
    out
}

pub fn halt_line(halt: &Halt) -> String {
    match halt {
        Halt::LoopBack => {
            "Simulation goes to infinite loop of the program, terminate it".to_string()
        }
        other => format!("Simulation {other}"),
    }
}

pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    vec![
        "===================================================".to_string(),
        "Simulation Summary: ".to_string(),
        format!("\t Num of Instruction Executed: {}", summary.executed),
    ]
}

/// Everything after the last instruction: the halt line, any verification
/// failures, the pass line when there is one, then the summary block.
pub fn closing_lines(summary: &RunSummary, verdict: Option<&Verdict>) -> Vec<String> {
    let mut out = vec![halt_line(&summary.halt)];
    if let Some(v) = verdict {
        out.extend(v.mismatches.iter().map(|m| {
            format!(
                "Verification failed: VA[{}]: {}, Sim Number: {}",
                m.index, m.expected, m.actual
            )
        }));
        if v.passed() {
            out.push(v.message().to_string());
        }
    }
    out.extend(summary_lines(summary));
    out
}
