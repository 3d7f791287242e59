use pretty_assertions::assert_eq;

use mipsim::disasm::{fmt_text, fmt_word, listing};
use mipsim::sim::{Halt, RunSummary};
use mipsim::workload::{Mismatch, Verdict};
use mipsim::{trace, Cpu, Instruction, LinearMemory};

#[test]
fn formats_known_words() {
    assert_eq!(fmt_word(0x0022_1800), "0x00221800: ADD, $s3, $s1, $s2");
    assert_eq!(fmt_text(0x3C00_0BB8), "J, 3000");
    assert_eq!(fmt_text(Instruction::lw(7, 5, -4).encode()), "LW, $s7, $s5, -4");
}

#[test]
fn unknown_func_renders_as_data() {
    assert_eq!(fmt_text(0x0800_0000), ".word (unrecognized func 2)");
    assert_eq!(fmt_word(0xFFFF_FFFF), "0xffffffff: .word (unrecognized func 63)");
}

#[test]
fn listing_numbers_addresses_by_word() {
    let words = [Instruction::addi(1, 0, 1).encode(), Instruction::j(0).encode()];
    let rows: Vec<_> = listing(&words).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, 0);
    assert_eq!(rows[1], (4, words[1], "J, 0".to_string()));
}

fn run_one(ins: Instruction, setup: impl FnOnce(&mut Cpu)) -> Vec<String> {
    let mut imem = LinearMemory::new(64);
    let mut dmem = LinearMemory::new(64);
    imem.store_words(0, &[ins.encode()]).unwrap();
    let mut cpu = Cpu::new();
    setup(&mut cpu);
    let dp = cpu.step(&mut imem, &mut dmem).unwrap();
    trace::render(&dp)
}

#[test]
fn trace_of_add() {
    let lines = run_one(Instruction::add(3, 1, 2), |cpu| {
        cpu.regs.write(1, 5);
        cpu.regs.write(2, 7);
    });
    assert_eq!(lines[0], "Fetch instruction 00221800 at PC 0");
    assert!(lines[1].starts_with("\tDecode instruction (fun rs rt rd Imm JTImm): ADD 1 2 3 "));
    assert_eq!(lines[2], "\tFetch register: Rs: Reg[1]=5, Rt: Reg[2]=7");
    assert!(lines[3].starts_with("\tEXE: Ops ADD, ALUout: 12, Zero: 0, BTaddr: "));
    assert_eq!(lines[4], "\tMEM: PCnext: 4");
    assert_eq!(lines[5], "\tWB: Reg[3] = 12");
    assert_eq!(lines.len(), 6);
}

#[test]
fn trace_of_store_has_no_write_back() {
    let lines = run_one(Instruction::sw(3, 0, 8), |cpu| cpu.regs.write(3, -1));
    assert!(lines.contains(&"\tMEM: SW at 8, value: -1".to_string()));
    assert!(!lines.iter().any(|l| l.contains("WB:")));
}

#[test]
fn trace_of_load() {
    let lines = run_one(Instruction::lw(4, 0, 0), |_| {});
    assert!(lines.contains(&"\tMEM: LW from 0, value: 0".to_string()));
    assert_eq!(lines.last().unwrap(), "\tWB: Reg[4] = 0");
}

#[test]
fn halt_and_summary_lines() {
    assert_eq!(
        trace::halt_line(&Halt::LoopBack),
        "Simulation goes to infinite loop of the program, terminate it"
    );
    let summary = RunSummary {
        halt: Halt::Sentinel { pc: 12000 },
        executed: 149,
    };
    assert_eq!(
        trace::summary_lines(&summary).last().unwrap(),
        "\t Num of Instruction Executed: 149"
    );
}

#[test]
fn closing_lines_put_pass_line_before_summary() {
    let summary = RunSummary {
        halt: Halt::LoopBack,
        executed: 149,
    };
    let verdict = Verdict {
        halt: summary.halt,
        mismatches: vec![],
    };
    let lines = trace::closing_lines(&summary, Some(&verdict));
    assert_eq!(
        lines,
        vec![
            "Simulation goes to infinite loop of the program, terminate it".to_string(),
            "Simulation and Verification Passed Successfully!".to_string(),
            "===================================================".to_string(),
            "Simulation Summary: ".to_string(),
            "\t Num of Instruction Executed: 149".to_string(),
        ]
    );
}

#[test]
fn closing_lines_list_failures_without_pass_line() {
    let summary = RunSummary {
        halt: Halt::Sentinel { pc: 12000 },
        executed: 149,
    };
    let verdict = Verdict {
        halt: summary.halt,
        mismatches: vec![Mismatch {
            index: 2,
            expected: 9,
            actual: 0,
        }],
    };
    let lines = trace::closing_lines(&summary, Some(&verdict));
    assert_eq!(lines[1], "Verification failed: VA[2]: 9, Sim Number: 0");
    assert!(!lines.iter().any(|l| l.contains("Passed")));
    assert_eq!(trace::closing_lines(&summary, None).len(), 4);
}
