//! Single-cycle datapath.
//!
//! One [`Datapath`] value carries every wire of one instruction through the
//! six stages: fetch, decode, control + register read, execute, memory and
//! write-back. It is built fresh by [`Datapath::fetch`] and means nothing
//! once the instruction has retired; only the register file, the memories
//! and the PC persist.

use serde::Serialize;
use tracing::{trace, warn};

use crate::alu;
use crate::control::ControlSignals;
use crate::cpu::{Access, Trap};
use crate::decoder::Decoded;
use crate::instructions;
use crate::isa::func::func_name;
use crate::memory::{Bus, WORD_BYTES};
use crate::registers::RegisterFile;

/// Bits of PC+4 kept by a jump; the shifted immediate fills the rest.
pub const JUMP_REGION_MASK: u32 = 0xF000_0000;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Datapath {
    // fetch
    pub pc: u32,
    pub ir: u32,
    pub pc_plus4: u32,

    // decode
    pub fields: Decoded,

    // control + register read
    pub ctrl: ControlSignals,
    pub rw_select: u8,
    pub rs_value: i32,
    pub rt_value: i32,
    pub alu_in2: i32,
    pub jump_target: u32,
    pub branch_target: u32,

    // execute
    pub alu_out: i32,
    pub zero: bool,

    // memory
    pub mem_out: i32,
    pub pc_next: u32,

    // write-back
    pub rw_value: i32,
}

fn check_aligned(access: Access, addr: u32) -> Result<(), Trap> {
    if addr % WORD_BYTES != 0 {
        return Err(Trap::Unaligned { access, addr });
    }
    Ok(())
}

impl Datapath {
    /// Reads the word at `pc` into the instruction register.
    pub fn fetch<B: Bus>(pc: u32, imem: &mut B) -> Result<Self, Trap> {
        check_aligned(Access::Fetch, pc)?;
        let ir = imem.read_u32(pc).map_err(|source| Trap::Bus {
            access: Access::Fetch,
            addr: pc,
            source,
        })?;
        trace!(pc, ir = format_args!("{ir:08x}"), "fetch");
        Ok(Self {
            pc,
            ir,
            pc_plus4: pc.wrapping_add(WORD_BYTES),
            ..Self::default()
        })
    }

    /// Splits the instruction register into all fields at once.
    pub fn decode(&mut self) {
        self.fields = Decoded::from_word(self.ir);
        let d = &self.fields;
        trace!(
            func = func_name(d.func),
            rs = d.rs,
            rt = d.rt,
            rd = d.rd,
            imm = d.imm,
            jump_imm = d.jump_imm,
            "decode"
        );
    }

    pub fn control_and_register_fetch(&mut self, regs: &RegisterFile) {
        let d = self.fields;
        if instructions::by_func(d.func).is_none() {
            warn!(pc = self.pc, func = d.func, "unrecognized func, executing as no-op");
        }
        self.ctrl = ControlSignals::for_func(d.func);
        self.rw_select = if self.ctrl.reg_dst() { d.rd } else { d.rt };
        self.rs_value = regs.read(d.rs);
        self.rt_value = regs.read(d.rt);
        self.alu_in2 = if self.ctrl.alu_src() { d.imm } else { self.rt_value };
        self.jump_target =
            (self.pc_plus4 & JUMP_REGION_MASK) | (((d.jump_imm as u32) << 2) & !JUMP_REGION_MASK);
        self.branch_target = self.pc_plus4.wrapping_add((d.imm as u32) << 2);
        trace!(
            rs = d.rs,
            rs_value = self.rs_value,
            rt = d.rt,
            rt_value = self.rt_value,
            "register fetch"
        );
    }

    pub fn execute(&mut self) {
        let (out, zero) = alu::execute(self.ctrl.alu_op, self.rs_value, self.alu_in2);
        self.alu_out = out;
        self.zero = zero;
        trace!(
            op = %self.ctrl.alu_op,
            alu_out = out,
            zero,
            branch_target = self.branch_target,
            "execute"
        );
    }

    /// Performs the load or store, then resolves the next PC.
    pub fn memory<B: Bus>(&mut self, dmem: &mut B) -> Result<(), Trap> {
        let addr = self.alu_out as u32;
        if self.ctrl.mem_read() {
            check_aligned(Access::Load, addr)?;
            let v = dmem.read_u32(addr).map_err(|source| Trap::Bus {
                access: Access::Load,
                addr,
                source,
            })?;
            self.mem_out = v as i32;
            trace!(addr, value = self.mem_out, "load");
        }
        if self.ctrl.mem_write() {
            check_aligned(Access::Store, addr)?;
            dmem.write_u32(addr, self.rt_value as u32)
                .map_err(|source| Trap::Bus {
                    access: Access::Store,
                    addr,
                    source,
                })?;
            trace!(addr, value = self.rt_value, "store");
        }
        self.pc_next = if self.ctrl.jump() {
            self.jump_target
        } else if self.ctrl.branch() && self.zero {
            self.branch_target
        } else {
            self.pc_plus4
        };
        trace!(pc_next = self.pc_next, "next pc");
        Ok(())
    }

    pub fn write_back(&mut self, regs: &mut RegisterFile) {
        self.rw_value = if self.ctrl.mem_to_reg() {
            self.mem_out
        } else {
            self.alu_out
        };
        if self.ctrl.reg_write() {
            regs.write(self.rw_select, self.rw_value);
            trace!(reg = self.rw_select, value = self.rw_value, "write back");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Instruction;

    #[test]
    fn jump_keeps_region_bits() {
        let mut dp = Datapath {
            pc: 0x1000_0010,
            pc_plus4: 0x1000_0014,
            ir: Instruction::j(0x40).encode(),
            ..Datapath::default()
        };
        dp.decode();
        dp.control_and_register_fetch(&RegisterFile::new());
        assert_eq!(dp.jump_target, 0x1000_0100);
    }

    #[test]
    fn negative_branch_offset() {
        let mut dp = Datapath {
            pc: 0x20,
            pc_plus4: 0x24,
            ir: Instruction::beq(0, 0, -3).encode(),
            ..Datapath::default()
        };
        dp.decode();
        dp.control_and_register_fetch(&RegisterFile::new());
        assert_eq!(dp.branch_target, 0x18);
    }
}
