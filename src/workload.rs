//! The array-sum sample workload (`demos/array_sum.asm`).
//!
//! The program finds `A` through register 1 and `B` through register 2 and
//! writes `A[i] = B[i-1] + B[i] + B[i+1]` for `i` in `1..n-2`. [`ArraySum`] seeds
//! the inputs before a run and checks `A` afterwards.

use serde::Serialize;

use crate::memory::{MemError, WORD_BYTES};
use crate::sim::{Halt, RunSummary, Simulator};

/// Register holding the base address of `A`.
pub const A_BASE_REG: u8 = 1;
/// Register holding the base address of `B`.
pub const B_BASE_REG: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArraySum {
    pub n: usize,
    pub a_base: u32,
    pub b_base: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub index: usize,
    pub expected: i32,
    pub actual: i32,
}

/// Outcome of checking a finished array-sum run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub halt: Halt,
    pub mismatches: Vec<Mismatch>,
}

impl Verdict {
    /// A run passes when `A` is right. Returning to address 0 is how the
    /// program may end, so only a step-limit stop counts against it.
    pub fn passed(&self) -> bool {
        !matches!(self.halt, Halt::StepLimit { .. }) && self.mismatches.is_empty()
    }

    pub fn message(&self) -> &'static str {
        if self.passed() {
            "Simulation and Verification Passed Successfully!"
        } else {
            "Verification Failed!"
        }
    }
}

impl Default for ArraySum {
    fn default() -> Self {
        Self::new(16)
    }
}

impl ArraySum {
    /// `A` at 0, `B` right after it.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            a_base: 0,
            b_base: (n as u32).wrapping_mul(WORD_BYTES),
        }
    }

    fn addr(base: u32, i: usize) -> u32 {
        base.wrapping_add((i as u32).wrapping_mul(WORD_BYTES))
    }

    /// Points registers 1 and 2 at `A` and `B` and stores `b` into data memory.
    pub fn prepare(&self, sim: &mut Simulator, b: &[i32]) -> Result<(), MemError> {
        sim.cpu.regs.write(A_BASE_REG, self.a_base as i32);
        sim.cpu.regs.write(B_BASE_REG, self.b_base as i32);
        let words: Vec<u32> = b.iter().take(self.n).map(|&v| v as u32).collect();
        sim.dmem.store_words(self.b_base, &words)
    }

    /// Indices the program fills in.
    pub fn checked_indices(&self) -> std::ops::Range<usize> {
        1..self.n.saturating_sub(2).max(1)
    }

    pub fn expected(&self, b: &[i32], i: usize) -> i32 {
        b[i - 1].wrapping_add(b[i]).wrapping_add(b[i + 1])
    }

    /// Compares `A` in data memory against the sums of `b`.
    pub fn verify(&self, sim: &Simulator, b: &[i32]) -> Result<Vec<Mismatch>, MemError> {
        let mut bad = Vec::new();
        for i in self.checked_indices() {
            if i + 1 >= b.len() {
                break;
            }
            let expected = self.expected(b, i);
            let actual = sim.dmem.peek_u32(Self::addr(self.a_base, i))? as i32;
            if actual != expected {
                bad.push(Mismatch {
                    index: i,
                    expected,
                    actual,
                });
            }
        }
        Ok(bad)
    }

    /// Verifies `A` after `summary` and folds in how the run stopped.
    pub fn judge(
        &self,
        sim: &Simulator,
        b: &[i32],
        summary: &RunSummary,
    ) -> Result<Verdict, MemError> {
        Ok(Verdict {
            halt: summary.halt,
            mismatches: self.verify(sim, b)?,
        })
    }
}

/// Deterministic inputs in `0..=0x7FFF`, from a 32-bit LCG.
pub fn sample_inputs(n: usize, seed: u32) -> Vec<i32> {
    let mut x = seed;
    (0..n)
        .map(|_| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((x >> 16) & 0x7FFF) as i32
        })
        .collect()
}
