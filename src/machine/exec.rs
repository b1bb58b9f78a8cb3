// machine/exec.rs
use tracing::{debug, info, warn};

use super::config::{OverflowPolicy, SimConfig};
use super::decoder::{Decoded, Decoder};
use super::errors::SimError;
use super::hazard::annotate;
use super::hex::render;
use super::instruction::Instruction;
use super::operand::{Location, Operand};
use super::sink::{Sink, StepGate, StepRecord};
use super::state::{Slot, StateVector};
use super::tokenizer::{tokenize, words};

/// Where the current instruction came from, for error reports.
struct Ctx {
    index: usize,
    mnemonic: &'static str,
    overflow: OverflowPolicy,
}

impl Ctx {
    /// Write `value` to `dest`, applying the overflow policy.
    fn store(&self, state: &mut StateVector, dest: Location, value: i128) -> Result<(), SimError> {
        let slot = dest.slot();
        let mask = slot.mask() as i128;
        let fitted = value & mask;
        if fitted != value {
            match self.overflow {
                OverflowPolicy::Truncate => {
                    warn!(index = self.index, mnemonic = self.mnemonic, %slot, value, "result truncated");
                }
                OverflowPolicy::Fail => {
                    return Err(SimError::Overflow {
                        index: self.index,
                        mnemonic: self.mnemonic.to_string(),
                        slot,
                        value,
                        width: slot.width(),
                    });
                }
            }
        }
        state.set(slot, fitted as u64)
    }

    fn divide_by_zero(&self, divisor: Operand) -> SimError {
        SimError::DivideByZero {
            index: self.index,
            mnemonic: self.mnemonic.to_string(),
            operand: divisor.to_string(),
        }
    }
}

/// Execute one decoded instruction against `state`.
///
/// Operands are read before anything is written. The opcode field is
/// updated only once the data write succeeded, so a failing instruction
/// leaves the opcode of the previous one in place.
pub fn step(state: &mut StateVector, decoded: &Decoded, overflow: OverflowPolicy) -> Result<(), SimError> {
    use Instruction::*;

    let instr = decoded.instruction;
    let ctx = Ctx { index: decoded.index, mnemonic: instr.mnemonic().name(), overflow };
    let val = |state: &StateVector, op: Operand| op.value(state) as i128;

    match instr {
        Zero | Imm | Jump | Stall => {}
        Reset => state.reset(),

        Add{dest,a,b} => { let r = val(state, a) + val(state, b); ctx.store(state, dest, r)?; }
        Sub{dest,a,b} => { let r = val(state, a) - val(state, b); ctx.store(state, dest, r)?; }
        Mult{dest,a,b} => {
            let r = (val(state, a) * val(state, b)) & 0xFFFF_FFFF;
            ctx.store(state, dest, r)?;
        }
        Mulths{dest,a,b} => { let r = val(state, a) * val(state, b); ctx.store(state, dest, r)?; }
        Multhsu{dest,a,b} => {
            let rhs = b.value(state) as u64 as i128;
            let r = val(state, a) * rhs;
            ctx.store(state, dest, r)?;
        }
        Div{dest,a,b} | Divs{dest,a,b} => {
            let den = val(state, b);
            if den == 0 { return Err(ctx.divide_by_zero(b)); }
            let r = val(state, a) / den;
            ctx.store(state, dest, r)?;
        }
        Divuns{dest,a,b} => {
            let den = b.value(state) as u64;
            if den == 0 { return Err(ctx.divide_by_zero(b)); }
            let r = (a.value(state) as u64 / den) as i128;
            ctx.store(state, dest, r)?;
        }

        StoreByte{dest,src} | LoadByte{dest,src} | LoadByteUn{dest,src} => {
            let r = val(state, src);
            ctx.store(state, dest, r)?;
        }

        StoreHalf{dest,a,b} | StoreWord{dest,a,b}
        | LoadHalf{dest,a,b} | LoadHalfUn{dest,a,b} | LoadWord{dest,a,b}
        | SetLessThan{dest,a,b} | SetLessThanUn{dest,a,b} => {
            let r = val(state, a) - val(state, b);
            ctx.store(state, dest, r)?;
        }

        ShiftLeftLog{dest,src} => {
            let s = src.slot();
            let r = (state.get(s) << 1) & s.mask();
            ctx.store(state, dest, r as i128)?;
        }
        ShiftRightLog{dest,src} => {
            let r = state.get(src.slot()) >> 1;
            ctx.store(state, dest, r as i128)?;
        }
        ShiftRightArith{dest,src} => {
            let s = src.slot();
            let v = state.get(s);
            let sign = v & (1 << (s.width() - 1));
            ctx.store(state, dest, ((v >> 1) | sign) as i128)?;
        }
        ShiftLeftArith{dest,src} => {
            // one bit wider than the source
            let r = (state.get(src.slot()) as i128) << 1;
            ctx.store(state, dest, r)?;
        }

        Ain{src} | LoadA{src} => { let r = val(state, src); ctx.store(state, Location::RegA, r)?; }
        Bin{src} | LoadB{src} => { let r = val(state, src); ctx.store(state, Location::RegB, r)?; }
        Cin{src} | LoadC{src} => { let r = val(state, src); ctx.store(state, Location::RegC, r)?; }
        Mem1In{src} => { let r = val(state, src); ctx.store(state, Location::Mem1, r)?; }
        Mem2In{src} => { let r = val(state, src); ctx.store(state, Location::Mem2, r)?; }
        Mem3In{src} => { let r = val(state, src); ctx.store(state, Location::Mem3, r)?; }
        Mem4In{src} => { let r = val(state, src); ctx.store(state, Location::Mem4, r)?; }
        Mem5In{src} => { let r = val(state, src); ctx.store(state, Location::Mem5, r)?; }

        Aout{dest} => copy(state, &ctx, Location::RegA, dest)?,
        Bout{dest} => copy(state, &ctx, Location::RegB, dest)?,
        Cout{dest} => copy(state, &ctx, Location::RegC, dest)?,
        Mem1Out{dest} => copy(state, &ctx, Location::Mem1, dest)?,
        Mem2Out{dest} => copy(state, &ctx, Location::Mem2, dest)?,
        Mem3Out{dest} => copy(state, &ctx, Location::Mem3, dest)?,
        Mem4Out{dest} => copy(state, &ctx, Location::Mem4, dest)?,
        Mem5Out{dest} => copy(state, &ctx, Location::Mem5, dest)?,
    }

    state.set(Slot::Opcode, instr.opcode() as u64)
}

fn copy(state: &mut StateVector, ctx: &Ctx, from: Location, to: Location) -> Result<(), SimError> {
    let v = state.get(from.slot());
    ctx.store(state, to, v as i128)
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub stalls: usize,
    /// Tokens that were not a known mnemonic.
    pub skipped: usize,
}

/// Owns the state vector for the lifetime of a simulation.
pub struct Machine {
    state: StateVector,
    config: SimConfig,
}

impl Machine {
    pub fn new(config: SimConfig) -> Self {
        Self { state: StateVector::new(), config }
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Tokenize program text and, if enabled, annotate it with stalls.
    pub fn prepare(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        if self.config.hazards { annotate(&tokens) } else { words(&tokens) }
    }

    /// Execute a token stream to its end or to the first error.
    ///
    /// The state is not rolled back on error: every instruction before the
    /// failing one stays applied.
    pub fn run<S: Sink, G: StepGate>(
        &mut self,
        tokens: &[String],
        sink: &mut S,
        gate: &mut G,
    ) -> Result<RunSummary, SimError> {
        let mut decoder = Decoder::new(tokens);
        let mut summary = RunSummary::default();

        for next in decoder.by_ref() {
            let decoded = next?;
            step(&mut self.state, &decoded, self.config.overflow)?;

            let mnemonic = decoded.instruction.mnemonic().name();
            debug!(index = decoded.index, mnemonic, "executed");
            summary.executed += 1;
            if decoded.instruction == Instruction::Stall {
                summary.stalls += 1;
            }

            let words = render(&self.state, self.config.hex)?;
            sink.emit(&StepRecord { index: decoded.index, mnemonic, words })?;
            if self.config.step {
                gate.wait(&mut *sink)?;
            }
        }

        summary.skipped = decoder.skipped();
        info!(
            executed = summary.executed,
            stalls = summary.stalls,
            skipped = summary.skipped,
            "run finished"
        );
        Ok(summary)
    }
}
