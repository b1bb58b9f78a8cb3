use thiserror::Error;

use super::state::Slot;

/// Errors that abort a simulation run.
///
/// Instruction-level variants carry the index of the mnemonic token in the
/// executed stream, the mnemonic itself and the operand that caused the
/// failure, so a run can be reproduced from the message alone.
#[derive(Error, Debug)]
pub enum SimError {
    /// Operand is neither a location name nor a decimal literal.
    #[error("token {index}: {mnemonic}: unknown operand `{operand}`")]
    UnknownOperand {
        index: usize,
        mnemonic: String,
        operand: String,
    },

    /// A literal appeared where a register or memory slot is required.
    #[error("token {index}: {mnemonic}: `{operand}` is not a register or memory slot")]
    NotALocation {
        index: usize,
        mnemonic: String,
        operand: String,
    },

    #[error("token {index}: {mnemonic}: division by zero (divisor `{operand}`)")]
    DivideByZero {
        index: usize,
        mnemonic: String,
        operand: String,
    },

    /// The stream ended before all operands of an instruction were read.
    #[error("token {index}: {mnemonic}: expected {expected} operand(s), found {found}")]
    TruncatedInstruction {
        index: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    /// Result does not fit the destination and the overflow policy is `fail`.
    #[error("token {index}: {mnemonic}: result {value} does not fit {width}-bit {slot}")]
    Overflow {
        index: usize,
        mnemonic: String,
        slot: Slot,
        value: i128,
        width: u32,
    },

    /// Raw field write wider than the field.
    #[error("value {value:#x} does not fit {width}-bit field {slot}")]
    WidthViolation { slot: Slot, value: u64, width: u32 },

    /// Field has more significant bits than eight hex digits can show.
    #[error("field {slot} holds {value:#x}, wider than 8 hex digits")]
    HexOverflow { slot: Slot, value: u64 },

    /// Display sink or step acknowledgment failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
