pub mod config;
pub mod errors;
pub mod exec;
pub mod hex;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod state;

pub mod decoder;
pub mod hazard;
pub mod tokenizer;

pub mod sink;

pub use config::{HexPolicy, OverflowPolicy, SimConfig};
pub use exec::{Machine, RunSummary};
pub use sink::{LineGate, NoGate, WriterSink};
pub use state::Slot;
