use clap::ValueEnum;

/// What to do with a result wider than its destination slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OverflowPolicy {
    /// Keep the low-order bits.
    #[default]
    Truncate,
    /// Abort the run with an overflow error.
    Fail,
}

/// What to do with a field that needs more than eight hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HexPolicy {
    /// Show the low 32 bits.
    #[default]
    Truncate,
    /// Abort the run with a hex overflow error.
    Reject,
}

/// Per-run settings of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Pause for an acknowledgment after every instruction.
    pub step: bool,
    pub overflow: OverflowPolicy,
    pub hex: HexPolicy,
    /// Run the stall annotator before executing.
    pub hazards: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step: false,
            overflow: OverflowPolicy::default(),
            hex: HexPolicy::default(),
            hazards: true,
        }
    }
}
