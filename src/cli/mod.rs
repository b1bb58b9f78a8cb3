use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::machine::{
    HexPolicy, LineGate, Machine, NoGate, OverflowPolicy, RunSummary, SimConfig, Slot, WriterSink,
};

mod shell;
mod tutorial;

#[derive(Parser, Debug)]
#[command(name = "stepsim", version, about = "Step-through simulator for a small teaching instruction set")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// What to do with results wider than their destination
    #[arg(long, global = true, value_enum, env = "STEPSIM_OVERFLOW", default_value_t = OverflowPolicy::Truncate)]
    pub overflow: OverflowPolicy,

    /// What to do with fields that need more than eight hex digits
    #[arg(long, global = true, value_enum, env = "STEPSIM_HEX", default_value_t = HexPolicy::Truncate)]
    pub hex: HexPolicy,

    /// Execute the program as written, without stall insertion
    #[arg(long, global = true, env = "STEPSIM_NO_HAZARDS")]
    pub no_hazards: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a program and print the state after every instruction
    Run {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Like `run`, but wait for Enter after every instruction
    Walk {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Print the instruction reference
    Tutorial,
    /// Interactive menu (the default)
    Shell,
}

impl Cli {
    pub fn config(&self) -> SimConfig {
        SimConfig {
            step: false,
            overflow: self.overflow,
            hex: self.hex,
            hazards: !self.no_hazards,
        }
    }

    /// Log filter implied by `-v`, used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.config();
    let stdin = io::stdin();
    let stdout = io::stdout();

    match cli.command {
        Some(Command::Run { path }) => {
            simulate(&path, config, stdin.lock(), &mut stdout.lock())?;
        }
        Some(Command::Walk { path }) => {
            let config = SimConfig { step: true, ..config };
            simulate(&path, config, stdin.lock(), &mut stdout.lock())?;
        }
        Some(Command::Tutorial) => tutorial::print(&mut stdout.lock())?,
        Some(Command::Shell) | None => {
            shell::Shell::new(config, stdin.lock(), stdout.lock()).run()?;
        }
    }
    Ok(())
}

/// Load a program file and execute it.
pub fn simulate<R: BufRead, W: Write>(
    path: &Path,
    config: SimConfig,
    input: R,
    out: &mut W,
) -> Result<RunSummary> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read program {}", path.display()))?;
    execute(&text, config, input, out)
        .with_context(|| format!("simulation of {} failed", path.display()))
}

/// Execute program text, printing one state line per instruction to `out`
/// and the final state in binary once the run completes.
///
/// In step mode `input` supplies the acknowledgments and the prompt is
/// written to `out` between trace lines.
pub fn execute<R: BufRead, W: Write>(
    text: &str,
    config: SimConfig,
    input: R,
    out: &mut W,
) -> Result<RunSummary> {
    let mut machine = Machine::new(config);
    let tokens = machine.prepare(text);

    let mut sink = WriterSink::new(&mut *out);
    let summary = if machine.config().step {
        let mut gate = LineGate::new(input);
        machine.run(&tokens, &mut sink, &mut gate)?
    } else {
        machine.run(&tokens, &mut sink, &mut NoGate)?
    };

    writeln!(
        out,
        "{} instruction(s) executed, {} stall(s), {} token(s) skipped",
        summary.executed, summary.stalls, summary.skipped
    )?;
    for slot in Slot::ALL {
        writeln!(out, "{:<8} {}", slot.name(), machine.state().bits(slot))?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::errors::SimError;
    use crate::machine::sink::STEP_PROMPT;

    fn run_text(text: &str, config: SimConfig) -> (Result<RunSummary>, String) {
        let mut out = Vec::new();
        let res = execute(text, config, io::empty(), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn cli_flags_build_config() {
        let cli = Cli::try_parse_from(["stepsim", "--overflow", "fail", "--hex", "reject", "--no-hazards", "run", "p.txt"])
            .unwrap();
        let config = cli.config();
        assert_eq!(config.overflow, OverflowPolicy::Fail);
        assert_eq!(config.hex, HexPolicy::Reject);
        assert!(!config.hazards);
        assert!(!config.step);
        assert!(matches!(cli.command, Some(Command::Run { .. })));
    }

    #[test]
    fn no_subcommand_means_shell_and_defaults() {
        let cli = Cli::try_parse_from(["stepsim", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level(), "debug");
        let config = cli.config();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(Cli::try_parse_from(["stepsim", "--overflow", "wrap", "tutorial"]).is_err());
    }

    #[test]
    fn execute_prints_trace_and_final_state() {
        let (res, text) = run_text("ADD RegA, 3, 4\nLOADB RegA\n", SimConfig::default());
        let summary = res.unwrap();
        assert_eq!(summary.executed, 2);

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("   0 ADD"));
        assert!(lines[0].contains("0x00000007"));
        assert!(lines[1].starts_with("   4 LOADB"));
        assert_eq!(lines[2], "2 instruction(s) executed, 0 stall(s), 0 token(s) skipped");
        assert!(text.contains(&format!("RegB     {:042b}", 7)));
        assert!(text.contains("Opcode   100010"));
    }

    #[test]
    fn execute_reports_core_errors() {
        let (res, text) = run_text("DIV RegA, 1, 0\n", SimConfig::default());
        let err = res.unwrap_err();
        assert!(matches!(err.downcast_ref::<SimError>(), Some(SimError::DivideByZero { .. })));
        assert!(text.is_empty());
    }

    #[test]
    fn step_mode_prompts_on_the_same_writer() {
        let config = SimConfig { step: true, ..SimConfig::default() };
        let mut out = Vec::new();
        let summary = execute("ZERO\nIMM\n", config, "\n\n".as_bytes(), &mut out).unwrap();
        assert_eq!(summary.executed, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("   0 ZERO"));
        assert_eq!(lines[1], STEP_PROMPT);
        assert!(lines[2].starts_with("   1 IMM"));
        assert_eq!(lines[3], STEP_PROMPT);
    }

    #[test]
    fn missing_file_has_context() {
        let mut out = Vec::new();
        let err = simulate(Path::new("/no/such/program.txt"), SimConfig::default(), io::empty(), &mut out)
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read program /no/such/program.txt"));
    }
}
