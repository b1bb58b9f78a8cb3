use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use super::{simulate, tutorial};
use crate::machine::SimConfig;

const BANNER: &str = "Welcome to the command-line instruction simulator.

TUTORIAL: List accepted instructions for input programs, with a few examples.
RUN: Load a program by giving its path (with no quotes).
WALK: Like RUN, stepping through the program one instruction at a time.
END: Leave the simulator.
";

/// The interactive menu: reads a branch name per line until `END` or end
/// of input.
pub struct Shell<R: BufRead, W: Write> {
    config: SimConfig,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(config: SimConfig, input: R, out: W) -> Self {
        Self { config, input, out }
    }

    pub fn run(&mut self) -> Result<()> {
        self.out.write_all(BANNER.as_bytes())?;
        writeln!(self.out, "When ready, enter the branch you wish to take:")?;

        while let Some(line) = self.read_line()? {
            writeln!(self.out)?;
            match line.to_uppercase().as_str() {
                "TUTORIAL" | "INSTRUCTIONS" => {
                    writeln!(self.out, "********** INSTRUCTIONS **********")?;
                    tutorial::print(&mut self.out)?;
                    writeln!(self.out, "********** INSTRUCTIONS **********")?;
                }
                "RUN" => self.fetch(None)?,
                "WALK" => self.fetch(Some(true))?,
                "END" => break,
                "" => continue,
                other => {
                    writeln!(self.out, "Unknown branch `{other}`. Try TUTORIAL, RUN, WALK or END.")?;
                }
            }
            writeln!(self.out, "\nEnter your next branch:")?;
        }
        Ok(())
    }

    /// Ask for a path (and, for RUN, whether to step), then execute it.
    /// A failed run is reported and the menu continues.
    fn fetch(&mut self, step: Option<bool>) -> Result<()> {
        writeln!(self.out, "********** FETCH **********")?;
        writeln!(self.out, "Enter the file's path (with no quotes):")?;
        let Some(path) = self.read_line()? else { return Ok(()) };
        writeln!(self.out, "INPUT: {path:?}")?;

        let step = match step {
            Some(step) => step,
            None => {
                writeln!(self.out, "YES or NO: Would you like to STEP thru this file?")?;
                self.read_line()?.is_some_and(|a| a.eq_ignore_ascii_case("YES"))
            }
        };

        let config = SimConfig { step, ..self.config };
        let path = PathBuf::from(path);
        match simulate(&path, config, &mut self.input, &mut self.out) {
            Ok(summary) => {
                info!(path = %path.display(), executed = summary.executed, "program finished");
                writeln!(self.out, "FETCH of input file successful.")?;
            }
            Err(err) => {
                warn!(path = %path.display(), "run failed: {err:#}");
                writeln!(self.out, "Error: {err:#}")?;
            }
        }
        writeln!(self.out, "********** FETCH **********")?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::sink::STEP_PROMPT;
    use std::fs;

    fn session(input: &str) -> String {
        let mut out = Vec::new();
        Shell::new(SimConfig::default(), input.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    fn program(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("stepsim-{}-{name}", std::process::id()));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn end_leaves_the_loop() {
        let text = session("END\nTUTORIAL\n");
        assert!(text.starts_with("Welcome"));
        assert!(!text.contains("INSTRUCTIONS"));
    }

    #[test]
    fn tutorial_branch_prints_reference() {
        let text = session("tutorial\n");
        assert_eq!(text.matches("********** INSTRUCTIONS **********").count(), 2);
        assert!(text.contains("SHIFTLEFTLOG"));
        assert!(text.contains("Enter your next branch:"));
    }

    #[test]
    fn run_branch_executes_file() {
        let path = program("run.txt", "ADD RegA, 3, 4\n");
        let text = session(&format!("RUN\n{}\nNO\nEND\n", path.display()));
        assert!(text.contains("YES or NO"));
        assert!(text.contains("0x00000007"));
        assert!(text.contains("FETCH of input file successful."));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn walk_branch_prompts_through_the_session_writer() {
        let path = program("walk.txt", "ADD RegA, 3, 4\nAOUT Mem1\n");
        let text = session(&format!("WALK\n{}\n\n\nEND\n", path.display()));
        assert_eq!(text.matches(STEP_PROMPT).count(), 2);
        assert!(text.contains("FETCH of input file successful."));
        assert!(!text.contains("Unknown branch"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn failed_run_keeps_the_menu_alive() {
        let text = session("RUN\n/no/such/file\nNO\nTUTORIAL\n");
        assert!(text.contains("Error: failed to read program /no/such/file"));
        assert!(text.contains("********** INSTRUCTIONS **********"));
    }

    #[test]
    fn unknown_branch_is_reported() {
        let text = session("STEP\n");
        assert!(text.contains("Unknown branch `STEP`"));
    }
}
