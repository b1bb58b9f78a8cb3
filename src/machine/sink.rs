use std::io::{self, BufRead, Write};

use super::hex::HexWords;

/// State snapshot handed to the display after one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Position of the mnemonic in the executed stream.
    pub index: usize,
    pub mnemonic: &'static str,
    pub words: HexWords,
}

pub const STEP_PROMPT: &str = "PRESS ENTER WHENEVER YOU WISH TO CONTINUE.";

/// Receives the rendered state after every executed instruction.
pub trait Sink {
    fn emit(&mut self, record: &StepRecord) -> io::Result<()>;

    /// Show a line addressed to the user. Sinks without a reader drop it.
    fn prompt(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Blocks between instructions in step mode. Any prompt goes through the
/// same sink as the trace.
pub trait StepGate {
    fn wait<S: Sink>(&mut self, sink: &mut S) -> io::Result<()>;
}

/// Keeps every record; handy for inspecting a run afterwards.
impl Sink for Vec<StepRecord> {
    fn emit(&mut self, record: &StepRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Prints `index MNEMONIC [0x.. 0x.. ...]`, one line per instruction.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn emit(&mut self, record: &StepRecord) -> io::Result<()> {
        writeln!(
            self.out,
            "{:>4} {:<13} [{}]",
            record.index,
            record.mnemonic,
            record.words.join(" ")
        )
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

/// Prompts through the sink and waits for one line on `input`. End of
/// input counts as an acknowledgment so piped runs do not hang.
pub struct LineGate<R: BufRead> {
    input: R,
}

impl<R: BufRead> LineGate<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> StepGate for LineGate<R> {
    fn wait<S: Sink>(&mut self, sink: &mut S) -> io::Result<()> {
        sink.prompt(STEP_PROMPT)?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }
}

/// Gate that never blocks, for runs without step mode.
pub struct NoGate;

impl StepGate for NoGate {
    fn wait<S: Sink>(&mut self, _sink: &mut S) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::hex::render;
    use crate::machine::HexPolicy;
    use crate::machine::state::StateVector;

    fn record() -> StepRecord {
        StepRecord {
            index: 3,
            mnemonic: "ADD",
            words: render(&StateVector::new(), HexPolicy::Truncate).unwrap(),
        }
    }

    #[test]
    fn writer_sink_prints_one_line_per_record() {
        let mut buf = Vec::new();
        WriterSink::new(&mut buf).emit(&record()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("   3 ADD"));
        assert!(text.contains("[0x00000000 0x00000000"));
        assert!(text.trim_end().ends_with("0x0000003F 0x00000000 0x00000000]"));
    }

    #[test]
    fn line_gate_consumes_one_line_per_wait() {
        let mut input = b"\nnext\n".as_slice();
        let mut shown = Vec::new();
        {
            let mut sink = WriterSink::new(&mut shown);
            let mut gate = LineGate::new(&mut input);
            gate.wait(&mut sink).unwrap();
            gate.wait(&mut sink).unwrap();
            // exhausted input still acknowledges
            gate.wait(&mut sink).unwrap();
        }
        assert!(input.is_empty());
        let shown = String::from_utf8(shown).unwrap();
        assert_eq!(shown.lines().filter(|l| *l == STEP_PROMPT).count(), 3);
    }

    #[test]
    fn prompt_lands_between_trace_lines() {
        let mut out = Vec::new();
        {
            let mut sink = WriterSink::new(&mut out);
            let mut gate = LineGate::new(b"\n".as_slice());
            sink.emit(&record()).unwrap();
            gate.wait(&mut sink).unwrap();
            sink.emit(&record()).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], STEP_PROMPT);
    }

    #[test]
    fn recording_sink_ignores_prompts() {
        let mut records: Vec<StepRecord> = Vec::new();
        LineGate::new(b"\n".as_slice()).wait(&mut records).unwrap();
        assert!(records.is_empty());
    }
}
