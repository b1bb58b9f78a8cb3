//! Stall insertion for operand reuse across line boundaries.
//!
//! This is a fixed heuristic, not a dependency analysis: it compares tokens
//! at a handful of offsets around each position after a line break and
//! emits `STALL, STALL` on the first hit. Its output is part of the
//! simulator's observable behavior, so the probe order and offsets below
//! must stay exactly as they are.

use tracing::{debug, info};

use super::tokenizer::Token;

pub const STALL: &str = "STALL";

/// Used when the line just closed is longer than three tokens.
const NARROW: Probe = Probe { reads: &[1, 2, 3], lookback: &[2, 3, 4] };
/// Used for shorter lines, or when the narrow probe finds nothing.
const WIDE: Probe = Probe { reads: &[1, 2], lookback: &[2, 3, 4, 5, 6] };

struct Probe {
    /// Forward offsets from the candidate position.
    reads: &'static [usize],
    /// Backward offsets from the candidate position.
    lookback: &'static [usize],
}

impl Probe {
    /// First position after `from` where a forward token equals a recent
    /// one. Offsets that fall outside the stream never match.
    fn scan(&self, x: &[Token], from: usize) -> Option<usize> {
        (from..x.len()).find(|&k| {
            self.reads.iter().any(|&r| {
                let Some(ahead) = x.get(k + r) else { return false };
                self.lookback
                    .iter()
                    .any(|&b| k.checked_sub(b).is_some_and(|p| x[p] == *ahead))
            })
        })
    }
}

/// Insert stall markers into a tokenized stream and drop its line breaks.
pub fn annotate(x: &[Token]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(x.len());
    let mut start = 0usize;
    let mut stalls = 0usize;

    'scan: loop {
        let mut j = start;
        while j < x.len() {
            match &x[j] {
                Token::Word(w) => out.push(w.clone()),
                Token::LineBreak if start == 0 => {
                    start = j + 1;
                    continue 'scan;
                }
                Token::LineBreak => {
                    let span = j - start;
                    let hit = (span > 3)
                        .then(|| NARROW.scan(x, j + 1))
                        .flatten()
                        .or_else(|| (span >= 2).then(|| WIDE.scan(x, j + 1)).flatten());
                    if let Some(k) = hit {
                        debug!(line_end = j, at = k, "operand reuse, inserting stalls");
                        out.push(STALL.to_string());
                        out.push(STALL.to_string());
                        if let Some(w) = x[k].word() {
                            out.push(w.to_string());
                        }
                        stalls += 1;
                        start = k + 1;
                        continue 'scan;
                    }
                }
            }
            j += 1;
        }
        break;
    }

    if stalls > 0 {
        info!(stalls, "inserted stall pairs");
    }
    out
}
