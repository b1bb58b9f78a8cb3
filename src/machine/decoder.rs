use tracing::debug;

use super::errors::SimError;
use super::instruction::{Instruction, Mnemonic};
use super::operand::{Location, Operand};

/// An instruction pulled from the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Position of the mnemonic token in the stream.
    pub index: usize,
    pub instruction: Instruction,
}

/// Walks a flat token stream and yields one instruction at a time.
///
/// Tokens that are not a known mnemonic are skipped. After the first error
/// the iterator is exhausted.
pub struct Decoder<'a> {
    tokens: &'a [String],
    pos: usize,
    skipped: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens, pos: 0, skipped: 0, failed: false }
    }

    /// Number of tokens skipped as unknown so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Decoded, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while self.pos < self.tokens.len() {
            let index = self.pos;
            let token = self.tokens[index].as_str();
            let Some(mnemonic) = Mnemonic::parse(token) else {
                debug!(index, token, "skipping unknown token");
                self.skipped += 1;
                self.pos += 1;
                continue;
            };

            let ops = &self.tokens[index + 1..];
            let arity = mnemonic.form().arity();
            if ops.len() < arity {
                self.failed = true;
                self.pos = self.tokens.len();
                return Some(Err(SimError::TruncatedInstruction {
                    index,
                    mnemonic: mnemonic.name().to_string(),
                    expected: arity,
                    found: ops.len(),
                }));
            }
            self.pos = index + 1 + arity;

            let parsed = parse_instr(index, mnemonic, &ops[..arity]);
            if parsed.is_err() {
                self.failed = true;
            }
            return Some(parsed.map(|instruction| Decoded { index, instruction }));
        }
        None
    }
}

fn parse_instr(index: usize, mnemonic: Mnemonic, ops: &[String]) -> Result<Instruction, SimError> {
    use Mnemonic as M;

    let get_op = |i: usize| {
        let t = ops[i].as_str();
        Operand::parse(t).ok_or_else(|| SimError::UnknownOperand {
            index,
            mnemonic: mnemonic.name().to_string(),
            operand: t.to_string(),
        })
    };
    let get_loc = |i: usize| -> Result<Location, SimError> {
        match get_op(i)? {
            Operand::Location(loc) => Ok(loc),
            Operand::Literal(_) => Err(SimError::NotALocation {
                index,
                mnemonic: mnemonic.name().to_string(),
                operand: ops[i].clone(),
            }),
        }
    };

    Ok(match mnemonic {
        M::Zero => Instruction::Zero,
        M::Imm => Instruction::Imm,
        M::Jump => Instruction::Jump,
        M::Stall => Instruction::Stall,
        M::Reset => Instruction::Reset,

        M::Add => Instruction::Add { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::Sub => Instruction::Sub { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::Mult => Instruction::Mult { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::Mulths => Instruction::Mulths { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::Multhsu => Instruction::Multhsu { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::Div => Instruction::Div { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::Divs => Instruction::Divs { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::Divuns => Instruction::Divuns { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },

        M::StoreByte => Instruction::StoreByte { dest: get_loc(0)?, src: get_op(1)? },
        M::LoadByte => Instruction::LoadByte { dest: get_loc(0)?, src: get_op(1)? },
        M::LoadByteUn => Instruction::LoadByteUn { dest: get_loc(0)?, src: get_op(1)? },

        M::StoreHalf => Instruction::StoreHalf { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::StoreWord => Instruction::StoreWord { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::LoadHalf => Instruction::LoadHalf { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::LoadHalfUn => Instruction::LoadHalfUn { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::LoadWord => Instruction::LoadWord { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::SetLessThan => Instruction::SetLessThan { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },
        M::SetLessThanUn => Instruction::SetLessThanUn { dest: get_loc(0)?, a: get_op(1)?, b: get_op(2)? },

        M::ShiftLeftLog => Instruction::ShiftLeftLog { dest: get_loc(0)?, src: get_loc(1)? },
        M::ShiftRightLog => Instruction::ShiftRightLog { dest: get_loc(0)?, src: get_loc(1)? },
        M::ShiftRightArith => Instruction::ShiftRightArith { dest: get_loc(0)?, src: get_loc(1)? },
        M::ShiftLeftArith => Instruction::ShiftLeftArith { dest: get_loc(0)?, src: get_loc(1)? },

        M::Ain => Instruction::Ain { src: get_op(0)? },
        M::LoadA => Instruction::LoadA { src: get_op(0)? },
        M::Aout => Instruction::Aout { dest: get_loc(0)? },
        M::Bin => Instruction::Bin { src: get_op(0)? },
        M::LoadB => Instruction::LoadB { src: get_op(0)? },
        M::Bout => Instruction::Bout { dest: get_loc(0)? },
        M::Cin => Instruction::Cin { src: get_op(0)? },
        M::LoadC => Instruction::LoadC { src: get_op(0)? },
        M::Cout => Instruction::Cout { dest: get_loc(0)? },
        M::Mem1In => Instruction::Mem1In { src: get_op(0)? },
        M::Mem1Out => Instruction::Mem1Out { dest: get_loc(0)? },
        M::Mem2In => Instruction::Mem2In { src: get_op(0)? },
        M::Mem2Out => Instruction::Mem2Out { dest: get_loc(0)? },
        M::Mem3In => Instruction::Mem3In { src: get_op(0)? },
        M::Mem3Out => Instruction::Mem3Out { dest: get_loc(0)? },
        M::Mem4In => Instruction::Mem4In { src: get_op(0)? },
        M::Mem4Out => Instruction::Mem4Out { dest: get_loc(0)? },
        M::Mem5In => Instruction::Mem5In { src: get_op(0)? },
        M::Mem5Out => Instruction::Mem5Out { dest: get_loc(0)? },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn decode_all(s: &str) -> Result<Vec<Decoded>, SimError> {
        let tokens = toks(s);
        Decoder::new(&tokens).collect()
    }

    #[test]
    fn decodes_three_operand_form() {
        let d = decode_all("ADD REGA 3 MEM1").unwrap();
        assert_eq!(
            d,
            vec![Decoded {
                index: 0,
                instruction: Instruction::Add {
                    dest: Location::RegA,
                    a: Operand::Literal(3),
                    b: Operand::Location(Location::Mem1),
                },
            }]
        );
    }

    #[test]
    fn records_mnemonic_positions_and_skips_unknown_tokens() {
        let tokens = toks("NOP STALL ADD REGA 1 2 FOO LOADA MEM1");
        let mut dec = Decoder::new(&tokens);
        let got: Vec<Decoded> = dec.by_ref().collect::<Result<_, _>>().unwrap();
        let idx: Vec<usize> = got.iter().map(|d| d.index).collect();
        assert_eq!(idx, vec![1, 2, 7]);
        assert_eq!(dec.skipped(), 2);
        assert_eq!(got[2].instruction, Instruction::LoadA { src: Operand::Location(Location::Mem1) });
    }

    #[test]
    fn truncated_instruction_reports_counts() {
        let err = decode_all("STALL SUB REGA 1").unwrap_err();
        assert!(matches!(
            err,
            SimError::TruncatedInstruction { index: 1, expected: 3, found: 2, ref mnemonic } if mnemonic == "SUB"
        ));
    }

    #[test]
    fn unknown_operand_is_reported_with_context() {
        let err = decode_all("ADD REGA REGZ 1").unwrap_err();
        match err {
            SimError::UnknownOperand { index, mnemonic, operand } => {
                assert_eq!((index, mnemonic.as_str(), operand.as_str()), (0, "ADD", "REGZ"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn literal_destination_is_rejected() {
        let err = decode_all("ADD 5 1 2").unwrap_err();
        assert!(matches!(err, SimError::NotALocation { .. }));
        let err = decode_all("SHIFTLEFTLOG REGA 3").unwrap_err();
        assert!(matches!(err, SimError::NotALocation { ref operand, .. } if operand == "3"));
        let err = decode_all("AOUT 7").unwrap_err();
        assert!(matches!(err, SimError::NotALocation { .. }));
    }

    #[test]
    fn iteration_stops_after_first_error() {
        let tokens = toks("ADD REGA X 1 STALL");
        let mut dec = Decoder::new(&tokens);
        assert!(dec.next().unwrap().is_err());
        assert!(dec.next().is_none());
    }

    #[test]
    fn every_listed_mnemonic_decodes() {
        for m in Mnemonic::ALL {
            let mut line = vec![m.name().to_string()];
            line.extend(std::iter::repeat_n("MEM2".to_string(), m.form().arity()));
            let got: Vec<Decoded> = Decoder::new(&line).collect::<Result<_, _>>().unwrap();
            assert_eq!(got.len(), 1, "{m:?}");
            assert_eq!(got[0].instruction.mnemonic(), m);
        }
    }
}
