use std::io::{self, Write};

use crate::machine::instruction::{Form, Mnemonic};

/// Print the reference text followed by the opcode table.
pub fn print<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(DOC_TEXT.as_bytes())?;
    writeln!(out)?;
    writeln!(out, "{:<14} {:<22} OPCODE", "MNEMONIC", "SYNTAX")?;
    for m in Mnemonic::ALL {
        writeln!(out, "{:<14} {:<22} {:06b}", m.name(), syntax(m), m.opcode())?;
    }
    Ok(())
}

fn syntax(m: Mnemonic) -> String {
    let ops = match m.form() {
        Form::Bare => "",
        Form::One if m.writes_operand() => "dest",
        Form::One => "src",
        Form::Two => "dest, src",
        Form::Three => "dest, a, b",
    };
    format!("{} {ops}", m.name()).trim_end().to_string()
}

const DOC_TEXT: &str = r#"stepsim - instruction guide

Overview
- A program is a text file with one instruction per line.
- Operands are separated by commas or spaces. Case does not matter.
- `#` and `;` start a comment that runs to the end of the line.
- Every instruction is executed in order; there is no branching.
- After each instruction the whole machine state is printed as eleven
  hex words: RegC RegB RegA Mem5 Mem4 Mem3 Mem2 Mem1 Opcode Reserved Flags.

Operands:
- RegA, RegB, RegC: 42-bit registers.
- Mem1 .. Mem5: 12-bit memory slots.
- Decimal literals, optionally negative: 7, -3.
- `dest` must name a register or memory slot. Shift sources must too.

Arithmetic:
- ADD/SUB dest, a, b          dest = a + b / a - b
- MULT dest, a, b             low 32 bits of a * b
- MULTHS dest, a, b           a * b
- MULTHSU dest, a, b          a * b, with b read as unsigned
- DIV/DIVS dest, a, b         a / b, rounded toward zero
- DIVUNS dest, a, b           a / b, both read as unsigned
Dividing by zero stops the run and leaves the state untouched.

Loads, stores and compares:
- STOREBYTE/LOADBYTE/LOADBYTEUN dest, src      dest = src
- STOREHALF/STOREWORD/LOADHALF/LOADHALFUN/LOADWORD dest, a, b   dest = a - b
- SETLESSTHAN/SETLESSTHANUN dest, a, b         dest = a - b

Shifts:
- SHIFTLEFTLOG dest, src      one bit left, leading bit dropped
- SHIFTRIGHTLOG dest, src     one bit right, zero shifted in
- SHIFTRIGHARTH dest, src     one bit right, sign bit kept
- SHIFTLEFTARTH dest, src     one bit left, result one bit wider

Transfers:
- AIN/LOADA src, BIN/LOADB src, CIN/LOADC src    register = src
- AOUT dest, BOUT dest, COUT dest                dest = register
- MEMnIN src, MEMnOUT dest                       same for Mem1 .. Mem5

Control:
- ZERO, IMM, JUMP, STALL      only set the opcode field
- RESET                       every field back to its initial value

Notes
- Results too wide for their destination keep their low bits, or stop
  the run with --overflow fail.
- When a line reuses something a recent line mentioned, two STALL
  markers are inserted before it. Turn this off with --no-hazards.
- Unknown words are skipped and counted.

Example:
  ADD RegA, 3, 4      ; RegA = 7
  AOUT Mem1           ; Mem1 = 7
  SHIFTLEFTLOG Mem2, Mem1
"#;
