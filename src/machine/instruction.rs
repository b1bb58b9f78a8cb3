// machine/instruction.rs
use super::opcode::*;
use super::operand::{Location, Operand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // Markers
    Zero, Imm, Jump, Stall, Reset,

    // Arithmetic: dest <- a op b
    Add{ dest:Location, a:Operand, b:Operand }, Sub{ dest:Location, a:Operand, b:Operand },
    Mult{ dest:Location, a:Operand, b:Operand },
    Mulths{ dest:Location, a:Operand, b:Operand }, Multhsu{ dest:Location, a:Operand, b:Operand },
    Div{ dest:Location, a:Operand, b:Operand }, Divs{ dest:Location, a:Operand, b:Operand },
    Divuns{ dest:Location, a:Operand, b:Operand },

    // Byte loads/stores move a whole word
    StoreByte{ dest:Location, src:Operand },
    LoadByte{ dest:Location, src:Operand }, LoadByteUn{ dest:Location, src:Operand },

    // Half/word loads/stores and the compares store a - b
    StoreHalf{ dest:Location, a:Operand, b:Operand }, StoreWord{ dest:Location, a:Operand, b:Operand },
    LoadHalf{ dest:Location, a:Operand, b:Operand }, LoadHalfUn{ dest:Location, a:Operand, b:Operand },
    LoadWord{ dest:Location, a:Operand, b:Operand },
    SetLessThan{ dest:Location, a:Operand, b:Operand }, SetLessThanUn{ dest:Location, a:Operand, b:Operand },

    // One-bit shifts of a slot's bit pattern
    ShiftLeftLog{ dest:Location, src:Location }, ShiftRightLog{ dest:Location, src:Location },
    ShiftRightArith{ dest:Location, src:Location }, ShiftLeftArith{ dest:Location, src:Location },

    // Register transfer
    Ain{ src:Operand }, LoadA{ src:Operand }, Aout{ dest:Location },
    Bin{ src:Operand }, LoadB{ src:Operand }, Bout{ dest:Location },
    Cin{ src:Operand }, LoadC{ src:Operand }, Cout{ dest:Location },

    // Memory slot transfer
    Mem1In{ src:Operand }, Mem1Out{ dest:Location },
    Mem2In{ src:Operand }, Mem2Out{ dest:Location },
    Mem3In{ src:Operand }, Mem3Out{ dest:Location },
    Mem4In{ src:Operand }, Mem4Out{ dest:Location },
    Mem5In{ src:Operand }, Mem5Out{ dest:Location },
}

/// Operand layout of a mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// No operands.
    Bare,
    /// `src` or `dest`.
    One,
    /// `dest, src`.
    Two,
    /// `dest, a, b`.
    Three,
}

impl Form {
    pub fn arity(self) -> usize {
        match self {
            Form::Bare => 0,
            Form::One => 1,
            Form::Two => 2,
            Form::Three => 3,
        }
    }
}

/// Every mnemonic the engine dispatches on, without operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Zero, Imm,
    Add, Sub, Mult, Mulths, Multhsu, Div, Divs, Divuns,
    StoreByte, StoreHalf, StoreWord, LoadByte, LoadByteUn, LoadHalf, LoadHalfUn, LoadWord,
    SetLessThan, SetLessThanUn,
    ShiftLeftLog, ShiftRightLog, ShiftRightArith, ShiftLeftArith,
    Ain, LoadA, Aout, Bin, LoadB, Bout, Cin, LoadC, Cout,
    Mem1In, Mem1Out, Mem2In, Mem2Out, Mem3In, Mem3Out, Mem4In, Mem4Out, Mem5In, Mem5Out,
    Jump, Stall, Reset,
}

impl Mnemonic {
    /// Declaration order.
    pub const ALL: [Mnemonic; 46] = {
        use Mnemonic::*;
        [
            Zero, Imm,
            Add, Sub, Mult, Mulths, Multhsu, Div, Divs, Divuns,
            StoreByte, StoreHalf, StoreWord, LoadByte, LoadByteUn, LoadHalf, LoadHalfUn, LoadWord,
            SetLessThan, SetLessThanUn,
            ShiftLeftLog, ShiftRightLog, ShiftRightArith, ShiftLeftArith,
            Ain, LoadA, Aout, Bin, LoadB, Bout, Cin, LoadC, Cout,
            Mem1In, Mem1Out, Mem2In, Mem2Out, Mem3In, Mem3Out, Mem4In, Mem4Out, Mem5In, Mem5Out,
            Jump, Stall, Reset,
        ]
    };

    /// Exact, upper-case match on the source spelling.
    pub fn parse(token: &str) -> Option<Mnemonic> {
        Self::ALL.into_iter().find(|m| m.name() == token)
    }

    pub fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Zero => "ZERO", Imm => "IMM", Jump => "JUMP", Stall => "STALL", Reset => "RESET",
            Add => "ADD", Sub => "SUB", Mult => "MULT", Mulths => "MULTHS", Multhsu => "MULTHSU",
            Div => "DIV", Divs => "DIVS", Divuns => "DIVUNS",
            StoreByte => "STOREBYTE", LoadByte => "LOADBYTE", LoadByteUn => "LOADBYTEUN",
            StoreHalf => "STOREHALF", StoreWord => "STOREWORD",
            LoadHalf => "LOADHALF", LoadHalfUn => "LOADHALFUN", LoadWord => "LOADWORD",
            SetLessThan => "SETLESSTHAN", SetLessThanUn => "SETLESSTHANUN",
            ShiftLeftLog => "SHIFTLEFTLOG", ShiftRightLog => "SHIFTRIGHTLOG",
            ShiftRightArith => "SHIFTRIGHARTH", ShiftLeftArith => "SHIFTLEFTARTH",
            Ain => "AIN", LoadA => "LOADA", Aout => "AOUT",
            Bin => "BIN", LoadB => "LOADB", Bout => "BOUT",
            Cin => "CIN", LoadC => "LOADC", Cout => "COUT",
            Mem1In => "MEM1IN", Mem1Out => "MEM1OUT",
            Mem2In => "MEM2IN", Mem2Out => "MEM2OUT",
            Mem3In => "MEM3IN", Mem3Out => "MEM3OUT",
            Mem4In => "MEM4IN", Mem4Out => "MEM4OUT",
            Mem5In => "MEM5IN", Mem5Out => "MEM5OUT",
        }
    }

    pub fn form(self) -> Form {
        use Mnemonic::*;
        match self {
            Zero | Imm | Jump | Stall | Reset => Form::Bare,
            Add | Sub | Mult | Mulths | Multhsu | Div | Divs | Divuns
            | StoreHalf | StoreWord | LoadHalf | LoadHalfUn | LoadWord
            | SetLessThan | SetLessThanUn => Form::Three,
            StoreByte | LoadByte | LoadByteUn
            | ShiftLeftLog | ShiftRightLog | ShiftRightArith | ShiftLeftArith => Form::Two,
            Ain | LoadA | Aout | Bin | LoadB | Bout | Cin | LoadC | Cout
            | Mem1In | Mem1Out | Mem2In | Mem2Out | Mem3In | Mem3Out
            | Mem4In | Mem4Out | Mem5In | Mem5Out => Form::One,
        }
    }

    /// Whether the single operand of a `One` form is written rather than read.
    pub fn writes_operand(self) -> bool {
        use Mnemonic::*;
        matches!(self, Aout | Bout | Cout | Mem1Out | Mem2Out | Mem3Out | Mem4Out | Mem5Out)
    }

    /// Value written to the opcode field once the instruction completes.
    pub fn opcode(self) -> u8 {
        use Mnemonic::*;
        match self {
            Zero => OP_ZERO, Imm => OP_IMM, Jump => OP_JUMP, Stall => OP_STALL, Reset => OP_RESET,
            Add => OP_ADD, Sub => OP_SUB, Mult => OP_MULT, Mulths => OP_MULTHS, Multhsu => OP_MULTHSU,
            Div => OP_DIV, Divs => OP_DIVS, Divuns => OP_DIVUNS,
            StoreByte => OP_STOREBYTE, LoadByte => OP_LOADBYTE, LoadByteUn => OP_LOADBYTEUN,
            StoreHalf => OP_STOREHALF, StoreWord => OP_STOREWORD,
            LoadHalf => OP_LOADHALF, LoadHalfUn => OP_LOADHALFUN, LoadWord => OP_LOADWORD,
            SetLessThan => OP_SETLESSTHAN, SetLessThanUn => OP_SETLESSTHANUN,
            ShiftLeftLog | ShiftRightLog | ShiftRightArith => OP_SHIFT,
            ShiftLeftArith => OP_SHIFTLEFTARTH,
            Ain => OP_AIN, LoadA => OP_LOADA, Aout => OP_AOUT,
            Bin => OP_BIN, LoadB => OP_LOADB, Bout => OP_BOUT,
            Cin => OP_CIN, LoadC => OP_LOADC, Cout => OP_COUT,
            Mem1In => OP_MEM1IN, Mem1Out => OP_MEM1OUT,
            Mem2In => OP_MEM2IN, Mem2Out => OP_MEM2OUT,
            Mem3In => OP_MEM3IN, Mem3Out => OP_MEM3OUT,
            Mem4In => OP_MEM4IN, Mem4Out => OP_MEM4OUT,
            Mem5In => OP_MEM5IN, Mem5Out => OP_MEM5OUT,
        }
    }
}

impl Instruction {
    pub fn mnemonic(&self) -> Mnemonic {
        use Mnemonic as M;
        match self {
            Self::Zero => M::Zero, Self::Imm => M::Imm, Self::Jump => M::Jump,
            Self::Stall => M::Stall, Self::Reset => M::Reset,
            Self::Add{..} => M::Add, Self::Sub{..} => M::Sub, Self::Mult{..} => M::Mult,
            Self::Mulths{..} => M::Mulths, Self::Multhsu{..} => M::Multhsu,
            Self::Div{..} => M::Div, Self::Divs{..} => M::Divs, Self::Divuns{..} => M::Divuns,
            Self::StoreByte{..} => M::StoreByte, Self::LoadByte{..} => M::LoadByte,
            Self::LoadByteUn{..} => M::LoadByteUn,
            Self::StoreHalf{..} => M::StoreHalf, Self::StoreWord{..} => M::StoreWord,
            Self::LoadHalf{..} => M::LoadHalf, Self::LoadHalfUn{..} => M::LoadHalfUn,
            Self::LoadWord{..} => M::LoadWord,
            Self::SetLessThan{..} => M::SetLessThan, Self::SetLessThanUn{..} => M::SetLessThanUn,
            Self::ShiftLeftLog{..} => M::ShiftLeftLog, Self::ShiftRightLog{..} => M::ShiftRightLog,
            Self::ShiftRightArith{..} => M::ShiftRightArith, Self::ShiftLeftArith{..} => M::ShiftLeftArith,
            Self::Ain{..} => M::Ain, Self::LoadA{..} => M::LoadA, Self::Aout{..} => M::Aout,
            Self::Bin{..} => M::Bin, Self::LoadB{..} => M::LoadB, Self::Bout{..} => M::Bout,
            Self::Cin{..} => M::Cin, Self::LoadC{..} => M::LoadC, Self::Cout{..} => M::Cout,
            Self::Mem1In{..} => M::Mem1In, Self::Mem1Out{..} => M::Mem1Out,
            Self::Mem2In{..} => M::Mem2In, Self::Mem2Out{..} => M::Mem2Out,
            Self::Mem3In{..} => M::Mem3In, Self::Mem3Out{..} => M::Mem3Out,
            Self::Mem4In{..} => M::Mem4In, Self::Mem4Out{..} => M::Mem4Out,
            Self::Mem5In{..} => M::Mem5In, Self::Mem5Out{..} => M::Mem5Out,
        }
    }

    pub fn opcode(&self) -> u8 {
        self.mnemonic().opcode()
    }
}
