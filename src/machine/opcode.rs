// 6-bit encodings written to the opcode field after each instruction.

// Markers
pub const OP_ZERO: u8 = 0b000000;
pub const OP_IMM: u8 = 0b000001;

// Arithmetic
pub const OP_ADD: u8 = 0b000010;
pub const OP_SUB: u8 = 0b000011;
pub const OP_MULT: u8 = 0b000100;
pub const OP_MULTHS: u8 = 0b000101;
pub const OP_MULTHSU: u8 = 0b000110;
pub const OP_DIV: u8 = 0b000111;
pub const OP_DIVS: u8 = 0b001000;
pub const OP_DIVUNS: u8 = 0b001001;

// Load / store
pub const OP_STOREBYTE: u8 = 0b010000;
pub const OP_STOREHALF: u8 = 0b010001;
pub const OP_STOREWORD: u8 = 0b010010;
pub const OP_LOADBYTE: u8 = 0b010011;
pub const OP_LOADBYTEUN: u8 = 0b010100;
pub const OP_LOADHALF: u8 = 0b010101;
pub const OP_LOADHALFUN: u8 = 0b010110;
pub const OP_LOADWORD: u8 = 0b010111;

// Compare
pub const OP_SETLESSTHAN: u8 = 0b011000;
pub const OP_SETLESSTHANUN: u8 = 0b011001;

// Shifts (the three one-way shifts share an encoding)
pub const OP_SHIFT: u8 = 0b011100;
pub const OP_SHIFTLEFTARTH: u8 = 0b011101;

// Register transfer
pub const OP_AIN: u8 = 0b011110;
pub const OP_LOADA: u8 = 0b011111;
pub const OP_AOUT: u8 = 0b100000;
pub const OP_BIN: u8 = 0b100001;
pub const OP_LOADB: u8 = 0b100010;
pub const OP_BOUT: u8 = 0b100011;
pub const OP_CIN: u8 = 0b100100;
pub const OP_LOADC: u8 = 0b100101;
pub const OP_COUT: u8 = 0b100110;

// Memory slot transfer
pub const OP_MEM1IN: u8 = 0b100111;
pub const OP_MEM1OUT: u8 = 0b101000;
pub const OP_MEM2IN: u8 = 0b101001;
pub const OP_MEM2OUT: u8 = 0b101010;
pub const OP_MEM3IN: u8 = 0b101011;
pub const OP_MEM3OUT: u8 = 0b101100;
pub const OP_MEM4IN: u8 = 0b101101;
pub const OP_MEM4OUT: u8 = 0b101110;
pub const OP_MEM5IN: u8 = 0b101111;
pub const OP_MEM5OUT: u8 = 0b110000;

// Control
pub const OP_JUMP: u8 = 0b110001;
pub const OP_STALL: u8 = 0b111110;
pub const OP_RESET: u8 = 0b111111;
