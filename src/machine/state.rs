use std::fmt;

use super::errors::SimError;
use super::opcode::OP_RESET;

/// Number of fields in the state vector.
pub const FIELD_COUNT: usize = 11;

/// One field of the state vector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    RegC,
    RegB,
    RegA,
    Mem5,
    Mem4,
    Mem3,
    Mem2,
    Mem1,
    Opcode,
    Reserved,
    Flags,
}

impl Slot {
    pub const ALL: [Slot; FIELD_COUNT] = [
        Slot::RegC,
        Slot::RegB,
        Slot::RegA,
        Slot::Mem5,
        Slot::Mem4,
        Slot::Mem3,
        Slot::Mem2,
        Slot::Mem1,
        Slot::Opcode,
        Slot::Reserved,
        Slot::Flags,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Declared width in bits.
    pub fn width(self) -> u32 {
        match self {
            Slot::RegC | Slot::RegB | Slot::RegA => 42,
            Slot::Mem5 | Slot::Mem4 | Slot::Mem3 | Slot::Mem2 | Slot::Mem1 => 12,
            Slot::Opcode => 6,
            Slot::Reserved | Slot::Flags => 4,
        }
    }

    #[inline]
    pub fn mask(self) -> u64 {
        (1u64 << self.width()) - 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::RegC => "RegC",
            Slot::RegB => "RegB",
            Slot::RegA => "RegA",
            Slot::Mem5 => "Mem5",
            Slot::Mem4 => "Mem4",
            Slot::Mem3 => "Mem3",
            Slot::Mem2 => "Mem2",
            Slot::Mem1 => "Mem1",
            Slot::Opcode => "Opcode",
            Slot::Reserved => "Reserved",
            Slot::Flags => "Flags",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registers, memory slots and control fields of the simulated machine.
///
/// Every field is kept masked to its declared width; `set` refuses values
/// that would break that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateVector {
    fields: [u64; FIELD_COUNT],
}

impl Default for StateVector {
    fn default() -> Self {
        Self::new()
    }
}

impl StateVector {
    /// All zero except the opcode field, which holds the reset encoding.
    pub fn new() -> Self {
        let mut fields = [0; FIELD_COUNT];
        fields[Slot::Opcode.index()] = OP_RESET as u64;
        Self { fields }
    }

    #[inline]
    pub fn get(&self, slot: Slot) -> u64 {
        self.fields[slot.index()]
    }

    /// Bit-string view of a field, zero-padded to the field width.
    pub fn bits(&self, slot: Slot) -> String {
        format!("{:0width$b}", self.get(slot), width = slot.width() as usize)
    }

    pub fn set(&mut self, slot: Slot, value: u64) -> Result<(), SimError> {
        if value & !slot.mask() != 0 {
            return Err(SimError::WidthViolation {
                slot,
                value,
                width: slot.width(),
            });
        }
        self.fields[slot.index()] = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_vector_is_zero_with_reset_opcode() {
        let s = StateVector::new();
        for slot in Slot::ALL {
            let expected = if slot == Slot::Opcode { 0b111111 } else { 0 };
            assert_eq!(s.get(slot), expected, "{slot}");
        }
    }

    #[test]
    fn bits_are_padded_to_width() {
        let mut s = StateVector::new();
        s.set(Slot::Mem1, 5).unwrap();
        assert_eq!(s.bits(Slot::Mem1), "000000000101");
        assert_eq!(s.bits(Slot::RegA).len(), 42);
        assert_eq!(s.bits(Slot::Opcode), "111111");
        for slot in Slot::ALL {
            assert_eq!(s.bits(slot).len() as u32, slot.width());
        }
    }

    #[test]
    fn set_rejects_values_wider_than_slot() {
        let mut s = StateVector::new();
        let err = s.set(Slot::Mem3, 1 << 12).unwrap_err();
        assert!(matches!(err, SimError::WidthViolation { slot: Slot::Mem3, width: 12, .. }));
        assert_eq!(s.get(Slot::Mem3), 0);
        s.set(Slot::Mem3, 0xFFF).unwrap();
        s.set(Slot::RegB, (1 << 42) - 1).unwrap();
        assert!(s.set(Slot::Flags, 0x10).is_err());
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut s = StateVector::new();
        s.set(Slot::RegC, 1234).unwrap();
        s.set(Slot::Opcode, 2).unwrap();
        s.set(Slot::Flags, 0b1010).unwrap();
        s.reset();
        assert_eq!(s, StateVector::new());
    }

    #[test]
    fn slot_order_matches_indices() {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }
}
