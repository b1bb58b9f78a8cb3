use tracing::warn;

use super::config::HexPolicy;
use super::errors::SimError;
use super::state::{FIELD_COUNT, Slot, StateVector};

/// One rendered word per state field, in slot order.
pub type HexWords = [String; FIELD_COUNT];

/// Render every field as `0x` followed by eight upper-case hex digits.
///
/// Fields are reinterpreted as unsigned magnitudes. Anything above 32 bits
/// is cut to the low word or rejected, depending on `policy`.
pub fn render(state: &StateVector, policy: HexPolicy) -> Result<HexWords, SimError> {
    let mut words: HexWords = Default::default();
    for (slot, word) in Slot::ALL.into_iter().zip(words.iter_mut()) {
        let value = state.get(slot);
        let low = match u32::try_from(value) {
            Ok(v) => v,
            Err(_) => match policy {
                HexPolicy::Truncate => {
                    warn!(%slot, value, "field wider than 8 hex digits, showing low word");
                    value as u32
                }
                HexPolicy::Reject => return Err(SimError::HexOverflow { slot, value }),
            },
        };
        *word = format_word(low);
    }
    Ok(words)
}

pub fn format_word(value: u32) -> String {
    format!("0x{value:08X}")
}

/// Inverse of [`format_word`].
#[cfg(test)]
pub fn parse_word(word: &str) -> Option<u32> {
    let digits = word.strip_prefix("0x")?;
    if digits.len() != 8 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fresh_state_renders_reset_opcode() {
        let words = render(&StateVector::new(), HexPolicy::Truncate).unwrap();
        assert_eq!(words.len(), FIELD_COUNT);
        assert_eq!(words[Slot::Opcode.index()], "0x0000003F");
        for (i, w) in words.iter().enumerate() {
            if i != Slot::Opcode.index() {
                assert_eq!(w, "0x00000000");
            }
        }
    }

    #[test]
    fn digits_are_upper_case_and_padded() {
        let mut s = StateVector::new();
        s.set(Slot::Mem2, 0xABC).unwrap();
        s.set(Slot::Opcode, 2).unwrap();
        let words = render(&s, HexPolicy::Truncate).unwrap();
        assert_eq!(words[Slot::Mem2.index()], "0x00000ABC");
        assert_eq!(words[Slot::Opcode.index()], "0x00000002");
    }

    #[test]
    fn wide_register_is_truncated_or_rejected() {
        let mut s = StateVector::new();
        s.set(Slot::RegB, 0x2_1234_5678).unwrap();
        let words = render(&s, HexPolicy::Truncate).unwrap();
        assert_eq!(words[Slot::RegB.index()], "0x12345678");

        let err = render(&s, HexPolicy::Reject).unwrap_err();
        assert!(matches!(err, SimError::HexOverflow { slot: Slot::RegB, value: 0x2_1234_5678 }));
    }

    #[test]
    fn parse_word_rejects_malformed_input() {
        assert_eq!(parse_word("0x0000000A"), Some(10));
        assert_eq!(parse_word("0xA"), None);
        assert_eq!(parse_word("0000000A"), None);
        assert_eq!(parse_word("0x0000000G"), None);
    }

    proptest! {
        #[test]
        fn rendered_words_round_trip(value in 0u64..(1u64 << 42)) {
            let mut s = StateVector::new();
            s.set(Slot::RegA, value).unwrap();
            let words = render(&s, HexPolicy::Truncate).unwrap();
            let back = parse_word(&words[Slot::RegA.index()]).unwrap();
            prop_assert_eq!(back as u64, value & 0xFFFF_FFFF);
        }
    }
}
