// Varbit records: a bit range inside a player variable.

use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{ConfigKind, Definition, decode_opcodes, unknown_opcode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VarbitDefinition {
    pub id: u32,
    pub varp: u16,
    /// Lowest bit of the range, inclusive.
    pub lsb: u8,
    /// Highest bit of the range, inclusive.
    pub msb: u8,
}

impl VarbitDefinition {
    /// Mask covering `lsb..=msb` once shifted down to bit 0.
    pub fn mask(&self) -> u32 {
        let width = u32::from(self.msb.saturating_sub(self.lsb)) + 1;
        u32::MAX.checked_shr(32 - width.min(32)).unwrap_or(0)
    }
}

impl Definition for VarbitDefinition {
    const KIND: ConfigKind = ConfigKind::Varbit;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => {
                    def.varp = buf.read_u16()?;
                    def.lsb = buf.read_u8()?;
                    def.msb = buf.read_u8()?;
                }
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_range() {
        let def = VarbitDefinition::decode(4, &mut ByteCursor::new(&[1, 0x01, 0x2C, 3, 6, 0])).unwrap();
        assert_eq!(def.varp, 300);
        assert_eq!((def.lsb, def.msb), (3, 6));
        assert_eq!(def.mask(), 0b1111);
    }

    #[test]
    fn full_width_mask() {
        let def = VarbitDefinition {
            msb: 31,
            ..Default::default()
        };
        assert_eq!(def.mask(), u32::MAX);
    }

    #[test]
    fn rejects_unknown_opcode() {
        assert_eq!(
            VarbitDefinition::decode(0, &mut ByteCursor::new(&[2, 0])),
            Err(DecodeError::UnknownOpcode {
                kind: ConfigKind::Varbit,
                opcode: 2
            })
        );
    }
}
