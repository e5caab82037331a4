// Spot-animation records: standalone graphics played on a tile or entity.

use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{ConfigKind, Definition, Remap, decode_opcodes, unknown_opcode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotAnimDefinition {
    pub id: u32,
    pub model: u16,
    pub animation: i32,
    pub resize_x: u16,
    pub resize_y: u16,
    pub rotation: u16,
    pub ambient: u8,
    pub contrast: u8,
    pub colors: Option<Remap<i16>>,
    pub textures: Option<Remap<i16>>,
}

impl Default for SpotAnimDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            model: 0,
            animation: -1,
            resize_x: 128,
            resize_y: 128,
            rotation: 0,
            ambient: 0,
            contrast: 0,
            colors: None,
            textures: None,
        }
    }
}

impl Definition for SpotAnimDefinition {
    const KIND: ConfigKind = ConfigKind::SpotAnim;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => def.model = buf.read_u16()?,
                2 => def.animation = i32::from(buf.read_u16()?),
                4 => def.resize_x = buf.read_u16()?,
                5 => def.resize_y = buf.read_u16()?,
                6 => def.rotation = buf.read_u16()?,
                7 => def.ambient = buf.read_u8()?,
                8 => def.contrast = buf.read_u8()?,
                40 => def.colors = Some(Remap::read_signed(buf)?),
                41 => def.textures = Some(Remap::read_signed(buf)?),
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

    fn decode(data: &[u8]) -> Result<SpotAnimDefinition, DecodeError> {
        SpotAnimDefinition::decode(0, &mut ByteCursor::new(data))
    }

    #[test]
    fn empty_body_defaults() {
        let def = decode(&[0]).unwrap();
        assert_eq!(def.animation, -1);
        assert_eq!((def.resize_x, def.resize_y), (128, 128));
    }

    #[test]
    fn signed_remap() {
        let def = decode(&[1, 0, 50, 2, 0, 60, 40, 1, 0xFF, 0xFF, 0x00, 0x10, 0]).unwrap();
        assert_eq!(def.model, 50);
        assert_eq!(def.animation, 60);
        let colors = def.colors.unwrap();
        assert_eq!(colors.find, vec![-1]);
        assert_eq!(colors.replace, vec![16]);
    }

    #[test]
    fn opcode_3_is_unknown() {
        assert!(matches!(
            decode(&[3, 0]),
            Err(DecodeError::UnknownOpcode { kind: ConfigKind::SpotAnim, opcode: 3 })
        ));
    }
}
