// Hit-mark records: the damage splats drawn over entities.
//
// Sprite and font references are SmartInt32s; everything else is fixed
// width. The transform table maps 65535 to -1 in every slot.

use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{ConfigKind, Definition, Transforms, decode_opcodes, unknown_opcode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitMarkDefinition {
    pub id: u32,
    pub font: i32,
    pub text_color: u32,
    pub left_sprite: i32,
    pub left_sprite2: i32,
    pub background_sprite: i32,
    pub right_sprite: i32,
    pub scroll_to_offset_x: i16,
    pub scroll_to_offset_y: i16,
    pub format: String,
    pub display_cycles: u16,
    pub fade_cycle: i32,
    pub use_damage: i32,
    pub text_offset_y: i16,
    pub transforms: Option<Transforms>,
}

impl Default for HitMarkDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            font: -1,
            text_color: 0xFF_FFFF,
            left_sprite: -1,
            left_sprite2: -1,
            background_sprite: -1,
            right_sprite: -1,
            scroll_to_offset_x: 0,
            scroll_to_offset_y: 0,
            format: String::new(),
            display_cycles: 70,
            fade_cycle: -1,
            use_damage: -1,
            text_offset_y: 0,
            transforms: None,
        }
    }
}

impl Definition for HitMarkDefinition {
    const KIND: ConfigKind = ConfigKind::HitMark;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => def.font = buf.read_smart_i32()?,
                2 => def.text_color = buf.read_u24()?,
                3 => def.left_sprite = buf.read_smart_i32()?,
                4 => def.left_sprite2 = buf.read_smart_i32()?,
                5 => def.background_sprite = buf.read_smart_i32()?,
                6 => def.right_sprite = buf.read_smart_i32()?,
                7 => def.scroll_to_offset_x = buf.read_i16()?,
                8 => def.format = buf.read_string()?,
                9 => def.display_cycles = buf.read_u16()?,
                10 => def.scroll_to_offset_y = buf.read_i16()?,
                11 => def.fade_cycle = 0,
                12 => def.use_damage = i32::from(buf.read_u8()?),
                13 => def.text_offset_y = buf.read_i16()?,
                14 => def.fade_cycle = i32::from(buf.read_u16()?),
                17 | 18 => def.transforms = Some(Transforms::read_nullable(buf, opcode == 18)?),
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

    fn decode(data: &[u8]) -> Result<HitMarkDefinition, DecodeError> {
        HitMarkDefinition::decode(0, &mut ByteCursor::new(data))
    }

    #[test]
    fn empty_body_defaults() {
        let def = decode(&[0]).unwrap();
        assert_eq!(def.text_color, 0xFF_FFFF);
        assert_eq!(def.display_cycles, 70);
        assert_eq!(def.font, -1);
        assert!(def.transforms.is_none());
    }

    #[test]
    fn smart_sprites_and_colour() {
        let data = [
            1, 0x05, //
            3, 0x80, 0x00, 0x01, 0x00, //
            2, 0xFF, 0x00, 0x00, //
            8, b'%', b'1', 0, //
            7, 0xFF, 0xF6, //
            0,
        ];
        let def = decode(&data).unwrap();
        assert_eq!(def.font, 5);
        assert_eq!(def.left_sprite, 256);
        assert_eq!(def.text_color, 0xFF_0000);
        assert_eq!(def.format, "%1");
        assert_eq!(def.scroll_to_offset_x, -10);
    }

    #[test]
    fn nullable_transforms() {
        // 18: varbit 65535, varp 12, default 65535, n = 1, ids [3, 65535]
        let data = [18, 0xFF, 0xFF, 0, 12, 0xFF, 0xFF, 1, 0, 3, 0xFF, 0xFF, 0];
        let t = decode(&data).unwrap().transforms.unwrap();
        assert_eq!(t.varbit, -1);
        assert_eq!(t.varp, 12);
        assert_eq!(t.ids, vec![3, -1, -1]);
    }

    #[test]
    fn fade_cycle_opcodes() {
        assert_eq!(decode(&[11, 0]).unwrap().fade_cycle, 0);
        assert_eq!(decode(&[14, 0, 40, 0]).unwrap().fade_cycle, 40);
    }

    #[test]
    fn opcode_15_is_unknown() {
        assert!(matches!(
            decode(&[15, 0]),
            Err(DecodeError::UnknownOpcode { kind: ConfigKind::HitMark, opcode: 15 })
        ));
    }
}
