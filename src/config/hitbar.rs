// Hit-bar records: health bar appearance and timing.

use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{ConfigKind, Definition, decode_opcodes, unknown_opcode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitBarDefinition {
    pub id: u32,
    pub alpha_start: u8,
    pub alpha_end: u8,
    pub fade_delay: i32,
    pub display_duration: u16,
    pub front_sprite: i32,
    pub back_sprite: i32,
    pub health_scale: u8,
    pub padding: u8,
}

impl Default for HitBarDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            alpha_start: 255,
            alpha_end: 255,
            fade_delay: -1,
            display_duration: 70,
            front_sprite: -1,
            back_sprite: -1,
            health_scale: 30,
            padding: 0,
        }
    }
}

impl Definition for HitBarDefinition {
    const KIND: ConfigKind = ConfigKind::HitBar;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                // Read and dropped; the client never uses these.
                1 => buf.skip(2)?,
                6 => buf.skip(1)?,
                2 => def.alpha_start = buf.read_u8()?,
                3 => def.alpha_end = buf.read_u8()?,
                4 => def.fade_delay = 0,
                5 => def.display_duration = buf.read_u16()?,
                7 => def.front_sprite = buf.read_large_smart()?,
                8 => def.back_sprite = buf.read_large_smart()?,
                11 => def.fade_delay = i32::from(buf.read_u16()?),
                14 => def.health_scale = buf.read_u8()?,
                15 => def.padding = buf.read_u8()?,
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        Ok(def)
    }
}
