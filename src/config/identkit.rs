// Ident-kit records: selectable character body parts.

use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{ConfigKind, Definition, Remap, decode_opcodes, read_u16_list, unknown_opcode};

/// Number of head-model slots (opcodes 60..=69).
pub const HEAD_MODEL_SLOTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentKitDefinition {
    pub id: u32,
    pub body_part: i32,
    pub models: Option<Vec<u16>>,
    pub head_models: [i32; HEAD_MODEL_SLOTS],
    pub non_selectable: bool,
    pub colors: Option<Remap<u16>>,
    pub textures: Option<Remap<u16>>,
}

impl Default for IdentKitDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            body_part: -1,
            models: None,
            head_models: [-1; HEAD_MODEL_SLOTS],
            non_selectable: false,
            colors: None,
            textures: None,
        }
    }
}

impl Definition for IdentKitDefinition {
    const KIND: ConfigKind = ConfigKind::IdentKit;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => def.body_part = i32::from(buf.read_u8()?),
                2 => def.models = Some(read_u16_list(buf)?),
                3 => def.non_selectable = true,
                40 => def.colors = Some(Remap::read(buf)?),
                41 => def.textures = Some(Remap::read(buf)?),
                60..=69 => {
                    def.head_models[usize::from(opcode - 60)] = i32::from(buf.read_u16()?);
                }
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        Ok(def)
    }
}
