// Param records: typed defaults for the params blocks carried by items,
// NPCs and objects.

use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{ConfigKind, Definition, decode_opcodes, unknown_opcode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDefinition {
    pub id: u32,
    pub stack_type: Option<char>,
    pub default_int: i32,
    pub default_string: Option<String>,
    pub auto_disable: bool,
}

impl Default for ParamDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            stack_type: None,
            default_int: 0,
            default_string: None,
            auto_disable: true,
        }
    }
}

impl ParamDefinition {
    /// Whether values of this param are strings rather than integers.
    pub fn is_string(&self) -> bool {
        self.stack_type == Some('s')
    }
}

impl Definition for ParamDefinition {
    const KIND: ConfigKind = ConfigKind::Param;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => def.stack_type = Some(buf.read_cp1252_char()?),
                2 => def.default_int = buf.read_i32()?,
                4 => def.auto_disable = false,
                5 => def.default_string = Some(buf.read_string()?),
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        Ok(def)
    }
}
