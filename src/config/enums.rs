// Enum records: typed key/value lookup tables.

use indexmap::IndexMap;
use serde::Serialize;

use crate::buffer::{ByteCursor, ParamValue};
use crate::error::DecodeError;

use super::{ConfigKind, Definition, decode_opcodes, unknown_opcode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDefinition {
    pub id: u32,
    pub key_type: Option<char>,
    pub value_type: Option<char>,
    pub default_string: String,
    pub default_int: i32,
    /// Entries in first-occurrence order. Opcodes 5 and 6 share the map.
    pub values: IndexMap<i32, ParamValue>,
}

impl Default for EnumDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            key_type: None,
            value_type: None,
            default_string: "null".to_owned(),
            default_int: 0,
            values: IndexMap::new(),
        }
    }
}

impl EnumDefinition {
    /// Integer value for `key`, falling back to the default.
    pub fn int(&self, key: i32) -> i32 {
        self.values
            .get(&key)
            .and_then(ParamValue::as_int)
            .unwrap_or(self.default_int)
    }

    /// String value for `key`, falling back to the default.
    pub fn string(&self, key: i32) -> &str {
        self.values
            .get(&key)
            .and_then(ParamValue::as_str)
            .unwrap_or(self.default_string.as_str())
    }
}

impl Definition for EnumDefinition {
    const KIND: ConfigKind = ConfigKind::Enum;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => def.key_type = Some(char::from(buf.read_u8()?)),
                2 => def.value_type = Some(char::from(buf.read_u8()?)),
                3 => def.default_string = buf.read_string()?,
                4 => def.default_int = buf.read_i32()?,
                5 | 6 => {
                    let count = buf.read_u16()?;
                    def.values.reserve(usize::from(count));
                    for _ in 0..count {
                        let key = buf.read_i32()?;
                        let value = if opcode == 5 {
                            ParamValue::Str(buf.read_string()?)
                        } else {
                            ParamValue::Int(buf.read_i32()?)
                        };
                        def.values.insert(key, value);
                    }
                }
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        Ok(def)
    }
}
