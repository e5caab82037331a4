// Opcode-249 params block shared by items, NPCs and scenery objects.
//
// Layout: u8 entry count, then per entry a u8 type tag (1 = string,
// 0 = integer), a u24 key, and the value.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::DecodeError;

use super::ByteCursor;

const TAG_INT: u8 = 0;
const TAG_STRING: u8 = 1;

/// A single param value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i32),
    Str(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

/// Param key to value, in first-occurrence order. A repeated key keeps its
/// original position and takes the later value.
pub type Params = IndexMap<u32, ParamValue>;

pub(super) fn read_params(buf: &mut ByteCursor<'_>) -> Result<Params, DecodeError> {
    let count = buf.read_u8()?;
    let mut params = Params::with_capacity(usize::from(count));
    for _ in 0..count {
        let tag = buf.read_u8()?;
        let key = buf.read_u24()?;
        let value = match tag {
            TAG_STRING => ParamValue::Str(buf.read_string()?),
            TAG_INT => ParamValue::Int(buf.read_i32()?),
            tag => return Err(DecodeError::InvalidParamType { tag }),
        };
        params.insert(key, value);
    }
    Ok(params)
}
