// Sequence records: animations as frame lists plus playback rules.

use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{ConfigKind, Definition, decode_opcodes, unknown_opcode};

/// Sentinel closing every interleave list.
pub const INTERLEAVE_END: i32 = 9_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceDefinition {
    pub id: u32,
    pub frame_ids: Option<Vec<u32>>,
    pub frame_lengths: Option<Vec<u16>>,
    pub chat_frame_ids: Option<Vec<u32>>,
    pub frame_sounds: Option<Vec<u32>>,
    pub interleave: Option<Vec<i32>>,
    pub frame_step: i32,
    pub stretches: bool,
    pub forced_priority: u8,
    pub left_hand_item: i32,
    pub right_hand_item: i32,
    pub max_loops: u8,
    pub precedence_animating: i32,
    pub priority: i32,
    pub reply_mode: u8,
}

impl Default for SequenceDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            frame_ids: None,
            frame_lengths: None,
            chat_frame_ids: None,
            frame_sounds: None,
            interleave: None,
            frame_step: -1,
            stretches: false,
            forced_priority: 5,
            left_hand_item: -1,
            right_hand_item: -1,
            max_loops: 99,
            precedence_animating: -1,
            priority: -1,
            reply_mode: 2,
        }
    }
}

/// `count` low halves then `count` high halves.
fn read_split_ids(buf: &mut ByteCursor<'_>, count: usize) -> Result<Vec<u32>, DecodeError> {
    let mut ids = (0..count)
        .map(|_| buf.read_u16().map(u32::from))
        .collect::<Result<Vec<_>, _>>()?;
    for id in &mut ids {
        *id |= u32::from(buf.read_u16()?) << 16;
    }
    Ok(ids)
}

impl SequenceDefinition {
    fn post(&mut self) {
        let fallback = if self.interleave.is_some() { 2 } else { 0 };
        if self.precedence_animating == -1 {
            self.precedence_animating = fallback;
        }
        if self.priority == -1 {
            self.priority = fallback;
        }
    }

    /// Frame count, or 0 for a sequence without frames.
    pub fn frame_count(&self) -> usize {
        self.frame_ids.as_ref().map_or(0, Vec::len)
    }
}

impl Definition for SequenceDefinition {
    const KIND: ConfigKind = ConfigKind::Sequence;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => {
                    let count = usize::from(buf.read_u16()?);
                    def.frame_lengths = Some(
                        (0..count)
                            .map(|_| buf.read_u16())
                            .collect::<Result<_, _>>()?,
                    );
                    def.frame_ids = Some(read_split_ids(buf, count)?);
                }
                2 => def.frame_step = i32::from(buf.read_u16()?),
                3 => {
                    let count = usize::from(buf.read_u8()?);
                    let mut interleave = Vec::with_capacity(count + 1);
                    for _ in 0..count {
                        interleave.push(i32::from(buf.read_u8()?));
                    }
                    interleave.push(INTERLEAVE_END);
                    def.interleave = Some(interleave);
                }
                4 => def.stretches = true,
                5 => def.forced_priority = buf.read_u8()?,
                6 => def.left_hand_item = i32::from(buf.read_u16()?),
                7 => def.right_hand_item = i32::from(buf.read_u16()?),
                8 => def.max_loops = buf.read_u8()?,
                9 => def.precedence_animating = i32::from(buf.read_u8()?),
                10 => def.priority = i32::from(buf.read_u8()?),
                11 => def.reply_mode = buf.read_u8()?,
                12 => {
                    let count = usize::from(buf.read_u8()?);
                    def.chat_frame_ids = Some(read_split_ids(buf, count)?);
                }
                13 => {
                    let count = usize::from(buf.read_u8()?);
                    def.frame_sounds = Some(
                        (0..count)
                            .map(|_| buf.read_u24())
                            .collect::<Result<_, _>>()?,
                    );
                }
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        def.post();
        Ok(def)
    }
}
