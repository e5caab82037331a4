// NPC records.

use serde::Serialize;

use crate::buffer::{ByteCursor, Params};
use crate::error::DecodeError;

use super::{
    ConfigKind, Definition, Remap, Transforms, decode_opcodes, read_action, read_u16_list,
    unknown_opcode,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NpcDefinition {
    pub id: u32,
    pub name: String,
    pub models: Option<Vec<u16>>,
    pub chat_head_models: Option<Vec<u16>>,
    pub size: u8,
    pub stand_animation: i32,
    pub walk_animation: i32,
    pub idle_rotate_left_animation: i32,
    pub idle_rotate_right_animation: i32,
    pub rotate_180_animation: i32,
    pub rotate_90_right_animation: i32,
    pub rotate_90_left_animation: i32,
    pub actions: [Option<String>; 5],
    pub colors: Option<Remap<u16>>,
    pub textures: Option<Remap<u16>>,
    pub draw_map_dot: bool,
    pub combat_level: i32,
    pub resize_x: u16,
    pub resize_y: u16,
    pub has_render_priority: bool,
    pub ambient: i8,
    pub contrast: i32,
    pub head_icon: i32,
    pub rotation: u16,
    pub transforms: Option<Transforms>,
    pub interactable: bool,
    pub clickable: bool,
    pub follower: bool,
    pub params: Option<Params>,
}

impl Default for NpcDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            name: "null".to_owned(),
            models: None,
            chat_head_models: None,
            size: 1,
            stand_animation: -1,
            walk_animation: -1,
            idle_rotate_left_animation: -1,
            idle_rotate_right_animation: -1,
            rotate_180_animation: -1,
            rotate_90_right_animation: -1,
            rotate_90_left_animation: -1,
            actions: Default::default(),
            colors: None,
            textures: None,
            draw_map_dot: true,
            combat_level: -1,
            resize_x: 128,
            resize_y: 128,
            has_render_priority: false,
            ambient: 0,
            contrast: 0,
            head_icon: -1,
            rotation: 32,
            transforms: None,
            interactable: true,
            clickable: true,
            follower: false,
            params: None,
        }
    }
}

impl Definition for NpcDefinition {
    const KIND: ConfigKind = ConfigKind::Npc;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => def.models = Some(read_u16_list(buf)?),
                2 => def.name = buf.read_string()?,
                12 => def.size = buf.read_u8()?,
                13 => def.stand_animation = i32::from(buf.read_u16()?),
                14 => def.walk_animation = i32::from(buf.read_u16()?),
                15 => def.idle_rotate_left_animation = i32::from(buf.read_u16()?),
                16 => def.idle_rotate_right_animation = i32::from(buf.read_u16()?),
                17 => {
                    def.walk_animation = i32::from(buf.read_u16()?);
                    def.rotate_180_animation = i32::from(buf.read_u16()?);
                    def.rotate_90_right_animation = i32::from(buf.read_u16()?);
                    def.rotate_90_left_animation = i32::from(buf.read_u16()?);
                }
                30..=34 => def.actions[usize::from(opcode - 30)] = read_action(buf)?,
                40 => def.colors = Some(Remap::read(buf)?),
                41 => def.textures = Some(Remap::read(buf)?),
                60 => def.chat_head_models = Some(read_u16_list(buf)?),
                93 => def.draw_map_dot = false,
                95 => def.combat_level = i32::from(buf.read_u16()?),
                97 => def.resize_x = buf.read_u16()?,
                98 => def.resize_y = buf.read_u16()?,
                99 => def.has_render_priority = true,
                100 => def.ambient = buf.read_i8()?,
                101 => def.contrast = i32::from(buf.read_i8()?) * 5,
                102 => def.head_icon = i32::from(buf.read_u16()?),
                103 => def.rotation = buf.read_u16()?,
                106 | 118 => def.transforms = Some(Transforms::read(buf, opcode == 118)?),
                107 => def.interactable = false,
                109 => def.clickable = false,
                111 => def.follower = true,
                249 => def.params = Some(buf.read_params()?),
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        Ok(def)
    }
}
