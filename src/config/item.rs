// Item records.
//
// Items link to each other through note, bought and placeholder pairs: a
// link id names the base item and a template id names the record whose
// models are borrowed. Links are kept as ids; nothing is resolved here.

use serde::Serialize;

use crate::buffer::{ByteCursor, Params};
use crate::error::DecodeError;

use super::{ConfigKind, Definition, Remap, decode_opcodes, read_action, unknown_opcode};

/// Number of stack-variant slots (opcodes 100..=109).
pub const STACK_VARIANTS: usize = 10;

/// Alternative model shown once a stack reaches `count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StackVariant {
    pub item: u16,
    pub count: u16,
}

/// Worn models for one body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WornModels {
    pub model0: i32,
    pub model1: i32,
    pub model2: i32,
    pub offset: u8,
    pub head: i32,
    pub head2: i32,
}

impl Default for WornModels {
    fn default() -> Self {
        Self {
            model0: -1,
            model1: -1,
            model2: -1,
            offset: 0,
            head: -1,
            head2: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDefinition {
    pub id: u32,
    pub name: String,
    pub inventory_model: u16,
    pub zoom_2d: u16,
    pub xan_2d: u16,
    pub yan_2d: u16,
    pub zan_2d: u16,
    pub x_offset_2d: i16,
    pub y_offset_2d: i16,
    pub stackable: bool,
    pub price: i32,
    pub members: bool,
    pub tradeable: bool,
    pub male: WornModels,
    pub female: WornModels,
    pub ground_actions: [Option<String>; 5],
    pub inventory_actions: [Option<String>; 5],
    pub colors: Option<Remap<u16>>,
    pub textures: Option<Remap<u16>>,
    pub shift_click_drop_index: i8,
    pub note_linked_item: i32,
    pub note_template: i32,
    pub stack_variants: Option<[StackVariant; STACK_VARIANTS]>,
    pub resize_x: u16,
    pub resize_y: u16,
    pub resize_z: u16,
    pub ambient: i8,
    pub contrast: i32,
    pub team: u8,
    pub bought_link: i32,
    pub bought_template_id: i32,
    pub placeholder_link: i32,
    pub placeholder_template: i32,
    pub params: Option<Params>,
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            name: "null".to_owned(),
            inventory_model: 0,
            zoom_2d: 2000,
            xan_2d: 0,
            yan_2d: 0,
            zan_2d: 0,
            x_offset_2d: 0,
            y_offset_2d: 0,
            stackable: false,
            price: 1,
            members: false,
            tradeable: false,
            male: WornModels::default(),
            female: WornModels::default(),
            ground_actions: [None, None, Some("Take".to_owned()), None, None],
            inventory_actions: [None, None, None, None, Some("Drop".to_owned())],
            colors: None,
            textures: None,
            shift_click_drop_index: -2,
            note_linked_item: -1,
            note_template: -1,
            stack_variants: None,
            resize_x: 128,
            resize_y: 128,
            resize_z: 128,
            ambient: 0,
            contrast: 0,
            team: 0,
            bought_link: -1,
            bought_template_id: -1,
            placeholder_link: -1,
            placeholder_template: -1,
            params: None,
        }
    }
}

impl ItemDefinition {
    /// Whether this record is the banknote form of another item.
    pub fn is_noted(&self) -> bool {
        self.note_template != -1
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder_template != -1
    }
}

impl Definition for ItemDefinition {
    const KIND: ConfigKind = ConfigKind::Item;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => def.inventory_model = buf.read_u16()?,
                2 => def.name = buf.read_string()?,
                4 => def.zoom_2d = buf.read_u16()?,
                5 => def.xan_2d = buf.read_u16()?,
                6 => def.yan_2d = buf.read_u16()?,
                7 => def.x_offset_2d = buf.read_i16()?,
                8 => def.y_offset_2d = buf.read_i16()?,
                11 => def.stackable = true,
                12 => def.price = buf.read_i32()?,
                16 => def.members = true,
                23 => {
                    def.male.model0 = i32::from(buf.read_u16()?);
                    def.male.offset = buf.read_u8()?;
                }
                24 => def.male.model1 = i32::from(buf.read_u16()?),
                25 => {
                    def.female.model0 = i32::from(buf.read_u16()?);
                    def.female.offset = buf.read_u8()?;
                }
                26 => def.female.model1 = i32::from(buf.read_u16()?),
                30..=34 => def.ground_actions[usize::from(opcode - 30)] = read_action(buf)?,
                35..=39 => {
                    def.inventory_actions[usize::from(opcode - 35)] = Some(buf.read_string()?);
                }
                40 => def.colors = Some(Remap::read(buf)?),
                41 => def.textures = Some(Remap::read(buf)?),
                42 => def.shift_click_drop_index = buf.read_i8()?,
                65 => def.tradeable = true,
                78 => def.male.model2 = i32::from(buf.read_u16()?),
                79 => def.female.model2 = i32::from(buf.read_u16()?),
                90 => def.male.head = i32::from(buf.read_u16()?),
                91 => def.female.head = i32::from(buf.read_u16()?),
                92 => def.male.head2 = i32::from(buf.read_u16()?),
                93 => def.female.head2 = i32::from(buf.read_u16()?),
                95 => def.zan_2d = buf.read_u16()?,
                97 => def.note_linked_item = i32::from(buf.read_u16()?),
                98 => def.note_template = i32::from(buf.read_u16()?),
                100..=109 => {
                    let variants = def
                        .stack_variants
                        .get_or_insert([StackVariant::default(); STACK_VARIANTS]);
                    variants[usize::from(opcode - 100)] = StackVariant {
                        item: buf.read_u16()?,
                        count: buf.read_u16()?,
                    };
                }
                110 => def.resize_x = buf.read_u16()?,
                111 => def.resize_y = buf.read_u16()?,
                112 => def.resize_z = buf.read_u16()?,
                113 => def.ambient = buf.read_i8()?,
                114 => def.contrast = i32::from(buf.read_i8()?) * 5,
                115 => def.team = buf.read_u8()?,
                139 => def.bought_link = i32::from(buf.read_u16()?),
                140 => def.bought_template_id = i32::from(buf.read_u16()?),
                148 => def.placeholder_link = i32::from(buf.read_u16()?),
                149 => def.placeholder_template = i32::from(buf.read_u16()?),
                249 => def.params = Some(buf.read_params()?),
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        Ok(def)
    }
}
