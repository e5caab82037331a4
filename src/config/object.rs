// Scenery object records.
//
// Two values are derived after the opcode stream when the record leaves
// them unset: the interact type (from models, shapes and actions) and the
// support-items flag (from the clip type).

use serde::Serialize;

use crate::buffer::{ByteCursor, Params};
use crate::error::DecodeError;

use super::{
    ConfigKind, Definition, Remap, Transforms, decode_opcodes, read_action, read_u16_list,
    unknown_opcode,
};

/// Shape id of a centrepiece object; the only shape that makes a modelled
/// object interactive by default.
pub const SHAPE_CENTREPIECE: u8 = 10;

/// Looping ambient sound emitted by an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AmbientSound {
    pub sound: i32,
    pub distance: u8,
    pub min_delay: u16,
    pub max_delay: u16,
    /// Random pool played instead of `sound` when non-empty.
    pub pool: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectDefinition {
    pub id: u32,
    pub name: String,
    pub models: Option<Vec<u16>>,
    /// Shape per model; absent when the models apply to every shape.
    pub shapes: Option<Vec<u8>>,
    pub width: u8,
    pub length: u8,
    pub clip_type: u8,
    pub impenetrable: bool,
    pub interact_type: i32,
    pub contoured_ground: i32,
    pub non_flat_shading: bool,
    pub model_clipped: bool,
    pub animation: i32,
    pub decor_displacement: u8,
    pub ambient: i8,
    pub contrast: i8,
    pub actions: [Option<String>; 5],
    pub colors: Option<Remap<u16>>,
    pub textures: Option<Remap<u16>>,
    pub mirrored: bool,
    pub clipped: bool,
    pub model_size_x: u16,
    pub model_size_height: u16,
    pub model_size_y: u16,
    pub map_scene: i32,
    pub access_block: u8,
    pub offset_x: u16,
    pub offset_height: u16,
    pub offset_y: u16,
    pub obstructs_ground: bool,
    pub hollow: bool,
    pub support_items: i32,
    pub transforms: Option<Transforms>,
    pub ambient_sound: Option<AmbientSound>,
    pub map_icon: i32,
    pub params: Option<Params>,
}

impl Default for ObjectDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            name: "null".to_owned(),
            models: None,
            shapes: None,
            width: 1,
            length: 1,
            clip_type: 2,
            impenetrable: true,
            interact_type: -1,
            contoured_ground: -1,
            non_flat_shading: false,
            model_clipped: false,
            animation: -1,
            decor_displacement: 16,
            ambient: 0,
            contrast: 0,
            actions: Default::default(),
            colors: None,
            textures: None,
            mirrored: false,
            clipped: true,
            model_size_x: 128,
            model_size_height: 128,
            model_size_y: 128,
            map_scene: -1,
            access_block: 0,
            offset_x: 0,
            offset_height: 0,
            offset_y: 0,
            obstructs_ground: false,
            hollow: false,
            support_items: -1,
            transforms: None,
            ambient_sound: None,
            map_icon: -1,
            params: None,
        }
    }
}

impl ObjectDefinition {
    fn post(&mut self) {
        if self.interact_type == -1 {
            let modelled = self.models.is_some()
                && self
                    .shapes
                    .as_ref()
                    .is_none_or(|shapes| shapes.first() == Some(&SHAPE_CENTREPIECE));
            let has_action = self.actions.iter().any(Option::is_some);
            self.interact_type = i32::from(modelled || has_action);
        }
        if self.support_items == -1 {
            self.support_items = i32::from(self.clip_type != 0);
        }
    }

    fn sound_mut(&mut self) -> &mut AmbientSound {
        self.ambient_sound.get_or_insert_with(|| AmbientSound {
            sound: -1,
            ..AmbientSound::default()
        })
    }
}

impl Definition for ObjectDefinition {
    const KIND: ConfigKind = ConfigKind::Object;

    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let mut def = Self {
            id,
            ..Self::default()
        };
        decode_opcodes(buf, Self::KIND, id, |opcode, buf| {
            match opcode {
                1 => {
                    let count = usize::from(buf.read_u8()?);
                    if count > 0 {
                        let mut models = Vec::with_capacity(count);
                        let mut shapes = Vec::with_capacity(count);
                        for _ in 0..count {
                            models.push(buf.read_u16()?);
                            shapes.push(buf.read_u8()?);
                        }
                        def.models = Some(models);
                        def.shapes = Some(shapes);
                    }
                }
                2 => def.name = buf.read_string()?,
                5 => {
                    let models = read_u16_list(buf)?;
                    if !models.is_empty() {
                        def.models = Some(models);
                        def.shapes = None;
                    }
                }
                14 => def.width = buf.read_u8()?,
                15 => def.length = buf.read_u8()?,
                17 => {
                    def.clip_type = 0;
                    def.impenetrable = false;
                }
                18 => def.impenetrable = false,
                19 => def.interact_type = i32::from(buf.read_u8()?),
                21 => def.contoured_ground = 0,
                22 => def.non_flat_shading = true,
                23 => def.model_clipped = true,
                24 => def.animation = i32::from(buf.read_u16()?),
                27 => def.clip_type = 1,
                28 => def.decor_displacement = buf.read_u8()?,
                29 => def.ambient = buf.read_i8()?,
                30..=34 => def.actions[usize::from(opcode - 30)] = read_action(buf)?,
                39 => def.contrast = buf.read_i8()?,
                40 => def.colors = Some(Remap::read(buf)?),
                41 => def.textures = Some(Remap::read(buf)?),
                62 => def.mirrored = true,
                64 => def.clipped = false,
                65 => def.model_size_x = buf.read_u16()?,
                66 => def.model_size_height = buf.read_u16()?,
                67 => def.model_size_y = buf.read_u16()?,
                68 => def.map_scene = i32::from(buf.read_u16()?),
                69 => def.access_block = buf.read_u8()?,
                70 => def.offset_x = buf.read_u16()?,
                71 => def.offset_height = buf.read_u16()?,
                72 => def.offset_y = buf.read_u16()?,
                73 => def.obstructs_ground = true,
                74 => def.hollow = true,
                75 => def.support_items = i32::from(buf.read_u8()?),
                77 | 92 => def.transforms = Some(Transforms::read(buf, opcode == 92)?),
                78 => {
                    let sound = i32::from(buf.read_u16()?);
                    let distance = buf.read_u8()?;
                    let entry = def.sound_mut();
                    entry.sound = sound;
                    entry.distance = distance;
                }
                79 => {
                    let min_delay = buf.read_u16()?;
                    let max_delay = buf.read_u16()?;
                    let distance = buf.read_u8()?;
                    let pool = read_u16_list(buf)?;
                    let entry = def.sound_mut();
                    entry.min_delay = min_delay;
                    entry.max_delay = max_delay;
                    entry.distance = distance;
                    entry.pool = pool;
                }
                81 => def.contoured_ground = i32::from(buf.read_u8()?),
                82 => def.map_icon = i32::from(buf.read_u16()?),
                249 => def.params = Some(buf.read_params()?),
                _ => return Err(unknown_opcode(Self::KIND, opcode)),
            }
            Ok(())
        })?;
        def.post();
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(data: &[u8]) -> Result<ObjectDefinition, DecodeError> {
        ObjectDefinition::decode(1276, &mut ByteCursor::new(data))
    }

    #[test]
    fn empty_body_runs_post() {
        let def = decode(&[0]).unwrap();
        assert_eq!(def.name, "null");
        assert_eq!(def.clip_type, 2);
        assert_eq!(def.interact_type, 0);
        assert_eq!(def.support_items, 1);
        assert_eq!((def.width, def.length), (1, 1));
    }

    #[test]
    fn centrepiece_model_is_interactive() {
        let def = decode(&[1, 1, 0, 42, 10, 0]).unwrap();
        assert_eq!(def.models, Some(vec![42]));
        assert_eq!(def.shapes, Some(vec![10]));
        assert_eq!(def.interact_type, 1);
    }

    #[test]
    fn wall_model_is_not_interactive() {
        let def = decode(&[1, 1, 0, 42, 0, 0]).unwrap();
        assert_eq!(def.interact_type, 0);
    }

    #[test]
    fn action_makes_interactive() {
        let def = decode(&[1, 1, 0, 42, 0, 31, b'O', b'p', b'e', b'n', 0, 0]).unwrap();
        assert_eq!(def.actions[1].as_deref(), Some("Open"));
        assert_eq!(def.interact_type, 1);
    }

    #[test]
    fn opcode_5_clears_shapes() {
        let def = decode(&[1, 1, 0, 42, 4, 5, 2, 0, 1, 0, 2, 0]).unwrap();
        assert_eq!(def.models, Some(vec![1, 2]));
        assert_eq!(def.shapes, None);
        assert_eq!(def.interact_type, 1);
    }

    #[test]
    fn zero_count_models_leave_fields_unset() {
        let def = decode(&[1, 0, 5, 0, 0]).unwrap();
        assert!(def.models.is_none() && def.shapes.is_none());
    }

    #[test]
    fn explicit_interact_type_survives_post() {
        let def = decode(&[19, 3, 17, 0]).unwrap();
        assert_eq!(def.interact_type, 3);
        assert_eq!(def.clip_type, 0);
        assert!(!def.impenetrable);
        assert_eq!(def.support_items, 0);
    }

    #[test]
    fn flag_opcodes() {
        let def = decode(&[22, 23, 62, 64, 73, 74, 21, 0]).unwrap();
        assert!(def.non_flat_shading && def.model_clipped && def.mirrored);
        assert!(!def.clipped);
        assert!(def.obstructs_ground && def.hollow);
        assert_eq!(def.contoured_ground, 0);
    }

    #[test]
    fn ambient_sounds() {
        let data = [
            78, 0, 9, 3, //
            79, 0, 10, 0, 20, 4, 2, 0, 1, 0, 2, //
            0,
        ];
        let sound = decode(&data).unwrap().ambient_sound.unwrap();
        assert_eq!(sound.sound, 9);
        assert_eq!(sound.distance, 4);
        assert_eq!((sound.min_delay, sound.max_delay), (10, 20));
        assert_eq!(sound.pool, vec![1, 2]);
    }

    #[test]
    fn transforms_keep_final_default() {
        let data = [92, 0, 1, 0, 2, 0, 77, 0, 0, 5, 0];
        let t = decode(&data).unwrap().transforms.unwrap();
        assert_eq!(t.varbit, 1);
        assert_eq!(t.varp, 2);
        assert_eq!(t.ids, vec![5, 77]);
    }

    #[test]
    fn opcode_20_is_unknown() {
        assert!(matches!(
            decode(&[20, 0]),
            Err(DecodeError::UnknownOpcode { kind: ConfigKind::Object, opcode: 20 })
        ));
    }
}
