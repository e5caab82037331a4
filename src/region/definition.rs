// Region landscape and object-placement decoders.
//
// Landscape layout, per (layer, x, y) tile in that nesting order: a run of
// attribute bytes closed by 0 (no height) or 1 (explicit height):
//
//   0         end of tile; layer > 0 sits 240 below the layer beneath
//   1 h       end of tile with height delta h << 3 (h == 1 means flat)
//   2..=49    overlay: next byte is the id, path/rotation from the opcode
//   50..=81   render rule = attribute - 49
//   82..=255  underlay = attribute - 81
//
// Object layout: SmallSmart id deltas, each followed by SmallSmart position
// deltas (+1 biased) and one attribute byte per position; both lists end at
// a SmallSmart 0. A position packs layer << 12 | x << 6 | y.
//
// Both decoders build into locals and only assign once the whole stream is
// read, so a failed decode leaves the region untouched.

use log::trace;
use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::DecodeError;

use super::{LAYERS, LayerGrid, REGION_SIZE, RenderRule, region_id};

/// Height drop between a layer and the one below when the tile gives none.
pub const LAYER_CLEARANCE: i32 = 240;

const ATTR_END: u8 = 0;
const ATTR_HEIGHT: u8 = 1;
const ATTR_OVERLAY_LAST: u8 = 49;
const ATTR_RENDER_RULE_LAST: u8 = 81;

/// One placed scenery object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapObject {
    pub id: i32,
    pub layer: u8,
    pub local_x: u8,
    pub local_y: u8,
    pub shape: u8,
    pub orientation: u8,
}

/// Decoded landscape and objects for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionDefinition {
    pub x: u8,
    pub y: u8,
    pub tile_heights: LayerGrid<i32>,
    pub render_rules: LayerGrid<RenderRule>,
    pub overlay_ids: LayerGrid<i8>,
    pub overlay_paths: LayerGrid<u8>,
    pub overlay_rotations: LayerGrid<u8>,
    pub underlay_ids: LayerGrid<u8>,
    pub objects: Vec<MapObject>,
}

struct Landscape {
    tile_heights: LayerGrid<i32>,
    render_rules: LayerGrid<RenderRule>,
    overlay_ids: LayerGrid<i8>,
    overlay_paths: LayerGrid<u8>,
    overlay_rotations: LayerGrid<u8>,
    underlay_ids: LayerGrid<u8>,
}

impl Landscape {
    fn new() -> Self {
        Self {
            tile_heights: LayerGrid::default(),
            render_rules: LayerGrid::default(),
            overlay_ids: LayerGrid::default(),
            overlay_paths: LayerGrid::default(),
            overlay_rotations: LayerGrid::default(),
            underlay_ids: LayerGrid::default(),
        }
    }

    fn decode_tile(
        &mut self,
        buf: &mut ByteCursor<'_>,
        layer: usize,
        x: usize,
        y: usize,
    ) -> Result<(), DecodeError> {
        let below = |grid: &LayerGrid<i32>| if layer == 0 { 0 } else { grid.get(layer - 1, x, y) };
        loop {
            match buf.read_u8()? {
                ATTR_END => {
                    if layer > 0 {
                        let height = below(&self.tile_heights) - LAYER_CLEARANCE;
                        self.tile_heights.set(layer, x, y, height);
                    }
                    return Ok(());
                }
                ATTR_HEIGHT => {
                    let height = match buf.read_u8()? {
                        1 => 0,
                        h => i32::from(h),
                    };
                    let delta = height << 3;
                    let height = below(&self.tile_heights) - delta;
                    self.tile_heights.set(layer, x, y, height);
                    return Ok(());
                }
                attr @ 2..=ATTR_OVERLAY_LAST => {
                    self.overlay_ids.set(layer, x, y, buf.read_i8()?);
                    self.overlay_paths.set(layer, x, y, (attr - 2) / 4);
                    self.overlay_rotations.set(layer, x, y, (attr - 2) & 3);
                }
                attr @ 50..=ATTR_RENDER_RULE_LAST => {
                    self.render_rules
                        .set(layer, x, y, RenderRule::from_bits_retain(attr - 49));
                }
                attr => self.underlay_ids.set(layer, x, y, attr - 81),
            }
        }
    }
}

impl RegionDefinition {
    /// An empty region at `(x, y)`: flat, no attributes, no objects.
    pub fn new(x: u8, y: u8) -> Self {
        let land = Landscape::new();
        Self {
            x,
            y,
            tile_heights: land.tile_heights,
            render_rules: land.render_rules,
            overlay_ids: land.overlay_ids,
            overlay_paths: land.overlay_paths,
            overlay_rotations: land.overlay_rotations,
            underlay_ids: land.underlay_ids,
            objects: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        region_id(self.x, self.y)
    }

    /// Absolute tile x of the region's south-west corner.
    pub fn base_x(&self) -> u32 {
        u32::from(self.x) * REGION_SIZE as u32
    }

    /// Absolute tile y of the region's south-west corner.
    pub fn base_y(&self) -> u32 {
        u32::from(self.y) * REGION_SIZE as u32
    }

    /// Decode the landscape file, replacing every tile attribute.
    pub fn decode_landscape(&mut self, buf: &mut ByteCursor<'_>) -> Result<(), DecodeError> {
        let mut land = Landscape::new();
        for layer in 0..LAYERS {
            for x in 0..REGION_SIZE {
                for y in 0..REGION_SIZE {
                    land.decode_tile(buf, layer, x, y)?;
                }
            }
        }
        trace!("region {}: landscape read {} byte(s)", self.id(), buf.position());

        self.tile_heights = land.tile_heights;
        self.render_rules = land.render_rules;
        self.overlay_ids = land.overlay_ids;
        self.overlay_paths = land.overlay_paths;
        self.overlay_rotations = land.overlay_rotations;
        self.underlay_ids = land.underlay_ids;
        Ok(())
    }

    /// Decode the object file, replacing the object list. Uses the bridge
    /// flags from the landscape, so decode that first.
    pub fn decode_objects(&mut self, buf: &mut ByteCursor<'_>) -> Result<(), DecodeError> {
        let mut objects = Vec::new();
        let mut id: i32 = -1;
        loop {
            let offset = buf.read_small_smart()?;
            if offset == 0 {
                break;
            }
            id = id.wrapping_add(i32::from(offset));

            let mut position: u32 = 0;
            loop {
                let delta = buf.read_small_smart()?;
                if delta == 0 {
                    break;
                }
                position = position.wrapping_add(u32::from(delta) - 1);

                let local_y = (position & 0x3F) as u8;
                let local_x = ((position >> 6) & 0x3F) as u8;
                let mut layer = ((position >> 12) & 0x3) as i32;
                if self.is_bridge(local_x, local_y) {
                    layer -= 1;
                }

                // Corrected below ground: the attribute byte is consumed and
                // the placement dropped.
                if layer < 0 {
                    buf.skip(1)?;
                    continue;
                }

                let attributes = buf.read_u8()?;
                objects.push(MapObject {
                    id,
                    layer: layer as u8,
                    local_x,
                    local_y,
                    shape: attributes >> 2,
                    orientation: attributes & 3,
                });
            }
        }
        trace!("region {}: {} object(s)", self.id(), objects.len());

        self.objects = objects;
        Ok(())
    }

    fn is_bridge(&self, x: u8, y: u8) -> bool {
        self.render_rules
            .get(1, usize::from(x), usize::from(y))
            .contains(RenderRule::BRIDGE)
    }

    /// Height of the tile at `(layer, x, y)`.
    pub fn height(&self, layer: usize, x: usize, y: usize) -> i32 {
        self.tile_heights.get(layer, x, y)
    }

    /// Objects placed on one tile, across every layer.
    pub fn objects_at(&self, x: u8, y: u8) -> impl Iterator<Item = &MapObject> + '_ {
        self.objects
            .iter()
            .filter(move |o| o.local_x == x && o.local_y == y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
