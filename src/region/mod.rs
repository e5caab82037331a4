// Map regions: 64×64-tile squares of the world, four layers high.
//
// A region is backed by two files in the regions table: a landscape file
// ("m{x}_{y}") with per-tile heights and surface attributes, and an
// encrypted object file ("l{x}_{y}") listing scenery placements.
//
// # Modules
//
// - `grid`       — `LayerGrid`: flat per-tile storage
// - `definition` — `RegionDefinition`: landscape and object decoders
// - `loader`     — loading every keyed region from a `CacheStore`

pub mod definition;
pub mod grid;
pub mod loader;

use bitflags::bitflags;
use serde::Serialize;

pub use definition::{MapObject, RegionDefinition};
pub use grid::LayerGrid;
pub use loader::{CancelToken, load_regions, load_regions_with};

/// Tiles along each side of a region.
pub const REGION_SIZE: usize = 64;

/// Height layers per region.
pub const LAYERS: usize = 4;

/// Region id for region coordinates `(x, y)`.
pub const fn region_id(x: u8, y: u8) -> u32 {
    ((x as u32) << 8) | y as u32
}

/// Region coordinates `(x, y)` for a region id.
pub const fn region_coords(id: u32) -> (u8, u8) {
    (((id >> 8) & 0xFF) as u8, (id & 0xFF) as u8)
}

bitflags! {
    /// Per-tile render-rule flags. Undefined bits are kept as read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct RenderRule: u8 {
        const BLOCKED = 0x1;
        /// Objects on the tile above belong to this layer.
        const BRIDGE = 0x2;
        const ROOF = 0x4;
    }
}
