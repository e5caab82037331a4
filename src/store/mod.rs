// Storage-layer interface consumed by the decoders.
//
// The on-disk index/archive engine, its ciphers and compression codecs are
// not part of this crate. Everything the decoders need from them goes
// through `CacheStore`.
//
// # Modules
//
// - `archive` — splitting a decompressed archive into child buffers
// - `memory`  — `MemoryStore`, an in-memory `CacheStore`

pub mod archive;
pub mod memory;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::Result;

pub use archive::Archive;
pub use memory::MemoryStore;

/// A 128-bit block-cipher key for one map region, as four words.
pub type XteaKey = [u32; 4];

// ---------------------------------------------------------------------------
// Cache tables
// ---------------------------------------------------------------------------

/// Numbered cache tables (one `.idx` file each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IndexType {
    Skeletons = 0,
    Skins = 1,
    Configs = 2,
    Interfaces = 3,
    SoundEffects = 4,
    Regions = 5,
    Track1 = 6,
    Models = 7,
    Sprites = 8,
    Textures = 9,
    Binary = 10,
    Track2 = 11,
    ClientScript = 12,
    Fonts = 13,
    Vorbis = 14,
    Instruments = 15,
    Undermined = 16,
    Defaults = 17,
    Reference = 255,
}

impl IndexType {
    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for IndexType {
    type Error = u8;

    fn try_from(id: u8) -> std::result::Result<Self, u8> {
        Ok(match id {
            0 => Self::Skeletons,
            1 => Self::Skins,
            2 => Self::Configs,
            3 => Self::Interfaces,
            4 => Self::SoundEffects,
            5 => Self::Regions,
            6 => Self::Track1,
            7 => Self::Models,
            8 => Self::Sprites,
            9 => Self::Textures,
            10 => Self::Binary,
            11 => Self::Track2,
            12 => Self::ClientScript,
            13 => Self::Fonts,
            14 => Self::Vorbis,
            15 => Self::Instruments,
            16 => Self::Undermined,
            17 => Self::Defaults,
            255 => Self::Reference,
            other => return Err(other),
        })
    }
}

/// Name hash used by reference tables to look up files by name.
pub fn name_hash(name: &str) -> i32 {
    name.bytes()
        .fold(0i32, |h, b| h.wrapping_mul(31).wrapping_add(i32::from(b)))
}

// ---------------------------------------------------------------------------
// Reference tables
// ---------------------------------------------------------------------------

/// Position of one child id inside its decoded archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRef {
    pub index: u32,
}

/// Reference-table metadata for one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name_hash: Option<i32>,
    /// One past the highest child id; ids below it may be unmapped.
    pub capacity: u32,
    children: BTreeMap<u32, ChildRef>,
}

impl ArchiveEntry {
    /// Entry whose children are `ids`, indexed in ascending id order.
    pub fn with_children(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut ids: Vec<u32> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        let capacity = ids.last().map_or(0, |&last| last + 1);
        let children = ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, ChildRef { index: index as u32 }))
            .collect();
        Self {
            name_hash: None,
            capacity,
            children,
        }
    }

    /// Entry holding a single unnamed child at id 0.
    pub fn single() -> Self {
        Self::with_children([0])
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name_hash = Some(name_hash(name));
        self
    }

    /// Number of children stored in the archive.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, id: u32) -> Option<ChildRef> {
        self.children.get(&id).copied()
    }
}

/// Reference table for one cache table: archive id to archive metadata.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: BTreeMap<u32, ArchiveEntry>,
    names: HashMap<i32, u32>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, archive: u32, entry: ArchiveEntry) {
        if let Some(old) = self.entries.get(&archive).and_then(|e| e.name_hash) {
            self.names.remove(&old);
        }
        if let Some(hash) = entry.name_hash {
            self.names.insert(hash, archive);
        }
        self.entries.insert(archive, entry);
    }

    pub fn entry(&self, archive: u32) -> Option<&ArchiveEntry> {
        self.entries.get(&archive)
    }

    pub fn entries(&self) -> impl Iterator<Item = (u32, &ArchiveEntry)> {
        self.entries.iter().map(|(&id, entry)| (id, entry))
    }

    /// Archive id whose name hashes to the same value as `name`.
    pub fn find_by_name(&self, name: &str) -> Option<u32> {
        self.names.get(&name_hash(name)).copied()
    }

    /// Smallest archive id above every existing one.
    pub fn next_archive_id(&self) -> u32 {
        self.entries.keys().next_back().map_or(0, |&last| last + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CacheStore
// ---------------------------------------------------------------------------

/// Black-box access to decompressed cache files.
///
/// Implementations own the container format, decryption and decompression.
/// A payload that fails integrity checks (corrupt data, wrong key) must be
/// reported as [`CacheError::CorruptPayload`].
///
/// [`CacheError::CorruptPayload`]: crate::error::CacheError::CorruptPayload
pub trait CacheStore: Send + Sync {
    /// Fully decompressed bytes of one file, decrypted with `key` first if
    /// one is given.
    fn read_data(&self, table: u8, file: u32, key: Option<&XteaKey>) -> Result<Vec<u8>>;

    fn reference_table(&self, table: u8) -> Result<Arc<ReferenceTable>>;

    /// Region id to decryption key. Only these regions are loaded.
    fn xteas(&self) -> &BTreeMap<u32, XteaKey>;

    /// File id registered under `name` in `table`, if any.
    fn file_id(&self, table: u8, name: &str) -> Result<Option<u32>> {
        Ok(self.reference_table(table)?.find_by_name(name))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_hash_matches_known_values() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 97 * 31 + 98);
        assert_ne!(name_hash("m50_50"), name_hash("l50_50"));
    }

    #[test]
    fn sparse_children_are_indexed_in_order() {
        let entry = ArchiveEntry::with_children([4, 0, 2]);
        assert_eq!(entry.capacity, 5);
        assert_eq!(entry.child_count(), 3);
        assert_eq!(entry.child(0), Some(ChildRef { index: 0 }));
        assert_eq!(entry.child(2), Some(ChildRef { index: 1 }));
        assert_eq!(entry.child(4), Some(ChildRef { index: 2 }));
        assert_eq!(entry.child(1), None);
    }

    #[test]
    fn reference_table_name_lookup() {
        let mut table = ReferenceTable::new();
        table.insert(3, ArchiveEntry::single().named("m50_50"));
        table.insert(4, ArchiveEntry::single().named("l50_50"));
        assert_eq!(table.find_by_name("m50_50"), Some(3));
        assert_eq!(table.find_by_name("l50_50"), Some(4));
        assert_eq!(table.find_by_name("m1_1"), None);
        assert_eq!(table.next_archive_id(), 5);

        table.insert(3, ArchiveEntry::single().named("m1_1"));
        assert_eq!(table.find_by_name("m50_50"), None);
        assert_eq!(table.find_by_name("m1_1"), Some(3));
    }

    #[test]
    fn index_type_ids() {
        assert_eq!(IndexType::Configs.id(), 2);
        assert_eq!(IndexType::Regions.id(), 5);
        assert_eq!(IndexType::try_from(255), Ok(IndexType::Reference));
        assert_eq!(IndexType::try_from(18), Err(18));
    }
}
