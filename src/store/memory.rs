// In-memory `CacheStore`.
//
// Files are held gzip-compressed, the way the cache container stores them,
// and inflated on every read. Encrypted files remember the key they were
// stored under; reading with any other key reports a corrupt payload, as a
// wrong key would on disk.

use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};
use std::sync::Arc;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::{CacheError, Result};

use super::{Archive, ArchiveEntry, CacheStore, IndexType, ReferenceTable, XteaKey};

#[derive(Debug, Clone)]
struct StoredFile {
    payload: Vec<u8>,
    key: Option<XteaKey>,
}

/// A `CacheStore` backed by hash maps.
///
/// # Example
/// ```
/// use runedata::store::{CacheStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.insert_file(5, 0, Some("m50_50"), &[0u8; 4], None).unwrap();
/// assert_eq!(store.file_id(5, "m50_50").unwrap(), Some(0));
/// assert_eq!(store.read_data(5, 0, None).unwrap(), vec![0u8; 4]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: HashMap<(u8, u32), StoredFile>,
    tables: HashMap<u8, Arc<ReferenceTable>>,
    xteas: BTreeMap<u32, XteaKey>,
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, table: u8, file: u32, entry: ArchiveEntry) {
        Arc::make_mut(self.tables.entry(table).or_default()).insert(file, entry);
    }

    /// Store `data` as a single-child file, optionally named and encrypted.
    pub fn insert_file(
        &mut self,
        table: u8,
        file: u32,
        name: Option<&str>,
        data: &[u8],
        key: Option<XteaKey>,
    ) -> Result<()> {
        let payload = gzip(data)?;
        self.insert_raw(table, file, name, payload, key);
        Ok(())
    }

    /// Store a payload exactly as given, bypassing compression. A payload
    /// that is not a valid gzip stream reads back as `CorruptPayload`.
    pub fn insert_raw(
        &mut self,
        table: u8,
        file: u32,
        name: Option<&str>,
        payload: Vec<u8>,
        key: Option<XteaKey>,
    ) {
        let entry = match name {
            Some(name) => ArchiveEntry::single().named(name),
            None => ArchiveEntry::single(),
        };
        self.register(table, file, entry);
        self.files.insert((table, file), StoredFile { payload, key });
    }

    /// Store a multi-child archive. Children are keyed by id; ids may be
    /// sparse.
    pub fn insert_archive(
        &mut self,
        table: u8,
        archive: u32,
        children: &BTreeMap<u32, Vec<u8>>,
    ) -> Result<()> {
        let buffers: Vec<&[u8]> = children.values().map(Vec::as_slice).collect();
        let payload = gzip(&Archive::encode(&buffers))?;
        self.register(table, archive, ArchiveEntry::with_children(children.keys().copied()));
        self.files.insert((table, archive), StoredFile { payload, key: None });
        Ok(())
    }

    /// Store a region's landscape and object files under their conventional
    /// names and record its key. Returns the two file ids.
    pub fn insert_region(
        &mut self,
        x: u8,
        y: u8,
        landscape: &[u8],
        objects: &[u8],
        key: XteaKey,
    ) -> Result<(u32, u32)> {
        let table = IndexType::Regions.id();
        let map_file = self.next_file_id(table);
        self.insert_file(table, map_file, Some(&format!("m{x}_{y}")), landscape, None)?;
        let land_file = map_file + 1;
        self.insert_file(table, land_file, Some(&format!("l{x}_{y}")), objects, Some(key))?;
        self.insert_xtea((u32::from(x) << 8) | u32::from(y), key);
        Ok((map_file, land_file))
    }

    pub fn insert_xtea(&mut self, region: u32, key: XteaKey) {
        self.xteas.insert(region, key);
    }

    /// Next unused file id in `table`.
    pub fn next_file_id(&self, table: u8) -> u32 {
        self.tables.get(&table).map_or(0, |t| t.next_archive_id())
    }
}

impl CacheStore for MemoryStore {
    fn read_data(&self, table: u8, file: u32, key: Option<&XteaKey>) -> Result<Vec<u8>> {
        let stored = self
            .files
            .get(&(table, file))
            .ok_or(CacheError::MissingArchive {
                table,
                archive: file,
            })?;

        if let Some(expected) = &stored.key
            && key != Some(expected)
        {
            return Err(CacheError::CorruptPayload {
                table,
                file,
                reason: "decryption key mismatch".into(),
            });
        }

        let mut out = Vec::new();
        GzDecoder::new(stored.payload.as_slice())
            .read_to_end(&mut out)
            .map_err(|e| CacheError::CorruptPayload {
                table,
                file,
                reason: e.to_string(),
            })?;
        Ok(out)
    }

    fn reference_table(&self, table: u8) -> Result<Arc<ReferenceTable>> {
        Ok(self.tables.get(&table).cloned().unwrap_or_default())
    }

    fn xteas(&self) -> &BTreeMap<u32, XteaKey> {
        &self.xteas
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
