// Loading every keyed region from a cache store.
//
// The key set drives the load: a region is attempted only if the store has
// a decryption key for it, and skipped quietly if either of its two files
// is not registered. Per-region damage is tolerated:
//
// - an unreadable object file keeps the landscape with no objects
// - a stream that does not decode drops that region
//
// Anything else (storage failures on the landscape file, missing archives
// behind a registered name) aborts the load.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::buffer::ByteCursor;
use crate::error::{CacheError, Result};
use crate::store::{CacheStore, IndexType, XteaKey};

use super::{RegionDefinition, region_coords};

/// Shared flag for stopping a region load between regions.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Load every region the store holds a key for, ordered by region id.
pub fn load_regions<S: CacheStore + ?Sized>(store: &S) -> Result<Vec<RegionDefinition>> {
    load_regions_with(store, &CancelToken::new())
}

/// As [`load_regions`], returning [`CacheError::Cancelled`] once `cancel`
/// fires. The flag is checked before each region.
pub fn load_regions_with<S: CacheStore + ?Sized>(
    store: &S,
    cancel: &CancelToken,
) -> Result<Vec<RegionDefinition>> {
    let keys: Vec<(u32, &XteaKey)> = store.xteas().iter().map(|(&id, key)| (id, key)).collect();

    let load_one = |&(id, key): &(u32, &XteaKey)| -> Result<Option<RegionDefinition>> {
        if cancel.is_cancelled() {
            return Err(CacheError::Cancelled);
        }
        load_region(store, id, key)
    };

    #[cfg(feature = "parallel")]
    let loaded: Vec<Result<Option<RegionDefinition>>> = keys.par_iter().map(load_one).collect();
    #[cfg(not(feature = "parallel"))]
    let loaded = keys.iter().map(load_one);

    let regions = loaded
        .into_iter()
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "loaded {} of {} keyed region(s)",
        regions.len(),
        keys.len()
    );
    Ok(regions)
}

fn load_region<S: CacheStore + ?Sized>(
    store: &S,
    id: u32,
    key: &XteaKey,
) -> Result<Option<RegionDefinition>> {
    let table = IndexType::Regions.id();
    let (x, y) = region_coords(id);

    let Some(map_file) = store.file_id(table, &format!("m{x}_{y}"))? else {
        return Ok(None);
    };
    let Some(land_file) = store.file_id(table, &format!("l{x}_{y}"))? else {
        return Ok(None);
    };

    let mut region = RegionDefinition::new(x, y);
    let landscape = store.read_data(table, map_file, None)?;
    if let Err(e) = region.decode_landscape(&mut ByteCursor::new(&landscape)) {
        warn!("region {id} ({x}, {y}): dropped, landscape: {e}");
        return Ok(None);
    }

    match store.read_data(table, land_file, Some(key)) {
        Ok(objects) => {
            if let Err(e) = region.decode_objects(&mut ByteCursor::new(&objects)) {
                warn!("region {id} ({x}, {y}): dropped, objects: {e}");
                return Ok(None);
            }
        }
        Err(CacheError::CorruptPayload { reason, .. }) => {
            warn!("region {id} ({x}, {y}): objects unreadable, keeping landscape: {reason}");
        }
        Err(e) => return Err(e),
    }

    Ok(Some(region))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
