// Table materializer: one config archive to an id-ordered record table.
//
// The reference table says which child ids exist below the archive's
// capacity and where each one sits in the decoded archive. Ids without a
// child are skipped. Any decode failure abandons the whole table.

use std::collections::BTreeMap;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::buffer::ByteCursor;
use crate::error::{CacheError, DecodeError, Result};
use crate::store::{Archive, CacheStore};

use super::Definition;

/// Decoded records of one kind, ordered by id.
pub type RecordTable<T> = BTreeMap<u32, T>;

/// Decode every child of archive `archive` in `table` with `decode`.
pub fn materialize<S, T, F>(store: &S, table: u8, archive: u32, decode: F) -> Result<RecordTable<T>>
where
    S: CacheStore + ?Sized,
    T: Definition,
    F: Fn(u32, &mut ByteCursor<'_>) -> Result<T, DecodeError> + Sync,
{
    let reference = store.reference_table(table)?;
    let entry = reference
        .entry(archive)
        .ok_or(CacheError::MissingArchive { table, archive })?;

    let data = store.read_data(table, archive, None)?;
    let children = Archive::decode(&data, entry.child_count())?;

    let decode_one = |id: u32| -> Result<Option<(u32, T)>> {
        let Some(child) = entry.child(id) else {
            return Ok(None);
        };
        let bytes = children.entry(child.index).ok_or(CacheError::MissingEntry {
            archive,
            index: child.index,
        })?;
        let record = decode(id, &mut ByteCursor::new(bytes)).map_err(|source| CacheError::Record {
            kind: T::KIND,
            id,
            source,
        })?;
        Ok(Some((id, record)))
    };

    #[cfg(feature = "parallel")]
    let decoded: Vec<Result<Option<(u32, T)>>> =
        (0..entry.capacity).into_par_iter().map(decode_one).collect();
    #[cfg(not(feature = "parallel"))]
    let decoded = (0..entry.capacity).map(decode_one);

    // Collecting in id order keeps the reported error the lowest failing id.
    let records = decoded
        .into_iter()
        .filter_map(Result::transpose)
        .collect::<Result<RecordTable<T>>>()?;

    debug!(
        "{}: {} record(s) from table {table} archive {archive}",
        T::KIND,
        records.len()
    );
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigKind, VarbitDefinition};
    use crate::store::{IndexType, MemoryStore};

    fn varbit_store(children: &[(u32, Vec<u8>)]) -> MemoryStore {
        let mut store = MemoryStore::new();
        let children: BTreeMap<u32, Vec<u8>> = children.iter().cloned().collect();
        store
            .insert_archive(
                IndexType::Configs.id(),
                ConfigKind::Varbit.archive(),
                &children,
            )
            .unwrap();
        store
    }

    #[test]
    fn sparse_ids_are_skipped() {
        let store = varbit_store(&[
            (0, vec![1, 0, 10, 0, 3, 0]),
            (2, vec![0]),
            (4, vec![1, 0, 20, 4, 7, 0]),
        ]);
        let table = VarbitDefinition::load(&store).unwrap();
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(table[&0].varp, 10);
        assert_eq!(table[&4].lsb, 4);
        assert_eq!(table[&4].msb, 7);
        assert_eq!(table[&2].id, 2);
    }

    #[test]
    fn one_bad_record_fails_the_table() {
        let store = varbit_store(&[(0, vec![0]), (1, vec![1, 0]), (2, vec![9, 0])]);
        let err = VarbitDefinition::load(&store).unwrap_err();
        match err {
            CacheError::Record { kind, id, source } => {
                assert_eq!(kind, ConfigKind::Varbit);
                assert_eq!(id, 1);
                assert!(matches!(source, DecodeError::TruncatedData { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_archive() {
        let store = MemoryStore::new();
        assert!(matches!(
            VarbitDefinition::load(&store),
            Err(CacheError::MissingArchive { table: 2, archive: 14 })
        ));
    }

    #[test]
    fn single_child_archive() {
        let store = varbit_store(&[(3, vec![1, 0, 1, 2, 5, 0])]);
        let table = VarbitDefinition::load(&store).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[&3].lsb, 2);
    }
}
