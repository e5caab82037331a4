// Archive container: one decompressed file holding several child buffers.
//
// Layout for more than one child:
//
//   [chunk data ...][chunk 0 sizes][chunk 1 sizes]...[chunk count: u8]
//
// Each chunk stores one slice per child. A chunk's size table holds one i32
// per child, delta-encoded against the previous child's size in the same
// chunk. A child's bytes are the concatenation of its slices across chunks.
// A single-child archive is just the child's bytes.

use crate::buffer::ByteCursor;
use crate::error::{CacheError, Result};

/// Decoded archive: child buffers addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<Vec<u8>>,
}

fn malformed(reason: impl Into<String>) -> CacheError {
    CacheError::MalformedArchive {
        reason: reason.into(),
    }
}

impl Archive {
    /// Split `data` into `child_count` child buffers.
    pub fn decode(data: &[u8], child_count: usize) -> Result<Self> {
        match child_count {
            0 => return Ok(Self::default()),
            1 => {
                return Ok(Self {
                    entries: vec![data.to_vec()],
                });
            }
            _ => {}
        }

        let Some((&chunks, body)) = data.split_last() else {
            return Err(malformed("empty archive"));
        };
        let chunks = usize::from(chunks);
        let table_len = chunks
            .checked_mul(child_count)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| malformed("size table overflow"))?;
        let table_start = body.len().checked_sub(table_len).ok_or_else(|| {
            malformed(format!(
                "size table of {table_len} bytes exceeds archive length {}",
                body.len()
            ))
        })?;

        let mut sizes = ByteCursor::new(&body[table_start..]);
        let mut chunk_sizes = vec![0usize; chunks * child_count];
        let mut totals = vec![0usize; child_count];
        for chunk in 0..chunks {
            let mut size = 0i32;
            for child in 0..child_count {
                size = size.wrapping_add(sizes.read_i32()?);
                let len = usize::try_from(size).map_err(|_| {
                    malformed(format!("negative size {size} for child {child} in chunk {chunk}"))
                })?;
                chunk_sizes[chunk * child_count + child] = len;
                totals[child] += len;
            }
        }

        let total: usize = totals.iter().sum();
        if total > table_start {
            return Err(malformed(format!(
                "children need {total} bytes, archive holds {table_start}"
            )));
        }

        let mut entries: Vec<Vec<u8>> = totals.iter().map(|&n| Vec::with_capacity(n)).collect();
        let mut payload = ByteCursor::new(&body[..table_start]);
        for chunk in 0..chunks {
            for (child, entry) in entries.iter_mut().enumerate() {
                let len = chunk_sizes[chunk * child_count + child];
                let bytes = payload.read_bytes(len).map_err(|e| {
                    malformed(format!("child {child} in chunk {chunk}: {e}"))
                })?;
                entry.extend_from_slice(bytes);
            }
        }

        Ok(Self { entries })
    }

    /// Encode children as a single-chunk archive.
    pub fn encode<B: AsRef<[u8]>>(children: &[B]) -> Vec<u8> {
        if let [only] = children {
            return only.as_ref().to_vec();
        }
        let mut out: Vec<u8> = children
            .iter()
            .flat_map(|c| c.as_ref().iter().copied())
            .collect();
        let mut prev = 0i32;
        for child in children {
            let len = child.as_ref().len() as i32;
            out.extend_from_slice(&(len - prev).to_be_bytes());
            prev = len;
        }
        out.push(1);
        out
    }

    /// Child buffer at `index`.
    pub fn entry(&self, index: u32) -> Option<&[u8]> {
        self.entries.get(index as usize).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
