// Variable-width "smart" integer encodings.
//
// Three distinct big-endian codecs, all keyed on the high bit of the first
// byte:
//
// - SmallSmart: 0..=127 in one byte, 128..=32767 in two bytes (+0x8000).
//   Used for delta streams where 0 terminates a loop.
// - LargeSmart: u16 in two bytes with 0x7FFF meaning "unset" (-1), or a
//   31-bit value in four bytes with the top bit set.
// - SmartInt32: 0..=127 in one byte, otherwise a 31-bit value in four bytes
//   with the top bit set.
//
// Decoding lives on `ByteCursor`; this module holds the encoders and the
// width helpers they share.

/// Added to two-byte SmallSmart values to set the width bit.
pub const SMALL_SMART_OFFSET: u16 = 0x8000;

/// Largest value a SmallSmart can carry.
pub const SMALL_SMART_MAX: u16 = 0x7FFF;

/// Two-byte LargeSmart pattern that decodes to -1.
pub const LARGE_SMART_UNSET: u16 = 0x7FFF;

/// Width tag for four-byte forms.
const WIDE_TAG: u32 = 0x8000_0000;

// ---------------------------------------------------------------------------
// SmallSmart
// ---------------------------------------------------------------------------

/// Append a SmallSmart. Returns `None` if `value` exceeds [`SMALL_SMART_MAX`].
pub fn encode_small_smart(value: u16, out: &mut Vec<u8>) -> Option<usize> {
    if value < 0x80 {
        out.push(value as u8);
        Some(1)
    } else if value <= SMALL_SMART_MAX {
        out.extend_from_slice(&(value + SMALL_SMART_OFFSET).to_be_bytes());
        Some(2)
    } else {
        None
    }
}

/// Encoded byte-length of a SmallSmart value.
#[inline]
pub fn sizeof_small_smart(value: u16) -> usize {
    if value < 0x80 { 1 } else { 2 }
}

// ---------------------------------------------------------------------------
// LargeSmart
// ---------------------------------------------------------------------------

/// Append a LargeSmart.
///
/// `-1` is written as the two-byte unset sentinel. Values below `0x7FFF`
/// take two bytes; larger values take four. Other negatives are not
/// representable and return `None`.
pub fn encode_large_smart(value: i32, out: &mut Vec<u8>) -> Option<usize> {
    match value {
        -1 => {
            out.extend_from_slice(&LARGE_SMART_UNSET.to_be_bytes());
            Some(2)
        }
        v if v < 0 => None,
        v if v < i32::from(LARGE_SMART_UNSET) => {
            out.extend_from_slice(&(v as u16).to_be_bytes());
            Some(2)
        }
        v => {
            out.extend_from_slice(&(v as u32 | WIDE_TAG).to_be_bytes());
            Some(4)
        }
    }
}

// ---------------------------------------------------------------------------
// SmartInt32
// ---------------------------------------------------------------------------

/// Append a SmartInt32. Negative values are not representable.
pub fn encode_smart_i32(value: i32, out: &mut Vec<u8>) -> Option<usize> {
    if value < 0 {
        None
    } else if value < 0x80 {
        out.push(value as u8);
        Some(1)
    } else {
        out.extend_from_slice(&(value as u32 | WIDE_TAG).to_be_bytes());
        Some(4)
    }
}

/// Encoded byte-length of a non-negative SmartInt32 value.
#[inline]
pub fn sizeof_smart_i32(value: i32) -> usize {
    if (0..0x80).contains(&value) { 1 } else { 4 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
