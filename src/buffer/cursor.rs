// Forward-only big-endian read cursor over a borrowed byte slice.
//
// Every read either consumes exactly its documented width or fails with
// `TruncatedData` and leaves the position untouched.

use crate::error::DecodeError;

use super::params::{self, Params};
use super::{smart, text};

type Result<T> = std::result::Result<T, DecodeError>;

/// Read cursor over a byte slice. All multi-byte reads are big-endian.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left after the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(DecodeError::TruncatedData {
                offset: self.pos,
                needed,
                remaining,
            });
        }
        Ok(())
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.data[self.pos])
    }

    /// Skip `n` bytes forward.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Read a slice of `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    /// Read a 3-byte unsigned "medium" integer.
    pub fn read_u24(&mut self) -> Result<u32> {
        let [a, b, c] = self.read_array()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a zero-terminated Windows-1252 string. The terminator is consumed.
    pub fn read_string(&mut self) -> Result<String> {
        let rest = &self.data[self.pos.min(self.data.len())..];
        let Some(end) = rest.iter().position(|&b| b == 0) else {
            return Err(DecodeError::TruncatedData {
                offset: self.pos,
                needed: rest.len() + 1,
                remaining: rest.len(),
            });
        };
        let value = text::decode_cp1252(&rest[..end]);
        self.pos += end + 1;
        Ok(value)
    }

    /// Read one Windows-1252 byte as a character.
    pub fn read_cp1252_char(&mut self) -> Result<char> {
        Ok(text::cp1252_char(self.read_u8()?))
    }

    /// Read a SmallSmart: 1 byte for 0..=127, otherwise 2 bytes minus 0x8000.
    pub fn read_small_smart(&mut self) -> Result<u16> {
        if self.peek_u8()? < 0x80 {
            Ok(u16::from(self.read_u8()?))
        } else {
            Ok(self.read_u16()? - smart::SMALL_SMART_OFFSET)
        }
    }

    /// Read a LargeSmart: a 2-byte form with a `0x7FFF` unset sentinel (-1),
    /// or a 4-byte form tagged by the top bit.
    pub fn read_large_smart(&mut self) -> Result<i32> {
        if self.peek_u8()? < 0x80 {
            let value = self.read_u16()?;
            if value == smart::LARGE_SMART_UNSET {
                Ok(-1)
            } else {
                Ok(i32::from(value))
            }
        } else {
            Ok(self.read_i32()? & i32::MAX)
        }
    }

    /// Read a SmartInt32: 1 byte for 0..=127, otherwise 4 bytes with the top
    /// bit used as the width tag.
    pub fn read_smart_i32(&mut self) -> Result<i32> {
        if self.peek_u8()? < 0x80 {
            Ok(i32::from(self.read_u8()?))
        } else {
            Ok(self.read_i32()? & i32::MAX)
        }
    }

    /// Read an opcode-249 params block.
    pub fn read_params(&mut self) -> Result<Params> {
        params::read_params(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_reads_are_big_endian() {
        let data = [0x01, 0x02, 0xFF, 0xFE, 0x0A, 0x0B, 0x0C, 0x80, 0, 0, 1];
        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_u16().unwrap(), 0x0102);
        assert_eq!(cur.read_i16().unwrap(), -2);
        assert_eq!(cur.read_u24().unwrap(), 0x0A0B0C);
        assert_eq!(cur.read_i32().unwrap(), i32::MIN + 1);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn truncated_read_does_not_advance() {
        let mut cur = ByteCursor::new(&[0x12]);
        let err = cur.read_u16().unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedData {
                offset: 0,
                needed: 2,
                remaining: 1
            }
        );
        assert_eq!(cur.position(), 0);
        assert_eq!(cur.read_u8().unwrap(), 0x12);
        assert!(cur.read_u8().is_err());
    }

    #[test]
    fn string_consumes_terminator() {
        let mut cur = ByteCursor::new(b"Take\0Drop\0");
        assert_eq!(cur.read_string().unwrap(), "Take");
        assert_eq!(cur.position(), 5);
        assert_eq!(cur.read_string().unwrap(), "Drop");
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn empty_string_is_one_byte() {
        let mut cur = ByteCursor::new(&[0, 7]);
        assert_eq!(cur.read_string().unwrap(), "");
        assert_eq!(cur.read_u8().unwrap(), 7);
    }

    #[test]
    fn unterminated_string_is_truncated() {
        let mut cur = ByteCursor::new(b"abc");
        assert!(matches!(
            cur.read_string(),
            Err(DecodeError::TruncatedData { offset: 0, .. })
        ));
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn small_smart_widths() {
        let mut cur = ByteCursor::new(&[0x00, 0x7F, 0x80, 0x80, 0xFF, 0xFF]);
        assert_eq!(cur.read_small_smart().unwrap(), 0);
        assert_eq!(cur.position(), 1);
        assert_eq!(cur.read_small_smart().unwrap(), 127);
        assert_eq!(cur.read_small_smart().unwrap(), 128);
        assert_eq!(cur.read_small_smart().unwrap(), 32767);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn small_smart_two_byte_form_needs_two_bytes() {
        let mut cur = ByteCursor::new(&[0x81]);
        assert!(cur.read_small_smart().is_err());
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn large_smart_sentinel_and_wide_form() {
        let mut cur = ByteCursor::new(&[0x7F, 0xFF, 0x01, 0x2C, 0x80, 0x01, 0x00, 0x00]);
        assert_eq!(cur.read_large_smart().unwrap(), -1);
        assert_eq!(cur.read_large_smart().unwrap(), 300);
        assert_eq!(cur.read_large_smart().unwrap(), 0x0001_0000);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn smart_i32_known_pairs() {
        let mut cur = ByteCursor::new(&[0x05, 0x80, 0x00, 0x00, 0x80, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(cur.read_smart_i32().unwrap(), 5);
        assert_eq!(cur.read_smart_i32().unwrap(), 128);
        assert_eq!(cur.read_smart_i32().unwrap(), i32::MAX);
        assert_eq!(cur.remaining(), 0);
    }
}
