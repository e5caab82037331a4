// Windows-1252 decoding for cache strings.
//
// Bytes 0x80..=0x9F map through the CP1252 extension table; the five code
// points CP1252 leaves undefined become '?'. Everything else is Latin-1.

const CP1252_EXTENSION: [char; 32] = [
    '\u{20AC}', '\0', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\0', '\u{017D}', '\0',
    '\0', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\0', '\u{017E}', '\u{0178}',
];

/// Decode one CP1252 byte.
pub fn cp1252_char(byte: u8) -> char {
    match byte {
        0x80..=0x9F => match CP1252_EXTENSION[usize::from(byte - 0x80)] {
            '\0' => '?',
            c => c,
        },
        b => char::from(b),
    }
}

/// Decode a CP1252 byte string.
pub fn decode_cp1252(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| cp1252_char(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode_cp1252(b"Abyssal whip"), "Abyssal whip");
    }

    #[test]
    fn extension_range() {
        assert_eq!(cp1252_char(0x80), '€');
        assert_eq!(cp1252_char(0x99), '™');
        assert_eq!(cp1252_char(0x81), '?');
        assert_eq!(cp1252_char(0xE9), 'é');
    }
}
