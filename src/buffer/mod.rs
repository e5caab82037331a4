// Primitive codecs over a forward-only byte cursor.
//
// # Modules
//
// - `cursor` — `ByteCursor`: fixed-width reads, strings, smart decoders
// - `smart`  — SmallSmart / LargeSmart / SmartInt32 encoders and constants
// - `text`   — Windows-1252 string decoding
// - `params` — opcode-249 key/value params block

pub mod cursor;
pub mod params;
pub mod smart;
pub mod text;

pub use cursor::ByteCursor;
pub use params::{ParamValue, Params};
