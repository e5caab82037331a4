//! Runedata: decoders for a legacy game client's binary cache content.
//!
//! The crate provides:
//! - Primitive big-endian codecs over a forward-only cursor (`buffer`)
//! - Opcode-tagged config records and the table materializer (`config`)
//! - Map region landscape and object-placement decoding (`region`)
//! - The storage interface the decoders consume, with an in-memory
//!   implementation (`store`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use runedata::config::{ConfigKind, Definition, VarbitDefinition};
//! use runedata::store::{IndexType, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let children = BTreeMap::from([(7, vec![1, 0x01, 0x2C, 0, 3, 0])]);
//! store
//!     .insert_archive(IndexType::Configs.id(), ConfigKind::Varbit.archive(), &children)
//!     .unwrap();
//!
//! let varbits = VarbitDefinition::load(&store).unwrap();
//! assert_eq!(varbits[&7].varp, 300);
//! assert_eq!(varbits[&7].msb, 3);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod region;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{CacheError, DecodeError, Result};
