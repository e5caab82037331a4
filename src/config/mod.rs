// Opcode-tagged config records.
//
// Every record kind is an independent struct implementing `Definition`.
// A record's bytes are a sequence of (opcode, payload) pairs closed by
// opcode 0; each kind owns its opcode table and rejects anything outside
// it. `ConfigKind` is the registry tying a kind to its archive slot and
// decoder.
//
// # Modules
//
// - `table`    — materializing a whole archive into a `RecordTable`
// - `enums`, `hitbar`, `hitmark`, `identkit`, `item`, `npc`, `object`,
//   `param`, `sequence`, `spotanim`, `varbit` — the record kinds

pub mod enums;
pub mod hitbar;
pub mod hitmark;
pub mod identkit;
pub mod item;
pub mod npc;
pub mod object;
pub mod param;
pub mod sequence;
pub mod spotanim;
pub mod table;
pub mod varbit;

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::error::{DecodeError, Result};
use crate::store::{CacheStore, IndexType};

pub use enums::EnumDefinition;
pub use hitbar::HitBarDefinition;
pub use hitmark::HitMarkDefinition;
pub use identkit::IdentKitDefinition;
pub use item::ItemDefinition;
pub use npc::NpcDefinition;
pub use object::ObjectDefinition;
pub use param::ParamDefinition;
pub use sequence::SequenceDefinition;
pub use spotanim::SpotAnimDefinition;
pub use table::{RecordTable, materialize};
pub use varbit::VarbitDefinition;

// ---------------------------------------------------------------------------
// Kind registry
// ---------------------------------------------------------------------------

/// The config record kinds, each stored in its own archive of the config
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    IdentKit,
    Object,
    Enum,
    Npc,
    Item,
    Param,
    Sequence,
    SpotAnim,
    Varbit,
    HitMark,
    HitBar,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 11] = [
        Self::IdentKit,
        Self::Object,
        Self::Enum,
        Self::Npc,
        Self::Item,
        Self::Param,
        Self::Sequence,
        Self::SpotAnim,
        Self::Varbit,
        Self::HitMark,
        Self::HitBar,
    ];

    /// Archive slot inside the config table.
    pub const fn archive(self) -> u32 {
        match self {
            Self::IdentKit => 3,
            Self::Object => 6,
            Self::Enum => 8,
            Self::Npc => 9,
            Self::Item => 10,
            Self::Param => 11,
            Self::Sequence => 12,
            Self::SpotAnim => 13,
            Self::Varbit => 14,
            Self::HitMark => 32,
            Self::HitBar => 33,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::IdentKit => "identkit",
            Self::Object => "object",
            Self::Enum => "enum",
            Self::Npc => "npc",
            Self::Item => "item",
            Self::Param => "param",
            Self::Sequence => "sequence",
            Self::SpotAnim => "spotanim",
            Self::Varbit => "varbit",
            Self::HitMark => "hitmark",
            Self::HitBar => "hitbar",
        }
    }

    /// Decode one record of this kind.
    pub fn decode_any(self, id: u32, data: &[u8]) -> Result<AnyDefinition, DecodeError> {
        let mut buf = ByteCursor::new(data);
        let buf = &mut buf;
        Ok(match self {
            Self::IdentKit => AnyDefinition::IdentKit(IdentKitDefinition::decode(id, buf)?),
            Self::Object => AnyDefinition::Object(ObjectDefinition::decode(id, buf)?),
            Self::Enum => AnyDefinition::Enum(EnumDefinition::decode(id, buf)?),
            Self::Npc => AnyDefinition::Npc(NpcDefinition::decode(id, buf)?),
            Self::Item => AnyDefinition::Item(ItemDefinition::decode(id, buf)?),
            Self::Param => AnyDefinition::Param(ParamDefinition::decode(id, buf)?),
            Self::Sequence => AnyDefinition::Sequence(SequenceDefinition::decode(id, buf)?),
            Self::SpotAnim => AnyDefinition::SpotAnim(SpotAnimDefinition::decode(id, buf)?),
            Self::Varbit => AnyDefinition::Varbit(VarbitDefinition::decode(id, buf)?),
            Self::HitMark => AnyDefinition::HitMark(HitMarkDefinition::decode(id, buf)?),
            Self::HitBar => AnyDefinition::HitBar(HitBarDefinition::decode(id, buf)?),
        })
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| format!("unknown config kind '{s}'"))
    }
}

/// A decoded record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyDefinition {
    IdentKit(IdentKitDefinition),
    Object(ObjectDefinition),
    Enum(EnumDefinition),
    Npc(NpcDefinition),
    Item(ItemDefinition),
    Param(ParamDefinition),
    Sequence(SequenceDefinition),
    SpotAnim(SpotAnimDefinition),
    Varbit(VarbitDefinition),
    HitMark(HitMarkDefinition),
    HitBar(HitBarDefinition),
}

// ---------------------------------------------------------------------------
// Definition trait
// ---------------------------------------------------------------------------

/// A config record kind with its own opcode table.
pub trait Definition: Sized + Send {
    const KIND: ConfigKind;

    /// Decode one record. The cursor is left just past the closing opcode 0.
    fn decode(id: u32, buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError>;

    /// Decode every record of this kind from the config table.
    fn load<S: CacheStore + ?Sized>(store: &S) -> Result<RecordTable<Self>> {
        materialize(store, IndexType::Configs.id(), Self::KIND.archive(), Self::decode)
    }
}

/// Read opcodes until 0, handing each to `apply` with the cursor positioned
/// at its payload.
pub(crate) fn decode_opcodes<F>(
    buf: &mut ByteCursor<'_>,
    kind: ConfigKind,
    id: u32,
    mut apply: F,
) -> Result<(), DecodeError>
where
    F: FnMut(u8, &mut ByteCursor<'_>) -> Result<(), DecodeError>,
{
    let mut opcodes = 0usize;
    loop {
        match buf.read_u8()? {
            0 => {
                trace!("{kind} {id}: {opcodes} opcode(s), {} byte(s)", buf.position());
                return Ok(());
            }
            opcode => apply(opcode, buf)?,
        }
        opcodes += 1;
    }
}

pub(crate) fn unknown_opcode(kind: ConfigKind, opcode: u8) -> DecodeError {
    DecodeError::UnknownOpcode { kind, opcode }
}

// ---------------------------------------------------------------------------
// Shared field shapes
// ---------------------------------------------------------------------------

/// Parallel find/replace tables (colours or textures).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Remap<T> {
    pub find: Vec<T>,
    pub replace: Vec<T>,
}

impl Remap<u16> {
    /// u8 count, then `count` (find, replace) u16 pairs.
    pub(crate) fn read(buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let count = usize::from(buf.read_u8()?);
        let mut remap = Self {
            find: Vec::with_capacity(count),
            replace: Vec::with_capacity(count),
        };
        for _ in 0..count {
            remap.find.push(buf.read_u16()?);
            remap.replace.push(buf.read_u16()?);
        }
        Ok(remap)
    }
}

impl Remap<i16> {
    pub(crate) fn read_signed(buf: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let count = usize::from(buf.read_u8()?);
        let mut remap = Self {
            find: Vec::with_capacity(count),
            replace: Vec::with_capacity(count),
        };
        for _ in 0..count {
            remap.find.push(buf.read_i16()?);
            remap.replace.push(buf.read_i16()?);
        }
        Ok(remap)
    }
}

/// Variable-driven transformation table: the record reroutes to
/// `ids[value]` where `value` comes from `varbit` or `varp`; values past
/// the end use the last slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transforms {
    pub varbit: i32,
    pub varp: i32,
    pub ids: Vec<i32>,
}

impl Transforms {
    /// u16 varbit, u16 varp, [u16 default], u8 n, then n+1 u16 ids. The
    /// final slot holds the default, or -1 when the opcode carries none.
    pub(crate) fn read(buf: &mut ByteCursor<'_>, has_default: bool) -> Result<Self, DecodeError> {
        Self::read_with(buf, has_default, i32::from)
    }

    /// As [`Transforms::read`], with 65535 read as -1 everywhere.
    pub(crate) fn read_nullable(
        buf: &mut ByteCursor<'_>,
        has_default: bool,
    ) -> Result<Self, DecodeError> {
        Self::read_with(buf, has_default, |v| {
            if v == u16::MAX { -1 } else { i32::from(v) }
        })
    }

    fn read_with(
        buf: &mut ByteCursor<'_>,
        has_default: bool,
        map: fn(u16) -> i32,
    ) -> Result<Self, DecodeError> {
        let varbit = map(buf.read_u16()?);
        let varp = map(buf.read_u16()?);
        let fallback = if has_default { map(buf.read_u16()?) } else { -1 };
        let count = usize::from(buf.read_u8()?);
        let mut ids = Vec::with_capacity(count + 2);
        for _ in 0..=count {
            ids.push(map(buf.read_u16()?));
        }
        ids.push(fallback);
        Ok(Self { varbit, varp, ids })
    }
}

/// u8 count followed by that many u16 values.
pub(crate) fn read_u16_list(buf: &mut ByteCursor<'_>) -> Result<Vec<u16>, DecodeError> {
    let count = usize::from(buf.read_u8()?);
    (0..count).map(|_| buf.read_u16()).collect()
}

/// A right-click action; the literal "Hidden" clears the slot.
pub(crate) fn read_action(buf: &mut ByteCursor<'_>) -> Result<Option<String>, DecodeError> {
    let action = buf.read_string()?;
    Ok((action != "Hidden").then_some(action))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
