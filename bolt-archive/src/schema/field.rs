//! Field descriptors and their decoded values

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BoltError, Result};
use crate::ids::{BltId, ResourceId};

/// Code-to-name table for enumerated fields
pub type NameTable = &'static [(u16, &'static str)];

/// Name used for codes missing from a [`NameTable`]
pub const UNKNOWN_NAME: &str = "Unknown";

/// How a field's bytes are read and displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I8,
    /// u8 shown as 2 hex digits
    X8,
    U16,
    I16,
    /// u16 shown as 4 hex digits
    X16,
    U32,
    I32,
    /// u32 shown as 8 hex digits
    X32,
    /// Two i16 values
    Pair,
    /// left, right, top, bottom as i16
    Rect,
    /// 16-bit resource id
    ShortResId,
    /// 32-bit resource id
    LongResId,
    /// u16 quantity followed by a 16-bit base id
    ShortResListId,
    /// u16 quantity followed by a 32-bit base id
    LongResListId,
    /// u8 code looked up in a name table
    Named8(NameTable),
    /// u16 code looked up in a name table
    Named16(NameTable),
    /// Literal text supplied with the descriptor
    Custom(String),
}

impl FieldKind {
    /// Build a kind from its textual tag. `custom` supplies the literal for
    /// the `custom` tag.
    ///
    /// # Errors
    /// [`BoltError::Schema`] for unknown tags, or `custom` without a literal
    pub fn from_tag(tag: &str, custom: Option<&str>) -> Result<Self> {
        match (tag, custom) {
            ("custom", Some(text)) => Ok(FieldKind::Custom(text.to_string())),
            ("custom", None) => Err(BoltError::Schema("custom (missing literal)".into())),
            _ => tag.parse(),
        }
    }

    /// Number of bytes read from the resource
    pub fn width(&self) -> usize {
        match self {
            FieldKind::U8 | FieldKind::I8 | FieldKind::X8 | FieldKind::Named8(_) => 1,
            FieldKind::U16
            | FieldKind::I16
            | FieldKind::X16
            | FieldKind::ShortResId
            | FieldKind::Named16(_) => 2,
            FieldKind::U32
            | FieldKind::I32
            | FieldKind::X32
            | FieldKind::Pair
            | FieldKind::LongResId
            | FieldKind::ShortResListId => 4,
            FieldKind::LongResListId => 6,
            FieldKind::Rect => 8,
            FieldKind::Custom(_) => 0,
        }
    }
}

impl FromStr for FieldKind {
    type Err = BoltError;

    fn from_str(tag: &str) -> Result<Self> {
        Ok(match tag {
            "u8" => FieldKind::U8,
            "i8" => FieldKind::I8,
            "x8" => FieldKind::X8,
            "u16" => FieldKind::U16,
            "i16" => FieldKind::I16,
            "x16" => FieldKind::X16,
            "u32" => FieldKind::U32,
            "i32" => FieldKind::I32,
            "x32" => FieldKind::X32,
            "i16-pair" => FieldKind::Pair,
            "rect" => FieldKind::Rect,
            "short-res-id" => FieldKind::ShortResId,
            "long-res-id" => FieldKind::LongResId,
            "short-reslist-id" => FieldKind::ShortResListId,
            "long-reslist-id" => FieldKind::LongResListId,
            other => return Err(BoltError::Schema(other.to_string())),
        })
    }
}

/// A named field at a fixed byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: Cow<'static, str>,
    pub kind: FieldKind,
    pub offset: usize,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind, offset: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            offset,
        }
    }

    /// Field carrying literal text rather than resource bytes
    pub fn custom(name: impl Into<Cow<'static, str>>, text: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Custom(text.into()), 0)
    }

    /// Read this field from `data` (big-endian).
    ///
    /// # Errors
    /// [`BoltError::Truncated`] if the field extends past the end of `data`
    pub fn read(&self, data: &[u8]) -> Result<FieldValue> {
        let at = self.offset;
        Ok(match &self.kind {
            FieldKind::U8 => FieldValue::Unsigned(read_u8(data, at)? as u32),
            FieldKind::I8 => FieldValue::Signed(read_u8(data, at)? as i8 as i32),
            FieldKind::X8 => FieldValue::hex(read_u8(data, at)? as u32, 2),
            FieldKind::U16 => FieldValue::Unsigned(read_u16(data, at)? as u32),
            FieldKind::I16 => FieldValue::Signed(read_i16(data, at)? as i32),
            FieldKind::X16 => FieldValue::hex(read_u16(data, at)? as u32, 4),
            FieldKind::U32 => FieldValue::Unsigned(read_u32(data, at)?),
            FieldKind::I32 => FieldValue::Signed(read_u32(data, at)? as i32),
            FieldKind::X32 => FieldValue::hex(read_u32(data, at)?, 8),
            FieldKind::Pair => FieldValue::Pair {
                x: read_i16(data, at)?,
                y: read_i16(data, at + 2)?,
            },
            FieldKind::Rect => FieldValue::Rect {
                left: read_i16(data, at)?,
                right: read_i16(data, at + 2)?,
                top: read_i16(data, at + 4)?,
                bottom: read_i16(data, at + 6)?,
            },
            FieldKind::ShortResId => FieldValue::ShortRef(ResourceId(read_u16(data, at)?)),
            FieldKind::LongResId => FieldValue::LongRef(BltId(read_u32(data, at)?)),
            FieldKind::ShortResListId => FieldValue::ShortRefList {
                count: read_u16(data, at)?,
                id: ResourceId(read_u16(data, at + 2)?),
            },
            FieldKind::LongResListId => FieldValue::LongRefList {
                count: read_u16(data, at)?,
                id: BltId(read_u32(data, at + 2)?),
            },
            FieldKind::Named8(table) => FieldValue::Text(lookup(table, read_u8(data, at)? as u16)),
            FieldKind::Named16(table) => FieldValue::Text(lookup(table, read_u16(data, at)?)),
            FieldKind::Custom(text) => FieldValue::Text(text.clone()),
        })
    }
}

/// Name for `code`, or "Unknown"
pub fn lookup(table: NameTable, code: u16) -> String {
    table
        .iter()
        .find(|&&(c, _)| c == code)
        .map_or(UNKNOWN_NAME, |&(_, name)| name)
        .to_string()
}

/// Decoded field value. `Display` gives the viewer's text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Unsigned(u32),
    Signed(i32),
    Hex {
        value: u32,
        digits: usize,
    },
    Pair {
        x: i16,
        y: i16,
    },
    Rect {
        left: i16,
        top: i16,
        right: i16,
        bottom: i16,
    },
    ShortRef(ResourceId),
    LongRef(BltId),
    ShortRefList {
        id: ResourceId,
        count: u16,
    },
    LongRefList {
        id: BltId,
        count: u16,
    },
    Text(String),
}

impl FieldValue {
    fn hex(value: u32, digits: usize) -> Self {
        FieldValue::Hex { value, digits }
    }

    /// Resource referenced by this value, if any
    pub fn reference(&self) -> Option<ResourceId> {
        match self {
            FieldValue::ShortRef(id) | FieldValue::ShortRefList { id, .. } => Some(*id),
            FieldValue::LongRef(id) | FieldValue::LongRefList { id, .. } => id.resolve().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsigned(v) => write!(f, "{v}"),
            FieldValue::Signed(v) => write!(f, "{v}"),
            FieldValue::Hex { value, digits } => write!(f, "{:0width$X}", value, width = *digits),
            FieldValue::Pair { x, y } => write!(f, "({x}, {y})"),
            FieldValue::Rect {
                left,
                top,
                right,
                bottom,
            } => write!(f, "({left}, {top}), ({right}, {bottom})"),
            FieldValue::ShortRef(id) => write!(f, "{id}"),
            FieldValue::LongRef(id) => write!(f, "{id}"),
            FieldValue::ShortRefList { id, count } => write!(f, "{id} x {count}"),
            FieldValue::LongRefList { id, count } => write!(f, "{id} x {count}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

fn bytes<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(BoltError::Truncated {
            offset,
            len: N,
            size: data.len(),
        })
}

pub fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    Ok(bytes::<1>(data, offset)?[0])
}

pub fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    bytes(data, offset).map(u16::from_be_bytes)
}

pub fn read_i16(data: &[u8], offset: usize) -> Result<i16> {
    bytes(data, offset).map(i16::from_be_bytes)
}

pub fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    bytes(data, offset).map(u32::from_be_bytes)
}
