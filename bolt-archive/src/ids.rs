//! Resource identifiers
//!
//! A resource is addressed by two bytes: `<directory number> <resource number>`.
//! Resource 0x9D01 is resource 1 of directory 0x9D. Resources that refer to
//! other resources use the 32-bit long form, whose high half is the short id
//! and whose low half is an offset that is always zero in shipped archives.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BoltError, Result};

/// 16-bit resource id: directory index in the high byte, resource index in the low byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(pub u16);

impl ResourceId {
    pub fn new(directory: u8, resource: u8) -> Self {
        Self(((directory as u16) << 8) | resource as u16)
    }

    pub fn directory(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn resource(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = BoltError;

    /// Parses the textual form: four hex digits, optionally prefixed with `0x`.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > 4 {
            return Err(BoltError::Format(format!("invalid resource id '{s}'")));
        }
        u16::from_str_radix(digits, 16)
            .map(ResourceId)
            .map_err(|_| BoltError::Format(format!("invalid resource id '{s}'")))
    }
}

impl From<u16> for ResourceId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// 32-bit resource reference as stored inside resource payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BltId(pub u32);

impl BltId {
    /// Reference meaning "no resource"
    pub const NONE: BltId = BltId(0xFFFF_FFFF);

    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    pub fn short_id(self) -> ResourceId {
        ResourceId((self.0 >> 16) as u16)
    }

    pub fn offset(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// Resolve to a loadable short id. Only zero offsets address a whole resource.
    pub fn resolve(self) -> Result<ResourceId> {
        if !self.is_valid() {
            return Err(BoltError::out_of_range("resource reference", self.0 as usize, 0));
        }
        if self.offset() != 0 {
            return Err(BoltError::out_of_range(
                "resource offset",
                self.offset() as usize,
                1,
            ));
        }
        Ok(self.short_id())
    }
}

impl From<ResourceId> for BltId {
    fn from(id: ResourceId) -> Self {
        BltId((id.0 as u32) << 16)
    }
}

impl fmt::Display for BltId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}
