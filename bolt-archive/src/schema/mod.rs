//! Declarative field schemas
//!
//! A [`ResourceSchema`] is an ordered list of [`FieldDescriptor`]s applied
//! either once to the whole resource or repeatedly to fixed-size records.
//! The [`registry`] maps resource type codes to their schemas.

mod field;
pub mod registry;


pub use field::{
    FieldDescriptor, FieldKind, FieldValue, NameTable, UNKNOWN_NAME, lookup, read_i16, read_u8,
    read_u16, read_u32,
};
pub use registry::{ResourceType, describe_resource};

use serde::Serialize;

use crate::error::Result;

/// How a schema's fields map onto the resource bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Fields are read once, at offsets from the start of the resource
    Record,
    /// The resource is a sequence of `stride`-byte records, each read with
    /// offsets relative to its own start
    Array { stride: usize },
}

/// Field list for one resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    pub title: &'static str,
    pub layout: Layout,
    pub fields: Vec<FieldDescriptor>,
}

impl ResourceSchema {
    pub fn record(title: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title,
            layout: Layout::Record,
            fields,
        }
    }

    pub fn array(title: &'static str, stride: usize, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title,
            layout: Layout::Array { stride },
            fields,
        }
    }

    /// Decode every field of `data`.
    ///
    /// Array resources yield `data.len() / stride` records; trailing bytes
    /// that do not fill a record are ignored.
    ///
    /// # Errors
    /// [`crate::BoltError::Truncated`] when a field lies past the end of its
    /// record or resource
    pub fn describe(&self, data: &[u8]) -> Result<Description> {
        let body = match self.layout {
            Layout::Record => Body::Record(self.read_fields(data)?),
            Layout::Array { stride } => {
                if stride == 0 {
                    Body::Array(Vec::new())
                } else {
                    if data.len() % stride != 0 {
                        tracing::warn!(
                            len = data.len(),
                            stride,
                            "{} has {} trailing bytes",
                            self.title,
                            data.len() % stride
                        );
                    }
                    let records = data
                        .chunks_exact(stride)
                        .map(|record| self.read_fields(record))
                        .collect::<Result<Vec<_>>>()?;
                    Body::Array(records)
                }
            }
        };

        Ok(Description {
            title: self.title,
            body,
        })
    }

    fn read_fields(&self, data: &[u8]) -> Result<Vec<Field>> {
        self.fields
            .iter()
            .map(|desc| {
                Ok(Field {
                    name: desc.name.to_string(),
                    value: desc.read(data)?,
                })
            })
            .collect()
    }
}

/// One decoded field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// Decoded fields of a whole resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub title: &'static str,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Record(Vec<Field>),
    Array(Vec<Vec<Field>>),
}

impl Description {
    /// Flatten to `(name, display value)` pairs. Array records are prefixed
    /// with their index, e.g. `[2] Value`.
    pub fn entries(&self) -> Vec<(String, String)> {
        match &self.body {
            Body::Record(fields) => fields
                .iter()
                .map(|f| (f.name.clone(), f.value.to_string()))
                .collect(),
            Body::Array(records) => records
                .iter()
                .enumerate()
                .flat_map(|(i, fields)| {
                    fields
                        .iter()
                        .map(move |f| (format!("[{i}] {}", f.name), f.value.to_string()))
                })
                .collect(),
        }
    }
}
