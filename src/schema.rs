//! Schema model: the generation-time description of packages, structs and
//! fields that a codec is produced from.
//!
//! At runtime only the per-package ceilings survive, as associated constants
//! on [Record](crate::Record) implementations. The model is kept here so a
//! schema frontend has one validated contract to hand over: indices within
//! range and unique, list flags only on list-capable types, struct
//! references resolvable within the package.

use crate::record::{DEFAULT_LIST_MAX, DEFAULT_SIZE_MAX, INDEX_MAX};
use thiserror::Error;

/// A schema violation found by [Package::validate].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("package {0}: size_max must be positive")]
    InvalidSizeMax(String),
    #[error("package {0}: list_max must be positive")]
    InvalidListMax(String),
    #[error("{0}: duplicate struct name")]
    DuplicateStruct(String),
    #[error("{field}: index {index} exceeds 126")]
    IndexOutOfRange { field: String, index: u8 },
    #[error("{field}: index {index} already in use")]
    DuplicateIndex { field: String, index: u8 },
    #[error("{0}: type does not support lists")]
    ListUnsupported(String),
    #[error("{0}: struct fields need a target struct")]
    MissingStructRef(String),
    #[error("{field}: unknown struct {target}")]
    DanglingStructRef { field: String, target: String },
}

/// The primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int32,
    Int64,
    Float32,
    Float64,
    Timestamp,
    Text,
    Binary,
    Struct,
}

impl Kind {
    /// Whether fields of this type may carry the list flag.
    pub fn supports_list(&self) -> bool {
        matches!(
            self,
            Kind::Float32 | Kind::Float64 | Kind::Text | Kind::Binary | Kind::Struct
        )
    }
}

/// A named collection of structs sharing the two wire ceilings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    /// Ceiling on any record's serial size, in bytes.
    pub size_max: usize,
    /// Ceiling on any list's element count.
    pub list_max: usize,
    pub structs: Vec<Struct>,
}

/// A record type: an ordered set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub name: String,
    pub fields: Vec<Field>,
}

/// One field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// The wire index, in `[0, 126]`; 127 is the record sentinel.
    pub index: u8,
    pub kind: Kind,
    pub is_list: bool,
    /// The target struct's name, for [Kind::Struct] fields.
    pub struct_ref: Option<String>,
}

impl Package {
    /// A package with the default ceilings and no structs yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_max: DEFAULT_SIZE_MAX,
            list_max: DEFAULT_LIST_MAX,
            structs: Vec::new(),
        }
    }

    /// Checks every schema invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), Error> {
        if self.size_max == 0 {
            return Err(Error::InvalidSizeMax(self.name.clone()));
        }
        if self.list_max == 0 {
            return Err(Error::InvalidListMax(self.name.clone()));
        }

        for (i, s) in self.structs.iter().enumerate() {
            if self.structs[..i].iter().any(|prev| prev.name == s.name) {
                return Err(Error::DuplicateStruct(self.qualify(&s.name)));
            }
            self.validate_struct(s)?;
        }
        Ok(())
    }

    fn validate_struct(&self, s: &Struct) -> Result<(), Error> {
        let mut seen = 0u128;
        for f in &s.fields {
            let field = format!("{}.{}", self.qualify(&s.name), f.name);
            if f.index > INDEX_MAX {
                return Err(Error::IndexOutOfRange {
                    field,
                    index: f.index,
                });
            }
            let bit = 1u128 << f.index;
            if seen & bit != 0 {
                return Err(Error::DuplicateIndex {
                    field,
                    index: f.index,
                });
            }
            seen |= bit;

            if f.is_list && !f.kind.supports_list() {
                return Err(Error::ListUnsupported(field));
            }
            match (&f.kind, &f.struct_ref) {
                (Kind::Struct, None) => return Err(Error::MissingStructRef(field)),
                (Kind::Struct, Some(target)) => {
                    if !self.structs.iter().any(|c| &c.name == target) {
                        return Err(Error::DanglingStructRef {
                            field,
                            target: target.clone(),
                        });
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.name, name)
    }
}
