//! Serde model of the Anchor IDL document.
//!
//! This module defines the subset of the Anchor IDL document that the
//! generator consumes: instructions, accounts, composite types and the error
//! table. Field types form a closed set; a document using any shape outside
//! it fails to parse instead of producing broken bindings downstream.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

/// Errors raised while reading an IDL document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or uses an unknown field-type shape.
    #[error("failed to parse IDL JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document declares no program name to derive binding names from.
    #[error("IDL program name is empty")]
    EmptyProgramName,
}

/// Root IDL document.
#[derive(Debug, Clone, Deserialize)]
pub struct Idl {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlTypeDef>,
    #[serde(default)]
    pub types: Vec<IdlTypeDef>,
    #[serde(default)]
    pub errors: Vec<IdlErrorDef>,
}

impl Idl {
    /// Parse an IDL document from its JSON text.
    pub fn from_json(idl_json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(idl_json).map_err(SchemaError::Parse)
    }

    /// Look up an entry of the error table by its on-chain error code.
    pub fn error_for_code(&self, code: u32) -> Option<&IdlErrorDef> {
        self.errors.iter().find(|error| error.code == code)
    }
}

/// A named composite type or account layout.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlTypeSpec,
}

/// Body of a composite type: a struct with fields or an enum with variants.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeSpec {
    pub kind: IdlTypeKind,
    #[serde(default)]
    pub fields: Vec<IdlField>,
    #[serde(default)]
    pub variants: Vec<IdlField>,
}

impl IdlTypeSpec {
    /// The members the emitter renders: fields for structs, variants for
    /// enums (variants reuse the field shape, possibly without a type).
    pub fn members(&self) -> &[IdlField] {
        match self.kind {
            IdlTypeKind::Struct => &self.fields,
            IdlTypeKind::Enum => &self.variants,
        }
    }
}

/// Discriminant between the two composite kinds the schema declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdlTypeKind {
    Struct,
    Enum,
}

/// A named field; the type is absent for zero-payload enum variants.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<IdlType>,
}

/// One instruction declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<IdlInstructionAccount>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

/// An account an instruction touches. The mutability and signer flags are
/// part of the schema contract but not consumed by emission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlInstructionAccount {
    pub name: String,
    #[serde(default)]
    pub is_mut: bool,
    #[serde(default)]
    pub is_signer: bool,
}

/// One entry of the program's error table, carried verbatim for callers.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlErrorDef {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub msg: Option<String>,
}

/// A field type: the closed set of shapes an IDL document may use.
///
/// JSON forms are bare primitive names (`"bool"`, `"u64"`, `"publicKey"`, …)
/// or single-key objects (`{"defined": …}`, `{"option": …}`, `{"coption": …}`,
/// `{"vec": …}`, `{"array": [elem, size]}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdlType {
    Bool,
    Bytes,
    Str,
    PublicKey,
    /// Fixed-width integer; width is one of 8, 16, 32, 64, 128, 256.
    Int {
        width: u16,
        signed: bool,
    },
    /// Reference to a composite declared in the schema's type catalog.
    Defined(String),
    Vec(Box<IdlType>),
    Array(Box<IdlType>, usize),
    Option(Box<IdlType>),
    /// On-chain `COption`; schema-distinct from `Option` but rendered the
    /// same way by the resolver.
    COption(Box<IdlType>),
}

impl IdlType {
    /// Integer widths the schema admits.
    const INT_WIDTHS: [u16; 6] = [8, 16, 32, 64, 128, 256];

    fn from_primitive_name(name: &str) -> Option<Self> {
        match name {
            "bool" => return Some(Self::Bool),
            "bytes" => return Some(Self::Bytes),
            "string" => return Some(Self::Str),
            "publicKey" => return Some(Self::PublicKey),
            _ => {}
        }
        let (signed, digits) = if let Some(rest) = name.strip_prefix('u') {
            (false, rest)
        } else if let Some(rest) = name.strip_prefix('i') {
            (true, rest)
        } else {
            return None;
        };
        let width: u16 = digits.parse().ok()?;
        Self::INT_WIDTHS
            .contains(&width)
            .then_some(Self::Int { width, signed })
    }
}

impl<'de> Deserialize<'de> for IdlType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TypeVisitor;

        impl<'de> Visitor<'de> for TypeVisitor {
            type Value = IdlType;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an IDL primitive name or a single-key type object")
            }

            fn visit_str<E>(self, value: &str) -> Result<IdlType, E>
            where
                E: de::Error,
            {
                IdlType::from_primitive_name(value)
                    .ok_or_else(|| E::custom(format!("unknown IDL primitive type: {value}")))
            }

            fn visit_map<A>(self, mut map: A) -> Result<IdlType, A::Error>
            where
                A: MapAccess<'de>,
            {
                let Some(key) = map.next_key::<String>()? else {
                    return Err(de::Error::custom("IDL type object has no discriminant key"));
                };
                let ty = match key.as_str() {
                    "defined" => IdlType::Defined(map.next_value()?),
                    "option" => IdlType::Option(Box::new(map.next_value()?)),
                    "coption" => IdlType::COption(Box::new(map.next_value()?)),
                    "vec" => IdlType::Vec(Box::new(map.next_value()?)),
                    "array" => {
                        let (elem, size): (IdlType, usize) = map.next_value()?;
                        IdlType::Array(Box::new(elem), size)
                    }
                    other => {
                        return Err(de::Error::custom(format!("unknown IDL type shape: {other}")));
                    }
                };
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom(
                        "IDL type object must have exactly one key",
                    ));
                }
                Ok(ty)
            }
        }

        deserializer.deserialize_any(TypeVisitor)
    }
}
