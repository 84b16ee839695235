//! Primary keys in a printable, entity-independent form.
//!
//! Scalars print as-is, tuples as pipe-joined values and named keys as
//! pipe-joined `name:value` pairs.
use std::fmt;

use crate::errors::KeyFormatError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Int(i64),
    Str(String),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Int(v) => write!(f, "{v}"),
            KeyPart::Str(v) => f.write_str(v),
        }
    }
}

impl From<i32> for KeyPart {
    fn from(v: i32) -> Self {
        KeyPart::Int(v.into())
    }
}

impl From<i64> for KeyPart {
    fn from(v: i64) -> Self {
        KeyPart::Int(v)
    }
}

impl From<&str> for KeyPart {
    fn from(v: &str) -> Self {
        KeyPart::Str(v.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(v: String) -> Self {
        KeyPart::Str(v)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimaryKey {
    Scalar(KeyPart),
    Tuple(Vec<KeyPart>),
    Named(Vec<(String, KeyPart)>),
}

impl PrimaryKey {
    pub fn named<N: Into<String>, P: Into<KeyPart>>(parts: impl IntoIterator<Item = (N, P)>) -> Self {
        PrimaryKey::Named(parts.into_iter().map(|(n, p)| (n.into(), p.into())).collect())
    }

    /// Renders the key for messages and logs. Composite keys must not be empty.
    pub fn format(&self) -> Result<String, KeyFormatError> {
        match self {
            PrimaryKey::Scalar(p) => Ok(p.to_string()),
            PrimaryKey::Tuple(parts) if parts.is_empty() => Err(KeyFormatError::Empty),
            PrimaryKey::Tuple(parts) => {
                Ok(parts.iter().map(ToString::to_string).collect::<Vec<_>>().join("|"))
            }
            PrimaryKey::Named(parts) if parts.is_empty() => Err(KeyFormatError::Empty),
            PrimaryKey::Named(parts) => Ok(parts
                .iter()
                .map(|(name, p)| format!("{name}:{p}"))
                .collect::<Vec<_>>()
                .join("|")),
        }
    }
}

impl From<KeyPart> for PrimaryKey {
    fn from(p: KeyPart) -> Self {
        PrimaryKey::Scalar(p)
    }
}

impl From<i32> for PrimaryKey {
    fn from(v: i32) -> Self {
        PrimaryKey::Scalar(v.into())
    }
}

impl From<&str> for PrimaryKey {
    fn from(v: &str) -> Self {
        PrimaryKey::Scalar(v.into())
    }
}
