use crate::{bail, Result};

use indexmap::IndexMap;

/// An ordered map from physical field name to value.
///
/// Field order is preserved so that mutation payloads and generated SQL
/// assignment lists are deterministic.
pub type FieldMap = IndexMap<String, Value>;

/// A single stored field value.
///
/// Values are opaque to the mapper; the only rule it applies is that an
/// empty string counts as "unset" when a record is asked whether a field
/// is present.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Raw binary value
    Bytes(Vec<u8>),

    /// 64-bit floating point value
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// A list of values
    List(Vec<Value>),

    /// A nested document
    Map(FieldMap),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            _ => bail!("cannot convert value to bool"),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            _ => bail!("cannot convert value to i64"),
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => bail!("cannot convert value to String"),
        }
    }

    pub fn to_map(self) -> Result<FieldMap> {
        match self {
            Self::Map(v) => Ok(v),
            _ => bail!("cannot convert value to map"),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl From<FieldMap> for Value {
    fn from(src: FieldMap) -> Self {
        Self::Map(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
