//! The scalar value model shared by expressions, references and conditions.

mod convert;
mod scalar;

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

pub use convert::{ConvertVisitor, FromValue, ValueCollector};
pub use scalar::{AssetRef, Guid, Scalar, ValueVisitor};

/// A dynamically typed scalar. Strings borrow from their source where possible.
#[derive(Debug, Clone)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Char(char),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(Cow<'a, str>),
    Asset(AssetRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Char,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    Str,
    Asset,
}

impl ValueKind {
    pub fn is_integer(self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::U32 | Self::U64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::Str => "string",
            Self::Asset => "asset",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "null" => Self::Null,
            "bool" | "boolean" => Self::Bool,
            "char" | "character" => Self::Char,
            "i32" | "int32" | "int" => Self::I32,
            "i64" | "int64" | "long" => Self::I64,
            "u32" | "uint32" | "uint" => Self::U32,
            "u64" | "uint64" | "ulong" => Self::U64,
            "f32" | "float32" | "float" => Self::F32,
            "f64" | "float64" | "double" => Self::F64,
            "str" | "string" => Self::Str,
            "asset" | "guid" => Self::Asset,
            other => return Err(format!("unknown value kind `{other}`")),
        };
        Ok(kind)
    }
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Char(_) => ValueKind::Char,
            Self::I32(_) => ValueKind::I32,
            Self::I64(_) => ValueKind::I64,
            Self::U32(_) => ValueKind::U32,
            Self::U64(_) => ValueKind::U64,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
            Self::Str(_) => ValueKind::Str,
            Self::Asset(_) => ValueKind::Asset,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn str(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Str(text.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// A view of this value borrowing any string payload.
    pub fn borrowed(&self) -> Value<'_> {
        match self {
            Self::Str(s) => Value::Str(Cow::Borrowed(s)),
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::Char(v) => Value::Char(*v),
            Self::I32(v) => Value::I32(*v),
            Self::I64(v) => Value::I64(*v),
            Self::U32(v) => Value::U32(*v),
            Self::U64(v) => Value::U64(*v),
            Self::F32(v) => Value::F32(*v),
            Self::F64(v) => Value::F64(*v),
            Self::Asset(v) => Value::Asset(*v),
        }
    }

    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Str(s) => Value::Str(Cow::Owned(s.into_owned())),
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(v),
            Self::Char(v) => Value::Char(v),
            Self::I32(v) => Value::I32(v),
            Self::I64(v) => Value::I64(v),
            Self::U32(v) => Value::U32(v),
            Self::U64(v) => Value::U64(v),
            Self::F32(v) => Value::F32(v),
            Self::F64(v) => Value::F64(v),
            Self::Asset(v) => Value::Asset(v),
        }
    }

    /// Exact integer view: integral kinds, `bool` as 0/1, digit characters, legacy asset ids and
    /// integral finite floats.
    pub fn to_i128(&self) -> Option<i128> {
        match *self {
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v.into()),
            Self::Bool(v) => Some(v.into()),
            Self::Char(c) => c.to_digit(10).map(i128::from),
            Self::Asset(AssetRef::Id(id)) => Some(id.into()),
            Self::F32(v) => integral_float(v.into()),
            Self::F64(v) => integral_float(v),
            _ => None,
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(v.into()),
            Self::F64(v) => Some(v),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v as f64),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v as f64),
            Self::Bool(v) => Some(if v { 1.0 } else { 0.0 }),
            Self::Char(c) => c.to_digit(10).map(f64::from),
            Self::Asset(AssetRef::Id(id)) => Some(id.into()),
            _ => None,
        }
    }

    /// Reduces kinds that have a bare numeric meaning (digit characters, booleans, legacy asset
    /// ids) to `u32`. Everything else is returned unchanged.
    pub fn reduced(self) -> Self {
        match self {
            Self::Char(c) => match c.to_digit(10) {
                Some(d) => Self::U32(d),
                None => Self::Char(c),
            },
            Self::Bool(v) => Self::U32(v.into()),
            Self::Asset(AssetRef::Id(id)) => Self::U32(id.into()),
            other => other,
        }
    }

    /// Converts to `kind` through the coercion table. Null converts to null.
    pub fn convert(&self, kind: ValueKind) -> Option<Value<'static>> {
        if self.is_null() {
            return Some(Value::Null);
        }
        Some(match kind {
            ValueKind::Null => return None,
            ValueKind::Bool => Value::Bool(bool::from_value(self)?),
            ValueKind::Char => Value::Char(char::from_value(self)?),
            ValueKind::I32 => Value::I32(i32::from_value(self)?),
            ValueKind::I64 => Value::I64(i64::from_value(self)?),
            ValueKind::U32 => Value::U32(u32::from_value(self)?),
            ValueKind::U64 => Value::U64(u64::from_value(self)?),
            ValueKind::F32 => Value::F32(f32::from_value(self)?),
            ValueKind::F64 => Value::F64(f64::from_value(self)?),
            ValueKind::Str => Value::Str(Cow::Owned(String::from_value(self)?)),
            ValueKind::Asset => Value::Asset(AssetRef::from_value(self)?),
        })
    }

    /// Hands the value to `visitor` in its concrete type.
    pub fn visit<V: ValueVisitor>(&self, visitor: &mut V) {
        match self {
            Self::Null => visitor.accept_null(),
            Self::Bool(v) => visitor.accept(*v),
            Self::Char(v) => visitor.accept(*v),
            Self::I32(v) => visitor.accept(*v),
            Self::I64(v) => visitor.accept(*v),
            Self::U32(v) => visitor.accept(*v),
            Self::U64(v) => visitor.accept(*v),
            Self::F32(v) => visitor.accept(*v),
            Self::F64(v) => visitor.accept(*v),
            Self::Str(s) => visitor.accept(s.as_ref()),
            Self::Asset(v) => visitor.accept(*v),
        }
    }
}

fn integral_float(v: f64) -> Option<i128> {
    (v.is_finite() && v.fract() == 0.0 && v.abs() < 1.0e38).then_some(v as i128)
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a.to_bits() == b.to_bits(),
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Asset(a), Self::Asset(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value<'_> {}

impl Hash for Value<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::I32(v) => v.hash(state),
            Self::I64(v) => v.hash(state),
            Self::U32(v) => v.hash(state),
            Self::U64(v) => v.hash(state),
            Self::F32(v) => v.to_bits().hash(state),
            Self::F64(v) => v.to_bits().hash(state),
            Self::Str(v) => v.hash(state),
            Self::Asset(v) => v.hash(state),
        }
    }
}

/// Plain rendering without literal suffixes or escaping.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => v.fmt(f),
            Self::Char(v) => v.fmt(f),
            Self::I32(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::U32(v) => v.fmt(f),
            Self::U64(v) => v.fmt(f),
            Self::F32(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
            Self::Str(v) => f.write_str(v),
            Self::Asset(v) => v.fmt(f),
        }
    }
}

impl<T: Scalar> From<T> for Value<'static>
where
    T: 'static,
{
    fn from(value: T) -> Self {
        value.into_value()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/value/value.rs"]
mod tests;
