use std::{borrow::Cow, fmt, str::FromStr};

use crate::value::{Value, ValueKind};

/// A 128-bit asset GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(pub u128);

impl Guid {
    /// Accepts 32 hex digits, optionally in the dashed `8-4-4-4-12` layout and optionally braced.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(text);

        let digits: String = match text.len() {
            32 => text.to_owned(),
            36 => {
                let bytes = text.as_bytes();
                if [8, 13, 18, 23].iter().any(|&i| bytes[i] != b'-') {
                    return None;
                }
                text.chars().filter(|&c| c != '-').collect()
            }
            _ => return None,
        };
        if digits.len() != 32 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u128::from_str_radix(&digits, 16).ok().map(Self)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xffff_ffff_ffff
        )
    }
}

impl FromStr for Guid {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

/// Reference to another asset, either by GUID or by its legacy 16-bit id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRef {
    Guid(Guid),
    Id(u16),
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guid(guid) => guid.fmt(f),
            Self::Id(id) => id.fmt(f),
        }
    }
}

/// A concrete value type a [`Value`] can carry.
///
/// Visitors receive arguments through this trait so callbacks are monomorphized per concrete
/// type instead of matching on a tag.
pub trait Scalar: Sized {
    const KIND: ValueKind;

    fn into_value<'v>(self) -> Value<'v>
    where
        Self: 'v;
}

macro_rules! copy_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn into_value<'v>(self) -> Value<'v>
            where
                Self: 'v,
            {
                Value::$variant(self)
            }
        }
    )*};
}

copy_scalar!(
    bool => Bool,
    char => Char,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

impl Scalar for AssetRef {
    const KIND: ValueKind = ValueKind::Asset;

    fn into_value<'v>(self) -> Value<'v>
    where
        Self: 'v,
    {
        Value::Asset(self)
    }
}

impl Scalar for &str {
    const KIND: ValueKind = ValueKind::Str;

    fn into_value<'v>(self) -> Value<'v>
    where
        Self: 'v,
    {
        Value::Str(Cow::Borrowed(self))
    }
}

impl Scalar for String {
    const KIND: ValueKind = ValueKind::Str;

    fn into_value<'v>(self) -> Value<'v>
    where
        Self: 'v,
    {
        Value::Str(Cow::Owned(self))
    }
}

/// Callback that receives a value in its concrete type.
pub trait ValueVisitor {
    fn accept<T: Scalar>(&mut self, value: T);

    fn accept_null(&mut self);

    /// The kind the visitor would prefer to receive, if it has one.
    fn desired_kind(&self) -> Option<ValueKind> {
        None
    }
}
