use crate::value::{AssetRef, Guid, Scalar, Value, ValueKind, ValueVisitor};

/// Coercion from a dynamic [`Value`] into a concrete type.
///
/// Numeric kinds convert by value and fail when the value does not fit. `bool` reads as 0/1,
/// a digit character as its digit, a legacy asset id as its number. Strings are parsed. Null never
/// converts; callers handle it before asking.
pub trait FromValue: Sized {
    const KIND: ValueKind;

    fn from_value(value: &Value<'_>) -> Option<Self>;
}

macro_rules! integer_from_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl FromValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_value(value: &Value<'_>) -> Option<Self> {
                match value {
                    Value::Str(s) => s.trim().parse().ok(),
                    other => other.to_i128().and_then(|v| <$ty>::try_from(v).ok()),
                }
            }
        }
    )*};
}

integer_from_value!(i32 => I32, i64 => I64, u32 => U32, u64 => U64);

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::F64;

    fn from_value(value: &Value<'_>) -> Option<Self> {
        match value {
            Value::Str(s) => s.trim().parse().ok(),
            other => other.to_f64(),
        }
    }
}

impl FromValue for f32 {
    const KIND: ValueKind = ValueKind::F32;

    fn from_value(value: &Value<'_>) -> Option<Self> {
        match value {
            Value::F32(v) => Some(*v),
            Value::Str(s) => s.trim().parse().ok(),
            other => other.to_f64().map(|v| v as f32),
        }
    }
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: &Value<'_>) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            Value::Str(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            Value::Char(_) | Value::Asset(_) | Value::Null => None,
            other => match other.to_i128()? {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            },
        }
    }
}

impl FromValue for char {
    const KIND: ValueKind = ValueKind::Char;

    fn from_value(value: &Value<'_>) -> Option<Self> {
        match value {
            Value::Char(c) => Some(*c),
            Value::Str(s) => {
                let mut chars = s.chars();
                let c = chars.next()?;
                chars.next().is_none().then_some(c)
            }
            Value::Bool(_) | Value::Asset(_) | Value::Null => None,
            other => other
                .to_i128()
                .and_then(|d| u32::try_from(d).ok())
                .and_then(|d| char::from_digit(d, 10)),
        }
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_value(value: &Value<'_>) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Str(s) => Some(s.to_string()),
            other => Some(other.to_string()),
        }
    }
}

impl FromValue for AssetRef {
    const KIND: ValueKind = ValueKind::Asset;

    fn from_value(value: &Value<'_>) -> Option<Self> {
        match value {
            Value::Asset(v) => Some(*v),
            Value::Str(s) => {
                let s = s.trim();
                Guid::parse(s)
                    .map(AssetRef::Guid)
                    .or_else(|| s.parse().ok().map(AssetRef::Id))
            }
            Value::I32(_) | Value::I64(_) | Value::U32(_) | Value::U64(_) => value
                .to_i128()
                .and_then(|v| u16::try_from(v).ok())
                .map(AssetRef::Id),
            _ => None,
        }
    }
}

/// Visitor that converts whatever it receives into `T`.
///
/// After a visit, [`ConvertVisitor::finish`] yields `None` when nothing convertible arrived,
/// `Some(None)` for null and `Some(Some(t))` otherwise.
#[derive(Debug)]
pub struct ConvertVisitor<T> {
    result: Option<Option<T>>,
}

impl<T> Default for ConvertVisitor<T> {
    fn default() -> Self {
        Self { result: None }
    }
}

impl<T: FromValue> ConvertVisitor<T> {
    pub fn finish(self) -> Option<Option<T>> {
        self.result
    }
}

impl<T: FromValue> ValueVisitor for ConvertVisitor<T> {
    fn accept<S: Scalar>(&mut self, value: S) {
        self.result = T::from_value(&value.into_value()).map(Some);
    }

    fn accept_null(&mut self) {
        self.result = Some(None);
    }

    fn desired_kind(&self) -> Option<ValueKind> {
        Some(T::KIND)
    }
}

/// Visitor that keeps the received value as an owned [`Value`].
#[derive(Debug, Default)]
pub struct ValueCollector {
    value: Option<Value<'static>>,
    desired: Option<ValueKind>,
}

impl ValueCollector {
    pub fn new(desired: Option<ValueKind>) -> Self {
        Self {
            value: None,
            desired,
        }
    }

    pub fn finish(self) -> Option<Value<'static>> {
        self.value
    }
}

impl ValueVisitor for ValueCollector {
    fn accept<S: Scalar>(&mut self, value: S) {
        self.value = Some(value.into_value().into_owned());
    }

    fn accept_null(&mut self) {
        self.value = Some(Value::Null);
    }

    fn desired_kind(&self) -> Option<ValueKind> {
        self.desired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/value/convert.rs"]
mod tests;
