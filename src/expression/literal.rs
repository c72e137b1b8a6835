//! Literal text to typed values.
//!
//! Integers without a suffix take the first kind that holds them: `u32`, `u64`, `i32`, `i64`.
//! Suffixes pin the kind: `u` (u32), `l` (i64), `ul`/`lu` (u64), `f` (f32), `d` (f64) and `m`
//! (decimal, carried as f64). `0x`/`0b` prefixes read hex and binary integers.

use std::borrow::Cow;

use crate::value::{AssetRef, Guid, Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntSuffix {
    None,
    U32,
    I64,
    U64,
}

/// Parses literal text into the most specific value it spells. Never fails: unrecognised text
/// is a string.
pub fn parse_literal(text: &str) -> Value<'static> {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Some(number) = parse_numeric(text) {
        return number;
    }
    if text.len() >= 32
        && text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_hexdigit() || c == '{')
    {
        if let Some(guid) = Guid::parse(text) {
            return Value::Asset(AssetRef::Guid(guid));
        }
    }
    Value::Str(Cow::Owned(text.to_owned()))
}

/// Parses text that must be a number.
pub fn parse_numeric(text: &str) -> Option<Value<'static>> {
    if let Some(value) = parse_radix(text) {
        return Some(value);
    }
    let first = text.chars().next()?;
    if first.is_ascii_digit() || matches!(first, '-' | '+' | '.') {
        parse_decimal(text)
    } else {
        None
    }
}

/// Parses text as a specific kind, as demanded by a function's argument hint.
pub fn parse_as(text: &str, kind: ValueKind) -> Option<Value<'static>> {
    match kind {
        ValueKind::Str => Some(Value::Str(Cow::Owned(text.to_owned()))),
        ValueKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        ValueKind::Null => None,
        kind if kind.is_numeric() => {
            let value = parse_numeric(text)?;
            if value.kind() == kind {
                Some(value)
            } else {
                value.convert(kind)
            }
        }
        kind => parse_literal(text).convert(kind),
    }
}

fn split_int_suffix(text: &str) -> (&str, IntSuffix) {
    let lower = text.len().checked_sub(2).and_then(|i| text.get(i..));
    if let Some(tail) = lower {
        if tail.eq_ignore_ascii_case("ul") || tail.eq_ignore_ascii_case("lu") {
            return (&text[..text.len() - 2], IntSuffix::U64);
        }
    }
    match text.chars().last() {
        Some('u' | 'U') => (&text[..text.len() - 1], IntSuffix::U32),
        Some('l' | 'L') => (&text[..text.len() - 1], IntSuffix::I64),
        _ => (text, IntSuffix::None),
    }
}

fn parse_radix(text: &str) -> Option<Value<'static>> {
    let (radix, body) = match text.get(..2) {
        Some("0x" | "0X") => (16, &text[2..]),
        Some("0b" | "0B") => (2, &text[2..]),
        _ => return None,
    };
    let (digits, suffix) = split_int_suffix(body);
    if digits.is_empty() {
        return None;
    }
    let value = u128::from_str_radix(digits, radix).ok()?;
    narrow_integer(value.try_into().ok()?, suffix)
}

fn narrow_integer(value: i128, suffix: IntSuffix) -> Option<Value<'static>> {
    match suffix {
        IntSuffix::U32 => u32::try_from(value).ok().map(Value::U32),
        IntSuffix::I64 => i64::try_from(value).ok().map(Value::I64),
        IntSuffix::U64 => u64::try_from(value).ok().map(Value::U64),
        IntSuffix::None => smallest_integer(value),
    }
}

/// Picks the first of `u32`, `u64`, `i32`, `i64` that holds `value`.
pub(crate) fn smallest_integer(value: i128) -> Option<Value<'static>> {
    if let Ok(v) = u32::try_from(value) {
        Some(Value::U32(v))
    } else if let Ok(v) = u64::try_from(value) {
        Some(Value::U64(v))
    } else if let Ok(v) = i32::try_from(value) {
        Some(Value::I32(v))
    } else {
        i64::try_from(value).ok().map(Value::I64)
    }
}

fn parse_decimal(text: &str) -> Option<Value<'static>> {
    let (int_body, int_suffix) = split_int_suffix(text);
    if int_suffix != IntSuffix::None {
        let value: i128 = int_body.parse().ok()?;
        return narrow_integer(value, int_suffix);
    }

    match text.chars().last() {
        Some('f' | 'F') => return text[..text.len() - 1].parse().ok().map(Value::F32),
        Some('d' | 'D' | 'm' | 'M') => {
            return text[..text.len() - 1].parse().ok().map(Value::F64);
        }
        _ => {}
    }

    if is_integer_text(text) {
        if let Some(value) = text.parse::<i128>().ok().and_then(smallest_integer) {
            return Some(value);
        }
    }
    text.parse::<f64>().ok().map(Value::F64)
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[path = "../../tests/unit/expression/literal.rs"]
mod tests;
