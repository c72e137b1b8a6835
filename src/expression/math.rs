//! Kind-preserving arithmetic.
//!
//! Integer operands are combined in `i128` and narrowed back to their common kind when the
//! result fits, widening otherwise. Any `f64` operand makes the result `f64`; `f32` mixed with
//! integers or `f32` stays `f32`. Text operands are parsed as the caller's desired kind.

use crate::expression::literal::{parse_as, parse_numeric};
use crate::value::{Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i128, ValueKind),
    F32(f32),
    F64(f64),
}

impl Number {
    pub(crate) fn of(value: &Value<'_>, out: ValueKind) -> Option<Self> {
        match value {
            Value::I32(v) => Some(Self::Int((*v).into(), ValueKind::I32)),
            Value::I64(v) => Some(Self::Int((*v).into(), ValueKind::I64)),
            Value::U32(v) => Some(Self::Int((*v).into(), ValueKind::U32)),
            Value::U64(v) => Some(Self::Int((*v).into(), ValueKind::U64)),
            Value::F32(v) => Some(Self::F32(*v)),
            Value::F64(v) => Some(Self::F64(*v)),
            Value::Str(text) => {
                let text = text.trim();
                let parsed = out
                    .is_numeric()
                    .then(|| parse_as(text, out))
                    .flatten()
                    .or_else(|| parse_numeric(text))?;
                match parsed {
                    Value::Str(_) => None,
                    parsed => Self::of(&parsed, out),
                }
            }
            _ => None,
        }
    }

    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Self::Int(v, _) => v as f64,
            Self::F32(v) => v.into(),
            Self::F64(v) => v,
        }
    }
}

/// Reads any numeric-looking value as `f64`.
pub(crate) fn real(value: &Value<'_>, out: ValueKind) -> Option<f64> {
    Number::of(value, out).map(Number::to_f64)
}

/// Wraps a real result in the precision the caller asked for.
pub(crate) fn real_result(value: f64, out: ValueKind) -> Value<'static> {
    if out == ValueKind::F32 {
        Value::F32(value as f32)
    } else {
        Value::F64(value)
    }
}

/// Fits `value` into `kind`, then the same-width signed kind, then `i64`, then `u64`.
pub(crate) fn narrow(value: i128, kind: ValueKind) -> Option<Value<'static>> {
    let fit = |kind: ValueKind| -> Option<Value<'static>> {
        match kind {
            ValueKind::I32 => i32::try_from(value).ok().map(Value::I32),
            ValueKind::U32 => u32::try_from(value).ok().map(Value::U32),
            ValueKind::I64 => i64::try_from(value).ok().map(Value::I64),
            ValueKind::U64 => u64::try_from(value).ok().map(Value::U64),
            _ => None,
        }
    };
    let signed = match kind {
        ValueKind::U32 => ValueKind::I32,
        _ => ValueKind::I64,
    };
    fit(kind)
        .or_else(|| fit(signed))
        .or_else(|| fit(ValueKind::I64))
        .or_else(|| fit(ValueKind::U64))
}

fn common_kind(a: ValueKind, b: ValueKind) -> ValueKind {
    let unsigned = |k| matches!(k, ValueKind::U32 | ValueKind::U64);
    if a == b {
        a
    } else if unsigned(a) && unsigned(b) {
        ValueKind::U64
    } else {
        ValueKind::I64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Min,
    Max,
    Pow,
}

pub(crate) fn binary(
    op: BinaryOp,
    a: &Value<'_>,
    b: &Value<'_>,
    out: ValueKind,
) -> Option<Value<'static>> {
    let x = Number::of(a, out)?;
    let y = Number::of(b, out)?;
    match (x, y) {
        (Number::Int(x, kx), Number::Int(y, ky)) => Some(int_binary(op, x, y, common_kind(kx, ky))),
        (Number::F64(_), _) | (_, Number::F64(_)) => {
            Some(Value::F64(float_binary(op, x.to_f64(), y.to_f64())))
        }
        _ => Some(Value::F32(float_binary(op, x.to_f64(), y.to_f64()) as f32)),
    }
}

fn int_binary(op: BinaryOp, x: i128, y: i128, kind: ValueKind) -> Value<'static> {
    let exact = match op {
        BinaryOp::Add => x.checked_add(y),
        BinaryOp::Sub => x.checked_sub(y),
        BinaryOp::Mul => x.checked_mul(y),
        BinaryOp::Div if y == 0 || x % y != 0 => None,
        BinaryOp::Div => Some(x / y),
        BinaryOp::Mod if y == 0 => None,
        BinaryOp::Mod => Some(x % y),
        BinaryOp::Min => Some(x.min(y)),
        BinaryOp::Max => Some(x.max(y)),
        BinaryOp::Pow => u32::try_from(y).ok().and_then(|e| x.checked_pow(e)),
    };
    exact
        .and_then(|v| narrow(v, kind))
        .unwrap_or_else(|| Value::F64(float_binary(op, x as f64, y as f64)))
}

fn float_binary(op: BinaryOp, x: f64, y: f64) -> f64 {
    match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => x / y,
        BinaryOp::Mod => x % y,
        BinaryOp::Min => x.min(y),
        BinaryOp::Max => x.max(y),
        BinaryOp::Pow => x.powf(y),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundingOp {
    Abs,
    Round,
    Floor,
    Ceil,
}

pub(crate) fn rounding(op: RoundingOp, a: &Value<'_>, out: ValueKind) -> Option<Value<'static>> {
    match Number::of(a, out)? {
        Number::Int(v, kind) => match op {
            RoundingOp::Abs => narrow(v.abs(), kind),
            _ => narrow(v, kind),
        },
        Number::F32(v) => Some(Value::F32(match op {
            RoundingOp::Abs => v.abs(),
            RoundingOp::Round => v.round_ties_even(),
            RoundingOp::Floor => v.floor(),
            RoundingOp::Ceil => v.ceil(),
        })),
        Number::F64(v) => Some(Value::F64(match op {
            RoundingOp::Abs => v.abs(),
            RoundingOp::Round => v.round_ties_even(),
            RoundingOp::Floor => v.floor(),
            RoundingOp::Ceil => v.ceil(),
        })),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/math.rs"]
mod tests;
