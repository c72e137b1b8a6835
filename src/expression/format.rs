//! Canonical text for expression trees. Parsing the output yields an equal tree.

use std::fmt;

use crate::expression::ast::{ExprNode, Expression, FunctionCall};
use crate::expression::literal::parse_literal;
use crate::foundation::text::escape;
use crate::value::Value;

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root().fmt(f)
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape(self.name()).replace(' ', "\\ "))?;
        if self.args().is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, arg) in self.args().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            arg.fmt(f)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(call) => write!(f, "={call}"),
            Self::Literal(value) => f.write_str(&format_literal(value)),
            Self::Property(r) => write_reference(f, '@', &r.to_string()),
            Self::Data(r) => write_reference(f, '#', &r.to_string()),
        }
    }
}

fn write_reference(f: &mut fmt::Formatter<'_>, sigil: char, text: &str) -> fmt::Result {
    if text.is_empty() || text.starts_with('(') || text.contains([' ', ')']) {
        write!(f, "{sigil}({text})")
    } else {
        write!(f, "{sigil}{text}")
    }
}

/// Literal argument text: escaped, suffixed when the bare number would read back as another
/// kind, and parenthesized when empty or containing spaces.
pub fn format_literal(value: &Value<'_>) -> String {
    let text = literal_text(value);
    let escaped = escape(&text);
    if text.is_empty() || text.contains(' ') {
        format!("({escaped})")
    } else {
        escaped.into_owned()
    }
}

/// Infinities and NaNs always carry an explicit sign so they read back as numbers.
fn non_finite_text(negative: bool, nan: bool) -> String {
    let sign = if negative { '-' } else { '+' };
    let body = if nan { "NaN" } else { "inf" };
    format!("{sign}{body}")
}

fn literal_text(value: &Value<'_>) -> String {
    let plain = match value {
        Value::F32(v) if !v.is_finite() => non_finite_text(v.is_sign_negative(), v.is_nan()),
        Value::F64(v) if !v.is_finite() => non_finite_text(v.is_sign_negative(), v.is_nan()),
        _ => value.to_string(),
    };
    if !value.kind().is_numeric() || parse_literal(&plain).kind() == value.kind() {
        return plain;
    }
    let suffix = match value {
        Value::U32(_) => "u",
        Value::I64(_) => "l",
        Value::U64(_) => "ul",
        Value::F32(_) => "f",
        Value::F64(_) => "d",
        _ => "",
    };
    plain + suffix
}

#[cfg(test)]
#[path = "../../tests/unit/expression/format.rs"]
mod tests;
