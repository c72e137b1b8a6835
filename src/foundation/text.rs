//! Escaping rules shared by the scanner, the formatter and the reference parsers.
//!
//! `\` removes the special meaning of the character that follows it. `\n`, `\r`, `\t` and
//! `\uXXXX` decode to the corresponding character; any other escaped character stands for itself.

use std::borrow::Cow;

use crate::expression::ExprError;

pub(crate) const ESCAPE: char = '\\';

/// Characters the formatter must escape so the scanner reads them back as plain text.
pub(crate) fn is_escapable(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '\\' | '@' | '=' | '%' | '#' | '\n' | '\r' | '\t'
    )
}

/// Decodes escape sequences in `text`. `base` is the byte offset of `text` in the source and is
/// only used to position errors.
pub fn unescape(text: &str, base: usize) -> Result<Cow<'_, str>, ExprError> {
    if !text.contains(ESCAPE) {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != ESCAPE {
            out.push(c);
            continue;
        }
        let Some((_, next)) = chars.next() else {
            return Err(ExprError::new(base + i, "dangling escape character"));
        };
        match next {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let decoded = text
                    .get(i + 2..i + 6)
                    .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|digits| u32::from_str_radix(digits, 16).ok())
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        ExprError::new(base + i, "expected four hex digits after \\u")
                    })?;
                out.push(decoded);
                for _ in 0..4 {
                    chars.next();
                }
            }
            other => out.push(other),
        }
    }
    Ok(Cow::Owned(out))
}

/// Escapes every character the scanner would otherwise treat as syntax.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_escapable) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if is_escapable(c) => {
                out.push(ESCAPE);
                out.push(c);
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Byte index of the first unescaped character in `text` accepted by `pred`.
pub(crate) fn find_unescaped(text: &str, mut pred: impl FnMut(char) -> bool) -> Option<usize> {
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == ESCAPE {
            chars.next();
            continue;
        }
        if pred(c) {
            return Some(i);
        }
    }
    None
}

/// `text` starts just after an opening `(`; returns the byte index of the `)` that closes it.
pub(crate) fn find_closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    find_unescaped(text, |c| match c {
        '(' => {
            depth += 1;
            false
        }
        ')' if depth == 0 => true,
        ')' => {
            depth -= 1;
            false
        }
        _ => false,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/text.rs"]
mod tests;
