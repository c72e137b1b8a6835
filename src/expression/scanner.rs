use std::borrow::Cow;

use crate::expression::error::ExprError;
use crate::foundation::text::{find_closing_paren, find_unescaped, unescape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Unescaped function name. Nested `=NAME` arguments also start with this token.
    FunctionName(Cow<'a, str>),
    OpenParams,
    CloseParams,
    ArgumentSeparator,
    /// Argument text. Literal text is unescaped; reference text is kept raw for the reference
    /// grammar, which gives `\` its own meaning.
    Value { kind: ValueTokenKind, text: Cow<'a, str> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTokenKind {
    Literal,
    PropertyRef,
    DataRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Name,
    AfterName,
    FirstArgument,
    Argument,
    AfterArgument,
    Done,
}

/// Splits expression text into tokens. A leading `=` and surrounding whitespace are ignored.
pub fn scan(input: &str) -> Result<Vec<Token<'_>>, ExprError> {
    let trimmed = input.trim_start();
    let mut start = input.len() - trimmed.len();
    if trimmed.starts_with('=') {
        start += 1;
    }
    let end = input.trim_end().len().max(start);
    if start >= end {
        return Err(ExprError::new(start, "expected function name"));
    }

    let mut scanner = Scanner {
        src: input,
        end,
        pos: start,
        depth: 0,
        expect: Expect::Name,
        out: Vec::new(),
    };
    while scanner.expect != Expect::Done {
        scanner.step()?;
    }
    if scanner.pos < end {
        return Err(ExprError::new(
            scanner.pos,
            "unexpected content after the end of the expression",
        ));
    }
    Ok(scanner.out)
}

struct Scanner<'a> {
    src: &'a str,
    end: usize,
    pos: usize,
    depth: usize,
    expect: Expect,
    out: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..self.end]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn push(&mut self, kind: TokenKind<'a>, len: usize) {
        let span = Span {
            start: self.pos,
            end: self.pos + len,
        };
        self.out.push(Token { kind, span });
        self.pos += len;
    }

    fn step(&mut self) -> Result<(), ExprError> {
        match self.expect {
            Expect::Name => self.function_name(),
            Expect::AfterName => self.after_name(),
            Expect::FirstArgument => {
                if self.peek() == Some(')') {
                    return Err(ExprError::new(self.pos, "expected argument"));
                }
                self.expect = Expect::Argument;
                Ok(())
            }
            Expect::Argument => self.argument(),
            Expect::AfterArgument => self.after_argument(),
            Expect::Done => Ok(()),
        }
    }

    fn function_name(&mut self) -> Result<(), ExprError> {
        let rest = self.rest();
        let len = find_unescaped(rest, |c| matches!(c, '(' | ' ' | ')')).unwrap_or(rest.len());
        if len == 0 {
            return Err(ExprError::new(self.pos, "expected function name"));
        }
        let name = unescape(&rest[..len], self.pos)?;
        self.push(TokenKind::FunctionName(name), len);
        self.expect = Expect::AfterName;
        Ok(())
    }

    fn after_name(&mut self) -> Result<(), ExprError> {
        match self.peek() {
            Some('(') => {
                self.push(TokenKind::OpenParams, 1);
                self.depth += 1;
                self.expect = Expect::FirstArgument;
            }
            None if self.depth == 0 => self.expect = Expect::Done,
            None => return Err(ExprError::new(self.pos, "expected ')'")),
            // zero-argument function nested as an argument
            Some(' ' | ')') if self.depth > 0 => self.expect = Expect::AfterArgument,
            Some(c) => {
                return Err(ExprError::new(
                    self.pos,
                    format!("unexpected '{c}' after function name"),
                ));
            }
        }
        Ok(())
    }

    fn argument(&mut self) -> Result<(), ExprError> {
        let rest = self.rest();
        let mut chars = rest.chars();
        let (kind, prefix) = match chars.next() {
            None | Some(' ' | ')') => {
                return Err(ExprError::new(self.pos, "expected argument"));
            }
            Some('=') => {
                if chars.next() == Some('(') {
                    return Err(ExprError::new(
                        self.pos + 1,
                        "expected function name after '='",
                    ));
                }
                self.pos += 1;
                self.expect = Expect::Name;
                return Ok(());
            }
            Some('%') => (ValueTokenKind::Literal, 1),
            Some('@') => (ValueTokenKind::PropertyRef, 1),
            Some('#') => (ValueTokenKind::DataRef, 1),
            Some(_) => (ValueTokenKind::Literal, 0),
        };

        let body = &rest[prefix..];
        let body_start = self.pos + prefix;
        let (text, text_offset, len) = if let Some(inner) = body.strip_prefix('(') {
            let close = find_closing_paren(inner).ok_or_else(|| {
                ExprError::new(body_start, "expected ')' to close the value")
            })?;
            if !matches!(inner[close + 1..].chars().next(), Some(' ' | ')')) {
                return Err(ExprError::new(
                    body_start + close + 2,
                    "expected ' ' or ')' after parenthesized value",
                ));
            }
            (&inner[..close], body_start + 1, prefix + close + 2)
        } else {
            let n = find_unescaped(body, |c| matches!(c, ' ' | ')')).unwrap_or(body.len());
            if n == 0 {
                return Err(ExprError::new(body_start, "expected argument"));
            }
            (&body[..n], body_start, prefix + n)
        };

        let text = match kind {
            ValueTokenKind::Literal => unescape(text, text_offset)?,
            _ => Cow::Borrowed(text),
        };
        self.push(TokenKind::Value { kind, text }, len);
        self.expect = Expect::AfterArgument;
        Ok(())
    }

    fn after_argument(&mut self) -> Result<(), ExprError> {
        match self.peek() {
            Some(' ') => {
                self.push(TokenKind::ArgumentSeparator, 1);
                self.expect = Expect::Argument;
            }
            Some(')') => {
                self.push(TokenKind::CloseParams, 1);
                self.depth -= 1;
                if self.depth == 0 {
                    self.expect = Expect::Done;
                }
            }
            None => return Err(ExprError::new(self.pos, "expected ')'")),
            Some(c) => {
                return Err(ExprError::new(
                    self.pos,
                    format!("unexpected '{c}' after argument"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/scanner.rs"]
mod tests;
