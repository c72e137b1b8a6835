use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::expression::ast::{ExprNode, Expression, FunctionCall};
use crate::expression::catalog::{
    ArgumentHint, ExpressionFunction, FunctionCatalog, MAX_ARGUMENTS,
};
use crate::expression::error::ExprError;
use crate::expression::literal::{parse_as, parse_literal, parse_numeric};
use crate::expression::scanner::{Token, TokenKind, ValueTokenKind, scan};
use crate::expression::simplify::fold_call;
use crate::reference::{DataRef, PropertyRef};

/// Parse-time switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Replace reference-free nested calls with their value.
    pub simplify_constants: bool,
}

#[tracing::instrument(level = "debug", skip(catalog, options), err)]
pub(crate) fn parse_expression(
    src: &str,
    catalog: &FunctionCatalog,
    options: &ParseOptions,
) -> Result<Expression, ExprError> {
    let tokens = scan(src)?;
    let mut p = Parser {
        catalog,
        options,
        stack: Vec::new(),
        root: None,
    };
    for token in tokens {
        p.token(token)?;
    }
    p.finish(src.len())
}

struct Frame {
    function: Arc<dyn ExpressionFunction>,
    args: Vec<ExprNode>,
    open: bool,
    start: usize,
}

struct Parser<'c> {
    catalog: &'c FunctionCatalog,
    options: &'c ParseOptions,
    stack: Vec<Frame>,
    root: Option<FunctionCall>,
}

impl Parser<'_> {
    fn token(&mut self, token: Token<'_>) -> Result<(), ExprError> {
        let at = token.span.start;
        match token.kind {
            TokenKind::FunctionName(name) => {
                if self.root.is_some() {
                    return Err(ExprError::new(at, "unexpected function after expression end"));
                }
                self.check_room(at)?;
                let function = self
                    .catalog
                    .get(&name)
                    .ok_or_else(|| ExprError::new(at, format!("unknown function `{name}`")))?;
                self.stack.push(Frame {
                    function,
                    args: Vec::new(),
                    open: false,
                    start: at,
                });
            }
            TokenKind::OpenParams => {
                let top = self
                    .stack
                    .last_mut()
                    .ok_or_else(|| ExprError::new(at, "unexpected '('"))?;
                top.open = true;
            }
            TokenKind::Value { kind, text } => {
                self.check_room(at)?;
                let top = self
                    .stack
                    .last_mut()
                    .filter(|f| f.open)
                    .ok_or_else(|| ExprError::new(at, "unexpected value"))?;
                let hint = top.function.hint(top.args.len());
                let node = value_node(kind, &text, hint, at)?;
                top.args.push(node);
            }
            TokenKind::ArgumentSeparator => self.close_pending(at)?,
            TokenKind::CloseParams => {
                self.close_pending(at)?;
                self.close_top(at)?;
            }
        }
        Ok(())
    }

    /// The open call on top of the stack must have space for one more argument.
    fn check_room(&self, at: usize) -> Result<(), ExprError> {
        match self.stack.last() {
            Some(top) if top.args.len() >= MAX_ARGUMENTS => Err(ExprError::new(
                at,
                format!(
                    "{} takes at most {MAX_ARGUMENTS} arguments",
                    top.function.name()
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Completes a zero-argument call written without parentheses.
    fn close_pending(&mut self, at: usize) -> Result<(), ExprError> {
        if self.stack.last().is_some_and(|f| !f.open) {
            self.close_top(at)?;
        }
        Ok(())
    }

    fn close_top(&mut self, at: usize) -> Result<(), ExprError> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| ExprError::new(at, "unexpected ')'"))?;
        let count = frame.args.len();
        if !frame.function.arity().supports(count) {
            return Err(ExprError::new(
                frame.start,
                format!(
                    "{} does not accept {count} argument(s) (accepts {})",
                    frame.function.name(),
                    frame.function.arity()
                ),
            ));
        }
        let call = FunctionCall::new(frame.function, frame.args);

        let Some(parent) = self.stack.last() else {
            self.root = Some(call);
            return Ok(());
        };
        let hint = parent.function.hint(parent.args.len());
        let node = if self.options.simplify_constants {
            fold_call(call, hint)
        } else {
            ExprNode::Function(call)
        };
        if let Some(parent) = self.stack.last_mut() {
            parent.args.push(node);
        }
        Ok(())
    }

    fn finish(mut self, end: usize) -> Result<Expression, ExprError> {
        self.close_pending(end)?;
        if let Some(frame) = self.stack.last() {
            return Err(ExprError::new(
                frame.start,
                format!("unterminated call to {}", frame.function.name()),
            ));
        }
        self.root
            .map(Expression::new)
            .ok_or_else(|| ExprError::new(0, "expected function name"))
    }
}

fn value_node(
    kind: ValueTokenKind,
    text: &str,
    hint: ArgumentHint,
    at: usize,
) -> Result<ExprNode, ExprError> {
    match kind {
        ValueTokenKind::PropertyRef => PropertyRef::parse(text)
            .map(ExprNode::Property)
            .map_err(|e| e.shifted(at + 1)),
        ValueTokenKind::DataRef => DataRef::parse(text)
            .map(ExprNode::Data)
            .map_err(|e| e.shifted(at + 1)),
        ValueTokenKind::Literal => {
            let value = match hint {
                ArgumentHint::Any => parse_literal(text),
                ArgumentHint::Numeric => parse_numeric(text)
                    .ok_or_else(|| ExprError::new(at, format!("expected a number, got `{text}`")))?,
                ArgumentHint::Kind(kind) => parse_as(text, kind).ok_or_else(|| {
                    ExprError::new(at, format!("expected a {kind} value, got `{text}`"))
                })?,
            };
            Ok(ExprNode::Literal(value))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
