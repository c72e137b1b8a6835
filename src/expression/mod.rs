//! The expression language: text to tree, tree to text, tree to value.
//!
//! ```text
//! =MAX(=MIN(3 2) @Damage_Player)
//! ```
//!
//! A root is a function call with an optional leading `=`. Arguments are separated by single
//! spaces and are literals, `@property` references, `#data` references or `=nested` calls.

pub mod ast;
pub mod catalog;
mod error;
mod eval;
mod format;
mod functions;
pub mod literal;
pub(crate) mod math;
mod parser;
pub mod scanner;
mod simplify;

pub use ast::{ExprNode, Expression, FunctionCall};
pub use catalog::{ArgumentHint, ArityMask, ExpressionFunction, FunctionCatalog, MAX_ARGUMENTS};
pub use error::ExprError;
pub use format::format_literal;
pub use literal::{parse_as, parse_literal, parse_numeric};
pub use parser::ParseOptions;
pub use scanner::{Span, Token, TokenKind, ValueTokenKind, scan};
