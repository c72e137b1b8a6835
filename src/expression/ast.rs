use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::expression::catalog::{ExpressionFunction, FunctionCatalog};
use crate::expression::error::ExprError;
use crate::expression::parser::{ParseOptions, parse_expression};
use crate::reference::{DataRef, PropertyRef};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    Function(FunctionCall),
    Literal(Value<'static>),
    Property(PropertyRef),
    Data(DataRef),
}

impl ExprNode {
    /// Whether the node can be evaluated without a context.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Function(call) => call.is_constant(),
            Self::Literal(_) => true,
            Self::Property(_) | Self::Data(_) => false,
        }
    }
}

/// A resolved call. Compares by function name and arguments.
#[derive(Clone)]
pub struct FunctionCall {
    function: Arc<dyn ExpressionFunction>,
    args: Box<[ExprNode]>,
}

impl FunctionCall {
    pub fn new(function: Arc<dyn ExpressionFunction>, args: Vec<ExprNode>) -> Self {
        Self {
            function,
            args: args.into_boxed_slice(),
        }
    }

    pub fn name(&self) -> &str {
        self.function.name()
    }

    pub fn function(&self) -> &Arc<dyn ExpressionFunction> {
        &self.function
    }

    pub fn args(&self) -> &[ExprNode] {
        &self.args
    }

    pub fn is_constant(&self) -> bool {
        self.args.iter().all(ExprNode::is_constant)
    }
}

impl fmt::Debug for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionCall")
            .field("name", &self.name())
            .field("args", &self.args)
            .finish()
    }
}

impl PartialEq for FunctionCall {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.args == other.args
    }
}

impl Eq for FunctionCall {}

impl Hash for FunctionCall {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.args.hash(state);
    }
}

/// A parsed expression. The root is always a function call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    root: FunctionCall,
}

impl Expression {
    pub fn new(root: FunctionCall) -> Self {
        Self { root }
    }

    pub fn parse(src: &str, catalog: &FunctionCatalog) -> Result<Self, ExprError> {
        parse_expression(src, catalog, &ParseOptions::default())
    }

    pub fn parse_with(
        src: &str,
        catalog: &FunctionCatalog,
        options: &ParseOptions,
    ) -> Result<Self, ExprError> {
        parse_expression(src, catalog, options)
    }

    pub fn root(&self) -> &FunctionCall {
        &self.root
    }

    pub fn is_constant(&self) -> bool {
        self.root.is_constant()
    }
}
