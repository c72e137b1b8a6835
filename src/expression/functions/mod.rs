//! The built-in function set.

mod ballistics;
mod binary;
mod constants;
mod text;
mod unary;

use std::sync::Arc;

use crate::expression::catalog::{ExpressionFunction, FunctionCatalog};

pub(crate) fn register_builtins(catalog: &FunctionCatalog) {
    let builtins: Vec<Arc<dyn ExpressionFunction>> = constants::all()
        .into_iter()
        .chain(unary::all())
        .chain(binary::all())
        .chain(text::all())
        .chain([ballistics::function()])
        .collect();
    for function in builtins {
        catalog.register(function);
    }
}
