//! Comparison operations used by conditions.

use std::{cmp::Ordering, fmt, sync::Arc};

use regex::Regex;

use crate::context::EvaluationContext;
use crate::value::{Value, ValueKind};

/// A named comparison between a condition's variable and its comparand.
///
/// The four flags drive the default null policy in [`ConditionOperation::evaluate_nulls`].
pub trait ConditionOperation: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Name of the operation that always gives the opposite answer, nulls included.
    fn inverse(&self) -> Option<&str> {
        None
    }

    /// Passes when both sides are null.
    fn is_equality(&self) -> bool {
        false
    }

    /// Passes when exactly one side is null.
    fn is_inequality(&self) -> bool {
        false
    }

    /// Never passes when both sides are null.
    fn is_non_equality(&self) -> bool {
        false
    }

    /// Never passes when exactly one side is null.
    fn is_non_inequality(&self) -> bool {
        false
    }

    fn evaluate_nulls(&self, variable_null: bool, comparand_null: bool) -> bool {
        if variable_null && comparand_null {
            !self.is_non_equality() && self.is_equality()
        } else {
            !self.is_non_inequality() && self.is_inequality()
        }
    }

    /// Compares two non-null values. `None` means the comparison cannot be decided.
    fn compare(
        &self,
        variable: &Value<'_>,
        comparand: &Value<'_>,
        ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool>;

    fn evaluate(
        &self,
        variable: &Value<'_>,
        comparand: &Value<'_>,
        ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        if variable.is_null() || comparand.is_null() {
            Some(self.evaluate_nulls(variable.is_null(), comparand.is_null()))
        } else {
            self.compare(variable, comparand, ctx)
        }
    }
}

fn fold_case(value: Value<'static>, case_insensitive: bool) -> Value<'static> {
    match value {
        Value::Str(text) if case_insensitive => Value::str(text.to_lowercase()),
        Value::Char(c) if case_insensitive => Value::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Orders two values. Numbers compare across kinds; anything else is compared after converting
/// the comparand to the variable's kind.
pub(crate) fn order(
    variable: &Value<'_>,
    comparand: &Value<'_>,
    case_insensitive: bool,
) -> Option<Ordering> {
    let (a, b) = (variable.kind(), comparand.kind());
    if a.is_numeric() && b.is_numeric() {
        if a.is_integer() && b.is_integer() {
            return Some(variable.to_i128()?.cmp(&comparand.to_i128()?));
        }
        return variable.to_f64()?.partial_cmp(&comparand.to_f64()?);
    }

    let left = fold_case(variable.clone().into_owned(), case_insensitive);
    let right = fold_case(comparand.convert(a)?, case_insensitive);
    match (&left, &right) {
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Char(x), Value::Char(y)) => Some(x.cmp(y)),
        (x, y) if x.kind().is_numeric() => x.to_f64()?.partial_cmp(&y.to_f64()?),
        (x, y) => (x == y).then_some(Ordering::Equal),
    }
}

/// Equality under the same conversion rules as [`order`]. Values that only support equality
/// (asset references) compare unequal rather than undecided.
fn equal(variable: &Value<'_>, comparand: &Value<'_>, case_insensitive: bool) -> Option<bool> {
    if variable.kind() == ValueKind::Asset {
        return Some(comparand.convert(ValueKind::Asset)? == variable.clone().into_owned());
    }
    order(variable, comparand, case_insensitive).map(|o| o == Ordering::Equal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    Neq,
}

#[derive(Debug)]
struct Comparison {
    name: &'static str,
    inverse: Option<&'static str>,
    relation: Relation,
    case_insensitive: bool,
}

impl ConditionOperation for Comparison {
    fn name(&self) -> &str {
        self.name
    }

    fn inverse(&self) -> Option<&str> {
        self.inverse
    }

    fn is_equality(&self) -> bool {
        matches!(self.relation, Relation::Eq | Relation::Lte | Relation::Gte)
    }

    fn is_inequality(&self) -> bool {
        self.relation == Relation::Neq
    }

    fn is_non_equality(&self) -> bool {
        matches!(self.relation, Relation::Neq | Relation::Lt | Relation::Gt)
    }

    fn is_non_inequality(&self) -> bool {
        self.relation == Relation::Eq
    }

    fn compare(
        &self,
        variable: &Value<'_>,
        comparand: &Value<'_>,
        _ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        let ci = self.case_insensitive;
        match self.relation {
            Relation::Eq => equal(variable, comparand, ci),
            Relation::Neq => equal(variable, comparand, ci).map(|eq| !eq),
            Relation::Lt => Some(order(variable, comparand, ci)? == Ordering::Less),
            Relation::Gt => Some(order(variable, comparand, ci)? == Ordering::Greater),
            Relation::Lte => Some(order(variable, comparand, ci)? != Ordering::Greater),
            Relation::Gte => Some(order(variable, comparand, ci)? != Ordering::Less),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTest {
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Debug)]
struct TextOperation {
    name: &'static str,
    test: TextTest,
    case_insensitive: bool,
}

impl ConditionOperation for TextOperation {
    fn name(&self) -> &str {
        self.name
    }

    fn is_equality(&self) -> bool {
        true
    }

    fn compare(
        &self,
        variable: &Value<'_>,
        comparand: &Value<'_>,
        _ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        let (mut haystack, mut needle) = (variable.to_string(), comparand.to_string());
        if self.case_insensitive {
            haystack = haystack.to_lowercase();
            needle = needle.to_lowercase();
        }
        Some(match self.test {
            TextTest::Contains => haystack.contains(&needle),
            TextTest::StartsWith => haystack.starts_with(&needle),
            TextTest::EndsWith => haystack.ends_with(&needle),
        })
    }
}

/// The comparand is a regular expression searched for in the variable's text.
#[derive(Debug)]
struct Matches;

impl ConditionOperation for Matches {
    fn name(&self) -> &str {
        "matches"
    }

    fn compare(
        &self,
        variable: &Value<'_>,
        comparand: &Value<'_>,
        _ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        let pattern = comparand.to_string();
        match Regex::new(&pattern) {
            Ok(regex) => Some(regex.is_match(&variable.to_string())),
            Err(err) => {
                tracing::debug!(%pattern, %err, "invalid pattern in condition");
                None
            }
        }
    }
}

/// Type-name relations, decided by the evaluation context.
#[derive(Debug)]
struct Assignable {
    name: &'static str,
    to: bool,
}

impl ConditionOperation for Assignable {
    fn name(&self) -> &str {
        self.name
    }

    fn compare(
        &self,
        variable: &Value<'_>,
        comparand: &Value<'_>,
        ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        let (variable, comparand) = (variable.to_string(), comparand.to_string());
        if self.to {
            ctx?.is_assignable(&variable, &comparand)
        } else {
            ctx?.is_assignable(&comparand, &variable)
        }
    }
}

#[derive(Debug)]
struct IsType;

impl ConditionOperation for IsType {
    fn name(&self) -> &str {
        "is-type"
    }

    fn compare(
        &self,
        variable: &Value<'_>,
        comparand: &Value<'_>,
        ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        ctx?.is_type(variable, &comparand.to_string())
    }
}

/// Presence test. Only the variable matters.
#[derive(Debug)]
struct Presence {
    name: &'static str,
    inverse: &'static str,
    present: bool,
}

impl ConditionOperation for Presence {
    fn name(&self) -> &str {
        self.name
    }

    fn inverse(&self) -> Option<&str> {
        Some(self.inverse)
    }

    fn compare(
        &self,
        _variable: &Value<'_>,
        _comparand: &Value<'_>,
        _ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        Some(self.present)
    }

    fn evaluate(
        &self,
        variable: &Value<'_>,
        _comparand: &Value<'_>,
        _ctx: Option<&dyn EvaluationContext>,
    ) -> Option<bool> {
        Some(variable.is_null() != self.present)
    }
}

/// The `eq` operation. Used for shorthand conditions.
pub(crate) fn equals() -> Arc<dyn ConditionOperation> {
    Arc::new(Comparison {
        name: "eq",
        inverse: Some("neq"),
        relation: Relation::Eq,
        case_insensitive: false,
    })
}

pub(crate) fn builtins() -> Vec<Arc<dyn ConditionOperation>> {
    let mut out: Vec<Arc<dyn ConditionOperation>> = Vec::new();
    let comparisons = [
        ("lt", "lt-i", None, Relation::Lt),
        ("gt", "gt-i", None, Relation::Gt),
        ("lte", "lte-i", None, Relation::Lte),
        ("gte", "gte-i", None, Relation::Gte),
        ("eq", "eq-i", Some(("neq", "neq-i")), Relation::Eq),
        ("neq", "neq-i", Some(("eq", "eq-i")), Relation::Neq),
    ];
    for (name, name_ci, inverse, relation) in comparisons {
        out.push(Arc::new(Comparison {
            name,
            inverse: inverse.map(|(plain, _)| plain),
            relation,
            case_insensitive: false,
        }));
        out.push(Arc::new(Comparison {
            name: name_ci,
            inverse: inverse.map(|(_, ci)| ci),
            relation,
            case_insensitive: true,
        }));
    }

    let text = [
        ("contains", "contains-i", TextTest::Contains),
        ("starts with", "starts with-i", TextTest::StartsWith),
        ("ends with", "ends with-i", TextTest::EndsWith),
    ];
    for (name, name_ci, test) in text {
        out.push(Arc::new(TextOperation {
            name,
            test,
            case_insensitive: false,
        }));
        out.push(Arc::new(TextOperation {
            name: name_ci,
            test,
            case_insensitive: true,
        }));
    }

    out.push(Arc::new(Matches));
    out.push(Arc::new(Assignable {
        name: "assignable-to",
        to: true,
    }));
    out.push(Arc::new(Assignable {
        name: "assignable-from",
        to: false,
    }));
    out.push(Arc::new(IsType));
    out.push(Arc::new(Presence {
        name: "included",
        inverse: "excluded",
        present: true,
    }));
    out.push(Arc::new(Presence {
        name: "excluded",
        inverse: "included",
        present: false,
    }));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/condition/operation.rs"]
mod tests;
