//! JSON forms of conditions, switch cases and switch values.
//!
//! ```json
//! [
//!   { "And": [{ "Variable": "Uniform_Scale", "Operation": "eq", "Comparand": true }], "Value": 1 },
//!   { "When": "Has_Scope", "Cases": [{ "Value": "=MUL(@Zoom 2)" }] },
//!   "0, 0, 0"
//! ]
//! ```
//!
//! Strings in value position are descriptors (`@property`, `#data`, `=EXPR`, `%literal`, or plain
//! text). A condition's `Variable` string names a property when it has no prefix.

use serde_json::{Map, Number, Value as Json, json};

use crate::condition::{Condition, Junction, OperationRegistry, SwitchCase, SwitchValue};
use crate::expression::literal::smallest_integer;
use crate::expression::{FunctionCatalog, ParseOptions};
use crate::foundation::error::{SpecError, SpecResult};
use crate::reference::PropertyRef;
use crate::typed::SpecValue;
use crate::value::Value;

const CASES: &str = "Cases";
const VALUE: &str = "Value";

/// Reads condition and switch JSON, resolving functions and operations by name.
#[derive(Debug, Clone, Copy)]
pub struct SpecLoader<'a> {
    catalog: &'a FunctionCatalog,
    operations: &'a OperationRegistry,
    options: ParseOptions,
}

impl<'a> SpecLoader<'a> {
    pub fn new(catalog: &'a FunctionCatalog, operations: &'a OperationRegistry) -> Self {
        Self {
            catalog,
            operations,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Value descriptor; plain text is a string literal.
    pub fn descriptor(&self, text: &str) -> SpecResult<SpecValue> {
        SpecValue::parse_descriptor(text, self.catalog, &self.options)
    }

    /// Condition variable descriptor; plain text is a property name.
    pub fn variable(&self, text: &str) -> SpecResult<SpecValue> {
        if text.starts_with(['@', '#', '=', '%']) {
            self.descriptor(text)
        } else {
            Ok(SpecValue::Property(PropertyRef::parse(text)?))
        }
    }

    pub fn value_from_json(&self, json: &Json) -> SpecResult<SpecValue> {
        match json {
            Json::String(text) => self.descriptor(text),
            Json::Array(_) => Ok(SpecValue::Switch(self.switch_from_json(json)?)),
            Json::Object(map) if map.contains_key(CASES) => {
                Ok(SpecValue::Switch(self.switch_from_json(json)?))
            }
            Json::Object(map) if map.contains_key("Operation") => {
                Ok(SpecValue::from(self.condition_from_json(json)?))
            }
            Json::Object(_) => Err(SpecError::serde(
                "expected a value, a switch or a condition object",
            )),
            scalar => Ok(SpecValue::Literal(scalar_value(scalar)?)),
        }
    }

    /// `true`/`false`, `null` (never passes), a property name (passes when the property is
    /// `true`), or `{"Variable", "Operation", "Comparand", "Inverted"}`.
    pub fn condition_from_json(&self, json: &Json) -> SpecResult<Condition> {
        let map = match json {
            Json::Bool(value) => return Ok(Condition::constant(*value)),
            Json::Null => return Ok(Condition::constant(false)),
            Json::String(text) => return Ok(Condition::is_true(self.variable(text)?)),
            Json::Object(map) => map,
            _ => return Err(SpecError::condition("expected a condition")),
        };

        let name = map
            .get("Operation")
            .and_then(Json::as_str)
            .ok_or_else(|| SpecError::condition("condition is missing `Operation`"))?;
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| SpecError::condition(format!("unknown operation `{name}`")))?;

        let variable = match map.get("Variable") {
            Some(Json::String(text)) => self.variable(text)?,
            Some(other) => self.value_from_json(other)?,
            None => return Err(SpecError::condition("condition is missing `Variable`")),
        };
        let comparand = map
            .get("Comparand")
            .map(|c| self.value_from_json(c))
            .transpose()?;
        let inverted = match map.get("Inverted") {
            None | Some(Json::Null) => false,
            Some(Json::Bool(v)) => *v,
            Some(_) => return Err(SpecError::condition("`Inverted` must be a boolean")),
        };

        Ok(Condition::new(variable, operation, comparand).with_inverted(inverted))
    }

    pub fn case_from_json(&self, json: &Json) -> SpecResult<SwitchCase> {
        let Json::Object(map) = json else {
            return Ok(SwitchCase::Default(self.value_from_json(json)?));
        };

        let value = if let Some(cases) = map.get(CASES) {
            SpecValue::Switch(self.switch_from_json(cases)?)
        } else if let Some(value) = map.get(VALUE) {
            self.value_from_json(value)?
        } else {
            return Err(SpecError::condition("switch case needs `Value` or `Cases`"));
        };

        if let Some(when) = map.get("When").or_else(|| map.get("Case")) {
            return Ok(SwitchCase::Conditional {
                when: self.condition_from_json(when)?,
                value,
            });
        }

        for junction in [Junction::And, Junction::Or] {
            let Some(list) = map.get(junction.key()) else {
                continue;
            };
            let items = list.as_array().ok_or_else(|| {
                SpecError::condition(format!("`{}` must be an array", junction.key()))
            })?;
            if items.is_empty() {
                return Err(SpecError::condition(format!(
                    "`{}` needs at least one condition",
                    junction.key()
                )));
            }
            let conditions = items
                .iter()
                .map(|item| self.condition_from_json(item))
                .collect::<SpecResult<Vec<_>>>()?;
            return Ok(SwitchCase::Complex {
                junction,
                conditions,
                value,
            });
        }

        Ok(SwitchCase::Default(value))
    }

    /// A case array, or an object whose `Cases` holds one.
    #[tracing::instrument(level = "debug", skip_all, err)]
    pub fn switch_from_json(&self, json: &Json) -> SpecResult<SwitchValue> {
        let items = match json {
            Json::Array(items) => items,
            Json::Object(map) => map
                .get(CASES)
                .and_then(Json::as_array)
                .ok_or_else(|| SpecError::condition("expected `Cases` array"))?,
            _ => return Err(SpecError::condition("expected a switch")),
        };
        let cases = items
            .iter()
            .map(|item| self.case_from_json(item))
            .collect::<SpecResult<Vec<_>>>()?;
        tracing::debug!(cases = cases.len(), "loaded switch");
        Ok(SwitchValue::new(cases))
    }

    pub fn switch_from_str(&self, text: &str) -> SpecResult<SwitchValue> {
        let json: Json = serde_json::from_str(text).map_err(|e| SpecError::serde(e.to_string()))?;
        self.switch_from_json(&json)
    }
}

fn scalar_value(json: &Json) -> SpecResult<Value<'static>> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(v) => Ok(Value::Bool(*v)),
        Json::Number(n) => number_value(n),
        Json::String(s) => Ok(Value::str(s.clone())),
        _ => Err(SpecError::serde("expected a scalar")),
    }
}

fn number_value(n: &Number) -> SpecResult<Value<'static>> {
    let integer = n
        .as_u64()
        .map(i128::from)
        .or_else(|| n.as_i64().map(i128::from));
    if let Some(value) = integer.and_then(smallest_integer) {
        return Ok(value);
    }
    n.as_f64()
        .map(Value::F64)
        .ok_or_else(|| SpecError::serde(format!("unsupported number {n}")))
}

/// Numbers that read back as the same kind are written as JSON numbers; everything else goes
/// through descriptor text.
fn literal_json(value: &Value<'_>) -> Json {
    let number = match value {
        Value::Null => return Json::Null,
        Value::Bool(v) => return Json::Bool(*v),
        Value::I32(v) => Some(json!(v)),
        Value::I64(v) => Some(json!(v)),
        Value::U32(v) => Some(json!(v)),
        Value::U64(v) => Some(json!(v)),
        Value::F64(v) if v.is_finite() && v.fract() != 0.0 => Some(json!(v)),
        _ => None,
    };
    match number {
        Some(json)
            if json
                .as_number()
                .is_some_and(|n| number_value(n).is_ok_and(|loaded| &loaded == value)) =>
        {
            json
        }
        _ => Json::String(SpecValue::Literal(value.clone().into_owned()).to_string()),
    }
}

impl SpecValue {
    pub fn to_json(&self) -> Json {
        match self {
            Self::Literal(value) => literal_json(value),
            Self::Switch(switch) => switch.to_json(),
            Self::Condition(condition) => condition.to_json(),
            other => Json::String(other.to_string()),
        }
    }
}

impl Condition {
    pub fn to_json(&self) -> Json {
        if let Some(value) = self.as_constant() {
            return Json::Bool(value);
        }
        let variable = match &self.variable {
            SpecValue::Property(r) => Json::String(r.to_string()),
            // unprefixed text would name a property
            SpecValue::Literal(Value::Str(text)) => Json::String(format!("%{text}")),
            other => other.to_json(),
        };
        let mut map = Map::new();
        map.insert("Variable".into(), variable);
        map.insert("Operation".into(), Json::String(self.operation.name().into()));
        if let Some(comparand) = &self.comparand {
            map.insert("Comparand".into(), comparand.to_json());
        }
        if self.inverted {
            map.insert("Inverted".into(), Json::Bool(true));
        }
        Json::Object(map)
    }
}

impl SwitchCase {
    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        match self {
            Self::Default(value) => {
                if matches!(value, SpecValue::Literal(_)) {
                    return value.to_json();
                }
            }
            Self::Conditional { when, .. } => {
                map.insert("When".into(), when.to_json());
            }
            Self::Complex {
                junction,
                conditions,
                ..
            } => {
                let list = conditions.iter().map(Condition::to_json).collect();
                map.insert(junction.key().into(), Json::Array(list));
            }
        }
        match self.value() {
            SpecValue::Switch(switch) => {
                map.insert(CASES.into(), Json::Array(switch.cases_json()));
            }
            value => {
                map.insert(VALUE.into(), value.to_json());
            }
        }
        Json::Object(map)
    }
}

impl SwitchValue {
    fn cases_json(&self) -> Vec<Json> {
        self.cases().iter().map(SwitchCase::to_json).collect()
    }

    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        map.insert(CASES.into(), Json::Array(self.cases_json()));
        Json::Object(map)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/condition/json.rs"]
mod tests;
