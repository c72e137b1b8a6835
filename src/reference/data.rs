use std::fmt;

use crate::expression::ExprError;
use crate::foundation::text::{ESCAPE, escape, find_closing_paren, find_unescaped, unescape};

/// Where a data reference starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRoot {
    /// The asset being evaluated.
    This,
    /// The property that owns the expression.
    SelfRef,
    /// The current element value while iterating a collection.
    Value,
    /// The current element index while iterating a list.
    Index,
    /// The current key while iterating a dictionary.
    Key,
    /// Another property of the asset, by name.
    Property(String),
}

impl DataRoot {
    fn keyword(name: &str) -> Option<Self> {
        const KEYWORDS: [(&str, DataRoot); 5] = [
            ("This", DataRoot::This),
            ("Self", DataRoot::SelfRef),
            ("Value", DataRoot::Value),
            ("Index", DataRoot::Index),
            ("Key", DataRoot::Key),
        ];
        KEYWORDS
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, root)| root)
    }
}

/// A property read off a data reference root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataProperty {
    Excluded,
    Included,
    Key,
    AssetName,
    Difficulty,
    Indices,
    IsLegacy,
    ValueType,
    Count,
}

impl DataProperty {
    const ALL: [Self; 9] = [
        Self::Excluded,
        Self::Included,
        Self::Key,
        Self::AssetName,
        Self::Difficulty,
        Self::Indices,
        Self::IsLegacy,
        Self::ValueType,
        Self::Count,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Excluded => "Excluded",
            Self::Included => "Included",
            Self::Key => "Key",
            Self::AssetName => "AssetName",
            Self::Difficulty => "Difficulty",
            Self::Indices => "Indices",
            Self::IsLegacy => "IsLegacy",
            Self::ValueType => "ValueType",
            Self::Count => "Count",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// `Root(.Property)*[index,...]{json}`
///
/// The parameter bag is stored as compact JSON text so the reference stays hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataRef {
    pub root: DataRoot,
    pub chain: Vec<DataProperty>,
    pub index: Option<Vec<i32>>,
    pub parameters: Option<String>,
}

impl DataRef {
    pub fn new(root: DataRoot) -> Self {
        Self {
            root,
            chain: Vec::new(),
            index: None,
            parameters: None,
        }
    }

    pub fn property(mut self, property: DataProperty) -> Self {
        self.chain.push(property);
        self
    }

    pub fn parameters(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        self.parameters
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
    }

    /// Parses raw reference text, with or without the leading `#`.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let (mut rest, mut pos) = match text.strip_prefix('#') {
            Some(r) => (r, 1),
            None => (text, 0),
        };

        let (segment, len, parenthesized) = read_segment(rest, pos)?;
        let forced = !parenthesized && segment.starts_with(ESCAPE);
        let name = unescape(segment, pos + usize::from(parenthesized))?;
        let root = match DataRoot::keyword(&name) {
            Some(root) if !forced => root,
            _ => DataRoot::Property(name.into_owned()),
        };
        rest = &rest[len..];
        pos += len;

        let mut chain = Vec::new();
        while let Some(r) = rest.strip_prefix('.') {
            pos += 1;
            let (segment, len, parenthesized) = read_segment(r, pos)?;
            let name = unescape(segment, pos + usize::from(parenthesized))?;
            let property = DataProperty::from_name(&name).ok_or_else(|| {
                ExprError::new(pos, format!("unknown data-ref property `{name}`"))
            })?;
            chain.push(property);
            rest = &r[len..];
            pos += len;
        }

        let mut index = None;
        if let Some(r) = rest.strip_prefix('[') {
            let close = r
                .find(']')
                .ok_or_else(|| ExprError::new(pos, "expected ']' to close the index"))?;
            let values = r[..close]
                .split(',')
                .map(|part| part.trim().parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ExprError::new(pos + 1, "expected integer index"))?;
            index = Some(values);
            rest = &r[close + 1..];
            pos += close + 2;
        }

        let mut parameters = None;
        if rest.starts_with('{') {
            let bag: serde_json::Map<String, serde_json::Value> = serde_json::from_str(rest)
                .map_err(|e| ExprError::new(pos, format!("invalid data-ref parameters: {e}")))?;
            parameters = Some(
                serde_json::to_string(&bag)
                    .map_err(|e| ExprError::new(pos, format!("invalid data-ref parameters: {e}")))?,
            );
            rest = "";
        }

        if !rest.is_empty() {
            return Err(ExprError::new(pos, "unexpected content in data reference"));
        }
        Ok(Self {
            root,
            chain,
            index,
            parameters,
        })
    }
}

/// Reads one `(text)` or bare segment. Returns the segment text, the consumed length and whether
/// it was parenthesized.
fn read_segment(text: &str, pos: usize) -> Result<(&str, usize, bool), ExprError> {
    if let Some(inner) = text.strip_prefix('(') {
        let close = find_closing_paren(inner)
            .ok_or_else(|| ExprError::new(pos, "expected ')' to close the segment"))?;
        return Ok((&inner[..close], close + 2, true));
    }
    let len = find_unescaped(text, |c| matches!(c, '.' | '[' | '{')).unwrap_or(text.len());
    if len == 0 {
        return Err(ExprError::new(pos, "expected data-ref segment"));
    }
    Ok((&text[..len], len, false))
}

impl fmt::Display for DataRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            DataRoot::This => f.write_str("This")?,
            DataRoot::SelfRef => f.write_str("Self")?,
            DataRoot::Value => f.write_str("Value")?,
            DataRoot::Index => f.write_str("Index")?,
            DataRoot::Key => f.write_str("Key")?,
            DataRoot::Property(name) => {
                let escaped = escape(name);
                if name.contains(['.', '[', '{']) {
                    write!(f, "({escaped})")?;
                } else {
                    if DataRoot::keyword(name).is_some() {
                        write!(f, "{ESCAPE}")?;
                    }
                    f.write_str(&escaped)?;
                }
            }
        }
        for property in &self.chain {
            write!(f, ".{}", property.name())?;
        }
        if let Some(index) = &self.index {
            f.write_str("[")?;
            for (i, v) in index.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("]")?;
        }
        if let Some(parameters) = &self.parameters {
            f.write_str(parameters)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reference/data.rs"]
mod tests;
