use std::fmt;

use crate::expression::ExprError;
use crate::foundation::text::{ESCAPE, escape, unescape};

/// Which file a property reference reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyContext {
    Property,
    Localization,
    Bundle,
    CrossReferenceProperty,
    CrossReferenceLocalization,
    CrossReference,
}

impl PropertyContext {
    const ALL: [Self; 6] = [
        Self::Property,
        Self::Localization,
        Self::Bundle,
        Self::CrossReferenceProperty,
        Self::CrossReferenceLocalization,
        Self::CrossReference,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Property => "$prop$",
            Self::Localization => "$local$",
            Self::Bundle => "$bndl$",
            Self::CrossReferenceProperty => "$cr.prop$",
            Self::CrossReferenceLocalization => "$cr.local$",
            Self::CrossReference => "$cr$",
        }
    }
}

/// `[$context$::][Owner::]Name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    pub context: Option<PropertyContext>,
    pub owner: Option<String>,
    pub name: String,
}

impl PropertyRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            context: None,
            owner: None,
            name: name.into(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_context(mut self, context: PropertyContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Parses raw reference text. A leading `@` and one level of wrapping parentheses are
    /// accepted.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let mut base = 0;
        let mut rest = text;
        if let Some(r) = rest.strip_prefix('@') {
            rest = r;
            base += 1;
        }
        if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            rest = inner;
            base += 1;
        }

        let mut context = None;
        for candidate in PropertyContext::ALL {
            if let Some(r) = rest
                .strip_prefix(candidate.tag())
                .and_then(|r| r.strip_prefix("::"))
            {
                base += rest.len() - r.len();
                rest = r;
                context = Some(candidate);
                break;
            }
        }

        let (owner, name, name_base) = match find_separator(rest) {
            Some(i) => (
                Some(unescape(&rest[..i], base)?.into_owned()),
                &rest[i + 2..],
                base + i + 2,
            ),
            None => (None, rest, base),
        };
        if name.is_empty() {
            return Err(ExprError::new(name_base, "expected property name"));
        }
        Ok(Self {
            context,
            owner,
            name: unescape(name, name_base)?.into_owned(),
        })
    }
}

/// Byte index of the first unescaped `::`.
fn find_separator(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b':' if bytes[i + 1] == b':' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = self.context {
            write!(f, "{}::", context.tag())?;
        }
        if let Some(owner) = &self.owner {
            write!(f, "{}::", escape_colons(&escape(owner)))?;
        }
        f.write_str(&escape_colons(&escape(&self.name)))
    }
}

fn escape_colons(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_colon = false;
    for c in text.chars() {
        if c == ':' && prev_colon {
            out.push(ESCAPE);
        }
        prev_colon = c == ':';
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/reference/property.rs"]
mod tests;
