use crate::expression::ExprError;

pub type SpecResult<T> = Result<T, SpecError>;

#[derive(thiserror::Error, Debug)]
pub enum SpecError {
    #[error("format error: {0}")]
    Format(#[from] ExprError),

    #[error("reference error: {0}")]
    Reference(String),

    #[error("condition error: {0}")]
    Condition(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpecError {
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference(msg.into())
    }

    pub fn condition(msg: impl Into<String>) -> Self {
        Self::Condition(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
