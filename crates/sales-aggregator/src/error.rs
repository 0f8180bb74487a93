use thiserror::Error;

/// A quantity or revenue field that has no numeric prefix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a number: {text:?}")]
pub struct NumberError {
    pub text: String,
}

impl NumberError {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
        }
    }
}

/// Errors that abort an aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("line {line}: malformed date {date:?}, expected YYYY-MM-DD")]
    MalformedDate { line: usize, date: String },
}
