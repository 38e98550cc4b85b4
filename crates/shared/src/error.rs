use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    HttpStatus,
    Parse,
    SinkUnavailable,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("status body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("status body must be a JSON array")]
    NotAnArray,
    #[error("status array is empty")]
    Empty,
    #[error("first status entry is malformed: {0}")]
    InvalidRecord(#[source] serde_json::Error),
    #[error("first status entry is missing integer field '{field}'")]
    MissingCode { field: &'static str },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Parse
    }
}
