use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{DeploymentVariant, StatusRecord},
    error::ParseError,
};

/// One entry of the status array as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub id: i64,
    pub temperature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figures: Option<i64>,
}

impl StatusPayload {
    pub fn code_for(&self, variant: DeploymentVariant) -> Option<i64> {
        match variant {
            DeploymentVariant::State => self.state,
            DeploymentVariant::Figures => self.figures,
        }
    }
}

/// Body of a status update pushed to the development status server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub id: Option<i64>,
    pub temperature: Option<String>,
    pub state: Option<i64>,
    pub figures: Option<i64>,
}

/// Decodes the status endpoint body. Only the first array entry is read.
pub fn parse_status(raw: &str, variant: DeploymentVariant) -> Result<StatusRecord, ParseError> {
    let value: Value = serde_json::from_str(raw).map_err(ParseError::InvalidJson)?;
    let Value::Array(items) = value else {
        return Err(ParseError::NotAnArray);
    };
    let first = items.into_iter().next().ok_or(ParseError::Empty)?;
    let payload: StatusPayload =
        serde_json::from_value(first).map_err(ParseError::InvalidRecord)?;
    let state_code = payload
        .code_for(variant)
        .ok_or(ParseError::MissingCode {
            field: variant.code_field(),
        })?;

    Ok(StatusRecord {
        id: payload.id,
        temperature: payload.temperature,
        state_code,
    })
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
