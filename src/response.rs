//! Response validation: status, JSON decoding, round-trip id and result/error split.

use serde_json::Value;
use tracing::warn;

use crate::canonical::scalar_str;
use crate::error::{Result, TradeError};
use crate::request::RequestEnvelope;
use crate::types::Param;

/// Status line and body as received from the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

/// String form used to compare request and response ids.
fn id_string(id: &Param) -> String {
    scalar_str(id)
}

/// Validate a raw response to `request` and unwrap its `result`.
pub fn validate(raw: RawResponse, request: &RequestEnvelope) -> Result<Value> {
    if raw.status != 200 {
        warn!("{} failed with HTTP {} {}", request.method, raw.status, raw.reason);
        return Err(TradeError::Transport {
            status: raw.status,
            reason: raw.reason,
        });
    }

    let mut decoded = match serde_json::from_str::<Value>(&raw.body) {
        Ok(value @ Value::Object(_)) => value,
        _ => {
            warn!("{} returned a non-JSON-object body", request.method);
            return Err(TradeError::MalformedResponse { body: raw.body });
        }
    };

    let expected = id_string(&request.id);
    let actual = decoded
        .get("id")
        .map(|id| Param::from_value(id).map(|p| id_string(&p)).unwrap_or_else(|| id.to_string()));
    if actual.as_deref() != Some(expected.as_str()) {
        warn!(
            "{} response id {:?} does not match request id {}",
            request.method, actual, expected
        );
        return Err(TradeError::IdentityMismatch { expected, actual });
    }

    match decoded.as_object_mut().and_then(|obj| obj.remove("result")) {
        Some(result) => Ok(result),
        None => {
            warn!("{} returned an error: {}", request.method, decoded);
            Err(TradeError::Remote {
                method: request.method.clone(),
                response: decoded,
                params: request.params.clone(),
            })
        }
    }
}
