//! Outbound request assembly: tonce, id, signed headers and JSON body.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONNECTION, CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;

use crate::canonical::{canonicalize, FieldValue, SignedField};
use crate::credentials::Credentials;
use crate::error::{Result, TradeError};
use crate::signing::build_auth_header;
use crate::types::Param;

/// Every private call is signed as a POST.
pub const REQUEST_METHOD: &str = "post";

/// `Json-Rpc-Tonce`; header names are case-insensitive and stored lowercase.
pub const TONCE_HEADER: &str = "json-rpc-tonce";

/// All fields that take part in the signature of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub tonce: i64,
    pub accesskey: String,
    pub requestmethod: String,
    pub id: Param,
    pub method: String,
    pub params: Vec<Param>,
}

impl RequestEnvelope {
    pub fn field(&self, field: SignedField) -> FieldValue<'_> {
        match field {
            SignedField::Tonce => FieldValue::Int(self.tonce),
            SignedField::AccessKey => FieldValue::Text(&self.accesskey),
            SignedField::RequestMethod => FieldValue::Text(&self.requestmethod),
            SignedField::Id => FieldValue::Scalar(&self.id),
            SignedField::Method => FieldValue::Text(&self.method),
            SignedField::Params => FieldValue::List(&self.params),
        }
    }
}

/// Header values derived from the envelope and the credentials.
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub authorization: String,
    pub tonce: i64,
    pub connection: &'static str,
}

impl SignedHeaders {
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&self.authorization)
            .map_err(|e| TradeError::InvalidHeader(format!("Authorization: {}", e)))?;
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(TONCE_HEADER, HeaderValue::from(self.tonce));
        headers.insert(CONNECTION, HeaderValue::from_static(self.connection));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// JSON body: only `method`, `params` and `id` travel in the body.
#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    method: &'a str,
    params: &'a [Param],
    id: &'a Param,
}

/// A fully built call, ready for the transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub envelope: RequestEnvelope,
    pub headers: SignedHeaders,
    pub body: String,
}

impl PreparedRequest {
    pub fn canonical_string(&self) -> String {
        canonicalize(&self.envelope)
    }
}

/// Current time in microseconds, used as the request nonce.
pub fn current_tonce() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or_default()
}

/// Build and sign a request using the current time as tonce.
pub fn build(
    credentials: &Credentials,
    method: &str,
    params: Vec<Param>,
    explicit_id: Option<Param>,
) -> Result<PreparedRequest> {
    build_with_tonce(credentials, current_tonce(), method, params, explicit_id)
}

/// NaN and infinities have no JSON form; the body would carry `null` while the
/// signature covers `NaN`.
fn check_finite(what: &str, value: &Param) -> Result<()> {
    match value {
        Param::Float(f) if !f.is_finite() => Err(TradeError::InvalidParam(format!(
            "{} is not a finite number: {}",
            what, f
        ))),
        _ => Ok(()),
    }
}

/// Build and sign a request for a given tonce.
///
/// The id falls back to the tonce when the caller does not supply one.
pub fn build_with_tonce(
    credentials: &Credentials,
    tonce: i64,
    method: &str,
    params: Vec<Param>,
    explicit_id: Option<Param>,
) -> Result<PreparedRequest> {
    for (index, param) in params.iter().enumerate() {
        check_finite(&format!("{} param #{}", method, index), param)?;
    }
    if let Some(id) = &explicit_id {
        check_finite("request id", id)?;
    }

    let envelope = RequestEnvelope {
        tonce,
        accesskey: credentials.access_key().to_string(),
        requestmethod: REQUEST_METHOD.to_string(),
        id: explicit_id.unwrap_or(Param::Int(tonce)),
        method: method.to_string(),
        params,
    };

    let signature = credentials.sign(&canonicalize(&envelope));
    let headers = SignedHeaders {
        authorization: build_auth_header(credentials.access_key(), &signature),
        tonce,
        connection: "Keep-Alive",
    };

    let body = serde_json::to_string(&RequestBody {
        method: &envelope.method,
        params: &envelope.params,
        id: &envelope.id,
    })?;

    debug!(
        "Built {} request: id={:?}, tonce={}",
        envelope.method, envelope.id, tonce
    );

    Ok(PreparedRequest {
        envelope,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const TONCE: i64 = 1_377_743_828_095_093;

    fn credentials() -> Credentials {
        Credentials::new("ak", "sk")
    }

    #[test]
    fn test_id_defaults_to_tonce() {
        let request = build_with_tonce(&credentials(), TONCE, "getAccountInfo", vec![], None).unwrap();
        assert_eq!(request.envelope.id, Param::Int(TONCE));
        assert_eq!(request.envelope.requestmethod, "post");
        assert_eq!(request.envelope.accesskey, "ak");
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let request =
            build_with_tonce(&credentials(), TONCE, "getAccountInfo", vec![], Some(Param::Int(1)))
                .unwrap();
        assert_eq!(request.envelope.id, Param::Int(1));
        assert!(request.canonical_string().contains("&id=1&"));
    }

    #[test]
    fn test_signed_headers() {
        let request =
            build_with_tonce(&credentials(), TONCE, "getAccountInfo", vec![], Some(Param::Int(1)))
                .unwrap();
        assert_eq!(
            request.headers.authorization,
            "Basic YWs6MzZiNTU2NDNiZDA1ODkwZjExNzJjMzY3YjA4N2ZiYzM4NzUzYzIzOQ=="
        );

        let map = request.headers.to_header_map().unwrap();
        assert_eq!(map.get(TONCE_HEADER).unwrap(), "1377743828095093");
        assert_eq!(map.get(CONNECTION).unwrap(), "Keep-Alive");
        assert_eq!(map.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_body_excludes_signing_only_fields() {
        let request = build_with_tonce(
            &credentials(),
            TONCE,
            "buyOrder",
            vec![Param::Float(500.0), Param::Float(0.25)],
            None,
        )
        .unwrap();
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            json!({ "method": "buyOrder", "params": [500.0, 0.25], "id": TONCE })
        );
        assert!(body.get("tonce").is_none());
        assert!(body.get("accesskey").is_none());
        assert!(body.get("requestmethod").is_none());
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        let err = build_with_tonce(
            &credentials(),
            TONCE,
            "buyOrder",
            vec![Param::Float(f64::NAN), Param::Float(0.25)],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TradeError::InvalidParam(_)));

        let err = build_with_tonce(
            &credentials(),
            TONCE,
            "sellOrder",
            vec![Param::Float(500.0), Param::Float(f64::INFINITY)],
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("sellOrder param #1"));

        let err = build_with_tonce(
            &credentials(),
            TONCE,
            "getAccountInfo",
            vec![],
            Some(Param::Float(f64::NEG_INFINITY)),
        )
        .unwrap_err();
        assert!(matches!(err, TradeError::InvalidParam(_)));
    }

    #[test]
    fn test_current_tonce_is_microseconds() {
        let tonce = current_tonce();
        // later than 2020-01-01 in microseconds
        assert!(tonce > 1_577_836_800_000_000);
    }
}
