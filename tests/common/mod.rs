//! Common test utilities for btcchina-trade-sdk tests

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use btcchina_trade_sdk::{
    canonicalize, verify, ClientConfig, Credentials, Param, RequestEnvelope, TradeClient,
    REQUEST_METHOD, TONCE_HEADER,
};
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const ACCESS_KEY: &str = "test-access-key";
pub const SECRET_KEY: &str = "test-secret-key";
pub const API_PATH: &str = "/api_trade_v1.php";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer, secret_key: &str) -> TradeClient {
    let config = ClientConfig::default().with_endpoint(format!("{}{}", server.uri(), API_PATH));
    TradeClient::with_config(Credentials::new(ACCESS_KEY, secret_key), config)
        .expect("client should build")
}

#[derive(Debug, Deserialize)]
struct Body {
    method: String,
    params: Vec<Param>,
    id: Value,
}

/// Stub exchange: checks the signature the way the server does and echoes
/// the request id back with a fixed `result`.
pub struct SignedEcho {
    pub result: Value,
}

impl SignedEcho {
    pub fn new(result: Value) -> Self {
        Self { result }
    }

    fn signature_is_valid(request: &Request, body: &Body) -> bool {
        let tonce = request
            .headers
            .get(TONCE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());
        let auth = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Basic "))
            .and_then(|v| BASE64.decode(v).ok())
            .and_then(|v| String::from_utf8(v).ok());

        let (Some(tonce), Some(auth)) = (tonce, auth) else {
            return false;
        };
        let Some((access_key, digest)) = auth.split_once(':') else {
            return false;
        };
        let Some(id) = Param::from_value(&body.id) else {
            return false;
        };

        let envelope = RequestEnvelope {
            tonce,
            accesskey: access_key.to_string(),
            requestmethod: REQUEST_METHOD.to_string(),
            id,
            method: body.method.clone(),
            params: body.params.clone(),
        };
        access_key == ACCESS_KEY && verify(SECRET_KEY, &canonicalize(&envelope), digest)
    }
}

impl Respond for SignedEcho {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Body = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };
        if !Self::signature_is_valid(request, &body) {
            return ResponseTemplate::new(401);
        }
        ResponseTemplate::new(200).set_body_json(json!({
            "id": body.id,
            "result": self.result,
        }))
    }
}
