//! Main TradeClient facade for the SDK.
//!
//! Every remote method goes through [`TradeClient::call`]; the typed helpers
//! only fix the method name and the order of its positional params.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::credentials::Credentials;
use crate::error::Result;
use crate::request;
use crate::response::validate;
use crate::rpc::RpcClient;
use crate::types::{
    Param, BUY_ORDER, CANCEL_ORDER, GET_ACCOUNT_INFO, GET_DEPOSITS, GET_MARKET_DEPTH2, GET_ORDER,
    GET_ORDERS, GET_TRANSACTIONS, GET_WITHDRAWAL, GET_WITHDRAWALS, REQUEST_WITHDRAWAL, SELL_ORDER,
};

/// Production trade endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.btcchina.com/api_trade_v1.php";

/// Configuration for the trade client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL the signed requests are POSTed to
    pub endpoint: String,
    /// Overall request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Point the client at another endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The main trade API client.
///
/// Holds the immutable credentials and a pooled HTTP transport. Methods take
/// `&self`, so a client can be shared between tasks.
#[derive(Debug, Clone)]
pub struct TradeClient {
    credentials: Credentials,
    rpc: RpcClient,
}

impl TradeClient {
    /// Create a client for the production endpoint.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(
            Credentials::new(access_key, secret_key),
            ClientConfig::default(),
        )
    }

    /// Create a client with the given credentials and configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let rpc = RpcClient::new(&config.endpoint, config.timeout)?;

        info!(
            "TradeClient initialized for access key {} at {}",
            credentials.access_key(),
            rpc.endpoint()
        );

        Ok(Self { credentials, rpc })
    }

    /// Get the access key this client signs with.
    pub fn access_key(&self) -> &str {
        self.credentials.access_key()
    }

    // =========================================================================
    // Generic dispatch
    // =========================================================================

    /// Call any remote method with positional params and return its `result`.
    ///
    /// The method name is forwarded verbatim; the server decides whether it exists.
    pub async fn call(&self, method: &str, params: Vec<Param>) -> Result<Value> {
        self.dispatch(method, params, None).await
    }

    /// Same as [`call`](Self::call) with a caller-chosen request id instead of the tonce.
    pub async fn call_with_id(
        &self,
        method: &str,
        params: Vec<Param>,
        id: impl Into<Param>,
    ) -> Result<Value> {
        self.dispatch(method, params, Some(id.into())).await
    }

    /// Call a remote method and decode its `result` into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, method: &str, params: Vec<Param>) -> Result<T> {
        let result = self.call(method, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Vec<Param>,
        id: Option<Param>,
    ) -> Result<Value> {
        let request = request::build(&self.credentials, method, params, id)?;
        let raw = self.rpc.send(&request).await?;
        let result = validate(raw, &request.envelope)?;
        debug!("{} id={:?} succeeded", method, request.envelope.id);
        Ok(result)
    }

    // =========================================================================
    // Trading
    // =========================================================================

    /// Place a buy order. `price: None` places a market order.
    pub async fn buy_order(&self, price: Option<f64>, amount: f64) -> Result<Value> {
        self.call(BUY_ORDER, vec![price.into(), amount.into()]).await
    }

    /// Place a sell order. `price: None` places a market order.
    pub async fn sell_order(&self, price: Option<f64>, amount: f64) -> Result<Value> {
        self.call(SELL_ORDER, vec![price.into(), amount.into()]).await
    }

    /// Cancel an open order.
    pub async fn cancel_order(&self, id: i64) -> Result<Value> {
        self.call(CANCEL_ORDER, vec![id.into()]).await
    }

    // =========================================================================
    // Account and orders
    // =========================================================================

    /// Get account profile and balances.
    pub async fn get_account_info(&self) -> Result<Value> {
        self.call(GET_ACCOUNT_INFO, vec![]).await
    }

    /// Get up to `limit` bids and asks of the order book.
    pub async fn get_market_depth2(&self, limit: u32) -> Result<Value> {
        self.call(GET_MARKET_DEPTH2, vec![limit.into()]).await
    }

    /// Get a single order by id.
    pub async fn get_order(&self, id: i64) -> Result<Value> {
        self.call(GET_ORDER, vec![id.into()]).await
    }

    /// Get your orders, optionally only the open ones.
    pub async fn get_orders(&self, open_only: bool) -> Result<Value> {
        self.call(GET_ORDERS, vec![open_only.into()]).await
    }

    /// Get account transactions of `kind` (e.g. "all", "fundbtc", "buybtc").
    pub async fn get_transactions(&self, kind: &str, limit: u32) -> Result<Value> {
        self.call(GET_TRANSACTIONS, vec![kind.into(), limit.into()])
            .await
    }

    // =========================================================================
    // Deposits and withdrawals
    // =========================================================================

    /// Get deposits of a currency, optionally only pending ones.
    pub async fn get_deposits(&self, currency: &str, pending_only: bool) -> Result<Value> {
        self.call(GET_DEPOSITS, vec![currency.into(), pending_only.into()])
            .await
    }

    /// Get a single withdrawal by id.
    pub async fn get_withdrawal(&self, id: i64) -> Result<Value> {
        self.call(GET_WITHDRAWAL, vec![id.into()]).await
    }

    /// Get withdrawals of a currency, optionally only pending ones.
    pub async fn get_withdrawals(&self, currency: &str, pending_only: bool) -> Result<Value> {
        self.call(GET_WITHDRAWALS, vec![currency.into(), pending_only.into()])
            .await
    }

    /// Request a withdrawal of `amount` in `currency`.
    pub async fn request_withdrawal(&self, currency: &str, amount: f64) -> Result<Value> {
        self.call(REQUEST_WITHDRAWAL, vec![currency.into(), amount.into()])
            .await
    }
}
