//! # BTCChina Trade SDK
//!
//! A signed JSON-RPC client for the BTCChina private trade API.
//!
//! ## Features
//!
//! - Generic `call(method, params)` for any remote method, plus typed helpers
//! - Deterministic HMAC-SHA1 request signing with Basic-Auth headers
//! - Response checks: HTTP status, JSON body, round-trip id, result vs error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use btcchina_trade_sdk::{Param, TradeClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TradeClient::new("YOUR_ACCESS_KEY", "YOUR_SECRET_KEY")?;
//!
//!     // Any remote method, positional params in order
//!     let info = client.call("getAccountInfo", vec![]).await?;
//!     println!("{}", info);
//!
//!     let depth = client.call("getMarketDepth2", vec![Param::Int(5)]).await?;
//!     println!("{}", depth);
//!
//!     // Typed helper forwarding to `call`
//!     let order = client.buy_order(Some(500.0), 0.25).await?;
//!     println!("Order placed: {}", order);
//!
//!     Ok(())
//! }
//! ```

// Internal modules
mod canonical;
mod client;
mod credentials;
mod error;
mod request;
mod response;
mod rpc;
mod signing;
mod types;

// Re-export public API
pub use canonical::{
    canonicalize, php_str, scalar_str, FieldValue, SignedField, SIGNED_FIELDS,
};
pub use client::{ClientConfig, TradeClient, DEFAULT_ENDPOINT};
pub use credentials::Credentials;
pub use error::{Result, TradeError};
pub use request::{
    build, build_with_tonce, current_tonce, PreparedRequest, RequestEnvelope, SignedHeaders,
    REQUEST_METHOD, TONCE_HEADER,
};
pub use response::{validate, RawResponse};
pub use rpc::RpcClient;
pub use signing::{build_auth_header, sign, verify};
pub use types::{
    // Scalars
    Param,
    // Remote method names
    BUY_ORDER,
    CANCEL_ORDER,
    GET_ACCOUNT_INFO,
    GET_DEPOSITS,
    GET_MARKET_DEPTH2,
    GET_ORDER,
    GET_ORDERS,
    GET_TRANSACTIONS,
    GET_WITHDRAWAL,
    GET_WITHDRAWALS,
    REQUEST_WITHDRAWAL,
    SELL_ORDER,
};
