use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Param - positional argument / request id scalar
// =============================================================================

/// A JSON scalar (or null) passed as a positional remote-method argument.
///
/// Request ids use the same type since the server accepts any scalar there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Param {
    /// Build a param from a decoded JSON value. Arrays and objects are not scalars.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Param::Null),
            Value::Bool(b) => Some(Param::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Param::Int)
                .or_else(|| n.as_f64().map(Param::Float)),
            Value::String(s) => Some(Param::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Whether the value counts as empty when it fills a signed field.
    pub fn is_falsy(&self) -> bool {
        match self {
            Param::Null => true,
            Param::Bool(b) => !b,
            Param::Int(i) => *i == 0,
            Param::Float(f) => *f == 0.0,
            Param::Str(s) => s.is_empty(),
        }
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(value.into())
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(value.into())
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Param::Null)
    }
}

// =============================================================================
// Remote method names
// =============================================================================

pub const BUY_ORDER: &str = "buyOrder";
pub const SELL_ORDER: &str = "sellOrder";
pub const CANCEL_ORDER: &str = "cancelOrder";
pub const GET_ACCOUNT_INFO: &str = "getAccountInfo";
pub const GET_DEPOSITS: &str = "getDeposits";
pub const GET_MARKET_DEPTH2: &str = "getMarketDepth2";
pub const GET_ORDER: &str = "getOrder";
pub const GET_ORDERS: &str = "getOrders";
pub const GET_TRANSACTIONS: &str = "getTransactions";
pub const GET_WITHDRAWAL: &str = "getWithdrawal";
pub const GET_WITHDRAWALS: &str = "getWithdrawals";
pub const REQUEST_WITHDRAWAL: &str = "requestWithdrawal";
