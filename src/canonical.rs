//! Canonical string construction for request signing.
//!
//! The server recomputes the same string from the request it receives, so the
//! field order and the per-field emptiness rule must match it exactly.

use crate::request::RequestEnvelope;
use crate::types::Param;

/// Fields covered by the signature, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedField {
    Tonce,
    AccessKey,
    RequestMethod,
    Id,
    Method,
    Params,
}

impl SignedField {
    pub fn key(self) -> &'static str {
        match self {
            SignedField::Tonce => "tonce",
            SignedField::AccessKey => "accesskey",
            SignedField::RequestMethod => "requestmethod",
            SignedField::Id => "id",
            SignedField::Method => "method",
            SignedField::Params => "params",
        }
    }
}

/// The order of params is critical for a correct hash.
pub const SIGNED_FIELDS: [SignedField; 6] = [
    SignedField::Tonce,
    SignedField::AccessKey,
    SignedField::RequestMethod,
    SignedField::Id,
    SignedField::Method,
    SignedField::Params,
];

/// A borrowed view of one signed field's value.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
    Scalar(&'a Param),
    List(&'a [Param]),
}

impl FieldValue<'_> {
    fn canonical(&self) -> String {
        match *self {
            FieldValue::Int(0) => String::new(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Text(s) => s.to_string(),
            FieldValue::Scalar(p) if p.is_falsy() => String::new(),
            FieldValue::Scalar(p) => scalar_str(p),
            FieldValue::List(items) => items.iter().map(php_str).collect::<Vec<_>>().join(","),
        }
    }
}

/// Plain string form of a scalar, used for signed fields other than `params`
/// and for matching response ids.
///
/// Unlike [`php_str`] it keeps `5` and `5.0`, `1` and `true`, `false` and
/// `null` apart. A string compares equal to a number with the same text.
pub fn scalar_str(value: &Param) -> String {
    match value {
        Param::Null => "None".to_string(),
        Param::Bool(true) => "True".to_string(),
        Param::Bool(false) => "False".to_string(),
        Param::Int(n) => n.to_string(),
        Param::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 => {
            format!("{f:.1}")
        }
        Param::Float(f) => f.to_string(),
        Param::Str(s) => s.clone(),
    }
}

/// Stringify a scalar the way PHP casts it to string.
pub fn php_str(value: &Param) -> String {
    match value {
        Param::Null | Param::Bool(false) => String::new(),
        Param::Bool(true) => "1".to_string(),
        Param::Int(n) => n.to_string(),
        Param::Float(f) => format_float(*f),
        Param::Str(s) => s.clone(),
    }
}

fn format_float(value: f64) -> String {
    if !value.is_finite() || value.fract() != 0.0 {
        return value.to_string();
    }
    if value.abs() < i64::MAX as f64 {
        // `as` also folds -0.0 into 0
        (value as i64).to_string()
    } else {
        format!("{value:.0}")
    }
}

/// Build the string that gets signed for `envelope`.
pub fn canonicalize(envelope: &RequestEnvelope) -> String {
    SIGNED_FIELDS
        .iter()
        .map(|field| format!("{}={}", field.key(), envelope.field(*field).canonical()))
        .collect::<Vec<_>>()
        .join("&")
}
