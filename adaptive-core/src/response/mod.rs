//! Typed responses and the error records embedded in them.
//!
//! The API reports business failures inside an HTTP 200 body as an indexed
//! `error(n).*` list. [`classify`] turns such a body into
//! [`Error::PayPalError`] before any typed response is built.

mod pay;
mod payment_details;

pub use pay::*;
pub use payment_details::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    nvp::NvpMap,
    types::AckCode,
};

/// Builds a typed response from a decoded body.
pub trait FromNvp: Sized {
    fn from_nvp(map: &NvpMap) -> Result<Self>;
}

/// Metadata returned with every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub ack: AckCode,
    pub build: Option<String>,
    pub correlation_id: Option<String>,
    pub timestamp: Option<String>,
}

impl FromNvp for ResponseEnvelope {
    fn from_nvp(map: &NvpMap) -> Result<Self> {
        let ack = map.require("responseEnvelope.ack")?;
        let ack = ack
            .parse()
            .map_err(|_| Error::MalformedResponse(format!("unknown ack code {ack}")))?;
        Ok(ResponseEnvelope {
            ack,
            build: map.get("responseEnvelope.build").map(str::to_string),
            correlation_id: map
                .get("responseEnvelope.correlationId")
                .map(str::to_string),
            timestamp: map.get("responseEnvelope.timestamp").map(str::to_string),
        })
    }
}

/// One API error record, preserved verbatim from the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub error_id: String,
    pub message: String,
    pub severity: String,
    pub domain: String,
    pub subdomain: String,
    pub category: String,
    /// Values substituted into the message, e.g. the offending parameter name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

/// Splits `"(3).rest"` into `(3, "rest")`.
fn split_index(s: &str) -> Option<(usize, &str)> {
    let rest = s.strip_prefix('(')?;
    let (index, rest) = rest.split_once(')')?;
    Some((index.parse().ok()?, rest.strip_prefix('.').unwrap_or(rest)))
}

impl ErrorRecord {
    /// Extracts every `error(n).*` record, ordered by index.
    pub fn extract(map: &NvpMap) -> Vec<ErrorRecord> {
        let mut records: BTreeMap<usize, (ErrorRecord, BTreeMap<usize, String>)> = BTreeMap::new();

        for key in map.keys_with_prefix("error(") {
            let Some((index, field)) = split_index(&key["error".len()..]) else {
                continue;
            };
            let value = map.get(key).unwrap_or_default().to_string();
            let (record, parameters) = records.entry(index).or_default();
            match field {
                "errorId" => record.error_id = value,
                "message" => record.message = value,
                "severity" => record.severity = value,
                "domain" => record.domain = value,
                "subdomain" => record.subdomain = value,
                "category" => record.category = value,
                other => {
                    if let Some((param_index, _)) =
                        other.strip_prefix("parameter").and_then(split_index)
                    {
                        parameters.insert(param_index, value);
                    }
                }
            }
        }

        records
            .into_values()
            .map(|(mut record, parameters)| {
                record.parameters = parameters.into_values().collect();
                record
            })
            .collect()
    }
}

/// Turns a decoded body into the operation's response, or the embedded API errors.
pub fn classify<R: FromNvp>(map: &NvpMap) -> Result<R> {
    let errors = ErrorRecord::extract(map);
    if !errors.is_empty() {
        return Err(Error::PayPalError(errors));
    }
    R::from_nvp(map)
}
