use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    describe::Fields,
    errors::{Error, Result},
    nvp::NvpMap,
    response::{FromNvp, ResponseEnvelope},
    types::PaymentExecStatus,
};

/// A per-receiver failure reported by Pay for parallel and chained payments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayError {
    pub receiver_email: Option<String>,
    pub receiver_amount: Option<String>,
    pub error_id: Option<String>,
    pub message: Option<String>,
}

/// Response of the Pay operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResponse {
    pub envelope: ResponseEnvelope,
    pub pay_key: String,
    /// Raw `paymentExecStatus` token; see [`PayResponse::status`].
    pub payment_exec_status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pay_errors: Vec<PayError>,
}

impl FromNvp for PayResponse {
    fn from_nvp(map: &NvpMap) -> Result<Self> {
        let pay_errors = map
            .indices("payErrorList.payError")
            .into_iter()
            .map(|i| {
                let field = |name: &str| {
                    map.get(&format!("payErrorList.payError({i}).{name}"))
                        .map(str::to_string)
                };
                PayError {
                    receiver_email: field("receiver.email"),
                    receiver_amount: field("receiver.amount"),
                    error_id: field("error.errorId"),
                    message: field("error.message"),
                }
            })
            .collect();

        Ok(PayResponse {
            envelope: ResponseEnvelope::from_nvp(map)?,
            pay_key: map.require("payKey")?.to_string(),
            payment_exec_status: map.require("paymentExecStatus")?.to_string(),
            pay_errors,
        })
    }
}

impl PayResponse {
    /// The execution status, if it is one this crate knows about.
    pub fn status(&self) -> Option<PaymentExecStatus> {
        self.payment_exec_status.parse().ok()
    }

    /// Whether the payment was executed in full.
    pub fn is_completed(&self) -> bool {
        self.status() == Some(PaymentExecStatus::Completed)
    }

    /// Interprets the execution status of a payment made with `ActionType::Pay`.
    ///
    /// - `COMPLETED`: returns the response.
    /// - `CREATED`: the sender must approve the payment, [`Error::AuthorizationRequired`].
    /// - `INCOMPLETE`: some receivers were not paid, [`Error::PaymentIncomplete`].
    /// - anything else: [`Error::PaymentExecutionFailed`].
    pub fn into_completed(self) -> Result<Self> {
        match self.status() {
            Some(PaymentExecStatus::Completed) => Ok(self),
            Some(PaymentExecStatus::Created) => Err(Error::AuthorizationRequired {
                pay_key: self.pay_key,
            }),
            Some(PaymentExecStatus::Incomplete) => Err(Error::PaymentIncomplete {
                pay_key: self.pay_key,
            }),
            _ => Err(Error::PaymentExecutionFailed {
                pay_key: self.pay_key,
                status: self.payment_exec_status,
            }),
        }
    }
}

impl Display for PayResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields = Fields::new(f, "PayResponse")
            .field("ack", self.envelope.ack)
            .opt("correlationId", self.envelope.correlation_id.as_ref())
            .field("payKey", &self.pay_key)
            .field("paymentExecStatus", &self.payment_exec_status);
        for (i, error) in self.pay_errors.iter().enumerate() {
            fields = fields.field(
                &format!("payError({i})"),
                format_args!(
                    "{} {}",
                    error.error_id.as_deref().unwrap_or("-"),
                    error.message.as_deref().unwrap_or("")
                ),
            );
        }
        fields.finish()
    }
}
