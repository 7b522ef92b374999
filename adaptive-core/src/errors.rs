use std::fmt::Display;

use crate::{credential::CredentialField, response::ErrorRecord};

/// Every way an Adaptive Payments call can fail.
///
/// Validation failures are raised before any network traffic. The remaining
/// variants describe what came back (or didn't) from the transport.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No credential was supplied at all.
    #[error("API credentials are missing")]
    MissingCredentials,

    /// A credential was supplied but some of its fields are empty.
    ///
    /// All empty fields are reported together, in a stable order.
    #[error("API credentials are incomplete, missing: {}", FieldList(.missing))]
    InvalidCredentials { missing: Vec<CredentialField> },

    /// A required request parameter is absent. Only the first one found is reported.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The transport answered with a non-success HTTP status.
    #[error("Request failed with HTTP status {0}")]
    RequestFailure(u16),

    /// The response body was empty or could not be parsed as NVP.
    #[error("Invalid response data: {0:?}")]
    InvalidResponseData(String),

    /// The body parsed as NVP but lacks a field the operation requires or
    /// holds an unusable value.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Business errors embedded in an HTTP-successful response.
    #[error("PayPal returned {} error(s): {}", .0.len(), ErrorList(.0))]
    PayPalError(Vec<ErrorRecord>),

    /// The transport could not complete the round-trip.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The payment was created but the sender still has to approve it.
    #[error("Payment {pay_key} requires sender authorization")]
    AuthorizationRequired { pay_key: String },

    /// Some of the receivers of a chained or parallel payment were not paid.
    #[error("Payment {pay_key} is incomplete")]
    PaymentIncomplete { pay_key: String },

    /// The payment could not be executed.
    #[error("Payment {pay_key} failed with status {status}")]
    PaymentExecutionFailed { pay_key: String, status: String },
}

impl Error {
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    pub fn invalid_response(body: &[u8]) -> Self {
        Error::InvalidResponseData(String::from_utf8_lossy(body).into_owned())
    }

    /// The API error records carried by a [`Error::PayPalError`], if any.
    pub fn error_records(&self) -> Option<&[ErrorRecord]> {
        match self {
            Error::PayPalError(records) => Some(records),
            _ => None,
        }
    }

    /// Whether the failure was detected locally, before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingCredentials
                | Error::InvalidCredentials { .. }
                | Error::MissingParameter(_)
        )
    }
}

struct FieldList<'a>(&'a [CredentialField]);

impl Display for FieldList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

struct ErrorList<'a>(&'a [ErrorRecord]);

impl Display for ErrorList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, record) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "[{}] {}", record.error_id, record.message)?;
        }
        Ok(())
    }
}

/// A specialized `Result` type for Adaptive Payments operations.
pub type Result<T> = std::result::Result<T, Error>;
