//! API credentials used to authenticate every call.

use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Signature-based API credentials issued for an application.
///
/// Credentials travel as HTTP headers, never in the request body.
///
/// ```
/// use adaptive_core::credential::Credential;
///
/// let credential = Credential::builder()
///     .app_id("APP-80W284485P519543T")
///     .username("merchant_api1.example.com")
///     .password("1234567890")
///     .signature("AbCdEf")
///     .build();
///
/// assert!(credential.missing_fields().is_empty());
/// assert!(!format!("{credential:?}").contains("1234567890"));
/// ```
#[derive(Builder, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Application id, sent as `X-PAYPAL-APPLICATION-ID`.
    #[builder(into)]
    pub app_id: String,
    /// API username, sent as `X-PAYPAL-SECURITY-USERID`.
    #[builder(into)]
    pub username: String,
    /// API password, sent as `X-PAYPAL-SECURITY-PASSWORD`.
    #[builder(into)]
    pub password: String,
    /// API signature, sent as `X-PAYPAL-SECURITY-SIGNATURE`.
    #[builder(into)]
    pub signature: String,
}

/// One of the four required credential fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialField {
    AppId,
    Password,
    Username,
    Signature,
}

impl CredentialField {
    /// All fields, in the order they are checked and reported.
    pub const ALL: [CredentialField; 4] = [
        CredentialField::AppId,
        CredentialField::Password,
        CredentialField::Username,
        CredentialField::Signature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::AppId => "AppId",
            CredentialField::Password => "APIPassword",
            CredentialField::Username => "APIUsername",
            CredentialField::Signature => "Signature",
        }
    }
}

impl Display for CredentialField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Credential {
    pub fn field(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::AppId => &self.app_id,
            CredentialField::Password => &self.password,
            CredentialField::Username => &self.username,
            CredentialField::Signature => &self.signature,
        }
    }

    /// Every empty field, in [`CredentialField::ALL`] order.
    pub fn missing_fields(&self) -> Vec<CredentialField> {
        CredentialField::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("app_id", &self.app_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("signature", &"<redacted>")
            .finish()
    }
}
