use serde::{Deserialize, Serialize};
use url::Url;

pub const SANDBOX_API_URL: &str = "https://svcs.sandbox.paypal.com/AdaptivePayments/";
pub const SANDBOX_APPROVAL_URL: &str = "https://www.sandbox.paypal.com/webscr?cmd=_ap-payment";
pub const PRODUCTION_API_URL: &str = "https://svcs.paypal.com/AdaptivePayments/";
pub const PRODUCTION_APPROVAL_URL: &str = "https://www.paypal.com/webscr?cmd=_ap-payment";

/// Where requests are sent and where senders approve payments.
///
/// ```
/// use adaptive_kit::config::Environment;
///
/// let url = Environment::Sandbox.approval_url("AP-1234").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.sandbox.paypal.com/webscr?cmd=_ap-payment&paykey=AP-1234"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
    /// Explicit URLs, e.g. for a local stub of the service.
    Custom {
        /// Service base URL. Operation names are joined onto it, so it should end with `/`.
        api_base_url: Url,
        /// Approval page; `paykey` is appended as a query parameter.
        approval_url: Url,
    },
}

impl Environment {
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        match self {
            Environment::Sandbox => Url::parse(SANDBOX_API_URL),
            Environment::Production => Url::parse(PRODUCTION_API_URL),
            Environment::Custom { api_base_url, .. } => Ok(api_base_url.clone()),
        }
    }

    /// Page where the sender approves the payment identified by `pay_key`.
    pub fn approval_url(&self, pay_key: &str) -> Result<Url, url::ParseError> {
        let mut url = match self {
            Environment::Sandbox => Url::parse(SANDBOX_APPROVAL_URL)?,
            Environment::Production => Url::parse(PRODUCTION_APPROVAL_URL)?,
            Environment::Custom { approval_url, .. } => approval_url.clone(),
        };
        url.query_pairs_mut().append_pair("paykey", pay_key);
        Ok(url)
    }
}
