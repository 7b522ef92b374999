use std::time::Duration;

use adaptive_core::executor::{Headers, Transport, TransportResponse};
use http::header::CONTENT_TYPE;
use url::Url;

use crate::config::Environment;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A [`Transport`] over a blocking `reqwest` client.
///
/// ```no_run
/// use std::time::Duration;
/// use adaptive_kit::{config::Environment, http_transport::HttpTransport};
///
/// let transport = HttpTransport::builder()
///     .environment(Environment::Sandbox)
///     .timeout(Duration::from_secs(20))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub base_url: Url,
    pub client: reqwest::blocking::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
}

#[bon::bon]
impl HttpTransport {
    /// Builds a transport for an environment.
    ///
    /// `timeout` bounds the whole round-trip; the `reqwest` default applies when unset.
    #[builder]
    pub fn new(
        #[builder(default)] environment: Environment,
        timeout: Option<Duration>,
        #[builder(into)] user_agent: Option<String>,
    ) -> Result<Self, HttpTransportError> {
        let mut client = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            client = client.timeout(timeout);
        }
        if let Some(user_agent) = user_agent {
            client = client.user_agent(user_agent);
        }

        Ok(HttpTransport {
            base_url: environment.api_base_url()?,
            client: client.build()?,
        })
    }

    /// Uses an existing client, e.g. one shared with other parts of an application.
    pub fn with_client(base_url: Url, client: reqwest::blocking::Client) -> Self {
        HttpTransport { base_url, client }
    }
}

impl Transport for HttpTransport {
    type Error = HttpTransportError;

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn send(
        &self,
        url: &Url,
        headers: &Headers,
        body: Vec<u8>,
    ) -> Result<TransportResponse, Self::Error> {
        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.body(body).send()?;
        let status = response.status();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "POST {url} -> {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );

        let body = response.bytes()?;
        Ok(TransportResponse::new(status.as_u16(), body.to_vec()))
    }
}
