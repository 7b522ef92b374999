//! The request pipeline shared by every operation.
//!
//! [`RequestExecutor::execute`] runs, strictly in order:
//!
//! 1. **Validate** the credential and the operation's required parameters.
//!    Nothing is sent when validation fails.
//! 2. **Encode** the request envelope and the operation into an NVP body.
//! 3. **Dispatch** a single `POST <base-url>/<Operation>` through the [`Transport`].
//! 4. **Check the status**: anything outside 2xx is [`Error::RequestFailure`],
//!    an empty 2xx body is [`Error::InvalidResponseData`].
//! 5. **Decode** the NVP body.
//! 6. **Classify**: embedded `error(n)` records become [`Error::PayPalError`],
//!    otherwise the operation's typed response is returned. A body missing a
//!    required field is [`Error::MalformedResponse`].
//!
//! There are no retries; the caller decides what to do with a failure.

use url::Url;

use crate::{
    credential::Credential,
    envelope::RequestEnvelope,
    errors::{Error, Result},
    nvp,
    request::{Operation, encode},
    response,
    validation::validate,
};

pub const HEADER_USER_ID: &str = "X-PAYPAL-SECURITY-USERID";
pub const HEADER_PASSWORD: &str = "X-PAYPAL-SECURITY-PASSWORD";
pub const HEADER_SIGNATURE: &str = "X-PAYPAL-SECURITY-SIGNATURE";
pub const HEADER_APPLICATION_ID: &str = "X-PAYPAL-APPLICATION-ID";
pub const HEADER_REQUEST_DATA_FORMAT: &str = "X-PAYPAL-REQUEST-DATA-FORMAT";
pub const HEADER_RESPONSE_DATA_FORMAT: &str = "X-PAYPAL-RESPONSE-DATA-FORMAT";
pub const HEADER_TOOLKIT: &str = "X-PAYPAL-TOOLKIT";
pub const HEADER_REQUEST_SOURCE: &str = "X-PAYPAL-REQUEST-SOURCE";

pub const DATA_FORMAT_NV: &str = "NV";
pub const TOOLKIT_NAME: &str = "adaptive-kit";
pub const REQUEST_SOURCE: &str = concat!("RUST_Toolkit-", env!("CARGO_PKG_VERSION"));

/// An ordered list of HTTP headers.
pub type Headers = Vec<(&'static str, String)>;

/// Raw result of a round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        TransportResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP round-trip used by the executor.
///
/// A transport is built for one service base URL; operation names are joined
/// onto it. Timeouts and TLS are the transport's business.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Service base URL, ending with `/`.
    fn base_url(&self) -> &Url;

    /// POSTs `body` to `url` and returns the status and body.
    fn send(
        &self,
        url: &Url,
        headers: &Headers,
        body: Vec<u8>,
    ) -> std::result::Result<TransportResponse, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn base_url(&self) -> &Url {
        (**self).base_url()
    }

    fn send(
        &self,
        url: &Url,
        headers: &Headers,
        body: Vec<u8>,
    ) -> std::result::Result<TransportResponse, Self::Error> {
        (**self).send(url, headers, body)
    }
}

/// The fixed and credential-derived headers sent with every request.
pub fn request_headers(credential: &Credential) -> Headers {
    vec![
        (HEADER_USER_ID, credential.username.clone()),
        (HEADER_PASSWORD, credential.password.clone()),
        (HEADER_SIGNATURE, credential.signature.clone()),
        (HEADER_APPLICATION_ID, credential.app_id.clone()),
        (HEADER_REQUEST_DATA_FORMAT, DATA_FORMAT_NV.to_string()),
        (HEADER_RESPONSE_DATA_FORMAT, DATA_FORMAT_NV.to_string()),
        (HEADER_TOOLKIT, TOOLKIT_NAME.to_string()),
        (HEADER_REQUEST_SOURCE, REQUEST_SOURCE.to_string()),
    ]
}

/// Runs operations over a [`Transport`]. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct RequestExecutor<T: Transport> {
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        RequestExecutor { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL an operation is posted to.
    ///
    /// The name is appended to the base path whether or not it ends with `/`.
    pub fn endpoint<O: Operation>(&self) -> Result<Url> {
        let mut base = self.transport.base_url().clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(O::NAME).map_err(Error::transport)
    }

    /// Executes one operation. See the [module docs](self) for the steps.
    pub fn execute<O: Operation>(
        &self,
        credential: Option<&Credential>,
        envelope: &RequestEnvelope,
        operation: &O,
    ) -> Result<O::Response> {
        validate(credential, operation).into_result()?;
        let Some(credential) = credential else {
            return Err(Error::MissingCredentials);
        };

        let body = encode(envelope, operation).encode();
        let url = self.endpoint::<O>()?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Sending {} request to {url}: {body}", O::NAME);

        let response = self
            .transport
            .send(&url, &request_headers(credential), body.into_bytes())
            .map_err(|err| {
                #[cfg(feature = "tracing")]
                tracing::warn!("{} request failed in transport: {err}", O::NAME);
                Error::transport(err)
            })?;

        if !response.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!("{} request failed with HTTP status {}", O::NAME, response.status);
            return Err(Error::RequestFailure(response.status));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Received {} response: {}",
            O::NAME,
            String::from_utf8_lossy(&response.body)
        );

        let map = nvp::decode(&response.body)?;
        let result = response::classify(&map);

        #[cfg(feature = "tracing")]
        trace_classified(O::NAME, &result);

        result
    }
}

#[cfg(feature = "tracing")]
fn trace_classified<R>(operation: &str, result: &Result<R>) {
    match result {
        Ok(_) => tracing::debug!("{operation} succeeded"),
        Err(Error::PayPalError(records)) => {
            tracing::debug!("{operation} returned {} error record(s)", records.len())
        }
        Err(err) => tracing::debug!("{operation} response rejected: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use url_macro::url;

    use super::*;
    use crate::{
        request::{PayRequest, PaymentDetails, PaymentDetailsRequest, Receiver},
        response::PayResponse,
    };

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    struct Recorded {
        url: Url,
        headers: Headers,
        body: String,
    }

    struct MockTransport {
        base_url: Url,
        reply: Option<TransportResponse>,
        calls: RefCell<Vec<Recorded>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Self {
            MockTransport {
                base_url: url!("https://svcs.sandbox.paypal.com/AdaptivePayments/"),
                reply: Some(TransportResponse::new(status, body)),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn refusing() -> Self {
            MockTransport {
                reply: None,
                ..Self::replying(200, "")
            }
        }
    }

    impl Transport for MockTransport {
        type Error = Refused;

        fn base_url(&self) -> &Url {
            &self.base_url
        }

        fn send(
            &self,
            url: &Url,
            headers: &Headers,
            body: Vec<u8>,
        ) -> std::result::Result<TransportResponse, Refused> {
            self.calls.borrow_mut().push(Recorded {
                url: url.clone(),
                headers: headers.clone(),
                body: String::from_utf8(body).unwrap(),
            });
            self.reply.clone().ok_or(Refused)
        }
    }

    fn credential() -> Credential {
        Credential::builder()
            .app_id("A1")
            .username("u")
            .password("p")
            .signature("s")
            .build()
    }

    fn pay_request() -> PayRequest {
        PayRequest::builder()
            .details(
                PaymentDetails::builder()
                    .currency_code("USD")
                    .receivers(vec![Receiver::email("a@b.com", "10.00".parse().unwrap())])
                    .build(),
            )
            .build()
    }

    const CREATED: &str = "responseEnvelope.ack=Success&payKey=AP-1&paymentExecStatus=CREATED";

    #[test]
    fn test_pay_round_trip() {
        let executor = RequestExecutor::new(MockTransport::replying(200, CREATED));
        let response: PayResponse = executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap();
        assert_eq!(response.pay_key, "AP-1");

        let calls = executor.transport().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].url.as_str(),
            "https://svcs.sandbox.paypal.com/AdaptivePayments/Pay"
        );
        assert!(calls[0].body.starts_with(
            "requestEnvelope.errorLanguage=en_US\
             &currencyCode=USD\
             &receiverList.receiver(0).email=a%40b.com\
             &receiverList.receiver(0).amount=10.00"
        ));
        assert!(!calls[0].body.contains("A1"));
    }

    #[test]
    fn test_headers_carry_credential() {
        let executor = RequestExecutor::new(MockTransport::replying(200, CREATED));
        executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap();
        let calls = executor.transport().calls.borrow();
        let headers = &calls[0].headers;
        let header = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(header(HEADER_USER_ID), Some("u"));
        assert_eq!(header(HEADER_PASSWORD), Some("p"));
        assert_eq!(header(HEADER_SIGNATURE), Some("s"));
        assert_eq!(header(HEADER_APPLICATION_ID), Some("A1"));
        assert_eq!(header(HEADER_REQUEST_DATA_FORMAT), Some("NV"));
        assert_eq!(header(HEADER_RESPONSE_DATA_FORMAT), Some("NV"));
        assert_eq!(header(HEADER_TOOLKIT), Some(TOOLKIT_NAME));
    }

    #[test]
    fn test_validation_failure_sends_nothing() {
        let executor = RequestExecutor::new(MockTransport::replying(200, CREATED));
        let envelope = RequestEnvelope::default();

        let err = executor.execute(None, &envelope, &pay_request()).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));

        let no_receivers = PayRequest::builder()
            .details(PaymentDetails::builder().currency_code("USD").build())
            .build();
        let err = executor
            .execute(Some(&credential()), &envelope, &no_receivers)
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("Receiver")));

        let err = executor
            .execute(
                Some(&credential()),
                &envelope,
                &PaymentDetailsRequest::builder().build(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("payKey")));

        assert!(executor.transport().calls.borrow().is_empty());
    }

    #[test]
    fn test_server_error_status_wins_over_body() {
        let executor = RequestExecutor::new(MockTransport::replying(500, CREATED));
        let err = executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap_err();
        assert!(matches!(err, Error::RequestFailure(500)));
    }

    #[test]
    fn test_empty_success_body() {
        let executor = RequestExecutor::new(MockTransport::replying(200, ""));
        let err = executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponseData(body) if body.is_empty()));
    }

    #[test]
    fn test_transport_failure() {
        let executor = RequestExecutor::new(MockTransport::refusing());
        let err = executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_error_records_in_success_response() {
        let body = "responseEnvelope.ack=Failure\
                    &error(0).errorId=580001\
                    &error(0).domain=PLATFORM\
                    &error(0).subdomain=Application\
                    &error(0).severity=Error\
                    &error(0).category=Application\
                    &error(0).message=Invalid+request%3A+%7B0%7D";
        let executor = RequestExecutor::new(MockTransport::replying(200, body));
        let err = executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap_err();
        let records = err.error_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].error_id, "580001");
        assert_eq!(records[0].message, "Invalid request: {0}");
        assert_eq!(records[0].subdomain, "Application");
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let mut transport = MockTransport::replying(200, CREATED);
        transport.base_url = url!("http://localhost:8080/AdaptivePayments");
        let executor = RequestExecutor::new(transport);
        assert_eq!(
            executor.endpoint::<PaymentDetailsRequest>().unwrap().as_str(),
            "http://localhost:8080/AdaptivePayments/PaymentDetails"
        );

        executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap();
        assert_eq!(
            executor.transport().calls.borrow()[0].url.as_str(),
            "http://localhost:8080/AdaptivePayments/Pay"
        );

        let executor = RequestExecutor::new(MockTransport::replying(200, CREATED));
        assert_eq!(
            executor.endpoint::<PayRequest>().unwrap().as_str(),
            "https://svcs.sandbox.paypal.com/AdaptivePayments/Pay"
        );
    }

    #[test]
    fn test_executor_over_borrowed_transport() {
        let transport = MockTransport::replying(200, CREATED);
        let executor = RequestExecutor::new(&transport);
        executor
            .execute(Some(&credential()), &RequestEnvelope::default(), &pay_request())
            .unwrap();
        assert_eq!(transport.calls.borrow().len(), 1);
    }
}
