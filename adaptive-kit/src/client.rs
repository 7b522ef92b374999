use adaptive_core::{
    credential::Credential,
    envelope::RequestEnvelope,
    errors::Result,
    executor::{RequestExecutor, Transport},
    request::{Operation, PayRequest, PaymentDetailsRequest},
    response::{PayResponse, PaymentDetailsResponse},
};
use url::Url;

use crate::config::Environment;

/// Entry point for calling the Adaptive Payments service.
///
/// The client owns its transport and credential and holds no per-call state,
/// so one instance can serve any number of sequential calls.
///
/// ```
/// use adaptive_kit::{
///     client::AdaptiveClient,
///     credential::Credential,
///     executor::{Headers, Transport, TransportResponse},
///     request::{PayRequest, PaymentDetails, Receiver},
/// };
/// use url::Url;
///
/// struct Canned(Url);
///
/// impl Transport for Canned {
///     type Error = std::io::Error;
///
///     fn base_url(&self) -> &Url {
///         &self.0
///     }
///
///     fn send(&self, _: &Url, _: &Headers, _: Vec<u8>) -> Result<TransportResponse, Self::Error> {
///         Ok(TransportResponse::new(
///             200,
///             "responseEnvelope.ack=Success&payKey=AP-1&paymentExecStatus=CREATED",
///         ))
///     }
/// }
///
/// let client = AdaptiveClient::builder()
///     .transport(Canned(Url::parse("https://svcs.sandbox.paypal.com/AdaptivePayments/").unwrap()))
///     .credential(
///         Credential::builder()
///             .app_id("APP-80W284485P519543T")
///             .username("seller_api1.example.com")
///             .password("1234567890")
///             .signature("sig")
///             .build(),
///     )
///     .build();
///
/// let request = PayRequest::builder()
///     .details(
///         PaymentDetails::builder()
///             .currency_code("USD")
///             .receivers(vec![Receiver::email("a@b.com", "10.00".parse().unwrap())])
///             .build(),
///     )
///     .build();
///
/// let response = client.pay(&request).unwrap();
/// assert_eq!(response.pay_key, "AP-1");
/// assert_eq!(
///     client.approval_url(&response.pay_key).unwrap().as_str(),
///     "https://www.sandbox.paypal.com/webscr?cmd=_ap-payment&paykey=AP-1"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveClient<T: Transport> {
    executor: RequestExecutor<T>,
    credential: Option<Credential>,
    envelope: RequestEnvelope,
    environment: Environment,
}

#[bon::bon]
impl<T: Transport> AdaptiveClient<T> {
    /// `environment` only drives [`AdaptiveClient::approval_url`]; requests go
    /// to the transport's base URL.
    #[builder]
    pub fn new(
        transport: T,
        credential: Option<Credential>,
        #[builder(default)] envelope: RequestEnvelope,
        #[builder(default)] environment: Environment,
    ) -> Self {
        AdaptiveClient {
            executor: RequestExecutor::new(transport),
            credential,
            envelope,
            environment,
        }
    }

    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    pub fn transport(&self) -> &T {
        self.executor.transport()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn envelope(&self) -> &RequestEnvelope {
        &self.envelope
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Runs any operation with this client's credential and envelope.
    pub fn execute<O: Operation>(&self, operation: &O) -> Result<O::Response> {
        self.executor
            .execute(self.credential.as_ref(), &self.envelope, operation)
    }

    /// Creates a payment. A `CREATED` status means the sender still has to
    /// approve it at [`AdaptiveClient::approval_url`].
    pub fn pay(&self, request: &PayRequest) -> Result<PayResponse> {
        self.execute(request)
    }

    /// Like [`AdaptiveClient::pay`], but only a `COMPLETED` payment is `Ok`.
    pub fn pay_and_complete(&self, request: &PayRequest) -> Result<PayResponse> {
        self.pay(request)?.into_completed()
    }

    pub fn payment_details(&self, request: &PaymentDetailsRequest) -> Result<PaymentDetailsResponse> {
        self.execute(request)
    }

    /// Looks a payment up by its pay key.
    pub fn payment_details_for(&self, pay_key: impl Into<String>) -> Result<PaymentDetailsResponse> {
        self.payment_details(&PaymentDetailsRequest::for_pay_key(pay_key))
    }

    pub fn approval_url(&self, pay_key: &str) -> std::result::Result<Url, url::ParseError> {
        self.environment.approval_url(pay_key)
    }
}

#[cfg(feature = "http-client")]
impl AdaptiveClient<crate::http_transport::HttpTransport> {
    /// A client over the default HTTP transport for `environment`.
    pub fn http(
        environment: Environment,
        credential: Credential,
    ) -> std::result::Result<Self, crate::http_transport::HttpTransportError> {
        let transport = crate::http_transport::HttpTransport::builder()
            .environment(environment.clone())
            .build()?;
        Ok(AdaptiveClient::builder()
            .transport(transport)
            .credential(credential)
            .environment(environment)
            .build())
    }
}
