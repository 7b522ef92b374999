//! Adaptive Payments core library.
//!
//! This library provides the types, NVP codec and request pipeline shared by
//! every Adaptive Payments operation. It performs no I/O itself: plug any
//! blocking HTTP client in through [`executor::Transport`].
//!
//! ```
//! use adaptive_core::{
//!     credential::Credential,
//!     envelope::RequestEnvelope,
//!     errors::Error,
//!     executor::{Headers, RequestExecutor, Transport, TransportResponse},
//!     request::PaymentDetailsRequest,
//! };
//! use url::Url;
//!
//! struct Canned(Url);
//!
//! impl Transport for Canned {
//!     type Error = std::io::Error;
//!
//!     fn base_url(&self) -> &Url {
//!         &self.0
//!     }
//!
//!     fn send(&self, _: &Url, _: &Headers, _: Vec<u8>) -> Result<TransportResponse, Self::Error> {
//!         Ok(TransportResponse::new(
//!             200,
//!             "responseEnvelope.ack=Success&status=COMPLETED&payKey=AP-1",
//!         ))
//!     }
//! }
//!
//! let executor = RequestExecutor::new(Canned(
//!     Url::parse("https://svcs.sandbox.paypal.com/AdaptivePayments/").unwrap(),
//! ));
//! let credential = Credential::builder()
//!     .app_id("A1")
//!     .username("u")
//!     .password("p")
//!     .signature("s")
//!     .build();
//!
//! let details = executor
//!     .execute(
//!         Some(&credential),
//!         &RequestEnvelope::default(),
//!         &PaymentDetailsRequest::for_pay_key("AP-1"),
//!     )
//!     .unwrap();
//! assert_eq!(details.status, "COMPLETED");
//!
//! let err = executor
//!     .execute(None, &RequestEnvelope::default(), &PaymentDetailsRequest::for_pay_key("AP-1"))
//!     .unwrap_err();
//! assert!(matches!(err, Error::MissingCredentials));
//! ```

pub mod credential;
mod describe;
pub mod envelope;
pub mod errors;
pub mod executor;
pub mod nvp;
pub mod request;
pub mod response;
pub mod types;
pub mod validation;
