//! # Adaptive Kit
//!
//! A blocking client SDK for the PayPal Adaptive Payments service over its
//! name-value-pair (NVP) wire format.
//!
//! ## Components
//!
//! - **[`client`]**: [`client::AdaptiveClient`], the entry point for the Pay and
//!   PaymentDetails operations.
//! - **[`config`]**: Sandbox / production endpoints and approval pages.
//! - **[`http_transport`]**: A `reqwest` based transport (feature `http-client`).
//!
//! The building blocks are re-exported from `adaptive-core`:
//!
//! - **[`credential`]**, **[`envelope`]**: what every request carries.
//! - **[`request`]**, **[`response`]**: typed operations and their results.
//! - **[`nvp`]**: the wire codec.
//! - **[`executor`]**: the request pipeline and the [`executor::Transport`] seam.
//! - **[`errors`]**: the single error type every call returns.
//!
//! ## Quick start
//!
//! ```no_run
//! use adaptive_kit::{
//!     client::AdaptiveClient,
//!     config::Environment,
//!     credential::Credential,
//!     errors::Error,
//!     request::{PayRequest, PaymentDetails, Receiver},
//! };
//! use url_macro::url;
//!
//! let credential = Credential::builder()
//!     .app_id("APP-80W284485P519543T")
//!     .username("seller_api1.example.com")
//!     .password("1234567890")
//!     .signature("Abg0gYcQyxQvnf2HDJkKtA-p6pqhA1k-KTYE0Gcy1diujFio4io5Vqjf")
//!     .build();
//! let client = AdaptiveClient::http(Environment::Sandbox, credential).unwrap();
//!
//! let request = PayRequest::builder()
//!     .details(
//!         PaymentDetails::builder()
//!             .currency_code("USD")
//!             .receivers(vec![Receiver::email("seller@example.com", "10.00".parse().unwrap())])
//!             .cancel_url(url!("https://shop.example/cancel"))
//!             .return_url(url!("https://shop.example/return"))
//!             .build(),
//!     )
//!     .build();
//!
//! match client.pay_and_complete(&request) {
//!     Ok(response) => println!("paid: {}", response.pay_key),
//!     Err(Error::AuthorizationRequired { pay_key }) => {
//!         println!("approve at {}", client.approval_url(&pay_key).unwrap())
//!     }
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod credential {
    pub use adaptive_core::credential::*;
}

pub mod envelope {
    pub use adaptive_core::envelope::*;
}

pub mod errors {
    pub use adaptive_core::errors::*;
}

pub mod executor {
    pub use adaptive_core::executor::*;
}

pub mod nvp {
    pub use adaptive_core::nvp::*;
}

pub mod request {
    pub use adaptive_core::request::*;
}

pub mod response {
    pub use adaptive_core::response::*;
}

pub mod types {
    pub use adaptive_core::types::*;
}

pub mod validation {
    pub use adaptive_core::validation::*;
}

pub mod client;
pub mod config;

#[cfg(feature = "http-client")]
pub mod http_transport;
