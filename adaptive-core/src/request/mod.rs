//! Typed requests and their NVP encoding.
//!
//! Each API operation implements [`Operation`]. The encoder always writes the
//! request envelope first, then the operation's own parameters in a fixed
//! order; see [`encode`].

mod pay;
mod payment_details;

pub use pay::*;
pub use payment_details::*;

use crate::{envelope::RequestEnvelope, nvp::ParameterSet, response::FromNvp};

/// An Adaptive Payments API operation.
pub trait Operation {
    /// Operation name, appended to the service base URL.
    const NAME: &'static str;

    /// Typed response returned on success.
    type Response: FromNvp;

    /// The first required parameter that is absent, if any.
    fn missing_parameter(&self) -> Option<&'static str>;

    /// Appends the operation's parameters, in wire order.
    fn append_to(&self, params: &mut ParameterSet);
}

/// Builds the full parameter set for an operation: envelope first, then payload.
pub fn encode<O: Operation>(envelope: &RequestEnvelope, operation: &O) -> ParameterSet {
    let mut params = ParameterSet::new();
    envelope.append_to(&mut params);
    operation.append_to(&mut params);
    params
}
