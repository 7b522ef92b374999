use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    describe::Fields, nvp::ParameterSet, request::Operation, response::PaymentDetailsResponse,
};

/// Looks up a payment previously set up with Pay.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsRequest {
    /// Pay key returned by Pay. Required.
    #[builder(into)]
    pub pay_key: Option<String>,
    #[builder(into)]
    pub transaction_id: Option<String>,
    #[builder(into)]
    pub tracking_id: Option<String>,
}

impl PaymentDetailsRequest {
    pub fn for_pay_key(pay_key: impl Into<String>) -> Self {
        PaymentDetailsRequest::builder().pay_key(pay_key).build()
    }
}

impl Operation for PaymentDetailsRequest {
    const NAME: &'static str = "PaymentDetails";

    type Response = PaymentDetailsResponse;

    fn missing_parameter(&self) -> Option<&'static str> {
        if self.pay_key.as_deref().is_none_or(str::is_empty) {
            Some("payKey")
        } else {
            None
        }
    }

    fn append_to(&self, params: &mut ParameterSet) {
        params.push_opt("payKey", self.pay_key.as_ref());
        params.push_opt("transactionId", self.transaction_id.as_ref());
        params.push_opt("trackingId", self.tracking_id.as_ref());
    }
}

impl Display for PaymentDetailsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Fields::new(f, "PaymentDetailsRequest")
            .opt("payKey", self.pay_key.as_ref())
            .opt("transactionId", self.transaction_id.as_ref())
            .opt("trackingId", self.tracking_id.as_ref())
            .finish()
    }
}
