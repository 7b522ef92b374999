use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    describe::Fields,
    nvp::ParameterSet,
    request::Operation,
    response::PayResponse,
    types::{ActionType, Amount, FeesPayer, PaymentType},
};

/// How a receiver is identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReceiverId {
    Email(String),
    AccountId(String),
}

/// One recipient of a payment.
///
/// The position of a receiver in [`PaymentDetails::receivers`] is its index
/// on the wire, e.g. `receiverList.receiver(0).email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receiver {
    #[serde(flatten)]
    pub id: ReceiverId,
    pub amount: Amount,
    /// Marks the primary receiver of a chained payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
}

impl Receiver {
    /// A receiver identified by the email address of its account.
    pub fn email(email: impl Into<String>, amount: Amount) -> Self {
        Self::new(ReceiverId::Email(email.into()), amount)
    }

    /// A receiver identified by its account id.
    pub fn account_id(account_id: impl Into<String>, amount: Amount) -> Self {
        Self::new(ReceiverId::AccountId(account_id.into()), amount)
    }

    fn new(id: ReceiverId, amount: Amount) -> Self {
        Receiver {
            id,
            amount,
            primary: None,
            invoice_id: None,
            payment_type: None,
        }
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = Some(payment_type);
        self
    }

    fn append_to(&self, index: usize, params: &mut ParameterSet) {
        let prefix = format!("receiverList.receiver({index})");
        match &self.id {
            ReceiverId::Email(email) => params.push_opt(format!("{prefix}.email"), Some(email)),
            ReceiverId::AccountId(id) => params.push_opt(format!("{prefix}.accountId"), Some(id)),
        }
        params.push(format!("{prefix}.amount"), self.amount.as_str());
        params.push_opt(format!("{prefix}.primary"), self.primary);
        params.push_opt(format!("{prefix}.invoiceId"), self.invoice_id.as_ref());
        params.push_opt(format!("{prefix}.paymentType"), self.payment_type);
    }
}

impl Display for ReceiverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiverId::Email(email) => write!(f, "{email}"),
            ReceiverId::AccountId(id) => write!(f, "account {id}"),
        }
    }
}

/// Payment instructions for the Pay operation.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Receivers, in wire order. At least one is required.
    #[builder(default)]
    #[serde(default)]
    pub receivers: Vec<Receiver>,
    /// ISO 4217 currency code. Required.
    #[builder(into)]
    pub currency_code: Option<String>,
    #[builder(default)]
    #[serde(default)]
    pub action_type: ActionType,
    /// Where the sender lands after cancelling the approval flow.
    pub cancel_url: Option<Url>,
    /// Where the sender lands after approving the payment.
    pub return_url: Option<Url>,
    pub ipn_notification_url: Option<Url>,
    pub fees_payer: Option<FeesPayer>,
    #[builder(into)]
    pub memo: Option<String>,
    #[builder(into)]
    pub pin: Option<String>,
    #[builder(into)]
    pub preapproval_key: Option<String>,
    pub reverse_all_parallel_payments_on_error: Option<bool>,
    #[builder(into)]
    pub sender_email: Option<String>,
    #[builder(into)]
    pub tracking_id: Option<String>,
}

impl PaymentDetails {
    pub fn add_receiver(&mut self, receiver: Receiver) -> &mut Self {
        self.receivers.push(receiver);
        self
    }

    pub fn missing_parameter(&self) -> Option<&'static str> {
        if self.receivers.is_empty() {
            return Some("Receiver");
        }
        if self.currency_code.as_deref().is_none_or(str::is_empty) {
            return Some("CurrencyCode");
        }
        None
    }

    pub fn append_to(&self, params: &mut ParameterSet) {
        params.push_opt("currencyCode", self.currency_code.as_ref());
        for (index, receiver) in self.receivers.iter().enumerate() {
            receiver.append_to(index, params);
        }
        params.push("actionType", self.action_type.as_str());
        params.push_opt("cancelUrl", self.cancel_url.as_ref());
        params.push_opt("returnUrl", self.return_url.as_ref());
        params.push_opt("ipnNotificationUrl", self.ipn_notification_url.as_ref());
        params.push_opt("feesPayer", self.fees_payer);
        params.push_opt("memo", self.memo.as_ref());
        params.push_opt("pin", self.pin.as_ref());
        params.push_opt("preapprovalKey", self.preapproval_key.as_ref());
        params.push_opt(
            "reverseAllParallelPaymentsOnError",
            self.reverse_all_parallel_payments_on_error,
        );
        params.push_opt("senderEmail", self.sender_email.as_ref());
        params.push_opt("trackingId", self.tracking_id.as_ref());
    }
}

/// Information about the client application and the end customer.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    #[builder(into)]
    pub application_id: Option<String>,
    #[builder(into)]
    pub ip_address: Option<String>,
    #[builder(into)]
    pub device_id: Option<String>,
    #[builder(into)]
    pub partner_name: Option<String>,
    #[builder(into)]
    pub customer_id: Option<String>,
    #[builder(into)]
    pub customer_type: Option<String>,
    #[builder(into)]
    pub geo_location: Option<String>,
    #[builder(into)]
    pub model: Option<String>,
}

impl ClientDetails {
    pub fn append_to(&self, params: &mut ParameterSet) {
        params.push_opt("clientDetails.applicationId", self.application_id.as_ref());
        params.push_opt("clientDetails.ipAddress", self.ip_address.as_ref());
        params.push_opt("clientDetails.deviceId", self.device_id.as_ref());
        params.push_opt("clientDetails.partnerName", self.partner_name.as_ref());
        params.push_opt("clientDetails.customerId", self.customer_id.as_ref());
        params.push_opt("clientDetails.customerType", self.customer_type.as_ref());
        params.push_opt("clientDetails.geoLocation", self.geo_location.as_ref());
        params.push_opt("clientDetails.model", self.model.as_ref());
    }
}

/// Initiates a simple, chained or parallel payment.
///
/// ```
/// use adaptive_core::{
///     envelope::RequestEnvelope,
///     request::{PayRequest, PaymentDetails, Receiver, encode},
/// };
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
/// let body = encode(&RequestEnvelope::default(), &request).encode();
/// assert_eq!(
///     body,
///     "requestEnvelope.errorLanguage=en_US&currencyCode=USD\
///      &receiverList.receiver(0).email=a%40b.com&receiverList.receiver(0).amount=10.00\
///      &actionType=PAY"
/// );
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    pub details: PaymentDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_details: Option<ClientDetails>,
}

impl Operation for PayRequest {
    const NAME: &'static str = "Pay";

    type Response = PayResponse;

    fn missing_parameter(&self) -> Option<&'static str> {
        self.details.missing_parameter()
    }

    fn append_to(&self, params: &mut ParameterSet) {
        self.details.append_to(params);
        if let Some(client_details) = &self.client_details {
            client_details.append_to(params);
        }
    }
}

impl Display for PayRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let details = &self.details;
        let mut fields = Fields::new(f, "PayRequest")
            .field("actionType", details.action_type)
            .opt("currencyCode", details.currency_code.as_ref());
        for (i, receiver) in details.receivers.iter().enumerate() {
            fields = fields.field(
                &format!("receiver({i})"),
                format_args!("{} {}", receiver.id, receiver.amount),
            );
        }
        fields
            .opt("cancelUrl", details.cancel_url.as_ref())
            .opt("returnUrl", details.return_url.as_ref())
            .opt("ipnNotificationUrl", details.ipn_notification_url.as_ref())
            .opt("feesPayer", details.fees_payer)
            .opt("memo", details.memo.as_ref())
            .opt("preapprovalKey", details.preapproval_key.as_ref())
            .opt("senderEmail", details.sender_email.as_ref())
            .opt("trackingId", details.tracking_id.as_ref())
            .finish()
    }
}
