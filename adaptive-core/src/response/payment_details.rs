use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    describe::Fields,
    errors::Result,
    nvp::NvpMap,
    response::{FromNvp, ResponseEnvelope},
    types::{ActionType, FeesPayer, PaymentExecStatus},
};

/// Receiver side of a [`PaymentInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidReceiver {
    pub email: Option<String>,
    pub account_id: Option<String>,
    pub amount: Option<String>,
    pub primary: Option<bool>,
    pub invoice_id: Option<String>,
}

/// What happened to the money sent to one receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub receiver: PaidReceiver,
    pub transaction_id: Option<String>,
    pub transaction_status: Option<String>,
    pub sender_transaction_id: Option<String>,
    pub sender_transaction_status: Option<String>,
    pub refunded_amount: Option<String>,
    pub pending_refund: Option<bool>,
}

impl PaymentInfo {
    fn from_nvp(map: &NvpMap, index: usize) -> Self {
        let prefix = format!("paymentInfoList.paymentInfo({index})");
        let text = |name: &str| map.get(&format!("{prefix}.{name}")).map(str::to_string);
        let flag = |name: &str| map.get_bool(&format!("{prefix}.{name}"));

        PaymentInfo {
            receiver: PaidReceiver {
                email: text("receiver.email"),
                account_id: text("receiver.accountId"),
                amount: text("receiver.amount"),
                primary: flag("receiver.primary"),
                invoice_id: text("receiver.invoiceId"),
            },
            transaction_id: text("transactionId"),
            transaction_status: text("transactionStatus"),
            sender_transaction_id: text("senderTransactionId"),
            sender_transaction_status: text("senderTransactionStatus"),
            refunded_amount: text("refundedAmount"),
            pending_refund: flag("pendingRefund"),
        }
    }
}

/// Response of the PaymentDetails operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsResponse {
    pub envelope: ResponseEnvelope,
    /// Raw status token; see [`PaymentDetailsResponse::payment_status`].
    pub status: String,
    pub pay_key: Option<String>,
    pub action_type: Option<ActionType>,
    pub currency_code: Option<String>,
    pub sender_email: Option<String>,
    pub tracking_id: Option<String>,
    pub memo: Option<String>,
    pub fees_payer: Option<FeesPayer>,
    pub cancel_url: Option<String>,
    pub return_url: Option<String>,
    pub ipn_notification_url: Option<String>,
    pub reverse_all_parallel_payments_on_error: Option<bool>,
    pub payment_info: Vec<PaymentInfo>,
}

impl FromNvp for PaymentDetailsResponse {
    fn from_nvp(map: &NvpMap) -> Result<Self> {
        let text = |name: &str| map.get(name).map(str::to_string);

        Ok(PaymentDetailsResponse {
            envelope: ResponseEnvelope::from_nvp(map)?,
            status: map.require("status")?.to_string(),
            pay_key: text("payKey"),
            action_type: map.get("actionType").and_then(|v| v.parse().ok()),
            currency_code: text("currencyCode"),
            sender_email: text("senderEmail"),
            tracking_id: text("trackingId"),
            memo: text("memo"),
            fees_payer: map.get("feesPayer").and_then(|v| v.parse().ok()),
            cancel_url: text("cancelUrl"),
            return_url: text("returnUrl"),
            ipn_notification_url: text("ipnNotificationUrl"),
            reverse_all_parallel_payments_on_error: map
                .get_bool("reverseAllParallelPaymentsOnError"),
            payment_info: map
                .indices("paymentInfoList.paymentInfo")
                .into_iter()
                .map(|i| PaymentInfo::from_nvp(map, i))
                .collect(),
        })
    }
}

impl PaymentDetailsResponse {
    pub fn payment_status(&self) -> Option<PaymentExecStatus> {
        self.status.parse().ok()
    }
}

impl Display for PaymentDetailsResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields = Fields::new(f, "PaymentDetailsResponse")
            .field("ack", self.envelope.ack)
            .field("status", &self.status)
            .opt("payKey", self.pay_key.as_ref())
            .opt("actionType", self.action_type)
            .opt("currencyCode", self.currency_code.as_ref())
            .opt("senderEmail", self.sender_email.as_ref())
            .opt("trackingId", self.tracking_id.as_ref())
            .opt("memo", self.memo.as_ref())
            .opt("feesPayer", self.fees_payer);
        for (i, info) in self.payment_info.iter().enumerate() {
            let receiver = info
                .receiver
                .email
                .as_deref()
                .or(info.receiver.account_id.as_deref())
                .unwrap_or("-");
            fields = fields.field(
                &format!("paymentInfo({i})"),
                format_args!(
                    "{receiver} {} {}",
                    info.receiver.amount.as_deref().unwrap_or("-"),
                    info.transaction_status.as_deref().unwrap_or("-")
                ),
            );
        }
        fields.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nvp::decode, response::classify};

    const COMPLETED: &[u8] = b"responseEnvelope.timestamp=2024-05-01T10%3A00%3A00.000-07%3A00\
        &responseEnvelope.ack=Success\
        &responseEnvelope.correlationId=7f3a\
        &responseEnvelope.build=2486531\
        &cancelUrl=https%3A%2F%2Fshop.example%2Fcancel\
        &currencyCode=USD\
        &ipnNotificationUrl=https%3A%2F%2Fshop.example%2Fipn\
        &memo=Order+%237\
        &paymentInfoList.paymentInfo(0).transactionId=6LJ1234\
        &paymentInfoList.paymentInfo(0).transactionStatus=COMPLETED\
        &paymentInfoList.paymentInfo(0).receiver.amount=10.00\
        &paymentInfoList.paymentInfo(0).receiver.email=a%40b.com\
        &paymentInfoList.paymentInfo(0).receiver.primary=true\
        &paymentInfoList.paymentInfo(0).refundedAmount=0.00\
        &paymentInfoList.paymentInfo(0).pendingRefund=false\
        &paymentInfoList.paymentInfo(0).senderTransactionId=9XY0987\
        &paymentInfoList.paymentInfo(0).senderTransactionStatus=COMPLETED\
        &paymentInfoList.paymentInfo(1).receiver.amount=2.50\
        &paymentInfoList.paymentInfo(1).receiver.accountId=ACCT42\
        &returnUrl=https%3A%2F%2Fshop.example%2Freturn\
        &senderEmail=buyer%40example.com\
        &status=COMPLETED\
        &payKey=AP-1234\
        &actionType=PAY\
        &feesPayer=EACHRECEIVER\
        &reverseAllParallelPaymentsOnError=false";

    #[test]
    fn test_parse_payment_details_response() {
        let details: PaymentDetailsResponse = classify(&decode(COMPLETED).unwrap()).unwrap();
        assert_eq!(details.payment_status(), Some(PaymentExecStatus::Completed));
        assert_eq!(details.pay_key.as_deref(), Some("AP-1234"));
        assert_eq!(details.action_type, Some(ActionType::Pay));
        assert_eq!(details.fees_payer, Some(FeesPayer::EachReceiver));
        assert_eq!(details.memo.as_deref(), Some("Order #7"));
        assert_eq!(details.sender_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(
            details.cancel_url.as_deref(),
            Some("https://shop.example/cancel")
        );
        assert_eq!(details.reverse_all_parallel_payments_on_error, Some(false));
        assert_eq!(details.tracking_id, None);

        assert_eq!(details.payment_info.len(), 2);
        let first = &details.payment_info[0];
        assert_eq!(first.receiver.email.as_deref(), Some("a@b.com"));
        assert_eq!(first.receiver.primary, Some(true));
        assert_eq!(first.transaction_id.as_deref(), Some("6LJ1234"));
        assert_eq!(first.pending_refund, Some(false));
        let second = &details.payment_info[1];
        assert_eq!(second.receiver.account_id.as_deref(), Some("ACCT42"));
        assert_eq!(second.transaction_status, None);
    }

    #[test]
    fn test_payment_info_with_index_gap() {
        let map = decode(
            b"responseEnvelope.ack=Success&status=INCOMPLETE\
              &paymentInfoList.paymentInfo(0).receiver.email=a%40b.com\
              &paymentInfoList.paymentInfo(2).receiver.email=c%40d.com\
              &paymentInfoList.paymentInfo(2).transactionStatus=PENDING",
        )
        .unwrap();
        let details = PaymentDetailsResponse::from_nvp(&map).unwrap();
        assert_eq!(details.payment_info.len(), 2);
        assert_eq!(
            details.payment_info[1].receiver.email.as_deref(),
            Some("c@d.com")
        );
        assert_eq!(
            details.payment_info[1].transaction_status.as_deref(),
            Some("PENDING")
        );
    }

    #[test]
    fn test_status_required() {
        let map = decode(b"responseEnvelope.ack=Success&payKey=AP-1").unwrap();
        assert!(PaymentDetailsResponse::from_nvp(&map).is_err());
    }

    #[test]
    fn test_display() {
        let map = decode(
            b"responseEnvelope.ack=Success&status=CREATED&payKey=AP-1\
              &paymentInfoList.paymentInfo(0).receiver.email=a%40b.com\
              &paymentInfoList.paymentInfo(0).receiver.amount=10.00",
        )
        .unwrap();
        let details = PaymentDetailsResponse::from_nvp(&map).unwrap();
        assert_eq!(
            details.to_string(),
            "PaymentDetailsResponse\n  ack: Success\n  status: CREATED\n  payKey: AP-1\
             \n  paymentInfo(0): a@b.com 10.00 -"
        );
    }
}
