//! Creates a sandbox payment and looks it up again.
//!
//! ```sh
//! PAYPAL_APP_ID=APP-80W284485P519543T \
//! PAYPAL_USERNAME=... PAYPAL_PASSWORD=... PAYPAL_SIGNATURE=... \
//! PAYPAL_RECEIVER=seller@example.com \
//! cargo run --example sandbox_pay
//! ```

use std::env;

use adaptive_kit::{
    client::AdaptiveClient,
    config::Environment,
    credential::Credential,
    errors::Error,
    request::{PayRequest, PaymentDetails, Receiver},
    types::FeesPayer,
};
use url_macro::url;

fn var(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let credential = Credential::builder()
        .app_id(var("PAYPAL_APP_ID"))
        .username(var("PAYPAL_USERNAME"))
        .password(var("PAYPAL_PASSWORD"))
        .signature(var("PAYPAL_SIGNATURE"))
        .build();

    let client = AdaptiveClient::http(Environment::Sandbox, credential)
        .expect("failed to build HTTP client");

    let request = PayRequest::builder()
        .details(
            PaymentDetails::builder()
                .currency_code("USD")
                .receivers(vec![Receiver::email(
                    var("PAYPAL_RECEIVER"),
                    "10.00".parse().expect("valid amount"),
                )])
                .fees_payer(FeesPayer::EachReceiver)
                .memo("adaptive-kit sandbox example")
                .cancel_url(url!("https://shop.example/cancel"))
                .return_url(url!("https://shop.example/return"))
                .build(),
        )
        .build();
    println!("{request}");

    let pay_key = match client.pay_and_complete(&request) {
        Ok(response) => {
            println!("{response}");
            response.pay_key
        }
        Err(Error::AuthorizationRequired { pay_key }) => {
            match client.approval_url(&pay_key) {
                Ok(url) => println!("Approve the payment at {url}"),
                Err(err) => eprintln!("Cannot build approval URL: {err}"),
            }
            pay_key
        }
        Err(Error::PayPalError(records)) => {
            for record in records {
                eprintln!("[{}] {}", record.error_id, record.message);
            }
            return;
        }
        Err(err) => {
            eprintln!("Pay failed: {err}");
            return;
        }
    };

    match client.payment_details_for(pay_key) {
        Ok(details) => println!("{details}"),
        Err(err) => eprintln!("PaymentDetails failed: {err}"),
    }
}
