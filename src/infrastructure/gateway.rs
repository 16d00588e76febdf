use crate::config::GatewayConfig;
use crate::domain::checkout::{CustomerDetails, GatewayCheckoutResult};
use crate::domain::ports::PaymentGateway;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Destination calling code the processor expects on phone numbers.
/// Fixed rather than derived from the request country.
const CALLING_CODE: &str = "+880";

const TRANSACTION_DESCRIPTION: &str = "Funding program checkout";

/// Client for the remote payment processor's checkout endpoint.
///
/// One outbound POST per charge, authenticated with Basic auth from the
/// configured key/secret pair. Timeouts and connection reuse belong to the
/// underlying `reqwest` client; callers needing retry must wrap this.
pub struct HttpPaymentGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

#[derive(Serialize)]
struct ChargePayload<'a> {
    customer_details: CustomerPayload<'a>,
    invoice_currency: &'a str,
    amount: u64,
    transaction_description: &'a str,
}

#[derive(Serialize)]
struct CustomerPayload<'a> {
    phone: String,
    name: &'a str,
    email: &'a str,
    country: &'a str,
}

impl HttpPaymentGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    fn payload<'a>(
        customer: &'a CustomerDetails,
        amount_minor: u64,
        currency: &'a str,
    ) -> ChargePayload<'a> {
        ChargePayload {
            customer_details: CustomerPayload {
                phone: format!("{CALLING_CODE}{}", customer.phone),
                name: &customer.name,
                email: &customer.email,
                country: &customer.country,
            },
            invoice_currency: currency,
            amount: amount_minor,
            transaction_description: TRANSACTION_DESCRIPTION,
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn charge(
        &self,
        customer: &CustomerDetails,
        amount_minor: u64,
        currency: &str,
    ) -> Result<GatewayCheckoutResult> {
        let payload = Self::payload(customer, amount_minor, currency);
        let response = self
            .http
            .post(&self.base_url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<GatewayCheckoutResult>().await?)
    }
}
