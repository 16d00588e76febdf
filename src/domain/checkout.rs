use crate::error::{Result, ServiceError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inbound checkout payload.
///
/// Missing fields are tolerated at deserialization so the workflow can reject
/// them with a normalized validation error instead of a transport-level 422.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_price: Option<Decimal>,
}

/// Accepts a price as a JSON number or numeric string; anything else reads as
/// absent so validation can reject it with a normalized error.
fn lenient_decimal<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        serde_json::Value::String(s) => s.parse::<Decimal>().ok(),
        _ => None,
    })
}

impl CheckoutRequest {
    /// Validates the payload and extracts the gateway-facing customer details
    /// together with the charge amount in minor units.
    pub fn validate(&self) -> Result<(CustomerDetails, u64)> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ServiceError::Validation(
                "a valid email address is required".to_string(),
            ));
        }
        let price = self
            .total_price
            .ok_or_else(|| ServiceError::Validation("totalPrice is required".to_string()))?;
        let amount = minor_units(price)?;

        Ok((
            CustomerDetails {
                name: self.first_name.clone(),
                phone: self.phone.clone(),
                email: self.email.clone(),
                country: self.country.clone(),
            },
            amount,
        ))
    }
}

/// Customer identity passed to the payment processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub country: String,
}

/// What the payment processor reports back for one charge.
///
/// `status` is opaque to this service; control flow never branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayCheckoutResult {
    pub status: String,
    pub transaction_id: String,
}

/// Durable trace of one checkout attempt.
///
/// Created exactly once per successful gateway call and never updated; the
/// identifier is generated here, not by the store or the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRecord {
    pub id: Uuid,
    pub first_name: String,
    pub phone: String,
    pub email: String,
    pub country: String,
    pub total_price: Decimal,
    pub payment_status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl CheckoutRecord {
    pub fn new(request: &CheckoutRequest, result: &GatewayCheckoutResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: request.first_name.clone(),
            phone: request.phone.clone(),
            email: request.email.clone(),
            country: request.country.clone(),
            total_price: request.total_price.unwrap_or_default(),
            payment_status: result.status.clone(),
            transaction_id: result.transaction_id.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Converts a decimal price into an integer number of minor currency units.
///
/// Sub-cent fractions are truncated, never rounded: 49.999 charges 4999.
/// Prices that truncate to zero or below are rejected here, before any
/// gateway call is made.
pub fn minor_units(price: Decimal) -> Result<u64> {
    let minor = (price * Decimal::ONE_HUNDRED).trunc();
    match minor.to_u64() {
        Some(units) if units > 0 => Ok(units),
        _ => Err(ServiceError::Validation(format!(
            "totalPrice {price} is not a chargeable amount"
        ))),
    }
}
