//! Policy-verification driver.
//!
//! The provider's verification envelope carries no usable `message` field,
//! so business rejections get a fixed generic message instead of a
//! remote-supplied reason.

use super::NicEndpoint;
use crate::transport::{CallError, NicTransport};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const PATH: &str = "/public-api/policy-verification";

pub const FIELD_PRODUCT: &str = "productName";
pub const FIELD_START: &str = "startDate";
pub const FIELD_END: &str = "endDate";

#[derive(Serialize)]
struct VerificationData<'a> {
    #[serde(rename = "registrationNumber")]
    registration_number: &'a str,
}

#[derive(Serialize)]
struct VerificationRequest<'a> {
    data: VerificationData<'a>,
}

/// Same wrapped shape as issuance, but the registration is trimmed before
/// it goes on the wire.
fn build_request(registration: &str) -> std::result::Result<Value, CallError> {
    serde_json::to_value(VerificationRequest {
        data: VerificationData {
            registration_number: registration.trim(),
        },
    })
    .map_err(CallError::Encoding)
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: EnvelopeData,
}

#[derive(Deserialize, Default)]
struct EnvelopeData {
    #[serde(default, rename = "productName")]
    product_name: String,
    #[serde(default, rename = "startDate")]
    start_date: String,
    #[serde(default, rename = "endDate")]
    end_date: String,
}

fn map_response(registration: &str, envelope: Value) -> Outcome {
    let envelope: Envelope = match serde_json::from_value(envelope) {
        Ok(env) => env,
        Err(_) => return Outcome::failure(registration, "Invalid response from NIC"),
    };

    if envelope.success {
        Outcome::success(registration, "policy generated successfully.")
            .with_field(FIELD_PRODUCT, envelope.data.product_name)
            .with_field(FIELD_START, envelope.data.start_date)
            .with_field(FIELD_END, envelope.data.end_date)
    } else {
        Outcome::failure(registration, "Failed to generate Policy")
    }
}

pub fn endpoint(transport: Arc<NicTransport>) -> NicEndpoint {
    NicEndpoint::new(transport, PATH, build_request, map_response)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerificationOutput {
    #[serde(rename = "statusCode")]
    pub status: bool,
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub message: String,
    #[serde(rename = "carNumber")]
    pub car_number: String,
}

impl From<Outcome> for PolicyVerificationOutput {
    fn from(outcome: Outcome) -> Self {
        Self {
            status: outcome.success,
            product_name: outcome.field(FIELD_PRODUCT).to_string(),
            start_date: outcome.field(FIELD_START).to_string(),
            end_date: outcome.field(FIELD_END).to_string(),
            message: outcome.message.clone(),
            car_number: outcome.registration,
        }
    }
}
