//! Insurance-sticker issuance driver.

use super::{wrapped_registration, NicEndpoint};
use crate::transport::NicTransport;
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const PATH: &str = "/public-api/generate-sticker";

pub const FIELD_LINK: &str = "stickerLink";
pub const FIELD_NUMBER: &str = "stickerNumber";

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: EnvelopeData,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize, Default)]
struct EnvelopeData {
    #[serde(default, rename = "stickerLink")]
    sticker_link: String,
    #[serde(default, rename = "stickerNumber")]
    sticker_number: String,
}

fn map_response(registration: &str, envelope: Value) -> Outcome {
    let envelope: Envelope = match serde_json::from_value(envelope) {
        Ok(env) => env,
        Err(_) => return Outcome::failure(registration, "Invalid response from NIC"),
    };

    if envelope.success {
        Outcome::success(
            registration,
            "Sticker generated and assigned to policy successfully.",
        )
        .with_field(FIELD_LINK, envelope.data.sticker_link)
        .with_field(FIELD_NUMBER, envelope.data.sticker_number)
    } else {
        Outcome::failure(registration, envelope.message)
    }
}

pub fn endpoint(transport: Arc<NicTransport>) -> NicEndpoint {
    NicEndpoint::new(transport, PATH, wrapped_registration, map_response)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerOutput {
    #[serde(rename = "statusCode")]
    pub status: bool,
    #[serde(rename = "stickerLink")]
    pub sticker_link: String,
    #[serde(rename = "stickerNumber")]
    pub sticker_number: String,
    pub message: String,
    #[serde(rename = "carNumber")]
    pub car_number: String,
}

impl From<Outcome> for StickerOutput {
    fn from(outcome: Outcome) -> Self {
        Self {
            status: outcome.success,
            sticker_link: outcome.field(FIELD_LINK).to_string(),
            sticker_number: outcome.field(FIELD_NUMBER).to_string(),
            message: outcome.message.clone(),
            car_number: outcome.registration,
        }
    }
}
