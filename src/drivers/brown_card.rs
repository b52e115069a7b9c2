//! Brown-card issuance driver.

use super::{wrapped_registration, NicEndpoint};
use crate::transport::NicTransport;
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const PATH: &str = "/public-api/generate-browncard";

pub const FIELD_NUMBER: &str = "brownCardNumber";
pub const FIELD_URL: &str = "url";

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
    #[serde(default, rename = "brownCardNumber")]
    brown_card_number: String,
    #[serde(default)]
    url: String,
}

fn map_response(registration: &str, envelope: Value) -> Outcome {
    let envelope: Envelope = match serde_json::from_value(envelope) {
        Ok(env) => env,
        Err(_) => return Outcome::failure(registration, "Invalid response from NIC"),
    };

    if envelope.success {
        Outcome::success(registration, "Brown card generated successfully")
            .with_field(FIELD_NUMBER, envelope.data.brown_card_number)
            .with_field(FIELD_URL, envelope.data.url)
    } else {
        Outcome::failure(registration, envelope.message)
    }
}

pub fn endpoint(transport: Arc<NicTransport>) -> NicEndpoint {
    NicEndpoint::new(transport, PATH, wrapped_registration, map_response)
}

/// Wire shape of one brown-card result, as served to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrownCardOutput {
    #[serde(rename = "statusCode")]
    pub status: bool,
    #[serde(rename = "brownCardNumber")]
    pub brown_card_number: String,
    pub url: String,
    pub message: String,
    #[serde(rename = "carNumber")]
    pub car_number: String,
}

impl From<Outcome> for BrownCardOutput {
    fn from(outcome: Outcome) -> Self {
        Self {
            status: outcome.success,
            brown_card_number: outcome.field(FIELD_NUMBER).to_string(),
            url: outcome.field(FIELD_URL).to_string(),
            message: outcome.message.clone(),
            car_number: outcome.registration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_success() {
        let envelope = json!({
            "success": true,
            "data": {"statusCode": "200", "brownCardNumber": "BC-42", "url": "https://nic/cards/42.pdf"},
            "message": "",
            "httpStatusCode": 200
        });
        let outcome = map_response("GR123422", envelope);
        assert!(outcome.success);
        assert_eq!(outcome.message, "Brown card generated successfully");
        assert_eq!(outcome.field(FIELD_NUMBER), "BC-42");
        assert_eq!(outcome.field(FIELD_URL), "https://nic/cards/42.pdf");
    }

    #[test]
    fn test_map_business_rejection_keeps_remote_message() {
        let envelope = json!({"success": false, "message": "No active policy"});
        let outcome = map_response("GR123422", envelope);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "No active policy");
    }

    #[test]
    fn test_map_malformed_envelope() {
        let outcome = map_response("GR123422", json!(["not", "an", "object"]));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Invalid response from NIC");
    }

    #[test]
    fn test_output_wire_names() {
        let outcome = Outcome::success("GR123422", "Brown card generated successfully")
            .with_field(FIELD_NUMBER, "BC-42")
            .with_field(FIELD_URL, "u");
        let output = BrownCardOutput::from(outcome);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["statusCode"], true);
        assert_eq!(json["brownCardNumber"], "BC-42");
        assert_eq!(json["carNumber"], "GR123422");
    }
}
