//! USSD insurance-status check driver.
//!
//! The USSD gateway speaks its own dialect: a flat request payload with
//! fixed `USERID`/`MSISDN` session fields, and a `{USERID, MSISDN, MSG,
//! MSGTYPE}` response where success is inferred from `MSG` being non-empty
//! rather than from an explicit flag.

use super::NicEndpoint;
use crate::transport::{CallError, NicTransport};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const PATH: &str = "/public-api/vehicle-insurance-ussd-check";

const NO_STATUS_MESSAGE: &str = "No insurance status returned for this registration";

#[derive(Serialize)]
struct UssdRequest<'a> {
    #[serde(rename = "registrationNumber")]
    registration_number: &'a str,
    #[serde(rename = "USERID")]
    user_id: &'static str,
    #[serde(rename = "MSISDN")]
    msisdn: &'static str,
    #[serde(rename = "MSGTYPE")]
    msg_type: bool,
    #[serde(rename = "USERDATA")]
    user_data: &'a str,
}

fn build_request(registration: &str) -> std::result::Result<Value, CallError> {
    serde_json::to_value(UssdRequest {
        registration_number: registration,
        user_id: "1",
        msisdn: "8",
        msg_type: false,
        user_data: registration,
    })
    .map_err(CallError::Encoding)
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default, rename = "MSG")]
    msg: String,
}

fn map_response(registration: &str, envelope: Value) -> Outcome {
    let envelope: Envelope = match serde_json::from_value(envelope) {
        Ok(env) => env,
        Err(_) => return Outcome::failure(registration, "Invalid response from NIC"),
    };

    if envelope.msg.is_empty() {
        Outcome::failure(registration, NO_STATUS_MESSAGE)
    } else {
        Outcome::success(registration, envelope.msg)
    }
}

pub fn endpoint(transport: Arc<NicTransport>) -> NicEndpoint {
    NicEndpoint::new(transport, PATH, build_request, map_response)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UssdCheckOutput {
    #[serde(rename = "statusCode")]
    pub status: bool,
    pub message: String,
    #[serde(rename = "carNumber")]
    pub car_number: String,
}

impl From<Outcome> for UssdCheckOutput {
    fn from(outcome: Outcome) -> Self {
        Self {
            status: outcome.success,
            message: outcome.message.clone(),
            car_number: outcome.registration,
        }
    }
}
