//! NIC endpoint drivers.
//!
//! The four batch endpoints share one wire shape — a JSON body wrapping the
//! registration number, `Authorization: x-api-key`, a JSON envelope back —
//! and differ only in path, payload framing, and which response fields feed
//! the outcome. That difference lives in a request-builder/response-mapper
//! pair per driver; the control flow is implemented once in
//! [`NicEndpoint`].
//!
//! | Driver | Path | Extracts |
//! |--------|------|----------|
//! | [`brown_card`] | `/public-api/generate-browncard` | brown card number, document URL |
//! | [`sticker`] | `/public-api/generate-sticker` | sticker number, sticker link |
//! | [`policy_verification`] | `/public-api/policy-verification` | product name, validity window |
//! | [`ussd_check`] | `/public-api/vehicle-insurance-ussd-check` | status line (`MSG`) |

pub mod brown_card;
pub mod policy_verification;
pub mod sticker;
pub mod ussd_check;

use crate::batch::RemoteCall;
use crate::transport::{CallError, NicTransport};
use crate::types::Outcome;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Builds the outbound JSON body for one registration.
pub type BuildFn = fn(&str) -> std::result::Result<Value, CallError>;

/// Maps the decoded response body into the item's outcome.
pub type MapFn = fn(&str, Value) -> Outcome;

/// One provider endpoint as a [`RemoteCall`] capability.
///
/// Owns the shared control flow of every variant: build the payload, POST
/// it, hand the decoded envelope to the mapper. Any [`CallError`] on the
/// way becomes the item's failed outcome with the error's display text as
/// the message; nothing unwinds past the worker.
pub struct NicEndpoint {
    transport: Arc<NicTransport>,
    path: &'static str,
    build: BuildFn,
    map: MapFn,
}

impl NicEndpoint {
    pub fn new(
        transport: Arc<NicTransport>,
        path: &'static str,
        build: BuildFn,
        map: MapFn,
    ) -> Self {
        Self {
            transport,
            path,
            build,
            map,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

#[async_trait]
impl RemoteCall for NicEndpoint {
    async fn call(&self, registration: &str) -> Outcome {
        let body = match (self.build)(registration) {
            Ok(body) => body,
            Err(e) => return Outcome::failure(registration, e.to_string()),
        };

        match self.transport.post_json(self.path, &body).await {
            Ok(envelope) => (self.map)(registration, envelope),
            Err(e) => Outcome::failure(registration, e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct RegistrationData<'a> {
    #[serde(rename = "registrationNumber")]
    registration_number: &'a str,
}

#[derive(Serialize)]
struct WrappedRequest<'a> {
    data: RegistrationData<'a>,
}

/// Standard payload shape: `{"data": {"registrationNumber": "..."}}`.
fn wrapped_registration(registration: &str) -> std::result::Result<Value, CallError> {
    serde_json::to_value(WrappedRequest {
        data: RegistrationData {
            registration_number: registration,
        },
    })
    .map_err(CallError::Encoding)
}
