//! The application layer, which wraps text in an HTTP-like request.

use super::ParseError;
use crate::{Layer, LayerError, Payload};
use serde::Deserialize;
use tracing::info;

/// The verb every request is made with.
pub const VERB: &str = "GET";

/// The request envelope, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    pub request: String,
    pub data: String,
}

impl Request {
    /// Parses a request from its JSON text, rejecting any verb but [`VERB`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let request: Self = serde_json::from_slice(bytes)
            .map_err(|err| ParseError::InvalidJson(err.to_string()))?;
        if request.request != VERB {
            Err(ParseError::Verb {
                expected: VERB,
                actual: request.request.clone(),
            })?
        }
        Ok(request)
    }

    /// Serializes the request as JSON text.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "request": self.request,
            "data": self.data,
        })
        .to_string()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Application;

impl Application {
    pub const NAME: &'static str = "Application";
}

impl Layer for Application {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let data = String::from_utf8(payload.to_vec())
            .map_err(|_| LayerError::NotText { layer: Self::NAME })?;
        info!(layer = Self::NAME, verb = VERB, "Preparing HTTP-like request");
        let request = Request {
            request: VERB.to_string(),
            data,
        };
        Ok(Payload::new(request.to_json().into_bytes()))
    }

    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let request =
            Request::from_bytes(&payload.to_vec()).map_err(LayerError::malformed(Self::NAME))?;
        info!(layer = Self::NAME, verb = %request.request, "Parsing HTTP-like request");
        Ok(Payload::new(request.data.into_bytes()))
    }
}
