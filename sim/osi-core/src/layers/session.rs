//! The session layer, which marks every payload with the state of its
//! session.
//!
//! Envelope: the length-prefixed state name followed by the length-prefixed
//! payload.

use super::{
    utility::{expect_end, length_prefix, take_length_prefixed},
    ParseError,
};
use crate::{Layer, LayerError, Payload};
use std::fmt::{self, Display, Formatter};
use tracing::info;

/// The states a simulated session can be in. There is only ever one session,
/// and it is always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Active,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Active => "ACTIVE",
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let name = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
        match name {
            "ACTIVE" => Ok(SessionState::Active),
            other => Err(ParseError::UnknownSessionState(other.to_string())),
        }
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The state attached to outgoing payloads.
pub const STATE: SessionState = SessionState::Active;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Session;

impl Session {
    pub const NAME: &'static str = "Session";
}

impl Layer for Session {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, mut payload: Payload) -> Result<Payload, LayerError> {
        info!(layer = Self::NAME, state = %STATE, "Managing session");
        let too_long = LayerError::OverlyLongPayload { layer: Self::NAME };
        let state = STATE.as_str();
        payload.header(length_prefix(payload.len()).ok_or(too_long.clone())?);
        payload.header(state);
        payload.header(length_prefix(state.len()).ok_or(too_long)?);
        Ok(payload)
    }

    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let (state, payload) = parse(payload).map_err(LayerError::malformed(Self::NAME))?;
        info!(layer = Self::NAME, %state, "Handling session");
        Ok(payload)
    }
}

fn parse(mut payload: Payload) -> Result<(SessionState, Payload), ParseError> {
    let state = take_length_prefixed(&mut payload)?;
    let state = SessionState::from_bytes(&state.to_vec())?;
    let body = take_length_prefixed(&mut payload)?;
    expect_end(&payload)?;
    Ok((state, body))
}
