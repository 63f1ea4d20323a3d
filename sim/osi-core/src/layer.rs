//! The [`Layer`] trait and supporting types.
//!
//! A layer is one stage of the simulated protocol stack. On the way down it
//! wraps whatever the layer above handed it in its own envelope; on the way up
//! it checks and removes that envelope again. Layers never look inside another
//! layer's header.
//!
//! ```
//! use osi_core::{Layer, LayerError, Payload};
//!
//! struct Loopback;
//!
//! impl Layer for Loopback {
//!     fn name(&self) -> &'static str {
//!         "Loopback"
//!     }
//!
//!     fn encode(&self, payload: Payload) -> Result<Payload, LayerError> {
//!         Ok(payload)
//!     }
//!
//!     fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
//!         Ok(payload)
//!     }
//! }
//! ```

use crate::{layers::ParseError, Payload};
use std::fmt::{self, Display, Formatter};
use thiserror::Error as ThisError;

/// A member of the simulated protocol stack.
///
/// Implementors are stateless: the same instance encodes a message on the way
/// down and decodes it on the way back up.
pub trait Layer {
    /// The human-readable name used in traces and errors.
    fn name(&self) -> &'static str;

    /// Wraps `payload` in this layer's envelope.
    ///
    /// Every implementation should emit exactly one trace event describing
    /// the operation. The default body reports that the layer does not
    /// support encoding.
    fn encode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let _ = payload;
        Err(LayerError::Unimplemented {
            layer: self.name(),
            direction: Direction::Encode,
        })
    }

    /// Removes this layer's envelope from `payload`, which must have exactly
    /// the shape [`encode`](Layer::encode) produces.
    ///
    /// Every implementation should emit exactly one trace event describing
    /// the operation. The default body reports that the layer does not
    /// support decoding.
    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let _ = payload;
        Err(LayerError::Unimplemented {
            layer: self.name(),
            direction: Direction::Decode,
        })
    }
}

/// Which way a payload is travelling through the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Down the stack, towards the physical medium.
    Encode,
    /// Up the stack, towards the application.
    Decode,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => write!(f, "encode"),
            Direction::Decode => write!(f, "decode"),
        }
    }
}

#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum LayerError {
    #[error("The {layer} layer does not implement {direction}")]
    Unimplemented {
        layer: &'static str,
        direction: Direction,
    },
    #[error("The {layer} layer received a malformed envelope: {source}")]
    MalformedEnvelope {
        layer: &'static str,
        source: ParseError,
    },
    #[error("The {layer} layer can only encode UTF-8 text")]
    NotText { layer: &'static str },
    #[error("The payload is too long for the {layer} layer's length field")]
    OverlyLongPayload { layer: &'static str },
}

impl LayerError {
    /// Returns a closure that attributes a [`ParseError`] to `layer`, for use
    /// with [`Result::map_err`].
    pub fn malformed(layer: &'static str) -> impl FnOnce(ParseError) -> Self {
        move |source| Self::MalformedEnvelope { layer, source }
    }

    /// The name of the layer that produced the error.
    pub fn layer(&self) -> &'static str {
        match self {
            LayerError::Unimplemented { layer, .. }
            | LayerError::MalformedEnvelope { layer, .. }
            | LayerError::NotText { layer }
            | LayerError::OverlyLongPayload { layer } => layer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl Layer for Blank {
        fn name(&self) -> &'static str {
            "Blank"
        }
    }

    #[test]
    fn encode_without_override() {
        let err = Blank.encode(Payload::new("hi")).unwrap_err();
        assert_eq!(
            err,
            LayerError::Unimplemented {
                layer: "Blank",
                direction: Direction::Encode,
            }
        );
        assert_eq!(err.to_string(), "The Blank layer does not implement encode");
    }

    #[test]
    fn decode_without_override() {
        let err = Blank.decode(Payload::new("hi")).unwrap_err();
        assert_eq!(
            err,
            LayerError::Unimplemented {
                layer: "Blank",
                direction: Direction::Decode,
            }
        );
        assert_eq!(err.layer(), "Blank");
    }

    #[test]
    fn malformed_names_layer() {
        let err = LayerError::malformed("Session")(ParseError::HeaderTooShort);
        assert_eq!(err.layer(), "Session");
        assert_eq!(
            err.to_string(),
            "The Session layer received a malformed envelope: Too few bytes to constitute a header"
        );
    }
}
