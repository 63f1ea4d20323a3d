//! The [`Stack`] that drives a message through every layer and back.

use crate::{layers::osi_layers, Layer, LayerError, Payload};
use thiserror::Error as ThisError;
use tracing::{debug, error, info, trace};

/// An ordered chain of layers, fixed at construction.
///
/// Sending runs each layer's encode from first to last. Receiving runs each
/// layer's decode from last to first, so a frame produced by [`Stack::send`]
/// is unwrapped by [`Stack::receive`] in exactly the reverse order.
pub struct Stack {
    layers: Vec<Box<dyn Layer>>,
}

impl Stack {
    /// Creates a stack from layers ordered top to bottom.
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Self {
        Self { layers }
    }

    /// Creates the seven layer OSI stack, Application first.
    pub fn osi() -> Self {
        Self::new(osi_layers())
    }

    /// The names of the layers, top to bottom.
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Encapsulates `message` through every layer and returns what would be
    /// put on the wire.
    pub fn send(&self, message: &str) -> Result<Payload, StackError> {
        let mut payload = Payload::new(message);
        for layer in self.layers.iter() {
            payload = layer.encode(payload).map_err(report)?;
            debug!(layer = layer.name(), bytes = payload.len(), "Encoded");
        }
        trace!(frame = %payload, "Frame ready to transmit");
        Ok(payload)
    }

    /// Decapsulates `frame` through every layer in reverse order and returns
    /// the message it carried.
    pub fn receive(&self, frame: Payload) -> Result<String, StackError> {
        let mut payload = frame;
        for layer in self.layers.iter().rev() {
            payload = layer.decode(payload).map_err(report)?;
            debug!(layer = layer.name(), bytes = payload.len(), "Decoded");
        }
        String::from_utf8(payload.to_vec()).map_err(|_| {
            error!("Received message is not valid UTF-8");
            StackError::NotText
        })
    }

    /// Sends `message` down the stack and receives it back up again.
    pub fn run(&self, message: &str) -> Result<String, StackError> {
        let frame = self.send(message)?;
        info!(bytes = frame.len(), "Transmitting data");
        self.receive(frame)
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::osi()
    }
}

fn report(err: LayerError) -> StackError {
    error!(layer = err.layer(), "{err}");
    StackError::Layer(err)
}

#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error(transparent)]
    Layer(#[from] LayerError),
    #[error("The received message is not valid UTF-8")]
    NotText,
}
