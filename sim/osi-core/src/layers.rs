//! The seven concrete layers of the OSI model.
//!
//! Each layer lives in its own module alongside the envelope type it builds
//! and parses. [`osi_layers`] returns them in top-to-bottom order.

pub mod application;
pub use application::Application;

pub mod presentation;
pub use presentation::Presentation;

pub mod session;
pub use session::Session;

pub mod transport;
pub use transport::Transport;

pub mod network;
pub use network::Network;

pub mod data_link;
pub use data_link::DataLink;

pub mod physical;
pub use physical::Physical;

pub mod utility;

use crate::Layer;
use thiserror::Error as ThisError;

/// Returns one instance of every layer, from Application down to Physical.
pub fn osi_layers() -> Vec<Box<dyn Layer>> {
    vec![
        Box::new(Application),
        Box::new(Presentation),
        Box::new(Session),
        Box::new(Transport),
        Box::new(Network),
        Box::new(DataLink),
        Box::new(Physical),
    ]
}

/// The ways an envelope can fail to match what its layer would have encoded.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Too few bytes to constitute a header")]
    HeaderTooShort,
    #[error("The header announces {expected} payload bytes but only {actual} remain")]
    PayloadTooShort { expected: usize, actual: usize },
    #[error("{0} unexpected bytes follow the end of the envelope")]
    TrailingBytes(usize),
    #[error("Expected sequence number {expected} but found {actual}")]
    Sequence { expected: u32, actual: u32 },
    #[error("The {field} address {actual} does not match {expected}")]
    Address {
        field: &'static str,
        expected: String,
        actual: String,
    },
    #[error("The frame does not begin with a preamble and start frame delimiter")]
    Preamble,
    #[error(
        "The computed checksum {actual:#06x} did not match the frame check sequence {expected:#06x}"
    )]
    Checksum { actual: u16, expected: u16 },
    #[error("Unknown payload encoding tag {0:#04x}")]
    UnknownEncoding(u8),
    #[error("Unknown session state {0:?}")]
    UnknownSessionState(String),
    #[error("The envelope holds text that is not valid UTF-8")]
    InvalidUtf8,
    #[error("The request is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Expected a {expected} request but found {actual:?}")]
    Verb {
        expected: &'static str,
        actual: String,
    },
}
