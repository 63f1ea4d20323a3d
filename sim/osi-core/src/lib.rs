//! A simulator of the seven layer OSI protocol stack.
//!
//! A message is encapsulated layer by layer on its way down the stack and
//! decapsulated in reverse on its way back up, all inside one process. No
//! bytes ever reach a real network; every header field is a fixed constant
//! chosen to look like the real thing.
//!
//! # Organization
//! - [`Payload`] holds the encoded bytes passed between layers
//! - [`Layer`] is the contract each stage of the stack implements
//! - [`layers`] contains the seven concrete layers
//! - [`Stack`] drives a message through a chain of layers and back
//!
//! # Example
//!
//! ```
//! use osi_core::Stack;
//!
//! let stack = Stack::osi();
//! let received = stack.run("hello").unwrap();
//! assert_eq!(received, "hello");
//! ```

pub mod logging;

pub mod payload;
pub use payload::Payload;

pub mod layer;
pub use layer::{Direction, Layer, LayerError};

pub mod layers;

pub mod stack;
pub use stack::{Stack, StackError};
