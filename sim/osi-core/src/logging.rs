//! Installs the subscriber that prints layer traces.
//!
//! Every layer emits one `info` event per encode and per decode. The stack
//! adds `debug` events with payload sizes and a `trace` event with a hex dump
//! of the frame on the wire.

use tracing::{subscriber::SetGlobalDefaultError, Level};
use tracing_subscriber::FmtSubscriber;

/// Sends `info` and more severe events to stdout, one line each. Only call
/// this once, before running a stack.
pub fn init_tracing() -> Result<(), SetGlobalDefaultError> {
    init_tracing_with_level(Level::INFO)
}

/// Like [`init_tracing`], but with a custom maximum level.
pub fn init_tracing_with_level(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stdout)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
