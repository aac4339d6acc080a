//! Serial MIDI 1.0 codec.
//!
//! [`midi::Encoder`] turns messages into the shortest byte sequence using
//! running status; [`midi::Decoder`] rebuilds messages from a byte stream one
//! polled byte at a time. Both sit on the small [`transport`] traits, so the
//! same codec drives OS MIDI ports, files or in-memory test doubles.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod midi;
pub mod transport;

pub use cli::Args;
pub use error::{Error, Result};

#[cfg(not(feature = "test-mock"))]
pub fn handle_device_list() -> Vec<String> {
    transport::MidirTransport::list_devices()
}

#[cfg(feature = "test-mock")]
pub fn handle_device_list() -> Vec<String> {
    // Mock implementation for tests - simple format as expected by tests
    vec!["Mock Device 1".to_string(), "Mock Device 2".to_string()]
}
