//! Error type shared by the transports, configuration and CLI plumbing.
//!
//! The codec itself never fails: the encoder is fire-and-forget and the
//! decoder silently resynchronizes. Everything that can go wrong lives at the
//! edges, where it is propagated with `?`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No port name contains the requested device name
    #[error("MIDI device '{0}' not found")]
    DeviceNotFound(String),

    /// Opening or connecting a port failed
    #[error("MIDI connection error: {0}")]
    Connection(String),

    /// Writing bytes to the transport failed
    #[error("MIDI send error: {0}")]
    Send(String),

    /// The transport has no output connection to write to
    #[error("MIDI output not connected")]
    NotConnected,

    /// A token in a hex dump could not be read as a byte
    #[error("invalid hex byte '{0}'")]
    InvalidHex(String),

    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("prompt: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
