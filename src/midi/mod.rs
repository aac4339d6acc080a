//! MIDI 1.0 wire protocol codec
//!
//! This module provides the transport-agnostic core:
//! - Wire format constants and 7/14-bit helpers
//! - A running-status encoder for channel voice and realtime messages
//! - A byte-at-a-time decoder that dispatches completed messages to callbacks
//!
//! The main components are:
//! - [`Encoder`] writes the minimal byte sequence for each message
//! - [`Decoder`] rebuilds messages from a polled byte stream
//! - [`MidiHandler`] receives decoded events
//! - [`MidiPort`] pairs both directions on one transport, with a diagnostic snapshot
//!
mod decoder;
mod encoder;
mod handler;
mod port;
pub mod protocol;

pub use decoder::{Decoder, ParserPhase, RxState};
pub use encoder::{ChannelMessage, Encoder};
pub use handler::{EventPrinter, MidiEvent, MidiHandler};
pub use port::{MidiPort, Snapshot};
pub use protocol::{Command, Controller, Realtime};
