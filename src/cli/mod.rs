use crate::error::{Error, Result};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file (toml, yaml, json, ...)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Terminal log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List available MIDI devices
    Devices,

    /// Decode and print everything received on an input port
    Monitor {
        /// Input device to bind to
        #[arg(long)]
        device: Option<String>,

        /// Print the codec state after every event
        #[arg(long)]
        show_state: bool,
    },

    /// Play one note on an output port
    SendTestNote {
        /// Output device to send to
        #[arg(long)]
        device: Option<String>,

        #[arg(long)]
        channel: Option<u8>,

        #[arg(long, default_value_t = 60)]
        note: u8,

        #[arg(long, default_value_t = 100)]
        velocity: u8,
    },

    /// Decode a raw MIDI byte stream offline
    #[command(group(ArgGroup::new("input").required(true).args(["hex", "file"])))]
    Decode {
        /// Bytes as hex, e.g. "90 3C 64"
        #[arg(long)]
        hex: Option<String>,

        /// File holding raw MIDI bytes
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub fn handle_device_list() -> Vec<String> {
    // Re-export from the crate root
    crate::handle_device_list()
}

pub fn validate_device(device_name: &str, devices: &[String]) -> std::result::Result<(), String> {
    if !devices.iter().any(|d| d.contains(device_name)) {
        let mut error_msg = format!(
            "Error: Device '{}' not found in available devices:\n",
            device_name
        );
        for device in devices {
            error_msg.push_str(&format!("  - {}\n", device));
        }
        return Err(error_msg);
    }
    Ok(())
}

/// Parses whitespace or comma separated hex bytes. A `0x` prefix is allowed.
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            u8::from_str_radix(digits, 16).map_err(|_| Error::InvalidHex(token.to_string()))
        })
        .collect()
}
