use crate::error::{Error, Result};
use crate::transport::{ByteSink, ByteSource};
use crossbeam::channel::{unbounded, Receiver, TryRecvError};
use log::{error, info, warn};
use midir::{Ignore, MidiIO, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

/// Transport over OS MIDI ports.
///
/// midir delivers whole messages from its callback thread; they are split
/// into single bytes and queued on a channel so the decoder can drain them
/// one poll at a time.
pub struct MidirTransport {
    #[allow(dead_code)]
    input: Option<MidiInputConnection<()>>,
    output: Option<MidiOutputConnection>,
    rx: Option<Receiver<u8>>,
    disconnected: bool,
}

impl MidirTransport {
    /// Connects to the first input and output ports whose names contain the
    /// given device names. Either side may be omitted.
    pub fn connect(input_device: Option<&str>, output_device: Option<&str>) -> Result<Self> {
        let (input, rx) = match input_device {
            Some(name) => {
                let (connection, rx) = Self::connect_input(name)?;
                (Some(connection), Some(rx))
            }
            None => (None, None),
        };

        let output = match output_device {
            Some(name) => Some(Self::connect_output(name)?),
            None => None,
        };

        Ok(MidirTransport {
            input,
            output,
            rx,
            disconnected: false,
        })
    }

    fn connect_input(name: &str) -> Result<(MidiInputConnection<()>, Receiver<u8>)> {
        let mut midi_in =
            MidiInput::new("serialmidi-in").map_err(|e| Error::Connection(e.to_string()))?;
        // Realtime and SysEx bytes are part of the stream the decoder must see
        midi_in.ignore(Ignore::None);

        let port = find_port(&midi_in, name)?;
        let port_name = midi_in.port_name(&port).unwrap_or_default();
        info!("Connecting to MIDI input port: {}", port_name);

        let (tx, rx) = unbounded();
        let connection = midi_in
            .connect(
                &port,
                "serialmidi-input",
                move |_stamp, message, _| {
                    for &byte in message {
                        let _ = tx.send(byte);
                    }
                },
                (),
            )
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok((connection, rx))
    }

    fn connect_output(name: &str) -> Result<MidiOutputConnection> {
        let midi_out =
            MidiOutput::new("serialmidi-out").map_err(|e| Error::Connection(e.to_string()))?;

        let port = find_port(&midi_out, name)?;
        let port_name = midi_out.port_name(&port).unwrap_or_default();
        info!("Connecting to MIDI output port: {}", port_name);

        midi_out
            .connect(&port, "serialmidi-output")
            .map_err(|e| Error::Connection(e.to_string()))
    }

    pub fn has_input(&self) -> bool {
        self.rx.is_some()
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Names of all input and output ports, tagged with their direction.
    pub fn list_devices() -> Vec<String> {
        let mut devices = Vec::new();

        if let Ok(midi_in) = MidiInput::new("serialmidi-list-in") {
            for port in midi_in.ports() {
                if let Ok(name) = midi_in.port_name(&port) {
                    devices.push(format!("{} [Input]", name));
                }
            }
        }

        if let Ok(midi_out) = MidiOutput::new("serialmidi-list-out") {
            for port in midi_out.ports() {
                if let Ok(name) = midi_out.port_name(&port) {
                    devices.push(format!("{} [Output]", name));
                }
            }
        }

        devices
    }

    pub fn input_port_names() -> Result<Vec<String>> {
        let midi_in =
            MidiInput::new("serialmidi-list-in").map_err(|e| Error::Connection(e.to_string()))?;
        Ok(port_names(&midi_in))
    }

    pub fn output_port_names() -> Result<Vec<String>> {
        let midi_out =
            MidiOutput::new("serialmidi-list-out").map_err(|e| Error::Connection(e.to_string()))?;
        Ok(port_names(&midi_out))
    }
}

fn port_names<T: MidiIO>(io: &T) -> Vec<String> {
    io.ports()
        .iter()
        .filter_map(|p| io.port_name(p).ok())
        .collect()
}

fn find_port<T: MidiIO>(io: &T, name: &str) -> Result<T::Port> {
    let port = io
        .ports()
        .into_iter()
        .find(|p| io.port_name(p).unwrap_or_default().contains(name));

    port.ok_or_else(|| {
        error!("MIDI device '{}' not found", name);
        info!("Available devices: {:?}", port_names(io));
        Error::DeviceNotFound(name.to_string())
    })
}

impl ByteSource for MidirTransport {
    fn read_byte(&mut self) -> Option<u8> {
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(byte) => Some(byte),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    warn!("MIDI input callback disconnected");
                    self.disconnected = true;
                }
                None
            }
        }
    }
}

impl ByteSink for MidirTransport {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let conn = self.output.as_mut().ok_or(Error::NotConnected)?;
        conn.send(bytes).map_err(|e| Error::Send(e.to_string()))
    }
}
