//! Consumers of decoded events.

use crate::midi::protocol::{join_u14, Realtime, PITCH_CENTER};
use crossbeam::channel::Sender;
use log::{debug, info};

/// Callbacks invoked by the [`Decoder`](crate::midi::Decoder), one per
/// completed message. The channel is not reported: the decoder listens in
/// omni mode.
pub trait MidiHandler {
    fn on_note_on(&mut self, note: u8, velocity: u8);
    fn on_note_off(&mut self, note: u8, velocity: u8);
    fn on_control_change(&mut self, controller: u8, value: u8);
    /// Data bytes in wire order, least significant first
    fn on_pitch_wheel(&mut self, lsb: u8, msb: u8);
    /// Raw realtime status byte (0xF8..=0xFF)
    fn on_realtime(&mut self, status: u8);
}

/// A decoded event as a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    ControlChange { controller: u8, value: u8 },
    PitchWheel { lsb: u8, msb: u8 },
    Realtime(u8),
}

impl MidiEvent {
    /// Pitch wheel position relative to centre (-8192..=8191)
    pub fn pitch_bend(&self) -> Option<i16> {
        match *self {
            MidiEvent::PitchWheel { lsb, msb } => {
                Some(join_u14(lsb, msb) as i16 - PITCH_CENTER as i16)
            }
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            MidiEvent::NoteOn { note, velocity } => {
                format!("Note On    note={:3} velocity={:3}", note, velocity)
            }
            MidiEvent::NoteOff { note, velocity } => {
                format!("Note Off   note={:3} velocity={:3}", note, velocity)
            }
            MidiEvent::ControlChange { controller, value } => {
                format!("Control    controller={:3} value={:3}", controller, value)
            }
            MidiEvent::PitchWheel { lsb, msb } => format!(
                "Pitch      lsb={:3} msb={:3} bend={}",
                lsb,
                msb,
                self.pitch_bend().unwrap_or_default()
            ),
            MidiEvent::Realtime(status) => {
                format!("Realtime   {:?}", Realtime::from_status(status))
            }
        }
    }
}

/// Collects every event, in order. The usual handler for tests.
impl MidiHandler for Vec<MidiEvent> {
    fn on_note_on(&mut self, note: u8, velocity: u8) {
        self.push(MidiEvent::NoteOn { note, velocity });
    }

    fn on_note_off(&mut self, note: u8, velocity: u8) {
        self.push(MidiEvent::NoteOff { note, velocity });
    }

    fn on_control_change(&mut self, controller: u8, value: u8) {
        self.push(MidiEvent::ControlChange { controller, value });
    }

    fn on_pitch_wheel(&mut self, lsb: u8, msb: u8) {
        self.push(MidiEvent::PitchWheel { lsb, msb });
    }

    fn on_realtime(&mut self, status: u8) {
        self.push(MidiEvent::Realtime(status));
    }
}

/// Hands events to another thread. Events are dropped once the receiver is gone.
impl MidiHandler for Sender<MidiEvent> {
    fn on_note_on(&mut self, note: u8, velocity: u8) {
        forward(self, MidiEvent::NoteOn { note, velocity });
    }

    fn on_note_off(&mut self, note: u8, velocity: u8) {
        forward(self, MidiEvent::NoteOff { note, velocity });
    }

    fn on_control_change(&mut self, controller: u8, value: u8) {
        forward(self, MidiEvent::ControlChange { controller, value });
    }

    fn on_pitch_wheel(&mut self, lsb: u8, msb: u8) {
        forward(self, MidiEvent::PitchWheel { lsb, msb });
    }

    fn on_realtime(&mut self, status: u8) {
        forward(self, MidiEvent::Realtime(status));
    }
}

fn forward(tx: &Sender<MidiEvent>, event: MidiEvent) {
    if tx.send(event).is_err() {
        debug!("Dropping {:?}: event receiver disconnected", event);
    }
}

/// Prints one timestamped line per event and logs it.
#[derive(Debug, Default)]
pub struct EventPrinter {
    count: u64,
    timestamps: bool,
    last_line: Option<String>,
}

impl EventPrinter {
    pub fn new() -> Self {
        Self {
            timestamps: true,
            ..Self::default()
        }
    }

    /// Plain lines, for reproducible output such as offline decoding
    pub fn without_timestamps() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn last_line(&self) -> Option<&str> {
        self.last_line.as_deref()
    }

    fn print(&mut self, event: MidiEvent) {
        self.count += 1;
        let line = if self.timestamps {
            format!(
                "{} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                event.describe()
            )
        } else {
            event.describe()
        };
        info!("{}", event.describe());
        println!("{}", line);
        self.last_line = Some(line);
    }
}

impl MidiHandler for EventPrinter {
    fn on_note_on(&mut self, note: u8, velocity: u8) {
        self.print(MidiEvent::NoteOn { note, velocity });
    }

    fn on_note_off(&mut self, note: u8, velocity: u8) {
        self.print(MidiEvent::NoteOff { note, velocity });
    }

    fn on_control_change(&mut self, controller: u8, value: u8) {
        self.print(MidiEvent::ControlChange { controller, value });
    }

    fn on_pitch_wheel(&mut self, lsb: u8, msb: u8) {
        self.print(MidiEvent::PitchWheel { lsb, msb });
    }

    fn on_realtime(&mut self, status: u8) {
        self.print(MidiEvent::Realtime(status));
    }
}
