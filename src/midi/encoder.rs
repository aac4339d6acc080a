use crate::midi::protocol::{
    center_pitch, data7, is_realtime, split_u14, Command, Controller, Realtime, CHANNEL_MASK,
};
use crate::transport::ByteSink;
use log::{trace, warn};

/// A channel voice message, without its channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMessage {
    NoteOff { key: u8, velocity: u8 },
    NoteOn { key: u8, velocity: u8 },
    PolyphonicAftertouch { key: u8, pressure: u8 },
    ControlChange { controller: u8, value: u8 },
    ProgramChange { program: u8 },
    ChannelAftertouch { pressure: u8 },
    /// Unsigned 14-bit position, 8192 is centre
    PitchWheel { value: u16 },
}

impl ChannelMessage {
    pub fn command(&self) -> Command {
        match self {
            ChannelMessage::NoteOff { .. } => Command::NoteOff,
            ChannelMessage::NoteOn { .. } => Command::NoteOn,
            ChannelMessage::PolyphonicAftertouch { .. } => Command::PolyphonicAftertouch,
            ChannelMessage::ControlChange { .. } => Command::ControlChange,
            ChannelMessage::ProgramChange { .. } => Command::ProgramChange,
            ChannelMessage::ChannelAftertouch { .. } => Command::ChannelAftertouch,
            ChannelMessage::PitchWheel { .. } => Command::PitchWheel,
        }
    }

    /// Data bytes as they go on the wire, each truncated to 7 bits.
    /// Returns the buffer and the number of bytes used.
    fn data_bytes(&self) -> ([u8; 2], usize) {
        match *self {
            ChannelMessage::NoteOff { key, velocity } | ChannelMessage::NoteOn { key, velocity } => {
                ([data7(key), data7(velocity)], 2)
            }
            ChannelMessage::PolyphonicAftertouch { key, pressure } => {
                ([data7(key), data7(pressure)], 2)
            }
            ChannelMessage::ControlChange { controller, value } => {
                ([data7(controller), data7(value)], 2)
            }
            ChannelMessage::ProgramChange { program } => ([data7(program), 0], 1),
            ChannelMessage::ChannelAftertouch { pressure } => ([data7(pressure), 0], 1),
            ChannelMessage::PitchWheel { value } => {
                let (lsb, msb) = split_u14(value);
                ([lsb, msb], 2)
            }
        }
    }
}

/// Transmit side of the codec.
///
/// Remembers the last status byte it wrote and leaves it out of the next
/// channel message when it would repeat (running status). Realtime bytes
/// bypass running status entirely.
///
/// Sends never fail from the caller's point of view. A failed write is logged
/// and the running status is forgotten, so the next message carries its status
/// byte again.
pub struct Encoder<W> {
    out: W,
    running_status: Option<u8>,
}

impl<W: ByteSink> Encoder<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            running_status: None,
        }
    }

    /// Last status byte written, if any
    pub fn running_status(&self) -> Option<u8> {
        self.running_status
    }

    /// Forces the next channel message to carry its status byte.
    pub fn clear_running_status(&mut self) {
        self.running_status = None;
    }

    pub fn transport(&self) -> &W {
        &self.out
    }

    pub fn transport_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Sends a channel message on `channel` (0..=15, higher bits are dropped).
    pub fn send(&mut self, channel: u8, message: ChannelMessage) {
        let status = message.command().status(channel & CHANNEL_MASK);
        let (data, len) = message.data_bytes();

        let mut buf = [0u8; 3];
        let written = if self.running_status == Some(status) {
            buf[..len].copy_from_slice(&data[..len]);
            len
        } else {
            buf[0] = status;
            buf[1..=len].copy_from_slice(&data[..len]);
            len + 1
        };

        trace!("TX {:02X?}", &buf[..written]);
        match self.out.write_bytes(&buf[..written]) {
            Ok(()) => self.running_status = Some(status),
            Err(e) => {
                warn!("Failed to send MIDI message {:?}: {}", message, e);
                self.running_status = None;
            }
        }
    }

    pub fn note_on(&mut self, channel: u8, key: u8, velocity: u8) {
        self.send(channel, ChannelMessage::NoteOn { key, velocity });
    }

    pub fn note_off(&mut self, channel: u8, key: u8, velocity: u8) {
        self.send(channel, ChannelMessage::NoteOff { key, velocity });
    }

    pub fn control_change(&mut self, channel: u8, controller: u8, value: u8) {
        self.send(channel, ChannelMessage::ControlChange { controller, value });
    }

    pub fn polyphonic_aftertouch(&mut self, channel: u8, key: u8, pressure: u8) {
        self.send(channel, ChannelMessage::PolyphonicAftertouch { key, pressure });
    }

    pub fn program_change(&mut self, channel: u8, program: u8) {
        self.send(channel, ChannelMessage::ProgramChange { program });
    }

    pub fn channel_aftertouch(&mut self, channel: u8, pressure: u8) {
        self.send(channel, ChannelMessage::ChannelAftertouch { pressure });
    }

    /// Unsigned pitch wheel position:
    ///
    /// ```text
    ///  LOW   MIDDLE   HIGH
    ///   0 --> 8192 --> 16383
    /// ```
    pub fn pitch_wheel(&mut self, channel: u8, value: u16) {
        self.send(channel, ChannelMessage::PitchWheel { value });
    }

    /// Signed pitch wheel position, -8192..=8191 with 0 at centre.
    pub fn pitch_bend(&mut self, channel: u8, value: i16) {
        self.pitch_wheel(channel, center_pitch(value));
    }

    /// Full 14-bit modulation wheel: LSB controller first, then MSB.
    pub fn mod_wheel(&mut self, channel: u8, value: u16) {
        let (lsb, msb) = split_u14(value);
        self.control_change(channel, Controller::LsbModWheel.into(), lsb);
        self.control_change(channel, Controller::MsbModWheel.into(), msb);
    }

    /// Coarse modulation wheel, MSB controller only.
    pub fn mod_wheel_msb(&mut self, channel: u8, value: u8) {
        self.control_change(channel, Controller::MsbModWheel.into(), value);
    }

    /// Writes a single realtime byte. Running status is left untouched.
    ///
    /// Bytes below 0xF8 would change the receiver's running status behind
    /// our back, so they are refused.
    pub fn send_realtime(&mut self, message: Realtime) {
        let status = message.status();
        if !is_realtime(status) {
            warn!("Refusing to send {:02X} as a realtime message", status);
            return;
        }
        trace!("TX realtime {:02X}", status);
        if let Err(e) = self.out.write_bytes(&[status]) {
            warn!("Failed to send {:?}: {}", message, e);
        }
    }

    pub fn timing_clock(&mut self) {
        self.send_realtime(Realtime::TimingClock);
    }

    pub fn start(&mut self) {
        self.send_realtime(Realtime::Start);
    }

    pub fn continue_playback(&mut self) {
        self.send_realtime(Realtime::Continue);
    }

    pub fn stop(&mut self) {
        self.send_realtime(Realtime::Stop);
    }

    pub fn active_sensing(&mut self) {
        self.send_realtime(Realtime::ActiveSensing);
    }

    pub fn reset(&mut self) {
        self.send_realtime(Realtime::Reset);
    }
}
