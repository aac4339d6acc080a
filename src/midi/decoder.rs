use crate::midi::handler::MidiHandler;
use crate::midi::protocol::{
    data_len_for_status, is_realtime, is_status, Command, COMMAND_MASK, SONG_POSITION,
    SONG_SELECT, SYSTEM_EXCLUSIVE_START, TUNE_REQUEST,
};
use crate::transport::ByteSource;
use log::{debug, trace};

/// Where the receiver is within a message.
///
/// The running status is carried by the state itself, so a data byte arriving
/// in [`RxState::Running`] starts another message of the same family without
/// a new status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxState {
    /// No running status: data bytes are dropped until a status byte arrives
    Idle,
    /// Waiting for the first data byte of a message with this status
    Running { status: u8 },
    /// One data byte of a two byte message received. `status` is `None` while
    /// skipping the tail of a song position pointer.
    Pending { status: Option<u8>, first: u8 },
}

/// Coarse phase tag, kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParserPhase {
    Reset = 0,
    HandleSysex = 2,
    /// Status stored, nothing further expected
    Dispatch = 3,
    /// Awaiting the only data byte of a one byte message
    RxDataByte = 4,
    /// Awaiting the first data byte of a two byte message
    Rx1DataByte = 5,
    /// Awaiting the second data byte
    Rx2DataByte = 6,
}

impl RxState {
    pub fn phase(&self) -> ParserPhase {
        match *self {
            RxState::Idle => ParserPhase::Reset,
            RxState::Running {
                status: SYSTEM_EXCLUSIVE_START,
            } => ParserPhase::HandleSysex,
            RxState::Running { status } => match data_len_for_status(status) {
                1 => ParserPhase::RxDataByte,
                2 => ParserPhase::Rx1DataByte,
                _ => ParserPhase::Dispatch,
            },
            RxState::Pending { .. } => ParserPhase::Rx2DataByte,
        }
    }
}

/// Receive side of the codec: a byte-at-a-time MIDI parser.
///
/// Each completed note, control change or pitch wheel message invokes the
/// matching [`MidiHandler`] callback exactly once. Realtime bytes are
/// dispatched immediately, wherever they appear, without touching the state
/// of the message in progress.
///
/// Program change, channel aftertouch and polyphonic aftertouch are counted
/// correctly but not dispatched. System common messages are skipped.
pub struct Decoder<H> {
    handler: H,
    state: RxState,
}

impl<H: MidiHandler> Decoder<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            state: RxState::Idle,
        }
    }

    /// Polls `source` for one byte and processes it.
    ///
    /// Returns `false` without changing anything if no byte was available.
    pub fn receive<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> bool {
        match source.read_byte() {
            Some(byte) => {
                self.feed(byte);
                true
            }
            None => false,
        }
    }

    /// Processes every byte of `bytes` in order.
    pub fn feed_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed(byte);
        }
    }

    pub fn feed(&mut self, byte: u8) {
        if is_status(byte) {
            if is_realtime(byte) {
                self.handler.on_realtime(byte);
                return;
            }
            if byte == TUNE_REQUEST {
                trace!("Tune request received");
            }
            self.state = RxState::Running { status: byte };
            return;
        }

        self.state = match self.state {
            RxState::Idle => {
                trace!("Discarding data byte {:02X} without running status", byte);
                RxState::Idle
            }
            RxState::Running { status } => self.first_data_byte(status, byte),
            RxState::Pending { status, first } => self.second_data_byte(status, first, byte),
        };
    }

    fn first_data_byte(&mut self, status: u8, byte: u8) -> RxState {
        if let Some(command) = Command::from_status(status) {
            return if command.data_len() == 2 {
                RxState::Pending {
                    status: Some(status),
                    first: byte,
                }
            } else {
                // Program change and channel aftertouch complete here but are
                // not dispatched; running status stays for the next one.
                trace!("Ignoring {:?} {:02X}", command, byte);
                RxState::Running { status }
            };
        }

        match status {
            SONG_POSITION => RxState::Pending {
                status: None,
                first: byte,
            },
            SONG_SELECT => {
                trace!("Ignoring song select {:02X}", byte);
                RxState::Idle
            }
            _ => {
                debug!("Unsupported status {:02X}, dropping running status", status);
                RxState::Idle
            }
        }
    }

    fn second_data_byte(&mut self, status: Option<u8>, first: u8, second: u8) -> RxState {
        let Some(status) = status else {
            return RxState::Idle;
        };

        match Command::from_status(status) {
            // Velocity zero note on is a note off
            Some(Command::NoteOn) if second == 0 => self.handler.on_note_off(first, 0),
            Some(Command::NoteOn) => self.handler.on_note_on(first, second),
            Some(Command::NoteOff) => self.handler.on_note_off(first, second),
            Some(Command::PitchWheel) => self.handler.on_pitch_wheel(first, second),
            Some(Command::ControlChange) => self.handler.on_control_change(first, second),
            Some(command @ Command::PolyphonicAftertouch) => {
                trace!("Ignoring {:?} {:02X} {:02X}", command, first, second);
            }
            _ => {
                debug!("Unexpected status {:02X} with two data bytes", status);
                return RxState::Idle;
            }
        }
        // Omni: a completed two byte message leaves only the family behind
        RxState::Running {
            status: status & COMMAND_MASK,
        }
    }

    /// Drops running status and any partial message.
    pub fn reset(&mut self) {
        self.state = RxState::Idle;
    }

    pub fn state(&self) -> RxState {
        self.state
    }

    pub fn phase(&self) -> ParserPhase {
        self.state.phase()
    }

    /// Current receive running status, if any
    pub fn running_status(&self) -> Option<u8> {
        match self.state {
            RxState::Idle => None,
            RxState::Running { status } => Some(status),
            RxState::Pending { status, .. } => status,
        }
    }

    /// Whether one data byte of a two byte message is waiting for its partner
    pub fn awaiting_second_byte(&self) -> bool {
        matches!(self.state, RxState::Pending { .. })
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}
