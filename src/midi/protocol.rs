//! MIDI 1.0 byte-level wire format: status values, masks and the helpers for
//! 7-bit and 14-bit data fields.

/// Bit 7 set marks a status byte
pub const STATUS_BIT: u8 = 0x80;
/// Low seven bits of a data byte
pub const DATA_MASK: u8 = 0x7F;
/// Upper nibble of a channel status byte
pub const COMMAND_MASK: u8 = 0xF0;
/// Lower nibble of a channel status byte
pub const CHANNEL_MASK: u8 = 0x0F;

// Channel voice commands, OR'd with the channel number
pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const POLYPHONIC_AFTERTOUCH: u8 = 0xA0;
pub const CONTROL_CHANGE: u8 = 0xB0;
pub const PROGRAM_CHANGE: u8 = 0xC0;
pub const CHANNEL_AFTERTOUCH: u8 = 0xD0;
pub const PITCH_WHEEL: u8 = 0xE0;

// System common
pub const SYSTEM_EXCLUSIVE_START: u8 = 0xF0;
pub const MTC_QUARTER_FRAME: u8 = 0xF1;
pub const SONG_POSITION: u8 = 0xF2;
pub const SONG_SELECT: u8 = 0xF3;
pub const TUNE_REQUEST: u8 = 0xF6;
pub const SYSTEM_EXCLUSIVE_END: u8 = 0xF7;

// System realtime
pub const TIMING_CLOCK: u8 = 0xF8;
pub const START: u8 = 0xFA;
pub const CONTINUE: u8 = 0xFB;
pub const STOP: u8 = 0xFC;
pub const ACTIVE_SENSING: u8 = 0xFE;
pub const RESET: u8 = 0xFF;

/// Centre of the unsigned 14-bit pitch wheel range
pub const PITCH_CENTER: u16 = 0x2000;

#[inline]
pub fn is_status(byte: u8) -> bool {
    byte & STATUS_BIT != 0
}

/// Realtime bytes may appear anywhere in the stream, even between data bytes.
#[inline]
pub fn is_realtime(byte: u8) -> bool {
    byte >= TIMING_CLOCK
}

/// Truncate a value to a 7-bit data byte.
#[inline]
pub fn data7(value: u8) -> u8 {
    value & DATA_MASK
}

/// Split a 14-bit value into its `(lsb, msb)` data bytes. Bits above 13 are dropped.
pub fn split_u14(value: u16) -> (u8, u8) {
    ((value & 0x7F) as u8, ((value >> 7) & 0x7F) as u8)
}

/// Inverse of [`split_u14`].
pub fn join_u14(lsb: u8, msb: u8) -> u16 {
    u16::from(data7(lsb)) | (u16::from(data7(msb)) << 7)
}

/// Re-centre a signed pitch bend (-8192..=8191) onto the unsigned wire range.
pub fn center_pitch(value: i16) -> u16 {
    (i32::from(value) + i32::from(PITCH_CENTER)) as u16 & 0x3FFF
}

/// Number of data bytes that complete a message with this status.
///
/// Zero means the status carries no fixed-size payload (SysEx, tune request,
/// undefined system common messages and realtime bytes).
pub fn data_len_for_status(status: u8) -> usize {
    match Command::from_status(status) {
        Some(command) => command.data_len(),
        None => match status {
            MTC_QUARTER_FRAME | SONG_SELECT => 1,
            SONG_POSITION => 2,
            _ => 0,
        },
    }
}

/// Channel voice command families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NoteOff,
    NoteOn,
    PolyphonicAftertouch,
    ControlChange,
    ProgramChange,
    ChannelAftertouch,
    PitchWheel,
}

impl Command {
    /// The family of a channel status byte, ignoring the channel nibble.
    /// System and data bytes have no family.
    pub fn from_status(status: u8) -> Option<Command> {
        use Command::*;
        Some(match status & COMMAND_MASK {
            NOTE_OFF => NoteOff,
            NOTE_ON => NoteOn,
            POLYPHONIC_AFTERTOUCH => PolyphonicAftertouch,
            CONTROL_CHANGE => ControlChange,
            PROGRAM_CHANGE => ProgramChange,
            CHANNEL_AFTERTOUCH => ChannelAftertouch,
            PITCH_WHEEL => PitchWheel,
            _ => return None,
        })
    }

    pub fn command_byte(self) -> u8 {
        use Command::*;
        match self {
            NoteOff => NOTE_OFF,
            NoteOn => NOTE_ON,
            PolyphonicAftertouch => POLYPHONIC_AFTERTOUCH,
            ControlChange => CONTROL_CHANGE,
            ProgramChange => PROGRAM_CHANGE,
            ChannelAftertouch => CHANNEL_AFTERTOUCH,
            PitchWheel => PITCH_WHEEL,
        }
    }

    /// Full status byte for this family on `channel` (masked to 0..=15).
    pub fn status(self, channel: u8) -> u8 {
        self.command_byte() | (channel & CHANNEL_MASK)
    }

    pub fn data_len(self) -> usize {
        match self {
            Command::ProgramChange | Command::ChannelAftertouch => 1,
            _ => 2,
        }
    }
}

/// Single-byte system realtime messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realtime {
    /// Sent 24 times per quarter note
    TimingClock,
    Start,
    Continue,
    Stop,
    /// Once sent, the receiver expects traffic at least every 300ms
    ActiveSensing,
    Reset,
    Undefined(u8),
}

impl Realtime {
    pub fn from_status(status: u8) -> Realtime {
        use Realtime::*;
        match status {
            TIMING_CLOCK => TimingClock,
            START => Start,
            CONTINUE => Continue,
            STOP => Stop,
            ACTIVE_SENSING => ActiveSensing,
            RESET => Reset,
            other => Undefined(other),
        }
    }

    pub fn status(self) -> u8 {
        use Realtime::*;
        match self {
            TimingClock => TIMING_CLOCK,
            Start => START,
            Continue => CONTINUE,
            Stop => STOP,
            ActiveSensing => ACTIVE_SENSING,
            Reset => RESET,
            Undefined(byte) => byte,
        }
    }
}

/// Control change numbers.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    MsbBank = 0x00,
    MsbModWheel = 0x01,
    MsbBreath = 0x02,
    MsbFoot = 0x04,
    MsbPortamentoTime = 0x05,
    MsbDataEntry = 0x06,
    MsbMainVolume = 0x07,
    MsbBalance = 0x08,
    MsbPan = 0x0A,
    MsbExpression = 0x0B,
    MsbEffect1 = 0x0C,
    MsbEffect2 = 0x0D,
    MsbGeneralPurpose1 = 0x10,
    MsbGeneralPurpose2 = 0x11,
    MsbGeneralPurpose3 = 0x12,
    MsbGeneralPurpose4 = 0x13,
    LsbBank = 0x20,
    LsbModWheel = 0x21,
    LsbBreath = 0x22,
    LsbFoot = 0x24,
    LsbPortamentoTime = 0x25,
    LsbDataEntry = 0x26,
    LsbMainVolume = 0x27,
    LsbBalance = 0x28,
    LsbPan = 0x2A,
    LsbExpression = 0x2B,
    LsbEffect1 = 0x2C,
    LsbEffect2 = 0x2D,
    LsbGeneralPurpose1 = 0x30,
    LsbGeneralPurpose2 = 0x31,
    LsbGeneralPurpose3 = 0x32,
    LsbGeneralPurpose4 = 0x33,
    Sustain = 0x40,
    Portamento = 0x41,
    Sostenuto = 0x42,
    SoftPedal = 0x43,
    LegatoFootswitch = 0x44,
    Hold2 = 0x45,
    SoundVariation = 0x46,
    Timbre = 0x47,
    ReleaseTime = 0x48,
    AttackTime = 0x49,
    Brightness = 0x4A,
    SoundController6 = 0x4B,
    SoundController7 = 0x4C,
    SoundController8 = 0x4D,
    SoundController9 = 0x4E,
    SoundController10 = 0x4F,
    GeneralPurpose5 = 0x50,
    GeneralPurpose6 = 0x51,
    GeneralPurpose7 = 0x52,
    GeneralPurpose8 = 0x53,
    PortamentoControl = 0x54,
    ReverbDepth = 0x5B,
    TremoloDepth = 0x5C,
    ChorusDepth = 0x5D,
    DetuneDepth = 0x5E,
    PhaserDepth = 0x5F,
    DataIncrement = 0x60,
    DataDecrement = 0x61,
    NrpnLsb = 0x62,
    NrpnMsb = 0x63,
    RpnLsb = 0x64,
    RpnMsb = 0x65,
    AllSoundsOff = 0x78,
    ResetControllers = 0x79,
    LocalControlSwitch = 0x7A,
    AllNotesOff = 0x7B,
    OmniOff = 0x7C,
    OmniOn = 0x7D,
    Mono1 = 0x7E,
    Mono2 = 0x7F,
}

impl From<Controller> for u8 {
    fn from(controller: Controller) -> u8 {
        controller as u8
    }
}
