use crate::midi::decoder::Decoder;
use crate::midi::encoder::Encoder;
use crate::midi::handler::MidiHandler;
use crate::transport::{ByteSink, ByteSource};
use std::fmt;

/// One bidirectional MIDI link: an [`Encoder`] writing to the transport and a
/// [`Decoder`] reading from it. Each keeps its own running status.
pub struct MidiPort<T, H> {
    encoder: Encoder<T>,
    decoder: Decoder<H>,
}

impl<T, H> MidiPort<T, H>
where
    T: ByteSource + ByteSink,
    H: MidiHandler,
{
    pub fn new(transport: T, handler: H) -> Self {
        Self {
            encoder: Encoder::new(transport),
            decoder: Decoder::new(handler),
        }
    }

    /// Processes at most one received byte. Returns `false` if none was ready.
    pub fn receive(&mut self) -> bool {
        self.decoder.receive(self.encoder.transport_mut())
    }

    /// Processes received bytes until the transport has none left.
    /// Returns how many were consumed.
    pub fn receive_all(&mut self) -> usize {
        let mut count = 0;
        while self.receive() {
            count += 1;
        }
        count
    }

    pub fn encoder(&self) -> &Encoder<T> {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut Encoder<T> {
        &mut self.encoder
    }

    pub fn decoder(&self) -> &Decoder<H> {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut Decoder<H> {
        &mut self.decoder
    }

    pub fn transport(&self) -> &T {
        self.encoder.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.encoder.transport_mut()
    }

    pub fn handler(&self) -> &H {
        self.decoder.handler()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tx_running_status: self.encoder.running_status().unwrap_or(0),
            rx_running_status: self.decoder.running_status().unwrap_or(0),
            pending_second_byte: u8::from(self.decoder.awaiting_second_byte()),
            state: self.decoder.phase() as u8,
        }
    }

    /// Diagnostic one-liner, see [`Snapshot`]
    pub fn text(&self) -> String {
        self.snapshot().to_string()
    }
}

/// Internal codec state as four raw bytes.
///
/// Renders as `run_tx:XX,run_rx:XX,3rd_byte:XX,state:XX`, each field two
/// characters wide, upper-case hex. An absent running status shows as 0. The
/// receive running status keeps its channel only until a two byte message
/// completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub tx_running_status: u8,
    pub rx_running_status: u8,
    pub pending_second_byte: u8,
    pub state: u8,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_tx:{:2X},run_rx:{:2X},3rd_byte:{:2X},state:{:2X}",
            self.tx_running_status, self.rx_running_status, self.pending_second_byte, self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::MidiEvent;
    use crate::transport::MockTransport;

    #[test]
    fn test_text_of_fresh_port() {
        let port = MidiPort::new(MockTransport::new(), Vec::<MidiEvent>::new());
        assert_eq!(port.text(), "run_tx: 0,run_rx: 0,3rd_byte: 0,state: 0");
    }

    #[test]
    fn test_text_mid_message() {
        let mut port = MidiPort::new(MockTransport::new(), Vec::<MidiEvent>::new());
        port.encoder_mut().control_change(2, 7, 100);
        port.transport_mut().push_input(&[0x91, 0x3C]);
        port.receive_all();

        assert_eq!(port.text(), "run_tx:B2,run_rx:91,3rd_byte: 1,state: 6");
    }

    #[test]
    fn test_text_after_completed_message_shows_family() {
        let mut port = MidiPort::new(MockTransport::new(), Vec::<MidiEvent>::new());
        port.transport_mut().push_input(&[0x91, 0x3C, 0x40]);
        port.receive_all();

        assert_eq!(port.text(), "run_tx: 0,run_rx:90,3rd_byte: 0,state: 5");
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let mut port = MidiPort::new(MockTransport::new(), Vec::<MidiEvent>::new());
        port.transport_mut().push_input(&[0xE0, 0x00, 0x40]);
        port.receive_all();
        assert_eq!(port.snapshot(), port.snapshot());
        assert_eq!(port.text(), port.text());
    }
}
