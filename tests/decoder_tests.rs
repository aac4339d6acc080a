use serialmidi::midi::{Decoder, MidiEvent, RxState};
use serialmidi::transport::MockTransport;

fn decode(bytes: &[u8]) -> Vec<MidiEvent> {
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());
    decoder.feed_all(bytes);
    decoder.into_handler()
}

#[test]
fn test_note_on() {
    assert_eq!(
        decode(&[0x90, 0x3C, 0x64]),
        vec![MidiEvent::NoteOn {
            note: 60,
            velocity: 100
        }]
    );
}

#[test]
fn test_zero_velocity_note_on_is_note_off() {
    assert_eq!(
        decode(&[0x90, 0x3C, 0x00]),
        vec![MidiEvent::NoteOff {
            note: 60,
            velocity: 0
        }]
    );
}

#[test]
fn test_note_off_keeps_release_velocity() {
    assert_eq!(
        decode(&[0x85, 0x3C, 0x40]),
        vec![MidiEvent::NoteOff {
            note: 60,
            velocity: 64
        }]
    );
}

#[test]
fn test_control_change() {
    assert_eq!(
        decode(&[0xB0, 0x07, 0x7F]),
        vec![MidiEvent::ControlChange {
            controller: 7,
            value: 127
        }]
    );
}

#[test]
fn test_pitch_wheel_in_wire_order() {
    assert_eq!(
        decode(&[0xE3, 0x01, 0x40]),
        vec![MidiEvent::PitchWheel {
            lsb: 0x01,
            msb: 0x40
        }]
    );
}

#[test]
fn test_running_status_repeats_family() {
    assert_eq!(
        decode(&[0x90, 60, 100, 62, 90, 60, 0]),
        vec![
            MidiEvent::NoteOn {
                note: 60,
                velocity: 100
            },
            MidiEvent::NoteOn {
                note: 62,
                velocity: 90
            },
            MidiEvent::NoteOff {
                note: 60,
                velocity: 0
            },
        ]
    );
}

#[test]
fn test_channel_is_ignored() {
    assert_eq!(
        decode(&[0x9F, 60, 100, 0xB7, 1, 2]),
        vec![
            MidiEvent::NoteOn {
                note: 60,
                velocity: 100
            },
            MidiEvent::ControlChange {
                controller: 1,
                value: 2
            },
        ]
    );
}

#[test]
fn test_realtime_inside_message_is_transparent() {
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());

    decoder.feed_all(&[0x90, 0x3C]);
    decoder.feed(0xF8);
    assert_eq!(decoder.handler(), &vec![MidiEvent::Realtime(0xF8)]);
    assert!(decoder.awaiting_second_byte());

    decoder.feed(0x64);
    assert_eq!(
        decoder.handler(),
        &vec![
            MidiEvent::Realtime(0xF8),
            MidiEvent::NoteOn {
                note: 60,
                velocity: 100
            }
        ]
    );
}

#[test]
fn test_realtime_inside_zero_velocity_note() {
    assert_eq!(
        decode(&[0x90, 0x3C, 0xFA, 0x00]),
        vec![
            MidiEvent::Realtime(0xFA),
            MidiEvent::NoteOff {
                note: 60,
                velocity: 0
            }
        ]
    );
}

#[test]
fn test_realtime_between_status_and_data() {
    assert_eq!(
        decode(&[0xB0, 0xFE, 0x07, 0xFC, 0x10]),
        vec![
            MidiEvent::Realtime(0xFE),
            MidiEvent::Realtime(0xFC),
            MidiEvent::ControlChange {
                controller: 7,
                value: 16
            }
        ]
    );
}

#[test]
fn test_every_realtime_byte_is_dispatched() {
    let bytes: Vec<u8> = (0xF8..=0xFF).collect();
    let events = decode(&bytes);
    assert_eq!(
        events,
        bytes
            .iter()
            .map(|&b| MidiEvent::Realtime(b))
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_stray_data_without_status_is_dropped() {
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());
    decoder.feed_all(&[0x3C, 0x64, 0x00]);
    assert!(decoder.handler().is_empty());
    assert_eq!(decoder.state(), RxState::Idle);

    decoder.feed_all(&[0x90, 0x3C, 0x64]);
    assert_eq!(decoder.handler().len(), 1);
}

#[test]
fn test_program_change_and_aftertouch_are_counted_not_dispatched() {
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());

    // Program change: one data byte each, running status kept
    decoder.feed_all(&[0xC0, 0x05, 0x06]);
    assert_eq!(decoder.state(), RxState::Running { status: 0xC0 });

    // Channel aftertouch
    decoder.feed_all(&[0xD1, 0x40]);
    assert_eq!(decoder.state(), RxState::Running { status: 0xD1 });

    // Polyphonic aftertouch: two data bytes
    decoder.feed_all(&[0xA0, 0x3C]);
    assert!(decoder.awaiting_second_byte());
    decoder.feed(0x10);
    assert_eq!(decoder.state(), RxState::Running { status: 0xA0 });

    assert!(decoder.handler().is_empty());

    // Byte counting stays aligned for the next message
    decoder.feed_all(&[0x3C, 0x11, 0xB0, 0x07, 0x7F]);
    assert_eq!(
        decoder.handler(),
        &vec![MidiEvent::ControlChange {
            controller: 7,
            value: 127
        }]
    );
}

#[test]
fn test_song_position_consumes_two_bytes_then_resyncs() {
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());

    decoder.feed(0xF2);
    assert_eq!(decoder.running_status(), Some(0xF2));

    decoder.feed(0x10);
    assert_eq!(decoder.running_status(), None);
    assert!(decoder.awaiting_second_byte());

    decoder.feed(0x20);
    assert_eq!(decoder.state(), RxState::Idle);

    // No running status left: following data bytes are stray
    decoder.feed_all(&[0x3C, 0x64]);
    assert!(decoder.handler().is_empty());
}

#[test]
fn test_realtime_inside_song_position() {
    assert_eq!(
        decode(&[0xF2, 0x10, 0xF8, 0x20, 0x3C, 0x64]),
        vec![MidiEvent::Realtime(0xF8)]
    );
}

#[test]
fn test_song_select_consumes_one_byte() {
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());

    decoder.feed_all(&[0xF3, 0x05]);
    assert_eq!(decoder.state(), RxState::Idle);
    assert!(!decoder.awaiting_second_byte());

    decoder.feed(0x06);
    assert!(decoder.handler().is_empty());
}

#[test]
fn test_other_system_common_drops_running_status() {
    for status in [0xF0, 0xF1, 0xF4, 0xF5, 0xF6, 0xF7] {
        let mut decoder = Decoder::new(Vec::<MidiEvent>::new());
        decoder.feed(status);
        assert_eq!(decoder.running_status(), Some(status));

        decoder.feed_all(&[0x01, 0x02, 0x03]);
        assert_eq!(decoder.state(), RxState::Idle, "status {:02X}", status);
        assert!(decoder.handler().is_empty());
    }
}

#[test]
fn test_sysex_payload_is_skipped() {
    assert_eq!(
        decode(&[0xF0, 0x7E, 0x00, 0x06, 0x01, 0xF7, 0x90, 0x3C, 0x64]),
        vec![MidiEvent::NoteOn {
            note: 60,
            velocity: 100
        }]
    );
}

#[test]
fn test_tune_request_is_recorded() {
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());
    decoder.feed_all(&[0x90, 0x3C, 0xF6]);
    assert_eq!(decoder.state(), RxState::Running { status: 0xF6 });
    assert!(!decoder.awaiting_second_byte());
    assert!(decoder.handler().is_empty());
}

#[test]
fn test_receive_without_input_changes_nothing() {
    let mut transport = MockTransport::new();
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());

    transport.push_input(&[0x90, 0x3C]);
    assert!(decoder.receive(&mut transport));
    assert!(decoder.receive(&mut transport));
    let before = decoder.state();

    assert!(!decoder.receive(&mut transport));
    assert!(!decoder.receive(&mut transport));
    assert_eq!(decoder.state(), before);
    assert!(decoder.handler().is_empty());

    transport.push_input(&[0x64]);
    assert!(decoder.receive(&mut transport));
    assert_eq!(
        decoder.handler(),
        &vec![MidiEvent::NoteOn {
            note: 60,
            velocity: 100
        }]
    );
}

#[test]
fn test_receive_reads_one_byte_per_call() {
    let mut transport = MockTransport::new();
    transport.push_input(&[0xB0, 0x07, 0x7F]);
    let mut decoder = Decoder::new(Vec::<MidiEvent>::new());

    decoder.receive(&mut transport);
    assert_eq!(transport.pending_input(), 2);
    decoder.receive(&mut transport);
    assert!(decoder.handler().is_empty());
    decoder.receive(&mut transport);
    assert_eq!(transport.pending_input(), 0);
    assert_eq!(decoder.handler().len(), 1);
}
