#[cfg(test)]
mod tests {
    use clap::Parser;
    use serialmidi::cli::{parse_hex_bytes, validate_device, Command};
    use serialmidi::*;
    use std::path::PathBuf;

    #[test]
    #[cfg(feature = "test-mock")]
    fn test_device_list() {
        let devices = handle_device_list();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0], "Mock Device 1");
        assert_eq!(devices[1], "Mock Device 2");
    }

    #[test]
    fn test_args_devices() {
        let args = Args::parse_from(["test", "devices"]);
        assert_eq!(args.command, Command::Devices);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_args_monitor_with_device() {
        let args = Args::parse_from(["test", "monitor", "--device", "Mock Device 1"]);
        assert_eq!(
            args.command,
            Command::Monitor {
                device: Some("Mock Device 1".to_string()),
                show_state: false
            }
        );
    }

    #[test]
    fn test_args_send_test_note_defaults() {
        let args = Args::parse_from(["test", "send-test-note", "--channel", "3"]);
        assert_eq!(
            args.command,
            Command::SendTestNote {
                device: None,
                channel: Some(3),
                note: 60,
                velocity: 100
            }
        );
    }

    #[test]
    fn test_args_global_options() {
        let args = Args::parse_from([
            "test",
            "decode",
            "--hex",
            "90 3C 64",
            "--config",
            "midi.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("midi.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_decode_requires_input() {
        assert!(Args::try_parse_from(["test", "decode"]).is_err());
        assert!(Args::try_parse_from(["test", "decode", "--file", "dump.bin"]).is_ok());
    }

    #[test]
    fn test_valid_device_binding() {
        let devices = vec!["Mock Device 1".to_string(), "Mock Device 2".to_string()];
        assert!(validate_device("Mock Device 1", &devices).is_ok());
    }

    #[test]
    fn test_invalid_device_binding() {
        let devices = vec!["Mock Device 1".to_string(), "Mock Device 2".to_string()];
        let error_msg = validate_device("Nonexistent Device", &devices).unwrap_err();
        assert!(error_msg.contains("Nonexistent Device"));
        assert!(error_msg.contains("  - Mock Device 2"));
    }

    #[test]
    fn test_parse_hex_bytes() {
        assert_eq!(
            parse_hex_bytes("90 3C 64").unwrap(),
            vec![0x90, 0x3C, 0x64]
        );
        assert_eq!(
            parse_hex_bytes("0xb0,0x07, 7f\n").unwrap(),
            vec![0xB0, 0x07, 0x7F]
        );
        assert!(parse_hex_bytes("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_hex_rejects_bad_tokens() {
        match parse_hex_bytes("90 3G") {
            Err(Error::InvalidHex(token)) => assert_eq!(token, "3G"),
            other => panic!("Expected InvalidHex, got {:?}", other),
        }
        assert!(parse_hex_bytes("100").is_err());
    }
}
