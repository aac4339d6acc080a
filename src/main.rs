use clap::Parser;
use log::{debug, error, info};
use serialmidi::{
    cli::{handle_device_list, parse_hex_bytes, validate_device, Args, Command},
    config::Settings,
    logging,
    midi::{Decoder, Encoder, EventPrinter, MidiPort},
    transport::{MidirTransport, ReaderSource},
    Result,
};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, IsTerminal};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

fn main() {
    let args = parse_command_line_arguments();
    let settings = load_settings(&args);
    initialize_logging(&settings);
    if let Some(path) = &args.config {
        debug!("Settings loaded from {}", path.display());
    }
    debug!("Settings: {:?}", settings);

    if let Err(e) = run(args.command, settings) {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn load_settings(args: &Args) -> Settings {
    let mut settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(level) = &args.log_level {
        settings.log_level = level.clone();
    }
    settings
}

fn initialize_logging(settings: &Settings) {
    if let Err(e) = logging::init_logger(settings.level_filter(), settings.log_file.clone()) {
        eprintln!("Logger initialization failed: {}", e);
    }
    info!("Application starting");
}

fn run(command: Command, settings: Settings) -> Result<()> {
    match command {
        Command::Devices => {
            list_available_devices(&handle_device_list());
            Ok(())
        }
        Command::Monitor { device, show_state } => {
            let device = match device.or_else(|| settings.input_device.clone()) {
                Some(device) => device,
                None => choose_input_device()?,
            };
            run_monitor(&device, show_state, settings.poll_interval())
        }
        Command::SendTestNote {
            device,
            channel,
            note,
            velocity,
        } => {
            let device = device
                .or_else(|| settings.output_device.clone())
                .ok_or_else(|| serialmidi::Error::DeviceNotFound("<none given>".to_string()))?;
            send_test_note(&device, channel.unwrap_or(settings.channel), note, velocity)
        }
        Command::Decode { hex, file } => decode(hex, file),
    }
}

fn list_available_devices(devices: &[String]) {
    println!("Available MIDI devices:");
    for device in devices {
        println!("  - {}", device);
    }
}

fn choose_input_device() -> Result<String> {
    let ports = MidirTransport::input_port_names()?;
    if ports.is_empty() || !std::io::stdin().is_terminal() {
        return Err(serialmidi::Error::DeviceNotFound("<none given>".to_string()));
    }

    let selection = dialoguer::Select::new()
        .with_prompt("Select MIDI input")
        .items(&ports[..])
        .default(0)
        .interact()?;
    Ok(ports[selection].clone())
}

fn run_monitor(device: &str, show_state: bool, poll_interval: Duration) -> Result<()> {
    if let Err(error_msg) = validate_device(device, &handle_device_list()) {
        error!("{}", error_msg);
        return Err(serialmidi::Error::DeviceNotFound(device.to_string()));
    }

    let transport = MidirTransport::connect(Some(device), None)?;
    let mut port = MidiPort::new(transport, EventPrinter::new());
    info!("Monitoring MIDI device: {}", device);
    println!("Monitoring {}. Press Ctrl+C to exit...", device);

    let mut seen = 0;
    loop {
        if !port.receive() {
            thread::sleep(poll_interval);
            continue;
        }
        if show_state && port.handler().count() != seen {
            seen = port.handler().count();
            println!("    {}", port.text());
        }
    }
}

fn send_test_note(device: &str, channel: u8, note: u8, velocity: u8) -> Result<()> {
    let transport = MidirTransport::connect(None, Some(device))?;
    let mut encoder = Encoder::new(transport);

    info!("Sending test note {} on channel {}", note, channel);
    encoder.note_on(channel, note, velocity);
    thread::sleep(Duration::from_millis(500));
    // Same status as the note on, so only the data bytes go out
    encoder.note_on(channel, note, 0);
    info!("Test note released");
    Ok(())
}

fn decode(hex: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let mut decoder = Decoder::new(EventPrinter::without_timestamps());

    if let Some(text) = hex {
        let mut bytes: VecDeque<u8> = parse_hex_bytes(&text)?.into();
        while decoder.receive(&mut bytes) {}
    }
    if let Some(path) = file {
        let mut source = ReaderSource::new(BufReader::new(File::open(path)?));
        while decoder.receive(&mut source) {}
    }

    info!("Decoded {} events", decoder.handler().count());
    Ok(())
}
