use simplelog::*;
use std::fs::{self, File, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();
static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// `$HOME/.local/share/serialmidi/logs/serialmidi.log`
pub fn default_log_path() -> Result<PathBuf, Error> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("serialmidi")
        .join("logs")
        .join("serialmidi.log"))
}

/// Installs a terminal logger at `level` and a debug-level file logger.
///
/// Only the first call does anything, including creating the log file;
/// later calls report whether that one succeeded.
pub fn init_logger(level: LevelFilter, log_file: Option<PathBuf>) -> Result<(), Error> {
    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        return Ok(());
    }

    let path = match log_file {
        Some(path) => path,
        None => default_log_path()?,
    };

    let mut open_error = None;
    INIT.call_once(|| {
        let file = match open_log_file(&path) {
            Ok(file) => file,
            Err(e) => {
                open_error = Some(e);
                return;
            }
        };
        let result = CombinedLogger::init(vec![
            TermLogger::new(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ),
            WriteLogger::new(LevelFilter::Debug, Config::default(), file),
        ]);
        LOGGER_INITIALIZED.store(result.is_ok(), Ordering::SeqCst);
    });

    if let Some(e) = open_error {
        return Err(e);
    }
    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Other, "Logger initialization failed"))
    }
}

fn open_log_file(path: &Path) -> Result<File, Error> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
