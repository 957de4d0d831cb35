//! Logger backend for the `log` facade
//!
//! With `ORTHOKEYS_DEBUG=1` every record down to debug level is appended to
//! `~/.orthokeys/debug/orthokeys.log`. Otherwise warnings and errors go to
//! stderr, which the host process usually captures.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use log::{LevelFilter, Log, Metadata, Record};

pub const DEBUG_ENV: &str = "ORTHOKEYS_DEBUG";

enum Sink {
    File(Mutex<File>),
    Stderr,
}

struct OrthokeysLogger {
    level: LevelFilter,
    sink: Sink,
}

impl OrthokeysLogger {
    fn format(record: &Record) -> String {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        format!(
            "[{}] {:5} {}: {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for OrthokeysLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        match &self.sink {
            Sink::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{}", line);
                }
            }
            Sink::Stderr => eprintln!("{}", line),
        }
    }

    fn flush(&self) {
        if let Sink::File(file) = &self.sink {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

pub fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV).map(|v| v == "1").unwrap_or(false)
}

/// Returns the debug log path (~/.orthokeys/debug/orthokeys.log)
pub fn debug_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".orthokeys").join("debug").join("orthokeys.log"))
}

fn open_debug_file() -> Option<File> {
    let path = debug_log_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Install the logger once; later calls are no-ops.
pub fn init() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let logger = match debug_enabled().then(open_debug_file).flatten() {
            Some(file) => OrthokeysLogger {
                level: LevelFilter::Debug,
                sink: Sink::File(Mutex::new(file)),
            },
            None => OrthokeysLogger {
                level: LevelFilter::Warn,
                sink: Sink::Stderr,
            },
        };
        let level = logger.level;
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(level);
        }
    });
}
