use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// A logger that appends to a file.
///
/// The terminal belongs to the player so nothing is ever written to stdout or stderr.
pub struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file), level })
    }

    /// Install this as the global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        let _ = writeln!(
            file,
            "{}.{:03} {:<5} {}: {}",
            timestamp.as_secs(),
            timestamp.subsec_millis(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Parse a level name, defaulting to `info`.
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level.and_then(|level| level.parse().ok()).unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case(None, LevelFilter::Info)]
    #[case(Some("debug"), LevelFilter::Debug)]
    #[case(Some("TRACE"), LevelFilter::Trace)]
    #[case(Some("off"), LevelFilter::Off)]
    #[case(Some("loud"), LevelFilter::Info)]
    fn level_parsing(#[case] input: Option<&str>, #[case] expected: LevelFilter) {
        assert_eq!(parse_level(input), expected);
    }

    #[test]
    fn writes_enabled_records_only() {
        let file = tempfile::NamedTempFile::new().expect("failed to create file");
        let logger = FileLogger::open(file.path(), LevelFilter::Info).expect("failed to open");

        logger.log(&Record::builder().level(Level::Info).target("player").args(format_args!("started")).build());
        logger.log(&Record::builder().level(Level::Debug).target("player").args(format_args!("noisy")).build());
        logger.flush();

        let contents = fs::read_to_string(file.path()).expect("read failed");
        assert!(contents.contains("INFO  player: started"));
        assert!(!contents.contains("noisy"));
    }
}
