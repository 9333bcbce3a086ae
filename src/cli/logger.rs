use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes `LEVEL - message` lines to stderr
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    /// Install the logger. Warnings and errors are always shown; each `-v` reveals one more
    /// level.
    pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
        let level = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        log::set_boxed_logger(Box::new(Logger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
