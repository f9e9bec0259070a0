use log::{Log, Record, Level, Metadata, SetLoggerError, LevelFilter};


/// Writes log records from the library crates to stderr
struct SimpleLogger {
    level: LevelFilter,
}


impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}


pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose {
        Level::Debug.to_level_filter()
    } else {
        LevelFilter::Warn
    };

    log::set_boxed_logger(Box::new(SimpleLogger { level: level }))?;
    log::set_max_level(level);
    Ok(())
}
