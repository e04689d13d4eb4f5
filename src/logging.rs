use std::io::Write;
use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;
use crate::errors::UnrecoverableError;

/// Sets up the process wide logger
///
/// Defaults to info level, overridable through RUST_LOG
pub fn setup_logger() -> Result<(), UnrecoverableError> {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf, "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args())
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    Ok(())
}
