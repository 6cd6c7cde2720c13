use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Logs at `Info`; `RUST_LOG` overrides the level.
pub fn init() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    Ok(())
}
