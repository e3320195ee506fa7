use log::info;

/// Initialize the logging system with an appropriate log level.
///
/// The level is taken from the `PCMSTREAM_LOG_LEVEL` environment variable
/// and defaults to `info`. Safe to call more than once; later calls are
/// no-ops once a global logger is installed.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = std::env::var("PCMSTREAM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let mut builder = env_logger::Builder::new();

    // Set custom format for better readability
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}:{}] {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    });

    builder.filter_level(parse_level(&log_level));
    builder.try_init()?;

    info!("pcmstream logging initialized with level: {}", log_level);
    Ok(())
}

fn parse_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Info,
    }
}
