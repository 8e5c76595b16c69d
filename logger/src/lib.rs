use colored::Colorize;
use middleware::logger::LoggerMiddleware;

pub mod middleware {
    pub mod logger;
}

/// Installs the global `log` dispatcher: colored lines on stdout and plain
/// lines appended to `log_file`. Debug output is kept out of production.
pub fn setup(log_file: &str, production: bool) -> Result<(), fern::InitError> {
    let level = if production {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Debug
    };

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                level_color(record.level()),
                message
            ))
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(fern::log_file(log_file)?);

    fern::Dispatch::new()
        .level(level)
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("hyper", log::LevelFilter::Off)
        .level_for("rustls", log::LevelFilter::Off)
        .chain(console)
        .chain(file)
        .apply()?;
    Ok(())
}

fn level_color(level: log::Level) -> colored::ColoredString {
    let name = level.to_string();
    match level {
        log::Level::Error => name.red(),
        log::Level::Warn => name.yellow(),
        log::Level::Info => name.green(),
        log::Level::Debug => name.magenta(),
        log::Level::Trace => name.bright_black(),
    }
}

pub fn middleware(console_logging_enabled: bool) -> LoggerMiddleware {
    LoggerMiddleware::new(console_logging_enabled)
}
