//! Log backend setup.
//!
//! Native builds log through `env_logger` (`RUST_LOG` still overrides the
//! configured level); browser builds log to the devtools console.

use crate::config::LogLevel;

/// Install the log backend. Calling this more than once is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::debug!("Logging initialized at {:?}", level);
    }
}

/// Install the log backend. Calling this more than once is harmless.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    console_error_panic_hook::set_once();

    let level = level
        .to_level_filter()
        .to_level()
        .unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_ok() {
        log::debug!("Console logging initialized at {}", level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init(LogLevel::Debug);
        init(LogLevel::Warn);
        log::info!("still logging");
    }
}
