use std::sync::Once;

use log::LevelFilter;

/// Logger settings for the studio and any host embedding the engine.
///
/// Shader diagnostics are logged with the caller's tag as the record target,
/// so `env_filter` can address them directly, e.g.
/// `"warn,plane_renderer=debug"`. Without a filter, `RUST_LOG` is consulted
/// and then `default_level` applies.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` once; later calls are no-ops.
///
/// Call from `main` before the render thread starts, so compile and driver
/// errors from that thread are not lost.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        builder(config, std::env::var("RUST_LOG").ok()).init();
        log::debug!("logging initialized");
    });
}

/// Record targets stay visible: they carry the per-call-site tag.
fn builder(config: LoggingConfig, rust_log: Option<String>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    match config.env_filter.or(rust_log) {
        Some(filter) => builder.parse_filters(&filter),
        None => builder.filter_level(config.default_level),
    };

    builder.write_style(config.write_style);
    builder.format_target(true);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_level(config: LoggingConfig, rust_log: Option<&str>) -> LevelFilter {
        builder(config, rust_log.map(str::to_owned)).build().filter()
    }

    #[test]
    fn explicit_filter_wins_over_rust_log() {
        let config = LoggingConfig {
            env_filter: Some("warn".to_string()),
            ..LoggingConfig::default()
        };
        assert_eq!(max_level(config, Some("trace")), LevelFilter::Warn);
    }

    #[test]
    fn rust_log_is_used_without_explicit_filter() {
        assert_eq!(max_level(LoggingConfig::default(), Some("debug")), LevelFilter::Debug);
    }

    #[test]
    fn default_level_applies_last() {
        let config = LoggingConfig {
            default_level: LevelFilter::Error,
            ..LoggingConfig::default()
        };
        assert_eq!(max_level(config, None), LevelFilter::Error);
    }

    #[test]
    fn tag_filters_raise_max_level() {
        let config = LoggingConfig {
            env_filter: Some("warn,plane_renderer=trace".to_string()),
            ..LoggingConfig::default()
        };
        assert_eq!(max_level(config, None), LevelFilter::Trace);
    }
}
