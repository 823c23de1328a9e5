use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "cria_engine=debug,wgpu_core=warn"). When absent, `RUST_LOG` is consulted, then
/// `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

/// Where the active filter came from.
#[derive(Debug, Clone, Eq, PartialEq)]
enum FilterSource {
    Config(String),
    Env(String),
    Default(log::LevelFilter),
}

fn resolve_filter(config: &LoggingConfig, env: Option<String>) -> FilterSource {
    match (&config.env_filter, env) {
        (Some(filter), _) => FilterSource::Config(filter.clone()),
        (None, Some(filter)) if !filter.trim().is_empty() => FilterSource::Env(filter),
        _ => FilterSource::Default(config.default_level),
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            FilterSource::Config(filter) | FilterSource::Env(filter) => {
                builder.parse_filters(&filter);
            }
            FilterSource::Default(level) => {
                // wgpu internals are chatty at info.
                builder
                    .filter_level(level)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_filter_wins_over_env() {
        let config = LoggingConfig::default().with_filter("debug");
        assert_eq!(
            resolve_filter(&config, Some("warn".into())),
            FilterSource::Config("debug".into())
        );
    }

    #[test]
    fn env_then_default() {
        let config = LoggingConfig::default();
        assert_eq!(
            resolve_filter(&config, Some("cria_engine=trace".into())),
            FilterSource::Env("cria_engine=trace".into())
        );
        assert_eq!(
            resolve_filter(&config, Some("  ".into())),
            FilterSource::Default(log::LevelFilter::Info)
        );
        assert_eq!(resolve_filter(&config, None), FilterSource::Default(log::LevelFilter::Info));
    }
}
