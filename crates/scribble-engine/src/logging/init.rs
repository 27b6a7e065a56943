use std::sync::Once;

/// Logger setup.
///
/// `env_filter` uses `env_logger` filter syntax, e.g.
/// `"scribble_engine=debug,wgpu_core=warn"`. When absent, `RUST_LOG` is
/// consulted, then `default_level` applies.
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
    /// Filter string to hand to `env_logger`, if any source provides one.
    pub fn resolve_filter(&self, rust_log: Option<String>) -> Option<String> {
        let non_blank = |f: &String| !f.trim().is_empty();
        self.env_filter.clone().filter(non_blank).or_else(|| rust_log.filter(non_blank))
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolve_filter(std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info.
                builder.filter_level(config.default_level);
                builder.filter_module("wgpu_core", log::LevelFilter::Warn);
                builder.filter_module("wgpu_hal", log::LevelFilter::Warn);
                builder.filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        if builder.try_init().is_err() {
            log::warn!("a global logger was already installed");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_rust_log() {
        let cfg = LoggingConfig { env_filter: Some("debug".into()), ..Default::default() };
        assert_eq!(cfg.resolve_filter(Some("warn".into())).as_deref(), Some("debug"));
    }

    #[test]
    fn rust_log_used_when_no_explicit_filter() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.resolve_filter(Some("warn".into())).as_deref(), Some("warn"));
    }

    #[test]
    fn blank_filter_defers_to_rust_log() {
        let cfg = LoggingConfig { env_filter: Some("  ".into()), ..Default::default() };
        assert_eq!(cfg.resolve_filter(Some("warn".into())).as_deref(), Some("warn"));
    }

    #[test]
    fn blank_sources_fall_back_to_default_level() {
        let cfg = LoggingConfig { env_filter: Some("  ".into()), ..Default::default() };
        assert_eq!(cfg.resolve_filter(None), None);
        assert_eq!(cfg.resolve_filter(Some("".into())), None);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
