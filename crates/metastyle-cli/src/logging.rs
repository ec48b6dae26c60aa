//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so that resolved output on stdout stays parseable.
//! With no `-v` flag, `RUST_LOG` is honoured and the default level is
//! `warn`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Read `RUST_LOG` before falling back to `level`.
    pub use_env_filter: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: console::colors_enabled_stderr(),
        }
    }
}

impl LogConfig {
    /// Maps a `-v` count to a level. Any explicit flag overrides `RUST_LOG`.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            use_env_filter: verbosity == 0,
            ..Self::default()
        }
    }

    fn filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.to_string());
        if self.use_env_filter {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
        } else {
            fallback()
        }
    }
}

/// Installs the global subscriber.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(config.filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(config.with_ansi),
        )
        .try_init()?;
    Ok(())
}
