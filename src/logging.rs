use std::fs::File;
use std::path::PathBuf;

use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    TestLogger, WriteLogger,
};

use crate::error::LoggingError;

/// Where log records go, and how verbose each sink is.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub terminal_level: LevelFilter,
    /// Optional log file (truncated on init) and its level.
    pub file: Option<(PathBuf, LevelFilter)>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            terminal_level: LevelFilter::Warn,
            file: None,
        }
    }
}

impl LogConfig {
    /// Also write every record up to `level` into `path`.
    pub fn with_file(mut self, path: impl Into<PathBuf>, level: LevelFilter) -> Self {
        self.file = Some((path.into(), level));
        self
    }
}

/// Installs the global logger. Fails if one is already installed.
///
/// ```no_run
/// use rbmap::logging::{self, LogConfig};
/// use simplelog::LevelFilter;
///
/// logging::init(&LogConfig::default().with_file("rbmap_debug.log", LevelFilter::Debug))?;
/// # Ok::<(), rbmap::LoggingError>(())
/// ```
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            config.terminal_level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
    ];

    if let Some((path, level)) = &config.file {
        loggers.push(WriteLogger::new(*level, Config::default(), File::create(path)?));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}

/// Routes records through the test harness's captured output.
///
/// Safe to call from every test: only the first call installs anything.
pub fn init_test() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
