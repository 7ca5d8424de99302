use anyhow::Context;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable naming the workout log to use when `--file` isn't
/// given
pub(crate) const DATA_FILE_ENV: &str = "GYMCAL_FILE";

/// Environment variable naming the user whose workouts are shown when
/// `--user` isn't given
pub(crate) const USER_ENV: &str = "GYMCAL_USER";

const DEFAULT_DATA_FILE: &str = "workouts.json";

/// Settings given on the command line, before environment fallbacks are
/// applied
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Options {
    pub(crate) file: Option<PathBuf>,
    pub(crate) user: Option<String>,
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Config {
    pub(crate) data_file: PathBuf,
    pub(crate) user: Option<String>,
    pub(crate) log_file: Option<PathBuf>,
}

impl Config {
    pub(crate) fn from_env(opts: Options) -> Config {
        Config::resolve(opts, |name| std::env::var(name).ok())
    }

    fn resolve<F>(opts: Options, getenv: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = opts
            .file
            .or_else(|| getenv(DATA_FILE_ENV).filter(|s| !s.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let user = opts
            .user
            .or_else(|| getenv(USER_ENV))
            .filter(|s| !s.is_empty());
        Config {
            data_file,
            user,
            log_file: opts.log_file,
        }
    }

    /// Set up logging.  Logs go to the log file if one was given.  Otherwise,
    /// warnings go to stderr, unless the terminal is in use by the calendar,
    /// in which case nothing is logged.  `RUST_LOG` overrides the default
    /// level.
    pub(crate) fn init_logging(&self, interactive: bool) -> anyhow::Result<()> {
        if let Some(path) = &self.log_file {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            fmt()
                .with_env_filter(env_filter("info"))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        } else if !interactive {
            fmt()
                .with_env_filter(env_filter("warn"))
                .with_writer(std::io::stderr)
                .init();
        }
        Ok(())
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(Options::default(), no_env);
        assert_eq!(
            config,
            Config {
                data_file: PathBuf::from("workouts.json"),
                user: None,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_env_fallback() {
        let config = Config::resolve(Options::default(), |name| match name {
            DATA_FILE_ENV => Some(String::from("/data/gym.json")),
            USER_ENV => Some(String::from("alex")),
            _ => None,
        });
        assert_eq!(config.data_file, PathBuf::from("/data/gym.json"));
        assert_eq!(config.user.as_deref(), Some("alex"));
    }

    #[test]
    fn test_options_beat_env() {
        let opts = Options {
            file: Some(PathBuf::from("mine.json")),
            user: Some(String::from("sam")),
            log_file: Some(PathBuf::from("gymcal.log")),
        };
        let config = Config::resolve(opts, |_| Some(String::from("env")));
        assert_eq!(config.data_file, PathBuf::from("mine.json"));
        assert_eq!(config.user.as_deref(), Some("sam"));
        assert_eq!(config.log_file, Some(PathBuf::from("gymcal.log")));
    }

    #[test]
    fn test_empty_env_ignored() {
        let config = Config::resolve(Options::default(), |_| Some(String::new()));
        assert_eq!(config.data_file, PathBuf::from("workouts.json"));
        assert_eq!(config.user, None);
    }
}
