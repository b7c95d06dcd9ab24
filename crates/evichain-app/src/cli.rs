//! Command-line arguments for the `evichain` terminal.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// EVICHAIN: terminal interface to the blockchain evidence ledger.
#[derive(Parser, Debug, Default)]
#[command(name = "evichain", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Sign in as this user for the session.
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Password for --user. Falls back to EVICHAIN_PASSWORD.
    #[arg(long = "password")]
    pub password: Option<String>,

    /// Skip the startup greeting.
    #[arg(long = "no-greeting")]
    pub no_greeting: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > EVICHAIN_CONFIG env var > ~/.evichain/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("EVICHAIN_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        match self.log_level {
            Some(ref level) => level.clone(),
            None if !config_level.trim().is_empty() => config_level.to_string(),
            None => "info".to_string(),
        }
    }

    /// Resolve the password: --password flag > EVICHAIN_PASSWORD env var.
    pub fn resolve_password(&self) -> Option<String> {
        self.password
            .clone()
            .or_else(|| std::env::var("EVICHAIN_PASSWORD").ok())
    }

    /// Whether the greeting should play, given the config value.
    pub fn resolve_show_greeting(&self, config_value: bool) -> bool {
        config_value && !self.no_greeting
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".evichain").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".evichain").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let args = CliArgs::parse_from([
            "evichain",
            "-c",
            "/tmp/evichain.toml",
            "-l",
            "debug",
            "-u",
            "officer002",
            "--password",
            "secret",
            "--no-greeting",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/evichain.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.user.as_deref(), Some("officer002"));
        assert_eq!(args.password.as_deref(), Some("secret"));
        assert!(args.no_greeting);
    }

    #[test]
    fn test_config_flag_wins() {
        let args = CliArgs {
            config: Some(PathBuf::from("custom.toml")),
            ..CliArgs::default()
        };
        assert_eq!(args.resolve_config_path(), PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_log_level_priority() {
        let args = CliArgs::default();
        assert_eq!(args.resolve_log_level("warn"), "warn");
        assert_eq!(args.resolve_log_level(""), "info");

        let args = CliArgs {
            log_level: Some("trace".to_string()),
            ..CliArgs::default()
        };
        assert_eq!(args.resolve_log_level("warn"), "trace");
    }

    #[test]
    fn test_password_flag_wins() {
        let args = CliArgs {
            password: Some("pw".to_string()),
            ..CliArgs::default()
        };
        assert_eq!(args.resolve_password().as_deref(), Some("pw"));
    }

    #[test]
    fn test_no_greeting_overrides_config() {
        let args = CliArgs::default();
        assert!(args.resolve_show_greeting(true));
        assert!(!args.resolve_show_greeting(false));

        let args = CliArgs {
            no_greeting: true,
            ..CliArgs::default()
        };
        assert!(!args.resolve_show_greeting(true));
    }
}
