//! Runtime configuration.
//!
//! TOML file with defaults for everything, so a bare `ledgerbot chat`
//! works with no file at all. Resolution order for the file path:
//! explicit flag > `LEDGERBOT_CONFIG` env > `~/.ledgerbot/config.toml` >
//! built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::LedgerbotError;

fn default_bot_username() -> String {
    "ledgerbot".to_string()
}

fn default_history_cap() -> usize {
    100
}

fn default_context_turns() -> usize {
    crate::services::history::DEFAULT_CONTEXT_TURNS
}

fn default_session_capacity() -> u64 {
    10_000
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

fn default_edit_threshold() -> usize {
    1
}

fn default_search_depth() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Username the bot registers and answers to.
    #[serde(default = "default_bot_username")]
    pub bot_username: String,

    /// Max messages (both roles) kept per session.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// User turns considered for recent context.
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,

    /// Max concurrently live sessions.
    #[serde(default = "default_session_capacity")]
    pub session_capacity: u64,

    /// Sessions idle longer than this are evicted.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    /// Max edit distance for a spelling suggestion.
    #[serde(default = "default_edit_threshold")]
    pub edit_threshold: usize,

    /// Prefix window for fuzzy candidate pruning.
    #[serde(default = "default_search_depth")]
    pub search_depth: usize,

    /// Chat platform base URL; unset runs platform-less (CLI modes).
    #[serde(default)]
    pub platform_url: Option<String>,

    /// Platform access token.
    #[serde(default)]
    pub platform_token: Option<String>,

    /// ERP backend base URL; unset means local templated replies only.
    #[serde(default)]
    pub backend_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_username: default_bot_username(),
            history_cap: default_history_cap(),
            context_turns: default_context_turns(),
            session_capacity: default_session_capacity(),
            session_idle_secs: default_session_idle_secs(),
            edit_threshold: default_edit_threshold(),
            search_depth: default_search_depth(),
            platform_url: None,
            platform_token: None,
            backend_url: None,
        }
    }
}

impl Config {
    /// Load configuration, resolving the path as documented on the module.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, LedgerbotError> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("LEDGERBOT_CONFIG").ok().map(PathBuf::from))
            .or_else(|| dirs::home_dir().map(|h| h.join(".ledgerbot").join("config.toml")));

        match path {
            Some(p) if p.exists() => Self::from_file(&p),
            Some(_) | None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, LedgerbotError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LedgerbotError::Config(format!("read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), LedgerbotError> {
        if self.history_cap == 0 {
            return Err(LedgerbotError::Config("history_cap must be positive".into()));
        }
        if self.bot_username.trim().is_empty() {
            return Err(LedgerbotError::Config("bot_username must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.bot_username, "ledgerbot");
        assert_eq!(config.history_cap, 100);
        assert_eq!(config.edit_threshold, 1);
        assert!(config.platform_url.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bot_username = \"erpbot\"\nhistory_cap = 50").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bot_username, "erpbot");
        assert_eq!(config.history_cap, 50);
        assert_eq!(config.context_turns, 10);
    }

    #[test]
    fn zero_history_cap_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history_cap = 0").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "histroy_cap = 10").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}
