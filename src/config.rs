use crate::LEDGER_DEBOUNCE;
use crate::ledger::Policy;
use std::time::Duration;

const LEDGER_DEBOUNCE_MS: &str = "LEDGER_DEBOUNCE_MS";
const LEDGER_POLICY: &str = "LEDGER_POLICY";
const LEDGER_USER: &str = "LEDGER_USER";
const LEDGER_EMAIL: &str = "LEDGER_EMAIL";
const DB_URL: &str = "DB_URL";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Quiet period before ledger edits are written.
    pub debounce: Duration,
    /// Settlement policy for newly created ledgers.
    pub policy: Policy,
    pub username: String,
    pub email: String,
    /// PostgreSQL connection string. Without it, state lives in memory.
    pub db_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce: LEDGER_DEBOUNCE,
            policy: Policy::default(),
            username: String::from("host"),
            email: String::from("host@localhost"),
            db_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();
        if let Some(ms) = get(LEDGER_DEBOUNCE_MS) {
            let ms = ms
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("{} must be milliseconds: {}", LEDGER_DEBOUNCE_MS, e))?;
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(policy) = get(LEDGER_POLICY) {
            config.policy = policy.parse::<Policy>().map_err(anyhow::Error::msg)?;
        }
        if let Some(username) = get(LEDGER_USER) {
            config.username = username;
        }
        if let Some(email) = get(LEDGER_EMAIL) {
            config.email = email;
        }
        config.db_url = get(DB_URL);
        log::debug!(
            "[config] policy {} debounce {:?} user {}",
            config.policy,
            config.debounce,
            config.username
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_every_key() {
        let config = config(&[
            ("LEDGER_DEBOUNCE_MS", "250"),
            ("LEDGER_POLICY", "proportional"),
            ("LEDGER_USER", "dealer"),
            ("LEDGER_EMAIL", "dealer@home.game"),
            ("DB_URL", "postgres://localhost/poker"),
        ])
        .unwrap();
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.policy, Policy::Proportional);
        assert_eq!(config.username, "dealer");
        assert_eq!(config.email, "dealer@home.game");
        assert_eq!(config.db_url.as_deref(), Some("postgres://localhost/poker"));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config(&[("DB_URL", "  "), ("LEDGER_USER", "")]).unwrap();
        assert_eq!(config.db_url, None);
        assert_eq!(config.username, "host");
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(config(&[("LEDGER_DEBOUNCE_MS", "soon")]).is_err());
        assert!(config(&[("LEDGER_POLICY", "winner-takes-all")]).is_err());
    }
}
