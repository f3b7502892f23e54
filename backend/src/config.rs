//! Runtime configuration.
//!
//! Values come from the process environment, after loading a `.env` file from
//! the working directory when one exists. Every setting has a default so the
//! server starts with no configuration at all.

use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_PATH: &str = "directory.sqlite";
const DEFAULT_STATIC_DIR: &str = "static/dist";
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file backing the document store.
    pub database_path: String,
    /// Built frontend assets; served only if the directory exists.
    pub static_dir: String,
    /// Accounts registered with one of these emails get the admin role.
    pub admin_emails: Vec<String>,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            admin_emails: Vec::new(),
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case in production.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a port number",
                value: raw.clone(),
            })?,
            None => defaults.port,
        };

        let json_limit = match lookup("JSON_LIMIT_BYTES") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "JSON_LIMIT_BYTES",
                expected: "a byte count",
                value: raw.clone(),
            })?,
            None => defaults.json_limit,
        };

        let admin_emails = lookup("ADMIN_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(|email| email.trim().to_lowercase())
                    .filter(|email| !email.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            admin_emails,
            json_limit,
        })
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_reads_overrides_and_admin_list() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("DATABASE_PATH", "/tmp/catalog.sqlite"),
            ("ADMIN_EMAILS", "Root@Example.com, ops@example.com,"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, "/tmp/catalog.sqlite");
        assert_eq!(config.admin_emails, vec!["root@example.com", "ops@example.com"]);
        assert!(config.is_admin_email(" ROOT@example.com"));
        assert!(!config.is_admin_email("someone@example.com"));
    }

    #[test]
    fn test_rejects_bad_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PORT must be a port number, got 'eighty'"
        );
    }
}
