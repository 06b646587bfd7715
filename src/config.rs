use anyhow::{Context, Result};
use clap::Parser;
use std::env::{self, VarError};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Users and advertisements HTTP API")]
pub struct Args {
    /// Host to bind to (overrides ADBOARD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides ADBOARD_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides ADBOARD_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Size of the SQLite connection pool (overrides ADBOARD_MAX_CONNECTIONS)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::resolve(args, |key| env::var(key))?;
        Ok((cfg, migrate))
    }

    /// Merge CLI args over values looked up with `lookup`, over defaults.
    pub fn resolve<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let env_host = lookup("ADBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = parse_var(&lookup, "ADBOARD_PORT", 8080)?;
        let env_db = lookup("ADBOARD_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/adboard.db".into());
        let env_max_connections = parse_var(&lookup, "ADBOARD_MAX_CONNECTIONS", 5)?;

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            max_connections: args.max_connections.unwrap_or(env_max_connections),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", key, value)),
        Err(VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn defaults_apply_without_env_or_args() {
        let cfg = AppConfig::resolve(Args::default(), lookup_in(&[])).unwrap();
        assert_eq!(cfg.addr(), "0.0.0.0:8080");
        assert_eq!(cfg.database_url, "sqlite://./data/adboard.db");
        assert_eq!(cfg.max_connections, 5);
    }

    #[test]
    fn args_override_env() {
        let args = Args::parse_from(["adboard", "--port", "9000", "--host", "127.0.0.1"]);
        let cfg = AppConfig::resolve(
            args,
            lookup_in(&[("ADBOARD_PORT", "7000"), ("ADBOARD_MAX_CONNECTIONS", "2")]),
        )
        .unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:9000");
        assert_eq!(cfg.max_connections, 2);
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = AppConfig::resolve(Args::default(), lookup_in(&[("ADBOARD_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("ADBOARD_PORT"));
    }

    #[test]
    fn migrate_flag_is_parsed() {
        let args = Args::parse_from(["adboard", "--migrate"]);
        assert!(args.migrate);
    }
}
