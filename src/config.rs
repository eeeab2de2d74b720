use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub uploads_dir: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// "permissive" accepts any well-formed 6-digit code; "verifying"
    /// checks it against the code issued at login.
    pub two_factor_mode: TwoFactorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoFactorMode {
    Permissive,
    Verifying,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let two_factor_mode = match env::var("TWO_FACTOR_MODE").as_deref() {
            Ok("verifying") => TwoFactorMode::Verifying,
            Ok("permissive") | Err(_) => TwoFactorMode::Permissive,
            Ok(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for TWO_FACTOR_MODE: {}",
                    other
                )))
            }
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            db_max_connections: get_env_parse_or("DB_MAX_CONNECTIONS", 20)?,
            db_acquire_timeout_secs: get_env_parse_or("DB_ACQUIRE_TIMEOUT_SECS", 10)?,
            two_factor_mode,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
