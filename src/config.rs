use std::env;

use crate::{error::ConfigError, mail::MailerConfig};

pub const SMTP_HOST: &str = "SMTP_HOST";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_USER: &str = "SMTP_USER";
pub const SMTP_PASS: &str = "SMTP_PASS";
pub const FROM_EMAIL: &str = "FROM_EMAIL";

pub const DEFAULT_SMTP_PORT: &str = "587";

impl MailerConfig {
  /// Reads the relay settings from the process environment, after loading `.env` if present.
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Same as [`MailerConfig::from_env`] but resolves variables through `lookup`.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&'static str) -> Option<String>,
  {
    let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

    Ok(MailerConfig {
      host: required(SMTP_HOST)?,
      port: lookup(SMTP_PORT).unwrap_or_else(|| DEFAULT_SMTP_PORT.to_string()),
      username: required(SMTP_USER)?,
      password: required(SMTP_PASS)?,
      from: required(FROM_EMAIL)?,
    })
  }
}
