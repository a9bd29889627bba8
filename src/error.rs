use std::num::ParseIntError;

use thiserror::Error;

/// Failure of a `send_mail` call: the recipient being processed when the call aborted, and why.
///
/// Connection, authentication and delivery failures all surface through this one type.
/// Recipients earlier in the list may already have received the message.
#[derive(Debug, Error)]
#[error("failed to send email to {recipient}: {source}")]
pub struct MailError {
  recipient: String,
  #[source]
  source: SendError,
}

impl MailError {
  pub fn new(recipient: impl Into<String>, source: SendError) -> Self {
    MailError {
      recipient: recipient.into(),
      source,
    }
  }

  pub fn recipient(&self) -> &str {
    &self.recipient
  }

  pub fn cause(&self) -> &SendError {
    &self.source
  }

  pub fn into_cause(self) -> SendError {
    self.source
  }
}

#[derive(Debug, Error)]
pub enum SendError {
  #[error("invalid relay port {port:?}: {source}")]
  InvalidPort {
    port: String,
    #[source]
    source: ParseIntError,
  },
  #[error("invalid address {address:?}: {source}")]
  InvalidAddress {
    address: String,
    #[source]
    source: lettre::address::AddressError,
  },
  #[error("invalid envelope: {0}")]
  Envelope(#[from] lettre::error::Error),
  #[error(transparent)]
  Smtp(#[from] lettre::transport::smtp::Error),
}

impl SendError {
  /// True when the relay answered with a permanent (5xx) reply.
  pub fn is_permanent(&self) -> bool {
    match self {
      SendError::Smtp(err) => err.is_permanent(),
      _ => false,
    }
  }

  /// True when the relay answered with a transient (4xx) reply.
  pub fn is_transient(&self) -> bool {
    match self {
      SendError::Smtp(err) => err.is_transient(),
      _ => false,
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{0} environment variable must be set")]
  Missing(&'static str),
}
