use std::fmt;

use serde::{Deserialize, Serialize};

/// Relay connection parameters and credentials.
///
/// Built once at startup and never mutated afterwards; a [`Mailer`](super::Mailer) shares it
/// read-only between every call.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct MailerConfig {
  pub host: String,
  pub port: String,
  pub username: String,
  pub password: String,
  pub from: String,
}

impl MailerConfig {
  pub fn new(
    host: impl Into<String>,
    port: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    from: impl Into<String>,
  ) -> Self {
    MailerConfig {
      host: host.into(),
      port: port.into(),
      username: username.into(),
      password: password.into(),
      from: from.into(),
    }
  }

  /// Dial address of the relay, `host:port`.
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

impl fmt::Debug for MailerConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MailerConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("from", &self.from)
      .finish()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
  pub to: Vec<String>,
  pub subject: String,
  pub body: String,
}

impl MailMessage {
  pub fn new(to: Vec<String>, subject: String, body: String) -> Self {
    MailMessage { to, subject, body }
  }
}

/// Renders the payload transmitted to a single recipient.
///
/// Only `From`, `To` and `Subject` headers are written, each CRLF terminated, followed by a blank
/// line and the body. Bare `\n` line breaks become `\r\n`, so every line the relay sees is CRLF
/// terminated and a line-leading `.` is always dot-stuffed in transit.
pub fn render_message(from: &str, recipient: &str, subject: &str, body: &str) -> String {
  normalize_line_breaks(&format!(
    "From: {}\r\nTo: {}\r\nSubject: {}\r\n\r\n{}\r\n",
    from, recipient, subject, body
  ))
}

fn normalize_line_breaks(text: &str) -> String {
  let mut normalized = String::with_capacity(text.len());
  let mut previous = None;
  for c in text.chars() {
    if c == '\n' && previous != Some('\r') {
      normalized.push('\r');
    }
    normalized.push(c);
    previous = Some(c);
  }
  normalized
}
