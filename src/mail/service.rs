use std::sync::Arc;

use lettre::{
  address::{Address, Envelope},
  transport::smtp::{
    authentication::{Credentials, Mechanism},
    client::{Tls, TlsParameters},
  },
  AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};

use crate::error::{ConfigError, MailError, SendError};
use crate::mail::types::{render_message, MailMessage, MailerConfig};

/// Delivers a message to each recipient over its own authenticated SMTP session.
///
/// Cloning is cheap; clones share the same immutable [`MailerConfig`].
#[derive(Debug, Clone)]
pub struct Mailer {
  config: Arc<MailerConfig>,
}

impl Mailer {
  /// Stores the relay settings. Nothing is validated or dialed until a send is attempted.
  pub fn new(
    host: impl Into<String>,
    port: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    from: impl Into<String>,
  ) -> Self {
    Self::from_config(MailerConfig::new(host, port, username, password, from))
  }

  pub fn from_config(config: MailerConfig) -> Self {
    Mailer {
      config: Arc::new(config),
    }
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    MailerConfig::from_env().map(Self::from_config)
  }

  pub fn config(&self) -> &MailerConfig {
    &self.config
  }

  /// Sends `subject` and `body` to every address in `to`, in order, one SMTP transaction each.
  ///
  /// The first failing recipient aborts the call; later recipients are not attempted and the
  /// returned error names the failing one. An empty list succeeds without touching the network.
  pub async fn send_mail<S: AsRef<str>>(&self, to: &[S], subject: &str, body: &str) -> Result<(), MailError> {
    let Some(first) = to.first() else {
      tracing::debug!("No recipients given, nothing to send");
      return Ok(());
    };

    tracing::info!(
      relay = %self.config.address(),
      recipients = to.len(),
      "Sending mail \"{}\"",
      subject
    );

    let transport = self
      .transport()
      .map_err(|err| self.abort(first.as_ref(), 0, err))?;

    for (index, recipient) in to.iter().enumerate() {
      let recipient = recipient.as_ref();
      self
        .deliver(&transport, recipient, subject, body)
        .await
        .map_err(|err| self.abort(recipient, index, err))?;
      tracing::debug!(recipient, "Mail delivered");
    }

    tracing::info!(recipients = to.len(), "All mail delivered");
    Ok(())
  }

  pub async fn send_message(&self, message: &MailMessage) -> Result<(), MailError> {
    self.send_mail(message.to.as_slice(), &message.subject, &message.body).await
  }

  /// Builds the per-call transport. Without pooling every send dials, authenticates and quits
  /// on its own connection. Remote relays must offer STARTTLS; local ones may stay plaintext.
  fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, SendError> {
    let port = self.config.port.parse::<u16>().map_err(|source| SendError::InvalidPort {
      port: self.config.port.clone(),
      source,
    })?;
    let credentials = Credentials::new(self.config.username.clone(), self.config.password.clone());
    let tls = TlsParameters::new(self.config.host.clone())?;
    // PLAIN credentials only cross an unencrypted connection when the relay is on this machine.
    let tls = if is_localhost(&self.config.host) {
      Tls::Opportunistic(tls)
    } else {
      Tls::Required(tls)
    };

    Ok(
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.config.host.as_str())
        .port(port)
        .tls(tls)
        .credentials(credentials)
        .authentication(vec![Mechanism::Plain])
        .timeout(None)
        .build(),
    )
  }

  async fn deliver(
    &self,
    transport: &AsyncSmtpTransport<Tokio1Executor>,
    recipient: &str,
    subject: &str,
    body: &str,
  ) -> Result<(), SendError> {
    let from = parse_address(&self.config.from)?;
    let to = parse_address(recipient)?;
    let envelope = Envelope::new(Some(from), vec![to])?;
    let message = render_message(&self.config.from, recipient, subject, body);
    // The DATA terminator lettre appends ("\r\n.\r\n") carries the final line break.
    let data = message.strip_suffix("\r\n").unwrap_or(&message);

    transport.send_raw(&envelope, data.as_bytes()).await?;
    Ok(())
  }

  fn abort(&self, recipient: &str, index: usize, err: SendError) -> MailError {
    tracing::warn!(recipient, index, "Aborting mail delivery: {}", err);
    MailError::new(recipient, err)
  }
}

fn is_localhost(host: &str) -> bool {
  matches!(host, "localhost" | "127.0.0.1" | "::1")
}

fn parse_address(address: &str) -> Result<Address, SendError> {
  address.parse::<Address>().map_err(|source| SendError::InvalidAddress {
    address: address.to_string(),
    source,
  })
}
