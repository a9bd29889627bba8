//! Outbound notification mail.
//!
//! A [`Mailer`] authenticates to an SMTP relay with the PLAIN mechanism and delivers one message
//! per recipient, stopping at the first recipient that fails.

mod service;
mod types;

pub use service::Mailer;
pub use types::{render_message, MailMessage, MailerConfig};
