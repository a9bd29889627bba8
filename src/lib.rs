pub mod config;
pub mod error;
pub mod mail;

pub use error::{ConfigError, MailError, SendError};
pub use mail::{render_message, MailMessage, Mailer, MailerConfig};
