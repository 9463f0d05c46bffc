//! Order notifications by email.

pub mod dispatcher;
pub mod mailer;
pub mod templates;

pub use dispatcher::{MockNotifier, NotificationDispatcher, NotificationError, Notifier, OperatorContact};
pub use mailer::{Email, Mailer, MailerError, MockMailer, SmtpMailer, SmtpSettings};
