//! User-facing notices for failed operations.
//!
//! Operations return `Result`; front ends turn a failure into a `Notice`
//! with `Notice::for_failure` and hand it to a `Notifier`. Which kind of
//! notice an operation produces is fixed here, so every front end reports
//! failures the same way.

use crate::errors::PasswordyError;

/// Fallback message when the server gives no reason for a failed login.
pub const LOGIN_FAILED: &str = "Login failed. Check your credentials.";

/// Operations that can fail in front of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Logout,
    FetchItems,
    Save,
    Delete,
    Reveal,
    Copy,
}

/// How a failure is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Message attached to one form field.
    FieldError { field: &'static str, message: String },
    /// Message the user has to acknowledge.
    Alert(String),
    /// Not shown; written to the log only.
    Logged(String),
}

impl Notice {
    /// Classify a failure of `op`.
    ///
    /// Network, validation and authorization failures are not told apart
    /// in the message, except that a login shows the server's reason when
    /// it sent one.
    pub fn for_failure(op: Operation, err: &PasswordyError) -> Self {
        match op {
            Operation::Login => Notice::FieldError {
                field: "password",
                message: err.detail().unwrap_or(LOGIN_FAILED).to_string(),
            },
            Operation::FetchItems => Notice::Logged(format!("Failed to fetch items: {err}")),
            Operation::Save => Notice::Alert("Operation failed".into()),
            Operation::Delete => Notice::Alert("Delete failed".into()),
            Operation::Reveal => Notice::Alert("Failed to reveal password".into()),
            Operation::Copy => Notice::Alert("Failed to copy password".into()),
            Operation::Logout => Notice::Alert("Logout failed".into()),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::FieldError { message, .. } => message,
            Notice::Alert(message) | Notice::Logged(message) => message,
        }
    }
}

/// Receives notices.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);

    /// Classify `err` for `op` and deliver it.
    fn failure(&mut self, op: Operation, err: &PasswordyError) {
        self.notify(Notice::for_failure(op, err));
    }
}

/// Collects notices in order.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}
