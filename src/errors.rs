use thiserror::Error;

/// All errors that can occur in the Passwordy client.
#[derive(Debug, Error)]
pub enum PasswordyError {
    // --- HTTP errors ---
    #[error("Could not reach the vault server: {0}")]
    Transport(String),

    #[error("Not authenticated: {detail}")]
    Unauthorized { detail: String },

    #[error("Server returned {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    // --- Session errors ---
    #[error("Login was accepted but the session could not be confirmed")]
    NotAuthenticated,

    // --- Item errors ---
    #[error("Invalid item: {0}")]
    InvalidDraft(String),

    #[error("No item is open for editing")]
    NoOpenDraft,

    #[error("Item '{0}' not found")]
    ItemNotFound(String),

    #[error("'{0}' matches more than one item; use its id instead")]
    AmbiguousItem(String),

    // --- Clipboard errors ---
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl PasswordyError {
    /// The server-provided `detail` message, if this error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } | Self::Unauthorized { detail } if !detail.is_empty() => {
                Some(detail.as_str())
            }
            _ => None,
        }
    }

    /// HTTP status code, for errors that came back from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}

/// Convenience type alias for Passwordy results.
pub type Result<T> = std::result::Result<T, PasswordyError>;
