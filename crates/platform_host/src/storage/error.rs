//! Error taxonomy for key/value storage.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Recoverable failures reported by key/value stores and [`super::PersistedValue`].
pub enum StorageError {
    /// Stored text is not JSON, or does not deserialize into the requested type.
    #[error("stored value for `{key}` could not be parsed: {message}")]
    Parse {
        /// Slot the text was read from.
        key: String,
        /// Deserializer message.
        message: String,
    },
    /// The value could not be encoded as JSON.
    #[error("value for `{key}` could not be serialized: {message}")]
    Serialize {
        /// Slot the value was destined for.
        key: String,
        /// Serializer message.
        message: String,
    },
    /// The backend rejected a write (quota exceeded, security policy, disabled storage).
    #[error("storage rejected write to `{key}`: {message}")]
    Write {
        /// Slot that was being written.
        key: String,
        /// Backend message.
        message: String,
    },
    /// The backend failed to read a slot.
    #[error("storage read of `{key}` failed: {message}")]
    Read {
        /// Slot that was being read.
        key: String,
        /// Backend message.
        message: String,
    },
    /// The facility itself cannot be reached in this environment.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Coarse classification of a [`StorageError`].
pub enum StorageErrorKind {
    /// Reading or decoding persisted text failed.
    Parse,
    /// Encoding or persisting a value failed.
    Write,
    /// The facility is not reachable.
    Access,
}

impl StorageError {
    /// Builds a [`StorageError::Parse`] for `key`.
    pub fn parse(key: &str, message: impl ToString) -> Self {
        Self::Parse {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Builds a [`StorageError::Serialize`] for `key`.
    pub fn serialize(key: &str, message: impl ToString) -> Self {
        Self::Serialize {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Builds a [`StorageError::Write`] for `key`.
    pub fn write(key: &str, message: impl ToString) -> Self {
        Self::Write {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Builds a [`StorageError::Read`] for `key`.
    pub fn read(key: &str, message: impl ToString) -> Self {
        Self::Read {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns the coarse error class.
    ///
    /// Store read failures count as parse-side errors: both mean the persisted value could not
    /// be used and the initial value was taken instead.
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            Self::Parse { .. } | Self::Read { .. } => StorageErrorKind::Parse,
            Self::Serialize { .. } | Self::Write { .. } => StorageErrorKind::Write,
            Self::Unavailable(_) => StorageErrorKind::Access,
        }
    }

    /// Slot the error relates to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Parse { key, .. }
            | Self::Serialize { key, .. }
            | Self::Write { key, .. }
            | Self::Read { key, .. } => Some(key),
            Self::Unavailable(_) => None,
        }
    }
}
