//! Newtype identifiers and credentials.
//!
//! Asana identifies every object by a string "gid". Wrapping it prevents a
//! task gid from being passed where, say, a raw path segment is expected, and
//! wrapping the access token keeps it out of `Debug` output.

use serde::{Deserialize, Serialize};

use crate::ClientError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped gid newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! gid {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is blank.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    None
                } else if trimmed.len() == v.len() {
                    Some(Self(v))
                } else {
                    Some(Self(trimmed.to_owned()))
                }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

gid! {
    /// Global identifier of an Asana task (e.g. `"1204567890123456"`).
    TaskGid
}

gid! {
    /// Global identifier of the workspace or organization a task is created in.
    WorkspaceGid
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A bearer credential (typically a Personal Access Token).
///
/// Construction rejects empty and whitespace-only values, so holding an
/// `AccessToken` means the token passed validation. The value never appears
/// in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates and wraps a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] naming `access_token` if the
    /// value is empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ClientError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ClientError::invalid_argument(
                "access_token",
                "Access token cannot be empty or whitespace",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw token text.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
