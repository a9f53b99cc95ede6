//! # DID Document Errors
//!
//! Errors raised when mutating a DID document. Construction and validation
//! never fail, so every variant here comes from inserting into one of the
//! document's sets.

use thiserror::Error;

/// Log an error with `tracing` and return it from the enclosing function.
///
/// # Example
/// ```ignore
/// fn insert(id: &str) -> Result<()> {
///     tracerr!(Error::NotASet(id.to_string()))
/// }
/// ```
macro_rules! tracerr {
    ($err:expr) => {{
        let err = $err;
        tracing::error!("{err}");
        return Err(err);
    }};
}
pub(crate) use tracerr;

/// Errors returned by DID document set operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An entry with the same `id` already exists in the named set. The
    /// document is left unchanged.
    #[error("item with id '{id}' already exists in this document's {set}")]
    DuplicateId {
        /// The colliding identifier.
        id: String,

        /// Name of the set the insertion targeted.
        set: String,
    },

    /// The named top-level field exists but is not a set that entries can be
    /// appended to.
    #[error("document field '{0}' is not a set")]
    NotASet(String),

    /// The entry does not have the shape required by the named set.
    #[error("invalid {set} entry: {reason}")]
    InvalidEntry {
        /// Name of the set the insertion targeted.
        set: String,

        /// Why the entry was rejected.
        reason: String,
    },
}

impl Error {
    /// Stable, machine-readable code for the error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "duplicate_id",
            Self::NotASet(_) => "not_a_set",
            Self::InvalidEntry { .. } => "invalid_entry",
        }
    }

    /// Transfer the error to `OAuth2` compatible format.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.code(),
            "error_description": self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use super::*;
    use crate::Result;

    #[test]
    fn duplicate_message() {
        let err = Error::DuplicateId {
            id: "k1".to_string(),
            set: "verificationMethod".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "item with id 'k1' already exists in this document's verificationMethod"
        );
    }

    #[test]
    fn json_err() {
        let err = Error::NotASet("alsoKnownAs".to_string());
        assert_eq!(
            err.to_json(),
            json!({"error": "not_a_set", "error_description": "document field 'alsoKnownAs' is not a set"})
        );
    }

    #[test]
    fn test_macro() {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::ERROR).finish();
        let Err(e) = tracing::subscriber::with_default(subscriber, run_macro) else {
            panic!("expected error");
        };

        assert_eq!(e.code(), "invalid_entry");
        assert_eq!(e.to_string(), "invalid service entry: test me");
    }

    fn run_macro() -> Result<()> {
        tracerr!(Error::InvalidEntry {
            set: "service".to_string(),
            reason: "test me".to_string(),
        })
    }
}
