//! # Validation
//!
//! Structural checks for untrusted input claiming to be a DID document.
//!
//! Validation is a predicate: it never fails, it only answers whether the
//! candidate has the shape of a DID document. [`check_document`] additionally
//! reports the first check that did not hold.
//!
//! The `@context` field is never inspected, and `serviceEndpoint` is only
//! required to be a string, an object, an array or `null` (the contents of an
//! array are not checked).

use std::fmt::{self, Display, Formatter};

use serde_json::{Map, Value};

use crate::document::{SERVICE, VERIFICATION_METHOD};

/// The first structural check a candidate document failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// The candidate is not a JSON object.
    NotAnObject,

    /// `id` is missing or is not a string.
    InvalidId,

    /// `alsoKnownAs` is neither a string nor an array.
    InvalidAlsoKnownAs,

    /// `controller` is neither a string nor an array.
    InvalidController,

    /// `verificationMethod` is not an array.
    VerificationMethodsNotArray,

    /// The verification method at `index` is not an object with string `id`,
    /// `type` and `controller` fields.
    InvalidVerificationMethod {
        /// Position of the offending entry.
        index: usize,
    },

    /// `service` is not an array.
    ServicesNotArray,

    /// The service at `index` is not an object with string `id` and `type`
    /// fields and a string, object, array or `null` `serviceEndpoint`.
    InvalidService {
        /// Position of the offending entry.
        index: usize,
    },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "document is not an object"),
            Self::InvalidId => write!(f, "`id` must be a string"),
            Self::InvalidAlsoKnownAs => write!(f, "`alsoKnownAs` must be a string or an array"),
            Self::InvalidController => write!(f, "`controller` must be a string or an array"),
            Self::VerificationMethodsNotArray => write!(f, "`{VERIFICATION_METHOD}` must be an array"),
            Self::InvalidVerificationMethod { index } => {
                write!(f, "`{VERIFICATION_METHOD}[{index}]` is not a valid verification method")
            }
            Self::ServicesNotArray => write!(f, "`{SERVICE}` must be an array"),
            Self::InvalidService { index } => write!(f, "`{SERVICE}[{index}]` is not a valid service"),
        }
    }
}

/// Returns `true` if `candidate` has the structure of a DID document.
#[must_use]
pub fn is_valid_document(candidate: &Value) -> bool {
    match check_document(candidate) {
        Ok(()) => true,
        Err(violation) => {
            tracing::debug!("invalid DID document: {violation}");
            false
        }
    }
}

/// Check `candidate` has the structure of a DID document, reporting the first
/// failed check.
///
/// # Errors
///
/// Returns the [`Violation`] describing the first check that failed. Checks
/// run in order: object, `id`, `alsoKnownAs`, `controller`,
/// `verificationMethod`, `service`.
pub fn check_document(candidate: &Value) -> Result<(), Violation> {
    let Value::Object(doc) = candidate else {
        return Err(Violation::NotAnObject);
    };

    if !doc.get("id").is_some_and(Value::is_string) {
        return Err(Violation::InvalidId);
    }
    if !doc.get("alsoKnownAs").map_or(true, is_string_or_array) {
        return Err(Violation::InvalidAlsoKnownAs);
    }
    if !doc.get("controller").map_or(true, is_string_or_array) {
        return Err(Violation::InvalidController);
    }

    if let Some(methods) = doc.get(VERIFICATION_METHOD) {
        let Value::Array(methods) = methods else {
            return Err(Violation::VerificationMethodsNotArray);
        };
        if let Some(index) = methods.iter().position(|vm| !is_verification_method(vm)) {
            return Err(Violation::InvalidVerificationMethod { index });
        }
    }

    if let Some(services) = doc.get(SERVICE) {
        let Value::Array(services) = services else {
            return Err(Violation::ServicesNotArray);
        };
        if let Some(index) = services.iter().position(|s| !is_service(s)) {
            return Err(Violation::InvalidService { index });
        }
    }

    Ok(())
}

const fn is_string_or_array(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Array(_))
}

fn has_strings(entry: &Map<String, Value>, fields: &[&str]) -> bool {
    fields.iter().all(|f| entry.get(*f).is_some_and(Value::is_string))
}

pub(crate) fn is_verification_method(entry: &Value) -> bool {
    let Value::Object(vm) = entry else {
        return false;
    };
    has_strings(vm, &["id", "type", "controller"])
}

// Arrays and `null` count as objects here, so `serviceEndpoint` arrays are
// accepted whatever they contain.
pub(crate) fn is_service(entry: &Value) -> bool {
    let Value::Object(service) = entry else {
        return false;
    };
    has_strings(service, &["id", "type"])
        && matches!(
            service.get("serviceEndpoint"),
            Some(Value::String(_) | Value::Object(_) | Value::Array(_) | Value::Null)
        )
}
