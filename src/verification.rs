//! # Verification Methods
//!
//! A DID document can express verification methods, such as cryptographic
//! public keys, which can be used to authenticate or authorize interactions
//! with the DID subject or associated parties.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{Identified, VERIFICATION_METHOD};
use crate::error::{tracerr, Error};

/// A verification method bound to a DID document.
///
/// Key material and any other method-specific properties (for example
/// `publicKeyMultibase` or `publicKeyJwk`) are carried in `additional`
/// without interpretation.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// A DID URL that identifies the verification method.
    pub id: String,

    /// The type of verification method. SHOULD be a registered type in the
    /// [DID Specification Registries](https://www.w3.org/TR/did-spec-registries).
    #[serde(rename = "type")]
    pub type_: String,

    /// The DID of the controller of the verification method.
    pub controller: String,

    /// Method-specific properties, passed through unchanged.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Identified for VerificationMethod {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Builder for a verification method that is yet to be added to a document.
///
/// The controller is optional: when it is not set, the method is controlled
/// by the document it is added to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationMethodBuilder {
    id: String,
    method_type: String,
    controller: Option<String>,
    additional: Map<String, Value>,
}

impl VerificationMethodBuilder {
    /// Creates a new `VerificationMethodBuilder` with the given method ID and
    /// type.
    #[must_use]
    pub fn new(id: impl Into<String>, method_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method_type: method_type.into(),
            ..Self::default()
        }
    }

    /// Set the DID of the method's controller.
    #[must_use]
    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Add a method-specific property such as `publicKeyMultibase`.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    /// The ID of the method being built.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Build the verification method, defaulting the controller to `did`.
    pub(crate) fn build(self, did: &str) -> VerificationMethod {
        VerificationMethod {
            id: self.id,
            type_: self.method_type,
            controller: self.controller.unwrap_or_else(|| did.to_string()),
            additional: self.additional,
        }
    }
}

/// Accepts a JSON record of the form `{"id", "type", "controller"?, ...}`.
///
/// A `controller` that is missing or is not a string is ignored so the
/// document's own DID is used instead.
impl TryFrom<Value> for VerificationMethodBuilder {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| Error::InvalidEntry {
            set: VERIFICATION_METHOD.to_string(),
            reason: reason.to_string(),
        };

        let Value::Object(mut map) = value else {
            tracerr!(invalid("entry is not an object"));
        };
        let Some(Value::String(id)) = map.remove("id") else {
            tracerr!(invalid("`id` must be a string"));
        };
        let Some(Value::String(method_type)) = map.remove("type") else {
            tracerr!(invalid("`type` must be a string"));
        };
        let controller = match map.remove("controller") {
            Some(Value::String(controller)) => Some(controller),
            _ => None,
        };

        Ok(Self {
            id,
            method_type,
            controller,
            additional: map,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn controller_defaults_to_did() {
        let vm = VerificationMethodBuilder::new("did:example:123#key-0", "Ed25519VerificationKey2020")
            .build("did:example:123");
        assert_eq!(vm.controller, "did:example:123");

        let vm = VerificationMethodBuilder::new("did:example:123#key-1", "Multikey")
            .controller("did:example:456")
            .build("did:example:123");
        assert_eq!(vm.controller, "did:example:456");
    }

    #[test]
    fn extra_properties_flatten() {
        let vm = VerificationMethodBuilder::new("#key-0", "Multikey")
            .property("publicKeyMultibase", "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK")
            .build("did:example:123");

        let value = serde_json::to_value(&vm).expect("should serialize");
        assert_eq!(
            value,
            json!({
                "id": "#key-0",
                "type": "Multikey",
                "controller": "did:example:123",
                "publicKeyMultibase": "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"
            })
        );

        let back: VerificationMethod = serde_json::from_value(value).expect("should deserialize");
        assert_eq!(back, vm);
    }

    #[test]
    fn from_json_record() {
        let builder = VerificationMethodBuilder::try_from(json!({
            "id": "k1",
            "type": "Ed25519",
            "controller": 42,
            "publicKeyJwk": {"kty": "OKP", "crv": "Ed25519", "x": "abc"}
        }))
        .expect("should accept record");
        assert_eq!(builder.id(), "k1");

        let vm = builder.build("did:example:123");
        assert_eq!(vm.controller, "did:example:123");
        assert_eq!(vm.additional.get("publicKeyJwk"), Some(&json!({"kty": "OKP", "crv": "Ed25519", "x": "abc"})));
        assert!(!vm.additional.contains_key("controller"));
    }

    #[test]
    fn reject_malformed_record() {
        let subscriber = tracing_subscriber::fmt().with_max_level(tracing::Level::ERROR).finish();
        let result = tracing::subscriber::with_default(subscriber, || {
            VerificationMethodBuilder::try_from(json!({"id": "k1"}))
        });
        let Err(err) = result else {
            panic!("expected error");
        };
        assert_eq!(err.to_string(), "invalid verificationMethod entry: `type` must be a string");

        let Err(err) = VerificationMethodBuilder::try_from(json!("k1")) else {
            panic!("expected error");
        };
        assert_eq!(err.to_string(), "invalid verificationMethod entry: entry is not an object");
    }
}
