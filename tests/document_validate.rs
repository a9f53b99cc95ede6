//! Tests for structural validation of untrusted DID document input.

use did_document::{check_document, is_valid_document, Violation};
use serde_json::json;

#[test]
fn rejects_non_documents() {
    assert!(!is_valid_document(&json!("x")));
    assert!(!is_valid_document(&json!(5)));
    assert!(!is_valid_document(&json!([{"id": "did:example:123"}])));
    assert!(!is_valid_document(&json!({})));
    assert!(!is_valid_document(&json!({"id": 5})));
    assert!(!is_valid_document(&json!({"id": "a", "verificationMethod": [{"id": "x"}]})));
}

#[test]
fn accepts_minimal_service() {
    let doc = json!({
        "id": "did:x",
        "service": [{"id": "s1", "type": "T", "serviceEndpoint": "https://e"}]
    });
    assert!(is_valid_document(&doc));
}

// The context is never inspected.
#[test]
fn context_is_ignored() {
    for context in [json!(null), json!(1), json!({"@vocab": "x"}), json!("https://www.w3.org/ns/did/v1")] {
        assert!(is_valid_document(&json!({"@context": context, "id": "did:x"})));
    }
}

#[test]
fn string_or_array_fields() {
    assert!(is_valid_document(&json!({"id": "did:x", "alsoKnownAs": "https://e"})));
    assert!(is_valid_document(&json!({"id": "did:x", "alsoKnownAs": [1, 2]})));
    assert!(is_valid_document(&json!({"id": "did:x", "controller": ["did:y", "did:z"]})));

    assert_eq!(
        check_document(&json!({"id": "did:x", "alsoKnownAs": {"a": 1}})),
        Err(Violation::InvalidAlsoKnownAs)
    );
    assert_eq!(
        check_document(&json!({"id": "did:x", "controller": true})),
        Err(Violation::InvalidController)
    );
}

#[test]
fn sets_must_be_arrays() {
    assert_eq!(
        check_document(&json!({"id": "did:x", "verificationMethod": {"id": "k"}})),
        Err(Violation::VerificationMethodsNotArray)
    );
    assert_eq!(
        check_document(&json!({"id": "did:x", "service": "https://e"})),
        Err(Violation::ServicesNotArray)
    );
    assert!(is_valid_document(&json!({"id": "did:x", "verificationMethod": [], "service": []})));
}

// Endpoints may be strings, maps or arrays of anything.
#[test]
fn service_endpoint_shapes() {
    for endpoint in [
        json!("https://e"),
        json!({"origins": ["https://e"]}),
        json!(["https://e", {"uri": "https://f"}]),
        json!([42]),
        json!(null),
    ] {
        let doc = json!({
            "id": "did:x",
            "service": [{"id": "s1", "type": "T", "serviceEndpoint": endpoint}]
        });
        assert!(is_valid_document(&doc), "endpoint should be accepted: {endpoint}");
    }

    let missing = json!({"id": "did:x", "service": [{"id": "s1", "type": "T"}]});
    assert_eq!(check_document(&missing), Err(Violation::InvalidService { index: 0 }));
}

// Unrecognized fields are passed through.
#[test]
fn extra_fields() {
    let doc = json!({
        "id": "did:x",
        "verificationMethod": [{
            "id": "#k0",
            "type": "JsonWebKey2020",
            "controller": "did:x",
            "publicKeyJwk": {"kty": "OKP", "crv": "Ed25519", "x": "abc"}
        }],
        "linkedResource": 7
    });
    assert_eq!(check_document(&doc), Ok(()));
}
