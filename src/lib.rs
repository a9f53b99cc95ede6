//! # DID Document
//!
//! Types and functions for building, validating and extending Decentralized
//! Identifier (DID) Documents in memory.
//!
//! The crate does not resolve DIDs, implement DID methods or verify
//! signatures. It provides the document model those operations work on.
//!
//! See [Decentralized Identifiers (DIDs) v1.0](https://www.w3.org/TR/did-1.0/)
//! for more information.
//!
//! # Example
//!
//! ```
//! use did_document::{is_valid_document, Document, VerificationMethodBuilder};
//!
//! let mut doc = Document::new("did:example:123");
//! doc.add_verification_method(VerificationMethodBuilder::new("#key-0", "Multikey"))
//!     .expect("should add method");
//!
//! let json = serde_json::to_value(&doc).expect("should serialize");
//! assert!(is_valid_document(&json));
//! assert_eq!(json["verificationMethod"][0]["controller"], "did:example:123");
//! ```

pub mod core;
mod document;
pub mod error;
mod service;
mod validate;
mod verification;

pub use self::core::{Kind, OneMany};
pub use self::document::*;
pub use self::error::Error;
pub use self::service::*;
pub use self::validate::*;
pub use self::verification::*;

/// Result type for DID document operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
