//! # DID Document
//!
//! A DID Document is a JSON-LD document that contains information related to a
//! DID.
//!
//! Documents are created from a DID and an optional bag of initial values,
//! then extended in place by adding entries to the document's sets
//! (`verificationMethod`, `service`, or any caller-chosen extension field).
//! Entries are never removed or replaced, and an entry whose `id` is already
//! present in the target set is rejected.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::core::OneMany;
use crate::error::{tracerr, Error};
use crate::service::Service;
use crate::validate::{is_service, is_verification_method};
use crate::verification::{VerificationMethod, VerificationMethodBuilder};
use crate::Result;

/// The DID core JSON-LD context.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// JSON name of the verification method set.
pub const VERIFICATION_METHOD: &str = "verificationMethod";

/// JSON name of the service set.
pub const SERVICE: &str = "service";

// Top-level fields that hold scalar values rather than sets of entries.
const RESERVED: [&str; 4] = ["@context", "id", "alsoKnownAs", "controller"];

/// DID Document
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The JSON-LD context of the DID document. Typically [`DID_CONTEXT`].
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<OneMany<String>>,

    /// The DID for a particular DID subject.
    ///
    /// The subject is defined as the entity identified by the DID and described
    /// by the DID document. Anything can be a DID subject: person, group,
    /// organization, physical thing, digital thing, logical thing, etc.
    pub id: String,

    /// A set of URIs that are other identifiers for the subject of the above
    /// DID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_known_as: Option<Vec<String>>,

    /// One or more DIDs of entities authorized to make changes to the
    /// document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<OneMany<String>>,

    /// If set, MUST be a set of verification methods for the DID subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethod>>,

    /// A set of services, that express ways of communicating with the DID
    /// subject or related entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Service>>,

    /// Any other top-level fields. Passed through without interpretation.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Document {
    /// Create a document holding only the given DID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Create a document from a DID and a bag of initial values.
    ///
    /// Options that are empty (see [`DocumentOptions`]) are left out of the
    /// document altogether. Option values are moved into the document, so the
    /// document never shares data with the caller.
    #[must_use]
    pub fn with_options(id: impl Into<String>, options: DocumentOptions) -> Self {
        let options = options.normalize();
        Self {
            context: options.context,
            id: id.into(),
            also_known_as: options.also_known_as,
            controller: options.controller,
            verification_method: options.verification_method,
            service: options.service,
            additional: Map::new(),
        }
    }

    /// Retrieve a service by its ID.
    #[must_use]
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.service.as_ref()?.iter().find(|s| s.id == id)
    }

    /// Retrieve a verification method by its ID.
    #[must_use]
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.as_ref()?.iter().find(|vm| vm.id == id)
    }

    /// Add a verification method to the document.
    ///
    /// If the method has no controller, the document's own DID is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if a verification method with the same
    /// ID already exists. The document is left unchanged.
    pub fn add_verification_method(&mut self, method: VerificationMethodBuilder) -> Result<()> {
        let vm = method.build(&self.id);
        insert_unique(&mut self.verification_method, vm, VERIFICATION_METHOD)
    }

    /// Add a service to the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if a service with the same ID already
    /// exists. The document is left unchanged.
    pub fn add_service(&mut self, service: Service) -> Result<()> {
        insert_unique(&mut self.service, service, SERVICE)
    }

    /// Append `item` to the top-level set named `set`, creating the set if it
    /// does not exist yet.
    ///
    /// `verificationMethod` and `service` entries must have the shape of a
    /// [`VerificationMethod`] or [`Service`]. Any other (non-reserved) name
    /// is treated as an extension set held in [`Document::additional`].
    ///
    /// # Errors
    ///
    /// All errors leave the document unchanged.
    ///
    /// - [`Error::DuplicateId`] if an entry with the same `id` as `item`
    ///   already exists in the set.
    /// - [`Error::NotASet`] if `set` names a scalar field (`@context`, `id`,
    ///   `alsoKnownAs`, `controller`) or an extension field that is not an
    ///   array.
    /// - [`Error::InvalidEntry`] if `item` does not fit a typed set.
    pub fn add_to_set(&mut self, set: &str, item: Value) -> Result<()> {
        match set.parse::<SetName>()? {
            SetName::VerificationMethod => {
                let vm = typed_entry(item, VERIFICATION_METHOD)?;
                insert_unique(&mut self.verification_method, vm, VERIFICATION_METHOD)
            }
            SetName::Service => {
                if !is_service(&item) {
                    tracerr!(Error::InvalidEntry {
                        set: SERVICE.to_string(),
                        reason: "`serviceEndpoint` must be a string, object, array or null"
                            .to_string(),
                    });
                }
                let service = typed_entry(item, SERVICE)?;
                insert_unique(&mut self.service, service, SERVICE)
            }
            SetName::Extension(name) => match self.additional.entry(name.clone()) {
                Entry::Vacant(vacant) => {
                    tracing::debug!("creating set {name}");
                    vacant.insert(Value::Array(vec![item]));
                    Ok(())
                }
                Entry::Occupied(mut occupied) => {
                    let Value::Array(entries) = occupied.get_mut() else {
                        tracerr!(Error::NotASet(name));
                    };
                    check_unique_value(entries, &item, &name)?;
                    tracing::debug!("adding entry to {name}");
                    entries.push(item);
                    Ok(())
                }
            },
        }
    }
}

/// A typed set entry. Identifiers must be unique within their set.
pub trait Identified {
    /// The entry's identifier.
    fn id(&self) -> &str;
}

/// The top-level sets of a DID document that entries can be added to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetName {
    /// `verificationMethod`
    VerificationMethod,

    /// `service`
    Service,

    /// Any other caller-chosen field.
    Extension(String),
}

impl FromStr for SetName {
    type Err = Error;

    /// Map a top-level field name to its set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotASet`] for the scalar fields `@context`, `id`,
    /// `alsoKnownAs` and `controller`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            VERIFICATION_METHOD => Ok(Self::VerificationMethod),
            SERVICE => Ok(Self::Service),
            _ if RESERVED.contains(&s) => tracerr!(Error::NotASet(s.to_string())),
            _ => Ok(Self::Extension(s.to_string())),
        }
    }
}

impl Display for SetName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerificationMethod => write!(f, "{VERIFICATION_METHOD}"),
            Self::Service => write!(f, "{SERVICE}"),
            Self::Extension(name) => write!(f, "{name}"),
        }
    }
}

fn typed_entry<T: for<'de> Deserialize<'de>>(item: Value, set: &str) -> Result<T> {
    match serde_json::from_value(item) {
        Ok(entry) => Ok(entry),
        Err(e) => tracerr!(Error::InvalidEntry {
            set: set.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn check_unique<T: Identified>(entries: &[T], item: &T, set: &str) -> Result<()> {
    let id = item.id();
    if entries.iter().any(|e| e.id() == id) {
        tracerr!(Error::DuplicateId {
            id: id.to_string(),
            set: set.to_string(),
        });
    }
    Ok(())
}

// Extension entries take part only when both sides are objects with an `id`,
// which may be any JSON value.
fn check_unique_value(entries: &[Value], item: &Value, set: &str) -> Result<()> {
    let Some(id) = item.get("id") else {
        return Ok(());
    };
    if entries.iter().any(|e| e.get("id") == Some(id)) {
        let id = id.as_str().map_or_else(|| id.to_string(), str::to_string);
        tracerr!(Error::DuplicateId {
            id,
            set: set.to_string(),
        });
    }
    Ok(())
}

fn insert_unique<T: Identified>(entries: &mut Option<Vec<T>>, item: T, set: &str) -> Result<()> {
    if let Some(existing) = entries.as_ref() {
        check_unique(existing, &item, set)?;
    }
    tracing::debug!("adding entry to {set}");
    entries.get_or_insert_with(Vec::new).push(item);
    Ok(())
}

/// Initial values for a new [`Document`].
///
/// An option is treated as absent when it is `None` or, for the string-valued
/// options, a single empty string. Empty lists are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    /// JSON-LD context.
    pub context: Option<OneMany<String>>,

    /// Other identifiers for the subject.
    pub also_known_as: Option<Vec<String>>,

    /// DIDs of the document's controllers.
    pub controller: Option<OneMany<String>>,

    /// Initial verification methods.
    pub verification_method: Option<Vec<VerificationMethod>>,

    /// Initial services.
    pub service: Option<Vec<Service>>,
}

impl DocumentOptions {
    /// Parse options from an untrusted JSON value.
    ///
    /// Parsing never fails: anything other than a JSON object yields empty
    /// options, and a recognized field whose value has the wrong shape is
    /// treated as absent. The context may be given as `@context` or
    /// `context`; a single string given for `alsoKnownAs` becomes a
    /// one-element list. Unrecognized fields are ignored.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            tracing::debug!("options are not an object, ignoring");
            return Self::default();
        };

        let also_known_as = match map.get("alsoKnownAs") {
            Some(Value::String(aka)) if aka.is_empty() => None,
            Some(Value::String(aka)) => Some(vec![aka.clone()]),
            aka => field(aka),
        };

        Self {
            context: field(map.get("@context").or_else(|| map.get("context"))),
            also_known_as,
            controller: field(map.get("controller")),
            verification_method: field(set_of(map, VERIFICATION_METHOD, is_verification_method)),
            service: field(set_of(map, SERVICE, is_service)),
        }
        .normalize()
    }

    // Drop options that carry no value.
    fn normalize(self) -> Self {
        Self {
            context: self.context.filter(is_present),
            controller: self.controller.filter(is_present),
            ..self
        }
    }
}

fn is_present(value: &OneMany<String>) -> bool {
    !matches!(value, OneMany::One(s) if s.is_empty())
}

// A set option is usable only when every entry has the shape the document
// check requires.
fn set_of<'a>(
    map: &'a Map<String, Value>, key: &str, is_entry: fn(&Value) -> bool,
) -> Option<&'a Value> {
    let value = map.get(key)?;
    if value.as_array()?.iter().all(is_entry) {
        Some(value)
    } else {
        tracing::debug!("ignoring malformed option: {key}");
        None
    }
}

fn field<T: for<'de> Deserialize<'de>>(value: Option<&Value>) -> Option<T> {
    let value = value?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("ignoring malformed option: {e}");
            None
        }
    }
}

/// DID Document builder.
///
/// Verification methods and services are added with the same uniqueness
/// rules as [`Document::add_verification_method`] and
/// [`Document::add_service`].
#[derive(Default)]
pub struct DocumentBuilder {
    id: String,
    options: DocumentOptions,
    verification_methods: Vec<VerificationMethodBuilder>,
    services: Vec<Service>,
}

impl DocumentBuilder {
    /// Creates a new `DocumentBuilder` for the given DID.
    #[must_use]
    pub fn new(did: impl Into<String>) -> Self {
        Self {
            id: did.into(),
            ..Self::default()
        }
    }

    /// Add a context.
    ///
    /// Chain to add multiple contexts.
    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        add_one(&mut self.options.context, context.into());
        self
    }

    /// Add an also-known-as identifier.
    #[must_use]
    pub fn also_known_as(mut self, aka: impl Into<String>) -> Self {
        self.options.also_known_as.get_or_insert_with(Vec::new).push(aka.into());
        self
    }

    /// Add a controller.
    ///
    /// Chain to add multiple controllers.
    #[must_use]
    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        add_one(&mut self.options.controller, controller.into());
        self
    }

    /// Add a verification method.
    ///
    /// Chain to add multiple verification methods.
    #[must_use]
    pub fn verification_method(mut self, vm: VerificationMethodBuilder) -> Self {
        self.verification_methods.push(vm);
        self
    }

    /// Add a service.
    ///
    /// Chain to add multiple services.
    #[must_use]
    pub fn service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Build the DID Document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if two verification methods or two
    /// services share an ID.
    pub fn build(self) -> Result<Document> {
        let mut doc = Document::with_options(self.id, self.options);
        for vm in self.verification_methods {
            doc.add_verification_method(vm)?;
        }
        for service in self.services {
            doc.add_service(service)?;
        }
        Ok(doc)
    }
}

fn add_one(values: &mut Option<OneMany<String>>, value: String) {
    match values {
        Some(values) => values.add(value),
        None => *values = Some(OneMany::One(value)),
    }
}
