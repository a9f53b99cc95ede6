//! # Service
//!
//! Services are used to express ways of communicating with the DID subject or
//! associated entities.
//!
//! They can be any type of service the DID subject wants to advertise,
//! including decentralized identity management services for further
//! discovery, authentication, authorization, or interaction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Kind, OneMany};
use crate::document::Identified;

/// A service endpoint: a URI string, a map, or a set composed of strings
/// and/or maps. Set members that are neither are kept as they are.
pub type Endpoint = OneMany<Kind<Value>>;

/// A Service is used to express a way of communicating with the DID subject or
/// associated entities.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// A URI unique to the service.
    pub id: String,

    /// The service type. SHOULD be registered in the DID Specification
    /// Registries.
    #[serde(rename = "type")]
    pub type_: String,

    /// One or more endpoints for the service.
    #[allow(clippy::struct_field_names)]
    pub service_endpoint: Endpoint,

    /// Service-specific properties, passed through unchanged.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Service {
    /// Create a new `ServiceBuilder` to build a service.
    #[must_use]
    pub fn build(id: impl Into<String>) -> ServiceBuilder {
        ServiceBuilder::new(id)
    }
}

impl Identified for Service {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Service builder
#[derive(Default)]
pub struct ServiceBuilder {
    id: String,
    service_type: String,
    endpoint: Vec<Kind<Value>>,
    additional: Map<String, Value>,
}

impl ServiceBuilder {
    /// Creates a new `ServiceBuilder` with the given service ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Specify the service type.
    #[must_use]
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Add a service endpoint. Chain to add multiple endpoints.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<Kind<Value>>) -> Self {
        self.endpoint.push(endpoint.into());
        self
    }

    /// Add a service-specific property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    /// Build the service. A single endpoint is kept as a single value, more
    /// than one (or none) as a set.
    #[must_use]
    pub fn build(mut self) -> Service {
        let service_endpoint = if self.endpoint.len() == 1 {
            OneMany::One(self.endpoint.remove(0))
        } else {
            OneMany::Many(self.endpoint)
        };

        Service {
            id: self.id,
            type_: self.service_type,
            service_endpoint,
            additional: self.additional,
        }
    }
}
