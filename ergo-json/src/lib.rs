//! Ergo JSON generator - converts typed resources to JSON values.
//!
//! The generator walks an [`ergo_model::Instance`] together with its
//! declarations from an [`ergo_model::TypeModel`] and produces a
//! [`serde_json::Value`] tree. Formatting the tree as text is left to the
//! caller.
//!
//! # Modules
//!
//! - [`serializer`]: the graph walk and its relationship/deduplication policies
//! - [`encode`]: integer boxing and enum sum-type encoding
//! - [`config`]: [`SerializerOptions`] loading from YAML and the environment
//! - [`error`]: error types
//!
//! # Example
//!
//! ```rust
//! use ergo_json::{GraphSerializer, SerializerOptions};
//! use ergo_model::{ClassDeclaration, ClassKind, ModelManager, PrimitiveType, Property};
//! use serde_json::json;
//!
//! let person = ClassDeclaration::new("org.acme.Person", ClassKind::Participant)
//!     .unwrap()
//!     .identified_by("personId")
//!     .property(Property::primitive("personId", PrimitiveType::String))
//!     .property(Property::primitive("age", PrimitiveType::Integer).optional())
//!     .property(Property::relationship("manager", "org.acme.Person").optional());
//! let model = ModelManager::from_declarations([person]).unwrap();
//!
//! let bob = model.new_relationship("org.acme.Person", "bob").unwrap();
//! let alice = model
//!     .new_resource("org.acme.Person", "alice")
//!     .unwrap()
//!     .with("age", 42)
//!     .with("manager", bob);
//!
//! let serializer = GraphSerializer::new(SerializerOptions::default());
//! let value = serializer.serialize(&alice, &model).unwrap();
//! assert_eq!(
//!     value,
//!     json!({
//!         "$class": "org.acme.Person",
//!         "personId": "alice",
//!         "age": {"nat": 42},
//!         "manager": "resource:org.acme.Person#bob"
//!     })
//! );
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod serializer;

pub use config::{ConfigError, SerializerOptions};
pub use error::SerializeError;
pub use serializer::{CLASS_KEY, Declaration, GraphSerializer, ID_KEY};
