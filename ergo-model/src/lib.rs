//! # ergo-model
//!
//! Type model and instance graph for Ergo.
//!
//! This crate provides the read-only data the JSON generator walks:
//!
//! - **Declarations**: classes (assets, participants, transactions, events,
//!   concepts), enums, and the properties a class declares
//! - **TypeModel**: lookup of declarations by fully-qualified name, with
//!   inheritance-aware property and identifier queries
//! - **ModelManager**: the in-memory registry, plus a small factory for
//!   resources, concepts, and relationships
//! - **Instances**: typed values, resources identified by URI, and
//!   reference-only relationships
//!
//! ## Example
//!
//! ```rust
//! use ergo_model::{ClassDeclaration, ClassKind, ModelManager, PrimitiveType, Property, TypeModel};
//!
//! let person = ClassDeclaration::new("org.acme.Person", ClassKind::Participant)
//!     .unwrap()
//!     .identified_by("personId")
//!     .property(Property::primitive("personId", PrimitiveType::String))
//!     .property(Property::primitive("age", PrimitiveType::Integer).optional());
//!
//! let mut manager = ModelManager::new();
//! manager.add(person).unwrap();
//!
//! let alice = manager
//!     .new_resource("org.acme.Person", "alice")
//!     .unwrap()
//!     .with("age", 42);
//!
//! assert_eq!(alice.uri().as_deref(), Some("resource:org.acme.Person#alice"));
//! let class = manager.resolve_class(alice.type_name()).unwrap();
//! assert_eq!(manager.properties(class).unwrap().len(), 2);
//! ```

pub mod declaration;
pub mod error;
pub mod instance;
pub mod model;

pub use declaration::{
    ClassDeclaration, ClassKind, EnumDeclaration, PrimitiveType, Property, PropertyKind,
    TypeDeclaration, split_fully_qualified_name,
};
pub use error::ModelError;
pub use instance::{Instance, Relationship, Value, resource_uri};
pub use model::{ModelManager, TypeModel};
