//! Error types for the ergo-model crate.

use thiserror::Error;

/// Errors raised while building or querying a type model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    #[error("Type already registered: {0}")]
    DuplicateType(String),

    #[error("Invalid fully-qualified name: {0:?}")]
    InvalidName(String),

    #[error("{0} is not a class declaration")]
    NotAClass(String),

    #[error("{0} is not an enum declaration")]
    NotAnEnum(String),

    #[error("{0} is a concept, not a resource type")]
    NotAResource(String),

    #[error("{0} is a resource type, not a concept")]
    NotAConcept(String),

    #[error("{0} does not declare an identifying field")]
    NotIdentifiable(String),

    #[error("Cannot instantiate abstract type {0}")]
    AbstractType(String),

    #[error("Cyclic inheritance involving {0}")]
    CyclicInheritance(String),

    #[error("Unknown primitive type: {0}")]
    UnknownPrimitive(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
