//! Error types for the JSON generator.

use ergo_model::ModelError;
use thiserror::Error;

/// Errors that abort a serialize call. None of them are recoverable: each
/// signals a mismatch between the instance graph, the type model, and the
/// configured policies.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The visitor was handed a declaration it has no rule for.
    #[error("Unrecognised declaration: {0}")]
    UnrecognizedDeclaration(String),

    /// A value did not have the shape its declaration requires.
    #[error("Expected {expected}, but found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A full resource sits where only a relationship is allowed.
    #[error("Did not find a relationship for {relationship}, found {found}")]
    RelationshipViolation { relationship: String, found: String },

    #[error("Type model error: {0}")]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SerializeError::RelationshipViolation {
            relationship: "org.acme.Person".to_string(),
            found: "resource:org.acme.Person#alice".to_string(),
        };
        assert!(err.to_string().contains("org.acme.Person"));
        assert!(err.to_string().contains("#alice"));

        let err: SerializeError = ModelError::TypeNotFound("org.acme.Boat".to_string()).into();
        assert_eq!(err.to_string(), "Type model error: Type not found: org.acme.Boat");
    }
}
