//! Leaf encodings: primitive literals, boxed integers, and boxed enums.
//!
//! Integers and longs are wrapped as `{"nat": n}` so consumers can tell exact
//! integers apart from doubles. Enum values become a tagged sum:
//!
//! ```json
//! { "type": ["org.acme.Color"], "data": { "right": { "right": { "left": "BLUE" } } } }
//! ```
//!
//! with one `right` wrap for every member declared before the matching one.

use crate::error::SerializeError;
use chrono::SecondsFormat;
use ergo_model::{EnumDeclaration, PrimitiveType, Value};
use serde_json::{Number, Value as JsonValue, json};

/// Key of the single-entry object that boxes `Integer` and `Long` values.
pub const NAT_KEY: &str = "nat";

/// Encode a primitive value according to its declared type.
///
/// `declared` is `None` for values with no primitive declaration, such as the
/// members of an enum array; those are emitted verbatim.
pub fn convert_primitive(
    declared: Option<PrimitiveType>,
    value: &Value,
) -> Result<JsonValue, SerializeError> {
    let literal = literal(value)?;
    Ok(match declared {
        Some(PrimitiveType::Integer | PrimitiveType::Long) => json!({ NAT_KEY: literal }),
        Some(PrimitiveType::DateTime)
        | Some(PrimitiveType::Double)
        | Some(PrimitiveType::Boolean)
        | Some(PrimitiveType::String)
        | None => literal,
    })
}

/// The plain JSON form of a scalar value.
pub fn literal(value: &Value) -> Result<JsonValue, SerializeError> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Boolean(b) => Ok(JsonValue::Bool(*b)),
        Value::Integer(n) => Ok(JsonValue::from(*n)),
        // JSON has no NaN or infinity.
        Value::Double(n) => Ok(Number::from_f64(*n).map_or(JsonValue::Null, JsonValue::Number)),
        Value::String(s) => Ok(JsonValue::String(s.clone())),
        Value::DateTime(dt) => Ok(JsonValue::String(
            dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        )),
        Value::Array(_) | Value::Instance(_) | Value::Relationship(_) => {
            Err(SerializeError::TypeMismatch {
                expected: "a primitive value".to_string(),
                found: value.describe(),
            })
        }
    }
}

/// Box an enum member into its nested left/right representation.
pub fn box_enum(declaration: &EnumDeclaration, value: &Value) -> Result<JsonValue, SerializeError> {
    let enum_name = declaration.fully_qualified_name();
    let member = value.as_str().ok_or_else(|| SerializeError::TypeMismatch {
        expected: format!("a member of {}", enum_name),
        found: value.describe(),
    })?;

    let mut either = json!({ "left": member });
    for candidate in declaration.members() {
        if candidate == member {
            break;
        }
        either = json!({ "right": either });
    }

    Ok(json!({ "type": [enum_name], "data": either }))
}
