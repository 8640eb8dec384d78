//! Runtime values: typed instances, relationships, and property values.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Build the URI for an identifiable instance: `resource:{type}#{id}`.
///
/// The identifier is percent-encoded so that `#` and whitespace survive.
pub fn resource_uri(type_name: &str, identifier: &str) -> String {
    format!("resource:{}#{}", type_name, urlencoding::encode(identifier))
}

/// A property value held by an [`Instance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Array(Vec<Value>),
    Instance(Arc<Instance>),
    Relationship(Relationship),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(i) => Some(i),
            _ => None,
        }
    }

    /// Short description of the value's shape, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Boolean(_) => "boolean".to_string(),
            Value::Integer(_) => "integer".to_string(),
            Value::Double(_) => "double".to_string(),
            Value::String(_) => "string".to_string(),
            Value::DateTime(_) => "date-time".to_string(),
            Value::Array(_) => "array".to_string(),
            Value::Instance(i) => format!("instance of {}", i.type_name()),
            Value::Relationship(r) => format!("relationship {}", r.uri()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Instance> for Value {
    fn from(i: Instance) -> Self {
        Value::Instance(Arc::new(i))
    }
}

impl From<Arc<Instance>> for Value {
    fn from(i: Arc<Instance>) -> Self {
        Value::Instance(i)
    }
}

impl From<Relationship> for Value {
    fn from(r: Relationship) -> Self {
        Value::Relationship(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// A reference to an identifiable instance, carrying only its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    type_name: String,
    identifier: String,
}

impl Relationship {
    pub fn new(type_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            identifier: identifier.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn uri(&self) -> String {
        resource_uri(&self.type_name, &self.identifier)
    }

    /// `{type}#{id}`
    pub fn fully_qualified_identifier(&self) -> String {
        format!("{}#{}", self.type_name, self.identifier)
    }
}

/// A typed object: a resource (identifiable) or a concept (not identifiable).
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_name: String,
    identifier: Option<String>,
    properties: HashMap<String, Value>,
}

impl Instance {
    /// Create a resource with the given identifier and no properties.
    pub fn resource(type_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            identifier: Some(identifier.into()),
            properties: HashMap::new(),
        }
    }

    /// Create a concept with no properties.
    pub fn concept(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            identifier: None,
            properties: HashMap::new(),
        }
    }

    /// Set a property, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Read a property. Absent and null-valued properties both yield `None`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).filter(|v| !v.is_null())
    }

    /// Fully-qualified runtime type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn is_resource(&self) -> bool {
        self.identifier.is_some()
    }

    /// URI of a resource; `None` for concepts.
    pub fn uri(&self) -> Option<String> {
        self.identifier
            .as_deref()
            .map(|id| resource_uri(&self.type_name, id))
    }

    /// `{type}#{id}` of a resource; `None` for concepts.
    pub fn fully_qualified_identifier(&self) -> Option<String> {
        self.identifier
            .as_deref()
            .map(|id| format!("{}#{}", self.type_name, id))
    }

    /// A reference-only relationship pointing at this resource.
    pub fn to_relationship(&self) -> Option<Relationship> {
        self.identifier
            .as_deref()
            .map(|id| Relationship::new(self.type_name.clone(), id))
    }
}
