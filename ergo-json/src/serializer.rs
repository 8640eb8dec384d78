//! Schema-driven conversion of typed instances into JSON values.
//!
//! The walk holds a value together with the declaration that explains it and
//! dispatches on the declaration:
//!
//! - **Class**: emit an object tagged with `$class` (and `$id` when
//!   deduplicating), then visit every non-null property in declared order.
//! - **Field**: primitives, enums, arrays, and embedded (composed) instances.
//! - **Relationship**: a URI reference, or with
//!   [`SerializerOptions::permit_resources_for_relationships`] the embedded
//!   resource itself.
//!
//! Each call to [`GraphSerializer::serialize`] owns its own traversal state,
//! so one serializer can be shared between threads.

use crate::config::SerializerOptions;
use crate::encode;
use crate::error::SerializeError;
use ergo_model::{
    ClassDeclaration, EnumDeclaration, Instance, Property, TypeDeclaration, TypeModel, Value,
};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

/// Key holding the fully-qualified type name of an emitted object.
pub const CLASS_KEY: &str = "$class";

/// Key holding the URI of an emitted resource when deduplicating.
pub const ID_KEY: &str = "$id";

/// Something the visitor knows how to walk a value against.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'m> {
    Class(&'m ClassDeclaration),
    Field(&'m Property),
    Relationship(&'m Property),
    Enum(&'m EnumDeclaration),
}

impl<'m> From<&'m TypeDeclaration> for Declaration<'m> {
    fn from(decl: &'m TypeDeclaration) -> Self {
        match decl {
            TypeDeclaration::Class(c) => Declaration::Class(c),
            TypeDeclaration::Enum(e) => Declaration::Enum(e),
        }
    }
}

impl<'m> From<&'m Property> for Declaration<'m> {
    fn from(property: &'m Property) -> Self {
        if property.is_relationship() {
            Declaration::Relationship(property)
        } else {
            Declaration::Field(property)
        }
    }
}

impl Declaration<'_> {
    fn describe(&self) -> String {
        match self {
            Declaration::Class(c) => format!("class {}", c.fully_qualified_name()),
            Declaration::Field(p) => format!("field {}", p.name()),
            Declaration::Relationship(p) => format!("relationship {}", p.name()),
            Declaration::Enum(e) => format!("enum {}", e.fully_qualified_name()),
        }
    }
}

/// Converts typed instances to JSON, guided by a [`TypeModel`].
#[derive(Debug, Clone, Default)]
pub struct GraphSerializer {
    options: SerializerOptions,
}

impl GraphSerializer {
    pub fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Serialize a root instance, resolving its runtime type through `model`.
    pub fn serialize<M>(&self, instance: &Instance, model: &M) -> Result<JsonValue, SerializeError>
    where
        M: TypeModel + ?Sized,
    {
        tracing::debug!(
            root = instance.type_name(),
            convert = self.options.convert_resources_to_relationships,
            permit = self.options.permit_resources_for_relationships,
            dedupe = self.options.deduplicate_resources,
            "Serializing instance"
        );

        let declaration = model.resolve(instance.type_name())?;
        let mut traversal = Traversal::new(&self.options, model);
        // The root counts as embedded, so a relationship cycle back to it
        // ends in a reference.
        if let Some(fqi) = instance.fully_qualified_identifier() {
            traversal.embedding.insert(fqi);
        }
        let result = traversal.visit_instance(declaration.into(), instance)?;

        tracing::debug!(
            root = instance.type_name(),
            emitted = traversal.emitted.len(),
            "Serialized instance"
        );
        Ok(result)
    }

    /// Walk a single value against an explicit declaration.
    ///
    /// Uses fresh traversal state, exactly like [`GraphSerializer::serialize`].
    pub fn visit<M>(
        &self,
        declaration: Declaration<'_>,
        value: &Value,
        model: &M,
    ) -> Result<JsonValue, SerializeError>
    where
        M: TypeModel + ?Sized,
    {
        Traversal::new(&self.options, model).visit(declaration, value)
    }
}

/// State for one top-level call.
struct Traversal<'a, M: ?Sized> {
    options: &'a SerializerOptions,
    model: &'a M,

    /// URIs already emitted in full (deduplication).
    emitted: HashSet<String>,

    /// Fully-qualified identifiers of resources being embedded on the current path.
    embedding: HashSet<String>,
}

impl<'a, M> Traversal<'a, M>
where
    M: TypeModel + ?Sized,
{
    fn new(options: &'a SerializerOptions, model: &'a M) -> Self {
        Self {
            options,
            model,
            emitted: HashSet::new(),
            embedding: HashSet::new(),
        }
    }

    fn visit(&mut self, declaration: Declaration<'_>, value: &Value) -> Result<JsonValue, SerializeError> {
        match declaration {
            Declaration::Class(class) => match value {
                Value::Instance(instance) => self.visit_class(class, instance),
                other => Err(SerializeError::TypeMismatch {
                    expected: "a Resource or a Concept".to_string(),
                    found: other.describe(),
                }),
            },
            Declaration::Field(field) => self.visit_field(field, value),
            Declaration::Relationship(relationship) => {
                self.visit_relationship(relationship, value)
            }
            Declaration::Enum(_) => Err(SerializeError::UnrecognizedDeclaration(
                declaration.describe(),
            )),
        }
    }

    fn visit_instance(
        &mut self,
        declaration: Declaration<'_>,
        instance: &Instance,
    ) -> Result<JsonValue, SerializeError> {
        match declaration {
            Declaration::Class(class) => self.visit_class(class, instance),
            _ => Err(SerializeError::UnrecognizedDeclaration(
                declaration.describe(),
            )),
        }
    }

    fn visit_class(
        &mut self,
        class: &ClassDeclaration,
        instance: &Instance,
    ) -> Result<JsonValue, SerializeError> {
        let mut id = None;
        if self.options.deduplicate_resources {
            if let Some(uri) = instance.uri() {
                if self.emitted.contains(&uri) {
                    tracing::trace!("Already emitted {}, writing reference", uri);
                    return Ok(JsonValue::String(uri));
                }
                self.emitted.insert(uri.clone());
                id = Some(uri);
            }
        }

        let mut result = Map::new();
        result.insert(
            CLASS_KEY.to_string(),
            JsonValue::String(class.fully_qualified_name().to_string()),
        );
        if let Some(id) = id {
            result.insert(ID_KEY.to_string(), JsonValue::String(id));
        }

        let model = self.model;
        for property in model.properties(class)? {
            if let Some(value) = instance.get(property.name()) {
                let encoded = self.visit(property.into(), value)?;
                result.insert(property.name().to_string(), encoded);
            }
        }

        Ok(JsonValue::Object(result))
    }

    fn visit_field(&mut self, field: &Property, value: &Value) -> Result<JsonValue, SerializeError> {
        if field.is_array() {
            let items = expect_array(field, value)?;
            let mut array = Vec::with_capacity(items.len());
            for item in items {
                if !field.is_primitive() && !field.is_enum() {
                    array.push(self.visit_typed(item)?);
                } else {
                    array.push(encode::convert_primitive(field.primitive_type(), item)?);
                }
            }
            Ok(JsonValue::Array(array))
        } else if field.is_primitive() {
            encode::convert_primitive(field.primitive_type(), value)
        } else if field.is_enum() {
            let model = self.model;
            let declaration = model.resolve(field.type_name())?;
            match declaration {
                TypeDeclaration::Enum(enum_decl) => encode::box_enum(enum_decl, value),
                TypeDeclaration::Class(_) => Err(SerializeError::UnrecognizedDeclaration(format!(
                    "{} declared as an enum for field {}",
                    field.type_name(),
                    field.name()
                ))),
            }
        } else {
            self.visit_typed(value)
        }
    }

    /// Visit an embedded instance against its own runtime type, which may be
    /// a subtype of the declared one.
    fn visit_typed(&mut self, value: &Value) -> Result<JsonValue, SerializeError> {
        let instance = expect_instance(value)?;
        let model = self.model;
        let declaration = model.resolve(instance.type_name())?;
        self.visit_instance(declaration.into(), instance)
    }

    fn visit_relationship(
        &mut self,
        relationship: &Property,
        value: &Value,
    ) -> Result<JsonValue, SerializeError> {
        if relationship.is_array() {
            let items = expect_array(relationship, value)?;
            let mut array = Vec::with_capacity(items.len());
            for item in items {
                array.push(self.relationship_target(relationship, item)?);
            }
            Ok(JsonValue::Array(array))
        } else {
            self.relationship_target(relationship, value)
        }
    }

    fn relationship_target(
        &mut self,
        relationship: &Property,
        value: &Value,
    ) -> Result<JsonValue, SerializeError> {
        if self.options.permit_resources_for_relationships {
            if let Value::Instance(resource) = value {
                if let Some(fqi) = resource.fully_qualified_identifier() {
                    if self.embedding.contains(&fqi) {
                        tracing::trace!("{} is already being embedded, writing reference", fqi);
                        return self.reference(relationship, value);
                    }
                    self.embedding.insert(fqi.clone());
                    let result = self.visit_typed(value);
                    self.embedding.remove(&fqi);
                    return result;
                }
            }
        }
        self.reference(relationship, value)
    }

    /// The URI text for a relationship target.
    fn reference(&self, relationship: &Property, value: &Value) -> Result<JsonValue, SerializeError> {
        match value {
            Value::Relationship(target) => Ok(JsonValue::String(target.uri())),
            Value::Instance(resource) if resource.is_resource() => {
                let uri = resource.uri().unwrap_or_default();
                if !self.options.allows_resource_references() {
                    return Err(SerializeError::RelationshipViolation {
                        relationship: relationship.type_name().to_string(),
                        found: uri,
                    });
                }
                tracing::trace!("Writing resource {} as a relationship", uri);
                Ok(JsonValue::String(uri))
            }
            other => Err(SerializeError::TypeMismatch {
                expected: format!("a relationship to {}", relationship.type_name()),
                found: other.describe(),
            }),
        }
    }
}

fn expect_array<'v>(field: &Property, value: &'v Value) -> Result<&'v [Value], SerializeError> {
    match value {
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(SerializeError::TypeMismatch {
            expected: format!("an array for {}", field.name()),
            found: other.describe(),
        }),
    }
}

fn expect_instance(value: &Value) -> Result<&Instance, SerializeError> {
    value
        .as_instance()
        .ok_or_else(|| SerializeError::TypeMismatch {
            expected: "a Resource or a Concept".to_string(),
            found: value.describe(),
        })
}
