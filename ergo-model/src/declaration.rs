//! Class, enum, and property declarations that make up a type model.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Built-in scalar types a property can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    String,
    Double,
    Integer,
    Long,
    DateTime,
    Boolean,
}

impl PrimitiveType {
    /// Get the type name used in declarations.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "String",
            PrimitiveType::Double => "Double",
            PrimitiveType::Integer => "Integer",
            PrimitiveType::Long => "Long",
            PrimitiveType::DateTime => "DateTime",
            PrimitiveType::Boolean => "Boolean",
        }
    }
}

impl std::str::FromStr for PrimitiveType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(PrimitiveType::String),
            "Double" => Ok(PrimitiveType::Double),
            "Integer" => Ok(PrimitiveType::Integer),
            "Long" => Ok(PrimitiveType::Long),
            "DateTime" => Ok(PrimitiveType::DateTime),
            "Boolean" => Ok(PrimitiveType::Boolean),
            _ => Err(ModelError::UnknownPrimitive(s.to_string())),
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a property's value is interpreted.
///
/// Exactly one kind holds per property. `Enum` and `Relationship` both refine
/// "non-primitive"; `Class` covers every other non-primitive (composition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Primitive,
    Enum,
    Class,
    Relationship,
}

/// A field or relationship declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    name: String,

    /// Primitive type name, or the fully-qualified name of the enum/class/target.
    #[serde(rename = "type")]
    type_name: String,

    kind: PropertyKind,

    #[serde(default)]
    array: bool,

    #[serde(default)]
    optional: bool,
}

impl Property {
    fn new(name: impl Into<String>, type_name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            kind,
            array: false,
            optional: false,
        }
    }

    /// Declare a primitive field.
    pub fn primitive(name: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self::new(name, primitive.as_str(), PropertyKind::Primitive)
    }

    /// Declare a field holding a member of the named enum.
    pub fn enumeration(name: impl Into<String>, enum_type: impl Into<String>) -> Self {
        Self::new(name, enum_type, PropertyKind::Enum)
    }

    /// Declare a field embedding an instance of the named class.
    pub fn object(name: impl Into<String>, class_type: impl Into<String>) -> Self {
        Self::new(name, class_type, PropertyKind::Class)
    }

    /// Declare a relationship (reference by identity) to the named class.
    pub fn relationship(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self::new(name, target_type, PropertyKind::Relationship)
    }

    /// Mark the property as array-valued.
    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Mark the property as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type name (primitive name or fully-qualified type name).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == PropertyKind::Primitive
    }

    pub fn is_enum(&self) -> bool {
        self.kind == PropertyKind::Enum
    }

    pub fn is_relationship(&self) -> bool {
        self.kind == PropertyKind::Relationship
    }

    /// The primitive type, if this is a primitive field with a known type name.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        if self.is_primitive() {
            self.type_name.parse().ok()
        } else {
            None
        }
    }
}

/// The category of a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Asset,
    Participant,
    Transaction,
    Event,
    Concept,
}

impl ClassKind {
    /// Whether instances of this kind are resources (identifiable by URI).
    pub fn is_resource(&self) -> bool {
        !matches!(self, ClassKind::Concept)
    }
}

/// A named class with an ordered list of properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    name: String,

    kind: ClassKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    super_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier_field: Option<String>,

    #[serde(default)]
    is_abstract: bool,

    #[serde(default)]
    properties: Vec<Property>,
}

impl ClassDeclaration {
    /// Create a class declaration with no properties.
    pub fn new(fully_qualified_name: impl Into<String>, kind: ClassKind) -> Result<Self, ModelError> {
        let name = fully_qualified_name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            kind,
            super_type: None,
            identifier_field: None,
            is_abstract: false,
            properties: Vec::new(),
        })
    }

    /// Set the supertype this class extends.
    pub fn extends(mut self, super_type: impl Into<String>) -> Self {
        self.super_type = Some(super_type.into());
        self
    }

    /// Set the field whose value identifies instances of this class.
    pub fn identified_by(mut self, field: impl Into<String>) -> Self {
        self.identifier_field = Some(field.into());
        self
    }

    /// Mark the class abstract.
    pub fn into_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Append a property. Declaration order is output order.
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        split_fully_qualified_name(&self.name).0
    }

    pub fn name(&self) -> &str {
        split_fully_qualified_name(&self.name).1
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn super_type(&self) -> Option<&str> {
        self.super_type.as_deref()
    }

    /// The identifying field declared directly on this class.
    pub fn own_identifier_field(&self) -> Option<&str> {
        self.identifier_field.as_deref()
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Properties declared directly on this class, excluding inherited ones.
    pub fn own_properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a property declared directly on this class.
    pub fn own_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A named enumeration with ordered members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDeclaration {
    name: String,
    members: Vec<String>,
}

impl EnumDeclaration {
    pub fn new<I, S>(fully_qualified_name: impl Into<String>, members: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = fully_qualified_name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.name
    }

    pub fn name(&self) -> &str {
        split_fully_qualified_name(&self.name).1
    }

    /// Members in declared order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Position of the named member, if declared.
    pub fn position(&self, member: &str) -> Option<usize> {
        self.members.iter().position(|m| m == member)
    }
}

/// Any declaration that can be registered under a fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "declaration", rename_all = "snake_case")]
pub enum TypeDeclaration {
    Class(ClassDeclaration),
    Enum(EnumDeclaration),
}

impl TypeDeclaration {
    pub fn fully_qualified_name(&self) -> &str {
        match self {
            TypeDeclaration::Class(c) => c.fully_qualified_name(),
            TypeDeclaration::Enum(e) => e.fully_qualified_name(),
        }
    }

    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match self {
            TypeDeclaration::Class(c) => Some(c),
            TypeDeclaration::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDeclaration> {
        match self {
            TypeDeclaration::Enum(e) => Some(e),
            TypeDeclaration::Class(_) => None,
        }
    }
}

impl From<ClassDeclaration> for TypeDeclaration {
    fn from(c: ClassDeclaration) -> Self {
        TypeDeclaration::Class(c)
    }
}

impl From<EnumDeclaration> for TypeDeclaration {
    fn from(e: EnumDeclaration) -> Self {
        TypeDeclaration::Enum(e)
    }
}

/// Split `org.acme.Person` into (`org.acme`, `Person`).
/// Names without a namespace return an empty namespace.
pub fn split_fully_qualified_name(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or(("", name))
}

pub(crate) fn validate_name(name: &str) -> Result<(), ModelError> {
    let (_, simple) = split_fully_qualified_name(name);
    if simple.is_empty() || name.contains('#') || name.chars().any(char::is_whitespace) {
        return Err(ModelError::InvalidName(name.to_string()));
    }
    Ok(())
}
