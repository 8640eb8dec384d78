//! The type model query interface and the in-memory [`ModelManager`] registry.

use crate::declaration::{
    ClassDeclaration, EnumDeclaration, PrimitiveType, Property, PropertyKind, TypeDeclaration,
    validate_name,
};
use crate::error::ModelError;
use crate::instance::{Instance, Relationship};
use std::collections::{HashMap, HashSet};

/// Read-only lookup of declarations by fully-qualified name.
///
/// Implementors only need [`TypeModel::resolve`]; the inheritance-aware
/// queries are provided on top of it.
pub trait TypeModel {
    /// Resolve a fully-qualified type name. Fails if the name is unregistered.
    fn resolve(&self, fully_qualified_name: &str) -> Result<&TypeDeclaration, ModelError>;

    /// Resolve a name that must refer to a class.
    fn resolve_class(&self, fully_qualified_name: &str) -> Result<&ClassDeclaration, ModelError> {
        self.resolve(fully_qualified_name)?
            .as_class()
            .ok_or_else(|| ModelError::NotAClass(fully_qualified_name.to_string()))
    }

    /// Resolve a name that must refer to an enum.
    fn resolve_enum(&self, fully_qualified_name: &str) -> Result<&EnumDeclaration, ModelError> {
        self.resolve(fully_qualified_name)?
            .as_enum()
            .ok_or_else(|| ModelError::NotAnEnum(fully_qualified_name.to_string()))
    }

    /// The class followed by each of its supertypes, nearest first.
    fn class_chain<'a>(
        &'a self,
        class: &'a ClassDeclaration,
    ) -> Result<Vec<&'a ClassDeclaration>, ModelError> {
        let mut seen = HashSet::new();
        seen.insert(class.fully_qualified_name());
        let mut chain = vec![class];
        let mut current = class;
        while let Some(parent) = current.super_type() {
            if !seen.insert(parent) {
                return Err(ModelError::CyclicInheritance(parent.to_string()));
            }
            current = self.resolve_class(parent)?;
            chain.push(current);
        }
        Ok(chain)
    }

    /// All properties of a class: its own in declared order, then inherited.
    fn properties<'a>(&'a self, class: &'a ClassDeclaration) -> Result<Vec<&'a Property>, ModelError> {
        Ok(self
            .class_chain(class)?
            .into_iter()
            .flat_map(|c| c.own_properties())
            .collect())
    }

    /// The identifying field, declared on the class or inherited.
    fn identifier_field<'a>(
        &'a self,
        class: &'a ClassDeclaration,
    ) -> Result<Option<&'a str>, ModelError> {
        Ok(self
            .class_chain(class)?
            .into_iter()
            .find_map(|c| c.own_identifier_field()))
    }
}

/// In-memory registry of class and enum declarations.
#[derive(Debug, Clone, Default)]
pub struct ModelManager {
    types: HashMap<String, TypeDeclaration>,
}

impl ModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of declarations.
    pub fn from_declarations<I>(declarations: I) -> Result<Self, ModelError>
    where
        I: IntoIterator,
        I::Item: Into<TypeDeclaration>,
    {
        let mut manager = Self::new();
        for decl in declarations {
            manager.add(decl)?;
        }
        Ok(manager)
    }

    /// Register a declaration.
    /// Returns error if the name is invalid or already registered.
    pub fn add(&mut self, declaration: impl Into<TypeDeclaration>) -> Result<(), ModelError> {
        let declaration = declaration.into();
        let name = declaration.fully_qualified_name().to_string();
        validate_name(&name)?;
        if self.types.contains_key(&name) {
            return Err(ModelError::DuplicateType(name));
        }
        if let TypeDeclaration::Class(class) = &declaration {
            for property in class.own_properties() {
                if property.kind() == PropertyKind::Primitive {
                    property.type_name().parse::<PrimitiveType>()?;
                }
            }
        }
        tracing::debug!("Registered type {}", name);
        self.types.insert(name, declaration);
        Ok(())
    }

    pub fn contains(&self, fully_qualified_name: &str) -> bool {
        self.types.contains_key(fully_qualified_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Create an empty resource of the given type with its identifying field set.
    pub fn new_resource(
        &self,
        type_name: &str,
        identifier: impl Into<String>,
    ) -> Result<Instance, ModelError> {
        let class = self.instantiable_class(type_name)?;
        if !class.kind().is_resource() {
            return Err(ModelError::NotAResource(type_name.to_string()));
        }
        let field = self
            .identifier_field(class)?
            .ok_or_else(|| ModelError::NotIdentifiable(type_name.to_string()))?;
        let identifier = identifier.into();
        Ok(Instance::resource(type_name, identifier.clone()).with(field, identifier))
    }

    /// Create an empty concept of the given type.
    pub fn new_concept(&self, type_name: &str) -> Result<Instance, ModelError> {
        let class = self.instantiable_class(type_name)?;
        if class.kind().is_resource() {
            return Err(ModelError::NotAConcept(type_name.to_string()));
        }
        Ok(Instance::concept(type_name))
    }

    /// Create a reference-only relationship to an identifiable type.
    pub fn new_relationship(
        &self,
        type_name: &str,
        identifier: impl Into<String>,
    ) -> Result<Relationship, ModelError> {
        let class = self.resolve_class(type_name)?;
        if !class.kind().is_resource() {
            return Err(ModelError::NotAResource(type_name.to_string()));
        }
        if self.identifier_field(class)?.is_none() {
            return Err(ModelError::NotIdentifiable(type_name.to_string()));
        }
        Ok(Relationship::new(type_name, identifier))
    }

    fn instantiable_class(&self, type_name: &str) -> Result<&ClassDeclaration, ModelError> {
        let class = self.resolve_class(type_name)?;
        if class.is_abstract() {
            return Err(ModelError::AbstractType(type_name.to_string()));
        }
        Ok(class)
    }

    /// Save all declarations as a JSON array, sorted by name.
    pub fn to_json(&self) -> Result<String, ModelError> {
        let declarations: Vec<&TypeDeclaration> = self
            .type_names()
            .into_iter()
            .filter_map(|name| self.types.get(name))
            .collect();
        serde_json::to_string_pretty(&declarations)
            .map_err(|e| ModelError::Serialization(e.to_string()))
    }

    /// Load declarations previously saved with [`ModelManager::to_json`].
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let declarations: Vec<TypeDeclaration> =
            serde_json::from_str(json).map_err(|e| ModelError::Serialization(e.to_string()))?;
        Self::from_declarations(declarations)
    }
}

impl TypeModel for ModelManager {
    fn resolve(&self, fully_qualified_name: &str) -> Result<&TypeDeclaration, ModelError> {
        self.types
            .get(fully_qualified_name)
            .ok_or_else(|| ModelError::TypeNotFound(fully_qualified_name.to_string()))
    }
}
