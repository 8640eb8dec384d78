//! Shared `org.acme` model and instance builders for integration tests.

#![allow(dead_code)]

use ergo_model::{
    ClassDeclaration, ClassKind, EnumDeclaration, Instance, ModelManager, PrimitiveType, Property,
    TypeDeclaration,
};

pub const PERSON: &str = "org.acme.Person";
pub const EMPLOYEE: &str = "org.acme.Employee";
pub const COMPANY: &str = "org.acme.Company";
pub const TEAM: &str = "org.acme.Team";
pub const ADDRESS: &str = "org.acme.Address";
pub const CIRCLE: &str = "org.acme.Circle";
pub const SQUARE: &str = "org.acme.Square";
pub const COLOR: &str = "org.acme.Color";

pub fn acme_model() -> ModelManager {
    let color = EnumDeclaration::new(COLOR, ["RED", "GREEN", "BLUE"]).unwrap();

    let address = ClassDeclaration::new(ADDRESS, ClassKind::Concept)
        .unwrap()
        .property(Property::primitive("street", PrimitiveType::String))
        .property(Property::primitive("city", PrimitiveType::String))
        .property(Property::primitive("zip", PrimitiveType::String).optional());

    let shape = ClassDeclaration::new("org.acme.Shape", ClassKind::Concept)
        .unwrap()
        .into_abstract()
        .property(Property::primitive("label", PrimitiveType::String).optional());
    let circle = ClassDeclaration::new(CIRCLE, ClassKind::Concept)
        .unwrap()
        .extends("org.acme.Shape")
        .property(Property::primitive("radius", PrimitiveType::Double));
    let square = ClassDeclaration::new(SQUARE, ClassKind::Concept)
        .unwrap()
        .extends("org.acme.Shape")
        .property(Property::primitive("side", PrimitiveType::Double));

    let person = ClassDeclaration::new(PERSON, ClassKind::Participant)
        .unwrap()
        .identified_by("personId")
        .property(Property::primitive("personId", PrimitiveType::String))
        .property(Property::primitive("name", PrimitiveType::String))
        .property(Property::primitive("age", PrimitiveType::Integer).optional())
        .property(Property::primitive("height", PrimitiveType::Double).optional())
        .property(Property::primitive("born", PrimitiveType::DateTime).optional())
        .property(Property::primitive("active", PrimitiveType::Boolean).optional())
        .property(Property::enumeration("favoriteColor", COLOR).optional())
        .property(Property::enumeration("luckyColors", COLOR).array().optional())
        .property(Property::object("address", ADDRESS).optional())
        .property(Property::object("shapes", "org.acme.Shape").array().optional())
        .property(Property::relationship("friend", PERSON).optional())
        .property(Property::relationship("friends", PERSON).array().optional())
        .property(Property::relationship("employer", COMPANY).optional());

    let employee = ClassDeclaration::new(EMPLOYEE, ClassKind::Participant)
        .unwrap()
        .extends(PERSON)
        .property(Property::primitive("salary", PrimitiveType::Integer));

    let company = ClassDeclaration::new(COMPANY, ClassKind::Asset)
        .unwrap()
        .identified_by("companyId")
        .property(Property::primitive("companyId", PrimitiveType::String))
        .property(Property::primitive("name", PrimitiveType::String))
        .property(Property::primitive("founded", PrimitiveType::Long).optional())
        .property(Property::object("headquarters", ADDRESS).optional())
        .property(Property::relationship("employees", PERSON).array().optional());

    let team = ClassDeclaration::new(TEAM, ClassKind::Asset)
        .unwrap()
        .identified_by("teamId")
        .property(Property::primitive("teamId", PrimitiveType::String))
        .property(Property::object("lead", PERSON).optional())
        .property(Property::object("members", PERSON).array().optional());

    ModelManager::from_declarations([
        TypeDeclaration::from(color),
        address.into(),
        shape.into(),
        circle.into(),
        square.into(),
        person.into(),
        employee.into(),
        company.into(),
        team.into(),
    ])
    .unwrap()
}

/// A person with only the required fields set.
pub fn person(model: &ModelManager, id: &str, name: &str) -> Instance {
    model.new_resource(PERSON, id).unwrap().with("name", name)
}

pub fn address(street: &str, city: &str) -> Instance {
    Instance::concept(ADDRESS)
        .with("street", street)
        .with("city", city)
}

pub fn person_uri(id: &str) -> String {
    format!("resource:{}#{}", PERSON, id)
}
