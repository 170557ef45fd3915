//! Structured names for program entities recorded by interaction telemetry.
//!
//! A name is a single-string encoding of a type, code element, or IDE
//! component (`[p:int] [C, P].M()`), kept as the single source of truth and
//! parsed into its sub-parts on demand. This crate turns raw identifier
//! strings into strongly typed name values, repairs identifiers produced by
//! earlier grammar generations before parsing is attempted, and round-trips
//! every name through a version-tagged textual codec.
//!
//! Parsing never fails: input that matches no known shape degrades to a
//! typed unknown placeholder. The only hard error in the crate is
//! [`DecodeError`], raised for an unrecognized codec tag.

pub mod alias;
pub mod fixes;
mod ide;
mod members;
mod org;
mod parse;
pub mod scan;
mod serialization;
mod types;

pub use crate::ide::{DocumentName, ProjectItemName, ProjectName, SolutionName, WindowName};
pub use crate::members::{
    EventName, FieldName, LambdaName, LocalVariableName, MethodName, ParameterName, PropertyName,
};
pub use crate::org::{AssemblyName, NamespaceName};
pub use crate::parse::{
    parse, parse_alias, parse_assembly, parse_document, parse_event, parse_field, parse_general,
    parse_lambda, parse_local_variable, parse_method, parse_namespace, parse_parameter,
    parse_project, parse_project_item, parse_property, parse_solution, parse_type, parse_window,
};
pub use crate::serialization::{decode, encode, DecodeError};
pub use crate::types::TypeName;

/// Placeholder identifier for unknown types and type-like positions.
pub(crate) const UNKNOWN_TYPE: &str = "?";
/// Placeholder identifier for unknown free-form segments.
pub(crate) const UNKNOWN_SEGMENT: &str = "???";

/// An opaque name that carries no structure beyond its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneralName(String);

impl GeneralName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_SEGMENT.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_SEGMENT
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }
}

/// A using-alias name (`global`, or an alias with its target).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AliasName(String);

impl AliasName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_SEGMENT.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_SEGMENT
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }
}

/// The closed set of structured name variants.
///
/// Two names are equal iff their variant and canonical identifier agree; an
/// unknown name of one variant is never equal to an unknown name of another,
/// even though the identifiers may coincide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Name {
    General(GeneralName),
    Type(TypeName),
    Method(MethodName),
    Field(FieldName),
    Property(PropertyName),
    Event(EventName),
    Parameter(ParameterName),
    Lambda(LambdaName),
    LocalVariable(LocalVariableName),
    Namespace(NamespaceName),
    Assembly(AssemblyName),
    Alias(AliasName),
    Document(DocumentName),
    Window(WindowName),
    Solution(SolutionName),
    Project(ProjectName),
    ProjectItem(ProjectItemName),
}

impl Name {
    /// The canonical string form; stable under parse/serialize round trips.
    pub fn identifier(&self) -> &str {
        match self {
            Name::General(n) => n.identifier(),
            Name::Type(n) => n.identifier(),
            Name::Method(n) => n.identifier(),
            Name::Field(n) => n.identifier(),
            Name::Property(n) => n.identifier(),
            Name::Event(n) => n.identifier(),
            Name::Parameter(n) => n.identifier(),
            Name::Lambda(n) => n.identifier(),
            Name::LocalVariable(n) => n.identifier(),
            Name::Namespace(n) => n.identifier(),
            Name::Assembly(n) => n.identifier(),
            Name::Alias(n) => n.identifier(),
            Name::Document(n) => n.identifier(),
            Name::Window(n) => n.identifier(),
            Name::Solution(n) => n.identifier(),
            Name::Project(n) => n.identifier(),
            Name::ProjectItem(n) => n.identifier(),
        }
    }

    /// True for the variant's typed unknown placeholder.
    pub fn is_unknown(&self) -> bool {
        match self {
            Name::General(n) => n.is_unknown(),
            Name::Type(n) => n.is_unknown(),
            Name::Method(n) => n.is_unknown(),
            Name::Field(n) => n.is_unknown(),
            Name::Property(n) => n.is_unknown(),
            Name::Event(n) => n.is_unknown(),
            Name::Parameter(n) => n.is_unknown(),
            Name::Lambda(n) => n.is_unknown(),
            Name::LocalVariable(n) => n.is_unknown(),
            Name::Namespace(n) => n.is_unknown(),
            Name::Assembly(n) => n.is_unknown(),
            Name::Alias(n) => n.is_unknown(),
            Name::Document(n) => n.is_unknown(),
            Name::Window(n) => n.is_unknown(),
            Name::Solution(n) => n.is_unknown(),
            Name::Project(n) => n.is_unknown(),
            Name::ProjectItem(n) => n.is_unknown(),
        }
    }

    /// True once any identifier segment has passed through anonymization.
    pub fn is_hashed(&self) -> bool {
        self.identifier().contains("==")
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}
