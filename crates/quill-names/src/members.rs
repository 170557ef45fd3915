//! Code-element names: methods, fields, properties, events, parameters,
//! lambdas, and local variables.
//!
//! Member identifiers share the shape
//! `'modifiers' ['value type'] ['declaring type'].'name'` with an optional
//! parenthesized parameter list; extraction always goes through the
//! scanner because both type slots nest arbitrarily.

use crate::scan;
use crate::types::{self, TypeName};

pub(crate) const UNKNOWN_METHOD: &str = "[?] [?].???()";
pub(crate) const UNKNOWN_MEMBER: &str = "[?] [?].???";
pub(crate) const UNKNOWN_PARAMETER: &str = "[?] ???";
pub(crate) const UNKNOWN_LAMBDA: &str = "[?] ()";
pub(crate) const UNKNOWN_LOCAL_VARIABLE: &str = "[?] ???";

struct MemberParts<'a> {
    modifiers: &'a str,
    value_type: &'a str,
    declaring_type: &'a str,
    /// Everything after the `].` separator.
    tail: &'a str,
}

fn split_member(id: &str) -> Option<MemberParts<'_>> {
    let bytes = id.as_bytes();
    let open0 = id.find('[')?;
    let close0 = scan::find_matching_close(id, open0)?;
    let modifiers = id[..open0].trim();
    let value_type = &id[open0 + 1..close0];

    let mut i = close0 + 1;
    while bytes.get(i) == Some(&b' ') {
        i += 1;
    }
    if bytes.get(i) != Some(&b'[') {
        return None;
    }
    let close1 = scan::find_matching_close(id, i)?;
    let declaring_type = &id[i + 1..close1];
    if bytes.get(close1 + 1) != Some(&b'.') {
        return None;
    }
    Some(MemberParts {
        modifiers,
        value_type,
        declaring_type,
        tail: &id[close1 + 2..],
    })
}

/// True if `id` has the `['value type'] ['declaring type'].` skeleton
/// shared by method, field, property, and event identifiers.
pub(crate) fn has_member_shape(id: &str) -> bool {
    split_member(id).is_some()
}

fn has_modifier(modifiers: &str, wanted: &str) -> bool {
    modifiers.split_whitespace().any(|token| token == wanted)
}

/// Walks the parameter list closed by the last `)` of `id`. Parameter
/// types are bracketed, so delegate-typed parameters with embedded
/// parentheses do not derail the walk. Malformed lists yield no
/// parameters.
fn parse_parameter_list(id: &str) -> Vec<ParameterName> {
    let Some(close) = id.rfind(')') else {
        return Vec::new();
    };
    let Some(open) = scan::find_matching_open(id, close) else {
        return Vec::new();
    };

    let bytes = id.as_bytes();
    let mut parameters = Vec::new();
    let mut current = open + 1;
    while current < close {
        if bytes[current] == b' ' {
            current += 1;
            continue;
        }
        let start = current;
        if bytes[current] != b'[' {
            match scan::find_next(id, current, b"[") {
                Some(i) if i < close => current = i,
                _ => break,
            }
        }
        let Some(type_close) = scan::find_matching_close(id, current) else {
            break;
        };
        let Some(end) = scan::find_next(id, type_close, b",)") else {
            break;
        };
        parameters.push(ParameterName::new(id[start..end].trim()));
        current = end + 1;
    }
    parameters
}

/// Extracts the method type-parameter list attached to `full_name`
/// (`M`2[[T],[U]]`).
fn type_parameter_list(full_name: &str) -> Vec<TypeName> {
    let Some((open, close)) = types::first_argument_group(full_name) else {
        return Vec::new();
    };
    scan::split_top_level_segments(full_name, open, close)
        .into_iter()
        .map(|segment| {
            let inner = segment
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .unwrap_or(segment);
            TypeName::new(inner.trim())
        })
        .collect()
}

/// A method name:
/// `'modifiers' ['return type'] ['declaring type'].'name'('parameters')`,
/// with an optional `` `N[[...]] `` type-parameter segment on the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodName(String);

impl MethodName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_METHOD.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_METHOD
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    fn parts(&self) -> Option<MemberParts<'_>> {
        split_member(&self.0)
    }

    pub fn is_static(&self) -> bool {
        self.parts()
            .is_some_and(|p| has_modifier(p.modifiers, "static"))
    }

    pub fn return_type(&self) -> TypeName {
        match self.parts() {
            Some(p) => TypeName::new(p.value_type),
            None => TypeName::unknown(),
        }
    }

    pub fn declaring_type(&self) -> TypeName {
        match self.parts() {
            Some(p) => TypeName::new(p.declaring_type),
            None => TypeName::unknown(),
        }
    }

    /// The method name including its type-parameter segment, without the
    /// parameter list.
    pub fn full_name(&self) -> String {
        let Some(p) = self.parts() else {
            return String::new();
        };
        match scan::find_next(p.tail, 0, b"(") {
            Some(paren) => p.tail[..paren].to_string(),
            None => p.tail.to_string(),
        }
    }

    /// The bare method name, without arity tick or type parameters.
    pub fn simple_name(&self) -> String {
        let full = self.full_name();
        match scan::find_next(&full, 0, b"`") {
            Some(tick) => full[..tick].to_string(),
            None => full,
        }
    }

    pub fn type_parameters(&self) -> Vec<TypeName> {
        type_parameter_list(&self.full_name())
    }

    pub fn has_type_parameters(&self) -> bool {
        !self.type_parameters().is_empty()
    }

    pub fn parameters(&self) -> Vec<ParameterName> {
        parse_parameter_list(&self.0)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters().is_empty()
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.simple_name().as_str(), ".ctor" | ".cctor")
    }

    pub fn is_extension_method(&self) -> bool {
        self.is_static()
            && self
                .parameters()
                .first()
                .is_some_and(ParameterName::is_extension_target)
    }
}

/// A field name: `'modifiers' ['value type'] ['declaring type'].'name'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_MEMBER.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_MEMBER
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn is_static(&self) -> bool {
        split_member(&self.0).is_some_and(|p| has_modifier(p.modifiers, "static"))
    }

    pub fn value_type(&self) -> TypeName {
        match split_member(&self.0) {
            Some(p) => TypeName::new(p.value_type),
            None => TypeName::unknown(),
        }
    }

    pub fn declaring_type(&self) -> TypeName {
        match split_member(&self.0) {
            Some(p) => TypeName::new(p.declaring_type),
            None => TypeName::unknown(),
        }
    }

    pub fn simple_name(&self) -> String {
        match split_member(&self.0) {
            Some(p) => p.tail.to_string(),
            None => String::new(),
        }
    }
}

/// An event name; the value type slot holds the handler type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventName(String);

impl EventName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_MEMBER.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_MEMBER
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn is_static(&self) -> bool {
        split_member(&self.0).is_some_and(|p| has_modifier(p.modifiers, "static"))
    }

    pub fn handler_type(&self) -> TypeName {
        match split_member(&self.0) {
            Some(p) => TypeName::new(p.value_type),
            None => TypeName::unknown(),
        }
    }

    pub fn declaring_type(&self) -> TypeName {
        match split_member(&self.0) {
            Some(p) => TypeName::new(p.declaring_type),
            None => TypeName::unknown(),
        }
    }

    pub fn simple_name(&self) -> String {
        match split_member(&self.0) {
            Some(p) => p.tail.to_string(),
            None => String::new(),
        }
    }
}

/// A property name:
/// `'get set' 'modifiers' ['value type'] ['declaring type'].'name'()`,
/// with an optional indexer parameter list inside the parentheses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyName(String);

impl PropertyName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_MEMBER.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_MEMBER
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    fn modifiers(&self) -> &str {
        match self.0.find('[') {
            Some(open) => self.0[..open].trim(),
            None => "",
        }
    }

    pub fn has_getter(&self) -> bool {
        has_modifier(self.modifiers(), "get")
    }

    pub fn has_setter(&self) -> bool {
        has_modifier(self.modifiers(), "set")
    }

    pub fn is_static(&self) -> bool {
        has_modifier(self.modifiers(), "static")
    }

    pub fn value_type(&self) -> TypeName {
        match split_member(&self.0) {
            Some(p) => TypeName::new(p.value_type),
            None => TypeName::unknown(),
        }
    }

    pub fn declaring_type(&self) -> TypeName {
        match split_member(&self.0) {
            Some(p) => TypeName::new(p.declaring_type),
            None => TypeName::unknown(),
        }
    }

    pub fn simple_name(&self) -> String {
        let Some(p) = split_member(&self.0) else {
            return String::new();
        };
        match scan::find_next(p.tail, 0, b"(") {
            Some(paren) => p.tail[..paren].to_string(),
            None => p.tail.to_string(),
        }
    }

    pub fn parameters(&self) -> Vec<ParameterName> {
        parse_parameter_list(&self.0)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters().is_empty()
    }

    pub fn is_indexer(&self) -> bool {
        self.has_parameters()
    }
}

/// A parameter name: `'modifiers' ['value type'] 'name'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterName(String);

impl ParameterName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_PARAMETER.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_PARAMETER
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn modifiers(&self) -> &str {
        match self.0.find('[') {
            Some(open) => self.0[..open].trim(),
            None => "",
        }
    }

    pub fn value_type(&self) -> TypeName {
        let Some(open) = self.0.find('[') else {
            return TypeName::unknown();
        };
        match scan::find_matching_close(&self.0, open) {
            Some(close) => TypeName::new(&self.0[open + 1..close]),
            None => TypeName::unknown(),
        }
    }

    pub fn name(&self) -> &str {
        let Some(open) = self.0.find('[') else {
            return self.0.trim();
        };
        match scan::find_matching_close(&self.0, open) {
            Some(close) => self.0[close + 1..].trim(),
            None => "",
        }
    }

    pub fn is_output(&self) -> bool {
        has_modifier(self.modifiers(), "out")
    }

    pub fn is_pass_by_reference(&self) -> bool {
        has_modifier(self.modifiers(), "ref")
    }

    pub fn is_parameter_array(&self) -> bool {
        has_modifier(self.modifiers(), "params")
    }

    pub fn is_optional(&self) -> bool {
        has_modifier(self.modifiers(), "opt")
    }

    /// The `this` marker on the first parameter of an extension method.
    pub fn is_extension_target(&self) -> bool {
        has_modifier(self.modifiers(), "this")
    }
}

/// A lambda name: `['return type'] ('parameters')`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LambdaName(String);

impl LambdaName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_LAMBDA.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_LAMBDA
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn return_type(&self) -> TypeName {
        let Some(open) = self.0.find('[') else {
            return TypeName::unknown();
        };
        match scan::find_matching_close(&self.0, open) {
            Some(close) => TypeName::new(&self.0[open + 1..close]),
            None => TypeName::unknown(),
        }
    }

    pub fn parameters(&self) -> Vec<ParameterName> {
        parse_parameter_list(&self.0)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters().is_empty()
    }
}

/// A local variable name: `['value type'] 'name'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalVariableName(String);

impl LocalVariableName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_LOCAL_VARIABLE.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_LOCAL_VARIABLE
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn value_type(&self) -> TypeName {
        let Some(open) = self.0.find('[') else {
            return TypeName::unknown();
        };
        match scan::find_matching_close(&self.0, open) {
            Some(close) => TypeName::new(&self.0[open + 1..close]),
            None => TypeName::unknown(),
        }
    }

    pub fn name(&self) -> &str {
        let Some(open) = self.0.find('[') else {
            return self.0.trim();
        };
        match scan::find_matching_close(&self.0, open) {
            Some(close) => self.0[close + 1..].trim(),
            None => "",
        }
    }
}
