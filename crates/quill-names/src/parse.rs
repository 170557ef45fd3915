//! Identifier parsing and shape-based variant detection.
//!
//! Every entry point repairs legacy formats before constructing a name and
//! degrades to the variant's typed unknown value when the repaired string
//! still does not match the expected shape. [`parse`] additionally detects
//! the variant itself, either from a serialization tag prefix or from the
//! shape of the identifier; it never fails.

use crate::fixes;
use crate::ide::{DocumentName, ProjectItemName, ProjectName, SolutionName, WindowName};
use crate::members::{
    self, EventName, FieldName, LambdaName, LocalVariableName, MethodName, ParameterName,
    PropertyName,
};
use crate::org::{AssemblyName, NamespaceName};
use crate::scan;
use crate::serialization::{self, NameKind};
use crate::types::TypeName;
use crate::{AliasName, GeneralName, Name};

const TYPE_PREFIXES: &[&str] = &["d:", "i:", "e:", "s:", "p:"];

const ACCESSOR_MODIFIERS: &[&str] = &["get", "set", "static"];
const PARAMETER_MODIFIERS: &[&str] = &["out", "ref", "params", "opt", "this"];

/// Parses an arbitrary identifier into the best-matching name variant.
///
/// A leading serialization tag (either generation) selects the variant
/// directly; otherwise the variant is detected from the identifier's shape.
/// Unrecognized shapes come back as [`Name::General`], never as an error.
pub fn parse(raw: &str) -> Name {
    if let Some((tag, rest)) = raw.split_once(':') {
        if let Some(kind) = serialization::kind_for_tag(tag) {
            return parse_as(kind, rest);
        }
    }
    let id = fixes::fix_identifier(raw);
    detect_shape(&id)
}

/// Dispatches to the typed entry point for `kind`.
pub(crate) fn parse_as(kind: NameKind, id: &str) -> Name {
    match kind {
        NameKind::General => Name::General(parse_general(id)),
        NameKind::Type => Name::Type(parse_type(id)),
        NameKind::Method => Name::Method(parse_method(id)),
        NameKind::Field => Name::Field(parse_field(id)),
        NameKind::Property => Name::Property(parse_property(id)),
        NameKind::Event => Name::Event(parse_event(id)),
        NameKind::Parameter => Name::Parameter(parse_parameter(id)),
        NameKind::Lambda => Name::Lambda(parse_lambda(id)),
        NameKind::LocalVariable => Name::LocalVariable(parse_local_variable(id)),
        NameKind::Namespace => Name::Namespace(parse_namespace(id)),
        NameKind::Assembly => Name::Assembly(parse_assembly(id)),
        NameKind::Alias => Name::Alias(parse_alias(id)),
        NameKind::Document => Name::Document(parse_document(id)),
        NameKind::Window => Name::Window(parse_window(id)),
        NameKind::Solution => Name::Solution(parse_solution(id)),
        NameKind::Project => Name::Project(parse_project(id)),
        NameKind::ProjectItem => Name::ProjectItem(parse_project_item(id)),
    }
}

fn detect_shape(id: &str) -> Name {
    if id.is_empty() {
        return Name::General(GeneralName::new(id));
    }
    if TYPE_PREFIXES.iter().any(|prefix| id.starts_with(prefix)) {
        return Name::Type(TypeName::new(id));
    }

    if let Some(open) = id.find('[') {
        let head: Vec<&str> = id[..open].split_whitespace().collect();
        let accessors = head.iter().all(|t| ACCESSOR_MODIFIERS.contains(t));
        if accessors && head.iter().any(|t| *t == "get" || *t == "set") {
            return Name::Property(PropertyName::new(id));
        }
        if !head.is_empty() && head.iter().all(|t| PARAMETER_MODIFIERS.contains(t)) {
            return Name::Parameter(ParameterName::new(id));
        }
        if accessors {
            if let Some(name) = detect_member(id, open, head.is_empty()) {
                return name;
            }
        }
    }

    // A top-level comma separates a type from its assembly reference.
    if scan::find_next(id, 0, b",").is_some() {
        return Name::Type(TypeName::new(id));
    }
    Name::General(GeneralName::new(id))
}

/// Detects the member shapes `[V] [D].tail` (method, field, event) and
/// `[V] (params)` (lambda), starting from the first bracket. Anything else
/// is a miss, left to the caller's fallback.
fn detect_member(id: &str, open: usize, allow_lambda: bool) -> Option<Name> {
    let bytes = id.as_bytes();
    let close0 = scan::find_matching_close(id, open)?;
    let mut i = close0 + 1;
    while bytes.get(i) == Some(&b' ') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'[') => {
            let close1 = scan::find_matching_close(id, i)?;
            if bytes.get(close1 + 1) != Some(&b'.') {
                return None;
            }
            let tail = &id[close1 + 2..];
            if scan::find_next(tail, 0, b"(").is_some() {
                return Some(Name::Method(MethodName::new(id)));
            }
            // Parenthesis-free members carry a value: events hold a
            // delegate-typed handler, everything else is a field.
            if TypeName::new(&id[open + 1..close0]).is_delegate() {
                Some(Name::Event(EventName::new(id)))
            } else {
                Some(Name::Field(FieldName::new(id)))
            }
        }
        Some(b'(') if allow_lambda => Some(Name::Lambda(LambdaName::new(id))),
        _ => None,
    }
}

/// Parses a type identifier of any shape.
pub fn parse_type(raw: &str) -> TypeName {
    TypeName::new(fixes::fix_identifier(raw))
}

/// Parses a method identifier, including repairs for historically broken
/// serialized forms.
pub fn parse_method(raw: &str) -> MethodName {
    let id = fixes::fix_method_identifier(raw);
    if members::has_member_shape(&id) && id.ends_with(')') {
        MethodName::new(id)
    } else {
        tracing::debug!(
            target: "quill.names",
            identifier = %id,
            "identifier does not match the method shape; degrading to unknown"
        );
        MethodName::unknown()
    }
}

pub fn parse_field(raw: &str) -> FieldName {
    let id = fixes::fix_identifier(raw);
    if members::has_member_shape(&id) {
        FieldName::new(id)
    } else {
        FieldName::unknown()
    }
}

/// Parses a property identifier, inserting missing accessor modifiers and
/// the call parenthesis dropped by the legacy member encoding.
pub fn parse_property(raw: &str) -> PropertyName {
    let id = fixes::fix_property_identifier(raw);
    let property = PropertyName::new(id);
    if members::has_member_shape(property.identifier())
        && (property.has_getter() || property.has_setter())
    {
        property
    } else {
        PropertyName::unknown()
    }
}

pub fn parse_event(raw: &str) -> EventName {
    let id = fixes::fix_identifier(raw);
    if members::has_member_shape(&id) {
        EventName::new(id)
    } else {
        EventName::unknown()
    }
}

pub fn parse_parameter(raw: &str) -> ParameterName {
    let id = fixes::fix_identifier(raw);
    if has_value_slot(&id) {
        ParameterName::new(id)
    } else {
        ParameterName::unknown()
    }
}

pub fn parse_lambda(raw: &str) -> LambdaName {
    let id = fixes::fix_identifier(raw);
    if has_value_slot(&id) && id.ends_with(')') {
        LambdaName::new(id)
    } else {
        LambdaName::unknown()
    }
}

pub fn parse_local_variable(raw: &str) -> LocalVariableName {
    let id = fixes::fix_identifier(raw);
    if has_value_slot(&id) {
        LocalVariableName::new(id)
    } else {
        LocalVariableName::unknown()
    }
}

/// A balanced `[value type]` slot, required by parameter, lambda, and
/// local-variable identifiers.
fn has_value_slot(id: &str) -> bool {
    match id.find('[') {
        Some(open) => scan::find_matching_close(id, open).is_some(),
        None => false,
    }
}

pub fn parse_namespace(raw: &str) -> NamespaceName {
    NamespaceName::new(raw)
}

pub fn parse_assembly(raw: &str) -> AssemblyName {
    AssemblyName::new(raw.trim())
}

pub fn parse_alias(raw: &str) -> AliasName {
    AliasName::new(raw)
}

pub fn parse_general(raw: &str) -> GeneralName {
    GeneralName::new(raw)
}

// IDE component identifiers are captions and paths; the legacy fixer
// targets the code-entity grammar and is not applied to them.

pub fn parse_document(raw: &str) -> DocumentName {
    DocumentName::new(raw)
}

pub fn parse_window(raw: &str) -> WindowName {
    WindowName::new(raw)
}

pub fn parse_solution(raw: &str) -> SolutionName {
    SolutionName::new(raw)
}

pub fn parse_project(raw: &str) -> ProjectName {
    ProjectName::new(raw)
}

pub fn parse_project_item(raw: &str) -> ProjectItemName {
    ProjectItemName::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detects_types_by_prefix_and_assembly_tail() {
        assert!(matches!(parse("p:int"), Name::Type(TypeName::Predefined(_))));
        assert!(matches!(parse("d:[?] [n.D, P].()"), Name::Type(TypeName::Delegate(_))));
        assert!(matches!(parse("e:n.E, P"), Name::Type(_)));
        assert!(matches!(parse("n.C`1[[T]], P"), Name::Type(_)));
        assert!(matches!(parse("getdatetime.Program, getdatetime"), Name::Type(_)));
    }

    #[test]
    fn detects_member_shapes() {
        assert!(matches!(parse("[?] [?].M()"), Name::Method(_)));
        assert!(matches!(parse("static [R, P] [D, P].M([T, P] p)"), Name::Method(_)));
        assert!(matches!(parse("[T, P] [D, P]._f"), Name::Field(_)));
        assert!(matches!(parse("static [T, P] [D, P]._f"), Name::Field(_)));
        assert!(matches!(
            parse("[d:[?] [H, P].()] [D, P].Changed"),
            Name::Event(_)
        ));
        assert!(matches!(parse("get set [p:int] [D, P].P()"), Name::Property(_)));
        // legacy property encodings are repaired before detection
        assert!(matches!(parse("get [p:int] [D, P].P"), Name::Property(_)));
        assert!(matches!(parse("[R, P] ([T, P] p)"), Name::Lambda(_)));
        assert!(matches!(parse("out [T, P] arg"), Name::Parameter(_)));
    }

    #[test]
    fn unrecognized_shapes_become_general_names() {
        assert!(matches!(parse(""), Name::General(_)));
        assert!(matches!(parse("just some text"), Name::General(_)));
        // a bare value slot could be a parameter or a local variable
        assert!(matches!(parse("[T, P] x"), Name::General(_)));
        assert!(matches!(parse("vsToolWindow Unit Test Sessions"), Name::General(_)));
    }

    #[test]
    fn tagged_identifiers_bypass_shape_detection() {
        assert_eq!(
            parse("0LocalVar:[T, P] x"),
            Name::LocalVariable(LocalVariableName::new("[T, P] x"))
        );
        assert_eq!(
            parse("CSharp.LocalVariableName:[T, P] x"),
            Name::LocalVariable(LocalVariableName::new("[T, P] x"))
        );
        assert_eq!(
            parse("0Win:vsToolWindow Unit Test Sessions"),
            Name::Window(WindowName::new("vsToolWindow Unit Test Sessions"))
        );
    }

    #[test]
    fn entry_points_are_idempotent_on_canonical_identifiers() {
        let method = parse_method("[R, P] [D, P].M([T, P] p)");
        assert_eq!(parse_method(method.identifier()), method);

        let property = parse_property("get set [p:int] [D, P].P()");
        assert_eq!(parse_property(property.identifier()), property);

        let t = parse_type("n.C1`1[[T1]]+C2`1[[T2]], P");
        assert_eq!(parse_type(t.identifier()), t);
    }

    #[test]
    fn entry_points_repair_legacy_encodings() {
        assert_eq!(
            parse_type("n.C1`1[[T1]]+C2[[T2]]+C3[[T3]], P").identifier(),
            "n.C1`1[[T1]]+C2`1[[T2]]+C3`1[[T3]], P"
        );
        assert_eq!(parse_type("A[][], B").identifier(), "A[,], B");
        assert_eq!(
            parse_property("[?] [?].P").identifier(),
            "get set [?] [?].P()"
        );
    }

    #[test]
    fn malformed_input_degrades_to_typed_unknowns() {
        assert!(parse_method("no method here").is_unknown());
        assert!(parse_method("[R, P] [D, P].f").is_unknown());
        assert!(parse_property("static f [?]").is_unknown());
        assert!(parse_field("]broken[").is_unknown());
        assert!(parse_event("x").is_unknown());
        assert!(parse_parameter("p").is_unknown());
        assert!(parse_lambda("() broken").is_unknown());
        assert!(parse_local_variable("v").is_unknown());
    }

    #[test]
    fn unknown_placeholders_parse_to_themselves() {
        assert!(parse_type("?").is_unknown());
        assert!(parse_type("").is_unknown());
        assert!(parse_method("[?] [?].???()").is_unknown());
        assert!(parse_field("[?] [?].???").is_unknown());
        assert!(parse_lambda("[?] ()").is_unknown());
    }

    #[test]
    fn predefined_types_resolve_and_round_trip() {
        let t = parse_type("p:int");
        assert_eq!(t.full_name(), "System.Int32");
        assert_eq!(parse_type(t.identifier()).identifier(), "p:int");
    }
}
