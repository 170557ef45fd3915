//! Privacy-preserving anonymization of structured names.
//!
//! Identifier segments that originate in the enclosing project (a declaring
//! assembly without a version suffix, or an unknown one) are replaced by a
//! deterministic one-way hash; segments from referenced external assemblies
//! and all structural tokens (brackets, arity ticks, separators, kind
//! prefixes) pass through untouched. The transform recurses into every
//! nested position and reassembles the identifier around the original
//! bracket and arity structure, so anonymized names re-parse to the same
//! variant they started as.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use quill_names::scan;
use quill_names::{
    AliasName, AssemblyName, DocumentName, EventName, FieldName, GeneralName, LambdaName,
    LocalVariableName, MethodName, Name, NamespaceName, ParameterName, ProjectItemName,
    ProjectName, PropertyName, SolutionName, TypeName, WindowName,
};

/// Hashes one identifier segment.
///
/// Deterministic, one-way, and closed over the identifier grammar's
/// character set: 16 digest bytes encoded as 24 chars of url-safe base64,
/// always ending in `==`. The empty segment stays empty rather than
/// becoming the hash of nothing.
pub fn hash_segment(segment: &str) -> String {
    if segment.is_empty() {
        return String::new();
    }
    let digest = Sha256::digest(segment.as_bytes());
    URL_SAFE.encode(&digest[..16])
}

fn hash_if_file(segment: &str) -> String {
    if segment.contains('\\') || segment.contains('.') {
        hash_segment(segment)
    } else {
        segment.to_string()
    }
}

/// Anonymizes any name, preserving its variant.
///
/// Unknown names pass through unchanged, as does everything declared in an
/// external, versioned assembly; re-anonymizing such a name is a no-op.
pub fn anonymize(name: &Name) -> Name {
    if name.is_unknown() {
        return name.clone();
    }
    if name.is_hashed() {
        tracing::debug!(
            target: "quill.anonymize",
            identifier = %name.identifier(),
            "anonymizing a name that already carries hashed segments"
        );
    }
    match name {
        Name::General(n) => Name::General(GeneralName::new(hash_segment(n.identifier()))),
        Name::Type(t) => Name::Type(anonymize_type(t)),
        Name::Method(m) => Name::Method(anonymize_method(m)),
        Name::Field(f) => Name::Field(anonymize_field(f)),
        Name::Property(p) => Name::Property(anonymize_property(p)),
        Name::Event(e) => Name::Event(anonymize_event(e)),
        Name::Parameter(p) => Name::Parameter(anonymize_parameter(p)),
        Name::Lambda(l) => Name::Lambda(anonymize_lambda(l)),
        Name::LocalVariable(v) => Name::LocalVariable(anonymize_local_variable(v)),
        Name::Namespace(n) => Name::Namespace(anonymize_namespace(n)),
        Name::Assembly(a) => Name::Assembly(anonymize_assembly(a)),
        Name::Alias(a) => Name::Alias(AliasName::new(hash_segment(a.identifier()))),
        Name::Document(d) => Name::Document(anonymize_document(d)),
        Name::Window(w) => Name::Window(anonymize_window(w)),
        Name::Solution(s) => Name::Solution(anonymize_solution(s)),
        Name::Project(p) => Name::Project(anonymize_project(p)),
        Name::ProjectItem(i) => Name::ProjectItem(anonymize_project_item(i)),
    }
}

/// Anonymizes a type of any shape.
pub fn anonymize_type(t: &TypeName) -> TypeName {
    if t.is_unknown() {
        return t.clone();
    }
    match t {
        TypeName::Predefined(_) => t.clone(),
        TypeName::Array(_) => TypeName::array_of(&anonymize_type(&t.element_type()), t.rank()),
        TypeName::Delegate(_) => {
            let signature = anonymize_method(&t.delegate_signature());
            TypeName::new(format!("d:{}", signature.identifier()))
        }
        TypeName::Parameter(_) => anonymize_type_parameter(t, false),
        TypeName::Regular(_) => anonymize_regular(t),
    }
}

// Whether a member's simple name and parameter names are up for hashing:
// the declaring type originates in the enclosing project, or is unknown
// (and then cannot prove it is external).
fn declared_locally(declaring: &TypeName) -> bool {
    declaring.is_unknown() || declaring.assembly().is_local_project()
}

pub fn anonymize_method(method: &MethodName) -> MethodName {
    if method.is_unknown() {
        return method.clone();
    }
    let declaring = method.declaring_type();
    let local = declared_locally(&declaring);

    let mut id = String::new();
    if method.is_static() {
        id.push_str("static ");
    }
    push_bracketed(&mut id, &anonymize_type(&method.return_type()));
    id.push(' ');
    push_bracketed(&mut id, &anonymize_type(&declaring));
    id.push('.');
    let simple = method.simple_name();
    if local && !method.is_constructor() {
        id.push_str(&hash_segment(&simple));
    } else {
        id.push_str(&simple);
    }
    let type_parameters = method.type_parameters();
    if !type_parameters.is_empty() {
        id.push('`');
        id.push_str(&type_parameters.len().to_string());
        push_argument_list(&mut id, &type_parameters, local);
    }
    push_parameter_list(&mut id, &method.parameters(), local);
    MethodName::new(id)
}

pub fn anonymize_field(field: &FieldName) -> FieldName {
    if field.is_unknown() {
        return field.clone();
    }
    let declaring = field.declaring_type();
    let mut id = String::new();
    if field.is_static() {
        id.push_str("static ");
    }
    push_bracketed(&mut id, &anonymize_type(&field.value_type()));
    id.push(' ');
    push_bracketed(&mut id, &anonymize_type(&declaring));
    id.push('.');
    push_member_name(&mut id, &field.simple_name(), &declaring);
    FieldName::new(id)
}

pub fn anonymize_property(property: &PropertyName) -> PropertyName {
    if property.is_unknown() {
        return property.clone();
    }
    let declaring = property.declaring_type();
    let mut id = String::new();
    if property.has_getter() {
        id.push_str("get ");
    }
    if property.has_setter() {
        id.push_str("set ");
    }
    if property.is_static() {
        id.push_str("static ");
    }
    push_bracketed(&mut id, &anonymize_type(&property.value_type()));
    id.push(' ');
    push_bracketed(&mut id, &anonymize_type(&declaring));
    id.push('.');
    push_member_name(&mut id, &property.simple_name(), &declaring);
    push_parameter_list(&mut id, &property.parameters(), declared_locally(&declaring));
    PropertyName::new(id)
}

pub fn anonymize_event(event: &EventName) -> EventName {
    if event.is_unknown() {
        return event.clone();
    }
    let declaring = event.declaring_type();
    let mut id = String::new();
    if event.is_static() {
        id.push_str("static ");
    }
    push_bracketed(&mut id, &anonymize_type(&event.handler_type()));
    id.push(' ');
    push_bracketed(&mut id, &anonymize_type(&declaring));
    id.push('.');
    push_member_name(&mut id, &event.simple_name(), &declaring);
    EventName::new(id)
}

/// Anonymizes a standalone parameter; names of standalone parameters are
/// always project-local.
pub fn anonymize_parameter(parameter: &ParameterName) -> ParameterName {
    if parameter.is_unknown() {
        return parameter.clone();
    }
    anonymize_parameter_name(parameter, true)
}

/// Lambdas only occur in project source, so their parameter names always
/// hash.
pub fn anonymize_lambda(lambda: &LambdaName) -> LambdaName {
    if lambda.is_unknown() {
        return lambda.clone();
    }
    let mut id = String::new();
    push_bracketed(&mut id, &anonymize_type(&lambda.return_type()));
    id.push(' ');
    push_parameter_list(&mut id, &lambda.parameters(), true);
    LambdaName::new(id)
}

pub fn anonymize_local_variable(variable: &LocalVariableName) -> LocalVariableName {
    if variable.is_unknown() {
        return variable.clone();
    }
    let mut id = String::new();
    push_bracketed(&mut id, &anonymize_type(&variable.value_type()));
    id.push(' ');
    id.push_str(&hash_segment(variable.name()));
    LocalVariableName::new(id)
}

/// The namespace hashes as one segment; the global namespace stays empty.
pub fn anonymize_namespace(namespace: &NamespaceName) -> NamespaceName {
    if namespace.is_unknown() {
        return namespace.clone();
    }
    NamespaceName::new(hash_segment(namespace.identifier()))
}

pub fn anonymize_assembly(assembly: &AssemblyName) -> AssemblyName {
    if assembly.is_unknown() || !assembly.is_local_project() {
        return assembly.clone();
    }
    AssemblyName::new(hash_segment(assembly.identifier()))
}

pub fn anonymize_document(document: &DocumentName) -> DocumentName {
    if document.is_unknown() {
        return document.clone();
    }
    DocumentName::new(format!(
        "{} {}",
        document.language(),
        hash_if_file(document.file_name())
    ))
}

pub fn anonymize_window(window: &WindowName) -> WindowName {
    if window.is_unknown() {
        return window.clone();
    }
    WindowName::new(format!(
        "{} {}",
        window.window_kind(),
        hash_if_file(window.caption())
    ))
}

pub fn anonymize_solution(solution: &SolutionName) -> SolutionName {
    if solution.is_unknown() {
        return solution.clone();
    }
    SolutionName::new(hash_segment(solution.identifier()))
}

pub fn anonymize_project(project: &ProjectName) -> ProjectName {
    if project.is_unknown() {
        return project.clone();
    }
    ProjectName::new(format!(
        "{} {}",
        project.project_kind(),
        hash_if_file(project.name())
    ))
}

pub fn anonymize_project_item(item: &ProjectItemName) -> ProjectItemName {
    if item.is_unknown() {
        return item.clone();
    }
    ProjectItemName::new(format!("{} {}", item.item_kind(), hash_if_file(item.name())))
}

fn push_bracketed(out: &mut String, t: &TypeName) {
    out.push('[');
    out.push_str(t.identifier());
    out.push(']');
}

fn push_member_name(out: &mut String, simple_name: &str, declaring: &TypeName) {
    if declared_locally(declaring) {
        out.push_str(&hash_segment(simple_name));
    } else {
        out.push_str(simple_name);
    }
}

fn push_parameter_list(out: &mut String, parameters: &[ParameterName], hash_names: bool) {
    out.push('(');
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(anonymize_parameter_name(parameter, hash_names).identifier());
    }
    out.push(')');
}

fn anonymize_parameter_name(parameter: &ParameterName, hash_name: bool) -> ParameterName {
    let mut id = String::new();
    if parameter.is_parameter_array() {
        id.push_str("params ");
    }
    if parameter.is_output() {
        id.push_str("out ");
    }
    if parameter.is_optional() {
        id.push_str("opt ");
    }
    if parameter.is_pass_by_reference() {
        id.push_str("ref ");
    }
    if parameter.is_extension_target() {
        id.push_str("this ");
    }
    let value_type = parameter.value_type();
    id.push('[');
    if hash_name && value_type.is_type_parameter() && value_type.bound_type().is_none() {
        // An unbound type parameter in a hashed context names a generic
        // declared by the enclosing member or type; its short name leaks.
        id.push_str(&hash_segment(value_type.short_name()));
    } else {
        id.push_str(anonymize_type(&value_type).identifier());
    }
    id.push_str("] ");
    if hash_name {
        id.push_str(&hash_segment(parameter.name()));
    } else {
        id.push_str(parameter.name());
    }
    ParameterName::new(id)
}

/// Anonymizes a `short-name [-> bound]` generic type parameter. The short
/// name hashes only in positions declared by project-local types; a bound
/// that is itself a bare type parameter hashes its short name, everything
/// else recurses through [`anonymize_type`].
fn anonymize_type_parameter(tp: &TypeName, hash_short_name: bool) -> TypeName {
    let short = tp.short_name();
    let left = if hash_short_name {
        hash_segment(short)
    } else {
        short.to_string()
    };
    match tp.bound_type() {
        None => TypeName::new(left),
        Some(bound) => {
            let right = if bound.is_type_parameter() && bound.bound_type().is_none() {
                hash_segment(bound.short_name())
            } else {
                anonymize_type(&bound).identifier().to_string()
            };
            TypeName::new(format!("{left} -> {right}"))
        }
    }
}

fn anonymize_type_argument(argument: &TypeName, hash_short_names: bool) -> TypeName {
    if argument.is_type_parameter() {
        anonymize_type_parameter(argument, hash_short_names)
    } else {
        anonymize_type(argument)
    }
}

fn push_argument_list(out: &mut String, arguments: &[TypeName], hash_short_names: bool) {
    out.push('[');
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('[');
        out.push_str(anonymize_type_argument(argument, hash_short_names).identifier());
        out.push(']');
    }
    out.push(']');
}

/// Class, interface, enum, and struct references. Project-local ones hash
/// the namespace (as one segment), every `+`-nested simple name, and their
/// type-parameter short names; external ones keep the name part and only
/// recurse into type-parameter bounds.
fn anonymize_regular(t: &TypeName) -> TypeName {
    let id = t.identifier();
    let local = t.assembly().is_local_project();

    let prefix = match id.as_bytes().get(1) {
        Some(b':') => &id[..2],
        _ => "",
    };
    let mut rebuilt = String::from(prefix);
    rebuilt.push_str(&anonymize_full_name(&t.full_name(), local));

    let assembly = t.assembly();
    if !assembly.identifier().is_empty() {
        rebuilt.push_str(", ");
        rebuilt.push_str(anonymize_assembly(&assembly).identifier());
    }
    TypeName::new(rebuilt)
}

fn anonymize_full_name(full: &str, hash_segments: bool) -> String {
    let mut out = String::new();
    let mut start = 0;
    let mut first = true;
    loop {
        let plus = scan::find_next(full, start, b"+");
        let end = plus.unwrap_or(full.len());
        if !first {
            out.push('+');
        }
        push_name_segment(&mut out, &full[start..end], first, hash_segments);
        first = false;
        match plus {
            Some(i) => start = i + 1,
            None => break,
        }
    }
    out
}

/// One `+`-separated segment: `[namespace.]name[`N][rank][[args]]`. Only
/// the first segment of a chain carries the namespace.
fn push_name_segment(out: &mut String, segment: &str, is_first: bool, hash: bool) {
    let (namespace, rest) = if is_first {
        split_namespace(segment)
    } else {
        ("", segment)
    };
    if !namespace.is_empty() {
        if hash {
            out.push_str(&hash_segment(namespace));
        } else {
            out.push_str(namespace);
        }
        out.push('.');
    }

    let arguments = argument_group(rest);
    let head = match arguments {
        Some((open, _)) => &rest[..open],
        None => rest,
    };
    let name_end = head
        .find(|c| c == '`' || c == '[')
        .unwrap_or(head.len());
    if hash {
        out.push_str(&hash_segment(&head[..name_end]));
    } else {
        out.push_str(&head[..name_end]);
    }
    // arity tick and any rank suffix are structure, never hashed
    out.push_str(&head[name_end..]);

    if let Some((open, close)) = arguments {
        let inner: Vec<TypeName> = scan::split_top_level_segments(rest, open, close)
            .into_iter()
            .map(|s| {
                let bare = s
                    .strip_prefix('[')
                    .and_then(|s| s.strip_suffix(']'))
                    .unwrap_or(s);
                TypeName::new(bare.trim())
            })
            .collect();
        push_argument_list(out, &inner, hash);
        out.push_str(&rest[close + 1..]);
    }
}

/// Splits the namespace off a segment: everything up to the last `.`
/// before the arity tick or a bracket.
fn split_namespace(segment: &str) -> (&str, &str) {
    let mut last_dot = None;
    for (i, b) in segment.bytes().enumerate() {
        match b {
            b'`' | b'[' => break,
            b'.' => last_dot = Some(i),
            _ => {}
        }
    }
    match last_dot {
        Some(dot) => (&segment[..dot], &segment[dot + 1..]),
        None => ("", segment),
    }
}

/// Locates the `[[...]]` type-argument group of a segment, skipping any
/// rank suffix in front of it.
fn argument_group(segment: &str) -> Option<(usize, usize)> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'[' {
            let close = scan::find_matching_close(segment, i)?;
            if bytes.get(i + 1) == Some(&b'[') {
                return Some((i, close));
            }
            i = close + 1;
            continue;
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hashes_are_deterministic_grammar_safe_digests() {
        let hash = hash_segment("a");
        assert_eq!(hash, hash_segment("a"));
        assert_ne!(hash, hash_segment("b"));
        assert_eq!(hash.len(), 24);
        assert!(hash.ends_with("=="));
        assert!(hash
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'='));
    }

    #[test]
    fn empty_segments_stay_empty() {
        assert_eq!(hash_segment(""), "");
    }

    #[test]
    fn splits_namespaces_before_structure() {
        assert_eq!(split_namespace("My.Namespace.MyType"), ("My.Namespace", "MyType"));
        assert_eq!(split_namespace("MyType"), ("", "MyType"));
        assert_eq!(split_namespace("C`1[[N.T, P]]"), ("", "C`1[[N.T, P]]"));
    }

    #[test]
    fn file_shaped_segments_hash_plain_captions_do_not() {
        assert_eq!(hash_if_file("Unit Test Sessions"), "Unit Test Sessions");
        assert_ne!(hash_if_file("C:\\File.cs"), "C:\\File.cs");
        assert_ne!(hash_if_file("File.cs"), "File.cs");
    }
}
