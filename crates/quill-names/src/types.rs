//! Structured type names.
//!
//! A type identifier is a single string of the shape
//! `['kind:']'full-name'['`N''[[args]]'], 'assembly'[, 'version']` with
//! nested classes joined by `+` and type arguments nesting arbitrarily.
//! The concrete variant is discriminated once at construction; every
//! attribute is derived on demand from the identifier, which stays the
//! single source of truth.

use crate::members::{MethodName, ParameterName};
use crate::org::{AssemblyName, NamespaceName};
use crate::scan;
use crate::{alias, UNKNOWN_TYPE};

pub(crate) const PREFIX_ENUM: &str = "e:";
pub(crate) const PREFIX_INTERFACE: &str = "i:";
pub(crate) const PREFIX_STRUCT: &str = "s:";
pub(crate) const PREFIX_DELEGATE: &str = "d:";
pub(crate) const PREFIX_PREDEFINED: &str = "p:";

const PREDEFINED_ASSEMBLY: &str = "mscorlib, 4.0.0.0";

const SIMPLE_TYPES: &[&str] = &[
    "System.Boolean",
    "System.Byte",
    "System.Char",
    "System.Decimal",
    "System.Double",
    "System.Int16",
    "System.Int32",
    "System.Int64",
    "System.SByte",
    "System.Single",
    "System.UInt16",
    "System.UInt32",
    "System.UInt64",
];

/// A structured type name; the closed set of type shapes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// A class, enum, interface or struct reference, possibly nested and
    /// possibly generic. Also carries the unknown type `?`.
    Regular(String),
    /// A type with a `[,*]` rank suffix.
    Array(String),
    /// A `d:`-prefixed delegate type carrying a full method signature.
    Delegate(String),
    /// A `p:`-prefixed built-in alias (`p:int`, `p:string[]`, ...).
    Predefined(String),
    /// A generic type parameter: `T` or `T -> bound`.
    Parameter(String),
}

fn is_valid_short_name(s: &str) -> bool {
    let mut base = s;
    while let Some(stripped) = base.strip_suffix(']') {
        let Some(open) = stripped.rfind('[') else {
            return false;
        };
        if !stripped[open + 1..].bytes().all(|b| b == b',') {
            return false;
        }
        base = &stripped[..open];
    }
    !base.is_empty() && base.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_type_parameter_identifier(id: &str) -> bool {
    match id.find(" -> ") {
        Some(arrow) => is_valid_short_name(&id[..arrow]),
        None => is_valid_short_name(id),
    }
}

fn is_array_identifier(id: &str) -> bool {
    array_suffix_span(id).is_some()
}

/// Locates the `[,*]` rank suffix, if any: the first top-level bracket
/// opening directly onto `]` or `,`. For delegate identifiers the suffix
/// can only follow the closing parenthesis of the signature.
fn array_suffix_span(id: &str) -> Option<(usize, usize)> {
    let bytes = id.as_bytes();
    let mut i = if id.starts_with(PREFIX_DELEGATE) {
        id.rfind(')')? + 1
    } else {
        0
    };
    while i < bytes.len() {
        if bytes[i] == b'[' {
            match bytes.get(i + 1) {
                Some(b']') | Some(b',') => {
                    let close = scan::find_matching_close(id, i)?;
                    return Some((i, close));
                }
                _ => {
                    i = scan::find_matching_close(id, i)? + 1;
                    continue;
                }
            }
        }
        i += 1;
    }
    None
}

/// Index one past the end of the type portion, i.e. where the assembly
/// reference begins.
fn type_portion_end(id: &str) -> usize {
    match id.rfind(']') {
        Some(close) => close + 1,
        None => id.find(',').unwrap_or(id.len()),
    }
}

fn strip_kind_prefix(s: &str) -> &str {
    for prefix in [PREFIX_ENUM, PREFIX_INTERFACE, PREFIX_STRUCT] {
        if let Some(rest) = s.strip_prefix(prefix) {
            return rest;
        }
    }
    s
}

/// Removes all top-level bracket groups but keeps arity ticks, so
/// `n.C`1[[T]]+D[]` becomes `n.C`1+D`.
fn without_bracket_groups(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'[' {
            match scan::find_matching_close(s, i) {
                Some(close) => {
                    i = close + 1;
                    continue;
                }
                None => break,
            }
        }
        out.push(bytes[i] as char);
        i += 1;
    }
    out
}

/// Finds the last `+` separating a declaring type from its nested type,
/// scanning backwards from the assembly boundary and skipping bracket
/// groups.
fn find_nesting_plus(id: &str) -> Option<usize> {
    let bytes = id.as_bytes();
    let mut i = type_portion_end(id);
    while i > 0 {
        i -= 1;
        match bytes[i] {
            b']' => i = scan::find_matching_open(id, i)?,
            b'+' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Sum of the declared arities of all `` `N `` markers in `s`.
fn arity_sum(s: &str) -> usize {
    let mut total = 0usize;
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let digits: String = s[i + 1..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            total += digits.parse::<usize>().unwrap_or(0);
            i += 1 + digits.len();
        } else {
            i += 1;
        }
    }
    total
}

impl TypeName {
    /// Discriminates `identifier` into the matching type-name variant. An
    /// empty identifier normalizes to the unknown type.
    pub fn new(identifier: impl Into<String>) -> TypeName {
        let id: String = identifier.into();
        if id.is_empty() || id == UNKNOWN_TYPE {
            return TypeName::Regular(UNKNOWN_TYPE.to_string());
        }
        if id.starts_with(PREFIX_PREDEFINED) {
            return TypeName::Predefined(id);
        }
        if is_type_parameter_identifier(&id) {
            return TypeName::Parameter(id);
        }
        if is_array_identifier(&id) {
            return TypeName::Array(id);
        }
        if id.starts_with(PREFIX_DELEGATE) {
            return TypeName::Delegate(id);
        }
        TypeName::Regular(id)
    }

    pub fn unknown() -> TypeName {
        TypeName::Regular(UNKNOWN_TYPE.to_string())
    }

    /// Builds an array type of the given rank over `element`, placing the
    /// rank suffix at the canonical position for the element's shape.
    pub fn array_of(element: &TypeName, rank: usize) -> TypeName {
        debug_assert!(rank > 0);
        let suffix = format!("[{}]", ",".repeat(rank.saturating_sub(1)));
        let id = element.identifier();
        let rebuilt = match element {
            TypeName::Delegate(_) => format!("{id}{suffix}"),
            TypeName::Parameter(_) => match id.find(" -> ") {
                Some(arrow) => format!("{}{}{}", &id[..arrow], suffix, &id[arrow..]),
                None => format!("{id}{suffix}"),
            },
            _ => {
                // Before the argument list if there is one, otherwise at
                // the end of the type portion.
                let insert_at = first_argument_group(id)
                    .map(|(open, _)| open)
                    .unwrap_or_else(|| type_portion_end(id));
                format!("{}{}{}", &id[..insert_at], suffix, &id[insert_at..])
            }
        };
        TypeName::Array(rebuilt)
    }

    pub fn identifier(&self) -> &str {
        match self {
            TypeName::Regular(id)
            | TypeName::Array(id)
            | TypeName::Delegate(id)
            | TypeName::Predefined(id)
            | TypeName::Parameter(id) => id,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.identifier() == UNKNOWN_TYPE
    }

    pub fn is_hashed(&self) -> bool {
        self.identifier().contains("==")
    }

    pub fn is_predefined(&self) -> bool {
        matches!(self, TypeName::Predefined(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeName::Array(_))
            || matches!(self, TypeName::Predefined(id) if id.contains('['))
            || matches!(self, TypeName::Parameter(_) if self.parameter_rank_span().is_some())
    }

    pub fn is_delegate(&self) -> bool {
        matches!(self, TypeName::Delegate(_))
    }

    pub fn is_type_parameter(&self) -> bool {
        matches!(self, TypeName::Parameter(_))
    }

    pub fn is_enum(&self) -> bool {
        match self {
            TypeName::Regular(id) => id.starts_with(PREFIX_ENUM),
            TypeName::Parameter(_) => self.bound_predicate(TypeName::is_enum),
            _ => false,
        }
    }

    pub fn is_interface(&self) -> bool {
        match self {
            TypeName::Regular(id) => id.starts_with(PREFIX_INTERFACE),
            TypeName::Parameter(_) => self.bound_predicate(TypeName::is_interface),
            _ => false,
        }
    }

    pub fn is_void(&self) -> bool {
        match self {
            TypeName::Regular(_) => self.full_name() == "System.Void",
            TypeName::Predefined(id) => id == "p:void",
            TypeName::Parameter(_) => self.bound_predicate(TypeName::is_void),
            _ => false,
        }
    }

    pub fn is_simple(&self) -> bool {
        match self {
            TypeName::Regular(_) => SIMPLE_TYPES.contains(&self.full_name().as_str()),
            TypeName::Predefined(id) => {
                !matches!(id.as_str(), "p:void" | "p:object" | "p:string") && !id.contains('[')
            }
            TypeName::Parameter(_) => self.bound_predicate(TypeName::is_simple),
            _ => false,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeName::Regular(_) => self.full_name().starts_with("System.Nullable"),
            TypeName::Parameter(_) => self.bound_predicate(TypeName::is_nullable),
            _ => false,
        }
    }

    pub fn is_struct(&self) -> bool {
        match self {
            TypeName::Regular(id) => {
                id.starts_with(PREFIX_STRUCT)
                    || self.is_simple()
                    || self.is_void()
                    || self.is_nullable()
            }
            TypeName::Predefined(_) => self.is_simple() || self.is_void(),
            TypeName::Parameter(_) => self.bound_predicate(TypeName::is_struct),
            _ => false,
        }
    }

    pub fn is_value_type(&self) -> bool {
        self.is_struct() || self.is_enum()
    }

    pub fn is_class(&self) -> bool {
        match self {
            TypeName::Regular(_) => {
                !self.is_unknown() && !self.is_value_type() && !self.is_interface()
            }
            TypeName::Predefined(id) => matches!(id.as_str(), "p:object" | "p:string"),
            TypeName::Parameter(_) => self.bound_predicate(TypeName::is_class),
            _ => false,
        }
    }

    pub fn is_reference_type(&self) -> bool {
        match self {
            TypeName::Array(_) | TypeName::Delegate(_) => true,
            TypeName::Predefined(id) if id.contains('[') => true,
            _ => self.is_class() || self.is_interface(),
        }
    }

    fn bound_predicate(&self, predicate: fn(&TypeName) -> bool) -> bool {
        self.bound_type().as_ref().is_some_and(predicate)
    }

    /// True for types that declare generic arity, instantiated or not.
    pub fn is_generic(&self) -> bool {
        match self {
            TypeName::Regular(id) | TypeName::Array(id) => id[..type_portion_end(id)].contains('`'),
            TypeName::Delegate(_) => self.delegate_type().is_generic(),
            _ => false,
        }
    }

    pub fn has_type_arguments(&self) -> bool {
        !self.type_arguments().is_empty()
    }

    /// The instantiated type-argument list, in declaration order. Both
    /// the canonical per-segment attachment and the legacy flat list at
    /// the outermost class are supported.
    pub fn type_arguments(&self) -> Vec<TypeName> {
        match self {
            TypeName::Regular(id) | TypeName::Array(id) => {
                let mut arguments = Vec::new();
                let end = type_portion_end(id);
                let mut i = 0;
                while i < end {
                    if id.as_bytes()[i] == b'[' {
                        let Some(close) = scan::find_matching_close(id, i) else {
                            break;
                        };
                        if id.as_bytes().get(i + 1) == Some(&b'[') {
                            for segment in scan::split_top_level_segments(id, i, close) {
                                let inner = segment
                                    .strip_prefix('[')
                                    .and_then(|s| s.strip_suffix(']'))
                                    .unwrap_or(segment);
                                arguments.push(TypeName::new(inner.trim()));
                            }
                        }
                        i = close + 1;
                        continue;
                    }
                    i += 1;
                }
                arguments
            }
            TypeName::Delegate(_) => self.delegate_type().type_arguments(),
            TypeName::Parameter(_) => self
                .bound_type()
                .map(|bound| bound.type_arguments())
                .unwrap_or_default(),
            TypeName::Predefined(_) => Vec::new(),
        }
    }

    /// The assembly the type is declared in.
    pub fn assembly(&self) -> AssemblyName {
        match self {
            TypeName::Regular(id) | TypeName::Array(id) => {
                if self.is_unknown() {
                    return AssemblyName::unknown();
                }
                let rest = id[type_portion_end(id)..].trim_matches([' ', ',']);
                AssemblyName::new(rest)
            }
            TypeName::Delegate(_) => self.delegate_type().assembly(),
            TypeName::Predefined(_) => AssemblyName::new(PREDEFINED_ASSEMBLY),
            TypeName::Parameter(_) => self
                .bound_type()
                .map(|bound| bound.assembly())
                .unwrap_or_else(AssemblyName::unknown),
        }
    }

    /// The full name: everything up to the assembly, with the kind
    /// discriminator stripped.
    pub fn full_name(&self) -> String {
        match self {
            TypeName::Regular(id) | TypeName::Array(id) => {
                strip_kind_prefix(&id[..type_portion_end(id)]).to_string()
            }
            TypeName::Delegate(id) => {
                let declaring = self.delegate_signature().declaring_type();
                if declaring.is_unknown() {
                    TypeName::new(&id[PREFIX_DELEGATE.len()..]).full_name()
                } else {
                    declaring.full_name()
                }
            }
            TypeName::Predefined(id) => {
                alias::alias_to_full_name(&id[PREFIX_PREDEFINED.len()..])
            }
            TypeName::Parameter(_) => self
                .bound_type()
                .map(|bound| bound.full_name())
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        }
    }

    /// The simple name of the innermost type, without namespace, arity
    /// tick, or argument list.
    pub fn simple_name(&self) -> String {
        match self {
            TypeName::Regular(_) | TypeName::Array(_) | TypeName::Predefined(_) => {
                if self.is_unknown() {
                    return UNKNOWN_TYPE.to_string();
                }
                let mut name = without_bracket_groups(&self.full_name());
                if let Some(plus) = name.rfind('+') {
                    name = name[plus + 1..].to_string();
                }
                if let Some(tick) = name.rfind('`') {
                    name.truncate(tick);
                }
                match name.rfind('.') {
                    Some(dot) => name[dot + 1..].to_string(),
                    None => name,
                }
            }
            TypeName::Delegate(_) => self.delegate_type().simple_name(),
            TypeName::Parameter(_) => self
                .bound_type()
                .map(|bound| bound.simple_name())
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        }
    }

    /// The namespace, or the global namespace for namespace-less types.
    pub fn namespace_name(&self) -> NamespaceName {
        match self {
            TypeName::Regular(_) | TypeName::Array(_) => {
                if self.is_unknown() {
                    return NamespaceName::unknown();
                }
                let skeleton = without_bracket_groups(&self.full_name());
                match skeleton.rfind('.') {
                    Some(dot) => NamespaceName::new(&skeleton[..dot]),
                    None => NamespaceName::global(),
                }
            }
            TypeName::Delegate(_) => self.delegate_type().namespace_name(),
            TypeName::Predefined(_) => NamespaceName::new("System"),
            TypeName::Parameter(_) => self
                .bound_type()
                .map(|bound| bound.namespace_name())
                .unwrap_or_else(NamespaceName::unknown),
        }
    }

    pub fn is_nested(&self) -> bool {
        match self {
            TypeName::Regular(id) => find_nesting_plus(id).is_some(),
            TypeName::Array(_) => self.element_type().is_nested(),
            TypeName::Delegate(_) => self.delegate_type().is_nested(),
            _ => false,
        }
    }

    /// The declaring type of a nested type. A legacy flat argument list
    /// at the outermost class is split by arity: the declaring chain
    /// keeps exactly as many arguments as its segments declare.
    pub fn declaring_type(&self) -> Option<TypeName> {
        match self {
            TypeName::Regular(id) => {
                let plus = find_nesting_plus(id)?;
                let start = id.len() - strip_kind_prefix(id).len();
                let mut declaring = id[start..plus].to_string();
                if !declaring.contains("[[") {
                    let declared = arity_sum(&declaring);
                    if declared > 0 {
                        let arguments: Vec<String> = self
                            .type_arguments()
                            .into_iter()
                            .take(declared)
                            .map(|a| format!("[{}]", a.identifier()))
                            .collect();
                        if !arguments.is_empty() {
                            declaring.push_str(&format!("[{}]", arguments.join(",")));
                        }
                    }
                }
                let assembly = self.assembly();
                if !assembly.identifier().is_empty() {
                    declaring.push_str(", ");
                    declaring.push_str(assembly.identifier());
                }
                Some(TypeName::new(declaring))
            }
            TypeName::Array(_) => self.element_type().declaring_type(),
            TypeName::Delegate(_) => self.delegate_type().declaring_type(),
            _ => None,
        }
    }

    /// The number of dimensions of an array type.
    pub fn rank(&self) -> usize {
        match self.rank_span() {
            Some((open, close)) => self.identifier()[open..close].matches(',').count() + 1,
            None => 0,
        }
    }

    fn rank_span(&self) -> Option<(usize, usize)> {
        match self {
            TypeName::Array(id) => array_suffix_span(id),
            TypeName::Predefined(id) => array_suffix_span(id),
            TypeName::Parameter(_) => self.parameter_rank_span(),
            _ => None,
        }
    }

    fn parameter_rank_span(&self) -> Option<(usize, usize)> {
        let id = self.identifier();
        let short_end = id.find(" -> ").unwrap_or(id.len());
        let open = id[..short_end].find('[')?;
        let close = scan::find_matching_close(id, open)?;
        if close < short_end {
            Some((open, close))
        } else {
            None
        }
    }

    /// The element type of an array, with the rank suffix removed.
    pub fn element_type(&self) -> TypeName {
        match self.rank_span() {
            Some((open, close)) => {
                let id = self.identifier();
                TypeName::new(format!("{}{}", &id[..open], &id[close + 1..]))
            }
            None => self.clone(),
        }
    }

    /// The method-shaped signature of a delegate type (identifier without
    /// the `d:` discriminator).
    pub fn delegate_signature(&self) -> MethodName {
        let id = self.identifier();
        let signature = id.strip_prefix(PREFIX_DELEGATE).unwrap_or(id);
        MethodName::new(signature)
    }

    /// The return type of a delegate's signature.
    pub fn delegate_return_type(&self) -> TypeName {
        self.delegate_signature().return_type()
    }

    /// The parameters of a delegate's signature.
    pub fn delegate_parameters(&self) -> Vec<ParameterName> {
        self.delegate_signature().parameters()
    }

    /// The type that declares a delegate's signature, i.e. the delegate
    /// type itself.
    pub fn delegate_type(&self) -> TypeName {
        let declaring = self.delegate_signature().declaring_type();
        if declaring.is_unknown() {
            let id = self.identifier();
            TypeName::new(id.strip_prefix(PREFIX_DELEGATE).unwrap_or(id))
        } else {
            declaring
        }
    }

    /// The short name of a generic type parameter (`T` in `T -> X, P`).
    pub fn short_name(&self) -> &str {
        let id = self.identifier();
        match id.find(" -> ") {
            Some(arrow) => &id[..arrow],
            None => id,
        }
    }

    /// The type a generic type parameter is bound to, if any.
    pub fn bound_type(&self) -> Option<TypeName> {
        let id = self.identifier();
        let arrow = id.find(" -> ")?;
        Some(TypeName::new(&id[arrow + 4..]))
    }
}

/// Locates the first top-level `[[...]]` argument group in `id`.
pub(crate) fn first_argument_group(id: &str) -> Option<(usize, usize)> {
    let bytes = id.as_bytes();
    let end = type_portion_end(id);
    let mut i = 0;
    while i < end {
        if bytes[i] == b'[' {
            let close = scan::find_matching_close(id, i)?;
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
    fn discriminates_variants() {
        assert!(matches!(TypeName::new("T,P"), TypeName::Regular(_)));
        assert!(matches!(TypeName::new("T"), TypeName::Parameter(_)));
        assert!(matches!(
            TypeName::new("T -> System.Int32, mscorlib, 4.0.0.0"),
            TypeName::Parameter(_)
        ));
        assert!(matches!(TypeName::new("T[],P"), TypeName::Array(_)));
        assert!(matches!(TypeName::new("d:[?] [?].()"), TypeName::Delegate(_)));
        assert!(matches!(TypeName::new("p:int"), TypeName::Predefined(_)));
        assert!(matches!(TypeName::new("?"), TypeName::Regular(_)));
        assert!(TypeName::new("").is_unknown());
        assert!(TypeName::new("?").is_unknown());
    }

    #[test]
    fn classifies_regular_types() {
        assert!(TypeName::new("System.Void, mscorlib, 4.0.0.0").is_void());
        assert!(TypeName::new("System.Int32, mscorlib, 4.0.0.0").is_simple());
        assert!(TypeName::new("System.Int32, mscorlib, 4.0.0.0").is_struct());
        assert!(TypeName::new("s:My.Struct, A, 1.0.0.0").is_struct());
        assert!(TypeName::new("e:My.EnumType, E, 3.9.5.6").is_enum());
        assert!(TypeName::new("i:Some.Interface, I, 6.5.4.3").is_interface());
        assert!(TypeName::new("System.Object, mscorlib, 4.0.0.0").is_class());
        assert!(!TypeName::new("System.Boolean, mscorlib, 4.0.0.0").is_class());
        assert!(!TypeName::new("?").is_class());
        assert!(
            TypeName::new(
                "System.Nullable`1[[T -> System.UInt64, mscorlib, 4.0.0.0]], mscorlib, 4.0.0.0"
            )
            .is_nullable()
        );
    }

    #[test]
    fn separates_value_types_from_reference_types() {
        assert!(TypeName::new("s:My.Struct, A, 1.0.0.0").is_value_type());
        assert!(TypeName::new("e:My.EnumType, E, 3.9.5.6").is_value_type());
        assert!(TypeName::new("p:int").is_value_type());
        assert!(!TypeName::new("System.Object, mscorlib, 4.0.0.0").is_value_type());

        assert!(TypeName::new("Another.Class, F, 4.7.55.6").is_reference_type());
        assert!(TypeName::new("i:Some.Interface, I, 6.5.4.3").is_reference_type());
        assert!(TypeName::new("p:int[]").is_reference_type());
        assert!(TypeName::new("d:[?] [n.D, P].()").is_reference_type());
        assert!(TypeName::new("SomeType[], P").is_reference_type());
        assert!(!TypeName::new("p:int").is_reference_type());
        assert!(!TypeName::new("?").is_reference_type());
    }

    #[test]
    fn type_parameters_delegate_classification_to_their_bound() {
        assert!(TypeName::new("T -> System.Int32, mscorlib, 4.0.0.0").is_simple());
        assert!(TypeName::new("TI -> i:MyInterface, Is, 3.8.67.0").is_interface());
        assert!(TypeName::new("T -> Another.Class, F, 4.7.55.6").is_class());
        assert!(!TypeName::new("TParam").is_class());
        assert!(!TypeName::new("TParam").is_void());
    }

    #[test]
    fn extracts_full_name() {
        let cases: &[(&str, &str)] = &[
            ("System.UInt16, mscorlib, 4.0.0.0", "System.UInt16"),
            ("e:Full.Enum.Type, E, 1.2.3.4", "Full.Enum.Type"),
            ("i:Full.Interface.Type, E, 1.2.3.4", "Full.Interface.Type"),
            ("s:Full.Struct.Type, E, 1.2.3.4", "Full.Struct.Type"),
            (
                "System.Nullable`1[[System.Int32, mscorlib, 4.0.0.0]], mscorlib, 4.0.0.0",
                "System.Nullable`1[[System.Int32, mscorlib, 4.0.0.0]]",
            ),
            ("T -> Some.Arbitrary.Type, Assembly, 5.6.4.7", "Some.Arbitrary.Type"),
            ("Outer.Type+InnerType, As, 1.2.3.4", "Outer.Type+InnerType"),
            ("?", "?"),
        ];
        for (id, expected) in cases {
            assert_eq!(TypeName::new(*id).full_name(), *expected, "{id}");
        }
    }

    #[test]
    fn extracts_simple_name() {
        let cases: &[(&str, &str)] = &[
            ("System.UInt16, mscorlib, 4.0.0.0", "UInt16"),
            ("e:Full.Enum.Type, E, 1.2.3.4", "Type"),
            (
                "System.Nullable`1[[System.Int32, mscorlib, 4.0.0.0]], mscorlib, 4.0.0.0",
                "Nullable",
            ),
            ("T -> Some.Arbitrary.Type, Assembly, 5.6.4.7", "Type"),
            ("Outer.Type+InnerType, As, 1.2.3.4", "InnerType"),
            ("?", "?"),
            (
                "Task`1[[TResult -> i:IList`1[[T -> T]], mscorlib, 4.0.0.0]], mscorlib, 4.0.0.0",
                "Task",
            ),
        ];
        for (id, expected) in cases {
            assert_eq!(TypeName::new(*id).simple_name(), *expected, "{id}");
        }
    }

    #[test]
    fn extracts_namespace() {
        let cases: &[(&str, &str)] = &[
            ("System.UInt16, mscorlib, 4.0.0.0", "System"),
            ("e:Full.Enum.Type, E, 1.2.3.4", "Full.Enum"),
            ("T -> Some.Arbitrary.Type, Assembly, 5.6.4.7", "Some.Arbitrary"),
            ("Outer.Type+InnerType, As, 1.2.3.4", "Outer"),
            ("GlobalType, A, 5.6.7.4", ""),
        ];
        for (id, expected) in cases {
            assert_eq!(
                TypeName::new(*id).namespace_name(),
                NamespaceName::new(*expected),
                "{id}"
            );
        }
        assert!(TypeName::unknown().namespace_name().is_unknown());
    }

    #[test]
    fn extracts_assembly() {
        let cases: &[(&str, &str)] = &[
            ("System.Object, mscorlib, 4.0.0.0", "mscorlib, 4.0.0.0"),
            ("i:Some.Interface, I, 1.2.3.4", "I, 1.2.3.4"),
            ("T -> Type.Parameter, A, 1.2.3.4", "A, 1.2.3.4"),
            ("SomeType[], EnclosingProject", "EnclosingProject"),
            ("pack.age.MyType`2[[T1],[T2]], a, 1.0.0.0", "a, 1.0.0.0"),
        ];
        for (id, expected) in cases {
            assert_eq!(TypeName::new(*id).assembly().identifier(), *expected, "{id}");
        }
        assert!(TypeName::unknown().assembly().is_unknown());
        assert_eq!(
            TypeName::new("p:int").assembly().identifier(),
            "mscorlib, 4.0.0.0"
        );
    }

    #[test]
    fn collects_type_arguments() {
        let t = TypeName::new(
            "pack.age.MyType`2[[S -> System.String, mscore, 4.0.0.0],[I -> System.Int32, mscore, 4.0.0.0]], a, 1.0.0.0",
        );
        assert!(t.has_type_arguments());
        assert_eq!(
            t.type_arguments()
                .iter()
                .map(TypeName::identifier)
                .collect::<Vec<_>>(),
            vec![
                "S -> System.String, mscore, 4.0.0.0",
                "I -> System.Int32, mscore, 4.0.0.0"
            ]
        );
    }

    #[test]
    fn collects_distributed_type_arguments_in_order() {
        let t = TypeName::new("n.C1`1[[T1]]+C2`1[[T2]], P");
        assert_eq!(
            t.type_arguments()
                .iter()
                .map(TypeName::identifier)
                .collect::<Vec<_>>(),
            vec!["T1", "T2"]
        );
    }

    #[test]
    fn uninstantiated_generics_have_no_arguments() {
        let t = TypeName::new("OuterType`1+InnerType, Assembly, 1.2.3.4");
        assert!(t.is_generic());
        assert!(!t.has_type_arguments());
        assert_eq!(t.full_name(), "OuterType`1+InnerType");
        assert_eq!(t.declaring_type().unwrap().full_name(), "OuterType`1");
    }

    #[test]
    fn top_level_types_have_no_declaring_type() {
        let t = TypeName::new("this.is.a.top.level.ValueType, a, 1.0.0.0");
        assert!(!t.is_nested());
        assert_eq!(t.declaring_type(), None);
    }

    #[test]
    fn resolves_declaring_types() {
        let cases: &[(&str, &str)] = &[
            ("a.p.T+N", "a.p.T"),
            ("N.O+M+I", "N.O+M"),
            ("n.T+A`1[[T1 -> e:n.T+B, P]]", "n.T"),
            ("n.T`1+U`1[[T2 -> T2]]", "n.T`1[[T2 -> T2]]"),
        ];
        for (full, declaring_full) in cases {
            let t = TypeName::new(format!("{full}, a, 1.0.0.0"));
            assert!(t.is_nested(), "{full}");
            assert_eq!(t.declaring_type().unwrap().full_name(), *declaring_full, "{full}");
        }
    }

    #[test]
    fn splits_flat_argument_lists_over_the_declaring_chain() {
        let t = TypeName::new(
            "p.O`1+M`1+I`1[[T -> p.P1, A, 1.0.0.0],[U -> p.P2, A, 1.0.0.0],[V -> p.P3, A, 1.0.0.0]], a, 1.0.0.0",
        );
        assert_eq!(
            t.declaring_type().unwrap().identifier(),
            "p.O`1+M`1[[T -> p.P1, A, 1.0.0.0],[U -> p.P2, A, 1.0.0.0]], a, 1.0.0.0"
        );
    }

    #[test]
    fn array_types_expose_rank_and_element() {
        let one = TypeName::new("SomeType[], EnclosingProject");
        assert_eq!(one.rank(), 1);
        assert_eq!(one.element_type().identifier(), "SomeType, EnclosingProject");

        let two = TypeName::new("A[,], B, 1.2.3.4");
        assert_eq!(two.rank(), 2);

        let generic = TypeName::new("T`1[][[G]], P");
        assert!(matches!(generic, TypeName::Array(_)));
        assert_eq!(generic.element_type().identifier(), "T`1[[G]], P");

        let delegate_array = TypeName::new("d:[R, P] [D, P].()[]");
        assert!(matches!(delegate_array, TypeName::Array(_)));
        assert_eq!(delegate_array.element_type().identifier(), "d:[R, P] [D, P].()");
    }

    #[test]
    fn rebuilds_array_identifiers() {
        let element = TypeName::new("SomeType, P");
        assert_eq!(
            TypeName::array_of(&element, 1).identifier(),
            "SomeType[], P"
        );
        let generic = TypeName::new("T`1[[G]], P");
        assert_eq!(
            TypeName::array_of(&generic, 2).identifier(),
            "T`1[,][[G]], P"
        );
        let delegate = TypeName::new("d:[R, P] [D, P].()");
        assert_eq!(
            TypeName::array_of(&delegate, 1).identifier(),
            "d:[R, P] [D, P].()[]"
        );
        let parameter = TypeName::new("T -> X, P");
        assert_eq!(
            TypeName::array_of(&parameter, 1).identifier(),
            "T[] -> X, P"
        );
    }

    #[test]
    fn delegate_types_read_through_their_signature() {
        let d = TypeName::new("d:[R, A, 1.0.0.0] [Some.DelegateType, A, 1.0.0.0].()");
        assert_eq!(d.full_name(), "Some.DelegateType");
        assert_eq!(d.simple_name(), "DelegateType");
        assert_eq!(d.namespace_name(), NamespaceName::new("Some"));
        assert_eq!(d.assembly().identifier(), "A, 1.0.0.0");
        assert!(!d.is_nested());
        assert!(TypeName::new("d:[R, P] [O+D, P].()").is_nested());
    }

    #[test]
    fn delegate_signatures_expose_return_type_and_parameters() {
        let d = TypeName::new("d:[p:int] [n.D, P].([p:bool] flag)");
        assert_eq!(d.delegate_return_type().identifier(), "p:int");
        assert_eq!(
            d.delegate_parameters(),
            vec![ParameterName::new("[p:bool] flag")]
        );
    }

    #[test]
    fn delegate_type_arguments_come_from_the_delegate_type() {
        let d = TypeName::new("d:[T] [DT`1[[T -> String, mscorlib]]].([T] p)");
        assert_eq!(
            d.type_arguments()
                .iter()
                .map(TypeName::identifier)
                .collect::<Vec<_>>(),
            vec!["T -> String, mscorlib"]
        );
    }

    #[test]
    fn type_parameter_short_names_and_bounds() {
        let bound = TypeName::new("TR -> System.Int32, mscorelib, 4.0.0.0");
        assert_eq!(bound.short_name(), "TR");
        assert!(!bound.bound_type().unwrap().is_type_parameter());

        let unknown_bound = TypeName::new("R -> ?");
        assert_eq!(unknown_bound.short_name(), "R");
        assert!(unknown_bound.bound_type().unwrap().is_unknown());

        let unbound = TypeName::new("TParam");
        assert_eq!(unbound.short_name(), "TParam");
        assert_eq!(unbound.bound_type(), None);

        let chained = TypeName::new("T -> T");
        assert!(chained.bound_type().unwrap().is_type_parameter());
    }

    #[test]
    fn predefined_types_resolve_through_the_alias_table() {
        let int = TypeName::new("p:int");
        assert_eq!(int.full_name(), "System.Int32");
        assert_eq!(int.simple_name(), "Int32");
        assert!(int.is_struct());
        assert!(!int.is_array());

        let arr = TypeName::new("p:int[]");
        assert!(arr.is_array());
        assert_eq!(arr.rank(), 1);
        assert_eq!(arr.element_type().identifier(), "p:int");
        assert!(TypeName::new("p:object").is_class());
    }
}
