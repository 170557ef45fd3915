//! Repairs for identifiers produced by earlier grammar generations.
//!
//! Every rule is a pure `&str -> String` pass, applied in a fixed order
//! and safe to run unconditionally: already-valid identifiers come back
//! untouched, and a rule that cannot find an expected delimiter leaves
//! the string alone instead of failing. The pipeline is idempotent.

use regex::Regex;
use std::sync::OnceLock;

use crate::members::UNKNOWN_MEMBER;
use crate::scan;
use crate::{alias, UNKNOWN_TYPE};

/// Repairs legacy formats in arbitrary identifier strings.
pub fn fix_identifier(id: &str) -> String {
    let fixed = fix_predefined_types(id);
    let fixed = fix_legacy_nullable(&fixed);
    let fixed = fix_legacy_type_parameter_lists(&fixed);
    let fixed = fix_legacy_delegate_names(&fixed);
    let fixed = fix_missing_generic_ticks(&fixed);
    let fixed = fix_jagged_arrays(&fixed);
    fix_missing_parenthesis_for_properties(&fixed)
}

/// Repairs a method identifier read back from serialized form, including
/// the hardcoded corrections for historically mis-fixed names.
pub fn fix_method_identifier(id: &str) -> String {
    fix_identifier(&fix_broken_method_serializations(id))
}

/// Repairs a property identifier read back from serialized form,
/// inserting and canonicalizing accessor modifiers.
pub fn fix_property_identifier(id: &str) -> String {
    fix_identifier(&fix_property_accessors(id))
}

// Name fixing itself was broken for a while; these identifiers made it
// into stored data and can only be repaired verbatim.
const BROKEN_METHOD_SERIALIZATIONS: &[(&str, &str)] = &[
    (
        "[d:[TResult] [System.Func`10[[T9]][[TResult],[System.Func`10[[T9]][[T1],[T2],[T3],[T4],[T5],[T6],[T7],[T8],[T9],[TResult]], System.Core, 4.0.0.0],[T1],[T2],[T3],[T4],[T5],[T6],[T7],[T8]][[T1],[T2],[T3],[T4],[T5],[T6],[T7],[T8],[T9],[TResult]], System.Core, 4.0.0.0].([T1] arg1, [T2] arg2, [T3] arg3, [T4] arg4, [T5] arg5, [T6] arg6, [T7] arg7, [T8] arg8, [T9] arg9)] ..ctor()",
        "[d:[TResult] [System.Func`10[[T1],[T2],[T3],[T4],[T5],[T6],[T7],[T8],[T9],[TResult]], System.Core, 4.0.0.0].([T1] arg1, [T2] arg2, [T3] arg3, [T4] arg4, [T5] arg5, [T6] arg6, [T7] arg7, [T8] arg8, [T9] arg9))] [d:[TResult] [System.Func`10[[T1],[T2],[T3],[T4],[T5],[T6],[T7],[T8],[T9],[TResult]], System.Core, 4.0.0.0].([T1] arg1, [T2] arg2, [T3] arg3, [T4] arg4, [T5] arg5, [T6] arg6, [T7] arg7, [T8] arg8, [T9] arg9))]..ctor()",
    ),
    (
        "[s:System.Collections.Generic.List`1[][[[T -> T]]]+Enumerator, mscorlib, 4.0.0.0] .GetEnumerator()",
        "[s:System.Collections.Generic.List`1[[T -> T]]+Enumerator, mscorlib, 4.0.0.0] [System.Collections.Generic.List`1[[T -> T]], mscorlib, 4.0.0.0].GetEnumerator()",
    ),
    ("[p:void] ..ctor()", "[?] [?].???()"),
];

fn fix_broken_method_serializations(id: &str) -> String {
    for (broken, repaired) in BROKEN_METHOD_SERIALIZATIONS {
        if id == *broken {
            return (*repaired).to_string();
        }
    }
    id.to_string()
}

/// Inserts missing accessor modifiers on property identifiers and brings
/// present ones into the canonical `get set static` order.
fn fix_property_accessors(id: &str) -> String {
    if id == UNKNOWN_MEMBER {
        return id.to_string();
    }
    let Some(open) = id.find('[') else {
        return id.to_string();
    };
    let tokens: Vec<&str> = id[..open].split_whitespace().collect();
    if tokens
        .iter()
        .any(|t| !matches!(*t, "get" | "set" | "static"))
    {
        return id.to_string();
    }

    let has_accessors = tokens.contains(&"get") || tokens.contains(&"set");
    let get = !has_accessors || tokens.contains(&"get");
    let set = !has_accessors || tokens.contains(&"set");

    let mut out = String::new();
    if get {
        out.push_str("get ");
    }
    if set {
        out.push_str("set ");
    }
    if tokens.contains(&"static") {
        out.push_str("static ");
    }
    out.push_str(&id[open..]);
    out
}

fn predefined_types_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"System\.(Boolean|Byte|Char|Decimal|Double|Int16|Int32|Int64|Object|SByte|Single|String|UInt16|UInt32|UInt64|Void)((\[,*\])?),\smscorlib,\s\d\.\d\.\d\.\d",
        )
        .expect("predefined-types regex should compile")
    })
}

// Early recordings stored predefined types as regular framework types
// (e.g. `System.Int32, mscorlib, 4.0.0.0`), without the `p:` form.
fn fix_predefined_types(id: &str) -> String {
    predefined_types_re()
        .replace_all(id, |caps: &regex::Captures<'_>| {
            let alias = alias::full_name_to_alias(&format!("System.{}", &caps[1]));
            format!("p:{}{}", alias, &caps[2])
        })
        .into_owned()
}

fn legacy_nullable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(^|[^:])System\.Nullable`1\[").expect("nullable regex should compile")
    })
}

// The nullable wrapper is a struct and carries `s:` in the current
// grammar; old recordings lack the discriminator.
fn fix_legacy_nullable(id: &str) -> String {
    legacy_nullable_re()
        .replace_all(id, "${1}s:System.Nullable`1[")
        .into_owned()
}

// Nested iterator/collection types of a handful of framework libraries
// were recorded without their type-parameter lists in shapes the general
// redistribution cannot derive. Data, not logic.
const MANUAL_TYPE_PARAMETER_FIXES: &[(&str, &str)] = &[
    (
        "s:System.Data.Entity.Core.Metadata.Edm.ReadOnlyMetadataCollection`1+Enumerator, EntityFramework, 6.0.0.0",
        "s:System.Data.Entity.Core.Metadata.Edm.ReadOnlyMetadataCollection`1[[T]]+Enumerator, EntityFramework, 6.0.0.0",
    ),
    (
        "System.Collections.Generic.Dictionary`2+KeyCollection, mscorlib, 4.0.0.0",
        "System.Collections.Generic.Dictionary`2[[TKey],[TValue]]+KeyCollection, mscorlib, 4.0.0.0",
    ),
    (
        "System.Collections.Generic.Dictionary`2+ValueCollection, mscorlib, 4.0.0.0",
        "System.Collections.Generic.Dictionary`2[[TKey],[TValue]]+ValueCollection, mscorlib, 4.0.0.0",
    ),
    (
        "System.Collections.ObjectModel.ReadOnlyDictionary`2+KeyCollection, mscorlib, 4.0.0.0",
        "System.Collections.ObjectModel.ReadOnlyDictionary`2[[TKey],[TValue]]+KeyCollection, mscorlib, 4.0.0.0",
    ),
    (
        "System.Collections.ObjectModel.ReadOnlyDictionary`2+ValueCollection, mscorlib, 4.0.0.0",
        "System.Collections.ObjectModel.ReadOnlyDictionary`2[[TKey],[TValue]]+ValueCollection, mscorlib, 4.0.0.0",
    ),
    (
        "s:System.Collections.Generic.Dictionary`2+Enumerator, mscorlib, 4.0.0.0",
        "s:System.Collections.Generic.Dictionary`2[[TKey],[TValue]]+Enumerator, mscorlib, 4.0.0.0",
    ),
    (
        "s:System.Collections.Immutable.ImmutableArray`1+Enumerator, System.Collections.Immutable, 1.1.37.0",
        "s:System.Collections.Immutable.ImmutableArray`1[[T]]+Enumerator, System.Collections.Immutable, 1.1.37.0",
    ),
    (
        "d:[TValue] [System.Runtime.CompilerServices.ConditionalWeakTable`2+CreateValueCallback, mscorlib, 4.0.0.0].([TKey] key)",
        "d:[TValue] [System.Runtime.CompilerServices.ConditionalWeakTable`2[[TKey],[TValue]]+CreateValueCallback, mscorlib, 4.0.0.0].([TKey] key)",
    ),
    (
        "s:System.Collections.Generic.List`1+Enumerator, mscorlib, 4.0.0.0",
        "s:System.Collections.Generic.List`1[[T]]+Enumerator, mscorlib, 4.0.0.0",
    ),
    (
        "System.Collections.Generic.List`1+SynchronizedList, mscorlib, 4.0.0.0",
        "System.Collections.Generic.List`1[[T]]+SynchronizedList, mscorlib, 4.0.0.0",
    ),
    (
        "s:System.Collections.Generic.LinkedList`1+Enumerator, System, 4.0.0.0",
        "s:System.Collections.Generic.LinkedList`1[[T]]+Enumerator, System, 4.0.0.0",
    ),
    (
        "System.Collections.Generic.SortedDictionary`2+KeyCollection, System, 4.0.0.0",
        "System.Collections.Generic.SortedDictionary`2[[TKey],[TValue]]+KeyCollection, System, 4.0.0.0",
    ),
];

fn is_legacy_tp_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([^+.]+`([0-9]+))[^0-9\[]").expect("legacy tick regex should compile")
    })
}

fn all_legacy_tp_lists_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([^+.]+`([0-9]+))[^0-9]").expect("legacy tick regex should compile")
    })
}

// Window captions, file names and tool identifiers use backticks in
// unrelated conventions; those shapes are passed through untouched.
fn has_legacy_type_parameter_list(id: &str) -> bool {
    !(id.starts_with("vsWindowTypeDocument ") || id.starts_with("CSharp ") || id.ends_with(".cs"))
        && is_legacy_tp_list_re().is_match(id)
}

// Early recordings marked arity on each type (`T`1`) but serialized all
// type parameters of a `+`-nested chain as one flat list at the end.
// Each class consumes exactly its declared arity, left to right.
fn fix_legacy_type_parameter_lists(id: &str) -> String {
    if !has_legacy_type_parameter_list(id) {
        return id.to_string();
    }

    let mut id = id.to_string();
    for (invalid, valid) in MANUAL_TYPE_PARAMETER_FIXES {
        id = id.replace(invalid, valid);
    }
    if !has_legacy_type_parameter_list(&id) {
        return id;
    }

    let Some(end_marker) = id.rfind("]]") else {
        tracing::debug!(
            target: "quill.names",
            identifier = %id,
            "arity marker without a type-parameter list; leaving unchanged"
        );
        return id;
    };
    let end_params = end_marker + 1;
    let Some(start_params) = scan::find_matching_open(&id, end_params) else {
        return id;
    };
    let parameters = parse_flat_parameter_list(&id, start_params, end_params);
    let mut before = id[..start_params].to_string();
    let after = &id[end_params + 1..];

    let mut already_taken = 0usize;
    for caps in all_legacy_tp_lists_re().captures_iter(&id) {
        let hit = &caps[1];
        let arity: usize = caps[2].parse().unwrap_or(0);
        let take_until = (already_taken + arity).min(parameters.len());

        let mut list = String::from("[");
        for (i, parameter) in parameters[already_taken..take_until].iter().enumerate() {
            if i > 0 {
                list.push(',');
            }
            list.push('[');
            list.push_str(parameter);
            list.push(']');
        }
        list.push(']');
        already_taken = take_until;

        let replacement = format!("{hit}{list}");
        before = before.replace(hit, &replacement);
    }

    format!("{before}{after}")
}

fn parse_flat_parameter_list(id: &str, open: usize, close: usize) -> Vec<String> {
    let mut parameters = Vec::new();
    let mut cur = open + 1;
    while cur < close {
        let Some(open_param) = scan::find_next(id, cur, b"[]") else {
            break;
        };
        if open_param >= close || id.as_bytes()[open_param] == b']' {
            break;
        }
        let Some(close_param) = scan::find_matching_close(id, open_param) else {
            break;
        };
        parameters.push(id[open_param + 1..close_param].to_string());
        cur = close_param + 1;
    }
    parameters
}

fn legacy_delegate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"d:[^\[]").expect("legacy delegate regex should compile"))
}

// Delegates used to be recorded as a bare type reference; the current
// grammar stores a full signature. The rewrite runs until no legacy
// occurrence remains, so delegates nested in bounds and parameter lists
// are reached too.
fn fix_legacy_delegate_names(id: &str) -> String {
    let mut id = id.to_string();
    while let Some(m) = legacy_delegate_re().find(&id) {
        let start_type = m.start() + 2;
        let end_type = scan::find_next(&id, m.start(), b"]").unwrap_or(id.len());
        let old_delegate = id[start_type..end_type].to_string();
        let fixed = format!("d:[{UNKNOWN_TYPE}] [{old_delegate}].()");
        let replaced = id.replace(&format!("d:{old_delegate}"), &fixed);
        if replaced == id {
            break;
        }
        id = replaced;
    }
    id
}

fn missing_ticks_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:\+|^|\.)([a-zA-Z0-9_]+)(\[,*\])?(\[\[.*)")
            .expect("missing ticks regex should compile")
    })
}

// A segment carrying a type-argument list must declare its arity; the
// count is taken from the list the arguments actually arrived in.
fn fix_missing_generic_ticks(id: &str) -> String {
    let mut id = id.to_string();
    while let Some(caps) = missing_ticks_re().captures(&id) {
        let name = &caps[1];
        let array_part = caps.get(2).map_or("", |m| m.as_str());
        let Some(count) = count_arguments(&caps[3]) else {
            tracing::debug!(
                target: "quill.names",
                identifier = %id,
                "unbalanced type-argument list; leaving unchanged"
            );
            return id;
        };
        let old_segment = format!("{name}{array_part}[[");
        let new_segment = format!("{name}`{count}{array_part}[[");
        let replaced = id.replace(&old_segment, &new_segment);
        if replaced == id {
            break;
        }
        id = replaced;
    }
    id
}

/// Counts the top-level segments of the `[[...]]` group opening `rest`.
fn count_arguments(rest: &str) -> Option<usize> {
    let end = scan::find_matching_close(rest, 0)?;
    let mut count = 0usize;
    let mut current = 1usize;
    while current < end {
        count += 1;
        let open = scan::find_next(rest, current, b"[")?;
        let close = scan::find_matching_close(rest, open)?;
        current = scan::find_next(rest, close + 1, b",]")?;
    }
    Some(count)
}

fn jagged_arrays_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[,*\](\[,*\])+").expect("jagged array regex should compile"))
}

// Jagged arrays were recorded one suffix per dimension; the current
// grammar folds them into a single rank suffix.
fn fix_jagged_arrays(id: &str) -> String {
    let mut id = id.to_string();
    while let Some(m) = jagged_arrays_re().find(&id) {
        let run = m.as_str().to_string();
        let rank = run.bytes().filter(|b| *b == b'[' || *b == b',').count();
        let folded = format!("[{}]", ",".repeat(rank - 1));
        let replaced = id.replace(&run, &folded);
        if replaced == id {
            break;
        }
        id = replaced;
    }
    id
}

fn missing_parenthesis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(get|set) .*[^)]$").expect("missing parenthesis regex should compile")
    })
}

// The legacy member encoding had no call syntax for properties.
fn fix_missing_parenthesis_for_properties(id: &str) -> String {
    if missing_parenthesis_re().is_match(id) {
        format!("{id}()")
    } else {
        id.to_string()
    }
}
