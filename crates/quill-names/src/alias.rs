//! The built-in type-alias table.
//!
//! Maps language keyword aliases to their fully qualified historical names
//! and back (`int` ↔ `System.Int32`). Array suffixes recurse through the
//! element spelling; the `?` suffix expands into the canonical nullable
//! wrapping. Unknown spellings pass through unchanged.

use std::collections::HashMap;
use std::sync::OnceLock;

const ALIASES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("char", "System.Char"),
    ("decimal", "System.Decimal"),
    ("double", "System.Double"),
    ("float", "System.Single"),
    ("int", "System.Int32"),
    ("long", "System.Int64"),
    ("object", "System.Object"),
    ("sbyte", "System.SByte"),
    ("short", "System.Int16"),
    ("string", "System.String"),
    ("uint", "System.UInt32"),
    ("ulong", "System.UInt64"),
    ("ushort", "System.UInt16"),
    ("void", "System.Void"),
];

fn alias_to_full() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| ALIASES.iter().copied().collect())
}

fn full_to_alias() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| ALIASES.iter().map(|&(a, f)| (f, a)).collect())
}

/// True if `name` is one of the built-in alias spellings (`int`, `void`, ...).
pub fn is_alias(name: &str) -> bool {
    alias_to_full().contains_key(name)
}

/// Splits a trailing `[,*]` rank suffix off `name`, if present.
fn split_array_suffix(name: &str) -> Option<(&str, &str)> {
    let rest = name.strip_suffix(']')?;
    let open = rest.rfind('[')?;
    if rest[open + 1..].bytes().all(|b| b == b',') {
        Some((&name[..open], &name[open..]))
    } else {
        None
    }
}

/// Resolves an alias spelling to its fully qualified name.
///
/// `int[]` becomes `System.Int32[]`, `int?` becomes the canonical nullable
/// wrapping, and spellings outside the table are returned unchanged.
pub fn alias_to_full_name(alias: &str) -> String {
    if let Some(element) = alias.strip_suffix('?') {
        return format!(
            "s:System.Nullable`1[[T -> {}]]",
            alias_to_full_name(element)
        );
    }
    if let Some((element, suffix)) = split_array_suffix(alias) {
        return format!("{}{}", alias_to_full_name(element), suffix);
    }
    match alias_to_full().get(alias) {
        Some(full) => (*full).to_string(),
        None => alias.to_string(),
    }
}

/// Resolves a fully qualified name back to its alias spelling.
///
/// The inverse of [`alias_to_full_name`]; names outside the table are
/// returned unchanged.
pub fn full_name_to_alias(full_name: &str) -> String {
    if let Some(rest) = full_name.strip_prefix("s:System.Nullable`1[[T -> ") {
        if let Some(element) = rest.strip_suffix("]]") {
            return format!("{}?", full_name_to_alias(element));
        }
    }
    if let Some((element, suffix)) = split_array_suffix(full_name) {
        return format!("{}{}", full_name_to_alias(element), suffix);
    }
    match full_to_alias().get(full_name) {
        Some(alias) => (*alias).to_string(),
        None => full_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolves_plain_aliases() {
        assert_eq!(alias_to_full_name("int"), "System.Int32");
        assert_eq!(alias_to_full_name("void"), "System.Void");
        assert_eq!(full_name_to_alias("System.String"), "string");
    }

    #[test]
    fn recurses_through_array_suffixes() {
        assert_eq!(alias_to_full_name("int[]"), "System.Int32[]");
        assert_eq!(alias_to_full_name("int[,][]"), "System.Int32[,][]");
        assert_eq!(full_name_to_alias("System.Int32[,]"), "int[,]");
    }

    #[test]
    fn wraps_nullable_suffixes() {
        assert_eq!(
            alias_to_full_name("int?"),
            "s:System.Nullable`1[[T -> System.Int32]]"
        );
        assert_eq!(
            full_name_to_alias("s:System.Nullable`1[[T -> System.Int32]]"),
            "int?"
        );
    }

    #[test]
    fn unknown_spellings_pass_through() {
        assert_eq!(alias_to_full_name("MyType"), "MyType");
        assert_eq!(full_name_to_alias("Some.Custom.Type"), "Some.Custom.Type");
    }

    #[test]
    fn is_symmetric_for_every_alias() {
        for (alias, _) in ALIASES {
            assert_eq!(full_name_to_alias(&alias_to_full_name(alias)), *alias);
        }
    }
}
