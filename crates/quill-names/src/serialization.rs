//! Version-tagged textual codec for structured names.
//!
//! A serialized name is `<tag>:<identifier>`. Two tag generations are in
//! circulation: the verbose historical tags (`CSharp.MethodName`,
//! `VisualStudio.WindowName`) and the compact current ones (`0M`, `0Win`).
//! Decoding accepts both; encoding always emits the current generation. An
//! unrecognized tag is a codec-version mismatch and surfaces as a hard
//! [`DecodeError`], unlike identifier noise, which degrades to typed
//! unknown names during parsing.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parse;
use crate::Name;

/// Errors raised when decoding a serialized name.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("serialized name {input:?} has no tag separator")]
    MissingSeparator { input: String },

    #[error("unknown serialization tag {tag:?}")]
    UnknownTag { tag: String },
}

/// The variant a serialization tag maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameKind {
    General,
    Type,
    Method,
    Field,
    Property,
    Event,
    Parameter,
    Lambda,
    LocalVariable,
    Namespace,
    Assembly,
    Alias,
    Document,
    Window,
    Solution,
    Project,
    ProjectItem,
}

// Both generations, in one table. The historical generation tagged every
// type flavor separately; all of them fold into the one type variant.
const TAGS: &[(&str, NameKind)] = &[
    ("CSharp.Name", NameKind::General),
    ("0General", NameKind::General),
    ("CSharp.TypeName", NameKind::Type),
    ("CSharp.ArrayTypeName", NameKind::Type),
    ("CSharp.DelegateTypeName", NameKind::Type),
    ("CSharp.EnumTypeName", NameKind::Type),
    ("CSharp.InterfaceTypeName", NameKind::Type),
    ("CSharp.StructTypeName", NameKind::Type),
    ("CSharp.PredefinedTypeName", NameKind::Type),
    ("CSharp.TypeParameterName", NameKind::Type),
    ("CSharp.UnknownTypeName", NameKind::Type),
    ("0T", NameKind::Type),
    ("CSharp.MethodName", NameKind::Method),
    ("0M", NameKind::Method),
    ("CSharp.FieldName", NameKind::Field),
    ("0F", NameKind::Field),
    ("CSharp.PropertyName", NameKind::Property),
    ("0P", NameKind::Property),
    ("CSharp.EventName", NameKind::Event),
    ("0E", NameKind::Event),
    ("CSharp.ParameterName", NameKind::Parameter),
    ("0Param", NameKind::Parameter),
    ("CSharp.LambdaName", NameKind::Lambda),
    ("0L", NameKind::Lambda),
    ("CSharp.LocalVariableName", NameKind::LocalVariable),
    ("0LocalVar", NameKind::LocalVariable),
    ("CSharp.NamespaceName", NameKind::Namespace),
    ("0N", NameKind::Namespace),
    ("CSharp.AssemblyName", NameKind::Assembly),
    ("0A", NameKind::Assembly),
    ("CSharp.AliasName", NameKind::Alias),
    ("0Alias", NameKind::Alias),
    ("VisualStudio.DocumentName", NameKind::Document),
    ("0Doc", NameKind::Document),
    ("VisualStudio.WindowName", NameKind::Window),
    ("0Win", NameKind::Window),
    ("VisualStudio.SolutionName", NameKind::Solution),
    ("0Sln", NameKind::Solution),
    ("VisualStudio.ProjectName", NameKind::Project),
    ("0Prj", NameKind::Project),
    ("VisualStudio.ProjectItemName", NameKind::ProjectItem),
    ("0Itm", NameKind::ProjectItem),
];

fn tag_table() -> &'static HashMap<&'static str, NameKind> {
    static TABLE: OnceLock<HashMap<&'static str, NameKind>> = OnceLock::new();
    TABLE.get_or_init(|| TAGS.iter().copied().collect())
}

pub(crate) fn kind_for_tag(tag: &str) -> Option<NameKind> {
    tag_table().get(tag).copied()
}

fn kind_of(name: &Name) -> NameKind {
    match name {
        Name::General(_) => NameKind::General,
        Name::Type(_) => NameKind::Type,
        Name::Method(_) => NameKind::Method,
        Name::Field(_) => NameKind::Field,
        Name::Property(_) => NameKind::Property,
        Name::Event(_) => NameKind::Event,
        Name::Parameter(_) => NameKind::Parameter,
        Name::Lambda(_) => NameKind::Lambda,
        Name::LocalVariable(_) => NameKind::LocalVariable,
        Name::Namespace(_) => NameKind::Namespace,
        Name::Assembly(_) => NameKind::Assembly,
        Name::Alias(_) => NameKind::Alias,
        Name::Document(_) => NameKind::Document,
        Name::Window(_) => NameKind::Window,
        Name::Solution(_) => NameKind::Solution,
        Name::Project(_) => NameKind::Project,
        Name::ProjectItem(_) => NameKind::ProjectItem,
    }
}

fn current_tag(kind: NameKind) -> &'static str {
    match kind {
        NameKind::General => "0General",
        NameKind::Type => "0T",
        NameKind::Method => "0M",
        NameKind::Field => "0F",
        NameKind::Property => "0P",
        NameKind::Event => "0E",
        NameKind::Parameter => "0Param",
        NameKind::Lambda => "0L",
        NameKind::LocalVariable => "0LocalVar",
        NameKind::Namespace => "0N",
        NameKind::Assembly => "0A",
        NameKind::Alias => "0Alias",
        NameKind::Document => "0Doc",
        NameKind::Window => "0Win",
        NameKind::Solution => "0Sln",
        NameKind::Project => "0Prj",
        NameKind::ProjectItem => "0Itm",
    }
}

/// Serializes `name` as `<current tag>:<identifier>`.
pub fn encode(name: &Name) -> String {
    format!("{}:{}", current_tag(kind_of(name)), name.identifier())
}

/// Decodes a tagged identifier back into a structured name.
///
/// Legacy repairs run on the identifier part before parsing, so identifiers
/// persisted by earlier grammar generations decode to canonical names.
pub fn decode(tagged: &str) -> Result<Name, DecodeError> {
    let Some((tag, id)) = tagged.split_once(':') else {
        return Err(DecodeError::MissingSeparator {
            input: tagged.to_string(),
        });
    };
    let Some(kind) = kind_for_tag(tag) else {
        return Err(DecodeError::UnknownTag {
            tag: tag.to_string(),
        });
    };
    Ok(parse::parse_as(kind, id))
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(self))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tagged = String::deserialize(deserializer)?;
        decode(&tagged).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_method, parse_type};
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_with_current_generation_tags() {
        let name = Name::Type(parse_type("T,P"));
        assert_eq!(encode(&name), "0T:T,P");

        let method = Name::Method(parse_method("[R, P] [D, P].M()"));
        assert_eq!(encode(&method), "0M:[R, P] [D, P].M()");
    }

    #[test]
    fn both_tag_generations_decode_to_the_same_name() {
        let old = decode("CSharp.TypeName:T,P").unwrap();
        let new = decode("0T:T,P").unwrap();
        assert_eq!(old, new);
        assert_eq!(encode(&old), "0T:T,P");
    }

    #[test]
    fn historical_type_flavors_fold_into_the_type_variant() {
        for tagged in [
            "CSharp.DelegateTypeName:d:[?] [n.D, P].()",
            "CSharp.StructTypeName:s:n.S, P",
            "CSharp.PredefinedTypeName:p:int",
            "CSharp.TypeParameterName:T",
            "CSharp.UnknownTypeName:?",
        ] {
            assert!(matches!(decode(tagged).unwrap(), Name::Type(_)), "{tagged}");
        }
    }

    #[test]
    fn unknown_tags_are_hard_errors() {
        assert_eq!(
            decode("9X:T,P"),
            Err(DecodeError::UnknownTag {
                tag: "9X".to_string()
            })
        );
        assert_eq!(
            decode("no separator"),
            Err(DecodeError::MissingSeparator {
                input: "no separator".to_string()
            })
        );
    }

    #[test]
    fn decoding_repairs_legacy_identifiers() {
        let name = decode("0P:[?] [?].P").unwrap();
        assert_eq!(name.identifier(), "get set [?] [?].P()");

        let legacy = decode("0T:A[][], B").unwrap();
        assert_eq!(legacy.identifier(), "A[,], B");
    }

    #[test]
    fn decode_parse_round_trips() {
        let tagged = [
            "0General:xyz",
            "0T:n.C`1[[T]], P",
            "0M:[R, P] [D, P].M([T, P] p)",
            "0F:[T, P] [D, P]._f",
            "0P:get set [p:int] [D, P].P()",
            "0E:[d:[?] [H, P].()] [D, P].Changed",
            "0Param:[T, P] p",
            "0L:[R, P] ([T, P] p)",
            "0LocalVar:[T, P] v",
            "0N:a.b.c",
            "0A:A, 1.2.3.4",
            "0Alias:global",
            "0Doc:CSharp C:\\File.cs",
            "0Win:vsToolWindow Unit Test Sessions",
            "0Sln:C:\\File\\To\\S.sln",
            "0Prj:Folder C:\\A\\B\\C",
            "0Itm:CSharp C:\\A\\B\\Class.cs",
        ];
        for input in tagged {
            let name = decode(input).unwrap();
            assert_eq!(encode(&name), input, "{input}");
            assert_eq!(decode(&encode(&name)).unwrap(), name, "{input}");
        }
    }

    #[test]
    fn serde_uses_the_tagged_form() {
        let name = Name::Method(parse_method("[R, P] [D, P].M()"));
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"0M:[R, P] [D, P].M()\"");
        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn serde_surfaces_unknown_tags_as_errors() {
        let result: Result<Name, _> = serde_json::from_str("\"9X:T,P\"");
        assert!(result.is_err());
    }
}
