//! Names of IDE work-surface components: documents, windows, solutions,
//! projects, and project items.
//!
//! Apart from solutions these are two-part identifiers, `'kind' 'name'`,
//! where the kind token is an IDE-defined classifier and the name is a
//! caption or path.

pub(crate) const UNKNOWN_COMPONENT: &str = "???";
pub(crate) const UNKNOWN_TWO_PART: &str = "??? ???";

fn split_kind(id: &str) -> (&str, &str) {
    match id.find(' ') {
        Some(space) => (&id[..space], &id[space + 1..]),
        None => (id, ""),
    }
}

/// A document name: `'language' 'file name'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentName(String);

impl DocumentName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_TWO_PART.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TWO_PART
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn language(&self) -> &str {
        split_kind(&self.0).0
    }

    pub fn file_name(&self) -> &str {
        split_kind(&self.0).1
    }
}

/// A window name: `'window kind' 'caption'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WindowName(String);

impl WindowName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_TWO_PART.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TWO_PART
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn window_kind(&self) -> &str {
        split_kind(&self.0).0
    }

    pub fn caption(&self) -> &str {
        split_kind(&self.0).1
    }
}

/// A project name: `'project kind' 'name'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_TWO_PART.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TWO_PART
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn project_kind(&self) -> &str {
        split_kind(&self.0).0
    }

    pub fn name(&self) -> &str {
        split_kind(&self.0).1
    }
}

/// A project-item name: `'item kind' 'name'`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectItemName(String);

impl ProjectItemName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_TWO_PART.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TWO_PART
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }

    pub fn item_kind(&self) -> &str {
        split_kind(&self.0).0
    }

    pub fn name(&self) -> &str {
        split_kind(&self.0).1
    }
}

/// A solution name; the identifier is the solution path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SolutionName(String);

impl SolutionName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_COMPONENT.to_string())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_COMPONENT
    }

    pub fn is_hashed(&self) -> bool {
        self.0.contains("==")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_kind_from_name() {
        let document = DocumentName::new("CSharp C:\\File.cs");
        assert_eq!(document.language(), "CSharp");
        assert_eq!(document.file_name(), "C:\\File.cs");

        let window = WindowName::new("vsToolWindow Unit Test Sessions");
        assert_eq!(window.window_kind(), "vsToolWindow");
        assert_eq!(window.caption(), "Unit Test Sessions");

        let project = ProjectName::new("Folder C:\\A\\B\\C");
        assert_eq!(project.project_kind(), "Folder");
        assert_eq!(project.name(), "C:\\A\\B\\C");
    }

    #[test]
    fn unknowns_are_typed_placeholders() {
        assert!(DocumentName::unknown().is_unknown());
        assert!(SolutionName::unknown().is_unknown());
        assert!(!DocumentName::new("CSharp x.cs").is_unknown());
    }
}
