//! Assembly and namespace names.

use crate::UNKNOWN_SEGMENT;

/// An assembly reference: `<name>[, <version>]`.
///
/// References without a version are produced for the project whose sources
/// the telemetry was collected from; everything external carries an
/// explicit version. That distinction drives anonymization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssemblyName(String);

impl AssemblyName {
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

    /// The assembly's simple name, without the version suffix.
    pub fn assembly_name(&self) -> &str {
        match self.0.find(',') {
            Some(comma) => self.0[..comma].trim(),
            None => self.0.trim(),
        }
    }

    /// The `major.minor.build.revision` suffix, if present.
    pub fn version(&self) -> Option<&str> {
        self.0.find(',').map(|comma| self.0[comma + 1..].trim())
    }

    /// True for references to the enclosing project: those carry no
    /// version, unlike references to compiled external assemblies.
    pub fn is_local_project(&self) -> bool {
        !self.0.contains(',')
    }
}

/// A namespace name; the global namespace has the empty identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespaceName(String);

impl NamespaceName {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_SEGMENT.to_string())
    }

    pub fn global() -> Self {
        Self(String::new())
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

    pub fn is_global(&self) -> bool {
        self.0.is_empty()
    }

    /// The enclosing namespace, or `None` at the global namespace.
    pub fn parent(&self) -> Option<NamespaceName> {
        if self.is_global() || self.is_unknown() {
            return None;
        }
        match self.0.rfind('.') {
            Some(dot) => Some(NamespaceName::new(&self.0[..dot])),
            None => Some(NamespaceName::global()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_assembly_name_and_version() {
        let assembly = AssemblyName::new("mscorlib, 4.0.0.0");
        assert_eq!(assembly.assembly_name(), "mscorlib");
        assert_eq!(assembly.version(), Some("4.0.0.0"));
        assert!(!assembly.is_local_project());
    }

    #[test]
    fn versionless_assemblies_are_local() {
        let assembly = AssemblyName::new("MyProject");
        assert_eq!(assembly.assembly_name(), "MyProject");
        assert_eq!(assembly.version(), None);
        assert!(assembly.is_local_project());
    }

    #[test]
    fn namespace_parents_walk_to_global() {
        let ns = NamespaceName::new("A.B.C");
        assert_eq!(ns.parent(), Some(NamespaceName::new("A.B")));
        assert_eq!(
            NamespaceName::new("A").parent(),
            Some(NamespaceName::global())
        );
        assert_eq!(NamespaceName::global().parent(), None);
        assert!(NamespaceName::global().is_global());
    }
}
