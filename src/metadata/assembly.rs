//! Assembly entities: the analyzed units of a run and the shared reference assembly.
//!
//! An [`Assembly`] owns the types discovered while scanning one compiled program. A run holds
//! any number of *main* assemblies plus exactly one *reference* assembly, a synthetic unit that
//! accumulates stub types and methods for library code referenced by call sites but not itself
//! analyzed. Both kinds share the same idempotent lookup contract: a type name is looked up
//! before creation and never duplicated within its owning assembly.

use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use crossbeam_skiplist::SkipMap;

use crate::metadata::types::{TypeDef, TypeKind, TypeRc};

/// A reference-counted pointer to an [`Assembly`].
pub type AssemblyRc = Arc<Assembly>;

/// Origin of an assembly's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SourceKind {
    /// Compiled JVM bytecode under analysis.
    Java,
    /// The synthesized reference model for external/library code.
    Reference,
}

/// A smart reference to an [`Assembly`] that holds a weak pointer, preventing circular
/// reference memory leaks while providing a clean API.
#[derive(Clone, Debug)]
pub struct AssemblyRef {
    weak_ref: Weak<Assembly>,
}

impl AssemblyRef {
    /// Create a new `AssemblyRef` from a strong reference.
    pub fn new(strong_ref: &AssemblyRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the assembly, returning `None` if it has been dropped.
    #[must_use]
    pub fn upgrade(&self) -> Option<AssemblyRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced assembly is still alive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }
}

impl From<AssemblyRc> for AssemblyRef {
    fn from(strong_ref: AssemblyRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// One analyzed unit of compiled code, or the run's reference model.
///
/// Entities are created during the sequential per-assembly scan and never deleted. The type map
/// is ordered by name so that iteration (and therefore the exported document) is deterministic.
pub struct Assembly {
    /// Assembly name (the project name for main assemblies).
    pub name: String,
    /// Version string as supplied by the caller.
    pub version: String,
    /// Creation time of this entity, stamped when the run builds it.
    pub created: DateTime<Utc>,
    /// Where this assembly's contents come from.
    pub source_kind: SourceKind,
    /// `true` for assemblies under analysis, `false` for the reference assembly.
    pub is_main: bool,
    /// Types owned by this assembly, unique per name.
    types: SkipMap<String, TypeRc>,
}

impl Assembly {
    /// Create a new main assembly.
    #[must_use]
    pub fn new(name: &str, version: &str, source_kind: SourceKind) -> AssemblyRc {
        Arc::new(Self {
            name: name.to_string(),
            version: version.to_string(),
            created: Utc::now(),
            source_kind,
            is_main: true,
            types: SkipMap::new(),
        })
    }

    /// Create the run's reference assembly.
    ///
    /// There is exactly one per analysis run, shared across all analyzed assemblies so that a
    /// library type referenced from many call sites accumulates its declared-exception
    /// information without duplication.
    #[must_use]
    pub fn reference() -> AssemblyRc {
        Arc::new(Self {
            name: "reference".to_string(),
            version: "0".to_string(),
            created: Utc::now(),
            source_kind: SourceKind::Reference,
            is_main: false,
            types: SkipMap::new(),
        })
    }

    /// Look up a type by name, creating it if absent.
    ///
    /// Idempotent: calling twice with the same name returns the same instance and never creates
    /// a duplicate. The `kind` supplied on a second call is ignored (first writer wins).
    pub fn type_or_create(&self, name: &str, kind: TypeKind) -> TypeRc {
        self.types
            .get_or_insert_with(name.to_string(), || TypeDef::new(name, kind))
            .value()
            .clone()
    }

    /// Look up an existing type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<TypeRc> {
        self.types.get(name).map(|entry| entry.value().clone())
    }

    /// The types owned by this assembly, ordered by name.
    #[must_use]
    pub fn types(&self) -> &SkipMap<String, TypeRc> {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_or_create_is_idempotent() {
        let assembly = Assembly::new("app", "1.0", SourceKind::Java);

        let first = assembly.type_or_create("com.example.Widget", TypeKind::CLASS);
        let second = assembly.type_or_create("com.example.Widget", TypeKind::CLASS);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(assembly.types().len(), 1);
    }

    #[test]
    fn test_type_or_create_first_writer_wins() {
        let assembly = Assembly::new("app", "1.0", SourceKind::Java);

        let first = assembly.type_or_create("com.example.Widget", TypeKind::CLASS);
        // A later caller disagreeing about the kind does not mutate the entity.
        let again = assembly.type_or_create(
            "com.example.Widget",
            TypeKind::INTERFACE | TypeKind::ABSTRACT,
        );
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.kind, TypeKind::CLASS);
    }

    #[test]
    fn test_assembly_ref_upgrade() {
        let assembly = Assembly::new("app", "1.0", SourceKind::Java);
        let weak = AssemblyRef::new(&assembly);
        assert!(weak.is_valid());
        assert!(Arc::ptr_eq(&weak.upgrade().unwrap(), &assembly));

        drop(assembly);
        assert!(!weak.is_valid());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_source_kind_round_trip() {
        assert_eq!(SourceKind::Java.to_string(), "java");
        assert_eq!("reference".parse::<SourceKind>(), Ok(SourceKind::Reference));
    }
}
