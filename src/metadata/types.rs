//! Type entities and their kind descriptor.
//!
//! A [`TypeDef`] belongs to exactly one assembly (its owner holds the only strong map entry)
//! and owns its methods, keyed by name, signature, and visibility. Visibility is part of the
//! key to disambiguate accidental collisions across overloads sharing a name/signature; in
//! practice the signature already disambiguates.

use std::sync::Arc;

use bitflags::bitflags;
use crossbeam_skiplist::SkipMap;

use crate::metadata::method::{Method, MethodKey, MethodRc, Visibility};

/// A reference-counted pointer to a [`TypeDef`].
pub type TypeRc = Arc<TypeDef>;

bitflags! {
    /// Kind descriptor of a type. Flags are combinable (e.g. `CLASS | ABSTRACT`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypeKind: u8 {
        /// A concrete or abstract class.
        const CLASS = 0x01;
        /// An interface.
        const INTERFACE = 0x02;
        /// Declared abstract.
        const ABSTRACT = 0x04;
        /// A static (non-instantiable) holder type.
        const STATIC = 0x08;
        /// An enum type.
        const ENUM = 0x10;
    }
}

impl TypeKind {
    /// Parse a single kind flag from its lowercase name, as used in unit dumps.
    #[must_use]
    pub fn from_kind_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "class" => Some(Self::CLASS),
            "interface" => Some(Self::INTERFACE),
            "abstract" => Some(Self::ABSTRACT),
            "static" => Some(Self::STATIC),
            "enum" => Some(Self::ENUM),
            _ => None,
        }
    }

    /// Space-separated lowercase flag names, used as the document attribute value.
    #[must_use]
    pub fn label(&self) -> String {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A type discovered during analysis, or a reference-model stub for a library type.
pub struct TypeDef {
    /// Fully qualified type name.
    pub name: String,
    /// Kind descriptor as supplied by the first creator.
    pub kind: TypeKind,
    /// Methods owned by this type, unique per (name, signature, visibility).
    methods: SkipMap<MethodKey, MethodRc>,
}

impl TypeDef {
    /// Create a new type entity. Callers go through `Assembly::type_or_create`.
    #[must_use]
    pub(crate) fn new(name: &str, kind: TypeKind) -> TypeRc {
        Arc::new(Self {
            name: name.to_string(),
            kind,
            methods: SkipMap::new(),
        })
    }

    /// Look up a method by key, creating it if absent.
    ///
    /// Idempotent: the same key always yields the same instance, and visibility supplied on a
    /// second call with an otherwise identical key is part of that key, while any disagreement
    /// about the entity's contents is resolved first-writer-wins. The boolean reports whether
    /// this call created the entry, which gates one-time setup such as copying an external
    /// method's declared exceptions.
    pub fn method_or_create(
        &self,
        name: &str,
        signature: &str,
        visibility: Visibility,
    ) -> (MethodRc, bool) {
        let mut created = false;
        let entry = self.methods.get_or_insert_with(
            MethodKey::new(name, signature, visibility),
            || {
                created = true;
                Method::new(name, signature, visibility)
            },
        );
        (entry.value().clone(), created)
    }

    /// Look up an existing method by key.
    #[must_use]
    pub fn get_method(&self, name: &str, signature: &str, visibility: Visibility) -> Option<MethodRc> {
        self.methods
            .get(&MethodKey::new(name, signature, visibility))
            .map(|entry| entry.value().clone())
    }

    /// The methods owned by this type, in key order.
    #[must_use]
    pub fn methods(&self) -> &SkipMap<MethodKey, MethodRc> {
        &self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_label() {
        assert_eq!(TypeKind::CLASS.label(), "class");
        assert_eq!((TypeKind::CLASS | TypeKind::ABSTRACT).label(), "class abstract");
        assert_eq!(TypeKind::empty().label(), "");
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(TypeKind::from_kind_name("Interface"), Some(TypeKind::INTERFACE));
        assert_eq!(TypeKind::from_kind_name("sealed"), None);
    }

    #[test]
    fn test_method_or_create_is_idempotent() {
        let ty = TypeDef::new("com.example.Widget", TypeKind::CLASS);

        let (first, created) = ty.method_or_create("close", "void close()", Visibility::Public);
        assert!(created);
        let (second, created) = ty.method_or_create("close", "void close()", Visibility::Public);
        assert!(!created);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ty.methods().len(), 1);
    }

    #[test]
    fn test_method_key_includes_visibility() {
        let ty = TypeDef::new("com.example.Widget", TypeKind::CLASS);

        let (public, _) = ty.method_or_create("run", "void run()", Visibility::Public);
        let (private, _) = ty.method_or_create("run", "void run()", Visibility::Private);
        assert!(!Arc::ptr_eq(&public, &private));
        assert_eq!(ty.methods().len(), 2);
    }
}
