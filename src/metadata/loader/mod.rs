//! The bytecode loader seam: the collaborator interface the analysis consumes.
//!
//! Loading and parsing compiled code into method-level unit sequences is external to this
//! crate. A [`BytecodeSource`] serves the application-level class set of one compiled program;
//! phantom or otherwise unknown types are simply absent from it. [`MemorySource`] backs tests
//! and embedders that already hold the data; [`JsonSource`] reads the unit-dump interchange
//! format from disk.

mod json;

pub use json::JsonSource;

use crate::metadata::method::Visibility;
use crate::metadata::types::TypeKind;
use crate::metadata::units::MethodBody;
use crate::{Error, Result};

/// A source of application-level classes for one compiled program.
pub trait BytecodeSource {
    /// The application-level class set, in a deterministic order.
    fn classes(&self) -> &[ClassInfo];
}

/// One application-level class as served by a loader.
#[derive(Debug)]
pub struct ClassInfo {
    /// Fully qualified class name.
    pub name: String,
    /// Kind descriptor.
    pub kind: TypeKind,
    /// The class's methods, in loader order.
    pub methods: Vec<MethodInfo>,
}

/// One method as served by a loader.
#[derive(Debug)]
pub struct MethodInfo {
    /// Method name.
    pub name: String,
    /// Full signature string.
    pub signature: String,
    /// Declared visibility.
    pub visibility: Visibility,
    body: BodyState,
}

#[derive(Debug)]
enum BodyState {
    Available(MethodBody),
    Unavailable(String),
}

impl MethodInfo {
    /// A method with a retrievable body.
    #[must_use]
    pub fn new(name: &str, signature: &str, visibility: Visibility, body: MethodBody) -> Self {
        Self {
            name: name.to_string(),
            signature: signature.to_string(),
            visibility,
            body: BodyState::Available(body),
        }
    }

    /// A method whose body could not be retrieved (malformed or unavailable bytecode).
    ///
    /// The scan records the method entity but none of its exception-flow or call-site data.
    #[must_use]
    pub fn without_body(
        name: &str,
        signature: &str,
        visibility: Visibility,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            signature: signature.to_string(),
            visibility,
            body: BodyState::Unavailable(reason.into()),
        }
    }

    /// Retrieve the method body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyUnavailable`] when the loader could not produce a body for this
    /// method; callers skip the method and continue.
    pub fn body(&self) -> Result<&MethodBody> {
        match &self.body {
            BodyState::Available(body) => Ok(body),
            BodyState::Unavailable(reason) => Err(Error::BodyUnavailable {
                method: format!("{} {}", self.name, self.signature),
                reason: reason.clone(),
            }),
        }
    }
}

/// An in-memory [`BytecodeSource`], for tests and embedders that construct class data
/// directly.
pub struct MemorySource {
    classes: Vec<ClassInfo>,
}

impl MemorySource {
    /// Wrap an already-built class set.
    #[must_use]
    pub fn new(classes: Vec<ClassInfo>) -> Self {
        Self { classes }
    }
}

impl BytecodeSource for MemorySource {
    fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_unavailable_carries_identity() {
        let info = MethodInfo::without_body(
            "run",
            "void run()",
            Visibility::Public,
            "truncated code attribute",
        );

        let err = info.body().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("void run()"));
        assert!(message.contains("truncated code attribute"));
    }
}
