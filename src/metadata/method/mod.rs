//! Method entities, call sites, and call targets.
//!
//! A [`Method`] owns ordered, append-only collections of everything the per-method scan
//! records: call sites, throw sites, try regions, and catch clauses. Positions inside those
//! records are unit indices; insertion order is the only ordering of the collections
//! themselves.
//!
//! Call sites are built in two stages. The scan records a [`MethodCall`] against a
//! [`FakeMethod`] descriptor (the statically declared target); the global resolution pass later
//! attaches the concrete [`Method`] if one is known to the model. The public view of a target
//! is the tagged [`CallTarget`], never a half-filled optional.

mod exceptions;

pub use exceptions::{CatchClause, ExceptionType, Throw, TryRegion};

use std::sync::{Arc, OnceLock, Weak};

use crate::metadata::assembly::{AssemblyRc, AssemblyRef};

/// A reference-counted pointer to a [`Method`].
pub type MethodRc = Arc<Method>;

/// Method visibility, part of the method lookup key.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Visibility {
    /// Declared public.
    Public,
    /// Declared private.
    Private,
    /// Declared protected.
    Protected,
    /// No visibility information (e.g. reference-model stubs).
    #[default]
    Unknown,
}

/// Lookup key for methods within a type: name, signature, and visibility.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MethodKey {
    /// Method name.
    pub name: String,
    /// Full signature string.
    pub signature: String,
    /// Declared visibility.
    pub visibility: Visibility,
}

impl MethodKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(name: &str, signature: &str, visibility: Visibility) -> Self {
        Self {
            name: name.to_string(),
            signature: signature.to_string(),
            visibility,
        }
    }
}

/// A smart reference to a [`Method`] that holds a weak pointer, preventing circular
/// reference memory leaks (a resolved call target may point back into its own type)
/// while providing a clean API.
#[derive(Clone, Debug)]
pub struct MethodRef {
    weak_ref: Weak<Method>,
}

impl MethodRef {
    /// Create a new `MethodRef` from a strong reference.
    pub fn new(strong_ref: &MethodRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the method, returning `None` if it has been dropped.
    #[must_use]
    pub fn upgrade(&self) -> Option<MethodRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced method is still alive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }
}

impl From<MethodRc> for MethodRef {
    fn from(strong_ref: MethodRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// Statically declared target of a call site before resolution.
///
/// Transient descriptor: once the global pass resolves the call, consumers see the concrete
/// method through [`CallTarget::Resolved`] and the descriptor only remains as provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeMethod {
    /// Name of the type declaring the target method.
    pub declaring_type: String,
    /// Signature of the target method.
    pub signature: String,
}

/// Resolved view of a call site's target.
#[derive(Debug, Clone)]
pub enum CallTarget {
    /// The target is a concrete method known to the model.
    Resolved(MethodRc),
    /// No matching method exists in the model; the call stays permanently unresolved.
    ///
    /// Not an error: many calls target synthetic, generic-erased, or otherwise unmodeled
    /// signatures.
    Unresolved {
        /// Name of the declaring type from the fake descriptor.
        declaring_type: String,
        /// Signature from the fake descriptor.
        signature: String,
    },
}

impl CallTarget {
    /// Returns `true` if this target was resolved to a concrete method.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// A call site inside a method at a given unit position.
#[derive(Debug)]
pub struct MethodCall {
    /// Unit position of the call within the containing method body.
    pub position: u32,
    /// The assembly whose scan recorded this call.
    assembly: AssemblyRef,
    /// The method containing this call site.
    method: MethodRef,
    /// The statically declared target.
    fake: FakeMethod,
    /// Concrete target, set at most once by the global resolution pass.
    resolved: OnceLock<MethodRef>,
}

impl MethodCall {
    /// Record a call site against a fake target. Resolution happens later, globally.
    #[must_use]
    pub fn with_fake_target(
        assembly: &AssemblyRc,
        method: &MethodRc,
        fake: FakeMethod,
        position: u32,
    ) -> Self {
        Self {
            position,
            assembly: AssemblyRef::new(assembly),
            method: MethodRef::new(method),
            fake,
            resolved: OnceLock::new(),
        }
    }

    /// The assembly whose scan recorded this call.
    #[must_use]
    pub fn assembly(&self) -> &AssemblyRef {
        &self.assembly
    }

    /// The method containing this call site.
    #[must_use]
    pub fn declaring_method(&self) -> &MethodRef {
        &self.method
    }

    /// The statically declared target descriptor.
    #[must_use]
    pub fn fake(&self) -> &FakeMethod {
        &self.fake
    }

    /// Current view of the call target.
    #[must_use]
    pub fn target(&self) -> CallTarget {
        match self.resolved.get().and_then(MethodRef::upgrade) {
            Some(method) => CallTarget::Resolved(method),
            None => CallTarget::Unresolved {
                declaring_type: self.fake.declaring_type.clone(),
                signature: self.fake.signature.clone(),
            },
        }
    }

    /// Returns `true` once the global pass has attached a concrete target.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Attach the concrete target. A second call is a no-op, keeping resolution idempotent.
    pub(crate) fn resolve(&self, target: &MethodRc) {
        let _ = self.resolved.set(MethodRef::new(target));
    }
}

/// A method discovered during analysis, or a reference-model stub for an external method.
///
/// Reference-model stubs carry only declared-exception [`Throw`] records and never a body, so
/// their finally count stays zero and their other collections stay empty.
#[derive(Debug)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Full signature string.
    pub signature: String,
    /// Declared visibility.
    pub visibility: Visibility,
    /// Number of distinct finally handlers, set once after the region scan.
    finally_count: OnceLock<u32>,
    /// Call sites in insertion order.
    calls: boxcar::Vec<MethodCall>,
    /// Throw sites and declared-exception records in insertion order.
    throws: boxcar::Vec<Throw>,
    /// Try regions in insertion order.
    tries: boxcar::Vec<TryRegion>,
    /// Catch clauses in insertion order.
    catches: boxcar::Vec<CatchClause>,
}

impl Method {
    /// Create a new method entity. Callers go through `TypeDef::method_or_create`.
    #[must_use]
    pub(crate) fn new(name: &str, signature: &str, visibility: Visibility) -> MethodRc {
        Arc::new(Self {
            name: name.to_string(),
            signature: signature.to_string(),
            visibility,
            finally_count: OnceLock::new(),
            calls: boxcar::Vec::new(),
            throws: boxcar::Vec::new(),
            tries: boxcar::Vec::new(),
            catches: boxcar::Vec::new(),
        })
    }

    /// Number of distinct finally handlers found in this method's body.
    #[must_use]
    pub fn finally_count(&self) -> u32 {
        self.finally_count.get().copied().unwrap_or(0)
    }

    pub(crate) fn set_finally_count(&self, count: u32) {
        let _ = self.finally_count.set(count);
    }

    /// Call sites in insertion order.
    #[must_use]
    pub fn calls(&self) -> &boxcar::Vec<MethodCall> {
        &self.calls
    }

    /// Throw sites (and, for reference-model stubs, declared exceptions) in insertion order.
    #[must_use]
    pub fn throws(&self) -> &boxcar::Vec<Throw> {
        &self.throws
    }

    /// Try regions in insertion order.
    #[must_use]
    pub fn tries(&self) -> &boxcar::Vec<TryRegion> {
        &self.tries
    }

    /// Catch clauses in insertion order.
    #[must_use]
    pub fn catches(&self) -> &boxcar::Vec<CatchClause> {
        &self.catches
    }

    pub(crate) fn push_call(&self, call: MethodCall) {
        self.calls.push(call);
    }

    pub(crate) fn push_throw(&self, throw: Throw) {
        self.throws.push(throw);
    }

    pub(crate) fn push_try(&self, region: TryRegion) {
        self.tries.push(region);
    }

    pub(crate) fn push_catch(&self, clause: CatchClause) {
        self.catches.push(clause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::assembly::{Assembly, SourceKind};

    #[test]
    fn test_visibility_round_trip() {
        assert_eq!(Visibility::Protected.to_string(), "protected");
        assert_eq!("PUBLIC".parse::<Visibility>(), Ok(Visibility::Public));
        assert!("package".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_finally_count_set_once() {
        let method = Method::new("run", "void run()", Visibility::Public);
        assert_eq!(method.finally_count(), 0);

        method.set_finally_count(2);
        method.set_finally_count(7);
        assert_eq!(method.finally_count(), 2);
    }

    #[test]
    fn test_call_target_transitions_once() {
        let assembly = Assembly::new("app", "1.0", SourceKind::Java);
        let caller = Method::new("run", "void run()", Visibility::Public);
        let callee = Method::new("close", "void close()", Visibility::Public);
        let other = Method::new("flush", "void flush()", Visibility::Public);

        let call = MethodCall::with_fake_target(
            &assembly,
            &caller,
            FakeMethod {
                declaring_type: "com.example.Widget".to_string(),
                signature: "void close()".to_string(),
            },
            3,
        );
        assert!(!call.is_resolved());
        assert!(matches!(call.target(), CallTarget::Unresolved { .. }));

        call.resolve(&callee);
        call.resolve(&other);
        match call.target() {
            CallTarget::Resolved(target) => assert!(Arc::ptr_eq(&target, &callee)),
            CallTarget::Unresolved { .. } => panic!("target should be resolved"),
        }
    }
}
