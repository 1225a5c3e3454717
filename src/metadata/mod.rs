//! Entity model and loader seam.
//!
//! The entity model is a mutable, identity-preserving graph of
//! `Assembly → Type → Method → {MethodCall, Throw, TryRegion, CatchClause}`, built by one
//! sequential scan per run and never pruned. Types and methods are singletons looked up by
//! key through idempotent get-or-create operations, never duplicated; see
//! [`assembly::Assembly::type_or_create`] and [`types::TypeDef::method_or_create`].
//!
//! [`units`] defines the loader-facing input model and [`loader`] the collaborator interface
//! serving it.

pub mod assembly;
pub mod loader;
pub mod method;
pub mod types;
pub mod units;
