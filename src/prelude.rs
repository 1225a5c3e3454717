//! # throwscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the throwscope library. Import this module to get quick access to the essential
//! types for exception-flow analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all throwscope operations
pub use crate::Error;

/// The result type used throughout throwscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Owner and driver of one analysis run
pub use crate::analysis::AnalysisContext;

/// On-demand aggregate statistics over a model
pub use crate::analysis::ModelStats;

/// Document rendering of a run's model
pub use crate::export::{export_to_file, write_document};

// ================================================================================================
// Entity Model
// ================================================================================================

/// Assembly entities and their origin tag
pub use crate::metadata::assembly::{Assembly, AssemblyRc, AssemblyRef, SourceKind};

/// Type entities and the kind descriptor flags
pub use crate::metadata::types::{TypeDef, TypeKind, TypeRc};

/// Method entities, call sites, and call targets
pub use crate::metadata::method::{
    CallTarget, CatchClause, ExceptionType, FakeMethod, Method, MethodCall, MethodKey, MethodRc,
    MethodRef, Throw, TryRegion, Visibility,
};

// ================================================================================================
// Loader Seam
// ================================================================================================

/// The collaborator interface and its bundled implementations
pub use crate::metadata::loader::{BytecodeSource, ClassInfo, JsonSource, MemorySource, MethodInfo};

/// Loader-facing input model
pub use crate::metadata::units::{ExceptionDecl, MethodBody, TrapEntry, Unit, THROWABLE};
