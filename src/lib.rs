// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # throwscope
//!
//! A framework for extracting exception-flow and call-site models from compiled JVM
//! programs. Given the method-level unit sequences and raw exception tables a bytecode
//! frontend produces, `throwscope` reconstructs well-formed try/catch/finally structure and
//! call-target information, maintains cross-method and cross-unit identity (types and
//! methods are singletons looked up by key, never duplicated), and resolves call sites
//! against a two-tier model: the code under analysis plus one synthesized *reference*
//! assembly accumulating declared-exception information for external library methods.
//!
//! ## Features
//!
//! - **Exception region reconstruction** - Rebuild try/catch/finally structure from raw,
//!   sometimes redundant exception tables, with per-method dedup of shared try bodies and
//!   finally dispatch points
//! - **Two-stage call resolution** - Record call sites against their statically declared
//!   target, then resolve globally once the full model is known
//! - **Identity-preserving export** - Render the entity graph to XML where shared entities
//!   are emitted once and referenced by stable id everywhere else
//! - **Deterministic** - Single sequential scan per run; ordered registries make output
//!   independent of enumeration order
//!
//! ## Quick Start
//!
//! ```rust
//! use throwscope::prelude::*;
//!
//! let source = MemorySource::new(vec![ClassInfo {
//!     name: "com.example.Main".to_string(),
//!     kind: TypeKind::CLASS,
//!     methods: vec![MethodInfo::new(
//!         "run",
//!         "void run()",
//!         Visibility::Public,
//!         MethodBody::default(),
//!     )],
//! }]);
//!
//! let mut ctx = AnalysisContext::new();
//! ctx.analyze("demo", "1.0", &source);
//! ctx.resolve_targets();
//!
//! assert_eq!(ctx.stats().methods, 1);
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - Entity model (assemblies, types, methods, exception-flow records) and
//!   the loader seam serving unit sequences and exception tables
//! - [`analysis`] - The per-method scan passes and the global resolution pass, driven by
//!   [`AnalysisContext`]
//! - [`export`] - Id-assignment pass and XML writer
//! - [`Error`] and [`Result`] - Error handling
//!
//! The bytecode loader itself is an external collaborator: anything able to serve
//! [`metadata::loader::BytecodeSource`] plugs in. [`metadata::loader::JsonSource`] reads the
//! JSON unit-dump interchange format from disk; [`metadata::loader::MemorySource`] serves
//! already-built class data.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Two conditions are
//! deliberately not errors: a call whose target matches nothing in the model stays
//! queryably unresolved, and a method whose body the loader cannot produce is logged,
//! skipped, and the run continues.

#[macro_use]
pub(crate) mod error;

/// Exception-flow and call-site analysis passes.
pub mod analysis;
/// Identity-preserving XML rendering of the entity model.
pub mod export;
/// Entity model and loader seam.
pub mod metadata;
/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

pub use analysis::AnalysisContext;
pub use error::{Error, Result};
