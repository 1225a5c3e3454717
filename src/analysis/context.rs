//! The analysis context: one run's entity model and its scan driver.
//!
//! The context owns the main-assembly list and the run's single reference assembly, and is
//! passed explicitly to every component that needs them; its lifecycle is one analysis run.
//! Scanning is sequential and deterministic: for each class, for each concrete method, the
//! unit sequence is consumed in one linear pass (throw sites and call sites) followed by the
//! exception-table pass. Once every assembly has been scanned, [`AnalysisContext::resolve_targets`]
//! runs the global resolution pass; the ordering between the two is the only causal guarantee
//! the model needs.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::stats::ModelStats;
use crate::analysis::{callsites, regions, resolution};
use crate::metadata::assembly::{Assembly, AssemblyRc, SourceKind};
use crate::metadata::loader::BytecodeSource;
use crate::metadata::method::MethodRc;
use crate::metadata::units::{MethodBody, Unit};

/// Owner of one analysis run's entity model.
pub struct AnalysisContext {
    assemblies: Vec<AssemblyRc>,
    reference: AssemblyRc,
}

impl AnalysisContext {
    /// Create an empty context with a fresh reference assembly.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assemblies: Vec::new(),
            reference: Assembly::reference(),
        }
    }

    /// Scan one compiled program into a new main assembly.
    ///
    /// Methods whose body the loader cannot produce are logged and skipped entirely; no
    /// exception-flow or call-site records are created for them and the scan continues with
    /// the next method.
    pub fn analyze(
        &mut self,
        name: &str,
        version: &str,
        source: &impl BytecodeSource,
    ) -> AssemblyRc {
        let assembly = Assembly::new(name, version, SourceKind::Java);
        // Membership for the external-type test at call sites: the class set this source
        // serves, not the subset visited so far.
        let analyzed: HashSet<&str> = source
            .classes()
            .iter()
            .map(|class| class.name.as_str())
            .collect();

        for class in source.classes() {
            let ty = assembly.type_or_create(&class.name, class.kind);
            log::debug!("scanning {} ({} methods)", class.name, class.methods.len());

            for info in &class.methods {
                let (method, _) = ty.method_or_create(&info.name, &info.signature, info.visibility);
                let body = match info.body() {
                    Ok(body) => body,
                    Err(err) => {
                        log::warn!("skipping {}.{}: {}", class.name, info.name, err);
                        continue;
                    }
                };
                self.scan_method(&analyzed, &assembly, &method, body);
            }
        }

        self.assemblies.push(Arc::clone(&assembly));
        assembly
    }

    fn scan_method(
        &self,
        analyzed: &HashSet<&str>,
        assembly: &AssemblyRc,
        method: &MethodRc,
        body: &MethodBody,
    ) {
        for (position, unit) in body.units.iter().enumerate() {
            let position = position as u32;
            match unit {
                Unit::Throw { exception } => regions::record_throw(method, exception, position),
                Unit::Invoke { .. } => callsites::record_call(
                    &self.reference,
                    analyzed,
                    assembly,
                    method,
                    unit,
                    position,
                ),
                Unit::Other => {}
            }
        }

        regions::reconstruct(method, &body.traps);
    }

    /// Resolve every call site's fake target against the complete model.
    ///
    /// Must run after all assemblies have been analyzed; safe to run more than once.
    pub fn resolve_targets(&self) {
        resolution::resolve(&self.assemblies, &self.reference);
    }

    /// The main assemblies analyzed so far, in analysis order.
    #[must_use]
    pub fn assemblies(&self) -> &[AssemblyRc] {
        &self.assemblies
    }

    /// The run's shared reference assembly.
    #[must_use]
    pub fn reference(&self) -> &AssemblyRc {
        &self.reference
    }

    /// Aggregate statistics over the main assemblies, recomputed on demand.
    #[must_use]
    pub fn stats(&self) -> ModelStats {
        ModelStats::collect(self.assemblies.iter())
    }

    /// Aggregate statistics over the reference assembly, recomputed on demand.
    #[must_use]
    pub fn reference_stats(&self) -> ModelStats {
        ModelStats::collect(std::iter::once(&self.reference))
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::loader::{ClassInfo, MemorySource, MethodInfo};
    use crate::metadata::method::Visibility;
    use crate::metadata::types::TypeKind;
    use crate::metadata::units::{ExceptionDecl, Unit};

    fn external_call(declaring_type: &str, name: &str, signature: &str) -> Unit {
        Unit::Invoke {
            declaring_type: declaring_type.to_string(),
            name: name.to_string(),
            signature: signature.to_string(),
            declared_exceptions: vec![ExceptionDecl {
                name: "java.io.IOException".to_string(),
                superclass: "java.lang.Exception".to_string(),
            }],
            target_abstract: false,
        }
    }

    #[test]
    fn test_external_declared_exceptions_accumulate_once() {
        let source = MemorySource::new(vec![ClassInfo {
            name: "com.example.Main".to_string(),
            kind: TypeKind::CLASS,
            methods: vec![
                MethodInfo::new(
                    "run",
                    "void run()",
                    Visibility::Public,
                    MethodBody {
                        units: vec![
                            external_call("java.io.Reader", "close", "void close()"),
                            external_call("java.io.Reader", "close", "void close()"),
                        ],
                        traps: vec![],
                    },
                ),
                MethodInfo::new(
                    "stop",
                    "void stop()",
                    Visibility::Public,
                    MethodBody {
                        units: vec![external_call("java.io.Reader", "close", "void close()")],
                        traps: vec![],
                    },
                ),
            ],
        }]);

        let mut ctx = AnalysisContext::new();
        ctx.analyze("app", "1.0", &source);

        let reader = ctx.reference().get_type("java.io.Reader").unwrap();
        assert_eq!(reader.kind, TypeKind::CLASS);
        let close = reader
            .get_method("close", "void close()", Visibility::Unknown)
            .unwrap();
        // Three call sites, one declared-exception record.
        assert_eq!(close.throws().count(), 1);
        let (_, declared) = close.throws().iter().next().unwrap();
        assert_eq!(declared.exception.name, "java.io.IOException");
        assert_eq!(declared.position, None);
    }

    #[test]
    fn test_unusable_body_is_skipped() {
        let source = MemorySource::new(vec![ClassInfo {
            name: "com.example.Main".to_string(),
            kind: TypeKind::CLASS,
            methods: vec![MethodInfo::without_body(
                "broken",
                "void broken()",
                Visibility::Public,
                "malformed bytecode",
            )],
        }]);

        let mut ctx = AnalysisContext::new();
        let assembly = ctx.analyze("app", "1.0", &source);

        // The method entity exists, with no records of any kind.
        let ty = assembly.get_type("com.example.Main").unwrap();
        let method = ty
            .get_method("broken", "void broken()", Visibility::Public)
            .unwrap();
        assert_eq!(method.calls().count(), 0);
        assert_eq!(method.tries().count(), 0);
        assert_eq!(method.catches().count(), 0);
        assert_eq!(method.throws().count(), 0);
        assert_eq!(method.finally_count(), 0);
    }

    #[test]
    fn test_intra_program_calls_do_not_touch_reference_model() {
        let source = MemorySource::new(vec![
            ClassInfo {
                name: "com.example.Main".to_string(),
                kind: TypeKind::CLASS,
                methods: vec![MethodInfo::new(
                    "run",
                    "void run()",
                    Visibility::Public,
                    MethodBody {
                        units: vec![Unit::Invoke {
                            declaring_type: "com.example.Widget".to_string(),
                            name: "close".to_string(),
                            signature: "void close()".to_string(),
                            declared_exceptions: vec![],
                            target_abstract: false,
                        }],
                        traps: vec![],
                    },
                )],
            },
            ClassInfo {
                name: "com.example.Widget".to_string(),
                kind: TypeKind::CLASS,
                methods: vec![],
            },
        ]);

        let mut ctx = AnalysisContext::new();
        ctx.analyze("app", "1.0", &source);

        assert!(ctx.reference().get_type("com.example.Widget").is_none());
    }
}
