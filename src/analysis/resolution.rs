//! Global call-target resolution.
//!
//! Runs once, after every method of every assembly has been scanned: resolution depends on
//! the complete set of known methods. A lookup index from (declaring-type name, signature)
//! to concrete method is built over the analyzed assemblies first and the reference assembly
//! second, first insert wins, so an analyzed method shadows any reference-model stub sharing
//! its key. Calls whose descriptor matches nothing anywhere stay unresolved; that is a
//! queryable state, not an error.

use std::sync::Arc;

use dashmap::DashMap;

use crate::metadata::assembly::AssemblyRc;
use crate::metadata::method::MethodRc;

/// Resolve every unresolved call site across the given assemblies. Idempotent: a second run
/// finds every previously resolved call already settled and changes nothing.
pub(crate) fn resolve(assemblies: &[AssemblyRc], reference: &AssemblyRc) {
    let index: DashMap<(String, String), MethodRc> = DashMap::new();
    for assembly in assemblies {
        index_assembly(&index, assembly);
    }
    index_assembly(&index, reference);

    for assembly in assemblies {
        for ty in assembly.types().iter() {
            for method in ty.value().methods().iter() {
                for (_, call) in method.value().calls().iter() {
                    if call.is_resolved() {
                        continue;
                    }
                    let fake = call.fake();
                    let key = (fake.declaring_type.clone(), fake.signature.clone());
                    if let Some(target) = index.get(&key) {
                        call.resolve(target.value());
                    }
                }
            }
        }
    }
}

fn index_assembly(index: &DashMap<(String, String), MethodRc>, assembly: &AssemblyRc) {
    for ty in assembly.types().iter() {
        for method in ty.value().methods().iter() {
            index
                .entry((ty.key().clone(), method.value().signature.clone()))
                .or_insert_with(|| Arc::clone(method.value()));
        }
    }
}
