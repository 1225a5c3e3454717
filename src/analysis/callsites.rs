//! Call-site recording and reference-model registration.
//!
//! Every unit containing a call expression yields a [`MethodCall`] against a fake target
//! descriptor; resolution to concrete methods happens later, globally (see
//! [`crate::analysis::resolution`]). When the statically declared target belongs to a type
//! outside the set under analysis, the external method is first registered in the run's
//! shared reference assembly, together with one declared-exception record per checked
//! exception it declares. Registration runs at every call site but the idempotent
//! get-or-create guard makes the copy happen at most once per distinct external method.

use std::collections::HashSet;

use crate::metadata::assembly::AssemblyRc;
use crate::metadata::method::{ExceptionType, FakeMethod, MethodCall, MethodRc, Throw, Visibility};
use crate::metadata::types::TypeKind;
use crate::metadata::units::{ExceptionDecl, Unit};

/// Record the call site in `unit` (a no-op for non-invoke units).
pub(crate) fn record_call(
    reference: &AssemblyRc,
    analyzed: &HashSet<&str>,
    assembly: &AssemblyRc,
    method: &MethodRc,
    unit: &Unit,
    position: u32,
) {
    let Unit::Invoke {
        declaring_type,
        name,
        signature,
        declared_exceptions,
        target_abstract,
    } = unit
    else {
        return;
    };

    if !analyzed.contains(declaring_type.as_str()) {
        register_external(
            reference,
            declaring_type,
            name,
            signature,
            declared_exceptions,
            *target_abstract,
        );
    }

    method.push_call(MethodCall::with_fake_target(
        assembly,
        method,
        FakeMethod {
            declaring_type: declaring_type.clone(),
            signature: signature.clone(),
        },
        position,
    ));
}

/// Ensure a reference-model stub exists for an external method, copying its declared
/// exceptions exactly once.
fn register_external(
    reference: &AssemblyRc,
    declaring_type: &str,
    name: &str,
    signature: &str,
    declared_exceptions: &[ExceptionDecl],
    target_abstract: bool,
) {
    let kind = if target_abstract {
        TypeKind::CLASS | TypeKind::ABSTRACT
    } else {
        TypeKind::CLASS
    };
    let ty = reference.type_or_create(declaring_type, kind);

    let (stub, created) = ty.method_or_create(name, signature, Visibility::Unknown);
    if created {
        for decl in declared_exceptions {
            stub.push_throw(Throw::declared(ExceptionType::new(
                &decl.name,
                &decl.superclass,
            )));
        }
    }
}
