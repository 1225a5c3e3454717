//! Exception region reconstruction.
//!
//! Converts a method's raw exception-table entries into [`TryRegion`], [`CatchClause`], and
//! finally-count records. The table is redundant by construction: a source-level try with
//! several catches compiles to one entry per catch, all sharing begin/end, and finally
//! dispatch appears once per protected path. Two per-method dedup sets collapse that
//! redundancy, keyed by handler-unit identity (finally handlers) and end-unit identity (try
//! regions). Begin/end positions stay the raw table values.

use std::collections::HashSet;

use crate::metadata::method::{CatchClause, ExceptionType, MethodRc, Throw, TryRegion};
use crate::metadata::units::{ExceptionDecl, TrapEntry, THROWABLE};

/// Rebuild try/catch/finally structure from the raw exception table, in table order.
pub(crate) fn reconstruct(method: &MethodRc, traps: &[TrapEntry]) {
    let mut finally_handlers: HashSet<u32> = HashSet::new();
    let mut try_ends: HashSet<u32> = HashSet::new();

    for trap in traps {
        if trap.is_finally() {
            finally_handlers.insert(trap.handler);
            // handler == end means a bare try wrapping only the finally, no catch body
            if trap.handler == trap.end && try_ends.insert(trap.end) {
                method.push_try(TryRegion::new(trap.begin, trap.end));
            }
        } else {
            if try_ends.insert(trap.end) {
                method.push_try(TryRegion::new(trap.begin, trap.end));
            }
            method.push_catch(CatchClause::new(
                ExceptionType::new(&trap.exception, &trap.superclass),
                trap.begin,
                trap.end,
            ));
        }
    }

    method.set_finally_count(finally_handlers.len() as u32);
}

/// Record a throw site, unless the thrown type is the universal sentinel (a
/// compiler-synthesized rethrow at the end of a finally).
pub(crate) fn record_throw(method: &MethodRc, exception: &ExceptionDecl, position: u32) {
    if exception.name == THROWABLE {
        return;
    }
    method.push_throw(Throw::at(
        ExceptionType::new(&exception.name, &exception.superclass),
        position,
    ));
}
