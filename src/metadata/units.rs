//! Loader-facing input model: unit sequences and raw exception tables.
//!
//! The bytecode loader supplies, per concrete method, an ordered sequence of executable
//! [`Unit`]s (positions are indices into that sequence) and the raw exception table as a list
//! of [`TrapEntry`] records. Both deserialize directly from the unit-dump interchange format.

use serde::Deserialize;

/// The root throwable type, used by compilers to mark generic rethrow and finally dispatch.
///
/// Excluded from explicit throw and catch typing: a trap declaring it is a finally handler,
/// and a throw of it is a compiler-synthesized rethrow, not a source-level throw.
pub const THROWABLE: &str = "java.lang.Throwable";

/// An exception type reference as supplied by the loader: name plus direct superclass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExceptionDecl {
    /// Fully qualified exception type name.
    pub name: String,
    /// Fully qualified name of the direct superclass.
    #[serde(default)]
    pub superclass: String,
}

/// One executable step in a method's linear, position-indexed representation.
///
/// Only throw statements and call expressions matter to the analysis; everything else is
/// [`Unit::Other`], kept so that positions remain faithful to the loader's sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Unit {
    /// An explicit throw statement.
    Throw {
        /// The statically declared type of the thrown value.
        exception: ExceptionDecl,
    },
    /// A statement containing a call expression.
    Invoke {
        /// Name of the type declaring the called method.
        declaring_type: String,
        /// Name of the called method.
        name: String,
        /// Signature of the called method.
        signature: String,
        /// Checked exceptions declared by the called method, supplied by the loader for
        /// externally referenced methods.
        #[serde(default)]
        declared_exceptions: Vec<ExceptionDecl>,
        /// Whether the called method is abstract.
        #[serde(default)]
        target_abstract: bool,
    },
    /// Any other executable step.
    Other,
}

/// One raw exception-table entry: which unit range is protected by which handler for which
/// exception type, or the universal sentinel for catch-all/finally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrapEntry {
    /// Begin unit position of the protected range.
    pub begin: u32,
    /// Unit position of the handler.
    pub handler: u32,
    /// End unit position of the protected range.
    pub end: u32,
    /// Declared exception type name, or [`THROWABLE`] for finally dispatch.
    pub exception: String,
    /// Direct superclass of the declared type; unused for the sentinel.
    #[serde(default)]
    pub superclass: String,
}

impl TrapEntry {
    /// Returns `true` if this entry is a finally handler (declares the universal sentinel).
    #[must_use]
    pub fn is_finally(&self) -> bool {
        self.exception == THROWABLE
    }
}

/// A concrete method's body as supplied by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MethodBody {
    /// Ordered unit sequence; positions are indices into this list.
    #[serde(default)]
    pub units: Vec<Unit>,
    /// Raw exception-table entries, in table order.
    #[serde(default)]
    pub traps: Vec<TrapEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trap_finally_detection() {
        let trap = TrapEntry {
            begin: 0,
            handler: 2,
            end: 2,
            exception: THROWABLE.to_string(),
            superclass: String::new(),
        };
        assert!(trap.is_finally());
    }

    #[test]
    fn test_unit_dump_decoding() {
        let body: MethodBody = serde_json::from_str(
            r#"{
                "units": [
                    {"kind": "other"},
                    {"kind": "invoke",
                     "declaring_type": "java.io.Reader",
                     "name": "close",
                     "signature": "void close()",
                     "declared_exceptions": [
                        {"name": "java.io.IOException", "superclass": "java.lang.Exception"}
                     ]},
                    {"kind": "throw",
                     "exception": {"name": "java.lang.IllegalStateException",
                                   "superclass": "java.lang.RuntimeException"}}
                ],
                "traps": [
                    {"begin": 0, "handler": 2, "end": 2, "exception": "java.lang.Throwable"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.units.len(), 3);
        assert!(matches!(body.units[0], Unit::Other));
        assert!(matches!(body.units[1], Unit::Invoke { ref name, .. } if name == "close"));
        assert!(body.traps[0].is_finally());
    }
}
