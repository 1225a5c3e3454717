//! Exception-flow records owned by a method: try regions, catch clauses, throw sites.
//!
//! All three are specializations of the model's generic "method exception" category and
//! serialize under the shared `methodException` tag. Begin/end positions are the raw
//! exception-table values; for nested or adjacent try/catch/finally structures they do not
//! always coincide with true source-level block boundaries, and are preserved as-is.

/// Names of throwable families that indicate a catch-all rather than a specific failure.
const GENERIC_FAMILIES: [&str; 4] = [
    "java.lang.Throwable",
    "java.lang.Exception",
    "java.lang.Error",
    "java.lang.RuntimeException",
];

/// An exception type together with its direct superclass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionType {
    /// Fully qualified exception type name.
    pub name: String,
    /// Fully qualified name of the direct superclass.
    pub superclass: String,
}

impl ExceptionType {
    /// Build a descriptor from a type name and its direct superclass.
    #[must_use]
    pub fn new(name: &str, superclass: &str) -> Self {
        Self {
            name: name.to_string(),
            superclass: superclass.to_string(),
        }
    }

    /// Returns `true` if this type names a whole throwable family (a catch-all) rather than
    /// a specific failure. Used by the statistics split of generic vs specialized catches.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        GENERIC_FAMILIES.contains(&self.name.as_str())
    }
}

/// An explicit throw of a non-generic exception type, or a declared exception of an
/// external method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throw {
    /// The thrown (or declared) exception type.
    pub exception: ExceptionType,
    /// Unit position of the throw statement; `None` for declared-exception records, which
    /// have no body to position against.
    pub position: Option<u32>,
}

impl Throw {
    /// A throw statement observed at a unit position.
    #[must_use]
    pub fn at(exception: ExceptionType, position: u32) -> Self {
        Self {
            exception,
            position: Some(position),
        }
    }

    /// A declared exception of an external method, injected into the reference model.
    #[must_use]
    pub fn declared(exception: ExceptionType) -> Self {
        Self {
            exception,
            position: None,
        }
    }
}

/// A protected region, recorded as the raw begin/end positions of its trap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryRegion {
    /// Begin unit position.
    pub begin: u32,
    /// End unit position.
    pub end: u32,
}

impl TryRegion {
    /// Build a region from raw trap bounds.
    #[must_use]
    pub const fn new(begin: u32, end: u32) -> Self {
        Self { begin, end }
    }
}

/// An exception handler clause: the caught type and the protected range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchClause {
    /// The caught exception type.
    pub exception: ExceptionType,
    /// Begin unit position of the protected range.
    pub begin: u32,
    /// End unit position of the protected range.
    pub end: u32,
}

impl CatchClause {
    /// Build a clause from its caught type and raw trap bounds.
    #[must_use]
    pub fn new(exception: ExceptionType, begin: u32, end: u32) -> Self {
        Self {
            exception,
            begin,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_families() {
        assert!(ExceptionType::new("java.lang.Exception", "java.lang.Throwable").is_generic());
        assert!(ExceptionType::new("java.lang.RuntimeException", "java.lang.Exception").is_generic());
        assert!(!ExceptionType::new("java.io.IOException", "java.lang.Exception").is_generic());
    }

    #[test]
    fn test_throw_positions() {
        let site = Throw::at(ExceptionType::new("java.io.IOException", "java.lang.Exception"), 4);
        assert_eq!(site.position, Some(4));

        let declared =
            Throw::declared(ExceptionType::new("java.io.IOException", "java.lang.Exception"));
        assert_eq!(declared.position, None);
    }
}
