//! Aggregate statistics over an entity model.

use std::fmt;

use crate::metadata::assembly::AssemblyRc;

/// Counts recomputed on demand from a set of assemblies.
///
/// Catches are split into "generic" (the caught type names a whole throwable family, a
/// catch-all) and "specialized" (a specific failure type); the two always sum to `catches`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStats {
    /// Number of types.
    pub types: usize,
    /// Number of methods.
    pub methods: usize,
    /// Number of try regions.
    pub tries: usize,
    /// Number of catch clauses.
    pub catches: usize,
    /// Catch clauses whose type is a catch-all family.
    pub generic_catches: usize,
    /// Catch clauses naming a specific failure type.
    pub specialized_catches: usize,
    /// Number of throw sites and declared-exception records.
    pub throws: usize,
    /// Total distinct finally handlers across all methods.
    pub finally_handlers: usize,
}

impl ModelStats {
    /// Walk the given assemblies and count everything.
    pub fn collect<'a, I>(assemblies: I) -> Self
    where
        I: IntoIterator<Item = &'a AssemblyRc>,
    {
        let mut stats = Self::default();

        for assembly in assemblies {
            for ty in assembly.types().iter() {
                stats.types += 1;
                for method in ty.value().methods().iter() {
                    let method = method.value();
                    stats.methods += 1;
                    stats.tries += method.tries().count();
                    stats.throws += method.throws().count();
                    stats.finally_handlers += method.finally_count() as usize;
                    for (_, clause) in method.catches().iter() {
                        stats.catches += 1;
                        if clause.exception.is_generic() {
                            stats.generic_catches += 1;
                        } else {
                            stats.specialized_catches += 1;
                        }
                    }
                }
            }
        }

        stats
    }
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "types:            {}", self.types)?;
        writeln!(f, "methods:          {}", self.methods)?;
        writeln!(f, "try regions:      {}", self.tries)?;
        writeln!(
            f,
            "catch clauses:    {} ({} generic, {} specialized)",
            self.catches, self.generic_catches, self.specialized_catches
        )?;
        writeln!(f, "throw sites:      {}", self.throws)?;
        write!(f, "finally handlers: {}", self.finally_handlers)
    }
}
