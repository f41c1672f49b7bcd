//! Name generation for anonymous embedded structure types
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Collision-free name generator for anonymous structure types.
///
/// Monotonic and safe to share across threads; every generated name embeds
/// a counter value taken with an atomic increment. Callers that want
/// deterministic names (tests, code generation) can construct their own
/// generator instead of using the process-wide default.
#[derive(Debug, Default)]
pub struct NameGenerator {
    counter: AtomicU64,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default generator.
    pub fn global() -> &'static NameGenerator {
        static GLOBAL: OnceLock<NameGenerator> = OnceLock::new();
        GLOBAL.get_or_init(NameGenerator::new)
    }

    pub fn next(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}", prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_monotonic() {
        let names = NameGenerator::new();
        let a = names.next("Anon");
        let b = names.next("Anon");
        assert_eq!(a, "Anon_0");
        assert_eq!(b, "Anon_1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_global_generator_is_shared() {
        let a = NameGenerator::global().next("G");
        let b = NameGenerator::global().next("G");
        assert_ne!(a, b);
    }
}
