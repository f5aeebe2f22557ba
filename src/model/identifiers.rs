//! Identifier generation for new change records.
//!
//! Change identities only need to be unique; they carry no meaning. The
//! engine asks an [`IdentifierGenerator`] for a fresh IRI for every change
//! it emits.

use super::Iri;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default namespace for generated change IRIs.
pub const DEFAULT_CHANGE_NAMESPACE: &str = "https://example.org/vocab-diff/change/";

/// Source of fresh change identities.
pub trait IdentifierGenerator: Send + Sync {
    /// Return an IRI not returned before by this generator.
    fn generate_identifier(&self) -> Iri;
}

/// Random (UUID v4) identifiers under a namespace.
#[derive(Debug, Clone)]
pub struct UuidIdentifierGenerator {
    namespace: String,
}

impl UuidIdentifierGenerator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl Default for UuidIdentifierGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_NAMESPACE)
    }
}

impl IdentifierGenerator for UuidIdentifierGenerator {
    fn generate_identifier(&self) -> Iri {
        Iri::new(format!("{}{}", self.namespace, uuid::Uuid::new_v4()))
    }
}

/// Counter-based identifiers, reproducible across runs.
#[derive(Debug, Default)]
pub struct SequentialIdentifierGenerator {
    namespace: String,
    next: AtomicU64,
}

impl SequentialIdentifierGenerator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl IdentifierGenerator for SequentialIdentifierGenerator {
    fn generate_identifier(&self) -> Iri {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Iri::new(format!("{}{n}", self.namespace))
    }
}
