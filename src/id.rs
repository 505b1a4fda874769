//! Identifier generation capability.

use uuid::Uuid;

/// Produces globally-unique opaque identifiers for new records.
///
/// Injected into the repository so tests can pin ids deterministically.
pub trait IdGenerator: Send + Sync {
    /// Return a fresh identifier, never seen before.
    fn generate(&self) -> String;
}

/// Default generator backed by random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
