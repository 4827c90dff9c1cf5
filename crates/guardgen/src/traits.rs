//! Traits for artifact serialization backends.

use crate::artifact::GeneratedArtifact;

/// An artifact serialization backend.
///
/// Backends turn a [`GeneratedArtifact`] into the text written to disk.
pub trait Backend: Send + Sync {
    /// Unique backend identifier (e.g., "zod", "json").
    fn name(&self) -> &'static str;

    /// File extension for generated output (e.g., "js").
    fn extension(&self) -> &'static str;

    /// Serialize the artifact.
    fn generate(&self, artifact: &GeneratedArtifact) -> String;
}
