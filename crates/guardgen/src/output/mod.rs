//! Output backends.
//!
//! Each backend serializes a [`GeneratedArtifact`](crate::artifact::GeneratedArtifact)
//! and implements the [`Backend`](crate::traits::Backend) trait.

pub mod json;
pub mod zod;

pub use json::JsonBackend;
pub use zod::{ZodBackend, generate_zod};
