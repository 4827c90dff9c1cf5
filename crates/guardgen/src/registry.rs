//! Registry of built-in backends.

use crate::output::{json::JSON_BACKEND, zod::ZOD_BACKEND};
use crate::traits::Backend;

static BACKENDS: &[&dyn Backend] = &[&ZOD_BACKEND, &JSON_BACKEND];

/// Backend used when none is requested.
pub const DEFAULT_BACKEND: &str = "zod";

/// Get a backend by name.
pub fn get_backend(name: &str) -> Option<&'static dyn Backend> {
    BACKENDS.iter().find(|b| b.name() == name).copied()
}

/// List all backend names.
pub fn backend_names() -> Vec<&'static str> {
    BACKENDS.iter().map(|b| b.name()).collect()
}
