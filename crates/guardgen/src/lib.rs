//! Zod validator and guard generation from TypeScript record types.
//!
//! `guardgen` reads exported `type Name = { ... }` aliases and emits one
//! strict Zod schema plus one guard function per type, along with lookup
//! tables for guards and immutable (`readonly`) fields.
//!
//! # Architecture
//!
//! ```text
//! Declaration source      IR                 Validators          Output
//! ──────────────────   ───────────────    ─────────────────   ──────────────
//! types.ts ──────────> TypeDeclaration ──> ObjectSchema ───┬─> Zod module
//!                      (ir.rs)    policy + translate       ├─> JSON dump
//!                                                          └─> native check
//! ```
//!
//! # Example
//!
//! ```
//! use guardgen::{GeneratedArtifact, Policy, generate_zod, parse_typescript_declarations};
//!
//! let decls = parse_typescript_declarations(
//!     "export type Course = { title: string; price: number; description?: string };",
//! )
//! .unwrap();
//! let artifact = GeneratedArtifact::build("types.ts", &decls, &Policy::default());
//!
//! let js = generate_zod(&artifact);
//! assert!(js.contains("export const CourseSchema = z.object({"));
//!
//! let schema = artifact.schema_for("course").unwrap();
//! assert!(schema.check(&serde_json::json!({ "title": "A", "category": "b", "price": 5 })).is_ok());
//! ```

pub mod artifact;
pub mod check;
pub mod config;
pub mod generate;
pub mod input;
pub mod ir;
pub mod output;
pub mod policy;
pub mod registry;
pub mod traits;
pub mod translate;
pub mod validator;

pub use artifact::{GeneratedArtifact, GuardFunction};
pub use check::{GuardResult, Violation};
pub use config::{ConfigError, GuardgenConfig};
pub use generate::{GenerateError, build_artifact, generate, is_up_to_date, render};
pub use input::{ParseError, parse_typescript_declarations};
pub use output::generate_zod;
pub use policy::{FieldPolicy, Policy};
pub use registry::{DEFAULT_BACKEND, backend_names, get_backend};
pub use traits::Backend;
pub use translate::translate;
pub use validator::{ObjectSchema, Property, Validator};
