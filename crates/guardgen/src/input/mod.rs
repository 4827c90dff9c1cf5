//! Declaration source readers.
//!
//! Each reader turns source text into [`TypeDeclaration`](crate::ir::TypeDeclaration)s.

pub mod typescript;

pub use typescript::parse_typescript_declarations;

/// Error raised when the declaration source cannot be read into IR.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("parser initialization failed: {0}")]
    Init(String),

    #[error("failed to parse {0} source")]
    Parse(&'static str),
}
