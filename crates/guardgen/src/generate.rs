//! One generation run: read the declaration source, build the artifact, and
//! replace the target file.

use crate::artifact::GeneratedArtifact;
use crate::input::{ParseError, parse_typescript_declarations};
use crate::policy::Policy;
use crate::traits::Backend;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("declaration source {} does not exist", path.display())]
    SourceMissing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no exported record types found in {}", path.display())]
    NoExportedTypes { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Build the artifact for the declaration source at `source`.
///
/// Fails before anything is written when the source is absent or declares
/// no exported record types.
pub fn build_artifact(source: &Path, policy: &Policy) -> Result<GeneratedArtifact, GenerateError> {
    if !source.is_file() {
        return Err(GenerateError::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(source).map_err(|e| GenerateError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let decls = parse_typescript_declarations(&text)?;
    if decls.is_empty() {
        return Err(GenerateError::NoExportedTypes {
            path: source.to_path_buf(),
        });
    }
    tracing::debug!(count = decls.len(), "extracted declarations");

    let source_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    Ok(GeneratedArtifact::build(source_name, &decls, policy))
}

/// Generate the artifact text for `source`.
pub fn render(source: &Path, policy: &Policy, backend: &dyn Backend) -> Result<String, GenerateError> {
    let artifact = build_artifact(source, policy)?;
    Ok(backend.generate(&artifact))
}

/// Generate and replace `output` in full.
pub fn generate(
    source: &Path,
    output: &Path,
    policy: &Policy,
    backend: &dyn Backend,
) -> Result<(), GenerateError> {
    let text = render(source, policy, backend)?;
    write_atomic(output, &text)?;
    tracing::info!(output = %output.display(), bytes = text.len(), "wrote artifact");
    Ok(())
}

/// Whether `output` already holds exactly what a run would write.
pub fn is_up_to_date(
    source: &Path,
    output: &Path,
    policy: &Policy,
    backend: &dyn Backend,
) -> Result<bool, GenerateError> {
    let text = render(source, policy, backend)?;
    match std::fs::read_to_string(output) {
        Ok(current) => Ok(current == text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GenerateError::Read {
            path: output.to_path_buf(),
            source: e,
        }),
    }
}

/// Write through a temporary file in the target directory, then rename.
fn write_atomic(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let write_err = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
