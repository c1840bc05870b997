//! File-level orchestration of a generation run.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::codegen;
use crate::idl::SchemaError;

/// Errors raised by [`generate_types`].
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to read IDL file {}: {source}", .path.display())]
    ReadIdl {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read an IDL document and write its generated binding files.
///
/// The output directory is created when missing and existing files are
/// overwritten in place. Every file is generated before any is written, so a
/// schema error leaves the directory untouched.
pub fn generate_types(idl_path: &Path, out_dir: &Path) -> Result<(), GenerateError> {
    let idl_json = fs::read_to_string(idl_path).map_err(|source| GenerateError::ReadIdl {
        path: idl_path.to_path_buf(),
        source,
    })?;
    debug!(
        idl_path = %idl_path.display(),
        idl_len = idl_json.len(),
        "Read IDL document."
    );

    let files = codegen::generate(&idl_json)?;

    fs::create_dir_all(out_dir).map_err(|source| GenerateError::CreateOutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for file in &files {
        let path = out_dir.join(&file.name);
        fs::write(&path, &file.contents).map_err(|source| GenerateError::WriteFile {
            path: path.clone(),
            source,
        })?;
        debug!(
            path = %path.display(),
            len = file.contents.len(),
            "Wrote generated file."
        );
    }

    Ok(())
}
