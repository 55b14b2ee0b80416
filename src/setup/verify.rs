//! Project structure verification

use crate::core::FileManifest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result of a structure verification pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// How many files and directories the manifest declared
    pub checked: usize,

    /// Declared files and directories absent from the project root
    pub missing: Vec<PathBuf>,
}

impl VerificationReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Checks that every declared file and directory exists under the
/// project root
///
/// Pure existence checks - file contents are never inspected, and nothing
/// is created or modified. Declared directories (the application's runtime
/// upload and data stores) must be directories, not plain files. Policy on
/// a non-empty missing set belongs to the caller: the full setup pipeline
/// treats it as a warning, the launcher treats its own prerequisites as
/// fatal.
pub struct StructureVerifier;

impl StructureVerifier {
    pub fn verify(root: &Path, manifest: &FileManifest) -> VerificationReport {
        let mut missing: Vec<PathBuf> = manifest
            .files
            .iter()
            .filter(|rel| !root.join(rel).is_file())
            .cloned()
            .collect();

        missing.extend(
            manifest
                .directories
                .iter()
                .filter(|rel| !root.join(rel).is_dir())
                .cloned(),
        );

        VerificationReport {
            checked: manifest.files.len() + manifest.directories.len(),
            missing,
        }
    }
}
