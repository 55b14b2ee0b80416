//! Dependency and required-file manifests

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single declared dependency from the requirements file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Package name
    pub name: String,

    /// Version constraint as written (e.g. `==2.3.0`, `>=1.0`), if any
    pub constraint: Option<String>,
}

/// Operators recognized in constraint suffixes, longest first
const CONSTRAINT_OPS: [&str; 7] = ["===", "==", ">=", "<=", "!=", "~=", ">"];

impl ManifestEntry {
    /// Parse a single requirements line
    ///
    /// Returns None for blank lines and `#` comments.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        for op in CONSTRAINT_OPS {
            if let Some(idx) = line.find(op) {
                let name = line[..idx].trim().to_string();
                let constraint = line[idx..].trim().to_string();
                return Some(Self {
                    name,
                    constraint: Some(constraint),
                });
            }
        }
        // Bare `<` without `<=` is rare; handle it after the two-char ops
        if let Some(idx) = line.find('<') {
            return Some(Self {
                name: line[..idx].trim().to_string(),
                constraint: Some(line[idx..].trim().to_string()),
            });
        }

        Some(Self {
            name: line.to_string(),
            constraint: None,
        })
    }
}

/// Parse a full requirements file into entries
///
/// The collection carries no ordering guarantee; callers only use counts
/// and names for reporting. The install step passes the file to pip
/// verbatim, so parsing never alters what gets installed.
pub fn parse_requirements(content: &str) -> Vec<ManifestEntry> {
    content.lines().filter_map(ManifestEntry::parse).collect()
}

/// Declarative list of files the external application needs
///
/// Loadable from a YAML manifest so the verification contract can evolve
/// without touching orchestration code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileManifest {
    /// Paths relative to the project root
    pub files: Vec<PathBuf>,

    /// Runtime directories the application writes into (uploads, data
    /// stores); checked as directories, not files
    #[serde(default)]
    pub directories: Vec<PathBuf>,
}

impl FileManifest {
    /// Load a file manifest from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a file manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: FileManifest = serde_yaml::from_str(yaml)?;
        if manifest.files.is_empty() && manifest.directories.is_empty() {
            anyhow::bail!("Required-files manifest declares no files or directories");
        }
        Ok(manifest)
    }

    /// The built-in layout contract for the Plumbing Estimator application
    pub fn default_layout() -> Self {
        let files = [
            // Package initializers
            "database/__init__.py",
            "routes/__init__.py",
            "services/__init__.py",
            "middleware/__init__.py",
            // Core application modules
            "app.py",
            "config.py",
            // Database modules
            "database/db.py",
            "database/models.py",
            "database/materials_db.py",
            // Route modules
            "routes/auth.py",
            "routes/admin.py",
            "routes/projects.py",
            "routes/drawings.py",
            "routes/materials.py",
            "routes/scales.py",
            "routes/takeoff.py",
            "routes/wbs.py",
            // Service modules
            "services/detector.py",
            "services/pdf_processor.py",
            // Middleware
            "middleware/auth.py",
            // HTML templates
            "templates/login.html",
            "templates/company_select.html",
            "templates/main.html",
            "templates/admin.html",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        // The application writes uploaded drawings and its database into
        // these at runtime
        let directories = ["data", "uploads"].iter().map(PathBuf::from).collect();

        Self { files, directories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_with_constraint() {
        let entry = ManifestEntry::parse("flask==2.3.0").unwrap();
        assert_eq!(entry.name, "flask");
        assert_eq!(entry.constraint.as_deref(), Some("==2.3.0"));
    }

    #[test]
    fn test_parse_entry_without_constraint() {
        let entry = ManifestEntry::parse("flask-cors").unwrap();
        assert_eq!(entry.name, "flask-cors");
        assert!(entry.constraint.is_none());
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        assert!(ManifestEntry::parse("# web framework").is_none());
        assert!(ManifestEntry::parse("   ").is_none());
    }

    #[test]
    fn test_parse_requirements_counts_entries() {
        let content = "\
# Plumbing Estimator dependencies
flask==2.3.0
flask-cors>=4.0

PyMuPDF~=1.23
werkzeug
";
        let entries = parse_requirements(content);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].constraint.as_deref(), Some(">=4.0"));
        assert_eq!(entries[2].constraint.as_deref(), Some("~=1.23"));
    }

    #[test]
    fn test_file_manifest_from_yaml() {
        let yaml = "\
files:
  - app.py
  - routes/auth.py
";
        let manifest = FileManifest::from_yaml(yaml).unwrap();
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[0], PathBuf::from("app.py"));
    }

    #[test]
    fn test_file_manifest_rejects_empty_list() {
        assert!(FileManifest::from_yaml("files: []").is_err());
    }

    #[test]
    fn test_file_manifest_directories_default_to_empty() {
        let manifest = FileManifest::from_yaml("files:\n  - app.py\n").unwrap();
        assert!(manifest.directories.is_empty());
    }

    #[test]
    fn test_file_manifest_from_yaml_with_directories() {
        let yaml = "\
files:
  - app.py
directories:
  - uploads
";
        let manifest = FileManifest::from_yaml(yaml).unwrap();
        assert_eq!(manifest.directories, vec![PathBuf::from("uploads")]);
    }

    #[test]
    fn test_default_layout_covers_packages_and_templates() {
        let manifest = FileManifest::default_layout();
        assert!(manifest.files.contains(&PathBuf::from("app.py")));
        assert!(manifest
            .files
            .contains(&PathBuf::from("database/__init__.py")));
        assert!(manifest
            .files
            .contains(&PathBuf::from("templates/login.html")));
    }

    #[test]
    fn test_default_layout_declares_runtime_directories() {
        let manifest = FileManifest::default_layout();
        assert!(manifest.directories.contains(&PathBuf::from("data")));
        assert!(manifest.directories.contains(&PathBuf::from("uploads")));
    }
}
