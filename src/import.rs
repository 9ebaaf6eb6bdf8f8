//! Quick build template import
//!
//! Walks a directory for `*.json` template files and stores every valid
//! template in the journal. One bad file never aborts the import.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::db;
use crate::quick_builds::{self, QuickBuild};

/// Find all template files under `dir`, sorted by path
pub fn find_template_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();

    files.sort();
    Ok(files)
}

fn read_template_file(path: &Path) -> Result<Vec<QuickBuild>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let builds = quick_builds::parse_templates(&content, &path.display().to_string())?;
    Ok(builds)
}

/// Import every template under `dir` into the journal
pub fn import_to_database(conn: &Connection, dir: &Path) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    let files = find_template_files(dir)?;
    info!(dir = %dir.display(), files = files.len(), "scanning for quick build templates");

    for path in &files {
        stats.files += 1;
        match read_template_file(path) {
            Ok(builds) => {
                for build in &builds {
                    db::upsert_quick_build(conn, build)?;
                    info!(id = %build.id, file = %path.display(), "imported quick build");
                }
                stats.templates += builds.len();
            }
            Err(e) => {
                warn!(file = %path.display(), error = %format!("{e:#}"), "skipping template file");
                stats.errors += 1;
            }
        }
    }

    Ok(stats)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub files: usize,
    pub templates: usize,
    pub errors: usize,
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} quick builds from {} files. Errors: {}",
            self.templates, self.files, self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_an_error() {
        let err = find_template_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn stats_summary() {
        let stats = ImportStats {
            files: 3,
            templates: 5,
            errors: 1,
        };
        assert_eq!(
            stats.to_string(),
            "Imported 5 quick builds from 3 files. Errors: 1"
        );
    }
}
