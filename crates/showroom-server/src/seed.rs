//! Bulk import of car documents from a directory of JSON files
//!
//! Files are processed one at a time in file-name order. A file that cannot be
//! read, parsed, validated or stored is logged and counted as failed; the rest
//! of the batch still runs.

use serde::Serialize;
use showroom_common::{types::CarPayload, ShowroomError};
use std::path::{Path, PathBuf};

use crate::db::{CarStore, StoreError};

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub found: usize,
    pub inserted: usize,
    pub failed: usize,
}

#[derive(Debug, thiserror::Error)]
enum SeedFileError {
    #[error(transparent)]
    Document(#[from] ShowroomError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// List the `*.json` files of `dir`, sorted by file name
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>, ShowroomError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn seed_file(store: &dyn CarStore, path: &Path) -> Result<(String, String), SeedFileError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(ShowroomError::from)?;
    let payload: CarPayload = serde_json::from_str(&contents).map_err(ShowroomError::from)?;
    let car = store.insert_car(payload.into_draft()?).await?;
    Ok((car.details.brand, car.details.model_name))
}

/// Insert every car document found in `dir`.
///
/// Only failing to list the directory is an error; per-file problems are
/// reflected in the summary.
#[tracing::instrument(skip(store))]
pub async fn seed_directory(
    store: &dyn CarStore,
    dir: &Path,
) -> Result<SeedSummary, ShowroomError> {
    let files = json_files(dir)?;
    let mut summary = SeedSummary {
        found: files.len(),
        ..SeedSummary::default()
    };

    tracing::info!("Found {} JSON files to process", summary.found);

    for path in &files {
        match seed_file(store, path).await {
            Ok((brand, model)) => {
                summary.inserted += 1;
                tracing::info!(file = %path.display(), "Inserted: {} {}", brand, model);
            },
            Err(e) => {
                summary.failed += 1;
                tracing::error!(file = %path.display(), error = %e, "Failed to seed file");
            },
        }
    }

    tracing::info!(
        found = summary.found,
        inserted = summary.inserted,
        failed = summary.failed,
        "Seeding completed"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_json_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["b.json", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names: Vec<_> = json_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            json_files(&dir.path().join("absent")),
            Err(ShowroomError::Io(_))
        ));
    }
}
