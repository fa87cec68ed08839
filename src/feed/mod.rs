//! Recipe feed snapshots.
//!
//! The live recipe table belongs to the host. For tooling and tests the
//! same feed can be dumped to disk as YAML or JSON, one file per data source,
//! and read back here in a fixed order.

use crate::RecipeRecord;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

mod model;

pub use model::FeedPayload;
use model::FeedRow;

/// Errors that can occur when reading feed snapshots.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to read feed file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON feed {path}: {source}")]
    Json {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML feed {path}: {source}")]
    Yaml {
        path: Utf8PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Unsupported feed format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Path contains invalid UTF-8: {0}")]
    InvalidPath(String),
}

/// Loads one feed snapshot, choosing the format from the file extension.
///
/// Accepted extensions are `json`, `yaml` and `yml`.
///
/// # Examples
///
/// ```no_run
/// use recipe_groups::load_feed;
/// use camino::Utf8Path;
///
/// let records = load_feed(Utf8Path::new("dumps/Skyrim.esm.yaml"))?;
/// println!("{} recipes", records.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_feed(path: &Utf8Path) -> Result<Vec<RecipeRecord<FeedPayload>>, FeedError> {
    let rows: Vec<FeedRow> = match path.extension() {
        Some("json") => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|source| FeedError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        Some("yaml") | Some("yml") => {
            let content = std::fs::read_to_string(path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_yaml::from_str(&content).map_err(|source| FeedError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        }
        _ => return Err(FeedError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!(path = %path, records = rows.len(), "Loaded recipe feed");
    Ok(rows.into_iter().map(FeedRow::into_record).collect())
}

/// Loads every snapshot in `dir` and concatenates them.
///
/// Files are read in file-name order, so the combined feed, and every index
/// built from it, is the same on every run. Subdirectories are not searched.
pub fn load_feed_dir(dir: &Utf8Path) -> Result<Vec<RecipeRecord<FeedPayload>>, FeedError> {
    let mut paths = Vec::new();
    for ext in ["json", "yaml", "yml"] {
        let pattern = dir.join(format!("*.{ext}"));
        for entry in glob::glob(pattern.as_str())? {
            let path = Utf8PathBuf::from_path_buf(entry?)
                .map_err(|p| FeedError::InvalidPath(p.display().to_string()))?;
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut records = Vec::new();
    for path in &paths {
        records.extend(load_feed(path)?);
    }

    tracing::info!(dir = %dir, files = paths.len(), records = records.len(), "Loaded recipe feed directory");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecipeId, ResultId};
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn temp_dir_path(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap()
    }

    fn write_feed(dir: &Utf8Path, name: &str, content: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_yaml_feed() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp_dir);
        let path = write_feed(
            &dir,
            "base.yaml",
            indoc! {"
                - recipe_id: 1
                  result_id: 80254
                  editor_id: RecipeWeaponIronDagger
                  workbench: CraftingSmithingForge
                - recipe_id: 2
                  result_id: 0
                - recipe_id: 3
            "},
        );

        let records = load_feed(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].recipe_id(), RecipeId(1));
        assert_eq!(records[0].result_id(), ResultId::from_raw(80254));
        assert_eq!(
            records[0].raw_payload().editor_id.as_deref(),
            Some("RecipeWeaponIronDagger")
        );
        assert!(records[1].result_id().is_none());
        assert!(records[2].result_id().is_none());
        assert_eq!(records[2].raw_payload(), &FeedPayload::default());
    }

    #[test]
    fn test_load_json_feed() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp_dir);
        let path = write_feed(
            &dir,
            "base.json",
            r#"[{"recipe_id": 7, "result_id": 12}, {"recipe_id": 8, "result_id": null}]"#,
        );

        let records = load_feed(&path).unwrap();
        assert_eq!(records[0].result_id(), ResultId::from_raw(12));
        assert!(records[1].result_id().is_none());
    }

    #[test]
    fn test_empty_yaml_feed() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp_dir);
        let path = write_feed(&dir, "empty.yml", "");
        assert!(load_feed(&path).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp_dir);
        let path = write_feed(&dir, "base.toml", "");
        assert!(matches!(
            load_feed(&path),
            Err(FeedError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_malformed_feed_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp_dir);
        let path = write_feed(&dir, "broken.json", "[{\"recipe_id\": }]");

        let err = load_feed(&path).unwrap_err();
        assert!(matches!(err, FeedError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file() {
        let result = load_feed(Utf8Path::new("/nonexistent/feed.yaml"));
        assert!(matches!(result, Err(FeedError::IoError(_))));
    }

    #[test]
    fn test_load_dir_in_file_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp_dir);
        write_feed(&dir, "20_distributor.json", r#"[{"recipe_id": 3, "result_id": 1}]"#);
        write_feed(
            &dir,
            "10_base.yaml",
            indoc! {"
                - recipe_id: 1
                  result_id: 1
                - recipe_id: 2
                  result_id: 2
            "},
        );
        write_feed(&dir, "notes.txt", "ignored");

        let nested = dir.join("nested");
        fs::create_dir_all(&nested).unwrap();
        write_feed(&nested, "00_hidden.yaml", "- recipe_id: 99");

        let records = load_feed_dir(&dir).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.recipe_id().0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp_dir);
        assert!(load_feed_dir(&dir).unwrap().is_empty());
    }
}
