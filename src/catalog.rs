//! Catalog file glue.
//!
//! Loads catalog forests from JSON files and writes merged forests and
//! path-map tables back out. Output is pretty-printed with non-ASCII text
//! intact; catalog owners inspect these files by hand.

use crate::error::CatalogError;
use crate::tree::paths::PathEntry;
use crate::tree::ResourceNode;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a catalog forest from a JSON file.
pub fn load_forest(path: &Path) -> Result<Vec<ResourceNode>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let forest: Vec<ResourceNode> =
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), roots = forest.len(), "catalog loaded");
    Ok(forest)
}

/// Write a forest to a JSON file.
pub fn save_forest(path: &Path, forest: &[ResourceNode]) -> Result<(), CatalogError> {
    write_json(path, forest)
}

/// Write a flattened path-map table to a JSON file.
pub fn save_path_map(path: &Path, entries: &[PathEntry]) -> Result<(), CatalogError> {
    write_json(path, entries)
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, rendered).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "catalog file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceId;
    use tempfile::TempDir;

    #[test]
    fn forest_round_trips_through_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");

        let mut root = ResourceNode::new(1, "系统管理");
        root.children.push(ResourceNode {
            parent_id: Some(ResourceId::Int(1)),
            ..ResourceNode::new(2, "Users")
        });
        let forest = vec![root];

        save_forest(&path, &forest).unwrap();
        let loaded = load_forest(&path).unwrap();

        assert_eq!(loaded, forest);
        // Non-ASCII names are written verbatim, not \u-escaped.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("系统管理"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_forest(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        let result = load_forest(&path);
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }
}
