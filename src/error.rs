//! Error taxonomy for catalog reconciliation.
//!
//! Glue failures around file and configuration handling surface as
//! [`CatalogError`]. The engine passes themselves never abort on a bad
//! record: id-less records and unresolved parents travel as diagnostic
//! values on pass outcomes, and the verifier's findings are
//! [`IntegrityViolation`] values that are reported, never raised.

use crate::types::ResourceId;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Failures in the file and configuration glue around the engine.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Record skipped by the flattener because it carries no identifier.
///
/// Such a record cannot participate in rebuilding; its subtree is still
/// traversed, so identified descendants are not lost with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingIdentifier {
    /// Display name of the skipped record, for diagnostics
    pub name: String,
    /// Parent the record declared, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
}

/// An invariant breach found by the integrity verifier.
///
/// Produced only by the audit pass; the merger never raises these.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum IntegrityViolation {
    #[error("merged forest holds {actual} nodes where the catalog union declares {expected}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("identifier {id} from the source catalogs is missing from the merged forest")]
    MissingId { id: ResourceId },

    #[error("identifier {id} in the merged forest appears in neither source catalog")]
    UnknownId { id: ResourceId },

    #[error("children of {name:?} at depth {depth} are not ordered by sort key")]
    SortOrder { name: String, depth: usize },

    #[error("path entry {path:?} reports depth {actual}, expected {expected}")]
    DepthMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },
}
