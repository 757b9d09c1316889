//! Error types for the editor core.

use thiserror::Error;

/// Errors surfaced by the editor core.
///
/// Both variants are programmer/embedder errors; neither leaves the shape
/// collection or the history in a partially-mutated state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A toolbar id that names no known tool or shape kind.
    #[error("unsupported shape kind: {0:?}")]
    UnsupportedShapeKind(String),

    /// An element id outside the current collection was addressed.
    #[error("invalid shape id: {0}")]
    InvalidShapeId(usize),
}
