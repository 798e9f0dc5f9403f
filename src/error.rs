//! Structured error types for dispogrid.
//!
//! Every structural edit is all-or-nothing: an `Err` from the engine always
//! means the grid was left exactly as it was before the call.

use std::fmt;

/// Grid axis, used to report which dimension an edit was refused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// All errors that can occur while editing, loading or rendering a disposition.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Merge requested on a selection that is not a full, gap-free rectangle.
    #[error("selection must form a filled rectangle of unit cells")]
    InvalidSelectionShape,

    /// Candidate merge region would overlap a region that was not selected.
    #[error("merge would overlap an existing merged region that is not part of the selection")]
    OverlappingMerge,

    /// Nothing in the selection can take part in the requested operation.
    #[error("no eligible cells: {0}")]
    NoEligibleCells(String),

    /// The last remaining row or column cannot be deleted.
    #[error("cannot delete the last remaining {0}")]
    StructuralFloor(Axis),

    /// Content write aimed at a cell covered by a merged region.
    #[error("cell ({row}, {col}) is covered by a merged region and cannot hold content")]
    SlaveCellWrite { row: u32, col: u32 },

    /// A covered cell was found in a merge selection.
    #[error("selection contains covered cell ({row}, {col})")]
    SlaveCellSelected { row: u32, col: u32 },

    /// Coordinate outside the current grid.
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: u32, col: u32 },

    /// Content type tag other than `text` or `image`.
    #[error("unknown content type {0:?}")]
    UnknownContentType(String),

    /// JSON (de)serialization of a disposition.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),
}

impl LayoutError {
    /// True for rejections that are informational rather than warnings
    /// (nothing to do, or a structural floor was reached).
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::NoEligibleCells(_) | Self::StructuralFloor(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(target_arch = "wasm32")]
impl From<LayoutError> for wasm_bindgen::JsValue {
    fn from(e: LayoutError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_are_distinguished_from_warnings() {
        assert!(LayoutError::NoEligibleCells("empty".into()).is_notice());
        assert!(LayoutError::StructuralFloor(Axis::Row).is_notice());
        assert!(!LayoutError::InvalidSelectionShape.is_notice());
        assert!(!LayoutError::OverlappingMerge.is_notice());
        assert!(!LayoutError::SlaveCellWrite { row: 0, col: 1 }.is_notice());
    }

    #[test]
    fn floor_message_names_axis() {
        let msg = LayoutError::StructuralFloor(Axis::Column).to_string();
        assert_eq!(msg, "cannot delete the last remaining column");
    }
}
