//! Layout engine for computing cell positions on the page.
//!
//! This module handles:
//! - Pre-computing cell positions from column widths and the row height
//! - Binary search for cell lookup at page coordinates
//! - Merge range handling (cell spans, grid-line suppression)
//! - Text measurement for adaptive column widths

mod page_layout;
mod text;

pub use page_layout::{CellRect, MergeInfo, PageLayout, Rect};
pub use text::{CharWidthMeasure, TextMeasure};
