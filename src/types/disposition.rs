//! Persisted description of a disposition (grid shape, merges, contents).
//!
//! ```json
//! {
//!   "num_rows": 2, "num_cols": 2,
//!   "column_widths": [100.0, 140.0], "row_height": 50.0, "corner_radius": 10.0,
//!   "merged_regions": [{"row": 0, "col": 0, "rowspan": 1, "colspan": 2}],
//!   "cell_contents": {"(0,0)": ["text", "SERIAL"], "(1,1)": ["image", null]}
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CellContent, ContentKind, MergedRegion};
use crate::config::{EditorConfig, DEFAULT_COLUMN_WIDTH, DEFAULT_CORNER_RADIUS, DEFAULT_ROW_HEIGHT};
use crate::error::Result;

/// Largest row or column count accepted from a persisted description.
pub const MAX_DIMENSION: u32 = 1024;

/// Persisted `[content_type, text|null]` pair.
pub type ContentEntry = (String, Option<String>);

/// Load/save shape of a disposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disposition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "one")]
    pub num_rows: u32,
    #[serde(default = "one")]
    pub num_cols: u32,
    #[serde(default)]
    pub column_widths: Vec<f32>,
    #[serde(default = "default_row_height", alias = "cell_height")]
    pub row_height: f32,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    #[serde(default, alias = "merged_cells")]
    pub merged_regions: Vec<MergedRegion>,
    #[serde(default)]
    pub cell_contents: BTreeMap<String, ContentEntry>,
    /// Older descriptions stored one uniform width instead of `column_widths`.
    #[serde(default, skip_serializing)]
    pub cell_width: Option<f32>,
    /// Free-floating zones written by older editors. Read only so they can
    /// be reported; they are never saved.
    #[serde(default, skip_serializing)]
    pub zones: Vec<serde_json::Value>,
}

fn one() -> u32 {
    1
}

fn default_row_height() -> f32 {
    DEFAULT_ROW_HEIGHT
}

fn default_corner_radius() -> f32 {
    DEFAULT_CORNER_RADIUS
}

impl Default for Disposition {
    fn default() -> Self {
        Self {
            name: None,
            num_rows: 1,
            num_cols: 1,
            column_widths: vec![DEFAULT_COLUMN_WIDTH],
            row_height: DEFAULT_ROW_HEIGHT,
            corner_radius: DEFAULT_CORNER_RADIUS,
            merged_regions: Vec::new(),
            cell_contents: BTreeMap::new(),
            cell_width: None,
            zones: Vec::new(),
        }
    }
}

/// Format a content key, `"(row,col)"`.
pub fn cell_key(row: u32, col: u32) -> String {
    format!("({row},{col})")
}

/// Parse a content key. Accepts `"(1,2)"`, `"(1, 2)"` and `"1,2"`.
pub fn parse_cell_key(key: &str) -> Option<(u32, u32)> {
    let inner = key.trim();
    let inner = inner
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(inner);
    let (row, col) = inner.split_once(',')?;
    Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}

impl Disposition {
    /// Strict parse: malformed JSON is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse, falling back to the default 1x1 disposition on any error.
    pub fn from_json_lenient(json: &str) -> Self {
        match serde_json::from_str::<Option<Self>>(json) {
            Ok(Some(disposition)) => disposition,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "malformed disposition, starting from an empty grid");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Content entries with parsed coordinates and content. Unparseable keys
    /// and unknown content types are skipped.
    pub fn contents(&self) -> Vec<((u32, u32), CellContent)> {
        self.cell_contents
            .iter()
            .filter_map(|(key, (kind, text))| {
                let coords = parse_cell_key(key)?;
                let kind = ContentKind::parse(kind)?;
                Some((coords, CellContent::from_parts(kind, text.clone())))
            })
            .collect()
    }

    /// Repair anything that would break the grid invariants.
    ///
    /// Counts are clamped to `1..=MAX_DIMENSION` and `column_widths` gets
    /// exactly `num_cols` positive entries. Regions that do not fit, fuse
    /// nothing, or overlap an earlier region are dropped. Contents that cannot
    /// be placed (bad key, unknown type, outside the grid, on a covered cell)
    /// are dropped too.
    #[must_use]
    pub fn sanitized(mut self, config: &EditorConfig) -> Self {
        if self.num_rows > MAX_DIMENSION || self.num_cols > MAX_DIMENSION {
            warn!(
                num_rows = self.num_rows,
                num_cols = self.num_cols,
                max = MAX_DIMENSION,
                "grid too large, clamping"
            );
        }
        self.num_rows = self.num_rows.clamp(1, MAX_DIMENSION);
        self.num_cols = self.num_cols.clamp(1, MAX_DIMENSION);

        if self.column_widths.is_empty() {
            if let Some(width) = self.cell_width.filter(|w| w.is_finite() && *w > 0.0) {
                self.column_widths = vec![width; self.num_cols as usize];
            }
        }
        self.cell_width = None;
        if !self.zones.is_empty() {
            warn!(count = self.zones.len(), "dropping free-floating zones");
            self.zones.clear();
        }
        if self.column_widths.len() != self.num_cols as usize {
            warn!(
                widths = self.column_widths.len(),
                num_cols = self.num_cols,
                "column width count does not match column count"
            );
            self.column_widths
                .resize(self.num_cols as usize, config.default_column_width);
        }
        for width in &mut self.column_widths {
            if !width.is_finite() || *width <= 0.0 {
                *width = config.default_column_width;
            }
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            self.row_height = config.row_height;
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            self.corner_radius = config.corner_radius;
        }

        let mut regions: Vec<MergedRegion> = Vec::with_capacity(self.merged_regions.len());
        for region in self.merged_regions.drain(..) {
            if !region.fits(self.num_rows, self.num_cols) {
                warn!(?region, "dropping merged region outside the grid");
            } else if region.is_unit() {
                warn!(?region, "dropping merged region covering a single cell");
            } else if regions.iter().any(|r| r.overlaps(&region)) {
                warn!(?region, "dropping overlapping merged region");
            } else {
                regions.push(region);
            }
        }

        let mut contents = BTreeMap::new();
        for (key, (kind, text)) in std::mem::take(&mut self.cell_contents) {
            let Some((row, col)) = parse_cell_key(&key) else {
                warn!(key = %key, "dropping content with unreadable cell key");
                continue;
            };
            if ContentKind::parse(&kind).is_none() {
                warn!(key = %key, kind = %kind, "dropping content of unknown type");
                continue;
            }
            if row >= self.num_rows || col >= self.num_cols {
                warn!(row, col, "dropping content outside the grid");
                continue;
            }
            let covered = regions
                .iter()
                .any(|r| r.contains(row, col) && !r.is_origin(row, col));
            if covered {
                warn!(row, col, "dropping content on a covered cell");
                continue;
            }
            contents.insert(cell_key(row, col), (kind, text));
        }

        self.merged_regions = regions;
        self.cell_contents = contents;
        self
    }
}
