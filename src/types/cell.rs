use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::layout::CellRect;

/// Merge role of a unit cell, fully determined by the merged region set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellRole {
    /// Not covered by any merged region.
    #[default]
    Unit,
    /// Top-left cell of a merged region; renders for the whole region.
    Master,
    /// Covered by a merged region but not its top-left; never rendered.
    Slave,
}

impl CellRole {
    /// Whether a cell with this role may hold content and be drawn.
    pub fn is_visible(self) -> bool {
        !matches!(self, CellRole::Slave)
    }
}

/// Content type tag as written in the disposition description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
        }
    }

    /// Parse a content type tag. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" => Some(ContentKind::Text),
            "image" => Some(ContentKind::Image),
            _ => None,
        }
    }
}

/// Payload of a cell. Renderers switch on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    #[default]
    None,
    Text(String),
    /// Image placeholder, optionally referencing an asset.
    Image(Option<String>),
}

impl CellContent {
    pub fn text(value: impl Into<String>) -> Self {
        CellContent::Text(value.into())
    }

    pub fn image(asset: impl Into<String>) -> Self {
        CellContent::Image(Some(asset.into()))
    }

    /// Build content from its persisted `(content_type, text)` pair.
    pub fn from_parts(kind: ContentKind, text: Option<String>) -> Self {
        match kind {
            ContentKind::Text => CellContent::Text(text.unwrap_or_default()),
            ContentKind::Image => CellContent::Image(text),
        }
    }

    /// Build content from a host-supplied type tag. An empty tag clears the
    /// cell.
    pub fn from_tag(content_type: &str, text: Option<String>) -> Result<Self> {
        if content_type.trim().is_empty() {
            return Ok(CellContent::None);
        }
        let kind = ContentKind::parse(content_type)
            .ok_or_else(|| LayoutError::UnknownContentType(content_type.to_string()))?;
        Ok(CellContent::from_parts(kind, text))
    }

    /// Persisted `(content_type, text)` pair, `None` for empty content.
    pub fn to_parts(&self) -> Option<(ContentKind, Option<String>)> {
        match self {
            CellContent::None => None,
            CellContent::Text(t) => Some((ContentKind::Text, Some(t.clone()))),
            CellContent::Image(asset) => Some((ContentKind::Image, asset.clone())),
        }
    }

    pub fn kind(&self) -> Option<ContentKind> {
        match self {
            CellContent::None => None,
            CellContent::Text(_) => Some(ContentKind::Text),
            CellContent::Image(_) => Some(ContentKind::Image),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::None)
    }

    /// Text payload, only for `Text` content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellContent::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

/// One unit grid position with its derived state.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub role: CellRole,
    pub content: CellContent,
    /// Page-space bounds (spans the whole region for a master).
    pub rect: CellRect,
}

impl Cell {
    pub fn coords(&self) -> (u32, u32) {
        (self.row, self.col)
    }

    pub fn is_master(&self) -> bool {
        self.role == CellRole::Master
    }

    pub fn is_slave(&self) -> bool {
        self.role == CellRole::Slave
    }
}
