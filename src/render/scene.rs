use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{ArcPrimitive, CirclePrimitive, LinePrimitive, PolylinePrimitive, TextPrimitive};

/// Stable identity of a scene element across frames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SceneKey {
    /// Histogram dot, keyed by record key.
    Dot(String),
    AxisLine,
    AxisTick(usize),
    AxisTickLabel(usize),
    AxisTitle,
    RowTitle,
    /// Category color legend entry, keyed by category field.
    Legend(String),
    PieTitle,
    /// Donut slice, keyed by category field.
    Slice(String),
    SliceLabel(String),
    SliceLeader(String),
    TotalTitle,
    TotalValue,
    FavoriteTitle,
    FavoriteValue,
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dot(id) => write!(f, "dot:{id}"),
            Self::AxisLine => f.write_str("axis-line"),
            Self::AxisTick(i) => write!(f, "axis-tick:{i}"),
            Self::AxisTickLabel(i) => write!(f, "axis-tick-label:{i}"),
            Self::AxisTitle => f.write_str("axis-title"),
            Self::RowTitle => f.write_str("row-title"),
            Self::Legend(id) => write!(f, "legend:{id}"),
            Self::PieTitle => f.write_str("pie-title"),
            Self::Slice(id) => write!(f, "slice:{id}"),
            Self::SliceLabel(id) => write!(f, "slice-label:{id}"),
            Self::SliceLeader(id) => write!(f, "slice-leader:{id}"),
            Self::TotalTitle => f.write_str("total-title"),
            Self::TotalValue => f.write_str("total-value"),
            Self::FavoriteTitle => f.write_str("favorite-title"),
            Self::FavoriteValue => f.write_str("favorite-value"),
        }
    }
}

/// One drawable element of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneElement {
    Circle(CirclePrimitive),
    Arc(ArcPrimitive),
    Polyline(PolylinePrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

impl SceneElement {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Circle(circle) => circle.validate(),
            Self::Arc(arc) => arc.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Line(line) => line.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Full desired visual state for one frame.
///
/// Elements keep insertion order, which is also the paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    elements: IndexMap<SceneKey, SceneElement>,
}

impl Scene {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: IndexMap::new(),
        }
    }

    /// Adds or replaces an element; a replaced element keeps its paint slot.
    pub fn insert(&mut self, key: SceneKey, element: SceneElement) {
        self.elements.insert(key, element);
    }

    #[must_use]
    pub fn with(mut self, key: SceneKey, element: SceneElement) -> Self {
        self.insert(key, element);
        self
    }

    #[must_use]
    pub fn get(&self, key: &SceneKey) -> Option<&SceneElement> {
        self.elements.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SceneKey, &SceneElement)> {
        self.elements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.ensure_valid()?;
        for element in self.elements.values() {
            element.validate()?;
        }
        Ok(())
    }
}
