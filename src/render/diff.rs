use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Scene, SceneElement, SceneKey};

/// One reconciliation step for a retained rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// New element painted at `index` in the target paint order.
    Insert {
        index: usize,
        key: SceneKey,
        element: SceneElement,
    },
    Update {
        key: SceneKey,
        element: SceneElement,
    },
    Remove {
        key: SceneKey,
    },
}

impl PatchOp {
    #[must_use]
    pub fn key(&self) -> &SceneKey {
        match self {
            Self::Insert { key, .. } | Self::Update { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// Minimal change list turning the previous scene into the next one.
///
/// Removals come first, then inserts and updates in target paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePatch {
    pub viewport: Viewport,
    pub ops: Vec<PatchOp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatchSummary {
    pub inserted: usize,
    pub updated: usize,
    pub removed: usize,
}

impl PatchSummary {
    #[must_use]
    pub fn total(self) -> usize {
        self.inserted + self.updated + self.removed
    }
}

impl ScenePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> PatchSummary {
        self.ops
            .iter()
            .fold(PatchSummary::default(), |mut summary, op| {
                match op {
                    PatchOp::Insert { .. } => summary.inserted += 1,
                    PatchOp::Update { .. } => summary.updated += 1,
                    PatchOp::Remove { .. } => summary.removed += 1,
                }
                summary
            })
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.ensure_valid()?;
        for op in &self.ops {
            match op {
                PatchOp::Insert { element, .. } | PatchOp::Update { element, .. } => {
                    element.validate()?;
                }
                PatchOp::Remove { .. } => {}
            }
        }
        Ok(())
    }
}

/// Diffs `next` against `previous`.
///
/// Unchanged elements produce no op. With no previous scene, or when the
/// viewport changed, every previous element is removed and every next
/// element inserted.
#[must_use]
pub fn diff_scenes(previous: Option<&Scene>, next: &Scene) -> ScenePatch {
    let mut ops = Vec::new();

    let previous = match previous {
        Some(prev) if prev.viewport == next.viewport => Some(prev),
        Some(prev) => {
            ops.extend(prev.iter().map(|(key, _)| PatchOp::Remove { key: key.clone() }));
            None
        }
        None => None,
    };

    if let Some(prev) = previous {
        ops.extend(
            prev.iter()
                .filter(|(key, _)| next.get(key).is_none())
                .map(|(key, _)| PatchOp::Remove { key: key.clone() }),
        );
    }

    for (index, (key, element)) in next.iter().enumerate() {
        match previous.and_then(|prev| prev.get(key)) {
            Some(old) if old == element => {}
            Some(_) => ops.push(PatchOp::Update {
                key: key.clone(),
                element: element.clone(),
            }),
            None => ops.push(PatchOp::Insert {
                index,
                key: key.clone(),
                element: element.clone(),
            }),
        }
    }

    ScenePatch {
        viewport: next.viewport,
        ops,
    }
}

/// Mirror of the elements currently on a surface, maintained from patches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetainedScene {
    viewport: Option<Viewport>,
    elements: IndexMap<SceneKey, SceneElement>,
}

impl RetainedScene {
    /// Applies `patch`, rejecting inserts of present keys and updates or
    /// removals of absent keys.
    pub fn apply(&mut self, patch: &ScenePatch) -> ChartResult<()> {
        for op in &patch.ops {
            match op {
                PatchOp::Insert {
                    index,
                    key,
                    element,
                } => {
                    if self.elements.contains_key(key) {
                        return Err(ChartError::InvalidData(format!(
                            "patch inserts existing element `{key}`"
                        )));
                    }
                    let index = (*index).min(self.elements.len());
                    self.elements
                        .shift_insert(index, key.clone(), element.clone());
                }
                PatchOp::Update { key, element } => match self.elements.get_mut(key) {
                    Some(slot) => *slot = element.clone(),
                    None => {
                        return Err(ChartError::InvalidData(format!(
                            "patch updates missing element `{key}`"
                        )));
                    }
                },
                PatchOp::Remove { key } => {
                    if self.elements.shift_remove(key).is_none() {
                        return Err(ChartError::InvalidData(format!(
                            "patch removes missing element `{key}`"
                        )));
                    }
                }
            }
        }
        self.viewport = Some(patch.viewport);
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
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

    /// `true` when the mirror holds exactly `scene`'s elements in its order.
    #[must_use]
    pub fn matches(&self, scene: &Scene) -> bool {
        self.viewport == Some(scene.viewport)
            && self.elements.len() == scene.len()
            && self.elements.iter().zip(scene.iter()).all(|(a, b)| a == b)
    }
}
