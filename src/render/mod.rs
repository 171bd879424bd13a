mod diff;
mod null_renderer;
mod primitives;
mod scene;
mod svg_renderer;

pub use diff::{PatchOp, PatchSummary, RetainedScene, ScenePatch, diff_scenes};
pub use null_renderer::NullRenderer;
pub use primitives::{
    ArcPrimitive, CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, TextHAlign,
    TextPrimitive,
};
pub use scene::{Scene, SceneElement, SceneKey};
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a `ScenePatch` describing how the previously rendered
/// scene changes, so drawing code stays isolated from dashboard state and
/// selection logic.
pub trait Renderer {
    fn render(&mut self, patch: &ScenePatch) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
