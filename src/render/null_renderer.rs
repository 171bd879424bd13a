use crate::error::ChartResult;
use crate::render::{PatchSummary, RetainedScene, Renderer, ScenePatch};

/// Headless renderer used by tests and non-visual embedding.
///
/// It still validates every patch and mirrors the retained scene so tests
/// can assert on what a real surface would show.
#[derive(Debug, Default)]
pub struct NullRenderer {
    retained: RetainedScene,
    pub patches_applied: usize,
    pub last_summary: PatchSummary,
}

impl NullRenderer {
    #[must_use]
    pub fn retained(&self) -> &RetainedScene {
        &self.retained
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, patch: &ScenePatch) -> ChartResult<()> {
        patch.validate()?;
        self.retained.apply(patch)?;
        self.patches_applied += 1;
        self.last_summary = patch.summary();
        Ok(())
    }
}
