use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::interaction::SelectionSource;
use crate::render::PatchSummary;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub records_len: usize,
    pub buckets_len: usize,
    pub selected_key: Option<String>,
    pub input_suppressed: bool,
    pub animating: bool,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DatasetBound { records_len: usize, issues: usize },
    SelectionChanged { key: String, source: SelectionSource },
    SelectionNotFound { key: String },
    /// A hover arrived while the input cooldown was open.
    PointerSuppressed { key: String },
    CooldownStarted { seconds: f64 },
    CooldownEnded,
    Rendered { summary: PatchSummary },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read dashboard context without mutating
/// session state directly.
pub trait DashboardPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: &PluginContext);
}
