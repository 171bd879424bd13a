use crate::extensions::{PluginContext, PluginEvent};
use crate::render::Renderer;

use super::Dashboard;

impl<R: Renderer> Dashboard<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.config.viewport,
            records_len: self.dataset.len(),
            buckets_len: self.binned.buckets.len(),
            selected_key: self.selected_key().map(str::to_owned),
            input_suppressed: self.session().input_suppressed(),
            animating: self.is_animating(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(&event, &context);
        }
    }
}
