//! Optional feature modules live here.
//!
//! Keep extensions observational and avoid coupling them into core paths.

pub mod plugins;

pub use plugins::{DashboardPlugin, PluginContext, PluginEvent};
