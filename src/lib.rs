//! drinkviz: data-to-visual pipeline of an interactive alcohol-consumption
//! dashboard.
//!
//! A CSV dataset is loaded into typed records, binned along one numeric axis
//! and laid out as a dot histogram linked to a breakdown donut. Rendering is
//! backend-agnostic: the dashboard builds a keyed `Scene`, diffs it against
//! the previous one and hands a `ScenePatch` to a `Renderer`.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Dashboard, DashboardConfig};
pub use error::{ChartError, ChartResult};
