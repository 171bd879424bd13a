//! Dashboard facade: wires loader output, binning, layout, selection and the
//! scene pipeline behind one owner.

mod dashboard;
mod dashboard_config;
mod dashboard_snapshot;
mod dot_animator;
mod json_contract;
mod pie_animator;
mod plugin_dispatch;
mod plugin_registry;
mod scene_builder;

pub use dashboard::Dashboard;
pub use dashboard_config::{DashboardConfig, TransitionTimings, Typography};
pub use dashboard_snapshot::{BucketSnapshot, DashboardSnapshot, DotSnapshot};
pub use dot_animator::DotAnimator;
pub use json_contract::{DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshotJsonContractV1};
pub use pie_animator::{PieAnimator, SliceFrame};
pub use scene_builder::{FrameState, Palette, SceneBuilder};
