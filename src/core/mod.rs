pub mod binning;
pub mod category;
pub mod dataset;
pub mod layout;
pub mod pie;
pub mod record;
pub mod scale;
pub mod stats;
pub mod types;

pub use binning::{
    BinnedAxis, BinningStrategy, Bucket, MAX_BUCKETS, bin_records, bin_thresholds, bin_uniform,
    extent,
};
pub use category::{
    BreakdownEntry, Category, CategoryBreakdown, CategorySet, DominantCategory,
    FallbackLabelPolicy, NO_DRINKS_LABEL, NONE_LABEL, dominant_category,
};
pub use dataset::{DEFAULT_KEY_COLUMN, Dataset, LoadReport};
pub use layout::{
    HistogramLayout, PositionedRecord, compute_radius, drawn_radius, layout_histogram,
};
pub use pie::{ArcAngles, LabelPlacement, PieGeometry, pie_angles, polar};
pub use record::{DataQualityIssue, Record, coerce_integer};
pub use scale::{LinearScale, format_tick, nice_ticks};
pub use stats::{FieldSummary, summarize};
pub use types::{Margins, PlotArea, Viewport};
