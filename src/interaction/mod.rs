mod cooldown;
mod selection;

pub use cooldown::Cooldown;
pub use selection::{
    DEFAULT_COOLDOWN_SECONDS, SelectionController, SelectionOutcome, SelectionSession,
    SelectionSource,
};
