use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CategoryBreakdown, CategorySet, Dataset};
use crate::interaction::Cooldown;

pub const DEFAULT_COOLDOWN_SECONDS: f64 = 1.5;

/// What triggered a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionSource {
    /// First selection after the dataset is bound.
    Initial,
    /// Pointer entered a dot.
    Hover,
    /// Pointer clicked a dot.
    Click,
    /// Search collaborator picked a key.
    Search,
    /// "Surprise me" random pick.
    Random,
}

impl SelectionSource {
    /// Everything except hover opens the input cooldown.
    #[must_use]
    pub const fn starts_cooldown(self) -> bool {
        !matches!(self, Self::Hover)
    }
}

/// Result of one selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    Changed {
        previous: Option<usize>,
        current: usize,
    },
    /// The requested record was already selected.
    Reaffirmed { current: usize },
    /// Unknown key or out-of-range index; nothing changed.
    NotFound,
    /// No records to choose from; nothing changed.
    Empty,
    /// Hover ignored because the input cooldown is open.
    Suppressed,
}

impl SelectionOutcome {
    /// Record selected after the request, when the request resolved to one.
    #[must_use]
    pub fn selected(self) -> Option<usize> {
        match self {
            Self::Changed { current, .. } | Self::Reaffirmed { current } => Some(current),
            Self::NotFound | Self::Empty | Self::Suppressed => None,
        }
    }

    #[must_use]
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Session state owned by the selection controller.
///
/// Readable by anyone; only [`SelectionController`] operations mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSession {
    current: Option<usize>,
    breakdown: Option<CategoryBreakdown>,
    cooldown: Cooldown,
}

impl SelectionSession {
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn breakdown(&self) -> Option<&CategoryBreakdown> {
        self.breakdown.as_ref()
    }

    #[must_use]
    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    #[must_use]
    pub fn input_suppressed(&self) -> bool {
        self.cooldown.is_active()
    }
}

/// Maps selection requests onto the session state.
#[derive(Debug)]
pub struct SelectionController<G = StdRng> {
    session: SelectionSession,
    rng: G,
    cooldown_seconds: f64,
}

impl SelectionController<StdRng> {
    #[must_use]
    pub fn new(cooldown_seconds: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), cooldown_seconds)
    }

    /// Deterministic random picks for tests and reproducible sessions.
    #[must_use]
    pub fn with_seed(seed: u64, cooldown_seconds: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), cooldown_seconds)
    }
}

impl<G: Rng> SelectionController<G> {
    #[must_use]
    pub fn with_rng(rng: G, cooldown_seconds: f64) -> Self {
        Self {
            session: SelectionSession::default(),
            rng,
            cooldown_seconds: cooldown_seconds.max(0.0),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    #[must_use]
    pub fn cooldown_seconds(&self) -> f64 {
        self.cooldown_seconds
    }

    /// Selects the record at `index`.
    ///
    /// Re-selecting the current record is idempotent and keeps the existing
    /// breakdown. Sources other than hover open the cooldown either way.
    pub fn select(
        &mut self,
        dataset: &Dataset,
        categories: &CategorySet,
        index: usize,
        source: SelectionSource,
    ) -> SelectionOutcome {
        let Some(record) = dataset.record(index) else {
            debug!(index, "selection index out of range");
            return SelectionOutcome::NotFound;
        };

        if source.starts_cooldown() && self.session.cooldown.start(self.cooldown_seconds) {
            trace!(seconds = self.cooldown_seconds, "input cooldown started");
        }

        if self.session.current == Some(index) {
            trace!(key = record.key(), ?source, "selection reaffirmed");
            return SelectionOutcome::Reaffirmed { current: index };
        }

        let previous = self.session.current.replace(index);
        self.session.breakdown = Some(CategoryBreakdown::from_record(record, categories));
        debug!(key = record.key(), ?source, "selection changed");
        SelectionOutcome::Changed {
            previous,
            current: index,
        }
    }

    /// Uniform random pick among all records; no-op on an empty dataset.
    pub fn select_random(
        &mut self,
        dataset: &Dataset,
        categories: &CategorySet,
        source: SelectionSource,
    ) -> SelectionOutcome {
        if dataset.is_empty() {
            debug!("random selection skipped: dataset is empty");
            return SelectionOutcome::Empty;
        }
        let index = self.rng.gen_range(0..dataset.len());
        self.select(dataset, categories, index, source)
    }

    /// Case-sensitive exact key lookup; unknown keys leave the state alone.
    pub fn select_by_key(
        &mut self,
        dataset: &Dataset,
        categories: &CategorySet,
        key: &str,
    ) -> SelectionOutcome {
        match dataset.position(key) {
            Some(index) => self.select(dataset, categories, index, SelectionSource::Search),
            None => {
                debug!(key, "selection key not found");
                SelectionOutcome::NotFound
            }
        }
    }

    /// Advances the cooldown clock; returns `true` when the window closed.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        let closed = self.session.cooldown.tick(delta_seconds);
        if closed {
            trace!("input cooldown ended");
        }
        closed
    }
}
