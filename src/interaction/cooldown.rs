use serde::{Deserialize, Serialize};

/// Advisory pointer-input suppression window.
///
/// Starting the cooldown while it is already running does not extend it: the
/// window always closes at the first deadline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cooldown {
    remaining_seconds: f64,
}

impl Cooldown {
    #[must_use]
    pub fn is_active(self) -> bool {
        self.remaining_seconds > 0.0
    }

    #[must_use]
    pub fn remaining_seconds(self) -> f64 {
        self.remaining_seconds.max(0.0)
    }

    /// Opens the window for `seconds`; returns `false` if one was already open.
    pub fn start(&mut self, seconds: f64) -> bool {
        if self.is_active() {
            return false;
        }
        self.remaining_seconds = seconds.max(0.0);
        self.is_active()
    }

    /// Advances the window; returns `true` when this tick closed it.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_seconds -= delta_seconds.max(0.0);
        if self.remaining_seconds <= 0.0 {
            self.remaining_seconds = 0.0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::Cooldown;

    #[test]
    fn restarting_an_open_window_does_not_renew_it() {
        let mut cooldown = Cooldown::default();
        assert!(cooldown.start(1.5));
        assert!(!cooldown.tick(1.0));
        assert!(!cooldown.start(1.5));
        assert!(cooldown.tick(0.5));
        assert!(!cooldown.is_active());
    }

    #[test]
    fn zero_length_window_never_opens() {
        let mut cooldown = Cooldown::default();
        assert!(!cooldown.start(0.0));
        assert!(!cooldown.is_active());
    }
}
