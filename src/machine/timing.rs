//! Per-cycle timing scratch data.

use core::time::Duration;

use crate::clock::Instant;

/// Timestamps of the extension cycle in progress.
///
/// Filled in when the arm starts extending, cleared whenever the arm goes
/// back to idle or starts retracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleTiming {
    /// When the motor was first commanded forward this cycle.
    pub extension_start: Option<Instant>,
    /// A pause was drawn for this cycle and has not fired yet.
    pub pause_scheduled: bool,
    /// When the current pause began.
    pub pause_start: Option<Instant>,
    /// Length of the current pause.
    pub pause_duration: Duration,
}

impl CycleTiming {
    /// Start a new cycle at `now`.
    pub(crate) fn begin(&mut self, now: Instant, will_pause: bool) {
        *self = Self {
            extension_start: Some(now),
            pause_scheduled: will_pause,
            ..Self::default()
        };
    }

    /// Start the cycle's pause, consuming the scheduled flag.
    pub(crate) fn begin_pause(&mut self, now: Instant, duration: Duration) {
        self.pause_scheduled = false;
        self.pause_start = Some(now);
        self.pause_duration = duration;
    }

    /// Forget the pause, keeping the extension start.
    pub(crate) fn end_pause(&mut self) {
        self.pause_start = None;
        self.pause_duration = Duration::ZERO;
    }

    /// Forget the whole cycle.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a scheduled pause is due, `pause_after` into the extension.
    pub fn pause_due(&self, now: Instant, pause_after: Duration) -> bool {
        match self.extension_start {
            Some(start) if self.pause_scheduled => now.duration_since(start) >= pause_after,
            _ => false,
        }
    }

    /// Whether the current pause has run its length.
    pub fn resume_due(&self, now: Instant) -> bool {
        self.pause_start
            .is_some_and(|start| now.duration_since(start) >= self.pause_duration)
    }
}
