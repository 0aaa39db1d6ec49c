//! Cross-fade between weather kinds
//!
//! A switch first dismisses the current animation (display ratio falls to 0),
//! then swaps in the pending kind and displays it (ratio climbs back to 1).

use nimbus_core::WeatherKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    /// Fully shown, no switch in progress
    Stable,
    /// Fading the current kind out before swapping to the pending one
    Dismissing,
    /// Fading the current kind in
    Displaying,
}

/// Serializable snapshot of a transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    pub current: WeatherKind,
    pub pending: Option<WeatherKind>,
    pub phase: TransitionPhase,
    /// Display ratio in [0, 1]
    pub ratio: f32,
}

impl TransitionState {
    pub fn stable(kind: WeatherKind) -> Self {
        Self {
            current: kind,
            pending: None,
            phase: TransitionPhase::Stable,
            ratio: 1.0,
        }
    }
}

/// Drives [`TransitionState`] forward in time
#[derive(Debug, Clone)]
pub struct TransitionController {
    state: TransitionState,
    switch_duration_ms: f32,
}

impl TransitionController {
    pub fn new(initial: WeatherKind, switch_duration_ms: f32) -> Self {
        Self {
            state: TransitionState::stable(initial),
            switch_duration_ms,
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    /// Kind whose model is currently animated
    pub fn current_kind(&self) -> WeatherKind {
        self.state.current
    }

    /// Kind that will be shown once any switch completes
    pub fn target_kind(&self) -> WeatherKind {
        self.state.pending.unwrap_or(self.state.current)
    }

    pub fn phase(&self) -> TransitionPhase {
        self.state.phase
    }

    pub fn display_ratio(&self) -> f32 {
        self.state.ratio
    }

    /// Ask for `kind`. When `running` is false the switch happens at once and
    /// the kind to swap to is returned; otherwise a fade is started or
    /// redirected and the swap is reported later by [`advance`](Self::advance).
    pub fn request(&mut self, kind: WeatherKind, running: bool) -> Option<WeatherKind> {
        if !running {
            let swap = (kind != self.state.current).then_some(kind);
            self.state = TransitionState::stable(kind);
            return swap;
        }

        match self.state.phase {
            TransitionPhase::Stable | TransitionPhase::Displaying => {
                if kind != self.state.current {
                    self.state.phase = TransitionPhase::Dismissing;
                    self.state.pending = Some(kind);
                }
            }
            TransitionPhase::Dismissing => {
                if kind == self.state.current {
                    // Turn around and fade the current kind back in
                    self.state.phase = TransitionPhase::Displaying;
                    self.state.pending = None;
                } else {
                    self.state.pending = Some(kind);
                }
            }
        }
        None
    }

    /// Move the ratio by `interval_ms`. Returns the kind to swap the model
    /// to when a dismissal completes.
    pub fn advance(&mut self, interval_ms: f32) -> Option<WeatherKind> {
        let step = if self.switch_duration_ms > 0.0 && interval_ms.is_finite() {
            interval_ms.max(0.0) / self.switch_duration_ms
        } else {
            1.0
        };

        match self.state.phase {
            TransitionPhase::Stable => None,
            TransitionPhase::Dismissing => {
                self.state.ratio -= step;
                if self.state.ratio > 0.0 {
                    return None;
                }
                self.state.ratio = 0.0;
                self.state.phase = TransitionPhase::Displaying;
                if let Some(next) = self.state.pending.take() {
                    self.state.current = next;
                }
                Some(self.state.current)
            }
            TransitionPhase::Displaying => {
                self.state.ratio += step;
                if self.state.ratio >= 1.0 {
                    self.state.ratio = 1.0;
                    self.state.phase = TransitionPhase::Stable;
                }
                None
            }
        }
    }

    /// Replace the state wholesale. The ratio is clamped into range and the
    /// phase is made consistent with the pending kind:
    /// - a pending kind other than the current one is always being dismissed
    ///   toward
    /// - a dismissal with nothing pending turns into a display
    /// - a stable state is fully shown
    pub fn restore(&mut self, state: TransitionState) {
        let pending = state.pending.filter(|kind| *kind != state.current);
        let mut ratio = if state.ratio.is_nan() {
            1.0
        } else {
            state.ratio.clamp(0.0, 1.0)
        };
        let phase = match (state.phase, pending) {
            (_, Some(_)) => TransitionPhase::Dismissing,
            (TransitionPhase::Dismissing, None) => TransitionPhase::Displaying,
            (phase, None) => phase,
        };
        if phase == TransitionPhase::Stable {
            ratio = 1.0;
        }
        self.state = TransitionState {
            current: state.current,
            pending,
            phase,
            ratio,
        };
    }
}
