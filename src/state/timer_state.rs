//! Countdown timer state machine
//!
//! The timer lives in one of two screens: the selection screen, where the
//! duration is edited in one-minute steps, and the running screen, where an
//! external driver ticks the countdown once per second. All transitions are
//! infallible; an intent that is invalid for the current screen simply leaves
//! the state untouched.

use serde::{Deserialize, Serialize};

/// Upper bound for the editable duration (one hour).
pub const MAX_DURATION_SECS: u32 = 3600;

/// Duration edit step (one minute per button press).
pub const DURATION_STEP_SECS: u32 = 60;

/// Animation progress reported while idle or at the start of a run.
pub const PROGRESS_REST: f32 = 0.11;

/// Animation progress reported when the countdown is about to finish.
pub const PROGRESS_END: f32 = 0.50;

/// Taps on the running screen required to dismiss the countdown.
pub const DISMISS_TAP_COUNT: u8 = 2;

/// Countdown timer state for the wearable display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left on the countdown (or the edited duration while selecting)
    pub remaining_seconds: u32,
    /// Duration snapshotted when the current run started
    pub initial_seconds: u32,
    /// Whether the countdown is actively decrementing
    pub running: bool,
    /// Whether the duration-selection screen is showing
    pub selection_view: bool,
    /// Taps collected toward dismissing the running screen
    #[serde(skip)]
    pub tap_count: u8,
}

impl TimerState {
    /// Create a fresh timer on the selection screen with no duration set
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            initial_seconds: 0,
            running: false,
            selection_view: true,
            tap_count: 0,
        }
    }

    /// Add one minute to the duration, capped at one hour.
    ///
    /// Only valid on the selection screen; does nothing at the cap.
    pub fn increase_duration(&mut self) -> bool {
        if !self.selection_view {
            return false;
        }
        if self.remaining_seconds >= MAX_DURATION_SECS {
            return false;
        }
        self.remaining_seconds =
            (self.remaining_seconds + DURATION_STEP_SECS).min(MAX_DURATION_SECS);
        true
    }

    /// Remove one minute from the duration.
    ///
    /// Only valid on the selection screen. A subtraction that would go
    /// negative lands on exactly zero instead.
    pub fn decrease_duration(&mut self) -> bool {
        if !self.selection_view || self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(DURATION_STEP_SECS);
        true
    }

    /// Begin the countdown with the currently edited duration.
    ///
    /// Ignored when no duration is set or a countdown is already running.
    /// Snapshots `initial_seconds` for progress interpolation.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.initial_seconds = self.remaining_seconds;
        self.running = true;
        self.selection_view = false;
        self.tap_count = 0;
        true
    }

    /// Abort the running countdown and return to the selection screen.
    ///
    /// The remaining time is kept so the user can restart from where they
    /// stopped. Ignored when no countdown is running.
    pub fn cancel(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.selection_view = true;
        self.tap_count = 0;
        true
    }

    /// Register a tap on the running screen.
    ///
    /// The running screen is dismissed by a double tap; a single tap only
    /// arms the counter. Returns true when the tap was registered at all;
    /// whether it ended the run shows in `running`.
    pub fn tap(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.tap_count += 1;
        if self.tap_count >= DISMISS_TAP_COUNT {
            self.cancel();
        }
        true
    }

    /// Advance the countdown by one second.
    ///
    /// Driven externally on a fixed cadence; a tick while not running is a
    /// no-op. Reaching zero flips back to the selection screen.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            self.selection_view = true;
        }
        true
    }

    /// Check if the countdown is active
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Animation progress for the sand visualization.
    ///
    /// Maps the remaining time onto [0.11, 0.50]: 0.11 right after start,
    /// 0.50 as the countdown empties. Resting (not running, or a run that
    /// never snapshotted a duration) pins the sand at 0.11.
    pub fn progress(&self) -> f32 {
        if !self.running || self.initial_seconds == 0 {
            return PROGRESS_REST;
        }
        let consumed = 1.0 - self.remaining_seconds as f32 / self.initial_seconds as f32;
        PROGRESS_REST + (PROGRESS_END - PROGRESS_REST) * consumed
    }

    /// Remaining time rendered as `MM:SS`, both fields zero-padded.
    ///
    /// Minutes are not wrapped at 59, so a full hour reads `60:00`.
    pub fn display(&self) -> String {
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_selection_screen_with_no_duration() {
        let timer = TimerState::new();
        assert_eq!(timer.remaining_seconds, 0);
        assert_eq!(timer.initial_seconds, 0);
        assert!(!timer.running);
        assert!(timer.selection_view);
    }

    #[test]
    fn increase_steps_by_a_minute_and_caps_at_an_hour() {
        let mut timer = TimerState::new();
        for presses in 1..=60 {
            assert!(timer.increase_duration());
            assert_eq!(timer.remaining_seconds, presses * DURATION_STEP_SECS);
        }
        // Past the cap nothing moves.
        for _ in 0..10 {
            assert!(!timer.increase_duration());
            assert_eq!(timer.remaining_seconds, MAX_DURATION_SECS);
        }
    }

    #[test]
    fn decrease_never_goes_below_zero() {
        let mut timer = TimerState::new();
        timer.increase_duration();
        timer.increase_duration();
        assert!(timer.decrease_duration());
        assert!(timer.decrease_duration());
        assert_eq!(timer.remaining_seconds, 0);
        for _ in 0..5 {
            assert!(!timer.decrease_duration());
            assert_eq!(timer.remaining_seconds, 0);
        }
    }

    #[test]
    fn edits_are_ignored_while_running() {
        let mut timer = TimerState::new();
        timer.increase_duration();
        timer.start();
        assert!(!timer.increase_duration());
        assert!(!timer.decrease_duration());
        assert_eq!(timer.remaining_seconds, 60);
    }

    #[test]
    fn start_with_no_duration_is_ignored() {
        let mut timer = TimerState::new();
        assert!(!timer.start());
        assert!(!timer.running);
        assert!(timer.selection_view);
        assert_eq!(timer.initial_seconds, 0);
    }

    #[test]
    fn start_snapshots_the_duration_and_leaves_the_selection_screen() {
        let mut timer = TimerState::new();
        for _ in 0..5 {
            timer.increase_duration();
        }
        assert!(timer.start());
        assert_eq!(timer.initial_seconds, 300);
        assert_eq!(timer.remaining_seconds, 300);
        assert!(timer.running);
        assert!(!timer.selection_view);
        // Double start does not re-snapshot.
        assert!(!timer.start());
    }

    #[test]
    fn countdown_finishes_after_exactly_the_set_number_of_ticks() {
        let mut timer = TimerState::new();
        timer.increase_duration();
        timer.increase_duration();
        timer.start();

        for _ in 0..119 {
            assert!(timer.tick());
            assert!(timer.running);
        }
        assert_eq!(timer.remaining_seconds, 1);

        // The 120th tick drains the timer and flips the screen.
        assert!(timer.tick());
        assert_eq!(timer.remaining_seconds, 0);
        assert!(!timer.running);
        assert!(timer.selection_view);
    }

    #[test]
    fn tick_while_idle_is_a_no_op() {
        let mut timer = TimerState::new();
        timer.increase_duration();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds, 60);
        assert!(!timer.running);
    }

    #[test]
    fn cancel_keeps_the_remaining_time() {
        let mut timer = TimerState::new();
        for _ in 0..3 {
            timer.increase_duration();
        }
        timer.start();
        timer.tick();
        timer.tick();
        assert!(timer.cancel());
        assert!(!timer.running);
        assert!(timer.selection_view);
        assert_eq!(timer.remaining_seconds, 178);
        // Cancelling twice does nothing further.
        assert!(!timer.cancel());
    }

    #[test]
    fn single_tap_arms_and_second_tap_dismisses() {
        let mut timer = TimerState::new();
        timer.increase_duration();
        timer.start();

        assert!(timer.tap());
        assert!(timer.running);

        assert!(timer.tap());
        assert!(!timer.running);
        assert!(timer.selection_view);
        assert_eq!(timer.remaining_seconds, 60);
        assert_eq!(timer.tap_count, 0);
    }

    #[test]
    fn taps_on_the_selection_screen_are_ignored() {
        let mut timer = TimerState::new();
        assert!(!timer.tap());
        assert_eq!(timer.tap_count, 0);
    }

    #[test]
    fn a_stray_tap_does_not_leak_into_the_next_run() {
        let mut timer = TimerState::new();
        timer.increase_duration();
        timer.start();
        timer.tap();
        // Run out naturally with one tap armed.
        for _ in 0..60 {
            timer.tick();
        }
        assert!(!timer.running);

        timer.increase_duration();
        timer.start();
        timer.tap();
        assert!(timer.running, "first tap of a new run must not dismiss it");
    }

    #[test]
    fn progress_rests_at_the_lower_bound_while_idle() {
        let mut timer = TimerState::new();
        assert_eq!(timer.progress(), PROGRESS_REST);
        timer.increase_duration();
        assert_eq!(timer.progress(), PROGRESS_REST);
    }

    #[test]
    fn progress_starts_at_the_lower_bound_and_climbs_monotonically() {
        let mut timer = TimerState::new();
        for _ in 0..10 {
            timer.increase_duration();
        }
        timer.start();
        assert_eq!(timer.progress(), PROGRESS_REST);

        let mut previous = timer.progress();
        while timer.remaining_seconds > 1 {
            timer.tick();
            let current = timer.progress();
            assert!(
                current > previous,
                "progress must climb as the countdown drains ({current} <= {previous})"
            );
            assert!(current < PROGRESS_END);
            previous = current;
        }
    }

    #[test]
    fn progress_approaches_the_upper_bound_near_the_end() {
        let mut timer = TimerState::new();
        timer.increase_duration();
        timer.start();
        while timer.remaining_seconds > 1 {
            timer.tick();
        }
        let near_end = timer.progress();
        let expected = PROGRESS_REST + (PROGRESS_END - PROGRESS_REST) * (59.0 / 60.0);
        assert!((near_end - expected).abs() < 1e-6);
    }

    #[test]
    fn progress_guards_against_a_zero_initial_duration() {
        let timer = TimerState {
            remaining_seconds: 0,
            initial_seconds: 0,
            running: true,
            selection_view: false,
            tap_count: 0,
        };
        assert_eq!(timer.progress(), PROGRESS_REST);
    }

    #[test]
    fn ten_minute_run_drains_to_zero_and_resets_the_screen() {
        let mut timer = TimerState::new();
        for _ in 0..10 {
            timer.increase_duration();
        }
        assert_eq!(timer.remaining_seconds, 600);
        timer.start();
        assert_eq!(timer.initial_seconds, 600);

        for _ in 0..600 {
            timer.tick();
        }
        assert_eq!(timer.remaining_seconds, 0);
        assert!(!timer.running);
        assert!(timer.selection_view);
        assert_eq!(timer.progress(), PROGRESS_REST);
    }

    #[test]
    fn display_is_zero_padded_and_does_not_wrap_minutes() {
        let mut timer = TimerState::new();
        assert_eq!(timer.display(), "00:00");

        timer.remaining_seconds = 90;
        assert_eq!(timer.display(), "01:30");

        timer.remaining_seconds = 605;
        assert_eq!(timer.display(), "10:05");

        timer.remaining_seconds = MAX_DURATION_SECS;
        assert_eq!(timer.display(), "60:00");
    }
}
