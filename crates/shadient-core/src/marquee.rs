//! Seamless infinite-scroll marquee.
//!
//! A marquee row renders its item list twice in a row. Translating the row by
//! exactly one copy's width leaves the viewport showing the same content it
//! started with, so jumping back at that boundary is invisible. Offsets here
//! are computed directly from elapsed time, so there is no reset callback to
//! race against the frame loop.

use serde::{Deserialize, Serialize};

/// Seconds for the top track to travel one copy width.
pub const DEFAULT_TOP_DURATION: f64 = 20.0;
/// Seconds for the bottom track to travel one copy width.
pub const DEFAULT_BOTTOM_DURATION: f64 = 15.0;

/// Concatenate `items` with itself once, preserving order.
#[must_use]
pub fn doubled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() * 2);
    out.extend_from_slice(items);
    out.extend_from_slice(items);
    out
}

/// Width of one copy given the measured width of the doubled row.
///
/// Returns 0.0 for non-finite or negative measurements.
#[must_use]
pub fn track_width(doubled_width: f64) -> f64 {
    if doubled_width.is_finite() && doubled_width > 0.0 {
        doubled_width / 2.0
    } else {
        0.0
    }
}

/// Direction of travel for one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Offset runs from 0 to -width, content drifts left
    Left,
    /// Offset runs from -width to 0, content drifts right
    Right,
}

/// One scrolling row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeTrack {
    direction: Direction,
    duration: f64,
    width: f64,
}

impl MarqueeTrack {
    /// Create a track travelling `width` pixels every `duration` seconds.
    #[must_use]
    pub const fn new(direction: Direction, duration: f64, width: f64) -> Self {
        Self {
            direction,
            duration,
            width,
        }
    }

    /// Whether the track can move at all.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.width > 0.0)
            || !(self.duration.is_finite() && self.duration > 0.0)
    }

    /// Horizontal offset at `elapsed` seconds, always within `[-width, 0]`.
    ///
    /// Degenerate tracks stay at 0.0.
    #[must_use]
    pub fn offset_at(&self, elapsed: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let elapsed = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            0.0
        };
        let phase = (elapsed.rem_euclid(self.duration) / self.duration).clamp(0.0, 1.0);
        let offset = match self.direction {
            Direction::Left => -self.width * phase,
            Direction::Right => -self.width * (1.0 - phase),
        };
        offset.clamp(-self.width, 0.0)
    }
}

/// Loop durations for the two tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Seconds per loop for the top track
    #[serde(default = "default_top")]
    pub top_duration: f64,
    /// Seconds per loop for the bottom track
    #[serde(default = "default_bottom")]
    pub bottom_duration: f64,
}

const fn default_top() -> f64 {
    DEFAULT_TOP_DURATION
}

const fn default_bottom() -> f64 {
    DEFAULT_BOTTOM_DURATION
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            top_duration: DEFAULT_TOP_DURATION,
            bottom_duration: DEFAULT_BOTTOM_DURATION,
        }
    }
}

/// Offsets for both tracks at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackOffsets {
    /// Top track, drifting left
    pub top: f64,
    /// Bottom track, drifting right
    pub bottom: f64,
}

/// Why a looper declined to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The item list is empty
    NoItems,
    /// Measured width was zero or unusable
    ZeroWidth,
    /// A loop duration was zero, negative or non-finite
    InvalidDuration,
    /// The looper is already running
    AlreadyRunning,
    /// The looper was torn down
    TornDown,
}

/// Result of [`MarqueeLooper::start`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartOutcome {
    /// Both tracks are moving, each copy `track_width` pixels wide
    Started {
        /// Width of one copy
        track_width: f64,
    },
    /// Nothing was scheduled
    Skipped(SkipReason),
}

impl StartOutcome {
    /// Whether the loop is now running.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoopState {
    Idle,
    Running {
        started_at: f64,
        top: MarqueeTrack,
        bottom: MarqueeTrack,
    },
    Cancelled,
}

/// Drives the top and bottom tracks of a marquee.
///
/// The looper is created before layout, started once the doubled row has been
/// measured, and torn down when the page goes away. Sampling returns `None`
/// whenever the loop is not running so callers write nothing.
#[derive(Debug, Clone)]
pub struct MarqueeLooper {
    config: MarqueeConfig,
    item_count: usize,
    state: LoopState,
}

impl MarqueeLooper {
    /// Create an idle looper for `item_count` distinct items.
    #[must_use]
    pub const fn new(config: MarqueeConfig, item_count: usize) -> Self {
        Self {
            config,
            item_count,
            state: LoopState::Idle,
        }
    }

    /// Start both tracks at clock time `now` from the measured doubled width.
    pub fn start(&mut self, doubled_width: f64, now: f64) -> StartOutcome {
        let outcome = self.try_start(doubled_width, now);
        match outcome {
            StartOutcome::Started { track_width } => {
                tracing::debug!(track_width, items = self.item_count, "marquee started");
            }
            StartOutcome::Skipped(reason) => {
                tracing::debug!(?reason, doubled_width, "marquee not started");
            }
        }
        outcome
    }

    fn try_start(&mut self, doubled_width: f64, now: f64) -> StartOutcome {
        match self.state {
            LoopState::Running { .. } => return StartOutcome::Skipped(SkipReason::AlreadyRunning),
            LoopState::Cancelled => return StartOutcome::Skipped(SkipReason::TornDown),
            LoopState::Idle => {}
        }
        if self.item_count == 0 {
            return StartOutcome::Skipped(SkipReason::NoItems);
        }
        let width = track_width(doubled_width);
        if width <= 0.0 {
            return StartOutcome::Skipped(SkipReason::ZeroWidth);
        }
        let top = MarqueeTrack::new(Direction::Left, self.config.top_duration, width);
        let bottom = MarqueeTrack::new(Direction::Right, self.config.bottom_duration, width);
        if top.is_degenerate() || bottom.is_degenerate() {
            return StartOutcome::Skipped(SkipReason::InvalidDuration);
        }
        self.state = LoopState::Running {
            started_at: if now.is_finite() { now } else { 0.0 },
            top,
            bottom,
        };
        StartOutcome::Started { track_width: width }
    }

    /// Offsets at clock time `now`, or `None` when not running.
    #[must_use]
    pub fn sample(&self, now: f64) -> Option<TrackOffsets> {
        match self.state {
            LoopState::Running {
                started_at,
                top,
                bottom,
            } => {
                let elapsed = now - started_at;
                Some(TrackOffsets {
                    top: top.offset_at(elapsed),
                    bottom: bottom.offset_at(elapsed),
                })
            }
            LoopState::Idle | LoopState::Cancelled => None,
        }
    }

    /// Stop both tracks; the looper never runs again.
    pub fn teardown(&mut self) {
        if self.state != LoopState::Cancelled {
            tracing::debug!("marquee torn down");
        }
        self.state = LoopState::Cancelled;
    }

    /// Whether both tracks are moving.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Whether [`teardown`](Self::teardown) has been called.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        matches!(self.state, LoopState::Cancelled)
    }

    /// Width of one copy once running.
    #[must_use]
    pub fn track_width(&self) -> Option<f64> {
        match self.state {
            LoopState::Running { top, .. } => Some(top.width),
            LoopState::Idle | LoopState::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn test_doubled_abc() {
        assert_eq!(
            doubled(&["A", "B", "C"]),
            vec!["A", "B", "C", "A", "B", "C"]
        );
    }

    #[test]
    fn test_doubled_empty() {
        assert!(doubled::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_track_width_guards() {
        assert_eq!(track_width(600.0), 300.0);
        assert_eq!(track_width(0.0), 0.0);
        assert_eq!(track_width(-10.0), 0.0);
        assert_eq!(track_width(f64::NAN), 0.0);
        assert_eq!(track_width(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_left_track_endpoints() {
        let track = MarqueeTrack::new(Direction::Left, 20.0, 300.0);
        assert_eq!(track.offset_at(0.0), 0.0);
        assert!((track.offset_at(10.0) + 150.0).abs() < 1e-9);
        assert!((track.offset_at(20.0 - FRAME) + 300.0).abs() < 1.0);
        assert_eq!(track.offset_at(20.0), 0.0);
    }

    #[test]
    fn test_right_track_endpoints() {
        let track = MarqueeTrack::new(Direction::Right, 15.0, 300.0);
        assert_eq!(track.offset_at(0.0), -300.0);
        assert!((track.offset_at(7.5) + 150.0).abs() < 1e-9);
        assert!(track.offset_at(15.0 - FRAME).abs() < 1.0);
        assert_eq!(track.offset_at(15.0), -300.0);
    }

    #[test]
    fn test_degenerate_track_stays_put() {
        let track = MarqueeTrack::new(Direction::Left, 20.0, 0.0);
        assert!(track.is_degenerate());
        assert_eq!(track.offset_at(5.0), 0.0);
        let track = MarqueeTrack::new(Direction::Right, 0.0, 100.0);
        assert!(track.is_degenerate());
        assert_eq!(track.offset_at(5.0), 0.0);
    }

    #[test]
    fn test_top_resets_across_boundary() {
        let track = MarqueeTrack::new(Direction::Left, 20.0, 300.0);
        let before = track.offset_at(20.0 - FRAME / 2.0);
        let after = track.offset_at(20.0 + FRAME / 2.0);
        assert!(before < -299.0);
        assert!(after > -1.0);
    }

    #[test]
    fn test_looper_empty_items_skips() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 0);
        let outcome = looper.start(0.0, 0.0);
        assert_eq!(outcome, StartOutcome::Skipped(SkipReason::NoItems));
        assert!(!looper.is_running());
        assert!(looper.sample(1.0).is_none());
    }

    #[test]
    fn test_looper_zero_width_skips() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 1);
        assert_eq!(
            looper.start(0.0, 0.0),
            StartOutcome::Skipped(SkipReason::ZeroWidth)
        );
        assert!(looper.sample(1.0).is_none());
    }

    #[test]
    fn test_looper_invalid_duration_skips() {
        let config = MarqueeConfig {
            top_duration: 0.0,
            bottom_duration: 15.0,
        };
        let mut looper = MarqueeLooper::new(config, 3);
        assert_eq!(
            looper.start(600.0, 0.0),
            StartOutcome::Skipped(SkipReason::InvalidDuration)
        );
    }

    #[test]
    fn test_looper_single_item_runs() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 1);
        assert!(looper.start(416.0, 0.0).is_started());
        assert_eq!(looper.track_width(), Some(208.0));
    }

    #[test]
    fn test_looper_start_positions() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 3);
        let outcome = looper.start(600.0, 100.0);
        assert_eq!(outcome, StartOutcome::Started { track_width: 300.0 });
        let offsets = looper.sample(100.0).unwrap();
        assert_eq!(offsets.top, 0.0);
        assert_eq!(offsets.bottom, -300.0);
    }

    #[test]
    fn test_looper_before_start_time_holds() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 3);
        looper.start(600.0, 100.0);
        let offsets = looper.sample(50.0).unwrap();
        assert_eq!(offsets.top, 0.0);
        assert_eq!(offsets.bottom, -300.0);
    }

    #[test]
    fn test_looper_bottom_is_faster() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 3);
        looper.start(600.0, 0.0);
        let a = looper.sample(1.0).unwrap();
        let top_speed = a.top.abs();
        let bottom_speed = a.bottom - -300.0;
        assert!(bottom_speed > top_speed);
    }

    #[test]
    fn test_looper_start_twice() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 3);
        looper.start(600.0, 0.0);
        assert_eq!(
            looper.start(800.0, 5.0),
            StartOutcome::Skipped(SkipReason::AlreadyRunning)
        );
        assert_eq!(looper.track_width(), Some(300.0));
    }

    #[test]
    fn test_teardown_before_first_loop() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 3);
        looper.start(600.0, 0.0);
        assert!(looper.sample(5.0).is_some());
        looper.teardown();
        assert!(looper.sample(5.0).is_none());
        assert!(looper.sample(25.0).is_none());
        assert!(looper.is_torn_down());
        assert_eq!(
            looper.start(600.0, 30.0),
            StartOutcome::Skipped(SkipReason::TornDown)
        );
    }

    #[test]
    fn test_teardown_idle_looper() {
        let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 0);
        looper.teardown();
        assert!(looper.sample(0.0).is_none());
    }

    #[test]
    fn test_config_defaults_from_partial_yaml_shape() {
        let config: MarqueeConfig = serde_json::from_str(r#"{"top_duration": 30.0}"#).unwrap();
        assert_eq!(config.top_duration, 30.0);
        assert_eq!(config.bottom_duration, DEFAULT_BOTTOM_DURATION);
    }

    proptest! {
        #[test]
        fn prop_doubled_preserves_order(items in proptest::collection::vec(any::<u16>(), 0..40)) {
            let out = doubled(&items);
            prop_assert_eq!(out.len(), items.len() * 2);
            prop_assert_eq!(&out[..items.len()], &items[..]);
            prop_assert_eq!(&out[items.len()..], &items[..]);
        }

        #[test]
        fn prop_track_width_is_half(width in 0.0f64..100_000.0) {
            prop_assert!((track_width(width) * 2.0 - width).abs() < 1e-9);
        }

        #[test]
        fn prop_offsets_stay_in_bounds(
            width in 1.0f64..5_000.0,
            elapsed in 0.0f64..10_000.0,
        ) {
            let mut looper = MarqueeLooper::new(MarqueeConfig::default(), 12);
            looper.start(width * 2.0, 0.0);
            let offsets = looper.sample(elapsed).unwrap();
            prop_assert!(offsets.top <= 0.0 && offsets.top >= -width);
            prop_assert!(offsets.bottom <= 0.0 && offsets.bottom >= -width);
            prop_assert!(!offsets.top.is_nan() && !offsets.bottom.is_nan());
        }

        #[test]
        fn prop_constant_velocity_within_loop(
            width in 10.0f64..2_000.0,
            elapsed in 0.0f64..19.0,
        ) {
            let track = MarqueeTrack::new(Direction::Left, 20.0, width);
            let step = track.offset_at(elapsed) - track.offset_at(elapsed + 0.5);
            prop_assert!((step - width * 0.5 / 20.0).abs() < 1e-6);
        }
    }
}
