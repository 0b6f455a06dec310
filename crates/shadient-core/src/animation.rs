#![allow(clippy::unwrap_used, clippy::disallowed_methods)]
//! Tween animation with easing and deterministic sampling.
//!
//! Every animation in this module is a pure function of elapsed time. The
//! frame loop passes in the current clock and reads values back; sampling the
//! same instant twice always yields the same value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for animations.
///
/// Names accept the dotted aliases used by web animation tooling
/// (`power2.out`, `bounce.out`) so copy can be moved into a manifest verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    #[serde(alias = "none")]
    Linear,
    /// Quadratic ease in
    #[serde(alias = "power1.in")]
    EaseIn,
    /// Quadratic ease out
    #[serde(alias = "power1.out")]
    EaseOut,
    /// Quadratic ease in and out
    #[serde(alias = "power1.inOut")]
    EaseInOut,
    /// Cubic ease in
    #[serde(alias = "power2.in")]
    CubicIn,
    /// Cubic ease out
    #[serde(alias = "power2.out")]
    CubicOut,
    /// Cubic ease in and out
    #[serde(alias = "power2.inOut")]
    CubicInOut,
    /// Exponential ease out
    #[serde(alias = "expo.out")]
    ExpoOut,
    /// Bounce at end
    #[serde(alias = "bounce.out")]
    BounceOut,
    /// Back ease out (overshoots then returns)
    #[serde(alias = "back.out")]
    BackOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        // Endpoints are exact so settled tweens land on their target values.
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
                }
            }
            Self::ExpoOut => {
                if (t - 1.0).abs() < f64::EPSILON {
                    1.0
                } else {
                    1.0 - (-10.0 * t).exp2()
                }
            }
            Self::BounceOut => Self::bounce_out(t),
            Self::BackOut => Self::back_out(t),
        }
    }

    fn bounce_out(t: f64) -> f64 {
        const N1: f64 = 7.5625;
        const D1: f64 = 2.75;

        if t < 1.0 / D1 {
            N1 * t * t
        } else if t < 2.0 / D1 {
            let t = t - 1.5 / D1;
            (N1 * t).mul_add(t, 0.75)
        } else if t < 2.5 / D1 {
            let t = t - 2.25 / D1;
            (N1 * t).mul_add(t, 0.9375)
        } else {
            let t = t - 2.625 / D1;
            (N1 * t).mul_add(t, 0.984375)
        }
    }

    fn back_out(t: f64) -> f64 {
        const C1: f64 = 1.70158;
        const C3: f64 = C1 + 1.0;
        C1.mul_add((t - 1.0).powi(2), C3.mul_add((t - 1.0).powi(3), 1.0))
    }
}

// =============================================================================
// Timing
// =============================================================================

/// Duration, start delay and easing of one tween, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Length of the tween once started
    pub duration: f64,
    /// Time before the tween starts moving
    #[serde(default)]
    pub delay: f64,
    /// Easing curve
    #[serde(default)]
    pub easing: Easing,
}

impl Timing {
    /// Linear timing with no delay.
    #[must_use]
    pub const fn new(duration: f64) -> Self {
        Self {
            duration,
            delay: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Set start delay.
    #[must_use]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress from 0.0 to 1.0 at `elapsed` seconds.
    ///
    /// A non-positive duration jumps straight to 1.0 once the delay passes.
    #[must_use]
    pub fn progress(&self, elapsed: f64) -> f64 {
        if elapsed.is_nan() {
            return 0.0;
        }
        let local = elapsed - self.delay;
        if local < 0.0 {
            return 0.0;
        }
        if self.duration > 0.0 {
            (local / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Eased progress at `elapsed` seconds.
    #[must_use]
    pub fn eased(&self, elapsed: f64) -> f64 {
        self.easing.apply(self.progress(elapsed))
    }

    /// Time at which the tween settles on its final value.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.delay + self.duration.max(0.0)
    }

    /// Whether the tween has settled at `elapsed`.
    #[must_use]
    pub fn is_complete(&self, elapsed: f64) -> bool {
        elapsed >= self.end()
    }
}

// =============================================================================
// Interpolate Trait
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (*to - *from).mul_add(t as Self, *from)
    }
}

// =============================================================================
// Pose - Animated Element Transform
// =============================================================================

/// Unit used for translation offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// CSS pixels
    #[default]
    Px,
    /// Percentage of the element's own box
    Percent,
}

impl LengthUnit {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
        }
    }
}

/// Visual state of an element: translation, rotation and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Horizontal offset
    #[serde(default)]
    pub x: f64,
    /// Vertical offset
    #[serde(default)]
    pub y: f64,
    /// Rotation in degrees
    #[serde(default)]
    pub rotation: f64,
    /// Opacity from 0.0 to 1.0
    #[serde(default = "full_opacity")]
    pub opacity: f64,
    /// Unit of `x` and `y`
    #[serde(default)]
    pub unit: LengthUnit,
}

const fn full_opacity() -> f64 {
    1.0
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

impl Pose {
    /// Untransformed and fully visible.
    pub const REST: Self = Self {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        opacity: 1.0,
        unit: LengthUnit::Px,
    };

    /// Fully visible pose translated by `(x, y)` pixels.
    #[must_use]
    pub const fn offset(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            opacity: 1.0,
            unit: LengthUnit::Px,
        }
    }

    /// Set opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set rotation in degrees.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Express translation in percent of the element box.
    #[must_use]
    pub const fn in_percent(mut self) -> Self {
        self.unit = LengthUnit::Percent;
        self
    }

    /// CSS `transform` value.
    #[must_use]
    pub fn transform_css(&self) -> String {
        let unit = self.unit.suffix();
        format!(
            "translate({}{unit}, {}{unit}) rotate({}deg)",
            css_number(self.x),
            css_number(self.y),
            css_number(self.rotation)
        )
    }

    /// CSS `opacity` value, clamped to the valid range.
    #[must_use]
    pub fn opacity_css(&self) -> String {
        css_number(self.opacity.clamp(0.0, 1.0))
    }

    /// Inline style declaration for this pose.
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "transform: {}; opacity: {};",
            self.transform_css(),
            self.opacity_css()
        )
    }
}

impl Interpolate for Pose {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f64::interpolate(&from.x, &to.x, t),
            y: f64::interpolate(&from.y, &to.y, t),
            rotation: f64::interpolate(&from.rotation, &to.rotation, t),
            opacity: f64::interpolate(&from.opacity, &to.opacity, t),
            unit: to.unit,
        }
    }
}

/// Format a number for CSS with at most three decimals and no trailing zeros.
#[must_use]
pub fn css_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Tween
// =============================================================================

/// Animation of a value from one state to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween<T> {
    /// Start value
    pub from: T,
    /// End value
    pub to: T,
    /// Duration, delay and easing
    pub timing: Timing,
}

impl<T: Interpolate + Clone> Tween<T> {
    /// Create a new tween.
    #[must_use]
    pub const fn new(from: T, to: T, timing: Timing) -> Self {
        Self { from, to, timing }
    }

    /// Value at `elapsed` seconds since the tween was started.
    #[must_use]
    pub fn value_at(&self, elapsed: f64) -> T {
        T::interpolate(&self.from, &self.to, self.timing.eased(elapsed))
    }

    /// Whether the tween has settled at `elapsed`.
    #[must_use]
    pub fn is_complete(&self, elapsed: f64) -> bool {
        self.timing.is_complete(elapsed)
    }
}

// =============================================================================
// Sequence - Grouped Tweens
// =============================================================================

/// What a step animates.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Element transform and opacity
    Pose(Tween<Pose>),
    /// A single scalar, such as a gradient sweep progress
    Scalar(Tween<f64>),
}

impl Motion {
    fn sample(&self, elapsed: f64) -> Sample {
        match self {
            Self::Pose(tween) => Sample::Pose(tween.value_at(elapsed)),
            Self::Scalar(tween) => Sample::Scalar(tween.value_at(elapsed)),
        }
    }

    const fn timing(&self) -> &Timing {
        match self {
            Self::Pose(tween) => &tween.timing,
            Self::Scalar(tween) => &tween.timing,
        }
    }
}

/// Sampled value of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Element pose
    Pose(Pose),
    /// Scalar value
    Scalar(f64),
}

/// One target animated by a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Identifier of the animated element
    pub target: String,
    /// Animation applied to it
    pub motion: Motion,
}

/// Tweens started together; each carries its own delay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pose tween for `target`.
    #[must_use]
    pub fn pose(mut self, target: &str, tween: Tween<Pose>) -> Self {
        self.steps.push(Step {
            target: target.to_string(),
            motion: Motion::Pose(tween),
        });
        self
    }

    /// Add a scalar tween for `target`.
    #[must_use]
    pub fn scalar(mut self, target: &str, tween: Tween<f64>) -> Self {
        self.steps.push(Step {
            target: target.to_string(),
            motion: Motion::Scalar(tween),
        });
        self
    }

    /// Steps in insertion order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether the sequence has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time at which every step has settled.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.steps
            .iter()
            .map(|s| s.motion.timing().end())
            .fold(0.0, f64::max)
    }

    /// Sample every step at `elapsed` seconds since start.
    #[must_use]
    pub fn sample(&self, elapsed: f64) -> Vec<Frame> {
        self.steps
            .iter()
            .map(|step| Frame {
                target: step.target.clone(),
                sample: step.motion.sample(elapsed),
            })
            .collect()
    }

    /// Whether every step has settled at `elapsed`.
    #[must_use]
    pub fn is_complete(&self, elapsed: f64) -> bool {
        elapsed >= self.duration()
    }
}

/// A value to write to one target for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Identifier of the animated element
    pub target: String,
    /// Value for this frame
    pub sample: Sample,
}

// =============================================================================
// AnimationController - Manages Running Sequences
// =============================================================================

#[derive(Debug, Clone)]
struct Playback {
    sequence: Sequence,
    started_at: f64,
}

/// Controller for named sequences started at host clock times.
///
/// Playing a name that is already running restarts it from the new time.
#[derive(Debug, Default)]
pub struct AnimationController {
    playing: HashMap<String, Playback>,
    active_count: usize,
}

impl AnimationController {
    /// Create new controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a sequence at clock time `now`.
    pub fn play(&mut self, name: &str, sequence: Sequence, now: f64) {
        if sequence.is_empty() {
            return;
        }
        self.playing.insert(
            name.to_string(),
            Playback {
                sequence,
                started_at: now,
            },
        );
        self.active_count = self.playing.len();
    }

    /// Stop a sequence, leaving its targets where they are.
    pub fn stop(&mut self, name: &str) {
        self.playing.remove(name);
        self.active_count = self.playing.len();
    }

    /// Whether a sequence is running.
    #[must_use]
    pub fn is_playing(&self, name: &str) -> bool {
        self.playing.contains_key(name)
    }

    /// Sample all running sequences at `now`.
    ///
    /// Sequences that have settled emit their final frame and are retired.
    pub fn sample(&mut self, now: f64) -> Vec<Frame> {
        let mut frames = Vec::new();
        self.playing.retain(|_, playback| {
            let elapsed = now - playback.started_at;
            frames.extend(playback.sequence.sample(elapsed));
            !playback.sequence.is_complete(elapsed)
        });
        self.active_count = self.playing.len();
        frames
    }

    /// Whether any animations are active.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active_count > 0
    }

    /// Number of active animations.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Clear all animations.
    pub fn clear(&mut self) {
        self.playing.clear();
        self.active_count = 0;
    }
}

// =============================================================================
// Tests - TDD Style
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Easing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_easing_linear() {
        assert!((Easing::Linear.apply(0.0) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < 0.001);
        assert!((Easing::Linear.apply(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_out_curves_lead_linear() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::CubicOut.apply(0.5) > Easing::EaseOut.apply(0.5));
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::EaseInOut,
            Easing::CubicIn,
            Easing::CubicInOut,
            Easing::ExpoOut,
            Easing::BounceOut,
            Easing::BackOut,
        ] {
            assert!(easing.apply(0.0).abs() < 0.001, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_dotted_aliases() {
        let e: Easing = serde_json::from_str("\"power2.out\"").unwrap();
        assert_eq!(e, Easing::CubicOut);
        let e: Easing = serde_json::from_str("\"bounce.out\"").unwrap();
        assert_eq!(e, Easing::BounceOut);
        let e: Easing = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(e, Easing::Linear);
    }

    // -------------------------------------------------------------------------
    // Timing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_timing_delay_holds_start() {
        let timing = Timing::new(1.0).with_delay(0.5);
        assert_eq!(timing.progress(0.0), 0.0);
        assert_eq!(timing.progress(0.5), 0.0);
        assert!((timing.progress(1.0) - 0.5).abs() < 0.001);
        assert_eq!(timing.progress(3.0), 1.0);
        assert!((timing.end() - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_timing_zero_duration_jumps() {
        let timing = Timing::new(0.0).with_delay(0.2);
        assert_eq!(timing.progress(0.1), 0.0);
        assert_eq!(timing.progress(0.2), 1.0);
        assert!(timing.is_complete(0.2));
    }

    #[test]
    fn test_timing_nan_is_start() {
        assert_eq!(Timing::new(1.0).progress(f64::NAN), 0.0);
    }

    // -------------------------------------------------------------------------
    // Pose tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_pose_style() {
        let pose = Pose::offset(-100.0, 100.0)
            .with_rotation(-15.0)
            .with_opacity(0.0);
        assert_eq!(
            pose.style(),
            "transform: translate(-100px, 100px) rotate(-15deg); opacity: 0;"
        );
    }

    #[test]
    fn test_pose_percent_unit() {
        let pose = Pose::offset(0.0, -100.0).in_percent();
        assert_eq!(pose.transform_css(), "translate(0%, -100%) rotate(0deg)");
    }

    #[test]
    fn test_pose_interpolate() {
        let from = Pose::offset(-100.0, 100.0).with_opacity(0.0);
        let mid = Pose::interpolate(&from, &Pose::REST, 0.5);
        assert!((mid.x + 50.0).abs() < 0.001);
        assert!((mid.y - 50.0).abs() < 0.001);
        assert!((mid.opacity - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_css_number_trims() {
        assert_eq!(css_number(0.5), "0.5");
        assert_eq!(css_number(-0.0001), "0");
        assert_eq!(css_number(100.0), "100");
        assert_eq!(css_number(f64::NAN), "0");
    }

    // -------------------------------------------------------------------------
    // Tween / Sequence tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tween_value_at() {
        let tween = Tween::new(0.0_f64, 100.0, Timing::new(1.0));
        assert!((tween.value_at(0.25) - 25.0).abs() < 0.001);
        assert!((tween.value_at(5.0) - 100.0).abs() < 0.001);
        assert!(tween.is_complete(1.0));
    }

    #[test]
    fn test_sequence_duration_includes_delays() {
        let seq = Sequence::new()
            .pose("a", Tween::new(Pose::REST, Pose::REST, Timing::new(1.0)))
            .scalar(
                "b",
                Tween::new(0.0, 1.0, Timing::new(1.0).with_delay(1.5)),
            );
        assert!((seq.duration() - 2.5).abs() < 0.001);
        assert!(!seq.is_complete(2.0));
        assert!(seq.is_complete(2.5));
        assert_eq!(seq.sample(0.0).len(), 2);
    }

    // -------------------------------------------------------------------------
    // AnimationController tests
    // -------------------------------------------------------------------------

    fn fade(duration: f64) -> Sequence {
        Sequence::new().scalar("fade", Tween::new(0.0, 1.0, Timing::new(duration)))
    }

    #[test]
    fn test_controller_new() {
        let controller = AnimationController::new();
        assert!(!controller.is_animating());
        assert_eq!(controller.active_count(), 0);
    }

    #[test]
    fn test_controller_samples_relative_to_start() {
        let mut controller = AnimationController::new();
        controller.play("intro", fade(1.0), 10.0);
        let frames = controller.sample(10.5);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].sample, Sample::Scalar(0.5));
        assert!(controller.is_playing("intro"));
    }

    #[test]
    fn test_controller_retires_after_final_frame() {
        let mut controller = AnimationController::new();
        controller.play("intro", fade(1.0), 0.0);
        let frames = controller.sample(2.0);
        assert_eq!(frames[0].sample, Sample::Scalar(1.0));
        assert!(!controller.is_animating());
        assert!(controller.sample(3.0).is_empty());
    }

    #[test]
    fn test_controller_restart_replaces() {
        let mut controller = AnimationController::new();
        controller.play("intro", fade(1.0), 0.0);
        controller.play("intro", fade(1.0), 5.0);
        assert_eq!(controller.active_count(), 1);
        assert_eq!(controller.sample(5.0)[0].sample, Sample::Scalar(0.0));
    }

    #[test]
    fn test_controller_ignores_empty_sequence() {
        let mut controller = AnimationController::new();
        controller.play("nothing", Sequence::new(), 0.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_controller_stop_and_clear() {
        let mut controller = AnimationController::new();
        controller.play("a", fade(1.0), 0.0);
        controller.play("b", fade(1.0), 0.0);
        controller.stop("a");
        assert_eq!(controller.active_count(), 1);
        controller.clear();
        assert!(!controller.is_animating());
    }
}
