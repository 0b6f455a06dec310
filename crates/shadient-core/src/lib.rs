//! Core types for the Shadient landing page.
//!
//! This crate holds everything that does not touch a browser:
//! - Tweens, easing and a controller for named sequences: [`Tween`], [`AnimationController`]
//! - The seamless marquee loop: [`MarqueeLooper`]
//! - Page state and the commands it emits: [`PageState`], [`Command`]
//! - Text splitting for staggered reveals: [`split()`]
//! - Colors and radial glows: [`Color`], [`RadialGlow`]

pub mod animation;
mod color;
pub mod marquee;
mod split;
mod state;

pub use animation::{
    css_number, AnimationController, Easing, Frame, Interpolate, LengthUnit, Pose, Sample,
    Sequence, Timing, Tween,
};
pub use color::{glow_background, Anchor, Color, ColorParseError, RadialGlow};
pub use marquee::{
    doubled, track_width, Direction, MarqueeConfig, MarqueeLooper, MarqueeTrack, SkipReason,
    StartOutcome, TrackOffsets,
};
pub use split::{split, Segment, SplitMode};
pub use state::{
    ButtonFace, Command, Cue, MenuEvent, MenuState, PageMessage, PageState, Phase, State,
};
