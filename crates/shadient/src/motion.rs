//! Choreography: which tweens each [`Cue`] plays, and how frames become styles.
//!
//! Targets are addressed by the `data-anim` attribute the renderer puts on
//! each animated element. [`target`] builds those names so markup and motion
//! cannot drift apart.

use shadient_content::{Headline, HeroVariant, Manifest};
use shadient_core::{
    glow_background, split, Cue, Easing, Frame, Pose, RadialGlow, Sample, Segment, Sequence,
    SplitMode, Timing, Tween,
};
use std::collections::HashMap;

/// Element names used in `data-anim` attributes.
pub mod target {
    /// Site header.
    pub const HEADER: &str = "header";
    /// Mobile dropdown menu.
    pub const MENU_DROPDOWN: &str = "menu-dropdown";

    /// Glow overlay of hero `hero`.
    #[must_use]
    pub fn glow(hero: usize) -> String {
        format!("hero-{hero}-glow")
    }

    /// Whole headline of hero `hero`.
    #[must_use]
    pub fn headline(hero: usize) -> String {
        format!("hero-{hero}-headline")
    }

    /// Split segment `index` of the headline of hero `hero`.
    #[must_use]
    pub fn headline_segment(hero: usize, index: usize) -> String {
        format!("hero-{hero}-headline-{index}")
    }

    /// Paragraph of hero `hero`.
    #[must_use]
    pub fn body(hero: usize) -> String {
        format!("hero-{hero}-body")
    }

    /// Email form of hero `hero`.
    #[must_use]
    pub fn form(hero: usize) -> String {
        format!("hero-{hero}-form")
    }

    /// Primary call-to-action label of hero `hero`.
    #[must_use]
    pub fn cta_primary(hero: usize) -> String {
        format!("hero-{hero}-cta-primary")
    }

    /// Secondary call-to-action label of hero `hero`.
    #[must_use]
    pub fn cta_secondary(hero: usize) -> String {
        format!("hero-{hero}-cta-secondary")
    }
}

/// Seconds the header takes to drop in.
pub const HEADER_DROP: f64 = 1.0;
/// Seconds the mobile dropdown takes to drop in.
pub const DROPDOWN_DROP: f64 = 0.5;
/// Seconds for the glow to sweep from the center to its anchors.
pub const GLOW_SWEEP: f64 = 1.5;
/// Seconds for the call-to-action labels to swap.
pub const CTA_SWAP: f64 = 0.5;

const HEADLINE_DELAY: f64 = 0.5;
const BODY_DELAY: f64 = 0.8;
const FORM_DELAY: f64 = 1.5;

/// Pose elements drop in from.
fn dropped() -> Pose {
    Pose::offset(0.0, -100.0).with_opacity(0.0)
}

/// Pose hero copy rises from: down-left, tilted and transparent.
fn tilted() -> Pose {
    Pose::offset(-100.0, 100.0)
        .with_rotation(-15.0)
        .with_opacity(0.0)
}

/// Resting and hidden poses of the two call-to-action labels.
pub mod cta {
    use shadient_core::{ButtonFace, Pose};

    /// Primary label slid up and out.
    #[must_use]
    pub fn primary_hidden() -> Pose {
        Pose::offset(0.0, -100.0).in_percent().with_opacity(0.0)
    }

    /// Secondary label waiting below the button.
    #[must_use]
    pub fn secondary_hidden() -> Pose {
        Pose::offset(0.0, 100.0).in_percent().with_opacity(0.0)
    }

    /// Poses of (primary, secondary) for a button face.
    #[must_use]
    pub fn poses(face: ButtonFace) -> (Pose, Pose) {
        let rest = Pose::REST.in_percent();
        match face {
            ButtonFace::Resting => (rest, secondary_hidden()),
            ButtonFace::Swapped => (primary_hidden(), rest),
        }
    }
}

/// Split every headline line, numbering animated segments across lines.
///
/// Segment delays are `global index * stagger`.
#[must_use]
pub fn headline_segments(headline: &Headline) -> Vec<Vec<Segment>> {
    let mut offset = 0usize;
    headline
        .lines
        .iter()
        .map(|line| {
            let mut segments = split(line, headline.split, headline.stagger);
            let count = segments.iter().filter(|s| !s.is_space).count();
            for segment in &mut segments {
                segment.index += offset;
                segment.delay = segment.index as f64 * headline.stagger;
            }
            offset += count;
            segments
        })
        .collect()
}

/// Build the sequence a cue plays against the given manifest.
///
/// Cues for hero sections that do not exist, or that have no entrance,
/// yield an empty sequence.
#[must_use]
pub fn sequence_for(manifest: &Manifest, cue: Cue) -> Sequence {
    match cue {
        Cue::HeaderEntrance => Sequence::new().pose(
            target::HEADER,
            Tween::new(
                dropped(),
                Pose::REST,
                Timing::new(HEADER_DROP).with_easing(Easing::BounceOut),
            ),
        ),
        Cue::MenuDropdown => Sequence::new().pose(
            target::MENU_DROPDOWN,
            Tween::new(
                dropped(),
                Pose::REST,
                Timing::new(DROPDOWN_DROP).with_easing(Easing::BounceOut),
            ),
        ),
        Cue::HeroEntrance(hero) => hero_entrance(manifest, hero),
        Cue::CtaSwap { hero, replay } => {
            if hero >= manifest.heroes.len() {
                return Sequence::new();
            }
            let timing = Timing::new(CTA_SWAP).with_easing(Easing::CubicOut);
            let rest = Pose::REST.in_percent();
            let mut seq = Sequence::new();
            if !replay {
                seq = seq.pose(
                    &target::cta_primary(hero),
                    Tween::new(rest, cta::primary_hidden(), timing),
                );
            }
            seq.pose(
                &target::cta_secondary(hero),
                Tween::new(cta::secondary_hidden(), rest, timing),
            )
        }
    }
}

fn hero_entrance(manifest: &Manifest, hero: usize) -> Sequence {
    let Some(content) = manifest.heroes.get(hero) else {
        tracing::debug!(hero, "entrance cue for missing hero section");
        return Sequence::new();
    };
    if content.variant == HeroVariant::Static {
        return Sequence::new();
    }

    let rise = Timing::new(1.0).with_easing(Easing::CubicOut);
    let mut seq = Sequence::new().scalar(
        &target::glow(hero),
        Tween::new(
            0.0,
            1.0,
            Timing::new(GLOW_SWEEP).with_easing(Easing::CubicOut),
        ),
    );

    if content.headline.split == SplitMode::None {
        seq = seq.pose(
            &target::headline(hero),
            Tween::new(tilted(), Pose::REST, rise.with_delay(HEADLINE_DELAY)),
        );
    } else {
        for segment in headline_segments(&content.headline)
            .iter()
            .flatten()
            .filter(|s| !s.is_space)
        {
            seq = seq.pose(
                &target::headline_segment(hero, segment.index),
                Tween::new(
                    tilted(),
                    Pose::REST,
                    rise.with_delay(HEADLINE_DELAY + segment.delay),
                ),
            );
        }
    }

    seq.pose(
        &target::body(hero),
        Tween::new(tilted(), Pose::REST, rise.with_delay(BODY_DELAY)),
    )
    .pose(
        &target::form(hero),
        Tween::new(
            Pose::offset(0.0, 100.0).with_opacity(0.0),
            Pose::REST,
            Timing::new(1.0)
                .with_easing(Easing::BounceOut)
                .with_delay(FORM_DELAY),
        ),
    )
}

/// A style change for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleWrite {
    /// New `transform` and `opacity`
    Pose {
        /// CSS transform
        transform: String,
        /// CSS opacity
        opacity: String,
    },
    /// New `background`
    Background(String),
}

impl StyleWrite {
    /// Inline `style` attribute text.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::Pose { transform, opacity } => {
                format!("transform: {transform}; opacity: {opacity};")
            }
            Self::Background(background) => format!("background: {background};"),
        }
    }
}

/// Inline styles keyed by `data-anim` target.
pub type Styles = HashMap<String, String>;

/// Styles every mount cue starts from.
///
/// Markup rendered before the runtime mounts carries these so the first paint
/// already matches the first animation frame.
#[must_use]
pub fn opening_styles(manifest: &Manifest) -> Styles {
    let stage = Stage::new(manifest);
    std::iter::once(Cue::HeaderEntrance)
        .chain((0..manifest.heroes.len()).map(Cue::HeroEntrance))
        .flat_map(|cue| sequence_for(manifest, cue).sample(0.0))
        .filter_map(|frame| stage.style(&frame).map(|style| (frame.target, style.css())))
        .collect()
}

/// Resolves sampled frames into style writes.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    glows: HashMap<String, Vec<RadialGlow>>,
}

impl Stage {
    /// Build a stage knowing the glow layers of every hero.
    #[must_use]
    pub fn new(manifest: &Manifest) -> Self {
        let glows = manifest
            .heroes
            .iter()
            .enumerate()
            .map(|(i, hero)| (target::glow(i), hero.glows.clone()))
            .collect();
        Self { glows }
    }

    /// Style to apply for `frame`, or `None` for unknown scalar targets.
    #[must_use]
    pub fn style(&self, frame: &Frame) -> Option<StyleWrite> {
        match frame.sample {
            Sample::Pose(pose) => Some(StyleWrite::Pose {
                transform: pose.transform_css(),
                opacity: pose.opacity_css(),
            }),
            Sample::Scalar(sweep) => self
                .glows
                .get(&frame.target)
                .map(|glows| StyleWrite::Background(glow_background(glows, sweep))),
        }
    }
}
