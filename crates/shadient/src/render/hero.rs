use crate::motion::{cta, headline_segments, target, Styles};
use maud::{html, Markup};
use shadient_content::{Headline, HeroContent, HeroVariant};
use shadient_core::{glow_background, ButtonFace, SplitMode};

/// Markup for the hero section at `index`.
///
/// `styles` holds opening poses keyed by animation target. Targets without an
/// entry render at rest, and the glow then sits on its anchors.
#[must_use]
pub fn render_hero(index: usize, hero: &HeroContent, face: ButtonFace, styles: &Styles) -> Markup {
    let style = |name: &str| styles.get(name).map(String::as_str);
    let glow_target = target::glow(index);
    let glow_style = style(&glow_target).map_or_else(
        || format!("background: {};", glow_background(&hero.glows, 1.0)),
        str::to_string,
    );
    let variant = match hero.variant {
        HeroVariant::Static => "hero-static",
        HeroVariant::Animated => "hero-animated",
    };
    let (primary, secondary) = cta::poses(face);

    html! {
        section
            class={ "hero " (variant) }
            data-hero=(index)
            style={ "background-color: " (hero.background.to_hex()) ";" }
        {
            @if let Some(image) = &hero.image {
                img class="hero-image" src=(image) alt="" aria-hidden="true";
            }
            @if !hero.glows.is_empty() {
                div class="hero-glow" data-anim=(glow_target) style=(glow_style) {}
            }
            div class="hero-content" {
                (render_headline(index, &hero.headline, styles))
                p class="hero-body" data-anim=(target::body(index)) style=[style(&target::body(index))] {
                    (hero.body)
                }
                form
                    class="hero-form"
                    data-anim=(target::form(index))
                    style=[style(&target::form(index))]
                    onsubmit="return false"
                {
                    input class="email-input" type="email" name="email" placeholder=(hero.email_placeholder);
                    button type="submit" class="cta" data-action="cta" data-hero=(index) {
                        span class="cta-label cta-primary" data-anim=(target::cta_primary(index)) style=(primary.style()) {
                            (hero.cta)
                        }
                        span
                            class="cta-label cta-secondary"
                            data-anim=(target::cta_secondary(index))
                            aria-hidden="true"
                            style=(secondary.style())
                        {
                            (hero.cta)
                        }
                    }
                }
            }
        }
    }
}

fn render_headline(index: usize, headline: &Headline, styles: &Styles) -> Markup {
    let style = |name: &str| styles.get(name).map(String::as_str);
    let whole = headline.split == SplitMode::None;
    let highlight = headline.highlight.as_ref();
    let gradient = highlight.map(|h| {
        let stops: Vec<String> = h.colors.iter().map(|c| c.to_hex()).collect();
        format!("background-image: linear-gradient(90deg, {});", stops.join(", "))
    });
    let headline_target = target::headline(index);
    let headline_style = if whole { style(&headline_target) } else { None };
    let spaced = headline.split == SplitMode::Words;

    html! {
        h1
            class="headline"
            data-anim=[whole.then_some(headline_target.as_str())]
            style=[headline_style]
        {
            @for (line, segments) in headline_segments(headline).iter().enumerate() {
                @let highlighted = highlight.is_some_and(|h| h.line == line);
                @let line_class = if highlighted { "headline-line highlight" } else { "headline-line" };
                span class=(line_class) style=[gradient.as_deref().filter(|_| highlighted)] {
                    @for (k, segment) in segments.iter().enumerate() {
                        @if spaced && k > 0 {
                            " "
                        }
                        @if whole || segment.is_space {
                            (segment.text)
                        } @else {
                            @let name = target::headline_segment(index, segment.index);
                            span class="split" data-anim=(name) style=[style(&name)] {
                                (segment.text)
                            }
                        }
                    }
                }
            }
        }
    }
}
