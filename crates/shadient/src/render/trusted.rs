use maud::{html, Markup};
use shadient_content::{Company, TrustedContent};
use shadient_core::doubled;

/// `data-marquee` value of the row drifting left.
pub const TOP_ROW: &str = "top";
/// `data-marquee` value of the row drifting right.
pub const BOTTOM_ROW: &str = "bottom";

/// "Trusted by" section with two marquee rows.
///
/// Each row holds the company list twice so a shift by half its width lands on
/// an identical frame.
#[must_use]
pub fn render_trusted(trusted: &TrustedContent) -> Markup {
    let items = doubled(&trusted.companies);
    html! {
        section class="trusted" {
            div class="trusted-copy" {
                h2 class="trusted-heading" { (trusted.heading) }
                @if !trusted.body.is_empty() {
                    p class="trusted-body" { (trusted.body) }
                }
            }
            div class="marquee" {
                @for row in [TOP_ROW, BOTTOM_ROW] {
                    div class="marquee-window" {
                        div class="marquee-row" data-marquee=(row) {
                            @for company in &items {
                                (logo_card(company))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn logo_card(company: &Company) -> Markup {
    html! {
        div class="logo-card" {
            span class="logo-glyph" aria-hidden="true" { (company.logo) }
            span class="logo-name" { (company.name) }
        }
    }
}
