use crate::motion::target;
use maud::{html, Markup};
use shadient_content::Manifest;
use shadient_core::MenuState;

/// Id of the header element, replaced whole on every menu change.
pub const HEADER_ID: &str = "site-header";

/// Header markup for the given menu state.
///
/// The dropdown exists only while the menu is open.
#[must_use]
pub fn render_header(manifest: &Manifest, menu: MenuState, style: Option<&str>) -> Markup {
    let brand = &manifest.brand;
    let header = &manifest.header;
    let open = menu.is_open();
    html! {
        header id=(HEADER_ID) class="site-header" data-anim=(target::HEADER) style=[style] {
            div class="header-bar" {
                a class="brand" href="/" {
                    img class="brand-logo" src=(brand.logo) alt="" width="32" height="32";
                    span class="brand-name" { (brand.name) }
                }
                nav class="nav-desktop" aria-label="Main" {
                    @for item in &header.nav {
                        a class="nav-link" href=(item.href) {
                            (item.label)
                            @if item.submenu {
                                span class="chevron" aria-hidden="true" { "▾" }
                            }
                        }
                    }
                }
                a class="contact-button" href=(header.contact.href) { (header.contact.label) }
                button
                    type="button"
                    class="menu-toggle"
                    data-action="menu-toggle"
                    aria-expanded=(if open { "true" } else { "false" })
                    aria-label=(if open { "Close menu" } else { "Open menu" })
                {
                    @if open {
                        span class="bar bar-cross-a" {}
                        span class="bar bar-cross-b" {}
                    } @else {
                        span class="bar" {}
                        span class="bar" {}
                        span class="bar" {}
                    }
                }
            }
            @if open {
                nav class="menu-dropdown" data-anim=(target::MENU_DROPDOWN) aria-label="Mobile" {
                    @for item in &header.nav {
                        a class="dropdown-link" href=(item.href) data-action="menu-dismiss" {
                            (item.label)
                        }
                    }
                    a class="dropdown-contact" href=(header.contact.href) data-action="menu-dismiss" {
                        (header.contact.label)
                    }
                }
            }
        }
    }
}
