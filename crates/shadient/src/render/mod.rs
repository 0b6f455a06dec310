//! HTML rendering.
//!
//! Markup is a pure function of the manifest and the page state. The browser
//! runtime re-renders the header from here whenever the menu changes, and the
//! CLI writes whole documents with [`render_document`].

mod header;
mod hero;
mod trusted;

pub use header::{render_header, HEADER_ID};
pub use hero::render_hero;
pub use trusted::{render_trusted, BOTTOM_ROW, TOP_ROW};

use crate::motion::{opening_styles, target, Styles};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use shadient_content::Manifest;
use shadient_core::{PageState, Phase};

/// Id of the element the runtime mounts into.
pub const ROOT_ID: &str = "shadient-root";

/// Id of the script element carrying the manifest as JSON.
pub const MANIFEST_ID: &str = "shadient-manifest";

/// Page stylesheet.
pub const STYLESHEET: &str = include_str!("../../assets/shadient.css");

const BOOTSTRAP: &str = r"import init, { Page } from './pkg/shadient.js';
await init();
const page = new Page();
page.mount('shadient-root');
window.shadient = page;";

/// Page body: header, hero sections and the trusted section.
///
/// A pending page carries the opening pose of every mount animation so the
/// first paint matches the first frame.
#[must_use]
pub fn render_page(manifest: &Manifest, state: &PageState) -> Markup {
    let styles = if state.phase == Phase::Pending {
        opening_styles(manifest)
    } else {
        Styles::new()
    };
    html! {
        (render_header(manifest, state.menu, styles.get(target::HEADER).map(String::as_str)))
        main class="page" {
            @for (i, hero) in manifest.heroes.iter().enumerate() {
                (render_hero(i, hero, state.cta(i), &styles))
            }
            (render_trusted(&manifest.trusted))
        }
    }
}

/// Complete HTML document.
///
/// With `runtime` set the document embeds the manifest and loads the WASM
/// bundle from `./pkg/`; otherwise it is a static snapshot.
#[must_use]
pub fn render_document(manifest: &Manifest, state: &PageState, runtime: bool) -> Markup {
    tracing::debug!(title = %manifest.title, runtime, "rendering document");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (manifest.title) }
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                div id=(ROOT_ID) {
                    (render_page(manifest, state))
                }
                @if runtime {
                    script type="application/json" id=(MANIFEST_ID) {
                        (PreEscaped(manifest_json(manifest)))
                    }
                    script type="module" { (PreEscaped(BOOTSTRAP)) }
                }
            }
        }
    }
}

/// Manifest as JSON safe to inline in a `<script>` element.
#[must_use]
pub fn manifest_json(manifest: &Manifest) -> String {
    serde_json::to_string(manifest)
        .unwrap_or_default()
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadient_core::{MenuEvent, PageMessage, State};

    fn manifest() -> Manifest {
        Manifest::builtin().unwrap()
    }

    #[test]
    fn test_page_order() {
        let m = manifest();
        let html = render_page(&m, &PageState::new(m.heroes.len())).into_string();
        let header = html.find("id=\"site-header\"").unwrap();
        let static_hero = html.find("hero-static").unwrap();
        let animated_hero = html.find("hero-animated").unwrap();
        let trusted = html.find("class=\"trusted\"").unwrap();
        assert!(header < static_hero);
        assert!(static_hero < animated_hero);
        assert!(animated_hero < trusted);
    }

    #[test]
    fn test_dropdown_present_iff_open() {
        let m = manifest();
        let mut state = PageState::new(m.heroes.len());
        assert!(!render_page(&m, &state).into_string().contains("menu-dropdown"));
        state.update(PageMessage::Menu(MenuEvent::Toggle));
        assert!(render_page(&m, &state).into_string().contains("menu-dropdown"));
        state.update(PageMessage::Menu(MenuEvent::Dismiss));
        assert!(!render_page(&m, &state).into_string().contains("menu-dropdown"));
    }

    #[test]
    fn test_pending_page_starts_hidden_live_page_at_rest() {
        let m = manifest();
        let mut state = PageState::new(m.heroes.len());
        let pending = render_page(&m, &state).into_string();
        assert!(pending.contains("data-anim=\"header\" style=\"transform: translate(0px, -100px)"));

        state.update(PageMessage::Mounted);
        let live = render_page(&m, &state).into_string();
        assert!(!live.contains("translate(0px, -100px)"));
        assert!(!live.contains("circle at 50% 50%"));
    }

    #[test]
    fn test_document_with_runtime() {
        let m = manifest();
        let state = PageState::new(m.heroes.len());
        let html = render_document(&m, &state, true).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Shadient.co | Attract new leads</title>"));
        assert!(html.contains("id=\"shadient-root\""));
        assert!(html.contains("./pkg/shadient.js"));
        assert!(html.contains("id=\"shadient-manifest\""));

        let snapshot = render_document(&m, &state, false).into_string();
        assert!(!snapshot.contains("./pkg/shadient.js"));
    }

    #[test]
    fn test_manifest_json_is_script_safe() {
        let mut m = manifest();
        m.trusted.heading = "</script><b>".to_string();
        let json = manifest_json(&m);
        assert!(!json.contains("</script>"));
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.trusted.heading, "</script><b>");
    }
}
