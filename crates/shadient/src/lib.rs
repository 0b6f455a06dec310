//! Shadient landing page.
//!
//! Renders the page to HTML from a [`Manifest`] and, on `wasm32`, runs it in the
//! browser: entrance animations, the mobile menu, call-to-action hovers and the
//! two-row logo marquee.
//!
//! ```
//! use shadient::{render_page, Manifest, PageState};
//!
//! let manifest = Manifest::builtin().unwrap();
//! let html = render_page(&manifest, &PageState::new(manifest.heroes.len())).into_string();
//! assert!(html.contains("data-marquee=\"top\""));
//! ```

pub mod motion;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use motion::{opening_styles, sequence_for, Stage, StyleWrite, Styles};
pub use render::{render_document, render_page, ROOT_ID};
pub use shadient_content::{ContentError, Manifest};
pub use shadient_core::{Command, PageMessage, PageState, State};
