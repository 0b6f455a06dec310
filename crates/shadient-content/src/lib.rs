//! YAML site manifest for the Shadient landing page.
//!
//! All marketing copy, navigation links, company logos and marquee timing live
//! in a `site.yaml` manifest. A default manifest is compiled in and returned by
//! [`Manifest::builtin`].

mod error;
mod manifest;

pub use error::ContentError;
pub use manifest::{
    Brand, Company, HeaderContent, Headline, HeroContent, HeroVariant, Highlight, Link, Manifest,
    NavItem, TrustedContent,
};
