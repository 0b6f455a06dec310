//! Manifest types for the landing page.

use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use shadient_core::{Color, MarqueeConfig, RadialGlow, SplitMode};
use std::path::Path;

const BUILTIN: &str = include_str!("../assets/site.yaml");

/// Site manifest loaded from site.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub shadient: String,
    /// Document title
    pub title: String,
    /// Logo and wordmark
    pub brand: Brand,
    /// Header navigation
    pub header: HeaderContent,
    /// Hero sections, rendered in order
    pub heroes: Vec<HeroContent>,
    /// Logo marquee section
    pub trusted: TrustedContent,
}

/// Logo and wordmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Wordmark next to the logo
    pub name: String,
    /// Logo image path
    pub logo: String,
}

/// A plain link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Visible text
    pub label: String,
    /// Target URL
    #[serde(default = "default_href")]
    pub href: String,
}

fn default_href() -> String {
    "#".to_string()
}

/// Navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Visible text
    pub label: String,
    /// Target URL
    #[serde(default = "default_href")]
    pub href: String,
    /// Show a chevron marking a submenu
    #[serde(default)]
    pub submenu: bool,
}

/// Header navigation content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderContent {
    /// Navigation entries
    #[serde(default)]
    pub nav: Vec<NavItem>,
    /// Contact button
    pub contact: Link,
}

/// Which hero experiment a section renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroVariant {
    /// No entrance animation
    #[default]
    Static,
    /// Gradient sweep and staggered content entrance on mount
    Animated,
}

/// Highlighted headline line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Index into `lines`
    pub line: usize,
    /// Gradient stops applied to the text fill
    pub colors: Vec<Color>,
}

/// Hero headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    /// Lines, each rendered on its own row
    pub lines: Vec<String>,
    /// Line drawn with a gradient fill
    #[serde(default)]
    pub highlight: Option<Highlight>,
    /// How lines are split for staggered reveal
    #[serde(default)]
    pub split: SplitMode,
    /// Seconds between split segments
    #[serde(default = "default_stagger")]
    pub stagger: f64,
}

const fn default_stagger() -> f64 {
    0.05
}

/// Hero section content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    /// Experiment to render
    #[serde(default)]
    pub variant: HeroVariant,
    /// Section background color
    pub background: Color,
    /// Background image path
    #[serde(default)]
    pub image: Option<String>,
    /// Headline
    pub headline: Headline,
    /// Paragraph under the headline
    pub body: String,
    /// Email input placeholder
    #[serde(default = "default_placeholder")]
    pub email_placeholder: String,
    /// Call-to-action label
    pub cta: String,
    /// Glows layered over the background
    #[serde(default)]
    pub glows: Vec<RadialGlow>,
}

fn default_placeholder() -> String {
    "Email".to_string()
}

/// Company shown in the marquee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company name
    pub name: String,
    /// Glyph shown before the name
    pub logo: String,
}

/// Logo marquee section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustedContent {
    /// Section heading
    pub heading: String,
    /// Copy next to the heading
    #[serde(default)]
    pub body: String,
    /// Companies, each shown once per marquee copy
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Loop durations
    #[serde(default)]
    pub marquee: MarqueeConfig,
}

impl Manifest {
    /// Parse and validate a manifest from YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, ContentError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading manifest");
        Self::from_yaml(&yaml)
    }

    /// The manifest compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled asset has been edited into an
    /// invalid state.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ContentError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ContentError> {
        if !self.shadient.starts_with("0.") {
            return Err(ContentError::Version(self.shadient.clone()));
        }
        if self.brand.name.trim().is_empty() {
            return Err(ContentError::MissingField("brand.name".to_string()));
        }
        if self.heroes.is_empty() {
            return Err(ContentError::MissingField("heroes".to_string()));
        }
        for (i, hero) in self.heroes.iter().enumerate() {
            validate_hero(i, hero)?;
        }
        validate_duration("trusted.marquee.top_duration", self.trusted.marquee.top_duration)?;
        validate_duration(
            "trusted.marquee.bottom_duration",
            self.trusted.marquee.bottom_duration,
        )?;
        if self.trusted.companies.is_empty() {
            tracing::warn!("trusted.companies is empty; the marquee will not scroll");
        }
        Ok(())
    }
}

fn validate_hero(index: usize, hero: &HeroContent) -> Result<(), ContentError> {
    let field = |name: &str| format!("heroes[{index}].{name}");
    let headline = &hero.headline;
    if headline.lines.iter().all(|l| l.trim().is_empty()) {
        return Err(ContentError::MissingField(field("headline.lines")));
    }
    if let Some(highlight) = &headline.highlight {
        if highlight.line >= headline.lines.len() {
            return Err(ContentError::invalid(
                field("headline.highlight.line"),
                format!(
                    "line {} out of range for {} lines",
                    highlight.line,
                    headline.lines.len()
                ),
            ));
        }
        if highlight.colors.len() < 2 {
            return Err(ContentError::invalid(
                field("headline.highlight.colors"),
                "a gradient needs at least two colors",
            ));
        }
    }
    if !(headline.stagger.is_finite() && headline.stagger >= 0.0) {
        return Err(ContentError::invalid(
            field("headline.stagger"),
            "must be zero or positive",
        ));
    }
    if hero.cta.trim().is_empty() {
        return Err(ContentError::MissingField(field("cta")));
    }
    Ok(())
}

fn validate_duration(field: &str, value: f64) -> Result<(), ContentError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ContentError::invalid(field, "must be a positive number of seconds"))
    }
}
