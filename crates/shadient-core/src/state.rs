//! UI state for the landing page.
//!
//! This module follows the Elm Architecture: `State + Message → (State, Command)`.
//! The page never mutates DOM nodes from event handlers. Handlers turn input
//! into a message, the state applies it, and the returned [`Command`] tells the
//! runtime which animations to play or what to tear down.
//!
//! # Examples
//!
//! ```
//! use shadient_core::{Command, Cue, MenuEvent, MenuState, PageMessage, PageState, State};
//!
//! let mut page = PageState::new(2);
//! let cmd = page.update(PageMessage::Menu(MenuEvent::Toggle));
//! assert_eq!(page.menu, MenuState::Open);
//! assert_eq!(
//!     cmd.flatten(),
//!     vec![Command::RenderHeader, Command::Play(Cue::MenuDropdown)]
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Application state trait.
///
/// Implements the Elm Architecture: State + Message → (State, Command)
pub trait State: Clone {
    /// Message type for state updates
    type Message;

    /// Update state in response to a message.
    ///
    /// Returns a command for side effects the runtime must perform.
    fn update(&mut self, msg: Self::Message) -> Command;
}

/// An animation the runtime knows how to build and play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Header drops in from above
    HeaderEntrance,
    /// Mobile dropdown drops in after opening
    MenuDropdown,
    /// Entrance of the hero section at this index
    HeroEntrance(usize),
    /// Call-to-action label swap
    CtaSwap {
        /// Hero section index
        hero: usize,
        /// The secondary label was already showing
        replay: bool,
    },
}

impl Cue {
    /// Stable name used to key running animations.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::HeaderEntrance => "header-entrance".to_string(),
            Self::MenuDropdown => "menu-dropdown".to_string(),
            Self::HeroEntrance(i) => format!("hero-{i}-entrance"),
            Self::CtaSwap { hero, .. } => format!("hero-{hero}-cta"),
        }
    }
}

/// Side effects requested by a state update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Command {
    /// No command
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Command>),
    /// Start (or restart) an animation
    Play(Cue),
    /// Re-render the header from the current state
    RenderHeader,
    /// Measure the marquee rows and start looping
    StartMarquee,
    /// Cancel every running animation and frame callback
    Teardown,
}

impl Command {
    /// Create a batch of commands.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        Self::Batch(commands.into_iter().collect())
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten nested batches into a list of leaf commands.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

/// Visibility of the mobile navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuState {
    /// Hamburger icon shown, dropdown hidden
    #[default]
    Closed,
    /// Cross icon shown, dropdown visible
    Open,
}

/// Input affecting the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The menu button was clicked
    Toggle,
    /// A dropdown link was followed or the page scrolled away
    Dismiss,
}

impl MenuState {
    /// State after `event`.
    #[must_use]
    pub const fn transition(self, event: MenuEvent) -> Self {
        match (self, event) {
            (Self::Closed, MenuEvent::Toggle) => Self::Open,
            (Self::Open, MenuEvent::Toggle) | (_, MenuEvent::Dismiss) => Self::Closed,
        }
    }

    /// Whether the dropdown is visible.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Which label of a call-to-action button is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonFace {
    /// Primary label in place
    #[default]
    Resting,
    /// Secondary label slid in over the primary
    Swapped,
}

/// Messages understood by [`PageState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMessage {
    /// The page was inserted and laid out
    Mounted,
    /// Menu input
    Menu(MenuEvent),
    /// Pointer entered the call-to-action of the hero at this index
    CtaHovered(usize),
    /// The page is leaving
    Unmount,
}

/// Lifecycle of the page as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Rendered but not yet in the document
    #[default]
    Pending,
    /// Mounted and animating
    Live,
    /// Unmounted; messages are ignored
    Gone,
}

/// Complete interactive state of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Mobile menu
    pub menu: MenuState,
    /// Call-to-action face per hero section
    pub ctas: Vec<ButtonFace>,
    /// Page lifecycle
    pub phase: Phase,
}

impl PageState {
    /// State for a page with `hero_count` hero sections.
    #[must_use]
    pub fn new(hero_count: usize) -> Self {
        Self {
            menu: MenuState::Closed,
            ctas: vec![ButtonFace::Resting; hero_count],
            phase: Phase::Pending,
        }
    }

    /// Face of the call-to-action in hero `index`.
    #[must_use]
    pub fn cta(&self, index: usize) -> ButtonFace {
        self.ctas.get(index).copied().unwrap_or_default()
    }
}

impl State for PageState {
    type Message = PageMessage;

    fn update(&mut self, msg: Self::Message) -> Command {
        if self.phase == Phase::Gone {
            return Command::None;
        }
        match msg {
            PageMessage::Mounted => {
                if self.phase == Phase::Live {
                    return Command::None;
                }
                self.phase = Phase::Live;
                let mut cmds = vec![Command::Play(Cue::HeaderEntrance)];
                cmds.extend((0..self.ctas.len()).map(|i| Command::Play(Cue::HeroEntrance(i))));
                cmds.push(Command::StartMarquee);
                Command::batch(cmds)
            }
            PageMessage::Menu(event) => {
                let next = self.menu.transition(event);
                if next == self.menu {
                    return Command::None;
                }
                self.menu = next;
                if next.is_open() {
                    Command::batch([Command::RenderHeader, Command::Play(Cue::MenuDropdown)])
                } else {
                    Command::RenderHeader
                }
            }
            PageMessage::CtaHovered(index) => match self.ctas.get_mut(index) {
                Some(face) => {
                    let replay = *face == ButtonFace::Swapped;
                    *face = ButtonFace::Swapped;
                    Command::Play(Cue::CtaSwap {
                        hero: index,
                        replay,
                    })
                }
                None => Command::None,
            },
            PageMessage::Unmount => {
                self.phase = Phase::Gone;
                Command::Teardown
            }
        }
    }
}
