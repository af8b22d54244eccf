use crate::easing::Ease;
use crate::tween::{Property, TweenSpec};

pub const ACTIVE_CLASS: &str = "active";
const LINK_REVEAL_STAGGER: f64 = 0.1;
const LINK_HIDE_STAGGER: f64 = 0.05;

const OPEN_EFFECTS: &[MenuEffect] = &[MenuEffect::RevealLinks, MenuEffect::PauseScroll];
const CLOSE_EFFECTS: &[MenuEffect] = &[MenuEffect::HideLinks, MenuEffect::ResumeScroll];
const LINK_CLOSE_EFFECTS: &[MenuEffect] = &[MenuEffect::ResumeScroll];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Side effects the DOM layer performs after a menu transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEffect {
    RevealLinks,
    HideLinks,
    PauseScroll,
    ResumeScroll,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Class shared by the toggle control and the overlay.
    pub fn active_class(self) -> Option<&'static str> {
        self.is_open().then_some(ACTIVE_CLASS)
    }

    pub fn toggled(self) -> (Self, &'static [MenuEffect]) {
        match self {
            Self::Closed => (Self::Open, OPEN_EFFECTS),
            Self::Open => (Self::Closed, CLOSE_EFFECTS),
        }
    }

    /// Following a link closes the menu straight away; the links are not
    /// animated out.
    pub fn link_clicked(self) -> (Self, &'static [MenuEffect]) {
        (Self::Closed, LINK_CLOSE_EFFECTS)
    }
}

/// Staggered per-link specs for the reveal and hide animations.
pub fn link_tweens(effect: MenuEffect, link_count: usize) -> Vec<TweenSpec> {
    match effect {
        MenuEffect::RevealLinks => TweenSpec::new(0.5)
            .to(Property::Y, 0.0)
            .to(Property::Opacity, 1.0)
            .ease(Ease::Power3Out)
            .delay(0.2)
            .staggered(link_count, LINK_REVEAL_STAGGER),
        MenuEffect::HideLinks => TweenSpec::new(0.3)
            .to(Property::Y, 20.0)
            .to(Property::Opacity, 0.0)
            .ease(Ease::Power3In)
            .staggered(link_count, LINK_HIDE_STAGGER),
        MenuEffect::PauseScroll | MenuEffect::ResumeScroll => Vec::new(),
    }
}
