use crate::easing::Ease;
use crate::tween::{Display, Property, TweenSpec};

pub const FILTER_ALL: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    pub fn from_attribute(value: &str) -> Self {
        if value == FILTER_ALL {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Category(tag) => tag,
        }
    }

    /// Exact tag comparison; no case folding or partial matches.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(tag) => tag == category,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardVisibility {
    Shown,
    Hidden,
}

impl CardVisibility {
    pub fn tween(self) -> TweenSpec {
        match self {
            Self::Shown => TweenSpec::new(0.4)
                .to(Property::Scale, 1.0)
                .to(Property::Opacity, 1.0)
                .display(Display::Block)
                .ease(Ease::Power2Out),
            Self::Hidden => TweenSpec::new(0.3)
                .to(Property::Scale, 0.8)
                .to(Property::Opacity, 0.0)
                .display(Display::None)
                .ease(Ease::Power2In),
        }
    }
}

/// Filter buttons plus the cards they control. No button is active until
/// the first click, and every card starts visible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterGroup {
    buttons: Vec<Filter>,
    categories: Vec<String>,
    active: Option<usize>,
}

impl FilterGroup {
    pub fn new(buttons: Vec<Filter>, categories: Vec<String>) -> Self {
        Self {
            buttons,
            categories,
            active: None,
        }
    }

    pub fn buttons(&self) -> &[Filter] {
        &self.buttons
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_filter(&self) -> Option<&Filter> {
        self.active.and_then(|index| self.buttons.get(index))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn visibility(&self) -> Vec<CardVisibility> {
        let filter = self.active_filter().cloned().unwrap_or(Filter::All);
        self.categories
            .iter()
            .map(|category| {
                if filter.matches(category) {
                    CardVisibility::Shown
                } else {
                    CardVisibility::Hidden
                }
            })
            .collect()
    }

    /// Activates the button at `index` and returns the resulting visibility
    /// of every card, in card order. Out-of-range indices change nothing.
    pub fn select(&mut self, index: usize) -> Option<Vec<CardVisibility>> {
        if index >= self.buttons.len() {
            return None;
        }
        self.active = Some(index);
        Some(self.visibility())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tutorials() -> FilterGroup {
        FilterGroup::new(
            vec![
                Filter::from_attribute("all"),
                Filter::from_attribute("video"),
                Filter::from_attribute("article"),
            ],
            vec!["video".to_string(), "article".to_string(), "video".to_string()],
        )
    }

    #[test]
    fn initial_state_shows_everything_with_no_active_button() {
        let group = tutorials();
        assert_eq!(group.active(), None);
        assert!(group
            .visibility()
            .iter()
            .all(|visibility| *visibility == CardVisibility::Shown));
    }

    #[test]
    fn category_filter_shows_only_exact_matches() {
        let mut group = tutorials();
        let visibility = group.select(1).expect("valid button");
        assert_eq!(
            visibility,
            vec![CardVisibility::Shown, CardVisibility::Hidden, CardVisibility::Shown]
        );

        let visibility = group.select(0).expect("valid button");
        assert!(visibility.iter().all(|v| *v == CardVisibility::Shown));
    }

    #[test]
    fn exactly_one_button_is_active_after_each_click() {
        let mut group = tutorials();
        for index in [2, 0, 1, 1] {
            group.select(index);
            let active: Vec<usize> = (0..group.buttons().len())
                .filter(|candidate| group.is_active(*candidate))
                .collect();
            assert_eq!(active, vec![index]);
        }
    }

    #[test]
    fn unmatched_tag_hides_every_card() {
        let mut group = FilterGroup::new(
            vec![Filter::from_attribute("podcast")],
            vec!["video".to_string(), "article".to_string()],
        );
        let visibility = group.select(0).expect("valid button");
        assert!(visibility.iter().all(|v| *v == CardVisibility::Hidden));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!Filter::from_attribute("Video").matches("video"));
        assert_eq!(Filter::from_attribute("all"), Filter::All);
        assert_eq!(Filter::Category("video".into()).as_str(), "video");
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut group = tutorials();
        group.select(2);
        assert_eq!(group.select(9), None);
        assert_eq!(group.active(), Some(2));
    }

    #[test]
    fn hide_collapses_layout_and_show_restores_it() {
        assert_eq!(CardVisibility::Hidden.tween().display, Some(Display::None));
        assert_eq!(CardVisibility::Shown.tween().display, Some(Display::Block));
        assert_eq!(CardVisibility::Hidden.tween().duration, 0.3);
    }
}
