//! Presets for the scroll-driven reveals, background swaps and the intro
//! sequence.

use crate::easing::Ease;
use crate::scroll_trigger::{Anchor, Edge, ScrollTrigger, ToggleActions, TriggerEvent};
use crate::tween::{Position, Property, Rgba, Timeline, TweenSpec, Value};

pub const REVEAL_TOGGLE_ACTIONS: &str = "play none none reverse";
const BACKGROUND_SWAP_SECONDS: f64 = 0.5;

/// A reveal that renders its `from` state on registration and then plays or
/// reverses as its trigger is crossed.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealPreset {
    pub start: &'static str,
    pub end: Option<&'static str>,
    pub toggle_actions: &'static str,
    pub spec: TweenSpec,
    pub stagger: f64,
}

impl RevealPreset {
    pub fn trigger(&self) -> Result<ScrollTrigger, &'static str> {
        let start = Edge::parse(self.start)?;
        let end = self.end.map(Edge::parse).transpose()?;
        Ok(ScrollTrigger::new(start, end))
    }

    pub fn actions(&self) -> Result<ToggleActions, &'static str> {
        ToggleActions::parse(self.toggle_actions)
    }

    pub fn specs(&self, count: usize) -> Vec<TweenSpec> {
        self.spec.staggered(count, self.stagger)
    }
}

pub fn big_text() -> RevealPreset {
    RevealPreset {
        start: "top 80%",
        end: Some("bottom 20%"),
        toggle_actions: REVEAL_TOGGLE_ACTIONS,
        spec: TweenSpec::new(1.0)
            .from(Property::Y, 50.0)
            .from(Property::Opacity, 0.0)
            .ease(Ease::Power3Out),
        stagger: 0.0,
    }
}

/// One batch for the whole card grid, triggered by the grid container.
pub fn course_cards() -> RevealPreset {
    RevealPreset {
        start: "top 75%",
        end: None,
        toggle_actions: REVEAL_TOGGLE_ACTIONS,
        spec: TweenSpec::new(1.0)
            .from(Property::Y, 100.0)
            .from(Property::Opacity, 0.0)
            .ease(Ease::Power3Out),
        stagger: 0.2,
    }
}

/// Section midpoint crossing the viewport midpoint, in either direction.
pub fn background_trigger() -> ScrollTrigger {
    ScrollTrigger::new(
        Edge {
            anchor: Anchor::Top,
            viewport_fraction: 0.5,
        },
        Some(Edge {
            anchor: Anchor::Bottom,
            viewport_fraction: 0.5,
        }),
    )
}

/// Entering a section scrolling down and leaving it back upward both put
/// its color on the page. `Leave` and `EnterBack` are left to the
/// neighbouring sections.
pub fn swaps_background(event: TriggerEvent) -> bool {
    matches!(event, TriggerEvent::Enter | TriggerEvent::LeaveBack)
}

pub fn background_tween(color: Rgba) -> TweenSpec {
    TweenSpec::new(BACKGROUND_SWAP_SECONDS).to(Property::BackgroundColor, color)
}

/// One step of the intro sequence, applied to every element that matches
/// `selector`.
#[derive(Clone, Debug, PartialEq)]
pub struct IntroStep {
    pub selector: &'static str,
    pub initial: Vec<(Property, Value)>,
    pub spec: TweenSpec,
    pub stagger: f64,
    pub position: Position,
}

pub fn hero_intro() -> Vec<IntroStep> {
    vec![
        IntroStep {
            selector: ".hero-title span",
            initial: vec![
                (Property::Y, Value::Number(80.0)),
                (Property::Opacity, Value::Number(0.0)),
            ],
            spec: TweenSpec::new(1.2)
                .to(Property::Y, 0.0)
                .to(Property::Opacity, 1.0)
                .ease(Ease::Power4Out)
                .delay(0.5),
            stagger: 0.2,
            position: Position::Append,
        },
        IntroStep {
            selector: ".hero-subtitle",
            initial: vec![(Property::Opacity, Value::Number(0.0))],
            spec: TweenSpec::new(1.0).to(Property::Opacity, 1.0).ease(Ease::Power2Out),
            stagger: 0.0,
            position: Position::Relative(-0.5),
        },
        IntroStep {
            selector: ".hero-cta",
            initial: vec![
                (Property::Y, Value::Number(20.0)),
                (Property::Opacity, Value::Number(0.0)),
            ],
            spec: TweenSpec::new(1.0)
                .to(Property::Y, 0.0)
                .to(Property::Opacity, 1.0)
                .ease(Ease::Power2Out),
            stagger: 0.0,
            position: Position::Relative(-0.8),
        },
    ]
}

/// Lays the steps out on a timeline and returns, per step, one spec per
/// matched element with its absolute start folded into the delay. Steps that
/// matched nothing still occupy their slot.
pub fn schedule(steps: &[IntroStep], counts: &[usize]) -> Vec<Vec<TweenSpec>> {
    let mut timeline = Timeline::new();

    steps
        .iter()
        .zip(counts.iter().copied())
        .map(|(step, count)| {
            let span = step.spec.batch_span(count.max(1), step.stagger);
            let start = timeline.place(span, step.position);
            step.spec
                .staggered(count, step.stagger)
                .into_iter()
                .map(|mut spec| {
                    spec.delay += start;
                    spec
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_trigger::{ElementRect, ToggleAction};

    #[test]
    fn reveal_presets_build_their_triggers() {
        for preset in [big_text(), course_cards()] {
            assert!(preset.trigger().is_ok());
            let actions = preset.actions().expect("valid toggle actions");
            assert_eq!(actions.action_for(TriggerEvent::Enter), ToggleAction::Play);
            assert_eq!(actions.action_for(TriggerEvent::LeaveBack), ToggleAction::Reverse);
            assert_eq!(actions.action_for(TriggerEvent::Leave), ToggleAction::None);
        }
    }

    #[test]
    fn card_batch_is_staggered() {
        let specs = course_cards().specs(3);
        assert!((specs[2].delay - 0.4).abs() < 1e-9);
        assert_eq!(big_text().specs(1)[0].delay, 0.0);
    }

    #[test]
    fn background_trigger_uses_viewport_midpoint() {
        let mut trigger = background_trigger();
        let section = |top: f64| ElementRect {
            top,
            bottom: top + 400.0,
        };
        assert!(trigger.update(section(600.0), 1_000.0).is_empty());
        assert_eq!(trigger.update(section(450.0), 1_000.0), vec![TriggerEvent::Enter]);
    }

    #[test]
    fn background_swaps_on_enter_and_leave_back_only() {
        assert!(swaps_background(TriggerEvent::Enter));
        assert!(swaps_background(TriggerEvent::LeaveBack));
        assert!(!swaps_background(TriggerEvent::Leave));
        assert!(!swaps_background(TriggerEvent::EnterBack));
    }

    #[test]
    fn scrolling_through_and_back_swaps_twice() {
        let mut trigger = background_trigger();
        let section = |top: f64| ElementRect {
            top,
            bottom: top + 400.0,
        };
        let swaps = |events: Vec<TriggerEvent>| -> usize {
            events.into_iter().filter(|event| swaps_background(*event)).count()
        };

        assert_eq!(swaps(trigger.update(section(600.0), 1_000.0)), 0);
        // down into the section, then out past its bottom
        assert_eq!(swaps(trigger.update(section(300.0), 1_000.0)), 1);
        assert_eq!(swaps(trigger.update(section(0.0), 1_000.0)), 0);
        // back up into it, then above its top again
        assert_eq!(swaps(trigger.update(section(300.0), 1_000.0)), 0);
        assert_eq!(swaps(trigger.update(section(600.0), 1_000.0)), 1);
    }

    #[test]
    fn intro_sequence_overlaps_steps() {
        let steps = hero_intro();
        let scheduled = schedule(&steps, &[3, 1, 1]);

        let title_delays: Vec<f64> = scheduled[0].iter().map(|spec| spec.delay).collect();
        assert_eq!(title_delays.len(), 3);
        assert!((title_delays[0] - 0.5).abs() < 1e-9);
        assert!((title_delays[2] - 0.9).abs() < 1e-9);

        // title span ends at 2.1, subtitle starts 0.5 earlier, cta 0.8 before
        // the subtitle finishes.
        assert!((scheduled[1][0].delay - 1.6).abs() < 1e-9);
        assert!((scheduled[2][0].delay - 1.8).abs() < 1e-9);
    }

    #[test]
    fn missing_elements_keep_the_timeline_shape() {
        let scheduled = schedule(&hero_intro(), &[0, 1, 1]);
        assert!(scheduled[0].is_empty());
        assert!((scheduled[1][0].delay - 1.2).abs() < 1e-9);
    }
}
