//! Viewport-threshold detection for scroll-driven effects.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
}

/// A line on the element matched against a line on the viewport, written
/// `"top 80%"`: the trigger edge is crossed when the element's top reaches
/// 80% of the viewport height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub anchor: Anchor,
    pub viewport_fraction: f64,
}

impl Edge {
    pub fn parse(value: &str) -> Result<Self, &'static str> {
        let mut parts = value.split_whitespace();
        let anchor = match parts.next() {
            Some("top") => Anchor::Top,
            Some("center") => Anchor::Center,
            Some("bottom") => Anchor::Bottom,
            _ => return Err("edge must start with top, center or bottom"),
        };

        let viewport = parts.next().ok_or("edge needs a viewport position")?;
        if parts.next().is_some() {
            return Err("edge has trailing tokens");
        }

        let viewport_fraction = match viewport {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            percent => {
                let number = percent
                    .strip_suffix('%')
                    .ok_or("viewport position must be a percentage")?;
                number
                    .parse::<f64>()
                    .map_err(|_| "viewport percentage is not a number")?
                    / 100.0
            }
        };

        Ok(Self {
            anchor,
            viewport_fraction,
        })
    }

    fn element_line(&self, rect: ElementRect) -> f64 {
        match self.anchor {
            Anchor::Top => rect.top,
            Anchor::Center => (rect.top + rect.bottom) / 2.0,
            Anchor::Bottom => rect.bottom,
        }
    }

    fn passed(&self, rect: ElementRect, viewport_height: f64) -> bool {
        self.element_line(rect) <= viewport_height * self.viewport_fraction
    }
}

/// Element bounds relative to the top of the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Reverse,
    None,
}

/// Actions for `onEnter onLeave onEnterBack onLeaveBack`, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    pub fn parse(value: &str) -> Result<Self, &'static str> {
        let actions = value
            .split_whitespace()
            .map(|token| match token {
                "play" => Ok(ToggleAction::Play),
                "reverse" => Ok(ToggleAction::Reverse),
                "none" => Ok(ToggleAction::None),
                _ => Err("unsupported toggle action"),
            })
            .collect::<Result<Vec<_>, _>>()?;

        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err("toggle actions need exactly four entries"),
        }
    }

    pub fn action_for(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    start: Edge,
    end: Edge,
    zone: Zone,
}

impl ScrollTrigger {
    /// Without an explicit end the trigger stays active until the element's
    /// bottom leaves through the top of the viewport.
    pub fn new(start: Edge, end: Option<Edge>) -> Self {
        Self {
            start,
            end: end.unwrap_or(Edge {
                anchor: Anchor::Bottom,
                viewport_fraction: 0.0,
            }),
            zone: Zone::Before,
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Re-evaluates the element position and reports every edge crossed since
    /// the previous update, in scroll order.
    pub fn update(&mut self, rect: ElementRect, viewport_height: f64) -> Vec<TriggerEvent> {
        let next = if !self.start.passed(rect, viewport_height) {
            Zone::Before
        } else if !self.end.passed(rect, viewport_height) {
            Zone::Active
        } else {
            Zone::After
        };

        let events = match (self.zone, next) {
            (Zone::Before, Zone::Active) => vec![TriggerEvent::Enter],
            (Zone::Before, Zone::After) => vec![TriggerEvent::Enter, TriggerEvent::Leave],
            (Zone::Active, Zone::After) => vec![TriggerEvent::Leave],
            (Zone::After, Zone::Active) => vec![TriggerEvent::EnterBack],
            (Zone::After, Zone::Before) => vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack],
            (Zone::Active, Zone::Before) => vec![TriggerEvent::LeaveBack],
            _ => Vec::new(),
        };

        self.zone = next;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: f64 = 1_000.0;

    fn rect(top: f64, height: f64) -> ElementRect {
        ElementRect {
            top,
            bottom: top + height,
        }
    }

    fn big_text_trigger() -> ScrollTrigger {
        ScrollTrigger::new(
            Edge::parse("top 80%").expect("start"),
            Some(Edge::parse("bottom 20%").expect("end")),
        )
    }

    #[test]
    fn parses_edges() {
        assert_eq!(
            Edge::parse("top 80%"),
            Ok(Edge {
                anchor: Anchor::Top,
                viewport_fraction: 0.8
            })
        );
        assert_eq!(Edge::parse("bottom 50%").map(|edge| edge.anchor), Ok(Anchor::Bottom));
        assert_eq!(Edge::parse("center center").map(|edge| edge.viewport_fraction), Ok(0.5));
        assert!(Edge::parse("middle 20%").is_err());
        assert!(Edge::parse("top").is_err());
        assert!(Edge::parse("top 20").is_err());
        assert!(Edge::parse("top 20% extra").is_err());
    }

    #[test]
    fn parses_toggle_actions() {
        let actions = ToggleActions::parse("play none none reverse").expect("valid");
        assert_eq!(actions.action_for(TriggerEvent::Enter), ToggleAction::Play);
        assert_eq!(actions.action_for(TriggerEvent::Leave), ToggleAction::None);
        assert_eq!(actions.action_for(TriggerEvent::EnterBack), ToggleAction::None);
        assert_eq!(actions.action_for(TriggerEvent::LeaveBack), ToggleAction::Reverse);
        assert!(ToggleActions::parse("play none").is_err());
        assert!(ToggleActions::parse("play none none explode").is_err());
    }

    #[test]
    fn scrolling_down_then_up_fires_all_four_edges() {
        let mut trigger = big_text_trigger();

        assert!(trigger.update(rect(900.0, 300.0), VIEWPORT).is_empty());
        assert_eq!(trigger.update(rect(790.0, 300.0), VIEWPORT), vec![TriggerEvent::Enter]);
        assert!(trigger.update(rect(400.0, 300.0), VIEWPORT).is_empty());
        assert_eq!(trigger.update(rect(-110.0, 300.0), VIEWPORT), vec![TriggerEvent::Leave]);

        assert_eq!(trigger.update(rect(0.0, 300.0), VIEWPORT), vec![TriggerEvent::EnterBack]);
        assert_eq!(trigger.update(rect(850.0, 300.0), VIEWPORT), vec![TriggerEvent::LeaveBack]);
        assert_eq!(trigger.zone(), Zone::Before);
    }

    #[test]
    fn jumping_past_the_whole_range_reports_both_edges() {
        let mut trigger = big_text_trigger();
        assert_eq!(
            trigger.update(rect(-2_000.0, 300.0), VIEWPORT),
            vec![TriggerEvent::Enter, TriggerEvent::Leave]
        );
        assert_eq!(
            trigger.update(rect(2_000.0, 300.0), VIEWPORT),
            vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
        );
    }

    #[test]
    fn element_already_in_view_on_load_enters_immediately() {
        let mut trigger = ScrollTrigger::new(Edge::parse("top 75%").expect("start"), None);
        assert_eq!(trigger.update(rect(100.0, 600.0), VIEWPORT), vec![TriggerEvent::Enter]);
        assert_eq!(trigger.update(rect(-700.0, 600.0), VIEWPORT), vec![TriggerEvent::Leave]);
    }

    #[test]
    fn midpoint_section_trigger_for_background_swaps() {
        let mut section = ScrollTrigger::new(
            Edge::parse("top 50%").expect("start"),
            Some(Edge::parse("bottom 50%").expect("end")),
        );
        assert!(section.update(rect(600.0, 800.0), VIEWPORT).is_empty());
        assert_eq!(section.update(rect(500.0, 800.0), VIEWPORT), vec![TriggerEvent::Enter]);
        assert_eq!(section.update(rect(-300.0, 800.0), VIEWPORT), vec![TriggerEvent::Leave]);
        assert_eq!(section.update(rect(-200.0, 800.0), VIEWPORT), vec![TriggerEvent::EnterBack]);
        assert_eq!(section.update(rect(501.0, 800.0), VIEWPORT), vec![TriggerEvent::LeaveBack]);
    }
}
