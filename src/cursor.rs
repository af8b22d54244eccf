use crate::tween::{Property, Rgba, TweenSpec};

pub const FINE_POINTER_QUERY: &str = "(hover: hover) and (pointer: fine)";
pub const HOVER_TARGETS: &str = "a, button, .course-card";
pub const ACCENT_COLOR_VAR: &str = "--accent-color";
pub const TEXT_COLOR_VAR: &str = "--text-color";

const MARKER_FOLLOW_SECONDS: f64 = 0.1;
const FOLLOWER_FOLLOW_SECONDS: f64 = 0.5;
const HOVER_SECONDS: f64 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHover {
    #[default]
    Idle,
    Hovering,
}

/// Tweens for the small marker and the trailing follower.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorTweens {
    pub marker: TweenSpec,
    pub follower: TweenSpec,
}

/// Both markers chase the pointer; the follower lags behind.
pub fn follow(client_x: f64, client_y: f64) -> CursorTweens {
    CursorTweens {
        marker: TweenSpec::new(MARKER_FOLLOW_SECONDS)
            .to(Property::X, client_x)
            .to(Property::Y, client_y),
        follower: TweenSpec::new(FOLLOWER_FOLLOW_SECONDS)
            .to(Property::X, client_x)
            .to(Property::Y, client_y),
    }
}

impl CursorHover {
    /// `border` is the resolved color for this state: the accent color while
    /// hovering, the text color otherwise.
    pub fn tweens(self, border: Option<Rgba>) -> CursorTweens {
        let (marker_scale, follower_scale) = match self {
            Self::Idle => (1.0, 1.0),
            Self::Hovering => (0.0, 2.0),
        };

        let mut follower = TweenSpec::new(HOVER_SECONDS).to(Property::Scale, follower_scale);
        if let Some(border) = border {
            follower = follower.to(Property::BorderColor, border);
        }

        CursorTweens {
            marker: TweenSpec::new(HOVER_SECONDS).to(Property::Scale, marker_scale),
            follower,
        }
    }

    pub fn border_var(self) -> &'static str {
        match self {
            Self::Idle => TEXT_COLOR_VAR,
            Self::Hovering => ACCENT_COLOR_VAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::Value;

    fn scale_of(spec: &TweenSpec) -> Option<Value> {
        spec.to
            .iter()
            .find(|(property, _)| *property == Property::Scale)
            .map(|(_, value)| *value)
    }

    #[test]
    fn follower_trails_the_marker() {
        let tweens = follow(120.0, 48.0);
        assert!(tweens.follower.duration > tweens.marker.duration);
        assert!(tweens.marker.to.contains(&(Property::X, Value::Number(120.0))));
        assert!(tweens.follower.to.contains(&(Property::Y, Value::Number(48.0))));
    }

    #[test]
    fn hover_shrinks_marker_and_grows_follower() {
        let accent = Rgba::parse("#ff5a36").expect("hex");
        let tweens = CursorHover::Hovering.tweens(Some(accent));
        assert_eq!(scale_of(&tweens.marker), Some(Value::Number(0.0)));
        assert_eq!(scale_of(&tweens.follower), Some(Value::Number(2.0)));
        assert!(tweens
            .follower
            .to
            .contains(&(Property::BorderColor, Value::Color(accent))));
        assert_eq!(CursorHover::Hovering.border_var(), "--accent-color");
    }

    #[test]
    fn leaving_restores_scale_and_skips_unknown_colors() {
        let tweens = CursorHover::Idle.tweens(None);
        assert_eq!(scale_of(&tweens.marker), Some(Value::Number(1.0)));
        assert_eq!(scale_of(&tweens.follower), Some(Value::Number(1.0)));
        assert_eq!(tweens.follower.to.len(), 1);
    }
}
