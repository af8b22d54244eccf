use serde::Deserialize;

use crate::logging::LogLevel;

pub const DEFAULT_SCROLL_DURATION_SECONDS: f64 = 1.2;
pub const DEFAULT_WHEEL_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_TOUCH_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_SMOOTH_TOUCH: bool = false;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SCROLL_DURATION_SECONDS_BOUNDS: (f64, f64) = (0.1, 5.0);
const WHEEL_MULTIPLIER_BOUNDS: (f64, f64) = (0.1, 10.0);
const TOUCH_MULTIPLIER_BOUNDS: (f64, f64) = (0.1, 10.0);

pub const CONFIG_SCRIPT_ID: &str = "motion-config";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSettings {
    pub duration_seconds: f64,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
    pub smooth_touch: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_SCROLL_DURATION_SECONDS,
            wheel_multiplier: DEFAULT_WHEEL_MULTIPLIER,
            touch_multiplier: DEFAULT_TOUCH_MULTIPLIER,
            smooth_touch: DEFAULT_SMOOTH_TOUCH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    pub scroll: ScrollSettings,
    pub log_level: LogLevel,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollSettings::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Optional JSON block embedded in the page. Every field may be omitted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EmbeddedConfig {
    scroll_duration: Option<f64>,
    wheel_multiplier: Option<f64>,
    touch_multiplier: Option<f64>,
    smooth_touch: Option<bool>,
    log_level: Option<String>,
}

impl MotionConfig {
    /// Builds the runtime configuration from `data-*` attribute lookups and an
    /// optional embedded JSON document. Attributes take precedence over JSON;
    /// invalid or out-of-range values fall back to the defaults.
    pub fn resolve(
        attribute: impl Fn(&str) -> Option<String>,
        embedded_json: Option<&str>,
    ) -> Self {
        let embedded = embedded_json
            .and_then(|raw| serde_json::from_str::<EmbeddedConfig>(raw).ok())
            .unwrap_or_default();

        let duration_seconds = parse_f64_with_bounds(
            attribute("scroll-duration")
                .or_else(|| embedded.scroll_duration.map(|value| value.to_string())),
            DEFAULT_SCROLL_DURATION_SECONDS,
            SCROLL_DURATION_SECONDS_BOUNDS,
        );
        let wheel_multiplier = parse_f64_with_bounds(
            attribute("wheel-multiplier")
                .or_else(|| embedded.wheel_multiplier.map(|value| value.to_string())),
            DEFAULT_WHEEL_MULTIPLIER,
            WHEEL_MULTIPLIER_BOUNDS,
        );
        let touch_multiplier = parse_f64_with_bounds(
            attribute("touch-multiplier")
                .or_else(|| embedded.touch_multiplier.map(|value| value.to_string())),
            DEFAULT_TOUCH_MULTIPLIER,
            TOUCH_MULTIPLIER_BOUNDS,
        );
        let smooth_touch = attribute("smooth-touch")
            .and_then(|value| parse_bool(&value))
            .or(embedded.smooth_touch)
            .unwrap_or(DEFAULT_SMOOTH_TOUCH);
        let log_level = attribute("log-level")
            .or(embedded.log_level)
            .and_then(|value| LogLevel::from_str(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            scroll: ScrollSettings {
                duration_seconds,
                wheel_multiplier,
                touch_multiplier,
                smooth_touch,
            },
            log_level,
        }
    }
}

fn parse_f64_with_bounds(value: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_everything_yields_defaults() {
        let config = MotionConfig::resolve(lookup(&[]), None);
        assert_eq!(config, MotionConfig::default());
        assert_eq!(config.scroll.duration_seconds, 1.2);
        assert!(!config.scroll.smooth_touch);
    }

    #[test]
    fn attributes_are_parsed_and_trimmed() {
        let config = MotionConfig::resolve(
            lookup(&[
                ("scroll-duration", " 0.8 "),
                ("wheel-multiplier", "1.5"),
                ("smooth-touch", "TRUE"),
                ("log-level", "debug"),
            ]),
            None,
        );
        assert_eq!(config.scroll.duration_seconds, 0.8);
        assert_eq!(config.scroll.wheel_multiplier, 1.5);
        assert_eq!(config.scroll.touch_multiplier, DEFAULT_TOUCH_MULTIPLIER);
        assert!(config.scroll.smooth_touch);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_and_malformed_values_fall_back() {
        let config = MotionConfig::resolve(
            lookup(&[
                ("scroll-duration", "60"),
                ("wheel-multiplier", "fast"),
                ("log-level", "verbose"),
            ]),
            None,
        );
        assert_eq!(config.scroll.duration_seconds, DEFAULT_SCROLL_DURATION_SECONDS);
        assert_eq!(config.scroll.wheel_multiplier, DEFAULT_WHEEL_MULTIPLIER);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn embedded_json_fills_gaps_but_attributes_win() {
        let json = r#"{"scrollDuration": 2.0, "touchMultiplier": 3.0, "logLevel": "warn"}"#;
        let config = MotionConfig::resolve(lookup(&[("scroll-duration", "0.5")]), Some(json));
        assert_eq!(config.scroll.duration_seconds, 0.5);
        assert_eq!(config.scroll.touch_multiplier, 3.0);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn broken_embedded_json_is_ignored() {
        let config = MotionConfig::resolve(lookup(&[]), Some("{not json"));
        assert_eq!(config, MotionConfig::default());
    }
}
