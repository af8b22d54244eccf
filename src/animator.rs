//! Frame-driven tween runner.
//!
//! Targets are opaque ids handed out by [`Animator::register`]; the DOM layer
//! keeps the id → element mapping and renders [`TargetStyle`]s through a
//! [`StyleSink`].

use std::collections::{HashMap, HashSet};

use crate::easing::Ease;
use crate::tween::{Display, Property, Rgba, TweenSpec, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetStyle {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub background: Option<Rgba>,
    pub border: Option<Rgba>,
    pub display: Option<Display>,
    /// Set once a transform or opacity value has been written, so untouched
    /// elements keep their stylesheet values.
    pub transformed: bool,
    pub faded: bool,
}

impl Default for TargetStyle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            opacity: 1.0,
            background: None,
            border: None,
            display: None,
            transformed: false,
            faded: false,
        }
    }
}

impl TargetStyle {
    pub fn get(&self, property: Property) -> Value {
        match property {
            Property::X => Value::Number(self.x),
            Property::Y => Value::Number(self.y),
            Property::Scale => Value::Number(self.scale),
            Property::Opacity => Value::Number(self.opacity),
            Property::BackgroundColor => Value::Color(self.background.unwrap_or(Rgba::TRANSPARENT)),
            Property::BorderColor => Value::Color(self.border.unwrap_or(Rgba::TRANSPARENT)),
        }
    }

    pub fn set(&mut self, property: Property, value: Value) {
        match (property, value) {
            (Property::X, Value::Number(v)) => {
                self.x = v;
                self.transformed = true;
            }
            (Property::Y, Value::Number(v)) => {
                self.y = v;
                self.transformed = true;
            }
            (Property::Scale, Value::Number(v)) => {
                self.scale = v;
                self.transformed = true;
            }
            (Property::Opacity, Value::Number(v)) => {
                self.opacity = v.clamp(0.0, 1.0);
                self.faded = true;
            }
            (Property::BackgroundColor, Value::Color(c)) => self.background = Some(c),
            (Property::BorderColor, Value::Color(c)) => self.border = Some(c),
            _ => {}
        }
    }

    pub fn transform_css(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0) scale({:.4})",
            self.x, self.y, self.scale
        )
    }
}

pub trait StyleSink {
    fn write(&mut self, target: TargetId, style: &TargetStyle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
    Paused,
}

#[derive(Clone, Debug)]
struct Track {
    property: Property,
    from: Option<Value>,
    to: Value,
}

#[derive(Clone, Debug)]
struct ActiveTween {
    id: TweenId,
    target: TargetId,
    tracks: Vec<Track>,
    duration_ms: f64,
    delay_ms: f64,
    delay_remaining_ms: f64,
    ease: Ease,
    display: Option<Display>,
    progress: f64,
    direction: Direction,
    last_seen: Option<f64>,
    started: bool,
    /// Retained tweens stay addressable after finishing so they can be
    /// replayed or reversed by scroll triggers.
    retained: bool,
}

#[derive(Debug, Default)]
pub struct Animator {
    next_target: usize,
    next_tween: u64,
    styles: HashMap<TargetId, TargetStyle>,
    tweens: Vec<ActiveTween>,
    dirty: HashSet<TargetId>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target += 1;
        self.styles.insert(id, TargetStyle::default());
        id
    }

    pub fn style(&self, target: TargetId) -> TargetStyle {
        self.styles.get(&target).copied().unwrap_or_default()
    }

    pub fn active_count(&self) -> usize {
        self.tweens
            .iter()
            .filter(|tween| tween.direction != Direction::Paused)
            .count()
    }

    /// Applies values immediately, cancelling any tween animating them.
    pub fn set(&mut self, target: TargetId, values: &[(Property, Value)]) {
        let properties: Vec<Property> = values.iter().map(|(property, _)| *property).collect();
        self.overwrite(target, &properties, None);

        let style = self.styles.entry(target).or_default();
        for (property, value) in values {
            style.set(*property, *value);
        }
        self.dirty.insert(target);
    }

    /// Animates from the current values to `spec.to`, starting on the next
    /// tick (after `spec.delay`). Overwrites in-flight tweens on the same
    /// target and properties.
    pub fn to(&mut self, target: TargetId, spec: &TweenSpec) -> TweenId {
        let id = self.allocate();
        let properties: Vec<Property> = spec.properties().collect();
        self.overwrite(target, &properties, Some(id));

        let tracks = spec
            .to
            .iter()
            .map(|(property, value)| Track {
                property: *property,
                from: spec
                    .from
                    .iter()
                    .find(|(from_property, _)| from_property == property)
                    .map(|(_, value)| *value),
                to: *value,
            })
            .collect();

        self.tweens.push(ActiveTween {
            tracks,
            direction: Direction::Forward,
            retained: false,
            ..Self::blank(id, target, spec)
        });
        id
    }

    /// Renders `spec.from` immediately and parks a tween that animates back to
    /// the target's resting values once played.
    pub fn from_paused(&mut self, target: TargetId, spec: &TweenSpec) -> TweenId {
        let id = self.allocate();
        let properties: Vec<Property> = spec.properties().collect();
        self.overwrite(target, &properties, Some(id));

        let resting = self.style(target);
        let tracks = spec
            .from
            .iter()
            .map(|(property, value)| Track {
                property: *property,
                from: Some(*value),
                to: resting.get(*property),
            })
            .collect::<Vec<_>>();

        let style = self.styles.entry(target).or_default();
        for track in &tracks {
            if let Some(from) = track.from {
                style.set(track.property, from);
            }
        }
        self.dirty.insert(target);

        self.tweens.push(ActiveTween {
            tracks,
            direction: Direction::Paused,
            retained: true,
            ..Self::blank(id, target, spec)
        });
        id
    }

    /// Plays a retained tween forward from its current progress.
    pub fn play(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.iter_mut().find(|tween| tween.id == id) {
            if tween.progress <= 0.0 {
                tween.delay_remaining_ms = tween.delay_ms;
            }
            tween.direction = Direction::Forward;
            tween.last_seen = None;
        }
    }

    /// Runs a tween backwards from its current progress, without delay.
    pub fn reverse(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.iter_mut().find(|tween| tween.id == id) {
            tween.direction = Direction::Reverse;
            tween.delay_remaining_ms = 0.0;
            tween.last_seen = None;
        }
    }

    pub fn progress(&self, id: TweenId) -> Option<f64> {
        self.tweens
            .iter()
            .find(|tween| tween.id == id)
            .map(|tween| tween.progress)
    }

    /// Advances every running tween to `now` (milliseconds) and flushes the
    /// styles that changed to `sink`.
    pub fn tick(&mut self, now: f64, sink: &mut impl StyleSink) {
        for tween in &mut self.tweens {
            if tween.direction == Direction::Paused {
                continue;
            }

            let elapsed = match tween.last_seen {
                Some(last) => (now - last).max(0.0),
                None => 0.0,
            };
            tween.last_seen = Some(now);

            let mut budget = elapsed;
            if tween.direction == Direction::Forward && tween.delay_remaining_ms > 0.0 {
                let consumed = budget.min(tween.delay_remaining_ms);
                tween.delay_remaining_ms -= consumed;
                budget -= consumed;
                if tween.delay_remaining_ms > 0.0 {
                    continue;
                }
            }

            let Some(style) = self.styles.get_mut(&tween.target) else {
                continue;
            };

            if !tween.started && tween.direction == Direction::Forward {
                tween.started = true;
                for track in &mut tween.tracks {
                    if track.from.is_none() {
                        track.from = Some(style.get(track.property));
                    }
                }
                if tween.display == Some(Display::Block) {
                    style.display = Some(Display::Block);
                }
            }

            let step = if tween.duration_ms > 0.0 {
                budget / tween.duration_ms
            } else {
                1.0
            };
            tween.progress = match tween.direction {
                Direction::Forward => (tween.progress + step).min(1.0),
                Direction::Reverse => (tween.progress - step).max(0.0),
                Direction::Paused => tween.progress,
            };

            let eased = tween.ease.apply(tween.progress);
            for track in &tween.tracks {
                let from = track.from.unwrap_or(track.to);
                style.set(track.property, from.lerp(track.to, eased));
            }

            let finished = match tween.direction {
                Direction::Forward => tween.progress >= 1.0,
                Direction::Reverse => tween.progress <= 0.0,
                Direction::Paused => false,
            };
            if finished {
                if tween.direction == Direction::Forward && tween.display == Some(Display::None) {
                    style.display = Some(Display::None);
                }
                tween.direction = Direction::Paused;
            }

            self.dirty.insert(tween.target);
        }

        self.tweens
            .retain(|tween| tween.retained || tween.direction != Direction::Paused);

        let mut dirty: Vec<TargetId> = self.dirty.drain().collect();
        dirty.sort();
        for target in dirty {
            if let Some(style) = self.styles.get(&target) {
                sink.write(target, style);
            }
        }
    }

    fn allocate(&mut self) -> TweenId {
        let id = TweenId(self.next_tween);
        self.next_tween += 1;
        id
    }

    fn blank(id: TweenId, target: TargetId, spec: &TweenSpec) -> ActiveTween {
        let delay_ms = spec.delay * 1_000.0;
        ActiveTween {
            id,
            target,
            tracks: Vec::new(),
            duration_ms: spec.duration * 1_000.0,
            delay_ms,
            delay_remaining_ms: delay_ms,
            ease: spec.ease,
            display: spec.display,
            progress: 0.0,
            direction: Direction::Paused,
            last_seen: None,
            started: false,
            retained: false,
        }
    }

    fn overwrite(&mut self, target: TargetId, properties: &[Property], keep: Option<TweenId>) {
        for tween in &mut self.tweens {
            if tween.target != target || Some(tween.id) == keep {
                continue;
            }
            tween
                .tracks
                .retain(|track| !properties.contains(&track.property));
        }
        self.tweens.retain(|tween| !tween.tracks.is_empty());
    }
}
