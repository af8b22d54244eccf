//! Browser side of the motion layer: owns the animator, the smooth scroll
//! controller and the registered triggers, and drives all of them from a
//! single animation-frame loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, Event, HtmlElement, MouseEvent, WheelEvent};

use crate::animator::{Animator, StyleSink, TargetId, TargetStyle, TweenId};
use crate::config::MotionConfig;
use crate::cursor::{self, CursorHover, FINE_POINTER_QUERY, HOVER_TARGETS};
use crate::logging::{log_event, LogLevel};
use crate::reveal::{self, RevealPreset};
use crate::scroll_trigger::{ElementRect, ScrollTrigger, ToggleAction, ToggleActions};
use crate::smooth_scroll::SmoothScroll;
use crate::tween::{Property, Rgba, TweenSpec, Value};

const SCROLL_STOPPED_CLASS: &str = "scroll-stopped";
const LOADING_CLASS: &str = "loading";
const LINE_HEIGHT_PX: f64 = 16.0;

fn document() -> Option<Document> {
    window()?.document()
}

fn viewport_height() -> f64 {
    window()
        .and_then(|win| win.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0)
}

fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn query_one(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn element_rect(element: &Element) -> ElementRect {
    let rect = element.get_bounding_client_rect();
    ElementRect {
        top: rect.top(),
        bottom: rect.bottom(),
    }
}

/// Resolves any CSS color value. Forms `Rgba::parse` does not know (named
/// colors, `color-mix()` and so on) are handed to the browser through a
/// scratch element and read back in computed `rgb()` form.
fn resolve_color(raw: &str) -> Option<Rgba> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(color) = Rgba::parse(raw) {
        return Some(color);
    }

    let document = document()?;
    let body = document.body()?;
    let scratch = document
        .create_element("span")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let style = scratch.style();
    let _ = style.set_property("display", "none");
    let _ = style.set_property("color", raw);
    // The declaration stays empty when the browser rejects the value.
    if style.get_property_value("color").ok()?.is_empty() {
        return None;
    }

    body.append_child(&scratch).ok()?;
    let computed = window()
        .and_then(|win| win.get_computed_style(&scratch).ok().flatten())
        .and_then(|computed| computed.get_property_value("color").ok());
    scratch.remove();

    Rgba::parse(&computed?).ok()
}

/// Reads a computed color (including custom properties) from `element`.
fn computed_color(element: &Element, property: &str) -> Option<Rgba> {
    let style = window()?.get_computed_style(element).ok().flatten()?;
    let value = style.get_property_value(property).ok()?;
    resolve_color(&value)
}

fn root_color(variable: &str) -> Option<Rgba> {
    let root = document()?.document_element()?;
    computed_color(&root, variable)
}

fn feature_skipped(feature: &str, reason: &str) {
    log_event(
        LogLevel::Info,
        "feature_skipped",
        json!({ "feature": feature, "reason": reason }),
    );
}

/// Handle to the page's smooth scroll controller. Cloning shares the same
/// controller.
#[derive(Clone)]
pub struct ScrollDriver {
    inner: Rc<RefCell<SmoothScroll>>,
}

impl ScrollDriver {
    fn new(config: &MotionConfig) -> Option<Self> {
        // Without a root element there is nothing to scroll.
        document()?.document_element()?;
        Some(Self {
            inner: Rc::new(RefCell::new(SmoothScroll::new(config.scroll))),
        })
    }

    pub fn stop(&self) {
        self.inner.borrow_mut().stop();
        set_root_class(SCROLL_STOPPED_CLASS, true);
    }

    pub fn start(&self) {
        self.inner.borrow_mut().start();
        set_root_class(SCROLL_STOPPED_CLASS, false);
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.borrow().is_stopped()
    }

    fn frame(&self, now: f64) {
        let Some(win) = window() else {
            return;
        };
        let Some(root) = document().and_then(|d| d.document_element()) else {
            return;
        };

        let mut scroll = self.inner.borrow_mut();
        scroll.set_limit(f64::from(root.scroll_height()) - viewport_height());
        if !scroll.is_gliding() {
            if let Ok(native) = win.scroll_y() {
                scroll.sync(native);
            }
        }
        if let Some(position) = scroll.raf(now) {
            win.scroll_to_with_x_and_y(0.0, position);
        }
    }

    fn wheel(&self, delta_y: f64, now: f64) -> bool {
        self.inner.borrow_mut().on_wheel(delta_y, now)
    }

    fn touch(&self, delta_y: f64, now: f64) -> bool {
        self.inner.borrow_mut().on_touch(delta_y, now)
    }

    fn smooth_touch(&self) -> bool {
        self.inner.borrow().smooth_touch()
    }
}

fn set_root_class(class: &str, present: bool) {
    if let Some(root) = document().and_then(|d| d.document_element()) {
        let classes = root.class_list();
        let _ = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }
}

fn wheel_delta_pixels(event: &WheelEvent) -> f64 {
    match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => event.delta_y() * LINE_HEIGHT_PX,
        WheelEvent::DOM_DELTA_PAGE => event.delta_y() * viewport_height(),
        _ => event.delta_y(),
    }
}

#[derive(Default)]
struct DomSink {
    elements: Vec<HtmlElement>,
}

impl StyleSink for DomSink {
    fn write(&mut self, target: TargetId, style: &TargetStyle) {
        let Some(element) = self.elements.get(target.0) else {
            return;
        };
        let css = element.style();

        if style.transformed {
            let _ = css.set_property("transform", &style.transform_css());
        }
        if style.faded {
            let _ = css.set_property("opacity", &format!("{:.3}", style.opacity));
        }
        if let Some(background) = style.background {
            let _ = css.set_property("background-color", &background.to_css());
        }
        if let Some(border) = style.border {
            let _ = css.set_property("border-color", &border.to_css());
        }
        if let Some(display) = style.display {
            let _ = css.set_property("display", display.as_css());
        }
    }
}

struct Reveal {
    trigger_element: Element,
    trigger: ScrollTrigger,
    actions: ToggleActions,
    tweens: Vec<TweenId>,
}

struct BackgroundSection {
    element: Element,
    trigger: ScrollTrigger,
    color: Rgba,
}

pub struct MotionRuntime {
    config: MotionConfig,
    animator: Rc<RefCell<Animator>>,
    sink: RefCell<DomSink>,
    scroll: Option<ScrollDriver>,
    reveals: RefCell<Vec<Reveal>>,
    backgrounds: RefCell<Vec<BackgroundSection>>,
    body: Cell<Option<TargetId>>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    installed: Cell<bool>,
}

impl MotionRuntime {
    pub fn new(config: MotionConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            animator: Rc::new(RefCell::new(Animator::new())),
            sink: RefCell::new(DomSink::default()),
            scroll: ScrollDriver::new(&config),
            reveals: RefCell::new(Vec::new()),
            backgrounds: RefCell::new(Vec::new()),
            body: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
            installed: Cell::new(false),
        })
    }

    pub fn scroll_driver(&self) -> Option<ScrollDriver> {
        self.scroll.clone()
    }

    /// Registers `element` with the animator, reusing the id of an element
    /// seen before.
    fn target(&self, element: &HtmlElement) -> TargetId {
        let mut sink = self.sink.borrow_mut();
        if let Some(index) = sink
            .elements
            .iter()
            .position(|known| known.is_same_node(Some(element.as_ref())))
        {
            return TargetId(index);
        }

        let id = self.animator.borrow_mut().register();
        sink.elements.push(element.clone());
        id
    }

    pub fn animate(&self, element: &HtmlElement, spec: &TweenSpec) -> TweenId {
        let target = self.target(element);
        self.animator.borrow_mut().to(target, spec)
    }

    pub fn animate_batch(&self, elements: &[HtmlElement], specs: &[TweenSpec]) {
        for (element, spec) in elements.iter().zip(specs) {
            self.animate(element, spec);
        }
    }

    pub fn set(&self, element: &HtmlElement, values: &[(Property, Value)]) {
        let target = self.target(element);
        self.animator.borrow_mut().set(target, values);
    }

    /// Wires every page-level effect once the markup is mounted and starts
    /// the frame loop. Later calls do nothing.
    pub fn install(self: &Rc<Self>) {
        if self.installed.replace(true) {
            return;
        }
        let Some(document) = document() else {
            feature_skipped("motion", "no document");
            return;
        };

        let scroll = self.install_scroll();
        let cursor = self.install_cursor(&document);
        self.install_intro(&document);
        let reveals = self.install_reveals(&document);
        let backgrounds = self.install_backgrounds(&document);

        if let Some(body) = document.body() {
            let _ = body.class_list().remove_1(LOADING_CLASS);
        }

        self.schedule_frame();

        log_event(
            LogLevel::Info,
            "motion_ready",
            json!({
                "scroll": scroll,
                "smoothTouch": self.config.scroll.smooth_touch,
                "cursor": cursor,
                "reveals": reveals,
                "backgrounds": backgrounds,
            }),
        );
    }

    fn install_scroll(&self) -> bool {
        let Some(driver) = self.scroll.clone() else {
            feature_skipped("scroll", "no scrollable root");
            return false;
        };
        let Some(win) = window() else {
            return false;
        };

        let mut listeners = self.listeners.borrow_mut();

        let wheel_driver = driver.clone();
        listeners.push(EventListener::new_with_options(
            &win,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                // Pinch-zoom gestures arrive as ctrl+wheel.
                if wheel.ctrl_key() {
                    return;
                }
                if wheel_driver.wheel(wheel_delta_pixels(wheel), event.time_stamp()) {
                    event.prevent_default();
                }
            },
        ));

        if driver.smooth_touch() {
            let last_touch_y = Rc::new(Cell::new(None::<f64>));

            let start_y = Rc::clone(&last_touch_y);
            listeners.push(EventListener::new(&win, "touchstart", move |event: &Event| {
                start_y.set(first_touch_y(event));
            }));

            let touch_driver = driver.clone();
            listeners.push(EventListener::new_with_options(
                &win,
                "touchmove",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let previous = last_touch_y.get();
                    let (Some(previous), Some(current)) = (previous, first_touch_y(event)) else {
                        return;
                    };
                    last_touch_y.set(Some(current));
                    if touch_driver.touch(previous - current, event.time_stamp()) {
                        event.prevent_default();
                    }
                },
            ));
        }

        true
    }

    fn install_cursor(&self, document: &Document) -> bool {
        let fine_pointer = window()
            .and_then(|win| win.match_media(FINE_POINTER_QUERY).ok().flatten())
            .map(|query| query.matches())
            .unwrap_or(false);
        if !fine_pointer {
            return false;
        }

        let (Some(marker), Some(follower)) = (
            query_one(document, ".cursor"),
            query_one(document, ".cursor-follower"),
        ) else {
            feature_skipped("cursor", "missing .cursor or .cursor-follower");
            return false;
        };
        let marker = self.target(&marker);
        let follower_target = self.target(&follower);
        if let Some(border) = computed_color(&follower, "border-top-color") {
            self.animator
                .borrow_mut()
                .set(follower_target, &[(Property::BorderColor, Value::Color(border))]);
        }
        let follower = follower_target;

        let mut listeners = self.listeners.borrow_mut();

        let animator = Rc::clone(&self.animator);
        listeners.push(EventListener::new(document, "mousemove", move |event: &Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let tweens = cursor::follow(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            let mut animator = animator.borrow_mut();
            animator.to(marker, &tweens.marker);
            animator.to(follower, &tweens.follower);
        }));

        for element in query_all(document, HOVER_TARGETS) {
            let transitions = [
                ("mouseenter", CursorHover::Hovering),
                ("mouseleave", CursorHover::Idle),
            ];
            for (event_type, hover) in transitions {
                let animator = Rc::clone(&self.animator);
                listeners.push(EventListener::new(&element, event_type, move |_event: &Event| {
                    let tweens = hover.tweens(root_color(hover.border_var()));
                    let mut animator = animator.borrow_mut();
                    animator.to(marker, &tweens.marker);
                    animator.to(follower, &tweens.follower);
                }));
            }
        }

        true
    }

    fn install_intro(&self, document: &Document) {
        let steps = reveal::hero_intro();
        let groups: Vec<Vec<HtmlElement>> = steps
            .iter()
            .map(|step| query_all(document, step.selector))
            .collect();
        let counts: Vec<usize> = groups.iter().map(Vec::len).collect();
        let scheduled = reveal::schedule(&steps, &counts);

        for ((step, elements), specs) in steps.iter().zip(&groups).zip(&scheduled) {
            for (element, spec) in elements.iter().zip(specs) {
                self.set(element, &step.initial);
                self.animate(element, spec);
            }
        }
    }

    fn install_reveals(&self, document: &Document) -> usize {
        let mut reveals = Vec::new();

        let big_text = reveal::big_text();
        for element in query_all(document, ".big-text") {
            let elements = std::slice::from_ref(&element);
            if let Some(registered) = self.register_reveal(&big_text, &element, elements) {
                reveals.push(registered);
            }
        }

        let cards = query_all(document, ".course-card");
        match query_one(document, ".course-grid") {
            Some(grid) if !cards.is_empty() => {
                let preset = reveal::course_cards();
                if let Some(registered) = self.register_reveal(&preset, &grid, &cards) {
                    reveals.push(registered);
                }
            }
            _ => feature_skipped("course_reveal", "missing .course-grid or .course-card"),
        }

        let count = reveals.len();
        self.reveals.borrow_mut().extend(reveals);
        count
    }

    fn register_reveal(
        &self,
        preset: &RevealPreset,
        trigger_element: &HtmlElement,
        elements: &[HtmlElement],
    ) -> Option<Reveal> {
        let (trigger, actions) = match (preset.trigger(), preset.actions()) {
            (Ok(trigger), Ok(actions)) => (trigger, actions),
            (Err(reason), _) | (_, Err(reason)) => {
                feature_skipped("reveal", reason);
                return None;
            }
        };

        let specs = preset.specs(elements.len());
        let tweens = elements
            .iter()
            .zip(&specs)
            .map(|(element, spec)| {
                let target = self.target(element);
                self.animator.borrow_mut().from_paused(target, spec)
            })
            .collect();

        Some(Reveal {
            trigger_element: trigger_element.clone().into(),
            trigger,
            actions,
            tweens,
        })
    }

    fn install_backgrounds(&self, document: &Document) -> usize {
        let Some(body) = document.body() else {
            feature_skipped("background", "no body");
            return 0;
        };
        let body_target = self.target(&body);
        if let Some(initial) = computed_color(&body, "background-color") {
            self.animator
                .borrow_mut()
                .set(body_target, &[(Property::BackgroundColor, Value::Color(initial))]);
        }
        self.body.set(Some(body_target));

        let mut sections = Vec::new();
        for element in query_all(document, "[data-bgcolor]") {
            let Some(raw) = element.get_attribute("data-bgcolor") else {
                continue;
            };
            match resolve_color(&raw) {
                Some(color) => sections.push(BackgroundSection {
                    element: element.into(),
                    trigger: reveal::background_trigger(),
                    color,
                }),
                None => feature_skipped("background", "unresolvable data-bgcolor"),
            }
        }

        let count = sections.len();
        self.backgrounds.borrow_mut().extend(sections);
        count
    }

    fn schedule_frame(self: &Rc<Self>) {
        let runtime = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            runtime.on_frame(timestamp);
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn on_frame(self: &Rc<Self>, now: f64) {
        self.frame.borrow_mut().take();

        if let Some(driver) = &self.scroll {
            driver.frame(now);
        }
        self.evaluate_triggers();
        self.animator
            .borrow_mut()
            .tick(now, &mut *self.sink.borrow_mut());

        self.schedule_frame();
    }

    fn evaluate_triggers(&self) {
        let height = viewport_height();
        let mut animator = self.animator.borrow_mut();

        for reveal in self.reveals.borrow_mut().iter_mut() {
            for event in reveal.trigger.update(element_rect(&reveal.trigger_element), height) {
                match reveal.actions.action_for(event) {
                    ToggleAction::Play => {
                        reveal.tweens.iter().for_each(|id| animator.play(*id));
                    }
                    ToggleAction::Reverse => {
                        reveal.tweens.iter().for_each(|id| animator.reverse(*id));
                    }
                    ToggleAction::None => {}
                }
            }
        }

        let Some(body) = self.body.get() else {
            return;
        };
        for section in self.backgrounds.borrow_mut().iter_mut() {
            for event in section.trigger.update(element_rect(&section.element), height) {
                if reveal::swaps_background(event) {
                    animator.to(body, &reveal::background_tween(section.color));
                }
            }
        }
    }
}

fn first_touch_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<web_sys::TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_y()))
}
