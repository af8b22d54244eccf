use std::rc::Rc;

use js_sys::Error as JsError;
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, Event, HtmlAudioElement, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::audio::{AudioCommand, Playback, AUDIO_SRC};
use crate::config::{MotionConfig, CONFIG_SCRIPT_ID};
use crate::content::{
    section_color, BRAND, CONTACT_EMAIL, COURSES, FILTERS, HERO_CTA, HERO_LINES, HERO_SUBTITLE,
    NAV_LINKS, PHILOSOPHY, TUTORIALS,
};
use crate::filter::{CardVisibility, Filter, FilterGroup};
use crate::logging::{self, log_event, LogLevel};
use crate::menu::{link_tweens, MenuEffect, MenuState};
use crate::runtime::MotionRuntime;
use crate::tween::{Property, Value};

/// Shared handle to the page's motion runtime, provided through context.
#[derive(Clone)]
struct Motion(Rc<MotionRuntime>);

impl PartialEq for Motion {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn read_config() -> MotionConfig {
    let document = window().and_then(|w| w.document());
    let body = document.as_ref().and_then(|d| d.body());
    let embedded = document
        .as_ref()
        .and_then(|d| d.get_element_by_id(CONFIG_SCRIPT_ID))
        .and_then(|element| element.text_content());

    MotionConfig::resolve(
        |name| {
            body.as_ref()
                .and_then(|body| body.get_attribute(&format!("data-{name}")))
        },
        embedded.as_deref(),
    )
}

fn describe_js_error(reason: &JsValue) -> String {
    reason
        .dyn_ref::<JsError>()
        .map(|error| format!("{}: {}", String::from(error.name()), String::from(error.message())))
        .or_else(|| reason.as_string())
        .unwrap_or_else(|| format!("{reason:?}"))
}

fn log_play_rejection(reason: &JsValue) {
    log_event(
        LogLevel::Warn,
        "audio_play_rejected",
        json!({ "reason": describe_js_error(reason) }),
    );
}

/// Starts playback. A rejected play request (typically autoplay policy) is
/// only logged; the button keeps showing the playing state.
fn request_playback(audio: &HtmlAudioElement) {
    match audio.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(reason) = JsFuture::from(promise).await {
                log_play_rejection(&reason);
            }
        }),
        Err(reason) => log_play_rejection(&reason),
    }
}

fn node_elements(refs: &[NodeRef]) -> Vec<HtmlElement> {
    refs.iter()
        .filter_map(|node_ref| node_ref.cast::<HtmlElement>())
        .collect()
}

fn apply_menu_effects(motion: Option<&Motion>, links: &[HtmlElement], effects: &[MenuEffect]) {
    for effect in effects {
        match effect {
            MenuEffect::RevealLinks | MenuEffect::HideLinks => {
                if let Some(motion) = motion {
                    motion.0.animate_batch(links, &link_tweens(*effect, links.len()));
                }
            }
            MenuEffect::PauseScroll => {
                if let Some(driver) = motion.and_then(|m| m.0.scroll_driver()) {
                    driver.stop();
                }
            }
            MenuEffect::ResumeScroll => {
                if let Some(driver) = motion.and_then(|m| m.0.scroll_driver()) {
                    driver.start();
                }
            }
        }
    }
}

fn transition_menu(
    state: &UseStateHandle<MenuState>,
    motion: Option<&Motion>,
    link_refs: &[NodeRef],
    (next, effects): (MenuState, &'static [MenuEffect]),
    source: &str,
) {
    apply_menu_effects(motion, &node_elements(link_refs), effects);

    let scroll_stopped = motion
        .and_then(|m| m.0.scroll_driver())
        .map(|driver| driver.is_stopped());
    log_event(
        LogLevel::Debug,
        "menu_state",
        json!({ "open": next.is_open(), "source": source, "scrollStopped": scroll_stopped }),
    );

    state.set(next);
}

#[function_component(MobileMenu)]
fn mobile_menu() -> Html {
    let motion = use_context::<Motion>();
    let state = use_state(MenuState::default);
    let link_refs = use_memo((), |_| {
        NAV_LINKS
            .iter()
            .map(|_| NodeRef::default())
            .collect::<Vec<_>>()
    });

    {
        let motion = motion.clone();
        let link_refs = link_refs.clone();
        use_effect_with((), move |_| {
            if let Some(motion) = motion {
                for link in node_elements(&link_refs) {
                    motion.0.set(
                        &link,
                        &[
                            (Property::Y, Value::Number(20.0)),
                            (Property::Opacity, Value::Number(0.0)),
                        ],
                    );
                }
            }
            || ()
        });
    }

    let on_toggle = {
        let state = state.clone();
        let motion = motion.clone();
        let link_refs = link_refs.clone();
        Callback::from(move |_: MouseEvent| {
            transition_menu(&state, motion.as_ref(), &link_refs, (*state).toggled(), "toggle");
        })
    };

    let on_link = {
        let state = state.clone();
        let motion = motion.clone();
        let link_refs = link_refs.clone();
        Callback::from(move |_: MouseEvent| {
            transition_menu(&state, motion.as_ref(), &link_refs, (*state).link_clicked(), "link");
        })
    };

    let toggle_label = if state.is_open() { "Close menu" } else { "Open menu" };

    html! {
        <>
            <button
                class={classes!("menu-toggle", state.active_class())}
                type="button"
                aria-label={toggle_label}
                aria-expanded={state.is_open().to_string()}
                onclick={on_toggle}
            >
                <span class="menu-toggle-bar"></span>
                <span class="menu-toggle-bar"></span>
            </button>
            <div
                class={classes!("mobile-menu-overlay", state.active_class())}
                aria-hidden={(!state.is_open()).to_string()}
            >
                <nav aria-label="Mobile">
                    <ul>
                        { for NAV_LINKS.iter().zip(link_refs.iter()).map(|(link, node_ref)| html! {
                            <li>
                                <a
                                    class="mobile-link"
                                    href={link.href}
                                    ref={node_ref.clone()}
                                    onclick={on_link.clone()}
                                >
                                    {link.label}
                                </a>
                            </li>
                        }) }
                    </ul>
                </nav>
            </div>
        </>
    }
}

#[function_component(Tutorials)]
fn tutorials() -> Html {
    let motion = use_context::<Motion>();
    let group = use_state(|| {
        FilterGroup::new(
            FILTERS
                .iter()
                .map(|button| Filter::from_attribute(button.value))
                .collect(),
            TUTORIALS
                .iter()
                .map(|tutorial| tutorial.category.to_string())
                .collect(),
        )
    });
    let card_refs = use_memo((), |_| {
        TUTORIALS
            .iter()
            .map(|_| NodeRef::default())
            .collect::<Vec<_>>()
    });

    let buttons = FILTERS.iter().enumerate().map(|(index, button)| {
        let onclick = {
            let group = group.clone();
            let card_refs = card_refs.clone();
            let motion = motion.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*group).clone();
                let Some(visibility) = next.select(index) else {
                    return;
                };

                if let Some(motion) = motion.as_ref() {
                    for (node_ref, card) in card_refs.iter().zip(&visibility) {
                        if let Some(element) = node_ref.cast::<HtmlElement>() {
                            motion.0.animate(&element, &card.tween());
                        }
                    }
                }

                let shown = visibility
                    .iter()
                    .filter(|card| **card == CardVisibility::Shown)
                    .count();
                log_event(
                    LogLevel::Debug,
                    "filter_applied",
                    json!({ "filter": next.active_filter().map(Filter::as_str), "shown": shown }),
                );

                group.set(next);
            })
        };

        html! {
            <button
                type="button"
                class={classes!("filter-btn", group.is_active(index).then_some("active"))}
                data-filter={button.value}
                aria-pressed={group.is_active(index).to_string()}
                {onclick}
            >
                {button.label}
            </button>
        }
    });

    html! {
        <section id="tutorials" class="tutorials section-block" data-bgcolor={section_color("tutorials")}>
            <h2 class="section-heading">{"Tutorials"}</h2>
            <div class="filter-bar" role="toolbar" aria-label="Filter tutorials">
                { for buttons }
            </div>
            <div class="tutorial-grid">
                { for TUTORIALS.iter().zip(card_refs.iter()).map(|(tutorial, node_ref)| html! {
                    <article class="tutorial-card" data-category={tutorial.category} ref={node_ref.clone()}>
                        <span class="tutorial-category">{tutorial.category}</span>
                        <h3>{tutorial.title}</h3>
                        <p class="muted">{tutorial.length}</p>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[function_component(AudioFab)]
fn audio_fab() -> Html {
    let playback = use_state(Playback::default);
    let audio_ref = use_node_ref();

    let onclick = {
        let playback = playback.clone();
        let audio_ref = audio_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(audio) = audio_ref.cast::<HtmlAudioElement>() else {
                return;
            };

            let (next, command) = (*playback).clicked();
            match command {
                AudioCommand::Play => request_playback(&audio),
                AudioCommand::Pause => {
                    let _ = audio.pause();
                }
            }
            playback.set(next);
        })
    };

    let onended = {
        let playback = playback.clone();
        Callback::from(move |_: Event| playback.set((*playback).ended()))
    };

    html! {
        <>
            <audio id="demo-audio" src={AUDIO_SRC} preload="none" ref={audio_ref} {onended}></audio>
            <button
                type="button"
                class={classes!("audio-fab", playback.playing_class())}
                aria-label={playback.label()}
                aria-pressed={(*playback == Playback::Playing).to_string()}
                {onclick}
            >
                <span class="play-icon-fab" aria-hidden="true">{playback.icon()}</span>
            </button>
        </>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    html! {
        <section id="hero" class="hero" data-bgcolor={section_color("hero")}>
            <h1 class="hero-title">
                { for HERO_LINES.iter().map(|line| html! { <span>{*line}</span> }) }
            </h1>
            <p class="hero-subtitle">{HERO_SUBTITLE}</p>
            <a class="hero-cta" href="#courses">{HERO_CTA}</a>
        </section>
    }
}

#[function_component(Philosophy)]
fn philosophy() -> Html {
    html! {
        <section id="philosophy" class="philosophy section-block" data-bgcolor={section_color("philosophy")}>
            { for PHILOSOPHY.iter().map(|line| html! { <p class="big-text">{*line}</p> }) }
        </section>
    }
}

#[function_component(Courses)]
fn courses() -> Html {
    html! {
        <section id="courses" class="courses section-block" data-bgcolor={section_color("courses")}>
            <h2 class="section-heading">{"Courses"}</h2>
            <div class="course-grid">
                { for COURSES.iter().map(|course| html! {
                    <article class="course-card">
                        <span class="course-level">{course.level}</span>
                        <h3>{course.title}</h3>
                        <p class="muted">{course.blurb}</p>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: MotionConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let motion = {
        let config = props.config;
        use_memo((), move |_| Motion(MotionRuntime::new(config)))
    };

    {
        let motion = (*motion).clone();
        use_effect_with((), move |_| {
            motion.0.install();
            || ()
        });
    }

    html! {
        <ContextProvider<Motion> context={(*motion).clone()}>
            <div class="cursor" aria-hidden="true"></div>
            <div class="cursor-follower" aria-hidden="true"></div>

            <header class="site-header">
                <a class="brand" href="#hero">{BRAND}</a>
                <nav class="desktop-nav" aria-label="Primary">
                    { for NAV_LINKS.iter().map(|link| html! { <a href={link.href}>{link.label}</a> }) }
                </nav>
                <MobileMenu />
            </header>

            <main id="content">
                <Hero />
                <Philosophy />
                <Courses />
                <Tutorials />
                <section id="contact" class="contact section-block" data-bgcolor={section_color("contact")}>
                    <p class="big-text">{"Let's build something that moves."}</p>
                    <a class="contact-link" href={format!("mailto:{CONTACT_EMAIL}")}>{CONTACT_EMAIL}</a>
                </section>
            </main>

            <AudioFab />
        </ContextProvider<Motion>>
    }
}

pub fn run() {
    let config = read_config();
    logging::set_min_level(config.log_level);

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps { config },
    )
    .render();
}
