#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod animator;
mod audio;
mod config;
mod cursor;
mod easing;
mod filter;
mod logging;
mod menu;
mod reveal;
mod scroll_trigger;
mod smooth_scroll;
mod tween;

#[cfg(target_arch = "wasm32")]
mod content;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod runtime;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
