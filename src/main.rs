use std::rc::Rc;

mod camera;
mod components;
mod config;
mod error;
mod model;
mod render;
mod state;
mod util;

use components::app::{App, AppProps};
use config::KissCamConfig;

fn main() {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("no document to mount into");
    let (config, rejected) = KissCamConfig::from_document(&document);
    let level = config.level().unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    if let Some(e) = rejected {
        log::warn!("ignoring page config: {e}");
    }
    log::info!("kiss cam starting");

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
