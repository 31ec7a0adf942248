use std::cell::Cell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{Document, Window};

mod config;
mod controller;
mod counter;
mod dom;
mod error;
mod form;
mod menu;
mod scroll;
mod styles;
mod tracking;
mod validation;
mod watch;

use config::SiteConfig;
use controller::SiteController;
use dom::ElementLocator;
use error::{Error, Result};

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

thread_local! {
    static STARTED: Cell<bool> = Cell::new(false);
}

fn boot(window: Window, document: Document, config: SiteConfig) {
    if STARTED.with(|started| started.replace(true)) {
        return;
    }

    let reporter = tracking::resolve(&window);
    let locator: Rc<dyn ElementLocator> = Rc::new(document.clone());
    SiteController::new(window, document, locator, reporter, config).start();
}

fn announce_legacy_jquery(window: &Window) {
    let jquery = Reflect::get(window, &JsValue::from_str("$")).unwrap_or(JsValue::UNDEFINED);
    if !jquery.is_undefined() {
        info!("Legacy jQuery support active");
    }
}

fn run() -> Result<()> {
    let window = web_sys::window().ok_or(Error::NoWindow)?;
    let document = window.document().ok_or(Error::NoDocument)?;

    let loaded = config::from_document(&document);
    let level = match &loaded {
        Ok(config) => config.log_level(),
        Err(_) => config::default_log_level(),
    };
    console_log::init_with_level(level).expect("error initializing log");

    let config = loaded.unwrap_or_else(|err| {
        warn!("Using default site config: {}", err);
        SiteConfig::default()
    });
    info!("Starting site enhancer");
    announce_legacy_jquery(&window);

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::once_into_js(move || boot(window, document, config));
        target.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        boot(window, document, config);
    }
    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(err) = run() {
        warn!("Site enhancer did not start: {}", err);
    }
}
