use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchOptions {
    pub threshold: f64,
    pub bottom_inset: f64,
    pub once: bool,
}

pub const ENTRANCE: WatchOptions = WatchOptions {
    threshold: 0.1,
    bottom_inset: 50.0,
    once: false,
};

pub const COUNTER: WatchOptions = WatchOptions {
    threshold: 0.5,
    bottom_inset: 0.0,
    once: true,
};

impl WatchOptions {
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", 0.0 - self.bottom_inset)
    }
}

/// Returns `None` without observing anything when `elements` is empty.
pub fn watch<F>(elements: &[Element], options: WatchOptions, mut on_visible: F) -> Result<Option<IntersectionObserver>>
where
    F: FnMut(Element) + 'static,
{
    if elements.is_empty() {
        return Ok(None);
    }

    let once = options.once;
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            if once {
                observer.unobserve(&target);
            }
            on_visible(target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for element in elements {
        observer.observe(element);
    }
    debug!("Watching {} element(s) at threshold {}", elements.len(), options.threshold);
    Ok(Some(observer))
}
