use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, NodeList, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::error::Result;

/// Resolves selectors to elements. Implemented for `Document` (page-wide
/// lookups) and `Element` (lookups scoped to a subtree, e.g. a form).
pub trait ElementLocator {
    fn find(&self, selector: &str) -> Option<Element>;
    fn find_all(&self, selector: &str) -> Vec<Element>;
}

impl ElementLocator for Document {
    fn find(&self, selector: &str) -> Option<Element> {
        match self.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                warn!("Selector `{}` rejected: {:?}", selector, err);
                None
            }
        }
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        match self.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(err) => {
                warn!("Selector `{}` rejected: {:?}", selector, err);
                Vec::new()
            }
        }
    }
}

impl ElementLocator for Element {
    fn find(&self, selector: &str) -> Option<Element> {
        match self.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                warn!("Selector `{}` rejected: {:?}", selector, err);
                None
            }
        }
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        match self.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(err) => {
                warn!("Selector `{}` rejected: {:?}", selector, err);
                Vec::new()
            }
        }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn current_element(event: &Event) -> Option<Element> {
    event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        warn!("Could not set class `{}`: {:?}", class, err);
    }
}

pub fn offset_height(element: &Element) -> Option<f64> {
    element
        .dyn_ref::<HtmlElement>()
        .map(|html| f64::from(html.offset_height()))
}

pub fn offset_top(element: &Element) -> f64 {
    element
        .dyn_ref::<HtmlElement>()
        .map(|html| f64::from(html.offset_top()))
        .unwrap_or(0.0)
}

pub fn viewport_width(window: &Window) -> Option<f64> {
    window.inner_width().ok().and_then(|width| width.as_f64())
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_into_view_centered(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn create(document: &Document, tag: &str, class: Option<&str>, text: Option<&str>) -> Result<Element> {
    let element = document.create_element(tag)?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    if text.is_some() {
        element.set_text_content(text);
    }
    Ok(element)
}
