use std::rc::Rc;

use log::{debug, info, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::Window;

pub const UNKNOWN_BUTTON: &str = "Unknown Button";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventParams {
    pub event_category: String,
    pub event_label: String,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackingEvent {
    pub name: &'static str,
    pub params: EventParams,
}

impl TrackingEvent {
    pub fn button_click(label: &str) -> Self {
        Self {
            name: "click",
            params: EventParams {
                event_category: "Button".to_string(),
                event_label: label.to_string(),
                value: 1,
            },
        }
    }

    pub fn form_submit() -> Self {
        Self {
            name: "form_submit",
            params: EventParams {
                event_category: "Contact".to_string(),
                event_label: "Contact Form".to_string(),
                value: 1,
            },
        }
    }
}

pub trait Reporter {
    fn report(&self, event: &TrackingEvent);
}

pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, event: &TrackingEvent) {
        debug!("No analytics reporter, dropping `{}`", event.name);
    }
}

pub struct GtagReporter {
    gtag: Function,
}

impl GtagReporter {
    pub fn from_window(window: &Window) -> Option<Self> {
        Reflect::get(window, &JsValue::from_str("gtag"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
            .map(|gtag| Self { gtag })
    }
}

impl Reporter for GtagReporter {
    fn report(&self, event: &TrackingEvent) {
        let params = match serde_wasm_bindgen::to_value(&event.params) {
            Ok(params) => params,
            Err(err) => {
                warn!("Could not encode tracking params: {}", err);
                return;
            }
        };
        let result = self.gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(event.name),
            &params,
        );
        if let Err(err) = result {
            warn!("gtag rejected `{}`: {:?}", event.name, err);
        }
    }
}

pub fn resolve(window: &Window) -> Rc<dyn Reporter> {
    match GtagReporter::from_window(window) {
        Some(reporter) => {
            info!("Analytics reporting via gtag");
            Rc::new(reporter)
        }
        None => Rc::new(NoopReporter),
    }
}

/// Trimmed text, else the accessible label, else a placeholder.
pub fn button_label(text: Option<&str>, aria_label: Option<&str>) -> String {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .or_else(|| aria_label.filter(|label| !label.is_empty()))
        .unwrap_or(UNKNOWN_BUTTON)
        .to_string()
}

#[derive(Clone)]
pub struct Tracker {
    reporter: Rc<dyn Reporter>,
}

impl Tracker {
    pub fn new(reporter: Rc<dyn Reporter>) -> Self {
        Self { reporter }
    }

    pub fn button_clicked(&self, label: &str) {
        self.reporter.report(&TrackingEvent::button_click(label));
        info!("Button clicked: {}", label);
    }

    pub fn form_submitted(&self) {
        self.reporter.report(&TrackingEvent::form_submit());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<TrackingEvent>>);

    impl Reporter for Recorder {
        fn report(&self, event: &TrackingEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn label_prefers_trimmed_text() {
        assert_eq!(button_label(Some("  Donate now \n"), Some("donate")), "Donate now");
    }

    #[test]
    fn label_falls_back_to_aria_then_placeholder() {
        assert_eq!(button_label(Some("   "), Some("Open menu")), "Open menu");
        assert_eq!(button_label(None, Some("")), UNKNOWN_BUTTON);
        assert_eq!(button_label(None, None), UNKNOWN_BUTTON);
    }

    #[test]
    fn button_click_reports_button_category() {
        let recorder = Rc::new(Recorder::default());
        let tracker = Tracker::new(recorder.clone());
        tracker.button_clicked("Volunteer");

        let events = recorder.0.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "click");
        assert_eq!(
            events[0].params,
            EventParams {
                event_category: "Button".to_string(),
                event_label: "Volunteer".to_string(),
                value: 1,
            }
        );
    }

    #[test]
    fn form_submit_reports_contact_form() {
        let recorder = Rc::new(Recorder::default());
        Tracker::new(recorder.clone()).form_submitted();

        let events = recorder.0.borrow();
        assert_eq!(events[0], TrackingEvent::form_submit());
        assert_eq!(events[0].params.event_category, "Contact");
        assert_eq!(events[0].params.event_label, "Contact Form");
    }

    #[test]
    fn noop_reporter_swallows_events() {
        let tracker = Tracker::new(Rc::new(NoopReporter));
        tracker.button_clicked("Anything");
        tracker.form_submitted();
    }

    #[test]
    fn params_serialize_with_analytics_field_names() {
        let json = serde_json::to_value(&TrackingEvent::button_click("Join").params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event_category": "Button", "event_label": "Join", "value": 1})
        );
    }
}
