use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, Window};

use crate::config::SiteConfig;
use crate::counter;
use crate::dom::{self, ElementLocator};
use crate::error::Result;
use crate::form::{self, Verdict};
use crate::menu::{DomMenuView, MobileMenu};
use crate::scroll;
use crate::styles::{self, ANIMATE_IN, SCROLLED};
use crate::tracking::{self, Reporter, Tracker};
use crate::watch;

type Menu = Rc<RefCell<MobileMenu<DomMenuView>>>;

const DEFAULT_TOGGLE_CLASS: &str = "mobile-menu-toggle";

/// Owns every page behavior; clones share the same state.
#[derive(Clone)]
pub struct SiteController {
    window: Window,
    document: Document,
    locator: Rc<dyn ElementLocator>,
    config: Rc<SiteConfig>,
    header: Option<Element>,
    menu_toggle: Option<Element>,
    menu: Option<Menu>,
    tracker: Tracker,
    started: Rc<Cell<bool>>,
}

impl SiteController {
    pub fn new(
        window: Window,
        document: Document,
        locator: Rc<dyn ElementLocator>,
        reporter: Rc<dyn Reporter>,
        config: SiteConfig,
    ) -> Self {
        let selectors = &config.selectors;
        let header = locator.find(&selectors.header);
        let main_header = locator.find(&selectors.main_header);

        let mut menu_toggle = locator.find(&selectors.menu_toggle);
        let narrow = dom::viewport_width(&window).map_or(false, |width| width <= config.menu_breakpoint);
        if menu_toggle.is_none() && narrow {
            menu_toggle = create_menu_toggle(&document, &*locator, &config).unwrap_or_else(|err| {
                warn!("Skipping generated menu toggle: {}", err);
                None
            });
        }

        let menu = match (&menu_toggle, main_header) {
            (Some(toggle), Some(main_header)) => {
                let view = DomMenuView {
                    toggle: toggle.clone(),
                    main_header,
                    header_right: locator.find(&selectors.header_right),
                    body: document.body(),
                };
                Some(Rc::new(RefCell::new(MobileMenu::new(view, config.menu_breakpoint))))
            }
            _ => None,
        };

        Self {
            window,
            document,
            locator,
            config: Rc::new(config),
            header,
            menu_toggle,
            menu,
            tracker: Tracker::new(reporter),
            started: Rc::new(Cell::new(false)),
        }
    }

    /// Injects styles, binds listeners and starts the visibility watchers.
    /// A failing step is logged and skipped; later calls are ignored.
    pub fn start(&self) {
        if self.started.replace(true) {
            debug!("Site controller already started");
            return;
        }
        if let Err(err) = styles::inject(&self.document) {
            warn!("Skipping style injection: {}", err);
        }
        self.bind_events();
        self.start_watchers();
        info!("Site controller started");
    }

    fn bind<F>(&self, target: &EventTarget, event: &str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        if let Err(err) = dom::listen(target, event, handler) {
            warn!("Skipping `{}` listener: {}", event, err);
        }
    }

    fn bind_events(&self) {
        let selectors = &self.config.selectors;

        for anchor in self.locator.find_all(&selectors.anchors) {
            let this = self.clone();
            self.bind(&anchor, "click", move |event| this.handle_smooth_scroll(&event));
        }

        if let Some(indicator) = self.locator.find(&selectors.scroll_indicator) {
            let this = self.clone();
            self.bind(&indicator, "click", move |event| this.handle_scroll_down(&event));
        }

        if let Some(toggle) = &self.menu_toggle {
            let this = self.clone();
            self.bind(toggle, "click", move |_| this.toggle_mobile_menu());
        }

        let this = self.clone();
        self.bind(&self.window, "scroll", move |_| this.handle_header_scroll());

        if let Some(form) = self.locator.find(&selectors.contact_form) {
            let this = self.clone();
            self.bind(&form, "submit", move |event| this.handle_form_submit(&event));
        }

        for button in self.locator.find_all(&selectors.tracked_buttons) {
            let this = self.clone();
            self.bind(&button, "click", move |event| this.track_button_click(&event));
        }

        let this = self.clone();
        self.bind(&self.window, "resize", move |_| this.handle_resize());

        let this = self.clone();
        self.bind(&self.document, "keydown", move |event| this.handle_keydown(&event));
    }

    fn start_watchers(&self) {
        let selectors = &self.config.selectors;

        let animated = self.locator.find_all(&selectors.animated);
        let entrance = watch::watch(&animated, watch::ENTRANCE, |element| {
            dom::set_class(&element, ANIMATE_IN, true);
        });
        if let Err(err) = entrance {
            warn!("Skipping entrance animations: {}", err);
        }

        let counters = self.locator.find_all(&selectors.counters);
        let duration = self.config.counter_duration_ms;
        let tick = self.config.counter_tick_ms;
        let counting = watch::watch(&counters, watch::COUNTER, move |element| {
            counter::animate(element, duration, tick);
        });
        if let Err(err) = counting {
            warn!("Skipping counter animations: {}", err);
        }
    }

    fn header_height(&self) -> Option<f64> {
        self.header.as_ref().and_then(dom::offset_height)
    }

    fn scroll_to_element(&self, target: &Element) {
        let top = scroll::scroll_target(
            dom::offset_top(target),
            self.header_height(),
            self.config.header_fallback_height,
        );
        dom::smooth_scroll_to(&self.window, top);
    }

    fn handle_smooth_scroll(&self, event: &Event) {
        let href = dom::current_element(event).and_then(|anchor| anchor.get_attribute("href"));
        let Some(selector) = href.as_deref().and_then(scroll::fragment_selector) else {
            return;
        };
        if let Some(target) = self.locator.find(selector) {
            event.prevent_default();
            debug!("Scrolling to {}", selector);
            self.scroll_to_element(&target);
        }
    }

    fn handle_scroll_down(&self, event: &Event) {
        event.prevent_default();
        if let Some(section) = self.locator.find(&self.config.selectors.scroll_indicator_target) {
            self.scroll_to_element(&section);
        }
    }

    fn toggle_mobile_menu(&self) {
        if let Some(menu) = &self.menu {
            menu.borrow_mut().toggle();
        }
    }

    fn handle_header_scroll(&self) {
        let Some(header) = &self.header else {
            return;
        };
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        dom::set_class(header, SCROLLED, scroll::is_scrolled(scroll_y, self.config.scrolled_threshold));
    }

    fn handle_resize(&self) {
        let (Some(menu), Some(width)) = (&self.menu, dom::viewport_width(&self.window)) else {
            return;
        };
        menu.borrow_mut().on_resize(width);
    }

    fn handle_keydown(&self, event: &Event) {
        let (Some(menu), Some(event)) = (&self.menu, event.dyn_ref::<KeyboardEvent>()) else {
            return;
        };
        menu.borrow_mut().on_key(&event.key());
    }

    fn handle_form_submit(&self, event: &Event) {
        let Some(form) = dom::current_element(event) else {
            return;
        };
        let selectors = &self.config.selectors;
        match form::check(&form, &selectors.required_fields, &selectors.email_field) {
            Verdict::Valid => self.tracker.form_submitted(),
            Verdict::Invalid(messages) => {
                event.prevent_default();
                debug!("Contact form blocked with {} error(s)", messages.len());
                if let Err(err) = form::show_errors(&self.document, &form, &messages) {
                    warn!("Could not render form errors: {}", err);
                }
            }
        }
    }

    fn track_button_click(&self, event: &Event) {
        let Some(button) = dom::current_element(event) else {
            return;
        };
        let text = button.text_content();
        let aria_label = button.get_attribute("aria-label");
        let label = tracking::button_label(text.as_deref(), aria_label.as_deref());
        self.tracker.button_clicked(&label);
    }
}

fn create_menu_toggle(
    document: &Document,
    locator: &dyn ElementLocator,
    config: &SiteConfig,
) -> Result<Option<Element>> {
    let Some(container) = locator.find(&config.selectors.header_container) else {
        return Ok(None);
    };
    let class = config
        .selectors
        .menu_toggle
        .strip_prefix('.')
        .unwrap_or(DEFAULT_TOGGLE_CLASS);

    let toggle = dom::create(document, "button", Some(class), None)?;
    for _ in 0..3 {
        let bar = document.create_element("span")?;
        toggle.append_child(&bar)?;
    }
    container.append_child(&toggle)?;
    debug!("Created mobile menu toggle");
    Ok(Some(toggle))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;
    use crate::dom::fixture;
    use crate::tracking::NoopReporter;

    fn controller() -> SiteController {
        let window = web_sys::window().unwrap();
        let document = fixture::document();
        SiteController::new(
            window,
            document.clone(),
            Rc::new(document),
            Rc::new(NoopReporter),
            SiteConfig::default(),
        )
    }

    fn bind_anchor(controller: &SiteController, anchor: &Element) {
        let this = controller.clone();
        dom::listen(anchor, "click", move |event| this.handle_smooth_scroll(&event)).unwrap();
    }

    #[wasm_bindgen_test]
    fn anchor_to_existing_section_suppresses_navigation() {
        let root = fixture::mount(
            r##"<a id="to-story" href="#story-section">Story</a>
                <section id="story-section" style="margin-top: 600px">Our story</section>"##,
        );
        let anchor = root.find("#to-story").unwrap();
        bind_anchor(&controller(), &anchor);

        assert!(fixture::click(&anchor).default_prevented());
        root.remove();
    }

    #[wasm_bindgen_test]
    fn bare_and_dangling_anchors_keep_default_navigation() {
        let root = fixture::mount(
            r##"<a id="bare-anchor" href="#">Top</a>
                <a id="dangling-anchor" href="#no-such-section">Gone</a>"##,
        );
        let this = controller();
        for id in ["#bare-anchor", "#dangling-anchor"] {
            let anchor = root.find(id).unwrap();
            bind_anchor(&this, &anchor);
            assert!(!fixture::click(&anchor).default_prevented(), "{} was suppressed", id);
        }
        root.remove();
    }

    #[wasm_bindgen_test]
    fn second_start_is_ignored() {
        let this = controller();
        this.start();
        this.clone().start();

        assert!(this.started.get());
        let blocks = fixture::document()
            .query_selector_all(&format!("#{}", styles::STYLE_ELEMENT_ID))
            .unwrap();
        assert_eq!(blocks.length(), 1);
    }
}
