use log::{debug, warn};
use web_sys::{Element, HtmlElement};

use crate::dom;
use crate::styles::ACTIVE;

pub const ESCAPE_KEY: &str = "Escape";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn toggled(self) -> Self {
        match self {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        }
    }
}

pub trait MenuView {
    fn render(&self, state: MenuState);
}

pub struct MobileMenu<V: MenuView> {
    state: MenuState,
    view: V,
    breakpoint: f64,
}

impl<V: MenuView> MobileMenu<V> {
    pub fn new(view: V, breakpoint: f64) -> Self {
        Self {
            state: MenuState::Closed,
            view,
            breakpoint,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn set(&mut self, state: MenuState) {
        if state == self.state {
            return;
        }
        self.state = state;
        self.view.render(state);
        debug!("Mobile menu {:?}", state);
    }

    pub fn toggle(&mut self) {
        self.set(self.state.toggled());
    }

    pub fn on_resize(&mut self, viewport_width: f64) {
        if viewport_width > self.breakpoint && self.state.is_open() {
            self.set(MenuState::Closed);
        }
    }

    pub fn on_key(&mut self, key: &str) {
        if key == ESCAPE_KEY && self.state.is_open() {
            self.set(MenuState::Closed);
        }
    }
}

pub struct DomMenuView {
    pub toggle: Element,
    pub main_header: Element,
    pub header_right: Option<Element>,
    pub body: Option<HtmlElement>,
}

impl MenuView for DomMenuView {
    fn render(&self, state: MenuState) {
        let open = state.is_open();
        for element in [Some(&self.toggle), Some(&self.main_header), self.header_right.as_ref()]
            .into_iter()
            .flatten()
        {
            dom::set_class(element, ACTIVE, open);
        }

        if let Some(body) = &self.body {
            let overflow = if open { "hidden" } else { "" };
            if let Err(err) = body.style().set_property("overflow", overflow) {
                warn!("Could not update body scroll lock: {:?}", err);
            }
        }
    }
}
