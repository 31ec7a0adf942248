use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use web_sys::Element;

use crate::dom;
use crate::styles::COUNTING;

/// Leading-integer parse of displayed text: optional whitespace, optional
/// sign, then decimal digits or a `0x` hex literal. Anything else reads as 0.
pub fn parse_target(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let mut value: i64 = 0;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }
    if negative {
        -value
    } else {
        value
    }
}

/// The step is fixed at creation; the target is never re-read.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    target: f64,
    step: f64,
    current: f64,
    finished: bool,
}

impl CountUp {
    pub fn new(target: i64, duration_ms: u32, tick_ms: u32) -> Self {
        let ticks = f64::from(duration_ms) / f64::from(tick_ms.max(1));
        let target = target as f64;
        let step = if ticks > 0.0 { target / ticks } else { target };
        Self {
            target,
            step,
            current: 0.0,
            finished: false,
        }
    }

    pub fn from_text(text: &str, duration_ms: u32, tick_ms: u32) -> Self {
        Self::new(parse_target(text), duration_ms, tick_ms)
    }

    pub fn target(&self) -> i64 {
        self.target as i64
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }
        self.current += self.step;
        if self.current >= self.target {
            self.current = self.target;
            self.finished = true;
        }
        Some(self.current.floor() as i64)
    }
}

/// Rewrites `element` every `tick_ms` until the count reaches its target,
/// then cancels the interval from inside its own callback.
pub fn animate(element: Element, duration_ms: u32, tick_ms: u32) {
    let text = element.text_content().unwrap_or_default();
    let mut count = CountUp::from_text(&text, duration_ms, tick_ms);
    dom::set_class(&element, COUNTING, true);
    debug!("Counting up to {}", count.target());

    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let slot = handle.clone();
    let interval = Interval::new(tick_ms, move || {
        if let Some(value) = count.tick() {
            element.set_text_content(Some(&value.to_string()));
        }
        if count.is_finished() {
            if let Some(interval) = slot.borrow_mut().take() {
                // The timer stops now; the running closure is released on the next turn.
                let callback = interval.cancel();
                Timeout::new(0, move || drop(callback)).forget();
            }
        }
    });
    *handle.borrow_mut() = Some(interval);
}
