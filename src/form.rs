use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom::{self, ElementLocator};
use crate::error::Result;
use crate::styles::ERROR;
use crate::validation::{self, FormField};

pub const ERROR_PANEL_CLASS: &str = "form-errors";
const ERROR_HEADING: &str = "Please correct the following errors:";

impl FormField for Element {
    fn name(&self) -> Option<String> {
        self.get_attribute("name")
    }

    fn id(&self) -> Option<String> {
        Some(Element::id(self))
    }

    fn value(&self) -> String {
        if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            self.get_attribute("value").unwrap_or_default()
        }
    }
}

pub enum Verdict {
    Valid,
    Invalid(Vec<String>),
}

pub fn check(form: &Element, required_selector: &str, email_selector: &str) -> Verdict {
    for marked in form.find_all(&format!(".{}", ERROR)) {
        dom::set_class(&marked, ERROR, false);
    }

    let required = form.find_all(required_selector);
    let email = form.find(email_selector);
    match validation::validate(&required, email.as_ref()) {
        Ok(()) => Verdict::Valid,
        Err(invalid) => Verdict::Invalid(
            invalid
                .iter()
                .map(|failure| {
                    dom::set_class(failure.field, ERROR, true);
                    failure.error.to_string()
                })
                .collect(),
        ),
    }
}

/// Renders `messages` into the form's error panel, creating the panel as the
/// form's first child on first use, then scrolls it into view.
pub fn show_errors(document: &Document, form: &Element, messages: &[String]) -> Result<()> {
    let panel = match document.find(&format!(".{}", ERROR_PANEL_CLASS)) {
        Some(panel) => panel,
        None => {
            let panel = dom::create(document, "div", Some(ERROR_PANEL_CLASS), None)?;
            form.insert_before(&panel, form.first_child().as_ref())?;
            panel
        }
    };

    let alert = dom::create(document, "div", Some("alert alert-danger"), None)?;
    let heading = dom::create(document, "strong", None, Some(ERROR_HEADING))?;
    alert.append_child(&heading)?;
    let list = dom::create(document, "ul", None, None)?;
    for message in messages {
        let item = dom::create(document, "li", None, Some(message))?;
        list.append_child(&item)?;
    }
    alert.append_child(&list)?;

    panel.set_text_content(None);
    panel.append_child(&alert)?;
    dom::scroll_into_view_centered(&panel);
    Ok(())
}
