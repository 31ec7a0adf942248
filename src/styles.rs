use log::{debug, warn};
use web_sys::Document;

use crate::dom;
use crate::error::Result;

pub const ACTIVE: &str = "active";
pub const SCROLLED: &str = "scrolled";
pub const ANIMATE_IN: &str = "animate-in";
pub const COUNTING: &str = "counting";
pub const ERROR: &str = "error";

pub const STYLE_ELEMENT_ID: &str = "site-enhancer-styles";

const STYLES: &str = r#"
    .animate-in {
        animation: slideInUp 0.6s ease-out forwards;
    }

    @keyframes slideInUp {
        from {
            opacity: 0;
            transform: translateY(30px);
        }
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }

    .form-errors {
        margin-bottom: 1rem;
    }

    .alert {
        padding: 1rem;
        border-radius: 0.5rem;
        margin-bottom: 1rem;
    }

    .alert-danger {
        background-color: #fee;
        border: 1px solid #fcc;
        color: #c33;
    }

    .error {
        border-color: #dc3545 !important;
        box-shadow: 0 0 0 0.2rem rgba(220, 53, 69, 0.25) !important;
    }
"#;

/// Appends the animation and form-error styles to `<head>`. Returns `false`
/// when the block is already present or the document has no head.
pub fn inject(document: &Document) -> Result<bool> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        debug!("Styles already injected");
        return Ok(false);
    }
    let Some(head) = document.head() else {
        warn!("Document has no <head>, skipping style injection");
        return Ok(false);
    };

    let style = dom::create(document, "style", None, Some(STYLES))?;
    style.set_id(STYLE_ELEMENT_ID);
    head.append_child(&style)?;
    Ok(true)
}
