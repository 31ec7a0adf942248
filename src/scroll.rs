//! Header-offset arithmetic for anchor scrolling and the header scroll state.

pub fn header_offset(header_height: Option<f64>, fallback: f64) -> f64 {
    header_height.unwrap_or(fallback)
}

pub fn scroll_target(target_top: f64, header_height: Option<f64>, fallback: f64) -> f64 {
    target_top - header_offset(header_height, fallback)
}

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Selector for an in-page link's fragment. A bare `#` has no target.
pub fn fragment_selector(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(fragment) if !fragment.trim().is_empty() => Some(href),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_subtracts_rendered_header_height() {
        assert_eq!(scroll_target(1200.0, Some(64.0), 80.0), 1136.0);
    }

    #[test]
    fn offset_falls_back_without_header() {
        assert_eq!(scroll_target(1200.0, None, 80.0), 1120.0);
    }

    #[test]
    fn target_near_top_can_go_negative() {
        assert_eq!(scroll_target(10.0, Some(64.0), 80.0), -54.0);
    }

    #[test]
    fn scrolled_only_strictly_past_threshold() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
    }

    #[test]
    fn fragment_selectors() {
        assert_eq!(fragment_selector("#about"), Some("#about"));
        assert_eq!(fragment_selector("#"), None);
        assert_eq!(fragment_selector("# "), None);
        assert_eq!(fragment_selector("/contact#form"), None);
    }
}
