use std::str::FromStr;

use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::Error;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn default_log_level() -> Level {
    Level::Debug // Local builds trace every handled event
}

#[cfg(not(debug_assertions))]
pub fn default_log_level() -> Level {
    Level::Info
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    pub header: String,
    pub main_header: String,
    pub header_right: String,
    pub header_container: String,
    pub menu_toggle: String,
    pub anchors: String,
    pub scroll_indicator: String,
    pub scroll_indicator_target: String,
    pub contact_form: String,
    pub required_fields: String,
    pub email_field: String,
    pub tracked_buttons: String,
    pub animated: String,
    pub counters: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: "header".to_string(),
            main_header: ".main-header".to_string(),
            header_right: ".header-right".to_string(),
            header_container: ".header-container".to_string(),
            menu_toggle: ".mobile-menu-toggle".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            scroll_indicator: ".scroll-indicator".to_string(),
            scroll_indicator_target: "#experiences".to_string(),
            contact_form: "#contact-form".to_string(),
            required_fields: "[required]".to_string(),
            email_field: "#email, [type=\"email\"]".to_string(),
            tracked_buttons: ".btn, .donate".to_string(),
            animated: ".event-item, .stat-item, .profile-card".to_string(),
            counters: ".stat-number".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub menu_breakpoint: f64,
    pub header_fallback_height: f64,
    pub scrolled_threshold: f64,
    pub counter_duration_ms: u32,
    pub counter_tick_ms: u32,
    pub log_level: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            menu_breakpoint: 768.0,
            header_fallback_height: 80.0,
            scrolled_threshold: 50.0,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            log_level: None,
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let mut config: SiteConfig = serde_json::from_str(text)?;
        config.counter_tick_ms = config.counter_tick_ms.max(1);
        Ok(config)
    }

    pub fn log_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|name| Level::from_str(name).ok())
            .unwrap_or_else(default_log_level)
    }
}

/// Reads the `<script id="site-config" type="application/json">` block, if any.
pub fn from_document(document: &Document) -> Result<SiteConfig, Error> {
    let text = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty());

    match text {
        Some(text) => SiteConfig::from_json(&text),
        None => Ok(SiteConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.menu_breakpoint, 768.0);
        assert_eq!(config.selectors.counters, ".stat-number");
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let config = SiteConfig::from_json(
            r##"{"menu_breakpoint": 1024, "selectors": {"contact_form": "#signup"}}"##,
        )
        .unwrap();
        assert_eq!(config.menu_breakpoint, 1024.0);
        assert_eq!(config.selectors.contact_form, "#signup");
        assert_eq!(config.selectors.header, "header");
        assert_eq!(config.counter_duration_ms, 2000);
    }

    #[test]
    fn zero_tick_is_raised_to_one() {
        let config = SiteConfig::from_json(r#"{"counter_tick_ms": 0}"#).unwrap();
        assert_eq!(config.counter_tick_ms, 1);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            SiteConfig::from_json("{not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn log_level_parses_names_and_falls_back() {
        let mut config = SiteConfig::default();
        config.log_level = Some("warn".to_string());
        assert_eq!(config.log_level(), Level::Warn);

        config.log_level = Some("chatty".to_string());
        assert_eq!(config.log_level(), default_log_level());
    }
}
