//! Runtime settings. Read once at startup from an optional inline JSON
//! block in the page; nothing is written back.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::ScaleLimits;

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "kisscam-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct KissCamConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub double_tap_ms: f64,
    pub burst_size: usize,
    pub particle_ttl_ms: u32,
    pub search_message: String,
    pub match_message: String,
    /// `facingMode` passed to `getUserMedia`.
    pub facing_mode: String,
    pub log_level: String,
}

impl Default for KissCamConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 4.0,
            double_tap_ms: 300.0,
            burst_size: 30,
            particle_ttl_ms: 1500,
            search_message: "Who shall be the lucky couple?".to_string(),
            match_message: "KISS!".to_string(),
            facing_mode: "environment".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl KissCamConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: KissCamConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::ScaleLimits { min, max });
        }
        if !(self.double_tap_ms.is_finite() && self.double_tap_ms > 0.0) {
            return Err(ConfigError::DoubleTapWindow(self.double_tap_ms));
        }
        self.level()?;
        Ok(())
    }

    pub fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    pub fn level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Reads overrides from the page. A missing block yields the defaults;
    /// a broken one yields the defaults plus the reason it was rejected.
    pub fn from_document(document: &web_sys::Document) -> (Self, Option<ConfigError>) {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty());
        match raw.map(|text| Self::from_json(&text)) {
            None => (Self::default(), None),
            Some(Ok(config)) => (config, None),
            Some(Err(e)) => (Self::default(), Some(e)),
        }
    }
}
