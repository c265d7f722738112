use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("media devices are not available in this browser")]
    NoMediaDevices,
    #[error("camera request rejected: {0}")]
    Denied(String),
    #[error("camera stream could not be played: {0}")]
    Playback(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scale limits must satisfy 0 < min <= max (got {min}..{max})")]
    ScaleLimits { min: f64, max: f64 },
    #[error("double tap window must be positive (got {0} ms)")]
    DoubleTapWindow(f64),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

/// Renders a JS exception (usually a `DOMException`) for logging.
pub fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
