// Small browser helpers shared by the components

use crate::render::normalize_dpr;

/// Wall-clock milliseconds, the same clock `Date.now()` reads.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn device_pixel_ratio(window: &web_sys::Window) -> f64 {
    normalize_dpr(window.device_pixel_ratio())
}
