// Double-tap detection over touch-end timestamps
#[derive(Debug, Clone)]
pub struct DoubleTap {
    pub window_ms: f64,
    last_tap: Option<f64>,
}

impl DoubleTap {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_tap: None,
        }
    }

    /// Records a touch end at `now_ms`; true when it completes a double tap.
    pub fn touch_end(&mut self, now_ms: f64) -> bool {
        let fired = self
            .last_tap
            .is_some_and(|prev| now_ms - prev < self.window_ms);
        self.last_tap = Some(now_ms);
        fired
    }
}

impl Default for DoubleTap {
    fn default() -> Self {
        Self::new(300.0)
    }
}
