// Mutable session state shared by the render task and the input handlers
use crate::config::KissCamConfig;
use crate::model::{Point, Rotation, ScaleLimits, ViewportState};

use super::{DoubleTap, GestureTracker};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub viewport: ViewportState,
    pub gestures: GestureTracker,
    pub double_tap: DoubleTap,
    pub limits: ScaleLimits,
}

impl Session {
    pub fn new(config: &KissCamConfig) -> Self {
        Self {
            viewport: ViewportState::default(),
            gestures: GestureTracker::default(),
            double_tap: DoubleTap::new(config.double_tap_ms),
            limits: config.scale_limits(),
        }
    }

    pub fn pointer_down(&mut self, id: i32, at: Point) {
        let was_engaged = self.gestures.is_engaged();
        self.gestures.pointer_down(id, at, &self.viewport);
        if let (false, Some(base)) = (was_engaged, self.gestures.baseline()) {
            log::debug!(
                "pinch engaged: {:.1}px apart at scale {:.2}",
                base.initial_distance,
                base.scale_at_start
            );
        }
    }

    pub fn pointer_move(&mut self, id: i32, at: Point) {
        self.gestures
            .pointer_move(id, at, &mut self.viewport, self.limits);
    }

    pub fn pointer_up(&mut self, id: i32) {
        self.gestures.pointer_up(id, &self.viewport);
    }

    pub fn pointer_cancel(&mut self, id: i32) {
        self.gestures.pointer_cancel(id, &self.viewport);
    }

    pub fn touch_end(&mut self, now_ms: f64) {
        if self.double_tap.touch_end(now_ms) {
            self.reset_zoom();
        }
    }

    pub fn reset_zoom(&mut self) {
        let scale = self.limits.clamp(1.0);
        self.viewport.scale = scale;
        self.gestures.rebase_scale(scale);
        log::debug!(
            "zoom reset ({} pointers down)",
            self.gestures.pointers().len()
        );
    }

    pub fn set_rotation(&mut self, raw: &str) {
        self.viewport.rotation = Rotation::parse(raw);
        log::info!("rotation set to {}", self.viewport.rotation.degrees());
    }
}
