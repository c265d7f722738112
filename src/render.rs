//! Camera-to-canvas transform. `FramePlan` is the per-frame mapping from
//! the live video frame onto the viewport canvas; `draw_frame` replays it
//! on a 2d context.

use web_sys::{CanvasRenderingContext2d, HtmlVideoElement};

use crate::model::ViewportState;

/// Width and height, in whatever unit the caller is working in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    /// Backing store size, cleared in full each frame.
    pub canvas_px: Size,
    pub dpr: f64,
    /// Viewport size in CSS pixels.
    pub css: Size,
    pub rotation_rad: f64,
    pub scale: f64,
    pub cover: f64,
    /// Frame rectangle relative to the viewport centre.
    pub dest: Rect,
}

impl FramePlan {
    /// Returns `None` when there is nothing sensible to draw this frame:
    /// the video has no decodable frame yet, or either side has zero area.
    pub fn compute(
        canvas_px: Size,
        dpr: f64,
        source: Size,
        ready: bool,
        viewport: &ViewportState,
    ) -> Option<FramePlan> {
        if !ready || canvas_px.is_empty() || source.is_empty() {
            return None;
        }
        let dpr = normalize_dpr(dpr);
        let css = Size::new(canvas_px.width / dpr, canvas_px.height / dpr);
        let cover = (css.width / source.width).max(css.height / source.height);
        let (dw, dh) = (source.width * cover, source.height * cover);
        Some(FramePlan {
            canvas_px,
            dpr,
            css,
            rotation_rad: viewport.rotation.radians(),
            scale: viewport.scale,
            cover,
            dest: Rect {
                x: -dw / 2.0,
                y: -dh / 2.0,
                width: dw,
                height: dh,
            },
        })
    }

    pub fn center(&self) -> (f64, f64) {
        (self.css.width / 2.0, self.css.height / 2.0)
    }
}

pub fn normalize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Backing store size for a viewport of `css_w` x `css_h` CSS pixels.
/// Truncates like assigning to `canvas.width` does.
pub fn canvas_pixels(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let dpr = normalize_dpr(dpr);
    let px = |v: f64| if v.is_finite() { (v * dpr).max(0.0) as u32 } else { 0 };
    (px(css_w), px(css_h))
}

/// One 2d-context call. `FramePlan::ops` lists them in the order they
/// must hit the context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    ResetTransform,
    Clear(Size),
    Save,
    Scale(f64),
    Translate(f64, f64),
    Rotate(f64),
    DrawVideo(Rect),
    Restore,
}

impl FramePlan {
    /// Clear in device pixels, then work in CSS pixels about the viewport
    /// centre: rotate first, zoom second, frame drawn centred on the origin.
    pub fn ops(&self) -> [DrawOp; 9] {
        let (cx, cy) = self.center();
        [
            DrawOp::ResetTransform,
            DrawOp::Clear(self.canvas_px),
            DrawOp::Save,
            DrawOp::Scale(self.dpr),
            DrawOp::Translate(cx, cy),
            DrawOp::Rotate(self.rotation_rad),
            DrawOp::Scale(self.scale),
            DrawOp::DrawVideo(self.dest),
            DrawOp::Restore,
        ]
    }
}

pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    video: &HtmlVideoElement,
    plan: &FramePlan,
) {
    let mut failed = false;
    for op in plan.ops() {
        // After a failure only the pending restore still runs.
        if failed && op != DrawOp::Restore {
            continue;
        }
        let applied = match op {
            DrawOp::ResetTransform => ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            DrawOp::Clear(size) => {
                ctx.clear_rect(0.0, 0.0, size.width, size.height);
                Ok(())
            }
            DrawOp::Save => {
                ctx.save();
                Ok(())
            }
            DrawOp::Scale(s) => ctx.scale(s, s),
            DrawOp::Translate(x, y) => ctx.translate(x, y),
            DrawOp::Rotate(rad) => ctx.rotate(rad),
            DrawOp::DrawVideo(r) => ctx.draw_image_with_html_video_element_and_dw_and_dh(
                video, r.x, r.y, r.width, r.height,
            ),
            DrawOp::Restore => {
                ctx.restore();
                Ok(())
            }
        };
        if let Err(e) = applied {
            log::warn!("frame draw failed at {op:?}: {}", crate::error::describe_js(&e));
            failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rotation;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn cover_fit_crops_wide_source() {
        let plan = FramePlan::compute(
            Size::new(300.0, 400.0),
            1.0,
            Size::new(640.0, 480.0),
            true,
            &ViewportState::default(),
        )
        .unwrap();
        assert!(close(plan.cover, 400.0 / 480.0));
        assert!(close(plan.dest.width, 640.0 * 400.0 / 480.0));
        assert!(close(plan.dest.height, 400.0));
        assert!(close(plan.dest.x, -plan.dest.width / 2.0));
        assert!(close(plan.dest.y, -200.0));
        assert!(plan.dest.width >= plan.css.width);
        assert!(plan.dest.height >= plan.css.height);
        assert_eq!(plan.center(), (150.0, 200.0));
    }

    #[test]
    fn cover_fit_crops_tall_source() {
        let plan = FramePlan::compute(
            Size::new(800.0, 400.0),
            1.0,
            Size::new(480.0, 640.0),
            true,
            &ViewportState::default(),
        )
        .unwrap();
        assert!(close(plan.dest.width, 800.0));
        assert!(plan.dest.height > 400.0);
    }

    #[test]
    fn device_pixel_ratio_scales_css_space() {
        let plan = FramePlan::compute(
            Size::new(600.0, 800.0),
            2.0,
            Size::new(640.0, 480.0),
            true,
            &ViewportState::default(),
        )
        .unwrap();
        assert_eq!(plan.css, Size::new(300.0, 400.0));
        assert_eq!(plan.canvas_px, Size::new(600.0, 800.0));
        assert!(close(plan.dest.height, 400.0));
    }

    #[test]
    fn carries_rotation_and_scale() {
        let viewport = ViewportState {
            rotation: Rotation::parse("90"),
            scale: 2.5,
        };
        let plan = FramePlan::compute(
            Size::new(100.0, 100.0),
            1.0,
            Size::new(100.0, 100.0),
            true,
            &viewport,
        )
        .unwrap();
        assert!(close(plan.rotation_rad, std::f64::consts::FRAC_PI_2));
        assert_eq!(plan.scale, 2.5);
    }

    #[test]
    fn ops_clear_device_pixels_then_rotate_before_zoom() {
        let viewport = ViewportState {
            rotation: Rotation::parse("90"),
            scale: 2.0,
        };
        let plan = FramePlan::compute(
            Size::new(600.0, 800.0),
            2.0,
            Size::new(640.0, 480.0),
            true,
            &viewport,
        )
        .unwrap();
        assert!(close(plan.rotation_rad, std::f64::consts::FRAC_PI_2));
        assert!(close(plan.dest.x, -320.0 * 400.0 / 480.0));
        assert!(close(plan.dest.y, -200.0));
        assert_eq!(
            plan.ops(),
            [
                DrawOp::ResetTransform,
                DrawOp::Clear(Size::new(600.0, 800.0)),
                DrawOp::Save,
                DrawOp::Scale(2.0),
                DrawOp::Translate(150.0, 200.0),
                DrawOp::Rotate(plan.rotation_rad),
                DrawOp::Scale(2.0),
                DrawOp::DrawVideo(plan.dest),
                DrawOp::Restore,
            ]
        );
    }

    #[test]
    fn nothing_to_draw_until_ready() {
        let vp = ViewportState::default();
        let canvas = Size::new(300.0, 400.0);
        assert!(FramePlan::compute(canvas, 1.0, Size::new(640.0, 480.0), false, &vp).is_none());
        assert!(FramePlan::compute(canvas, 1.0, Size::new(0.0, 480.0), true, &vp).is_none());
        assert!(FramePlan::compute(canvas, 1.0, Size::new(640.0, 0.0), true, &vp).is_none());
        let source = Size::new(640.0, 480.0);
        assert!(FramePlan::compute(Size::new(0.0, 0.0), 1.0, source, true, &vp).is_none());
    }

    #[test]
    fn bad_dpr_falls_back_to_one() {
        assert_eq!(normalize_dpr(0.0), 1.0);
        assert_eq!(normalize_dpr(f64::NAN), 1.0);
        assert_eq!(normalize_dpr(3.0), 3.0);
    }

    #[test]
    fn canvas_pixels_truncate() {
        assert_eq!(canvas_pixels(300.5, 400.0, 2.0), (601, 800));
        assert_eq!(canvas_pixels(100.4, 10.0, 1.5), (150, 15));
        assert_eq!(canvas_pixels(-5.0, f64::NAN, 1.0), (0, 0));
    }
}
