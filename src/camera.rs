// Live camera stream into the hidden <video> element
use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlMediaElement, HtmlVideoElement, MediaStream, MediaStreamConstraints};

use crate::error::{CameraError, describe_js};

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

pub fn frame_ready(video: &HtmlVideoElement) -> bool {
    video.ready_state() >= HAVE_CURRENT_DATA
}

/// Asks for a video-only stream, preferring `facing_mode`, and starts
/// playing it into `video`.
pub async fn start_camera(video: &HtmlVideoElement, facing_mode: &str) -> Result<(), CameraError> {
    let devices = web_sys::window()
        .and_then(|w| w.navigator().media_devices().ok())
        .ok_or(CameraError::NoMediaDevices)?;

    let video_constraints = Object::new();
    Reflect::set(
        &video_constraints,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str(facing_mode),
    )
    .map_err(|e| CameraError::Denied(describe_js(&e)))?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints);
    constraints.set_audio(&JsValue::FALSE);

    let request = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| CameraError::Denied(describe_js(&e)))?;
    let stream: MediaStream = JsFuture::from(request)
        .await
        .map_err(|e| CameraError::Denied(describe_js(&e)))?
        .dyn_into()
        .map_err(|v| CameraError::Denied(describe_js(&v)))?;

    let media: &HtmlMediaElement = video.as_ref();
    media.set_src_object(Some(&stream));
    let playing = media
        .play()
        .map_err(|e| CameraError::Playback(describe_js(&e)))?;
    JsFuture::from(playing)
        .await
        .map_err(|e| CameraError::Playback(describe_js(&e)))?;
    log::info!(
        "camera streaming {}x{}",
        video.video_width(),
        video.video_height()
    );
    Ok(())
}
