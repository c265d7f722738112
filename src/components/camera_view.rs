use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlVideoElement, PointerEvent,
    TouchEvent,
};
use yew::prelude::*;

use crate::camera::{frame_ready, start_camera};
use crate::config::KissCamConfig;
use crate::model::Point;
use crate::render::{FramePlan, Size, canvas_pixels, draw_frame};
use crate::state::Session;
use crate::util::{device_pixel_ratio, now_ms};

#[derive(Properties, PartialEq, Clone)]
pub struct CameraViewProps {
    pub config: Rc<KissCamConfig>,
    /// Raw rotation selector value.
    pub rotation: AttrValue,
}

#[function_component(CameraView)]
pub fn camera_view(props: &CameraViewProps) -> Html {
    let heart_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let video_ref = use_node_ref();
    let session = {
        let config = props.config.clone();
        use_mut_ref(move || Session::new(&config))
    };

    // Effect: rotation selector changed
    {
        let session = session.clone();
        use_effect_with(props.rotation.clone(), move |raw| {
            session.borrow_mut().set_rotation(raw);
            || ()
        });
    }
    // Main mount effect (camera, render loop, listeners)
    {
        let heart_ref = heart_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let video_ref = video_ref.clone();
        let session = session.clone();
        let facing_mode = props.config.facing_mode.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let document = window.document().expect("document");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let video: HtmlVideoElement = video_ref.cast::<HtmlVideoElement>().expect("video");
            let heart: HtmlElement = heart_ref.cast::<HtmlElement>().expect("camera heart");

            {
                let video = video.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = start_camera(&video, &facing_mode).await {
                        log::error!("camera unavailable: {e}");
                    }
                });
            }

            // Canvas backing store follows the heart wrapper's on-screen size
            let compute_and_apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let rect = heart.get_bounding_client_rect();
                    let dpr = device_pixel_ratio(&window);
                    let style = canvas.style();
                    style
                        .set_property("width", &format!("{}px", rect.width()))
                        .ok();
                    style
                        .set_property("height", &format!("{}px", rect.height()))
                        .ok();
                    let (w, h) = canvas_pixels(rect.width(), rect.height(), dpr);
                    canvas.set_width(w);
                    canvas.set_height(h);
                    log::debug!("canvas resized to {w}x{h} (dpr {dpr})");
                }
            };
            compute_and_apply_canvas_size();

            let ctx: Option<CanvasRenderingContext2d> = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
            if ctx.is_none() {
                log::error!("2d canvas context unavailable; camera feed will stay blank");
            }

            // Render task: registered once, reschedules itself every display frame
            let draw = {
                let canvas = canvas.clone();
                let video = video.clone();
                let session = session.clone();
                let window = window.clone();
                move || {
                    let Some(ctx) = ctx.as_ref() else {
                        return;
                    };
                    let viewport = session.borrow().viewport;
                    let plan = FramePlan::compute(
                        Size::new(canvas.width() as f64, canvas.height() as f64),
                        device_pixel_ratio(&window),
                        Size::new(video.video_width() as f64, video.video_height() as f64),
                        frame_ready(&video),
                        &viewport,
                    );
                    if let Some(plan) = plan {
                        draw_frame(ctx, &video, &plan);
                    }
                }
            };
            let raf_id = Rc::new(RefCell::new(None));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let window_loop = window.clone();
                let closure_cell_clone = closure_cell.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    draw();
                    if let Some(cb) = closure_cell_clone.borrow().as_ref() {
                        if let Ok(id) =
                            window_loop.request_animation_frame(cb.as_ref().unchecked_ref())
                        {
                            *raf_id_clone.borrow_mut() = Some(id);
                        }
                    }
                })
                    as Box<dyn FnMut()>));
                if let Some(cb) = closure_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }
            // Resize / orientation
            let resize_cb = {
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    compute_and_apply_canvas_size();
                }) as Box<dyn FnMut(_)>)
            };
            for event in ["resize", "orientationchange"] {
                window
                    .add_event_listener_with_callback(event, resize_cb.as_ref().unchecked_ref())
                    .ok();
            }
            // Pointers (pinch zoom)
            let pointer_down_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    let at = Point::new(e.client_x() as f64, e.client_y() as f64);
                    session.borrow_mut().pointer_down(e.pointer_id(), at);
                }) as Box<dyn FnMut(_)>)
            };
            let pointer_move_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    let at = Point::new(e.client_x() as f64, e.client_y() as f64);
                    session.borrow_mut().pointer_move(e.pointer_id(), at);
                }) as Box<dyn FnMut(_)>)
            };
            let pointer_up_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    session.borrow_mut().pointer_up(e.pointer_id());
                }) as Box<dyn FnMut(_)>)
            };
            let pointer_cancel_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    session.borrow_mut().pointer_cancel(e.pointer_id());
                }) as Box<dyn FnMut(_)>)
            };
            // Double tap resets zoom
            let touch_end_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    session.borrow_mut().touch_end(now_ms());
                }) as Box<dyn FnMut(_)>)
            };
            for (event, cb) in [
                ("pointerdown", &pointer_down_cb),
                ("pointermove", &pointer_move_cb),
                ("pointerup", &pointer_up_cb),
                ("pointercancel", &pointer_cancel_cb),
            ] {
                document
                    .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
                    .ok();
            }
            document
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            // Cleanup
            move || {
                for event in ["resize", "orientationchange"] {
                    let _ = window.remove_event_listener_with_callback(
                        event,
                        resize_cb.as_ref().unchecked_ref(),
                    );
                }
                for (event, cb) in [
                    ("pointerdown", &pointer_down_cb),
                    ("pointermove", &pointer_move_cb),
                    ("pointerup", &pointer_up_cb),
                    ("pointercancel", &pointer_cancel_cb),
                ] {
                    let _ = document
                        .remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
                }
                let _ = document.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window.cancel_animation_frame(id);
                }
                // break the self-reference so the loop closure can be dropped
                closure_cell.borrow_mut().take();
            }
        });
    }

    html! {<div ref={heart_ref} id="cameraHeart" class="camera-heart">
        <video ref={video_ref} autoplay=true muted=true playsinline=true style="display:none;"></video>
        <canvas ref={canvas_ref} id="cameraCanvas" style="display:block; touch-action:none;"></canvas>
    </div>}
}
