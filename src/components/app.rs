use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlCanvasElement, HtmlElement, HtmlImageElement, HtmlVideoElement, MediaStream,
};
use yew::prelude::*;

use super::{camera_controls::CameraControls, download_link::DownloadLink};
use crate::camera;
use crate::config::WidgetConfig;
use crate::model::{Phase, TryOnAction, TryOnState};
use crate::snapshot::{CapturePlan, Compositor, Rect};
use crate::state::CameraSession;
use crate::util;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: Rc<WidgetConfig>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let state = use_reducer({
        let zoom = config.zoom;
        move || TryOnState::new(zoom)
    });
    // Window listeners outlive a render; they read the latest handle from here.
    let state_ref = use_mut_ref(|| state.clone());
    let session = use_mut_ref(CameraSession::<MediaStream>::default);
    let video_ref = use_node_ref();
    let overlay_ref = use_node_ref();
    let canvas_ref = use_node_ref();

    {
        let state_ref = state_ref.clone();
        let current = state.clone();
        use_effect_with(state.version, move |_| {
            *state_ref.borrow_mut() = current;
            || ()
        });
    }

    let stop_camera: Rc<dyn Fn()> = {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let state = state.clone();
        Rc::new(move || {
            let released = session.borrow_mut().release();
            let Some(stream) = released else {
                return;
            };
            camera::stop_stream(&stream);
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                camera::detach(&video);
            }
            log::info!("camera stopped");
            state.dispatch(TryOnAction::CameraStopped);
        })
    };

    let close: Rc<dyn Fn()> = {
        let stop_camera = stop_camera.clone();
        let state = state.clone();
        Rc::new(move || {
            stop_camera();
            state.dispatch(TryOnAction::Close);
            log::info!("try-on closed");
        })
    };

    // Trigger button in the host page
    {
        let state = state.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            let trigger = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(&config.trigger_id))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            let click_cb = trigger.as_ref().map(|trigger| {
                let source = trigger.clone();
                let key = config.image_url_key.clone();
                let cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let image_url = source.dataset().get(&key).unwrap_or_else(|| {
                        log::warn!("trigger has no data attribute for `{}`", key);
                        String::new()
                    });
                    log::info!("try-on opened for {}", image_url);
                    state.dispatch(TryOnAction::Open { image_url });
                }) as Box<dyn FnMut(_)>);
                if trigger
                    .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                    .is_err()
                {
                    log::warn!("could not listen for trigger clicks");
                }
                cb
            });
            move || {
                if let (Some(trigger), Some(cb)) = (trigger, click_cb) {
                    let _ = trigger
                        .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
                }
            }
        });
    }

    // Escape closes the modal from any open phase
    {
        let state_ref = state_ref.clone();
        let close = close.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let key_cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                let should_close = state_ref.borrow().closes_on(&e.key());
                if should_close {
                    close();
                }
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &window {
                let _ = win
                    .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        key_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(key_cb);
            }
        });
    }

    // Wheel zoom; registered natively so prevent_default can stop the page scroll
    {
        let overlay_ref = overlay_ref.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let overlay = overlay_ref.cast::<HtmlElement>();
            let wheel_cb = Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                e.prevent_default();
                state.dispatch(TryOnAction::Wheel {
                    delta_y: e.delta_y(),
                });
            }) as Box<dyn FnMut(_)>);
            if let Some(el) = &overlay {
                let _ = el
                    .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(el) = overlay {
                    let _ = el.remove_event_listener_with_callback(
                        "wheel",
                        wheel_cb.as_ref().unchecked_ref(),
                    );
                }
                drop(wheel_cb);
            }
        });
    }

    let on_start: Callback<()> = {
        let session = session.clone();
        let video_ref = video_ref.clone();
        let state = state.clone();
        let facing_mode = config.facing_mode.clone();
        Callback::from(move |()| {
            let ticket = session.borrow_mut().begin_request();
            let Some(ticket) = ticket else {
                let s = session.borrow();
                log::debug!(
                    "camera start ignored (active: {}, pending: {})",
                    s.is_active(),
                    s.is_pending()
                );
                return;
            };
            let session = session.clone();
            let video_ref = video_ref.clone();
            let state = state.clone();
            let facing_mode = facing_mode.clone();
            spawn_local(async move {
                match camera::request_stream(&facing_mode).await {
                    Ok(stream) => {
                        let attached = session.borrow_mut().attach(ticket, stream.clone());
                        if let Err(stale) = attached {
                            log::info!(
                                "dropping camera grant {} that arrived after stop",
                                ticket
                            );
                            camera::stop_stream(&stale);
                            return;
                        }
                        match video_ref.cast::<HtmlVideoElement>() {
                            Some(video) => {
                                if let Err(e) = camera::attach(&video, &stream) {
                                    log::warn!("video playback failed: {}", e);
                                }
                            }
                            None => log::warn!("video element is not mounted"),
                        }
                        log::info!("camera started");
                        state.dispatch(TryOnAction::CameraStarted);
                    }
                    Err(e) => {
                        let current = session.borrow_mut().fail(ticket);
                        if !current {
                            log::info!(
                                "ignoring camera failure {} that arrived after stop: {}",
                                ticket,
                                e
                            );
                            return;
                        }
                        log::warn!("camera request failed: {}", e);
                        util::alert(&util::camera_failure_message(&e));
                    }
                }
            });
        })
    };

    let on_stop: Callback<()> = {
        let stop_camera = stop_camera.clone();
        Callback::from(move |()| stop_camera())
    };

    let on_close: Callback<()> = {
        let close = close.clone();
        Callback::from(move |()| close())
    };

    let on_capture: Callback<()> = {
        let video_ref = video_ref.clone();
        let overlay_ref = overlay_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let state = state.clone();
        let state_ref = state_ref.clone();
        let open_preview = config.open_preview;
        Callback::from(move |()| {
            let (Some(video), Some(overlay), Some(canvas)) = (
                video_ref.cast::<HtmlVideoElement>(),
                overlay_ref.cast::<HtmlImageElement>(),
                canvas_ref.cast::<HtmlCanvasElement>(),
            ) else {
                log::warn!("try-on elements are not mounted");
                return;
            };
            let overlay_rect = Rect::from(&overlay.get_bounding_client_rect());
            let plan = match CapturePlan::measure(&video, overlay_rect) {
                Ok(plan) => plan,
                Err(e) => {
                    log::debug!("capture rejected: {}", e);
                    util::alert(util::START_CAMERA_FIRST);
                    return;
                }
            };
            let overlay_src = overlay.src();
            let state = state.clone();
            let state_ref = state_ref.clone();
            spawn_local(async move {
                let result = match Compositor::new(canvas) {
                    Ok(compositor) => compositor.capture(&video, &plan, &overlay_src).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(data_url) => {
                        log::info!("snapshot captured ({} bytes)", data_url.len());
                        let preview = state_ref.borrow().previews_capture(open_preview);
                        state.dispatch(TryOnAction::Captured {
                            data_url: data_url.clone(),
                        });
                        if preview {
                            if let Some(win) = web_sys::window() {
                                let _ = win.open_with_url(&data_url);
                            }
                        } else {
                            log::debug!("skipping preview tab");
                        }
                    }
                    Err(e) => {
                        log::warn!("capture failed: {}", e);
                        util::alert(&format!("Capture failed: {}", e));
                    }
                }
            });
        })
    };

    let on_pointer_down = {
        let state = state.clone();
        Callback::from(move |e: PointerEvent| {
            if let Some(target) = e.target_dyn_into::<Element>() {
                let _ = target.set_pointer_capture(e.pointer_id());
            }
            state.dispatch(TryOnAction::PointerDown {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            });
        })
    };
    let on_pointer_move = {
        let state = state.clone();
        Callback::from(move |e: PointerEvent| {
            state.dispatch(TryOnAction::PointerMove {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            });
        })
    };
    let on_pointer_up = {
        let state = state.clone();
        Callback::from(move |e: PointerEvent| {
            state.dispatch(TryOnAction::PointerUp);
            if let Some(target) = e.target_dyn_into::<Element>() {
                let _ = target.release_pointer_capture(e.pointer_id());
            }
        })
    };

    let open = state.is_open();
    let modal_style = format!(
        "display:{}; position:fixed; inset:0; align-items:center; justify-content:center; background:rgba(0,0,0,0.7); z-index:1000;",
        if open { "flex" } else { "none" }
    );
    let overlay_style = format!(
        "position:absolute; top:20%; left:30%; width:40%; touch-action:none; cursor:{}; user-select:none; transform-origin:center; transform:{};",
        if state.drag.dragging { "grabbing" } else { "grab" },
        state.overlay.css()
    );

    html! {<div id="tryOnModal" style={modal_style} aria-hidden={if open { "false" } else { "true" }}>
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; display:flex; flex-direction:column; color:#e6edf3;">
            <div style="position:relative; width:640px; max-width:90vw; overflow:hidden; background:#000; border-radius:8px;">
                <video ref={video_ref} id="tryonVideo" autoplay={true} playsinline={true} muted={true}
                    style="display:block; width:100%;"></video>
                <img ref={overlay_ref} id="tryonOverlay" src={state.image_url.clone()} alt="Product preview" draggable="false"
                    style={overlay_style}
                    onpointerdown={on_pointer_down}
                    onpointermove={on_pointer_move}
                    onpointerup={on_pointer_up.clone()}
                    onpointercancel={on_pointer_up} />
            </div>
            <CameraControls camera_active={state.phase == Phase::CameraActive} on_start={on_start} on_stop={on_stop} on_capture={on_capture} on_close={on_close} />
            <DownloadLink href={state.snapshot.clone()} file_name={config.download_name.clone()} />
            <canvas ref={canvas_ref} id="tryonCanvas" style="display:none;"></canvas>
        </div>
    </div>}
}
