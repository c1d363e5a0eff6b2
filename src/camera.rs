use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::error::{Result, TryOnError, js_message};

/// Asks the browser for a video-only stream from the camera facing `facing_mode`.
pub async fn request_stream(facing_mode: &str) -> Result<MediaStream> {
    let window = web_sys::window().ok_or(TryOnError::MissingGlobal("window"))?;
    let media_devices = window
        .navigator()
        .media_devices()
        .map_err(|e| TryOnError::Media(js_message(&e)))?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::FALSE);
    constraints.set_video(&video_constraints(facing_mode)?);

    let promise = media_devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| TryOnError::Media(js_message(&e)))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| TryOnError::Media(js_message(&e)))?;
    Ok(MediaStream::from(stream))
}

fn video_constraints(facing_mode: &str) -> Result<JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"facingMode".into(), &facing_mode.into())?;
    Ok(obj.into())
}

pub fn stop_stream(stream: &MediaStream) {
    let tracks = stream.get_tracks();
    for i in 0..tracks.length() {
        let track = MediaStreamTrack::from(tracks.get(i));
        track.stop();
    }
}

/// Binds `stream` to the video element and starts playback.
pub fn attach(video: &HtmlVideoElement, stream: &MediaStream) -> Result<()> {
    video.set_src_object(Some(stream));
    let playback = video.play()?;
    // play() rejects when a later pause() interrupts it
    spawn_local(async move {
        if let Err(e) = JsFuture::from(playback).await {
            log::debug!("video playback interrupted: {}", js_message(&e));
        }
    });
    Ok(())
}

pub fn detach(video: &HtmlVideoElement) {
    let _ = video.pause();
    video.set_src_object(None);
}
