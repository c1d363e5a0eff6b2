use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TryOnError {
    #[error("browser global `{0}` is not available")]
    MissingGlobal(&'static str),
    #[error("element `#{0}` is missing or has the wrong type")]
    MissingElement(String),
    #[error("{0}")]
    Media(String),
    #[error("video has no decoded frame yet")]
    VideoNotReady,
    #[error("canvas error: {0}")]
    Canvas(String),
    #[error("overlay image failed to load")]
    ImageDecode,
    #[error("invalid config: {0}")]
    Config(String),
    #[error("{0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, TryOnError>;

/// Best-effort human readable text for a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Ok(msg) = js_sys::Reflect::get(value, &JsValue::from_str("message")) {
        if let Some(s) = msg.as_string() {
            return s;
        }
    }
    format!("{:?}", value)
}

impl From<JsValue> for TryOnError {
    fn from(value: JsValue) -> Self {
        TryOnError::Js(js_message(&value))
    }
}
