// Browser helpers shared by the components
use crate::error::TryOnError;

pub const START_CAMERA_FIRST: &str = "Start the camera first.";

pub fn camera_failure_message(err: &TryOnError) -> String {
    format!("Camera access denied or not available: {}", err)
}

/// Blocking `window.alert`; falls back to the log when there is no window.
pub fn alert(msg: &str) {
    match web_sys::window() {
        Some(win) => {
            if win.alert_with_message(msg).is_err() {
                log::warn!("alert suppressed: {}", msg);
            }
        }
        None => log::warn!("{}", msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_message_carries_reason() {
        let err = TryOnError::Media("Permission denied".into());
        assert_eq!(
            camera_failure_message(&err),
            "Camera access denied or not available: Permission denied"
        );
    }
}
