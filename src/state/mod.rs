pub mod drag;
pub mod overlay;
pub mod session;

pub use drag::DragState;
pub use overlay::{OverlayTransform, ZoomPolicy};
pub use session::CameraSession;
