//! Widget state for the try-on modal.
//! One reducer owns visibility, the overlay transform, the drag gesture and
//! the latest snapshot; the camera stream itself lives in `CameraSession`.

use std::rc::Rc;
use yew::Reducible;

use crate::state::{DragState, OverlayTransform, ZoomPolicy};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    /// Modal visible, no camera stream attached.
    Idle,
    CameraActive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryOnState {
    pub phase: Phase,
    /// Product image shown as the overlay.
    pub image_url: String,
    pub overlay: OverlayTransform,
    pub drag: DragState,
    pub zoom: ZoomPolicy,
    /// PNG data URL of the last capture; drives the download link.
    pub snapshot: Option<String>,
    /// Bumped on every reduce so effects can observe changes.
    pub version: u64,
}

impl TryOnState {
    pub fn new(zoom: ZoomPolicy) -> Self {
        Self {
            phase: Phase::Closed,
            image_url: String::new(),
            overlay: OverlayTransform::default(),
            drag: DragState::default(),
            zoom,
            snapshot: None,
            version: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    /// A finished capture only opens its preview tab while the modal is still up.
    pub fn previews_capture(&self, open_preview: bool) -> bool {
        open_preview && self.is_open()
    }

    /// Escape dismisses the modal from any open phase and is ignored while closed.
    pub fn closes_on(&self, key: &str) -> bool {
        key == "Escape" && self.is_open()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TryOnAction {
    Open { image_url: String },
    Close,
    CameraStarted,
    CameraStopped,
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    Wheel { delta_y: f64 },
    Captured { data_url: String },
}

impl Reducible for TryOnState {
    type Action = TryOnAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use TryOnAction::*;
        let mut new = (*self).clone();
        match action {
            Open { image_url } => {
                new.image_url = image_url;
                new.overlay = OverlayTransform::default();
                new.drag = DragState::default();
                if new.phase == Phase::Closed {
                    new.phase = Phase::Idle;
                }
            }
            Close => {
                new.phase = Phase::Closed;
                new.drag.end();
                new.snapshot = None;
            }
            CameraStarted => {
                if new.phase == Phase::Closed {
                    return self;
                }
                new.phase = Phase::CameraActive;
            }
            CameraStopped => {
                if new.phase == Phase::CameraActive {
                    new.phase = Phase::Idle;
                }
            }
            PointerDown { x, y } => {
                if !new.is_open() {
                    return self;
                }
                new.drag.begin(x, y);
            }
            PointerMove { x, y } => match new.drag.advance(x, y) {
                Some((dx, dy)) => new.overlay.translate(dx, dy),
                None => return self,
            },
            PointerUp => {
                if !new.drag.dragging {
                    return self;
                }
                new.drag.end();
            }
            Wheel { delta_y } => {
                if !new.is_open() {
                    return self;
                }
                let policy = new.zoom;
                new.overlay.zoom(delta_y, &policy);
            }
            Captured { data_url } => {
                if !new.is_open() {
                    return self;
                }
                new.snapshot = Some(data_url);
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce_all(actions: Vec<TryOnAction>) -> Rc<TryOnState> {
        actions
            .into_iter()
            .fold(Rc::new(TryOnState::new(ZoomPolicy::default())), |s, a| s.reduce(a))
    }

    fn open(url: &str) -> TryOnAction {
        TryOnAction::Open {
            image_url: url.to_string(),
        }
    }

    #[test]
    fn open_resets_transform() {
        let s = reduce_all(vec![
            open("a.png"),
            TryOnAction::PointerDown { x: 0.0, y: 0.0 },
            TryOnAction::PointerMove { x: 40.0, y: -7.0 },
            TryOnAction::Wheel { delta_y: -1.0 },
            TryOnAction::Close,
            open("b.png"),
        ]);
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.image_url, "b.png");
        assert_eq!(s.overlay, OverlayTransform::default());
        assert!(!s.drag.dragging);
    }

    #[test]
    fn reopen_while_open_resets_without_dropping_camera() {
        let s = reduce_all(vec![
            open("a.png"),
            TryOnAction::CameraStarted,
            TryOnAction::Wheel { delta_y: 10.0 },
            open("a.png"),
        ]);
        assert_eq!(s.phase, Phase::CameraActive);
        assert_eq!(s.overlay.scale, 1.0);
    }

    #[test]
    fn drag_accumulates_offset() {
        let s = reduce_all(vec![
            open("a.png"),
            TryOnAction::PointerDown { x: 100.0, y: 100.0 },
            TryOnAction::PointerMove { x: 110.0, y: 95.0 },
            TryOnAction::PointerMove { x: 130.0, y: 90.0 },
            TryOnAction::PointerUp,
            TryOnAction::PointerMove { x: 500.0, y: 500.0 },
        ]);
        assert_eq!(s.overlay.offset_x, 30.0);
        assert_eq!(s.overlay.offset_y, -10.0);
        assert_eq!(s.overlay.css(), "translate(30px, -10px) scale(1)");
    }

    #[test]
    fn wheel_sequence_stays_in_bounds() {
        let mut actions = vec![open("a.png")];
        for i in 0..300 {
            let delta_y = if (i / 70) % 2 == 0 { -53.0 } else { 120.0 };
            actions.push(TryOnAction::Wheel { delta_y });
        }
        let mut s = Rc::new(TryOnState::new(ZoomPolicy::default()));
        for a in actions {
            s = s.reduce(a);
            assert!(s.overlay.scale >= 0.1 && s.overlay.scale <= 5.0);
        }
    }

    #[test]
    fn camera_phases() {
        let s = reduce_all(vec![open("a.png"), TryOnAction::CameraStarted]);
        assert_eq!(s.phase, Phase::CameraActive);
        let s = s.reduce(TryOnAction::CameraStopped);
        assert_eq!(s.phase, Phase::Idle);
        let s = s.reduce(TryOnAction::CameraStopped);
        assert_eq!(s.phase, Phase::Idle);
        let s = s.reduce(TryOnAction::Close);
        assert_eq!(s.phase, Phase::Closed);
    }

    #[test]
    fn camera_grant_while_closed_is_ignored() {
        let s = reduce_all(vec![TryOnAction::CameraStarted]);
        assert_eq!(s.phase, Phase::Closed);
        assert_eq!(s.version, 0);
    }

    #[test]
    fn escape_only_applies_while_open() {
        let closed = Rc::new(TryOnState::new(ZoomPolicy::default()));
        assert!(!closed.closes_on("Escape"));
        let s = reduce_all(vec![open("a.png"), TryOnAction::CameraStarted]);
        assert!(s.closes_on("Escape"));
        assert!(!s.closes_on("Enter"));
        let s = s.reduce(TryOnAction::Close);
        assert_eq!(s.phase, Phase::Closed);
        assert!(!s.closes_on("Escape"));
    }

    #[test]
    fn no_preview_after_close() {
        let s = reduce_all(vec![open("a.png"), TryOnAction::CameraStarted]);
        assert!(s.previews_capture(true));
        assert!(!s.previews_capture(false));
        let s = s.reduce(TryOnAction::Close);
        assert!(!s.previews_capture(true));
    }

    #[test]
    fn close_hides_snapshot() {
        let s = reduce_all(vec![
            open("a.png"),
            TryOnAction::Captured {
                data_url: "data:image/png;base64,AAAA".to_string(),
            },
        ]);
        assert!(s.snapshot.is_some());
        let s = s.reduce(TryOnAction::Close);
        assert!(s.snapshot.is_none());
    }

    #[test]
    fn input_ignored_while_closed() {
        let s = reduce_all(vec![
            TryOnAction::PointerDown { x: 1.0, y: 1.0 },
            TryOnAction::PointerMove { x: 9.0, y: 9.0 },
            TryOnAction::Wheel { delta_y: -1.0 },
        ]);
        assert_eq!(s.overlay, OverlayTransform::default());
        assert_eq!(s.version, 0);
    }
}
