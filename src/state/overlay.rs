// Overlay placement state and the zoom policy applied to it.
use serde::{Deserialize, Serialize};

/// Bounds and step factors for wheel zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomPolicy {
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            zoom_in_factor: 1.05,
            zoom_out_factor: 0.95,
            min_scale: 0.1,
            max_scale: 5.0,
        }
    }
}

impl ZoomPolicy {
    pub fn is_valid(&self) -> bool {
        self.zoom_in_factor > 0.0
            && self.zoom_out_factor > 0.0
            && self.min_scale > 0.0
            && self.min_scale <= self.max_scale
    }

    /// Factor for one wheel notch. Anything that is not an upward scroll shrinks.
    pub fn factor_for(&self, delta_y: f64) -> f64 {
        if -delta_y > 0.0 {
            self.zoom_in_factor
        } else {
            self.zoom_out_factor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl OverlayTransform {
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn zoom(&mut self, delta_y: f64, policy: &ZoomPolicy) {
        let factor = policy.factor_for(delta_y);
        self.scale = (self.scale * factor).clamp(policy.min_scale, policy.max_scale);
    }

    /// CSS `transform` value, rebuilt from the whole triple every time.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset_x, self.offset_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_css() {
        assert_eq!(
            OverlayTransform::default().css(),
            "translate(0px, 0px) scale(1)"
        );
    }

    #[test]
    fn css_reflects_full_state() {
        let mut t = OverlayTransform::default();
        t.translate(12.0, -4.5);
        t.zoom(-100.0, &ZoomPolicy::default());
        assert_eq!(t.css(), "translate(12px, -4.5px) scale(1.05)");
    }

    #[test]
    fn wheel_direction_picks_factor() {
        let p = ZoomPolicy::default();
        assert_eq!(p.factor_for(-3.0), 1.05);
        assert_eq!(p.factor_for(3.0), 0.95);
        // a purely horizontal wheel event reports deltaY == 0 and shrinks
        assert_eq!(p.factor_for(0.0), 0.95);
    }

    #[test]
    fn scale_stays_clamped() {
        let p = ZoomPolicy::default();
        let mut t = OverlayTransform::default();
        for _ in 0..500 {
            t.zoom(-1.0, &p);
            assert!(t.scale <= 5.0);
        }
        assert_eq!(t.scale, 5.0);
        for _ in 0..500 {
            t.zoom(1.0, &p);
            assert!(t.scale >= 0.1);
        }
        assert_eq!(t.scale, 0.1);
    }

    #[test]
    fn invalid_policies() {
        let mut p = ZoomPolicy::default();
        assert!(p.is_valid());
        p.min_scale = 6.0;
        assert!(!p.is_valid());
        p = ZoomPolicy {
            zoom_out_factor: 0.0,
            ..ZoomPolicy::default()
        };
        assert!(!p.is_valid());
    }
}
