// Pointer drag gesture state for the overlay
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    pub last_x: f64,
    pub last_y: f64,
}

impl DragState {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Delta since the previous pointer position, or None when no drag is in progress.
    pub fn advance(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.dragging {
            return None;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        Some((dx, dy))
    }

    pub fn end(&mut self) {
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_per_event() {
        let mut d = DragState::default();
        assert_eq!(d.advance(5.0, 5.0), None);
        d.begin(10.0, 20.0);
        assert_eq!(d.advance(15.0, 18.0), Some((5.0, -2.0)));
        assert_eq!(d.advance(16.0, 18.0), Some((1.0, 0.0)));
        d.end();
        assert_eq!(d.advance(100.0, 100.0), None);
    }
}
