/// Pointer and viewer flags written by input callbacks, read once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    /// Has the user touched the viewer yet
    pub has_interacted: bool,
    /// Is a pointer button currently held down
    pub pointer_down: bool,
    /// Pointer offset from the viewport center, roughly within [-0.5, 0.5]
    pub pointer: [f64; 2],
    /// Enable debug mode
    pub debug: bool,
    /// Simulation paused
    pub paused: bool,
    /// Wireframe mode enabled
    pub wireframe: bool,
}

impl InteractionState {
    /// Normalizes a viewport position against the viewport size
    pub fn set_pointer(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.pointer = [
            (x / width - 0.5).clamp(-0.5, 0.5),
            (y / height - 0.5).clamp(-0.5, 0.5),
        ];
    }

    pub fn press(&mut self) {
        self.pointer_down = true;
        self.has_interacted = true;
    }

    pub fn release(&mut self) {
        self.pointer_down = false;
    }

    /// Is the user actively dragging the model
    pub fn dragging(&self) -> bool {
        self.pointer_down && !self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_normalization() {
        let mut state = InteractionState::default();
        state.set_pointer(50.0, 25.0, 100.0, 100.0);
        assert_eq!(state.pointer, [0.0, -0.25]);
        state.set_pointer(150.0, -10.0, 100.0, 100.0);
        assert_eq!(state.pointer, [0.5, -0.5]);
    }

    #[test]
    fn test_zero_viewport_keeps_pointer() {
        let mut state = InteractionState::default();
        state.set_pointer(10.0, 10.0, 40.0, 40.0);
        let before = state.pointer;
        state.set_pointer(3.0, 3.0, 0.0, 40.0);
        assert_eq!(state.pointer, before);
    }

    #[test]
    fn test_press_marks_interaction() {
        let mut state = InteractionState::default();
        assert!(!state.has_interacted);
        state.press();
        assert!(state.dragging());
        state.release();
        assert!(!state.dragging());
        assert!(state.has_interacted);
    }
}
