/// Pointer buttons the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Press starts a placement gesture, release ends it.
    Primary,
    /// Held to orbit the camera with pointer deltas.
    Secondary,
    Middle,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

/// Input event types the session understands.
/// Pointer coordinates are in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A button was pressed at (x, y).
    PointerDown { button: PointerButton, x: f32, y: f32 },
    /// A button was released at (x, y).
    PointerUp { button: PointerButton, x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// Relative pointer motion, used for camera orbit.
    PointerDelta { dx: f32, dy: f32 },
    /// Wheel steps. Positive scrolls away (zoom out).
    Scroll { delta: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The viewport was resized.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// The host writes events into the queue; the runner drains them each frame
/// before the session's continuous update.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { button: PointerButton::Primary, x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], InputEvent::PointerDown { .. }));
        assert!(matches!(events[1], InputEvent::KeyDown { key_code: 32 }));
        assert!(q.is_empty());
    }

    #[test]
    fn button_indices_follow_dom_order() {
        assert_eq!(PointerButton::from_index(0), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_index(2), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_index(7), None);
    }
}
