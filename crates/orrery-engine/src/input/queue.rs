/// Input event types the engine understands.
/// Pointer coordinates are page pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The mouse cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The first touch point moved to (x, y).
    TouchMove { x: f32, y: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32, pixel_ratio: f32 },
    /// A custom event from the page.
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// Pointer position for pointer and touch moves.
    pub fn pointer(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

/// A queue of input events.
/// The host pushes events between frames; the runner drains them after each tick.
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

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
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
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0, pixel_ratio: 2.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn pointer_and_touch_share_coordinates() {
        assert_eq!(InputEvent::PointerMove { x: 1.0, y: 2.0 }.pointer(), Some((1.0, 2.0)));
        assert_eq!(InputEvent::TouchMove { x: 3.0, y: 4.0 }.pointer(), Some((3.0, 4.0)));
        assert_eq!(
            InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 }.pointer(),
            None
        );
    }
}
