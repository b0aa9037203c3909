use glam::Vec2;

/// Touch phase as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Begin,
    Move,
    End,
    Cancel,
}

/// A raw pointer sample in viewport points (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub location: Vec2,
    pub phase: PointerPhase,
    /// Host timestamp in seconds.
    pub timestamp: f64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, timestamp: f64) -> Self {
        Self {
            location: Vec2::new(x, y),
            phase,
            timestamp,
        }
    }

    pub fn begin(x: f32, y: f32, timestamp: f64) -> Self {
        Self::new(PointerPhase::Begin, x, y, timestamp)
    }

    pub fn moved(x: f32, y: f32, timestamp: f64) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp)
    }

    pub fn end(x: f32, y: f32, timestamp: f64) -> Self {
        Self::new(PointerPhase::End, x, y, timestamp)
    }

    pub fn cancel(x: f32, y: f32, timestamp: f64) -> Self {
        Self::new(PointerPhase::Cancel, x, y, timestamp)
    }
}

/// Input event types the stage understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// The render surface changed size (points).
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them once per frame
/// in arrival order.
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
