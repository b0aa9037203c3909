use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Stable identifier for a node in the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// What a [`StageEvent`] reports. The numeric value is what the host sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum StageEventKind {
    FlipStarted = 1,
    FlipFinished = 2,
    DragStarted = 3,
    DragEnded = 4,
    /// The object disappeared while it was being dragged.
    DragAborted = 5,
    RippleSpawned = 6,
}

impl StageEventKind {
    pub fn from_raw(raw: f32) -> Option<Self> {
        match raw as u32 {
            1 => Some(Self::FlipStarted),
            2 => Some(Self::FlipFinished),
            3 => Some(Self::DragStarted),
            4 => Some(Self::DragEnded),
            5 => Some(Self::DragAborted),
            6 => Some(Self::RippleSpawned),
            _ => None,
        }
    }
}

/// An event communicated from the core to the host shell (haptics, sound, UI).
/// Generic container: `kind` identifies the event, `a/b/c` carry a world position.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StageEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl StageEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: StageEventKind, at: Vec3) -> Self {
        Self {
            kind: kind as u32 as f32,
            a: at.x,
            b: at.y,
            c: at.z,
        }
    }

    pub fn kind(&self) -> Option<StageEventKind> {
        StageEventKind::from_raw(self.kind)
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.a, self.b, self.c)
    }
}
