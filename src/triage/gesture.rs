//! Swipe-to-go-back recognition for the compact detail pane.
//!
//! The tracker only reads pointer positions. It reports a [`GestureOutcome`]
//! and leaves acting on it (deselecting) to the presenter.

use super::viewport::ViewportClass;

/// Rightward travel beyond this, measured at contact end, commits the swipe.
pub const COMMIT_THRESHOLD: f32 = 80.0;
/// Vertical travel beyond this that also dominates horizontal travel abandons the swipe.
pub const VERTICAL_ABANDON_THRESHOLD: f32 = 80.0;
/// Maximum visual offset of the pane while dragging.
pub const MAX_OFFSET: f32 = 120.0;

const BASE_SHADOW: f32 = 0.25;
const MAX_SHADOW: f32 = 0.45;
const SHADOW_PER_UNIT: f32 = 1.0 / 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Tracking {
        start: Point,
        current: Point,
    },
    /// A swipe committed; new contacts are ignored until [`GestureTracker::settle`].
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Intentional "go back" swipe.
    Commit,
    /// Contact ended short of the threshold; the pane relaxes to rest.
    Relax,
    /// Movement read as a vertical scroll; all motion discarded.
    Abandon,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    phase: GesturePhase,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, GesturePhase::Tracking { .. })
    }

    /// First contact. Only the compact layout tracks swipes.
    pub fn touch_start(&mut self, point: Point, class: ViewportClass) {
        if class != ViewportClass::Compact || self.phase == GesturePhase::Committing {
            return;
        }

        self.phase = GesturePhase::Tracking {
            start: point,
            current: point,
        };
    }

    pub fn touch_move(&mut self, point: Point) -> Option<GestureOutcome> {
        let GesturePhase::Tracking { start, .. } = self.phase else {
            return None;
        };

        let dx = point.x - start.x;
        let dy = point.y - start.y;
        if dy.abs() > VERTICAL_ABANDON_THRESHOLD && dy.abs() > dx.abs() {
            tracing::trace!(dx, dy, "swipe abandoned as vertical scroll");
            self.phase = GesturePhase::Idle;
            return Some(GestureOutcome::Abandon);
        }

        self.phase = GesturePhase::Tracking {
            start,
            current: point,
        };
        None
    }

    /// Contact end. Returns `None` when nothing was being tracked.
    pub fn touch_end(&mut self) -> Option<GestureOutcome> {
        let GesturePhase::Tracking { start, current } = self.phase else {
            return None;
        };

        if current.x - start.x > COMMIT_THRESHOLD {
            self.phase = GesturePhase::Committing;
            return Some(GestureOutcome::Commit);
        }

        self.phase = GesturePhase::Idle;
        Some(GestureOutcome::Relax)
    }

    /// Returns to idle from any phase.
    pub fn settle(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    /// Horizontal pane offset while dragging, clamped to `0..=MAX_OFFSET`.
    pub fn offset(&self) -> f32 {
        match self.phase {
            GesturePhase::Tracking { start, current } => {
                (current.x - start.x).clamp(0.0, MAX_OFFSET)
            }
            _ => 0.0,
        }
    }

    pub fn shadow_intensity(&self) -> f32 {
        shadow_for_offset(self.offset())
    }
}

/// Non-decreasing in `offset`, capped at the shadow maximum.
pub fn shadow_for_offset(offset: f32) -> f32 {
    if offset <= 0.0 {
        return 0.0;
    }

    (BASE_SHADOW + offset * SHADOW_PER_UNIT).min(MAX_SHADOW)
}
