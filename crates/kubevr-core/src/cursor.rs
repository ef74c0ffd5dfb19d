//! Vive cursor state machine.
//!
//! Turns raw raycaster and controller-button input into the mouse-like
//! vocabulary consumed by scene objects. The machine is generic over the
//! entity handle; it only compares handles and never owns them.
//!
//! ```text
//!            found(A)                    found(B)
//!   Idle ─────────────▶ Hovering(A) ───────────────▶ Hovering(B)
//!    ▲                      │        (leave A, enter B)
//!    └──────────────────────┘
//!          cleared(A)
//! ```

/// High-level events synthesized by the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorEventKind {
    Enter,
    Leave,
    Down,
    Up,
    Click,
    GripDown,
    GripUp,
}

/// One event to deliver to the controller and, when `target` is set, to the
/// hovered entity as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission<E> {
    pub kind: CursorEventKind,
    /// Entity under the cursor at the moment of emission.
    pub target: Option<E>,
}

/// Cursor interaction state for one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMachine<E> {
    intersected: Option<E>,
    mouse_down: Option<E>,
    grip_down: Option<E>,
}

impl<E> Default for CursorMachine<E> {
    fn default() -> Self {
        Self {
            intersected: None,
            mouse_down: None,
            grip_down: None,
        }
    }
}

impl<E: Copy + Eq> CursorMachine<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity currently under the cursor.
    pub fn intersected(&self) -> Option<E> {
        self.intersected
    }

    /// Entity that was under the cursor at the last trigger press.
    pub fn mouse_down(&self) -> Option<E> {
        self.mouse_down
    }

    /// Entity that was under the cursor at the last grip press.
    pub fn grip_down(&self) -> Option<E> {
        self.grip_down
    }

    pub fn is_hovering(&self) -> bool {
        self.intersected.is_some()
    }

    /// The raycaster found targets, nearest first. Only the nearest counts.
    pub fn intersection(&mut self, candidates: &[E]) -> Vec<Emission<E>> {
        let Some(&nearest) = candidates.first() else {
            return Vec::new();
        };
        if self.intersected == Some(nearest) {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(2);
        if let Some(previous) = self.intersected {
            out.extend(self.intersection_cleared(previous));
        }
        self.intersected = Some(nearest);
        out.push(self.emission(CursorEventKind::Enter));
        out
    }

    /// The raycaster stopped hitting `target`.
    ///
    /// Clears for anything other than the tracked entity are stale and ignored.
    pub fn intersection_cleared(&mut self, target: E) -> Vec<Emission<E>> {
        if self.intersected != Some(target) {
            return Vec::new();
        }
        // Emit before clearing so listeners still see the target.
        let leave = self.emission(CursorEventKind::Leave);
        self.intersected = None;
        vec![leave]
    }

    pub fn trigger_down(&mut self) -> Vec<Emission<E>> {
        self.mouse_down = self.intersected;
        vec![self.emission(CursorEventKind::Down)]
    }

    /// Up always fires; click only if the press and release hit the same entity.
    pub fn trigger_up(&mut self) -> Vec<Emission<E>> {
        let mut out = vec![self.emission(CursorEventKind::Up)];
        let pressed = self.mouse_down.take();
        if self.intersected.is_some() && pressed == self.intersected {
            out.push(self.emission(CursorEventKind::Click));
        }
        out
    }

    pub fn grip_pressed(&mut self) -> Vec<Emission<E>> {
        self.grip_down = self.intersected;
        vec![self.emission(CursorEventKind::GripDown)]
    }

    pub fn grip_released(&mut self) -> Vec<Emission<E>> {
        self.grip_down = None;
        vec![self.emission(CursorEventKind::GripUp)]
    }

    fn emission(&self, kind: CursorEventKind) -> Emission<E> {
        Emission {
            kind,
            target: self.intersected,
        }
    }
}
