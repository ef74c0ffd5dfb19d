//! Bevy messages and entity events for cursor interaction and pod lifecycle.

use bevy::prelude::*;
use kubevr_core::CursorEventKind;

/// Raw input for one cursor, in arrival order.
///
/// Produced by the controller raycaster and by whatever maps device buttons
/// (XR trigger/grip, mouse buttons) for the controller.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct CursorInput {
    /// Controller entity carrying the `ViveCursor`.
    pub cursor: Entity,
    pub kind: CursorInputKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorInputKind {
    /// Entities under the ray, nearest first.
    Intersection(Vec<Entity>),
    /// This entity is no longer under the ray.
    IntersectionCleared(Entity),
    TriggerDown,
    TriggerUp,
    GripDown,
    GripUp,
}

impl CursorInput {
    pub fn new(cursor: Entity, kind: CursorInputKind) -> Self {
        Self { cursor, kind }
    }
}

/// Fired once when mesh and material storage become available, so cursors
/// attached before that can build their beam.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RenderSurfaceReady;

macro_rules! cursor_event {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// Triggered twice: on the controller, and on the hovered entity when
        /// there is one.
        #[derive(EntityEvent, Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            /// Receiver: the controller or the hovered entity.
            pub entity: Entity,
            /// Controller carrying the cursor.
            pub cursor: Entity,
            /// Hovered entity at the time of the event.
            pub target: Option<Entity>,
        }
    };
}

cursor_event!(
    /// The cursor started pointing at an entity.
    CursorEnter
);
cursor_event!(
    /// The cursor stopped pointing at an entity.
    CursorLeave
);
cursor_event!(
    /// Trigger pressed.
    CursorDown
);
cursor_event!(
    /// Trigger released.
    CursorUp
);
cursor_event!(
    /// Trigger pressed and released over the same entity.
    CursorClick
);
cursor_event!(
    /// Grip pressed.
    GripDown
);
cursor_event!(
    /// Grip released.
    GripUp
);

/// Trigger the entity event matching `kind` on `receiver`.
pub(crate) fn trigger_cursor_event(
    commands: &mut Commands,
    kind: CursorEventKind,
    receiver: Entity,
    cursor: Entity,
    target: Option<Entity>,
) {
    match kind {
        CursorEventKind::Enter => commands.trigger(CursorEnter {
            entity: receiver,
            cursor,
            target,
        }),
        CursorEventKind::Leave => commands.trigger(CursorLeave {
            entity: receiver,
            cursor,
            target,
        }),
        CursorEventKind::Down => commands.trigger(CursorDown {
            entity: receiver,
            cursor,
            target,
        }),
        CursorEventKind::Up => commands.trigger(CursorUp {
            entity: receiver,
            cursor,
            target,
        }),
        CursorEventKind::Click => commands.trigger(CursorClick {
            entity: receiver,
            cursor,
            target,
        }),
        CursorEventKind::GripDown => commands.trigger(GripDown {
            entity: receiver,
            cursor,
            target,
        }),
        CursorEventKind::GripUp => commands.trigger(GripUp {
            entity: receiver,
            cursor,
            target,
        }),
    }
}

/// Ask the cluster to delete the pod shown by this entity.
///
/// The entity stays until the server confirms with a remove event.
#[derive(EntityEvent, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyPod {
    pub entity: Entity,
}
