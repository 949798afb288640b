//! Input events for the drawing session.

use serde::{Deserialize, Serialize};

use crate::Color;

/// A position in surface-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position in pixels from the left edge.
    pub x: f32,
    /// Y position in pixels from the top edge.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Pointer left the capture area.
    Leave,
}

/// A single-pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position in surface coordinates.
    pub x: f32,
    /// Y position in surface coordinates.
    pub y: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y }
    }

    /// Pointer pressed at a position.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, x, y)
    }

    /// Pointer moved to a position.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    /// Pointer released at a position.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, x, y)
    }

    /// Pointer left the surface at a position.
    #[must_use]
    pub const fn leave(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Leave, x, y)
    }

    /// The event position.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// All events a drawing session processes, in delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Pointer input.
    Pointer(PointerEvent),

    /// Palette selection.
    SelectColor {
        /// The swatch to select.
        color: Color,
    },

    /// Clear the surface back to its background.
    Reset,
}

impl From<PointerEvent> for CanvasEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}
