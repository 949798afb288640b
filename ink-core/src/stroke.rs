//! Stroke capture state machine.
//!
//! ```text
//!            down(x,y)                 move(x,y): paint pen -> (x,y)
//!   ┌──────┐ ─────────► ┌─────────┐ ◄──┐
//!   │ Idle │            │ Drawing │ ───┘
//!   └──────┘ ◄───────── └─────────┘
//!            up / leave
//! ```
//!
//! A stroke's color is captured from the palette when it starts and never
//! changes afterwards. Moves while idle, downs while drawing, and ups while
//! idle are ignored.

use crate::{CanvasError, CanvasResult, Color, Palette, Point, PointerEvent, PointerPhase, Surface};

/// Stroke width in pixels.
pub const STROKE_WIDTH: f32 = 5.0;

/// Current state of the stroke machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// No stroke in progress.
    Idle,
    /// A stroke is in progress.
    Drawing {
        /// Last pen position.
        pen: Point,
        /// Color fixed at stroke start.
        color: Color,
    },
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeTransition {
    /// A new stroke started.
    Started,
    /// A segment was painted.
    Painted,
    /// The stroke ended.
    Finished,
    /// The event had no effect in the current state.
    Ignored,
}

/// Tracks drawing state and paints segments as the pointer moves.
#[derive(Debug, Clone)]
pub struct StrokeMachine {
    state: StrokeState,
    width: f32,
}

impl StrokeMachine {
    /// Create an idle machine painting at `width` pixels.
    #[must_use]
    pub fn new(width: f32) -> Self {
        Self {
            state: StrokeState::Idle,
            width,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> StrokeState {
        self.state
    }

    /// Whether a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Stroke width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Handle a pointer event.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UninitializedSurface`] if a stroke is started or
    /// continued before the surface exists. A refused start leaves the machine
    /// idle.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        palette: &Palette,
        surface: &mut Surface,
    ) -> CanvasResult<StrokeTransition> {
        match event.phase {
            PointerPhase::Down => {
                if !surface.is_initialized() {
                    return Err(CanvasError::UninitializedSurface);
                }
                Ok(self.begin(event.position(), palette.selected()))
            }
            PointerPhase::Move => self.extend(event.position(), surface),
            PointerPhase::Up | PointerPhase::Leave => Ok(self.finish()),
        }
    }

    /// Start a stroke at `at` in `color`. Ignored while already drawing.
    pub fn begin(&mut self, at: Point, color: Color) -> StrokeTransition {
        if self.is_drawing() {
            tracing::debug!("Ignoring pointer down at {at:?}: stroke already in progress");
            return StrokeTransition::Ignored;
        }
        tracing::debug!("Stroke started at ({}, {}) in {color}", at.x, at.y);
        self.state = StrokeState::Drawing { pen: at, color };
        StrokeTransition::Started
    }

    /// Paint from the pen to `to` and move the pen there.
    ///
    /// The pen advances even if painting fails, so the next segment starts
    /// from where the pointer actually is.
    ///
    /// # Errors
    ///
    /// Propagates surface paint errors.
    pub fn extend(&mut self, to: Point, surface: &mut Surface) -> CanvasResult<StrokeTransition> {
        let StrokeState::Drawing { pen, color } = self.state else {
            return Ok(StrokeTransition::Ignored);
        };
        self.state = StrokeState::Drawing { pen: to, color };
        surface.draw_segment(pen, to, color, self.width)?;
        Ok(StrokeTransition::Painted)
    }

    /// End the current stroke. Ignored while idle.
    pub fn finish(&mut self) -> StrokeTransition {
        if self.is_drawing() {
            tracing::debug!("Stroke finished");
            self.state = StrokeState::Idle;
            StrokeTransition::Finished
        } else {
            StrokeTransition::Ignored
        }
    }
}

impl Default for StrokeMachine {
    fn default() -> Self {
        Self::new(STROKE_WIDTH)
    }
}
