//! Drawing session: the single event loop that owns all canvas state.

use std::collections::VecDeque;

use crate::{
    CanvasEvent, CanvasResult, Color, ExportPayload, Palette, PointerEvent, StrokeMachine,
    StrokeState, StrokeTransition, Surface, VariableContext, STROKE_WIDTH, SWATCHES,
};

/// Configuration for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Surface background (forced opaque).
    pub background: Color,
    /// Stroke width in pixels.
    pub stroke_width: f32,
    /// Offered swatches. The first is selected initially.
    pub swatches: Vec<Color>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            stroke_width: STROKE_WIDTH,
            swatches: SWATCHES.to_vec(),
        }
    }
}

/// Counts of what a call to [`DrawingSession::process_pending`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Events taken off the queue.
    pub processed: usize,
    /// Segments painted.
    pub segments: usize,
    /// Resets performed.
    pub resets: usize,
    /// Events that failed and were skipped.
    pub failed: usize,
}

/// Owns the surface, palette, stroke machine and variable context, and
/// applies queued events to them strictly in order.
///
/// Reset requests and palette changes go through the same queue as pointer
/// events, so a reset can never land in the middle of a segment render.
#[derive(Debug)]
pub struct DrawingSession {
    surface: Surface,
    palette: Palette,
    stroke: StrokeMachine,
    context: VariableContext,
    queue: VecDeque<CanvasEvent>,
}

impl DrawingSession {
    /// Create a session with an uninitialized surface.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            surface: Surface::new(config.background),
            palette: Palette::new(config.swatches),
            stroke: StrokeMachine::new(config.stroke_width),
            context: VariableContext::new(),
            queue: VecDeque::new(),
        }
    }

    /// Create a session and initialize its surface to the viewport size.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid.
    pub fn with_viewport(config: SessionConfig, width: u32, height: u32) -> CanvasResult<Self> {
        let mut session = Self::new(config);
        session.initialize(width, height)?;
        Ok(session)
    }

    /// Allocate the surface. Any in-progress stroke is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid.
    pub fn initialize(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        self.surface.initialize(width, height)?;
        self.stroke.finish();
        Ok(())
    }

    /// Queue an event for the next [`DrawingSession::process_pending`].
    pub fn push(&mut self, event: impl Into<CanvasEvent>) {
        self.queue.push_back(event.into());
    }

    /// Queue a reset. The surface is cleared when the queue is next processed.
    pub fn request_reset(&mut self) {
        tracing::debug!("Reset requested");
        self.push(CanvasEvent::Reset);
    }

    /// Queue a palette change.
    pub fn select_color(&mut self, color: Color) {
        self.push(CanvasEvent::SelectColor { color });
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue an event and process everything pending.
    pub fn dispatch(&mut self, event: impl Into<CanvasEvent>) -> ProcessReport {
        self.push(event);
        self.process_pending()
    }

    /// Apply all queued events in order.
    ///
    /// Failed events are logged and skipped; they never stop the queue.
    pub fn process_pending(&mut self) -> ProcessReport {
        let mut report = ProcessReport::default();
        while let Some(event) = self.queue.pop_front() {
            report.processed += 1;
            match self.apply(&event) {
                Ok(Applied::Segment) => report.segments += 1,
                Ok(Applied::Reset) => report.resets += 1,
                Ok(Applied::Other) => {}
                Err(e) => {
                    tracing::warn!("Skipping {event:?}: {e}");
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn apply(&mut self, event: &CanvasEvent) -> CanvasResult<Applied> {
        match event {
            CanvasEvent::Pointer(pointer) => self.apply_pointer(pointer),
            CanvasEvent::SelectColor { color } => {
                self.palette.select(*color)?;
                Ok(Applied::Other)
            }
            CanvasEvent::Reset => {
                // A stale pen must not keep painting onto the cleared buffer.
                self.stroke.finish();
                self.surface.clear()?;
                tracing::info!("Surface reset");
                Ok(Applied::Reset)
            }
        }
    }

    fn apply_pointer(&mut self, pointer: &PointerEvent) -> CanvasResult<Applied> {
        let transition = self
            .stroke
            .handle(pointer, &self.palette, &mut self.surface)?;
        Ok(match transition {
            StrokeTransition::Painted => Applied::Segment,
            StrokeTransition::Started | StrokeTransition::Finished | StrokeTransition::Ignored => {
                Applied::Other
            }
        })
    }

    /// Snapshot the surface together with the current variables.
    ///
    /// Pending events are processed first, so the snapshot reflects everything
    /// delivered before the call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::UninitializedSurface`] before
    /// initialization.
    pub fn capture_payload(&mut self) -> CanvasResult<ExportPayload> {
        self.process_pending();
        ExportPayload::capture(&self.surface, &self.context)
    }

    /// The surface.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Current stroke state.
    #[must_use]
    pub fn stroke_state(&self) -> StrokeState {
        self.stroke.state()
    }

    /// The variable context.
    #[must_use]
    pub fn context(&self) -> &VariableContext {
        &self.context
    }

    /// Mutable access to the variable context.
    pub fn context_mut(&mut self) -> &mut VariableContext {
        &mut self.context
    }
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

enum Applied {
    Segment,
    Reset,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanvasError;

    fn session(width: u32, height: u32) -> DrawingSession {
        DrawingSession::with_viewport(SessionConfig::default(), width, height).expect("session")
    }

    fn is_blank(session: &DrawingSession) -> bool {
        let bg = session.surface().background().to_rgba();
        session
            .surface()
            .image()
            .is_some_and(|img| img.pixels().all(|p| p.0 == bg))
    }

    #[test]
    fn test_oversized_viewport_is_an_error() {
        let err = DrawingSession::with_viewport(SessionConfig::default(), u32::MAX, u32::MAX)
            .unwrap_err();
        assert!(matches!(err, CanvasError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_events_wait_for_processing() {
        let mut s = session(50, 50);
        s.push(PointerEvent::down(5.0, 5.0));
        s.push(PointerEvent::moved(40.0, 5.0));
        assert_eq!(s.pending(), 2);
        assert!(is_blank(&s));

        let report = s.process_pending();
        assert_eq!(report.processed, 2);
        assert_eq!(report.segments, 1);
        assert_eq!(s.pending(), 0);
        assert!(!is_blank(&s));
    }

    #[test]
    fn test_reset_is_deferred_until_processed() {
        let mut s = session(50, 50);
        s.dispatch(PointerEvent::down(5.0, 5.0));
        s.dispatch(PointerEvent::moved(40.0, 40.0));
        s.dispatch(PointerEvent::up(40.0, 40.0));

        s.request_reset();
        assert!(!is_blank(&s));

        let report = s.process_pending();
        assert_eq!(report.resets, 1);
        assert!(is_blank(&s));

        // The request is consumed: later processing does not clear again.
        s.dispatch(PointerEvent::down(5.0, 5.0));
        s.dispatch(PointerEvent::moved(40.0, 5.0));
        let report = s.process_pending();
        assert_eq!(report.resets, 0);
        assert!(!is_blank(&s));
    }

    #[test]
    fn test_reset_forces_idle() {
        let mut s = session(50, 50);
        s.dispatch(PointerEvent::down(5.0, 5.0));
        s.dispatch(CanvasEvent::Reset);
        assert_eq!(s.stroke_state(), StrokeState::Idle);

        // Moves after the reset do not continue the old stroke.
        let report = s.dispatch(PointerEvent::moved(45.0, 45.0));
        assert_eq!(report.segments, 0);
        assert!(is_blank(&s));
    }

    #[test]
    fn test_events_before_initialize_are_skipped() {
        let mut s = DrawingSession::default();
        s.push(PointerEvent::down(1.0, 1.0));
        s.push(PointerEvent::moved(2.0, 2.0));
        s.push(CanvasEvent::Reset);
        let report = s.process_pending();

        assert_eq!(report.processed, 3);
        assert_eq!(report.failed, 2);
        assert_eq!(s.stroke_state(), StrokeState::Idle);
        assert!(matches!(
            s.capture_payload(),
            Err(CanvasError::UninitializedSurface)
        ));
    }

    #[test]
    fn test_invalid_selection_is_skipped() {
        let mut s = session(10, 10);
        let report = s.dispatch(CanvasEvent::SelectColor {
            color: Color::rgb(1, 2, 3),
        });
        assert_eq!(report.failed, 1);
        assert_eq!(s.palette().selected(), Color::WHITE);
    }

    #[test]
    fn test_capture_flushes_queue_first() {
        let mut s = session(20, 20);
        s.push(PointerEvent::down(0.0, 10.0));
        s.push(PointerEvent::moved(19.0, 10.0));

        let payload = s.capture_payload().expect("capture");
        let image = payload.decode_image().expect("decode");
        assert_eq!(image.get_pixel(10, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_initialize_drops_in_progress_stroke() {
        let mut s = session(20, 20);
        s.dispatch(PointerEvent::down(1.0, 1.0));
        s.initialize(30, 30).expect("reinitialize");
        assert_eq!(s.stroke_state(), StrokeState::Idle);
        assert_eq!(s.surface().dimensions(), Some((30, 30)));
    }
}
