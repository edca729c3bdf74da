//! The drawing engine: interaction state machine and incremental rendering.
//!
//! While a shape is being drawn, each `update` restores the pixels saved by
//! the previous preview, saves the region the new preview will touch and
//! draws only the active shape. Full redraws happen on undo, redo, clear,
//! restore and naming.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::label::{place_label, text_origin};
use crate::record::{ShapeRecord, decode_records, parse_records, records_to_json};
use crate::shapes::{Shape, ShapeId, ShapeKind, contrasting_text_color, parse_color};
use crate::store::ShapeStore;
use crate::surface::Surface;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};

/// Callback fired with each shape right after it is committed.
pub type ShapeCompletedHandler = Box<dyn FnMut(&Shape)>;

/// Opacity of the badge background.
const BADGE_FILL_ALPHA: f32 = 0.5;

/// Interaction state.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineState {
    Idle,
    /// A shape is being drawn and is owned by the engine until commit.
    Active(Shape),
}

impl EngineState {
    fn label(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Active(_) => "drawing",
        }
    }
}

/// Drawing engine over a surface `S`.
pub struct Engine<S: Surface> {
    surface: S,
    store: ShapeStore,
    config: EngineConfig,
    state: EngineState,
    /// Pixels under the current preview. At most one is outstanding.
    backup: Option<S::Patch>,
    on_shape_completed: Option<ShapeCompletedHandler>,
}

impl<S: Surface> Engine<S> {
    /// Create an engine with the default configuration.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, EngineConfig::default())
    }

    /// Create an engine with the given configuration.
    pub fn with_config(surface: S, config: EngineConfig) -> Self {
        Self {
            surface,
            store: ShapeStore::with_redo_policy(config.redo_policy),
            config,
            state: EngineState::Idle,
            backup: None,
            on_shape_completed: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Kind used by the next `begin`.
    pub fn set_shape_kind(&mut self, kind: ShapeKind) {
        self.config.shape_kind = kind;
    }

    /// Color used by the next `begin`.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.config.color = color.into();
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EngineState::Active(_))
    }

    /// The shape currently being drawn.
    pub fn active_shape(&self) -> Option<&Shape> {
        match &self.state {
            EngineState::Active(shape) => Some(shape),
            EngineState::Idle => None,
        }
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    /// Committed shapes in drawing order.
    pub fn shapes(&self) -> &[Shape] {
        self.store.committed()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Drawing region in logical units; badges must fit inside it.
    pub fn region(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.surface.size())
    }

    // --- Interaction ---

    /// Start a new shape at `point`.
    pub fn begin(&mut self, point: Point) -> EngineResult<()> {
        if self.is_active() {
            return Err(self.invalid_state("begin"));
        }
        let shape = Shape::begin(self.config.shape_kind, self.config.color.clone(), point);
        log::debug!("Begin {:?} {} at {point:?}", shape.kind(), shape.id());
        self.state = EngineState::Active(shape);
        Ok(())
    }

    /// Move the live endpoint of the active shape and redraw its preview.
    pub fn update(&mut self, point: Point) -> EngineResult<()> {
        let EngineState::Active(shape) = &mut self.state else {
            return Err(EngineError::InvalidState {
                operation: "update",
                state: "idle",
            });
        };
        shape.extend_to(point);

        if let Some(patch) = self.backup.take() {
            self.surface.apply(patch);
        }
        if let Some(region) = backup_region(shape, self.surface.scale_factor(), self.config.line_width) {
            log::trace!("Preview backup {region:?}");
            self.backup = Some(self.surface.capture(region));
        }
        draw_shape(&mut self.surface, shape, self.config.line_width);
        Ok(())
    }

    /// Finish the active shape and add it to the store.
    ///
    /// The engine is back to idle before the completion handler runs.
    pub fn commit(&mut self) -> EngineResult<ShapeId> {
        let shape = match std::mem::replace(&mut self.state, EngineState::Idle) {
            EngineState::Active(shape) => shape,
            EngineState::Idle => return Err(self.invalid_state("commit")),
        };
        if let Some(patch) = self.backup.take() {
            self.surface.apply(patch);
        }
        draw_shape(&mut self.surface, &shape, self.config.line_width);

        let id = shape.id();
        log::debug!("Commit {:?} {id}", shape.kind());
        self.store.append(shape);

        if let Some(handler) = self.on_shape_completed.as_mut() {
            if let Some(shape) = self.store.get(id) {
                handler(shape);
            }
        }
        Ok(id)
    }

    /// Drop the active shape without committing it.
    ///
    /// Returns false if nothing was being drawn.
    pub fn cancel(&mut self) -> bool {
        let shape = match std::mem::replace(&mut self.state, EngineState::Idle) {
            EngineState::Active(shape) => shape,
            EngineState::Idle => return false,
        };
        log::debug!("Cancel {:?} {}", shape.kind(), shape.id());
        match self.backup.take() {
            Some(patch) => self.surface.apply(patch),
            // Unpatched previews can only be erased by a full redraw.
            None => self.draw_all(),
        }
        true
    }

    // --- History ---

    /// Undo the last committed shape. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        let moved = self.store.undo();
        if moved {
            log::debug!("Undo, {} shape(s) left", self.store.len());
            self.draw_all();
        }
        moved
    }

    /// Redo the last undone shape. Returns false if there was none.
    pub fn redo(&mut self) -> bool {
        let moved = self.store.redo();
        if moved {
            log::debug!("Redo, {} shape(s) now", self.store.len());
            self.draw_all();
        }
        moved
    }

    /// Forget every shape, including the redo buffer, and erase the surface.
    pub fn clear(&mut self) {
        log::debug!("Clear {} shape(s)", self.store.len());
        self.store.clear();
        self.draw_all();
    }

    /// Set or remove a shape's badge label, then redraw.
    ///
    /// Undone shapes can be named too; the label shows once redone.
    pub fn set_name(&mut self, id: ShapeId, name: Option<String>) -> EngineResult<()> {
        let name = name.filter(|n| !n.is_empty());
        let shape = self.store.get_mut(id).ok_or(EngineError::ShapeNotFound(id))?;
        log::debug!("Name {id} {name:?}");
        shape.set_name(name);
        self.draw_all();
        Ok(())
    }

    // --- Records ---

    /// Records for the committed shapes, in order.
    pub fn save(&self) -> Vec<ShapeRecord> {
        self.store.committed().iter().map(ShapeRecord::from).collect()
    }

    /// Committed shapes as a JSON array.
    pub fn save_json(&self) -> EngineResult<String> {
        records_to_json(&self.save())
    }

    /// Append shapes from records, then redraw.
    ///
    /// Nothing is appended unless every record is valid.
    pub fn restore(&mut self, records: &[ShapeRecord]) -> EngineResult<()> {
        let shapes = decode_records(records)?;
        log::debug!("Restore {} shape(s)", shapes.len());
        self.store.extend(shapes);
        self.draw_all();
        Ok(())
    }

    /// Append shapes from a JSON array of records, then redraw.
    pub fn restore_json(&mut self, json: &str) -> EngineResult<()> {
        let records = parse_records(json)?;
        self.restore(&records)
    }

    // --- Events ---

    /// Register the completion handler, returning the one it replaces.
    pub fn on_shape_completed(
        &mut self,
        handler: impl FnMut(&Shape) + 'static,
    ) -> Option<ShapeCompletedHandler> {
        self.on_shape_completed.replace(Box::new(handler))
    }

    /// Remove the completion handler.
    pub fn off_shape_completed(&mut self) -> Option<ShapeCompletedHandler> {
        self.on_shape_completed.take()
    }

    // --- Rendering ---

    /// Erase the surface and draw every committed shape with its badge.
    ///
    /// A shape being drawn is drawn again on top with a fresh backup.
    pub fn draw_all(&mut self) {
        self.backup = None;
        self.surface.clear();

        let region = self.region();
        let line_width = self.config.line_width;
        let font_size = self.config.label_font_size;
        let text_color = self.config.label_text_color.as_deref().map(parse_color);
        for shape in self.store.committed() {
            draw_shape(&mut self.surface, shape, line_width);
            if let Some(name) = shape.name().filter(|n| !n.is_empty()) {
                draw_badge(&mut self.surface, shape, name, region, font_size, line_width, text_color);
            }
        }

        if let EngineState::Active(shape) = &self.state {
            if let Some(area) = backup_region(shape, self.surface.scale_factor(), line_width) {
                self.backup = Some(self.surface.capture(area));
            }
            draw_shape(&mut self.surface, shape, line_width);
        }
        log::trace!("Redrew {} shape(s)", self.store.len());
    }

    fn invalid_state(&self, operation: &'static str) -> EngineError {
        EngineError::InvalidState {
            operation,
            state: self.state.label(),
        }
    }
}

/// Stroke width the fixed preview margins of each shape already cover.
const PREVIEW_BASE_WIDTH: f64 = 1.0;

/// Preview region grown by the part of the stroke wider than the base width.
fn backup_region(shape: &Shape, scale: f64, line_width: f64) -> Option<Rect> {
    let extra = (line_width - PREVIEW_BASE_WIDTH).max(0.0) * scale / 2.0;
    shape
        .preview_region(scale)
        .map(|region| region.inflate(extra, extra))
}

fn draw_shape<S: Surface>(surface: &mut S, shape: &Shape, line_width: f64) {
    let color = shape.paint();
    surface.stroke(&shape.to_path(), color, line_width);
    if let Some(head) = shape.fill_path() {
        surface.fill(&head, color);
    }
}

fn draw_badge<S: Surface>(
    surface: &mut S,
    shape: &Shape,
    name: &str,
    region: Rect,
    font_size: f64,
    line_width: f64,
    text_color: Option<peniko::Color>,
) {
    let text_width = surface.measure_text(name, font_size);
    let Some(badge) = place_label(shape, text_width, region) else {
        log::debug!("No room for badge {name:?} of {}", shape.id());
        return;
    };
    let color = shape.paint();
    let outline: BezPath = badge.to_path(0.1);
    surface.fill(&outline, color.multiply_alpha(BADGE_FILL_ALPHA));
    surface.stroke(&outline, color, line_width);
    let text_color = text_color.unwrap_or_else(|| contrasting_text_color(color));
    surface.fill_text(name, text_origin(badge), font_size, text_color);
}
