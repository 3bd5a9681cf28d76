//! One cutout editing session.
//!
//! `Editor` owns the photo, the mask, the undo history and the viewport, and
//! is driven entirely by explicit calls: pointer events, tool changes, undo,
//! confirm/cancel. Every call runs to completion and leaves the composite
//! (`display`) up to date, so a front-end only has to redraw after a call
//! that returned `true`.

use image::{ImageFormat, RgbaImage};
use kurbo::{Point, Vec2};

use crate::composite;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::export::{self, Cutout};
use crate::history::History;
use crate::mask::Mask;
use crate::stroke::{self, Dab};
use crate::types::{BrushSettings, DirtyRect, Tool, WorkingImage};
use crate::viewport::Viewport;

/// Pointer input in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// Pointer left the canvas; ends the gesture like `Up`.
    Leave,
}

/// What the pointer is doing right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// Painting; `last` is the previous sample in image space.
    Drawing { dab: Dab, last: Point },
    /// Dragging the view; `last` is the previous pointer position in screen space.
    Panning { last: Point },
}

pub struct Editor {
    image: WorkingImage,
    mask: Mask,
    display: RgbaImage,
    history: History,
    viewport: Viewport,
    gesture: Gesture,
    tool: Tool,
    brush: BrushSettings,
    config: EditorConfig,
}

impl Editor {
    /// Open a session on `image` with a fully opaque mask.
    pub fn open(image: WorkingImage, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let (width, height) = (image.width(), image.height());
        let mask = Mask::new(width, height);
        let display = composite::render(&image, &mask);
        let history = History::new(&mask, config.history.capacity);
        let viewport = Viewport::new(config.zoom.min_scale, config.zoom.max_scale);
        let brush = BrushSettings {
            size: config.brush.default_size,
            hardness: config.brush.default_hardness,
        };

        tracing::info!("opened cutout session on {width}x{height} image");
        Ok(Self {
            image,
            mask,
            display,
            history,
            viewport,
            gesture: Gesture::Idle,
            tool: Tool::default(),
            brush,
            config,
        })
    }

    /// Decode `bytes` and open a session; decode failures mean no session.
    pub fn open_encoded(bytes: &[u8], config: EditorConfig) -> Result<Self> {
        Self::open(WorkingImage::decode(bytes)?, config)
    }

    // ---------------------------------------------------------------- state

    pub fn image(&self) -> &WorkingImage {
        &self.image
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Latest composite (photo x mask).
    pub fn display(&self) -> &RgbaImage {
        &self.display
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ---------------------------------------------------------------- tools

    /// Takes effect on the next gesture; an active one keeps its tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Brush diameter, clamped to the configured range.
    pub fn set_brush_size(&mut self, size: f64) {
        if size.is_nan() {
            return;
        }
        let b = &self.config.brush;
        self.brush.size = size.clamp(b.min_size, b.max_size);
    }

    pub fn set_hardness(&mut self, hardness: f64) {
        if hardness.is_nan() {
            return;
        }
        self.brush.hardness = hardness.clamp(0.0, 1.0);
    }

    // ------------------------------------------------------------- viewport

    pub fn zoom_to(&mut self, scale: f64) {
        self.viewport.zoom_to(scale);
    }

    /// Zoom by `notches` configured steps (negative zooms out).
    pub fn zoom_steps(&mut self, notches: f64) {
        self.viewport.zoom_by(notches * self.config.zoom.step);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    // -------------------------------------------------------------- pointer

    /// Dispatch one pointer event. Returns true when the screen needs a redraw.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(),
        }
    }

    /// Start a gesture with the current tool. Ignored while one is active.
    pub fn pointer_down(&mut self, screen: Point) -> bool {
        if !self.is_idle() {
            return false;
        }

        match self.tool.brush_mode() {
            Some(mode) => {
                let dab = Dab { radius: self.brush.radius(), hardness: self.brush.hardness, mode };
                let at = self.viewport.to_image_space(screen);
                let dirty = stroke::stamp(&mut self.mask, at, &dab);
                self.gesture = Gesture::Drawing { dab, last: at };
                self.recomposite(dirty)
            }
            None => {
                self.gesture = Gesture::Panning { last: screen };
                false
            }
        }
    }

    /// Continue the active gesture. Idle moves (hover) do nothing.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Drawing { dab, last } => {
                let at = self.viewport.to_image_space(screen);
                let dirty = stroke::stroke_segment(&mut self.mask, last, at, &dab);
                self.gesture = Gesture::Drawing { dab, last: at };
                self.recomposite(dirty)
            }
            Gesture::Panning { last } => {
                let delta = screen - last;
                self.viewport.pan(delta);
                self.gesture = Gesture::Panning { last: screen };
                delta != Vec2::ZERO
            }
        }
    }

    /// Finish the active gesture. A paint gesture becomes one undo step.
    pub fn pointer_up(&mut self) -> bool {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Drawing { dab, .. } => {
                self.history.snapshot(&self.mask);
                tracing::debug!(
                    "{:?} gesture finished, {} undo step(s) available",
                    dab.mode,
                    self.history.len() - 1
                );
            }
            Gesture::Panning { .. } | Gesture::Idle => {}
        }
        false
    }

    // -------------------------------------------------------------- actions

    /// Back to the previous finished gesture. False when there is nothing to undo
    /// or a gesture is still in progress.
    pub fn undo(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        if !self.history.undo(&mut self.mask) {
            return false;
        }
        tracing::debug!("undo, {} step(s) left", self.history.len() - 1);
        self.recomposite(DirtyRect::full(self.image.width(), self.image.height()))
    }

    /// Make the whole photo visible again. Recorded as its own undo step.
    pub fn reset_mask(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.mask.reset();
        self.history.snapshot(&self.mask);
        self.recomposite(DirtyRect::full(self.image.width(), self.image.height()))
    }

    // ------------------------------------------------------------- finalize

    /// Encode the current composite in the configured format.
    /// On error the session is untouched and can be confirmed again.
    pub fn confirm(&self) -> Result<Cutout> {
        self.confirm_as(self.config.export.format.image_format())
    }

    pub fn confirm_as(&self, format: ImageFormat) -> Result<Cutout> {
        let pixels = composite::render(&self.image, &self.mask);
        let cutout = export::encode(&pixels, format)?;
        tracing::info!(
            "confirmed cutout {}x{} as {:?} ({} bytes)",
            cutout.width,
            cutout.height,
            format,
            cutout.bytes.len()
        );
        Ok(cutout)
    }

    /// Throw the session away. Nothing is written anywhere.
    pub fn cancel(self) {
        tracing::info!("cutout session cancelled");
    }

    fn recomposite(&mut self, dirty: DirtyRect) -> bool {
        if dirty.is_empty() {
            return false;
        }
        composite::render_rect(&self.image, &self.mask, dirty, &mut self.display);
        true
    }
}
