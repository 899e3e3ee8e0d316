// Per-diagram pan/zoom state, independent of the DOM so the gesture
// contract is testable without a pointer device.

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 4.0;
pub const ZOOM_STEP: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
    pub panning: bool,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            tx: 0.0,
            ty: 0.0,
            panning: false,
            anchor_x: 0.0,
            anchor_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + ZOOM_STEP).min(MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - ZOOM_STEP).max(MIN_SCALE);
    }

    /// Scrolling away from the user zooms out, towards the user zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        let step = if delta_y > 0.0 { -ZOOM_STEP } else { ZOOM_STEP };
        self.scale = (self.scale + step).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.tx = 0.0;
        self.ty = 0.0;
    }

    /// Enter the panning state, anchoring so that subsequent `pan_to` calls
    /// keep the diagram glued to the pointer.
    pub fn begin_pan(&mut self, x: f64, y: f64) {
        self.panning = true;
        self.anchor_x = x - self.tx;
        self.anchor_y = y - self.ty;
    }

    /// Update the translation to track the pointer. Returns false (and leaves
    /// the state untouched) when no pan is in progress, so document-level
    /// move handlers can be a cheap no-op.
    pub fn pan_to(&mut self, x: f64, y: f64) -> bool {
        if !self.panning {
            return false;
        }
        self.tx = x - self.anchor_x;
        self.ty = y - self.anchor_y;
        true
    }

    /// Leave the panning state. Returns whether a pan was actually active.
    pub fn end_pan(&mut self) -> bool {
        let was_panning = self.panning;
        self.panning = false;
        was_panning
    }

    /// CSS transform for the current state. Translation is applied before
    /// scaling, anchored at the image's top-left corner.
    pub fn transform(&self) -> String {
        format!(
            "translate({}px,{}px) scale({})",
            self.tx, self.ty, self.scale
        )
    }
}
