//! Bar sizing and drag-resize math.

use crate::Rect;

/// Physical height of a freshly started bar, in centimetres.
pub const INITIAL_HEIGHT_CM: f64 = 3.0;

/// The bar can never be dragged shorter than this.
pub const MIN_HEIGHT: i32 = 10;

const CM_PER_INCH: f64 = 2.54;

/// Converts a DPI value (pixels per inch) to pixels per centimetre.
pub fn pixels_per_cm(dpi: u32) -> f64 {
    f64::from(dpi) / CM_PER_INCH
}

/// Height in pixels of a 3 cm bar at `dpi`, truncated.
pub fn initial_height(dpi: u32) -> i32 {
    (INITIAL_HEIGHT_CM * pixels_per_cm(dpi)) as i32
}

/// Spans the full screen width, sitting directly on top of the work
/// area's bottom edge (i.e. just above the taskbar).
pub fn initial_rect(screen_width: i32, work_area: Rect, dpi: u32) -> Rect {
    let height = initial_height(dpi);
    Rect::new(0, work_area.bottom() - height, screen_width, height)
}

/// Applies a vertical drag of `delta` pixels to the bar's top edge.
///
/// Dragging up (negative delta) grows the bar. The bottom edge stays put
/// and the height never drops below [`MIN_HEIGHT`].
pub fn resize(rect: Rect, delta: i32) -> Rect {
    let height = (rect.height - delta).max(MIN_HEIGHT);
    Rect::new(rect.x, rect.bottom() - height, rect.width, height)
}

/// Pointer tracking for the resize handle.
#[derive(Debug, Default)]
pub struct Drag {
    last_y: Option<i32>,
}

impl Drag {
    /// Starts a drag at screen y coordinate `y`.
    pub fn begin(&mut self, y: i32) {
        self.last_y = Some(y);
    }

    /// Returns the movement since the previous event, or `None` when no
    /// drag is in progress. The new position becomes the reference.
    pub fn motion(&mut self, y: i32) -> Option<i32> {
        let last = self.last_y?;
        self.last_y = Some(y);
        Some(y - last)
    }

    pub fn end(&mut self) {
        self.last_y = None;
    }

    pub fn is_active(&self) -> bool {
        self.last_y.is_some()
    }
}
