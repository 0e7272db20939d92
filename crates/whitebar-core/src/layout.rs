//! Placement of the resize handle and close button inside the bar.

use crate::Rect;

/// Height of the grey drag strip along the bar's top edge.
pub const HANDLE_HEIGHT: i32 = 5;

pub const CLOSE_BUTTON_WIDTH: i32 = 56;
pub const CLOSE_BUTTON_HEIGHT: i32 = 26;

/// Gap between the close button and the bar's right edge.
pub const BUTTON_PADDING: i32 = 5;

/// What a point in the bar's client area lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Handle,
    CloseButton,
    Body,
}

/// Client-area layout for a bar of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub handle: Rect,
    pub close_button: Rect,
}

impl Layout {
    pub fn new(width: i32, height: i32) -> Self {
        let handle = Rect::new(0, 0, width, HANDLE_HEIGHT);

        // Centred in the space below the handle; pinned under the handle
        // when the bar is shorter than the button.
        let free = height - HANDLE_HEIGHT;
        let top = HANDLE_HEIGHT + ((free - CLOSE_BUTTON_HEIGHT) / 2).max(0);
        let close_button = Rect::new(
            width - BUTTON_PADDING - CLOSE_BUTTON_WIDTH,
            top,
            CLOSE_BUTTON_WIDTH,
            CLOSE_BUTTON_HEIGHT,
        );

        Self {
            handle,
            close_button,
        }
    }

    /// Classifies a point in client coordinates. The handle wins where
    /// the two overlap.
    pub fn hit_test(&self, x: i32, y: i32) -> Region {
        if self.handle.contains(x, y) {
            Region::Handle
        } else if self.close_button.contains(x, y) {
            Region::CloseButton
        } else {
            Region::Body
        }
    }
}
