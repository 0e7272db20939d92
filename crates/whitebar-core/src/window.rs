use crate::Rect;

/// A boxed error type for window and shell operations.
///
/// Any error type implementing `std::error::Error` (including the
/// platform crate's OS errors) can be boxed into this.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// An opaque OS window handle.
///
/// Stored as a pointer-sized integer so that this crate stays free of
/// platform bindings. The platform crate converts to and from its own
/// handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub usize);

/// Platform-agnostic view of the bar's on-screen window.
///
/// The controller moves the window through this trait after every
/// committed reservation change, so the visible bar and the reserved
/// region never diverge.
pub trait Surface {
    /// Moves and resizes the window to exactly `rect` (screen pixels).
    fn set_rect(&mut self, rect: &Rect) -> WindowResult<()>;
}
