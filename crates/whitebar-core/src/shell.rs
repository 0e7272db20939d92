//! Request/response types for the desktop shell's AppBar protocol.
//!
//! The shell understands four requests: New, QueryPosition, SetPosition
//! and Remove. Each one gets its own value type here instead of a single
//! fixed-layout record shared by every call.

use crate::{Rect, WindowHandle, WindowResult};

/// Screen edge a reservation is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    /// The shell's numeric value for this edge (`ABE_*`).
    pub fn as_raw(self) -> u32 {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }
}

/// Identifier of the window message the shell uses for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackId(pub u32);

/// Announces a new reservation for `handle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRequest {
    pub handle: WindowHandle,
    pub edge: Edge,
}

/// Carries a rectangle for either the query or the commit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    pub handle: WindowHandle,
    pub edge: Edge,
    pub rect: Rect,
}

/// Releases the reservation held by `handle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveRequest {
    pub handle: WindowHandle,
}

/// The host shell's reservation registry.
///
/// Calls are synchronous request/reply and must be made from the thread
/// that owns the window.
pub trait Shell {
    /// Registers a new reservation. Errors if the shell refuses it.
    fn new_bar(&mut self, request: &NewRequest) -> WindowResult<CallbackId>;

    /// Asks which rectangle the shell would grant for `request.rect`.
    fn query_pos(&mut self, request: &PositionRequest) -> WindowResult<Rect>;

    /// Commits `request.rect` and returns the rectangle actually reserved.
    fn set_pos(&mut self, request: &PositionRequest) -> WindowResult<Rect>;

    /// Releases the reservation.
    fn remove(&mut self, request: &RemoveRequest) -> WindowResult<()>;
}
