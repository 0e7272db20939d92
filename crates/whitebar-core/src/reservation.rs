//! Reserved screen-region lifecycle.
//!
//! A [`Reservation`] registers, keeps current and releases one strip of
//! screen edge for one window. Two strategies implement it: the shell's
//! AppBar protocol ([`AppBar`](crate::appbar::AppBar)) and [`Dock`], a
//! handshake-free fallback used when the shell refuses registration.

use crate::shell::{CallbackId, Edge};
use crate::{Rect, WindowHandle, WindowResult};

/// The state of one window's screen reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    handle: WindowHandle,
    edge: Edge,
    rect: Rect,
    registered: bool,
    callback: Option<CallbackId>,
}

impl Descriptor {
    /// Creates an unregistered descriptor.
    pub fn new(handle: WindowHandle, edge: Edge, rect: Rect) -> Self {
        Self {
            handle,
            edge,
            rect,
            registered: false,
            callback: None,
        }
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// The currently reserved rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Notification message id handed out by the shell, if any.
    pub fn callback(&self) -> Option<CallbackId> {
        self.callback
    }

    pub(crate) fn mark_registered(&mut self, callback: Option<CallbackId>) {
        self.registered = true;
        self.callback = callback;
    }

    pub(crate) fn mark_unregistered(&mut self) {
        self.registered = false;
        self.callback = None;
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

/// Register / update / release capability shared by every strategy.
pub trait Reservation {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Registers `handle` on `edge`, starting from the window's current
    /// bounds. A refused registration returns an unregistered descriptor.
    fn register(&mut self, handle: WindowHandle, edge: Edge, bounds: Rect) -> Descriptor;

    /// Reserves `proposed` (or whatever the strategy grants instead) and
    /// returns the committed rectangle. The descriptor must be registered.
    fn update_position(&mut self, descriptor: &mut Descriptor, proposed: Rect)
    -> WindowResult<Rect>;

    /// Releases the reservation. Does nothing if already unregistered.
    fn unregister(&mut self, descriptor: &mut Descriptor);
}

/// Fallback strategy: an always-on-top dock-style window with no
/// shell-enforced exclusion zone.
///
/// No OS calls are made; the descriptor only tracks the lifecycle so
/// callers can treat both strategies alike.
#[derive(Debug, Default)]
pub struct Dock;

impl Reservation for Dock {
    fn name(&self) -> &'static str {
        "dock"
    }

    fn register(&mut self, handle: WindowHandle, edge: Edge, bounds: Rect) -> Descriptor {
        let mut descriptor = Descriptor::new(handle, edge, bounds);
        descriptor.mark_registered(None);
        descriptor
    }

    fn update_position(
        &mut self,
        descriptor: &mut Descriptor,
        proposed: Rect,
    ) -> WindowResult<Rect> {
        if !descriptor.is_registered() {
            return Err("dock window is not registered".into());
        }
        descriptor.set_rect(proposed);
        Ok(proposed)
    }

    fn unregister(&mut self, descriptor: &mut Descriptor) {
        descriptor.mark_unregistered();
    }
}

/// Registers with `primary`, switching to [`Dock`] if the shell refuses.
///
/// Returns the strategy that ended up holding the reservation together
/// with its descriptor.
pub fn register_with_fallback(
    mut primary: Box<dyn Reservation>,
    handle: WindowHandle,
    edge: Edge,
    bounds: Rect,
) -> (Box<dyn Reservation>, Descriptor) {
    let descriptor = primary.register(handle, edge, bounds);
    if descriptor.is_registered() {
        crate::log_info!("registered 0x{:X} via {}", handle.0, primary.name());
        return (primary, descriptor);
    }

    crate::log_warn!(
        "{} registration refused for 0x{:X}, falling back to dock window",
        primary.name(),
        handle.0
    );
    let mut dock: Box<dyn Reservation> = Box::new(Dock);
    let descriptor = dock.register(handle, edge, bounds);
    (dock, descriptor)
}
