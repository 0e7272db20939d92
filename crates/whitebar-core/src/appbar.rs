//! The shell's AppBar reservation protocol.

use std::collections::HashSet;

use crate::reservation::{Descriptor, Reservation};
use crate::shell::{Edge, NewRequest, PositionRequest, RemoveRequest, Shell};
use crate::{Rect, WindowHandle, WindowResult};

/// Reserves screen edges through a [`Shell`].
///
/// Tracks which handles it currently holds a reservation for, so a
/// second registration of a live handle is refused instead of being
/// passed to the shell.
pub struct AppBar<S: Shell> {
    shell: S,
    live: HashSet<WindowHandle>,
}

impl<S: Shell> AppBar<S> {
    pub fn new(shell: S) -> Self {
        Self {
            shell,
            live: HashSet::new(),
        }
    }
}

impl<S: Shell> Reservation for AppBar<S> {
    fn name(&self) -> &'static str {
        "appbar"
    }

    fn register(&mut self, handle: WindowHandle, edge: Edge, bounds: Rect) -> Descriptor {
        let mut descriptor = Descriptor::new(handle, edge, bounds);
        if self.live.contains(&handle) {
            crate::log_warn!("0x{:X} already holds an appbar reservation", handle.0);
            return descriptor;
        }

        match self.shell.new_bar(&NewRequest { handle, edge }) {
            Ok(callback) => {
                self.live.insert(handle);
                descriptor.mark_registered(Some(callback));
            }
            Err(e) => crate::log_warn!("shell refused appbar for 0x{:X}: {e}", handle.0),
        }
        descriptor
    }

    fn update_position(
        &mut self,
        descriptor: &mut Descriptor,
        proposed: Rect,
    ) -> WindowResult<Rect> {
        if !descriptor.is_registered() {
            return Err("appbar is not registered".into());
        }

        let handle = descriptor.handle();
        let edge = descriptor.edge();

        // The commit must carry the shell's answer to the query, never
        // the caller's proposal.
        let committed = self
            .shell
            .query_pos(&PositionRequest {
                handle,
                edge,
                rect: proposed,
            })
            .and_then(|granted| {
                self.shell.set_pos(&PositionRequest {
                    handle,
                    edge,
                    rect: granted,
                })
            });

        match committed {
            Ok(rect) => {
                crate::log_debug!(
                    "appbar 0x{:X}: proposed({},{} {}x{}) committed({},{} {}x{})",
                    handle.0,
                    proposed.x,
                    proposed.y,
                    proposed.width,
                    proposed.height,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height
                );
                descriptor.set_rect(rect);
                Ok(rect)
            }
            Err(e) => {
                crate::log_error!("appbar 0x{:X} lost its reservation: {e}", handle.0);
                self.live.remove(&handle);
                descriptor.mark_unregistered();
                Err(e)
            }
        }
    }

    fn unregister(&mut self, descriptor: &mut Descriptor) {
        if !descriptor.is_registered() {
            return;
        }

        let handle = descriptor.handle();
        if let Err(e) = self.shell.remove(&RemoveRequest { handle }) {
            crate::log_warn!("failed to remove appbar 0x{:X}: {e}", handle.0);
        }
        self.live.remove(&handle);
        descriptor.mark_unregistered();
        crate::log_info!("unregistered appbar 0x{:X}", handle.0);
    }
}
