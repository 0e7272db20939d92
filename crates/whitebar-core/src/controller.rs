//! The bar's event handling, independent of the window system.
//!
//! The platform message pump owns a [`BarController`] and feeds it
//! pointer events. The controller keeps the window and the shell
//! reservation in step: every resize goes through
//! [`Reservation::update_position`] before the window is moved, and the
//! reservation is released exactly once before the window goes away.

use crate::geometry::{self, Drag};
use crate::layout::{Layout, Region};
use crate::reservation::{self, Descriptor, Reservation};
use crate::shell::Edge;
use crate::{Rect, Surface, WindowHandle, WindowResult};

/// Pointer and lifecycle input for the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarEvent {
    /// Primary button pressed at client `(x, y)`; `screen_y` is the same
    /// point in screen coordinates.
    ButtonDown { x: i32, y: i32, screen_y: i32 },
    /// Pointer moved to screen y coordinate `screen_y`; `held` is whether
    /// the primary button is still down.
    MouseMove { screen_y: i32, held: bool },
    /// Primary button released at client `(x, y)`.
    ButtonUp { x: i32, y: i32 },
    /// The bar lost mouse capture, so no button-up will arrive.
    CaptureLost,
    /// The window system asked the bar to close.
    CloseRequested,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The reservation has been released; destroy the window.
    Exit,
}

pub struct BarController {
    reservation: Box<dyn Reservation>,
    descriptor: Descriptor,
    rect: Rect,
    drag: Drag,
    pressed: Option<Region>,
}

impl BarController {
    /// Registers the bar and places it at the rectangle the strategy grants.
    ///
    /// Falls back to a dock window if `primary` refuses registration.
    pub fn start(
        primary: Box<dyn Reservation>,
        handle: WindowHandle,
        edge: Edge,
        rect: Rect,
        surface: &mut dyn Surface,
    ) -> WindowResult<Self> {
        let (reservation, descriptor) =
            reservation::register_with_fallback(primary, handle, edge, rect);

        let mut controller = Self {
            reservation,
            descriptor,
            rect,
            drag: Drag::default(),
            pressed: None,
        };
        controller.apply(rect, surface)?;
        Ok(controller)
    }

    /// Current bar rectangle in screen pixels.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn handle(&mut self, event: BarEvent, surface: &mut dyn Surface) -> WindowResult<Flow> {
        match event {
            BarEvent::ButtonDown { x, y, screen_y } => {
                let region = self.layout().hit_test(x, y);
                if region == Region::Handle {
                    self.drag.begin(screen_y);
                }
                self.pressed = Some(region);
                Ok(Flow::Continue)
            }
            BarEvent::MouseMove { screen_y, held } => {
                if !held && self.drag.is_active() {
                    crate::log_debug!("button released outside the bar, ending drag");
                    self.cancel_press();
                    return Ok(Flow::Continue);
                }
                if let Some(delta) = self.drag.motion(screen_y)
                    && delta != 0
                {
                    let proposed = geometry::resize(self.rect, delta);
                    self.apply(proposed, surface)?;
                }
                Ok(Flow::Continue)
            }
            BarEvent::ButtonUp { x, y } => {
                self.drag.end();
                let pressed = self.pressed.take();
                if pressed == Some(Region::CloseButton)
                    && self.layout().hit_test(x, y) == Region::CloseButton
                {
                    return Ok(self.close());
                }
                Ok(Flow::Continue)
            }
            BarEvent::CaptureLost => {
                self.cancel_press();
                Ok(Flow::Continue)
            }
            BarEvent::CloseRequested => Ok(self.close()),
        }
    }

    fn cancel_press(&mut self) {
        self.drag.end();
        self.pressed = None;
    }

    fn layout(&self) -> Layout {
        Layout::new(self.rect.width, self.rect.height)
    }

    /// Reserves `proposed` and moves the window to what was committed.
    ///
    /// If the reservation has been lost the window still follows the
    /// drag, it just no longer excludes other windows.
    fn apply(&mut self, proposed: Rect, surface: &mut dyn Surface) -> WindowResult<()> {
        let rect = if self.descriptor.is_registered() {
            self.reservation
                .update_position(&mut self.descriptor, proposed)
                .unwrap_or(proposed)
        } else {
            proposed
        };
        surface.set_rect(&rect)?;
        self.rect = rect;
        Ok(())
    }

    fn close(&mut self) -> Flow {
        self.drag.end();
        self.reservation.unregister(&mut self.descriptor);
        Flow::Exit
    }
}

impl Drop for BarController {
    fn drop(&mut self) {
        self.reservation.unregister(&mut self.descriptor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appbar::AppBar;
    use crate::testing::{Call, MockShell, RecordingSurface};

    const HANDLE: WindowHandle = WindowHandle(0x10);

    fn start(shell: &MockShell, surface: &mut RecordingSurface) -> BarController {
        let work_area = Rect::new(0, 0, 1920, 1040);
        let rect = geometry::initial_rect(1920, work_area, 96);
        BarController::start(
            Box::new(AppBar::new(shell.clone())),
            HANDLE,
            Edge::Bottom,
            rect,
            surface,
        )
        .unwrap()
    }

    fn move_to(screen_y: i32) -> BarEvent {
        BarEvent::MouseMove {
            screen_y,
            held: true,
        }
    }

    fn updates(shell: &MockShell) -> usize {
        shell.count(|c| matches!(c, Call::Set(_)))
    }

    fn removes(shell: &MockShell) -> usize {
        shell.count(|c| matches!(c, Call::Remove(_)))
    }

    #[test]
    fn start_registers_and_places_bar() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();

        let bar = start(&shell, &mut surface);

        assert_eq!(bar.rect(), Rect::new(0, 927, 1920, 113));
        assert!(bar.descriptor().is_registered());
        assert_eq!(surface.moves, vec![Rect::new(0, 927, 1920, 113)]);
        assert_eq!(updates(&shell), 1);
    }

    #[test]
    fn start_moves_window_to_shell_adjusted_rect() {
        let shell = MockShell::shifting(0, -40);
        let mut surface = RecordingSurface::default();

        let bar = start(&shell, &mut surface);

        assert_eq!(bar.rect(), Rect::new(0, 887, 1920, 113));
        assert_eq!(surface.moves, vec![bar.rect()]);
    }

    #[test]
    fn dragging_handle_up_twenty_pixels() {
        // Arrange
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        let before = updates(&shell);
        surface.moves.clear();

        // Act
        bar.handle(
            BarEvent::ButtonDown {
                x: 100,
                y: 2,
                screen_y: 500,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(move_to(480), &mut surface).unwrap();

        // Assert
        assert_eq!(bar.rect(), Rect::new(0, 907, 1920, 133));
        assert_eq!(surface.moves, vec![Rect::new(0, 907, 1920, 133)]);
        assert_eq!(updates(&shell) - before, 1);
        assert_eq!(bar.descriptor().rect(), bar.rect());
    }

    #[test]
    fn moving_without_press_on_handle_does_nothing() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        let before = updates(&shell);

        bar.handle(move_to(300), &mut surface).unwrap();
        bar.handle(
            BarEvent::ButtonDown {
                x: 100,
                y: 60,
                screen_y: 987,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(move_to(900), &mut surface).unwrap();

        assert_eq!(updates(&shell), before);
        assert_eq!(bar.rect().height, 113);
    }

    #[test]
    fn drag_stops_at_minimum_height() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);

        bar.handle(
            BarEvent::ButtonDown {
                x: 0,
                y: 0,
                screen_y: 927,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(move_to(1200), &mut surface).unwrap();

        assert_eq!(bar.rect(), Rect::new(0, 1030, 1920, geometry::MIN_HEIGHT));
    }

    #[test]
    fn release_ends_drag() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);

        bar.handle(
            BarEvent::ButtonDown {
                x: 0,
                y: 0,
                screen_y: 927,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(BarEvent::ButtonUp { x: 0, y: 0 }, &mut surface)
            .unwrap();
        let before = updates(&shell);
        bar.handle(move_to(800), &mut surface).unwrap();

        assert_eq!(updates(&shell), before);
    }

    #[test]
    fn close_button_unregisters_exactly_once() {
        // Arrange
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        bar.handle(
            BarEvent::ButtonDown {
                x: 10,
                y: 1,
                screen_y: 928,
            },
            &mut surface,
        )
        .unwrap();
        for y in (800..928).rev().step_by(8) {
            bar.handle(move_to(y), &mut surface).unwrap();
        }
        bar.handle(BarEvent::ButtonUp { x: 10, y: 1 }, &mut surface)
            .unwrap();
        assert!(updates(&shell) > 1);
        let button = Layout::new(bar.rect().width, bar.rect().height).close_button;

        // Act
        bar.handle(
            BarEvent::ButtonDown {
                x: button.x + 1,
                y: button.y + 1,
                screen_y: 0,
            },
            &mut surface,
        )
        .unwrap();
        let flow = bar
            .handle(
                BarEvent::ButtonUp {
                    x: button.x + 1,
                    y: button.y + 1,
                },
                &mut surface,
            )
            .unwrap();
        drop(bar);

        // Assert
        assert_eq!(flow, Flow::Exit);
        assert_eq!(removes(&shell), 1);
        assert!(shell.live_handles().is_empty());
    }

    #[test]
    fn releasing_outside_close_button_cancels_it() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        let button = Layout::new(bar.rect().width, bar.rect().height).close_button;

        bar.handle(
            BarEvent::ButtonDown {
                x: button.x + 1,
                y: button.y + 1,
                screen_y: 0,
            },
            &mut surface,
        )
        .unwrap();
        let flow = bar
            .handle(BarEvent::ButtonUp { x: 5, y: 60 }, &mut surface)
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(removes(&shell), 0);
    }

    #[test]
    fn close_request_then_drop_releases_once() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);

        let flow = bar
            .handle(BarEvent::CloseRequested, &mut surface)
            .unwrap();
        let again = bar
            .handle(BarEvent::CloseRequested, &mut surface)
            .unwrap();
        drop(bar);

        assert_eq!(flow, Flow::Exit);
        assert_eq!(again, Flow::Exit);
        assert_eq!(removes(&shell), 1);
    }

    #[test]
    fn dropping_live_controller_releases_reservation() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let bar = start(&shell, &mut surface);

        drop(bar);

        assert_eq!(removes(&shell), 1);
        assert!(!shell.is_live(HANDLE));
    }

    #[test]
    fn lost_reservation_keeps_window_following_drag() {
        let shell = MockShell::failing_set();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        assert!(!bar.descriptor().is_registered());

        bar.handle(
            BarEvent::ButtonDown {
                x: 0,
                y: 0,
                screen_y: 500,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(move_to(480), &mut surface).unwrap();
        drop(bar);

        assert_eq!(surface.moves.last(), Some(&Rect::new(0, 907, 1920, 133)));
        // Only the initial attempt reached the shell.
        assert_eq!(updates(&shell), 1);
        assert_eq!(removes(&shell), 0);
    }

    #[test]
    fn refused_shell_runs_as_dock() {
        let shell = MockShell::refusing();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);

        bar.handle(
            BarEvent::ButtonDown {
                x: 0,
                y: 0,
                screen_y: 500,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(move_to(480), &mut surface).unwrap();
        bar.handle(BarEvent::CloseRequested, &mut surface).unwrap();

        assert_eq!(bar.rect().height, 133);
        assert!(!bar.descriptor().is_registered());
        assert_eq!(shell.calls().len(), 1);
    }

    #[test]
    fn hovering_without_press_never_resizes() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        let before = updates(&shell);

        bar.handle(move_to(1000), &mut surface).unwrap();
        bar.handle(move_to(950), &mut surface).unwrap();

        assert_eq!(bar.rect().height, 113);
        assert_eq!(updates(&shell), before);
    }

    #[test]
    fn capture_lost_ends_drag() {
        // Arrange
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        bar.handle(
            BarEvent::ButtonDown {
                x: 100,
                y: 2,
                screen_y: 927,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(move_to(900), &mut surface).unwrap();
        let before = updates(&shell);
        let height = bar.rect().height;

        // Act
        bar.handle(BarEvent::CaptureLost, &mut surface).unwrap();
        bar.handle(move_to(700), &mut surface).unwrap();
        bar.handle(move_to(600), &mut surface).unwrap();

        // Assert
        assert_eq!(bar.rect().height, height);
        assert_eq!(updates(&shell), before);
    }

    #[test]
    fn move_with_button_released_ends_drag() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        bar.handle(
            BarEvent::ButtonDown {
                x: 100,
                y: 2,
                screen_y: 927,
            },
            &mut surface,
        )
        .unwrap();
        let before = updates(&shell);

        bar.handle(
            BarEvent::MouseMove {
                screen_y: 700,
                held: false,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(move_to(600), &mut surface).unwrap();

        assert_eq!(bar.rect().height, 113);
        assert_eq!(updates(&shell), before);
    }

    #[test]
    fn capture_lost_disarms_close_button() {
        let shell = MockShell::new();
        let mut surface = RecordingSurface::default();
        let mut bar = start(&shell, &mut surface);
        let button = Layout::new(bar.rect().width, bar.rect().height).close_button;

        bar.handle(
            BarEvent::ButtonDown {
                x: button.x + 1,
                y: button.y + 1,
                screen_y: 0,
            },
            &mut surface,
        )
        .unwrap();
        bar.handle(BarEvent::CaptureLost, &mut surface).unwrap();
        let flow = bar
            .handle(
                BarEvent::ButtonUp {
                    x: button.x + 1,
                    y: button.y + 1,
                },
                &mut surface,
            )
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(removes(&shell), 0);
    }
}
