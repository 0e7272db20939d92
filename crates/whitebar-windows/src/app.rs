use whitebar_core::shell::Edge;
use whitebar_core::{AppBar, BarController, WindowResult, geometry, log_info};

use crate::message_pump::run_message_pump;
use crate::shell::Win32Shell;
use crate::window::BarWindow;
use crate::{dpi, monitor};

/// Runs the bar until it is closed.
///
/// Creates the window 3 cm tall across the full screen width directly
/// above the taskbar, registers it as a bottom AppBar (or a plain dock
/// window if the shell refuses), then pumps messages.
pub fn run() -> WindowResult<()> {
    dpi::enable_dpi_awareness();

    let dpi = dpi::system_dpi();
    let work_area = monitor::primary_work_area()?;
    let screen_width = monitor::screen_width();
    let rect = geometry::initial_rect(screen_width, work_area, dpi);
    log_info!(
        "starting: dpi={dpi} screen_width={screen_width} bar=({},{} {}x{})",
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );

    let mut window = BarWindow::create(&rect)?;
    window.show();

    // Declared after `window` so it drops first: the reservation is
    // released while the window handle is still valid.
    let mut controller = BarController::start(
        Box::new(AppBar::new(Win32Shell)),
        window.handle(),
        Edge::Bottom,
        rect,
        &mut window,
    )?;

    run_message_pump(&mut window, &mut controller)?;
    log_info!("exiting");
    Ok(())
}
