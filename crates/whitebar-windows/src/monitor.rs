use std::mem;

use whitebar_core::{Rect, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MONITOR_DEFAULTTOPRIMARY, MONITORINFO, MonitorFromWindow,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN};

/// Returns the work area of the primary monitor.
///
/// The work area excludes the taskbar and any registered AppBars, so its
/// bottom edge is where the bar starts out.
pub fn primary_work_area() -> WindowResult<Rect> {
    // MonitorFromWindow with a null HWND and MONITOR_DEFAULTTOPRIMARY
    // returns the primary monitor handle.
    let monitor = unsafe { MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY) };

    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the MONITORINFO struct. We set
    // cbSize as required by the API.
    let success = unsafe { GetMonitorInfoW(monitor, &mut info) };
    if !success.as_bool() {
        return Err("Failed to get monitor info".into());
    }

    let rc = info.rcWork;
    Ok(Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom))
}

/// Width of the primary screen in pixels.
pub fn screen_width() -> i32 {
    unsafe { GetSystemMetrics(SM_CXSCREEN) }
}
