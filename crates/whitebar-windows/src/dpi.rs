use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForSystem, SetProcessDpiAwarenessContext,
};

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows virtualises coordinates and the bar would be
/// positioned and sized in scaled units instead of physical pixels.
/// Must be called once at startup, before any window is created.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    // If it fails (e.g. already set via manifest), we ignore the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Returns the system DPI (96 at 100% scaling).
pub fn system_dpi() -> u32 {
    // SAFETY: GetDpiForSystem takes no arguments and only reads state.
    unsafe { GetDpiForSystem() }
}
