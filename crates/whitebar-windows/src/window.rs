//! The bar's Win32 window: class registration, painting and the window
//! procedure.
//!
//! All mutable bar state lives in the controller driven by the message
//! pump. The window procedure only paints from the current client size
//! and turns `WM_CLOSE` and `WM_CAPTURECHANGED` into posted messages so
//! closing and drag cancellation always go through the controller.

use std::sync::Once;

use whitebar_core::layout::Layout;
use whitebar_core::{Rect, Surface, WindowHandle, WindowResult};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DEFAULT_GUI_FONT, DT_CENTER, DT_SINGLELINE, DT_VCENTER,
    DeleteObject, DrawTextW, EndPaint, FillRect, GetStockObject, HBRUSH, PAINTSTRUCT,
    RDW_ERASE, RDW_INVALIDATE, RedrawWindow, ScreenToClient, SelectObject, SetBkMode,
    SetTextColor, TRANSPARENT, WHITE_BRUSH,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetClientRect, GetCursorPos, HWND_TOPMOST,
    IDC_ARROW, IDC_SIZENS, LoadCursorW, PostMessageW, PostQuitMessage, RegisterClassW,
    SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SetCursor, SetWindowPos, ShowWindow, WM_APP,
    WM_CAPTURECHANGED, WM_CLOSE, WM_DESTROY, WM_PAINT, WM_SETCURSOR, WNDCLASSW,
    WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::{PCWSTR, w};

/// Posted to the bar when the window system asks it to close.
pub(crate) const WM_BAR_CLOSE: u32 = WM_APP + 1;

/// Posted to the bar when it loses mouse capture.
pub(crate) const WM_BAR_CAPTURE_LOST: u32 = WM_APP + 2;

const CLASS_NAME: PCWSTR = w!("WhiteBar");

// COLORREF is 0x00BBGGRR.
const WHITE: COLORREF = COLORREF(0x00FF_FFFF);
const GREY: COLORREF = COLORREF(0x0080_8080);
const RED: COLORREF = COLORREF(0x0000_00FF);

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| unsafe {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(bar_wnd_proc),
            lpszClassName: CLASS_NAME,
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: HBRUSH(GetStockObject(WHITE_BRUSH).0),
            ..Default::default()
        };
        RegisterClassW(&wc);
    });
}

/// Converts a platform-agnostic handle back into an `HWND`.
pub(crate) fn hwnd_of(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut _)
}

/// The undecorated, always-on-top bar window.
///
/// It is a tool window (no taskbar button, not in Alt+Tab) that never
/// takes keyboard focus.
pub struct BarWindow {
    hwnd: HWND,
    destroyed: bool,
}

impl BarWindow {
    /// Creates the (hidden) bar window at `rect`.
    pub fn create(rect: &Rect) -> WindowResult<Self> {
        ensure_class_registered();

        let ex = WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE;
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                CLASS_NAME,
                w!("whitebar"),
                WS_POPUP,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                None,
                None,
                None,
                None,
            )?
        };

        Ok(Self {
            hwnd,
            destroyed: false,
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn handle(&self) -> WindowHandle {
        WindowHandle(self.hwnd.0 as usize)
    }

    /// Shows the window without activating it.
    pub fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
    }

    /// Destroys the window. The reservation must already be released.
    pub fn destroy(&mut self) -> WindowResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;
        unsafe { DestroyWindow(self.hwnd)? };
        Ok(())
    }
}

impl Surface for BarWindow {
    fn set_rect(&mut self, rect: &Rect) -> WindowResult<()> {
        whitebar_core::log_debug!(
            "set_rect 0x{:X}: ({},{} {}x{})",
            self.hwnd.0 as usize,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );

        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe {
            SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOACTIVATE,
            )?;
            // The close button follows the bar's height; repaint all of it.
            let _ = RedrawWindow(Some(self.hwnd), None, None, RDW_INVALIDATE | RDW_ERASE);
        }
        Ok(())
    }
}

impl Drop for BarWindow {
    fn drop(&mut self) {
        let _ = self.destroy();
    }
}

unsafe extern "system" fn bar_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            unsafe { paint(hwnd) };
            LRESULT(0)
        }
        WM_SETCURSOR if unsafe { cursor_over_handle(hwnd) } => {
            unsafe {
                if let Ok(cursor) = LoadCursorW(None, IDC_SIZENS) {
                    let _ = SetCursor(Some(cursor));
                }
            }
            LRESULT(1)
        }
        WM_CAPTURECHANGED => {
            // Sent, not queued, so forward it to the pump.
            unsafe {
                let _ = PostMessageW(Some(hwnd), WM_BAR_CAPTURE_LOST, WPARAM(0), LPARAM(0));
            }
            LRESULT(0)
        }
        WM_CLOSE => {
            unsafe {
                let _ = PostMessageW(Some(hwnd), WM_BAR_CLOSE, WPARAM(0), LPARAM(0));
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

fn client_size(hwnd: HWND) -> (i32, i32) {
    let mut rc = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut rc);
    }
    (rc.right - rc.left, rc.bottom - rc.top)
}

unsafe fn cursor_over_handle(hwnd: HWND) -> bool {
    let mut pt = POINT::default();
    unsafe {
        if GetCursorPos(&mut pt).is_err() {
            return false;
        }
        let _ = ScreenToClient(hwnd, &mut pt);
    }
    let (w, h) = client_size(hwnd);
    Layout::new(w, h).handle.contains(pt.x, pt.y)
}

pub(crate) fn win32_rect(rect: &Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

/// Paints the white body, the grey resize handle and the red close button.
unsafe fn paint(hwnd: HWND) {
    let (w, h) = client_size(hwnd);
    let layout = Layout::new(w, h);

    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        let body = CreateSolidBrush(WHITE);
        let handle = CreateSolidBrush(GREY);
        let button = CreateSolidBrush(RED);

        FillRect(hdc, &win32_rect(&Rect::new(0, 0, w, h)), body);
        FillRect(hdc, &win32_rect(&layout.handle), handle);

        let mut button_rc = win32_rect(&layout.close_button);
        FillRect(hdc, &button_rc, button);

        let old_font = SelectObject(hdc, GetStockObject(DEFAULT_GUI_FONT));
        let _ = SetBkMode(hdc, TRANSPARENT);
        SetTextColor(hdc, WHITE);
        let mut label: Vec<u16> = "Close".encode_utf16().collect();
        DrawTextW(
            hdc,
            &mut label,
            &mut button_rc,
            DT_CENTER | DT_VCENTER | DT_SINGLELINE,
        );
        SelectObject(hdc, old_font);

        let _ = DeleteObject(body.into());
        let _ = DeleteObject(handle.into());
        let _ = DeleteObject(button.into());
        let _ = EndPaint(hwnd, &ps);
    }
}
