//! `SHAppBarMessage`-backed implementation of the shell protocol.

use std::mem;

use whitebar_core::shell::{CallbackId, NewRequest, PositionRequest, RemoveRequest, Shell};
use whitebar_core::{Rect, WindowHandle, WindowResult};
use windows::Win32::Foundation::RECT;
use windows::Win32::UI::Shell::{
    ABM_NEW, ABM_QUERYPOS, ABM_REMOVE, ABM_SETPOS, APPBARDATA, SHAppBarMessage,
};
use windows::Win32::UI::WindowsAndMessaging::RegisterWindowMessageW;
use windows::core::w;

use crate::window::{hwnd_of, win32_rect};

/// The Windows shell's AppBar registry.
///
/// Every request builds a fresh `APPBARDATA`; nothing is cached between
/// calls.
#[derive(Debug, Default)]
pub struct Win32Shell;

fn appbar_data(handle: WindowHandle) -> APPBARDATA {
    APPBARDATA {
        cbSize: mem::size_of::<APPBARDATA>() as u32,
        hWnd: hwnd_of(handle),
        ..Default::default()
    }
}

fn from_win32(rc: &RECT) -> Rect {
    Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom)
}

/// Sends a position message and returns the rectangle the shell wrote back.
fn position_message(message: u32, request: &PositionRequest) -> WindowResult<Rect> {
    let mut data = appbar_data(request.handle);
    data.uEdge = request.edge.as_raw();
    data.rc = win32_rect(&request.rect);

    // SAFETY: `data` is a fully initialised APPBARDATA with cbSize set;
    // the shell only reads and writes within it.
    let ok = unsafe { SHAppBarMessage(message, &mut data) };
    // ABM_QUERYPOS and ABM_SETPOS are documented to always return TRUE,
    // even after an Explorer restart dropped the reservation, so this
    // backend never reports a lost reservation. The check only guards
    // against a future shell that does.
    if ok == 0 {
        return Err(format!("SHAppBarMessage({message}) failed").into());
    }
    Ok(from_win32(&data.rc))
}

impl Shell for Win32Shell {
    fn new_bar(&mut self, request: &NewRequest) -> WindowResult<CallbackId> {
        // SAFETY: the string is a static, null-terminated literal.
        let callback = unsafe { RegisterWindowMessageW(w!("WhiteBarAppBarMessage")) };
        if callback == 0 {
            return Err("RegisterWindowMessageW failed".into());
        }

        let mut data = appbar_data(request.handle);
        data.uCallbackMessage = callback;
        data.uEdge = request.edge.as_raw();

        // SAFETY: see `position_message`.
        let ok = unsafe { SHAppBarMessage(ABM_NEW, &mut data) };
        if ok == 0 {
            return Err("shell refused AppBar registration".into());
        }
        Ok(CallbackId(callback))
    }

    fn query_pos(&mut self, request: &PositionRequest) -> WindowResult<Rect> {
        position_message(ABM_QUERYPOS, request)
    }

    fn set_pos(&mut self, request: &PositionRequest) -> WindowResult<Rect> {
        position_message(ABM_SETPOS, request)
    }

    fn remove(&mut self, request: &RemoveRequest) -> WindowResult<()> {
        let mut data = appbar_data(request.handle);
        // SAFETY: see `position_message`. ABM_REMOVE always returns TRUE.
        unsafe { SHAppBarMessage(ABM_REMOVE, &mut data) };
        Ok(())
    }
}
