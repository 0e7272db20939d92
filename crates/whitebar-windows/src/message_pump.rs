use whitebar_core::{BarController, BarEvent, Flow, WindowResult};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, TranslateMessage, WM_LBUTTONDOWN, WM_LBUTTONUP,
    WM_MOUSEMOVE,
};

use crate::window::{BarWindow, WM_BAR_CAPTURE_LOST, WM_BAR_CLOSE};

/// `MK_LBUTTON` bit of a mouse message's `WPARAM`.
const MK_LBUTTON: usize = 0x0001;

/// Client coordinates packed into a mouse message's `LPARAM`.
fn client_point(lparam: LPARAM) -> (i32, i32) {
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    (x, y)
}

fn left_button_held(wparam: WPARAM) -> bool {
    wparam.0 & MK_LBUTTON != 0
}

/// Maps a queued message for the bar window to a controller event.
fn translate(msg: &MSG) -> Option<BarEvent> {
    match msg.message {
        WM_LBUTTONDOWN => {
            let (x, y) = client_point(msg.lParam);
            Some(BarEvent::ButtonDown {
                x,
                y,
                screen_y: msg.pt.y,
            })
        }
        WM_MOUSEMOVE => Some(BarEvent::MouseMove {
            screen_y: msg.pt.y,
            held: left_button_held(msg.wParam),
        }),
        WM_LBUTTONUP => {
            let (x, y) = client_point(msg.lParam);
            Some(BarEvent::ButtonUp { x, y })
        }
        WM_BAR_CAPTURE_LOST => Some(BarEvent::CaptureLost),
        WM_BAR_CLOSE => Some(BarEvent::CloseRequested),
        _ => None,
    }
}

/// The Win32 message pump. Feeds the bar's pointer messages to the
/// controller and blocks until WM_QUIT is received.
///
/// The pointer is captured while the button is held so a drag keeps
/// tracking after the cursor leaves the (resizing) window.
pub(crate) fn run_message_pump(
    window: &mut BarWindow,
    controller: &mut BarController,
) -> WindowResult<()> {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if msg.hwnd == window.hwnd()
            && let Some(event) = translate(&msg)
        {
            match event {
                BarEvent::ButtonDown { .. } => unsafe {
                    SetCapture(window.hwnd());
                },
                BarEvent::ButtonUp { .. } => unsafe {
                    let _ = ReleaseCapture();
                },
                _ => {}
            }

            if controller.handle(event, &mut *window)? == Flow::Exit {
                // The controller has already released the reservation.
                window.destroy()?;
            }
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    Ok(())
}
