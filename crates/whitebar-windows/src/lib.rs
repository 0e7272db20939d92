//! Windows implementation of whitebar.
//!
//! Everything here talks to Win32 directly and is only compiled on
//! Windows; the platform-agnostic logic lives in `whitebar-core`.
#![cfg(windows)]

mod app;

/// DPI awareness and system DPI.
pub mod dpi;

mod message_pump;

/// Primary monitor work area and screen size.
pub mod monitor;

/// `SHAppBarMessage` shell backend.
pub mod shell;

/// The bar window.
pub mod window;

pub use app::run;
pub use shell::Win32Shell;
pub use window::BarWindow;
