pub mod appbar;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod layout;
pub mod log;
pub mod rect;
pub mod reservation;
pub mod shell;
pub mod window;

#[cfg(test)]
mod testing;

pub use appbar::AppBar;
pub use controller::{BarController, BarEvent, Flow};
pub use rect::Rect;
pub use reservation::{Descriptor, Dock, Reservation};
pub use shell::{Edge, Shell};
pub use window::{Surface, WindowHandle, WindowResult};
