#![cfg_attr(windows, windows_subsystem = "windows")]

use clap::Parser;

use whitebar_core::config;

#[derive(Parser)]
#[command(
    name = "whitebar",
    version,
    about = "A resizable white bar docked above the taskbar"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    let config = config::load();
    whitebar_core::log::init(&config.log);

    if let Err(e) = run() {
        whitebar_core::log_error!("fatal: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run() -> whitebar_core::WindowResult<()> {
    whitebar_windows::run()
}

#[cfg(not(windows))]
fn run() -> whitebar_core::WindowResult<()> {
    Err("whitebar reserves screen space through the Windows shell and only runs on Windows".into())
}
