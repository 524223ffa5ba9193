//! Terminal lifecycle management for mindcheck.
//!
//! The TUI draws to stdout through a buffered writer. Log output never goes
//! to the terminal (see `logging`), so nothing else competes for the screen.

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use std::io::{stdout, BufWriter, Stdout};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

/// CrosstermBackend over a buffered stdout, so each frame is a few large writes.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Enables raw mode, enters the alternate screen, and turns on mouse capture.
///
/// Call [`restore_tui`] at every exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stdout());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restores the terminal to its pre-TUI state. Idempotent.
///
/// ratatui does not restore the terminal on `Drop`, so this runs at the end
/// of `main` and inside the panic hook.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before the panic message prints.
///
/// Must be called before [`init_tui`]. Chains onto the previous hook.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Best effort: we are already panicking.
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Registers a SIGTERM handler that flips the returned flag.
///
/// The main loop polls the flag on a 50 ms heartbeat.
///
/// # Errors
///
/// Returns `Err` if the OS refuses the signal registration.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
