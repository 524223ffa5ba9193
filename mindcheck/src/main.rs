//! mindcheck: mental health self-assessment and support chat in the terminal.
//!
//! Entry point for the `mindcheck` binary. Wires together configuration,
//! file logging, the terminal lifecycle (`tui`), the unified event bus
//! (`event`), the service workers (`worker`), and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Load config and start logging. Both are safe before terminal init, so
//!    config problems can still be printed to stderr.
//! 2. `install_panic_hook()` first, so it is the innermost hook.
//! 3. `register_sigterm()` returns a flag polled in the event loop.
//! 4. `init_tui()` enters the alternate screen and raw mode.
//! 5. Event channel, input task, and chat worker.
//!
//! `restore_tui()` runs after the loop exits. Nothing inside the loop uses
//! `?`: a draw error is kept and the loop breaks, so the terminal is
//! restored before the error is returned.

mod app;
mod config;
mod event;
mod logging;
mod theme;
mod tui;
mod ui;
mod worker;

use std::sync::atomic::Ordering;

use mindcheck_core::ApiClient;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

use crate::event::AppEvent;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};
use crate::worker::ChatJob;

/// Reads the config file, printing a soft failure and falling back to
/// defaults when it is unreadable or malformed.
fn load_config() -> config::Config {
    let path = config::config_path();
    let config = match config::Config::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mindcheck: {e}; using defaults");
            config::Config::default()
        }
    };
    config.with_env_overrides(|key| std::env::var(key).ok())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = load_config();
    let _log_guard = logging::init(&config.log_path())?;
    let theme = theme::Theme::from_name(&config.theme);
    let client = ApiClient::new(config.api_base_url.clone(), config.request_timeout())
        .map_err(std::io::Error::other)?;
    info!(api = %client.base_url(), theme = %config.theme, "mindcheck starting");
    let mut state = app::AppState::default();

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let chat_tx = worker::spawn_chat_worker(client.clone(), handler.tx.clone());
    let event_tx = handler.tx;
    let mut rx = handler.rx;

    let mut loop_result: std::io::Result<()> = Ok(());

    // Exits only via `break`, so `restore_tui()` below is always reached.
    'event_loop: loop {
        tokio::select! {
            // SIGTERM is polled at least every 50ms even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    info!("SIGTERM received");
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                let action = match maybe_event {
                    Some(AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            error!(error = %e, "draw failed");
                            loop_result = Err(e);
                            break 'event_loop;
                        }
                        KeyAction::Continue
                    }
                    Some(AppEvent::Key(key)) => handle_key(key, &mut state),
                    Some(AppEvent::Mouse(mouse)) => handle_mouse(mouse, &mut state),
                    // ratatui picks up the new size on the next draw.
                    Some(AppEvent::Resize(_, _)) => KeyAction::Continue,
                    Some(AppEvent::Tick) => {
                        state.tick();
                        KeyAction::Continue
                    }
                    Some(AppEvent::Prediction(outcome)) => {
                        state.apply_prediction(outcome);
                        KeyAction::Continue
                    }
                    Some(AppEvent::ChatReply(reply)) => {
                        state.apply_chat_reply(reply);
                        KeyAction::Continue
                    }
                    Some(AppEvent::Quit) | None => KeyAction::Quit,
                };

                match action {
                    KeyAction::Continue => {}
                    KeyAction::Quit => break 'event_loop,
                    KeyAction::Submit(request) => {
                        worker::spawn_prediction(client.clone(), request, event_tx.clone());
                    }
                    KeyAction::SendChat(request) => {
                        if !dispatch_chat_job(&chat_tx, ChatJob::Send(request)) {
                            break 'event_loop;
                        }
                    }
                    KeyAction::ResetConversation => {
                        if !dispatch_chat_job(&chat_tx, ChatJob::ResetConversation) {
                            break 'event_loop;
                        }
                    }
                }

                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    info!("mindcheck exiting");
    loop_result
}

/// Queues `job` on the chat worker. Returns `false` if the worker has exited,
/// which leaves the chat unusable, so the caller shuts down.
fn dispatch_chat_job(chat_tx: &UnboundedSender<ChatJob>, job: ChatJob) -> bool {
    match chat_tx.send(job) {
        Ok(()) => true,
        Err(SendError(job)) => {
            error!(?job, "chat worker is gone");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindcheck_core::ChatRequest;
    use tokio::sync::mpsc;

    #[test]
    fn chat_jobs_reach_a_live_worker() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(dispatch_chat_job(&tx, ChatJob::ResetConversation));
        assert!(matches!(rx.try_recv(), Ok(ChatJob::ResetConversation)));
    }

    #[test]
    fn dead_worker_is_reported_for_every_job_kind() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let send = ChatJob::Send(ChatRequest { generation: 0, message: "hi".into() });
        assert!(!dispatch_chat_job(&tx, send));
        assert!(!dispatch_chat_job(&tx, ChatJob::ResetConversation));
    }
}
