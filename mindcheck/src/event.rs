//! Event bus for mindcheck.
//!
//! Terminal input, timer ticks, and service results are normalised into one
//! `AppEvent` enum and sent over a tokio unbounded MPSC channel. The main loop
//! is the only consumer and the only place application state is mutated.
//!
//! Two independent intervals drive the loop:
//! - **Render interval** (33 ms, about 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms) advances the busy spinner.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::worker::{ChatReply, PredictionOutcome};

/// All events the application can receive from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Spinner tick.
    Tick,
    /// Render tick, triggers a `terminal.draw()` call.
    Render,
    /// A `/predict_mood` round trip finished.
    Prediction(PredictionOutcome),
    /// A `/chat` round trip finished.
    ChatReply(ChatReply),
    /// Quit signal.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// `tx` is cloned into the input task and every service task; `rx` is owned
/// by the main loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that feeds terminal input and timer ticks into `tx`.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream, and
/// only `KeyEventKind::Press` is forwarded because Windows also reports
/// releases. The task ends once the receiver is gone.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let sent = tokio::select! {
                _ = tick_tick => tx.send(AppEvent::Tick),
                _ = render_tick => tx.send(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)),
                    Some(Ok(Event::Mouse(mouse))) => tx.send(AppEvent::Mouse(mouse)),
                    Some(Ok(_)) => Ok(()),
                    Some(Err(_)) | None => tx.send(AppEvent::Quit),
                },
            };
            if sent.is_err() {
                break;
            }
        }
    });
}
