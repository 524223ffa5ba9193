//! Background service tasks.
//!
//! Network round trips never run on the UI loop. Results come back over the
//! unified event channel as `AppEvent::Prediction` / `AppEvent::ChatReply`.
//!
//! - Chat: one long-lived task drains a FIFO of `ChatJob`s, one request in
//!   flight at a time, so assistant turns land in the order messages were sent.
//! - Prediction: one short-lived task per submission.

use mindcheck_core::{ApiClient, ChatRequest, RiskClass, ServiceError, Submission};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::event::AppEvent;

/// Work items for the chat worker.
#[derive(Debug)]
pub enum ChatJob {
    /// Deliver one user message.
    Send(ChatRequest),
    /// Drop the server-side conversation history (best-effort).
    ResetConversation,
}

/// Result of one chat exchange, tagged with the session generation it belongs to.
#[derive(Debug)]
pub struct ChatReply {
    pub generation: u64,
    pub result: Result<String, ServiceError>,
}

/// A survey submission ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub generation: u64,
    pub submission: Submission,
}

/// Result of one `/predict_mood` round trip.
#[derive(Debug)]
pub struct PredictionOutcome {
    pub generation: u64,
    pub result: Result<RiskClass, ServiceError>,
}

/// Spawns the chat worker and returns the sender for its job queue.
///
/// The task exits when every sender is dropped.
pub fn spawn_chat_worker(client: ApiClient, event_tx: UnboundedSender<AppEvent>) -> UnboundedSender<ChatJob> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(chat_worker_loop(client, rx, event_tx));
    tx
}

/// Processes chat jobs strictly one after another.
pub async fn chat_worker_loop(
    client: ApiClient,
    mut rx: UnboundedReceiver<ChatJob>,
    event_tx: UnboundedSender<AppEvent>,
) {
    while let Some(job) = rx.recv().await {
        match job {
            ChatJob::Send(request) => {
                let result = client.chat(&request.message).await;
                let reply = ChatReply { generation: request.generation, result };
                if event_tx.send(AppEvent::ChatReply(reply)).is_err() {
                    break;
                }
            }
            ChatJob::ResetConversation => {
                if let Err(e) = client.reset_conversation().await {
                    warn!(error = %e, "could not reset server-side conversation");
                }
            }
        }
    }
}

/// Posts `request` on its own task and reports the outcome as an event.
pub fn spawn_prediction(client: ApiClient, request: SubmitRequest, event_tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        info!(generation = request.generation, "submitting survey");
        let result = client.predict_mood(&request.submission).await;
        let _ = event_tx.send(AppEvent::Prediction(PredictionOutcome {
            generation: request.generation,
            result,
        }));
    });
}
