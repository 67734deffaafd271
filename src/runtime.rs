//! # Effect Runner
//!
//! Turns the `Effect`s returned by `core::action::update` into background
//! tokio tasks. Each task reports back by sending an `Action` on the channel
//! the event loop drains, so all state changes still happen on the loop.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::action::{Action, Effect};
use crate::core::entry::EntryId;
use crate::service::ChatService;

/// Upper bound on how long exit waits for the session DELETE.
pub const TEARDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// What the event loop should do after an effect has been started.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue,
    Exit { session_id: Option<String> },
}

/// Start the I/O an effect asks for. Never blocks; results arrive as actions on `tx`.
pub fn execute(
    effect: Effect,
    service: &Arc<dyn ChatService>,
    tx: &UnboundedSender<Action>,
) -> Flow {
    match effect {
        Effect::None => Flow::Continue,
        Effect::InitSession => {
            spawn_init(service.clone(), tx.clone());
            Flow::Continue
        }
        Effect::ScheduleSend { message, delay } => {
            spawn_delayed_send(message, delay, tx.clone());
            Flow::Continue
        }
        Effect::SendMessage {
            session_id,
            message,
            placeholder,
        } => {
            spawn_process(service.clone(), session_id, message, placeholder, tx.clone());
            Flow::Continue
        }
        Effect::RemoveSession { session_id } => {
            spawn_remove(service.clone(), session_id);
            Flow::Continue
        }
        Effect::Exit { session_id } => Flow::Exit { session_id },
    }
}

fn spawn_init(service: Arc<dyn ChatService>, tx: UnboundedSender<Action>) {
    info!("Spawning session init via {}", service.name());
    tokio::spawn(async move {
        let action = match service.init_session().await {
            Ok(init) => Action::SessionReady(init),
            Err(e) => Action::SessionFailed(e),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver init result: receiver dropped");
        }
    });
}

fn spawn_delayed_send(message: String, delay: Duration, tx: UnboundedSender<Action>) {
    debug!("Scheduling send in {:?} (len={})", delay, message.len());
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(Action::SendDue(message)).is_err() {
            warn!("Failed to deliver SendDue: receiver dropped");
        }
    });
}

fn spawn_process(
    service: Arc<dyn ChatService>,
    session_id: Option<String>,
    message: String,
    placeholder: EntryId,
    tx: UnboundedSender<Action>,
) {
    info!("Spawning process request (placeholder={:?})", placeholder);
    tokio::spawn(async move {
        let started = std::time::Instant::now();
        let action = match service
            .process_message(session_id.as_deref(), &message)
            .await
        {
            Ok(reply) => Action::ReplyReceived { placeholder, reply },
            Err(error) => Action::ReplyFailed { placeholder, error },
        };
        debug!("Process request finished in {:?}", started.elapsed());
        if tx.send(action).is_err() {
            warn!("Failed to deliver process result: receiver dropped");
        }
    });
}

fn spawn_remove(service: Arc<dyn ChatService>, session_id: String) {
    info!("Spawning removal of unused session {}", session_id);
    tokio::spawn(async move {
        teardown(service.as_ref(), Some(session_id), TEARDOWN_TIMEOUT).await;
    });
}

/// Best-effort session removal. Errors and timeouts are ignored.
pub async fn teardown(service: &dyn ChatService, session_id: Option<String>, limit: Duration) {
    let Some(id) = session_id else {
        return;
    };
    match tokio::time::timeout(limit, service.remove_session(&id)).await {
        Ok(Ok(())) => debug!("Removed session {}", id),
        Ok(Err(e)) => debug!("Session removal failed (ignored): {}", e),
        Err(_) => debug!("Session removal timed out after {:?} (ignored)", limit),
    }
}
