//! The per-run network task.
//!
//! Triggers the run, opens its stream and forwards everything to the
//! controller's channel. Aborting the task drops the HTTP connection.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::ControllerMessage;
use crate::error::{DashError, NetworkError};
use crate::traits::RunBackend;

pub(super) async fn run_pipeline(
    backend: Arc<dyn RunBackend>,
    query: String,
    generation: u64,
    message_tx: mpsc::UnboundedSender<ControllerMessage>,
) {
    let run_id = match backend.trigger_run(&query).await {
        Ok(run_id) => run_id,
        Err(e) => {
            let err = DashError::from(e);
            warn!(generation, code = err.error_code(), "trigger failed: {}", err);
            let _ = message_tx.send(ControllerMessage::TriggerFailed {
                generation,
                message: trigger_failure_message(&err),
            });
            return;
        }
    };

    let _ = message_tx.send(ControllerMessage::RunTriggered {
        generation,
        run_id: run_id.clone(),
    });

    let mut events = match backend.open_events(&run_id).await {
        Ok(events) => events,
        Err(e) => {
            let message = e.to_string();
            warn!(
                generation,
                run_id = %run_id,
                code = DashError::from(e).error_code(),
                "could not open event stream: {}",
                message
            );
            let _ = message_tx.send(ControllerMessage::StreamLost { generation, message });
            return;
        }
    };

    info!(generation, run_id = %run_id, "event stream open");
    let _ = message_tx.send(ControllerMessage::StreamOpened { generation });

    while let Some(item) = events.next().await {
        match item {
            Ok(event) => {
                let terminal = event.is_terminal();
                debug!(generation, event = event.event_type_name(), "event received");
                if message_tx
                    .send(ControllerMessage::Event { generation, event })
                    .is_err()
                {
                    return;
                }
                if terminal {
                    return;
                }
            }
            Err(e) if e.is_malformed_event() => {
                let _ = message_tx.send(ControllerMessage::Malformed {
                    generation,
                    message: e.to_string(),
                });
            }
            Err(e) => {
                let message = e.to_string();
                warn!(
                    generation,
                    code = DashError::from(e).error_code(),
                    "event stream lost: {}",
                    message
                );
                let _ = message_tx.send(ControllerMessage::StreamLost { generation, message });
                return;
            }
        }
    }

    let _ = message_tx.send(ControllerMessage::StreamEnded { generation });
}

/// Server rejections already name the failing call; everything else gets the
/// friendlier network wording.
fn trigger_failure_message(err: &DashError) -> String {
    match err {
        DashError::Network(NetworkError::HttpStatus { message, .. }) => message.clone(),
        other => other.user_message(),
    }
}
