use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::*;

use crate::{ApprovalBroker, WindowEvent, WindowManager};

/// Feeds window events to `broker` one at a time, in arrival order.
///
/// Each event is handled to completion before the next is received. The task ends once
/// every sender is dropped.
pub fn spawn_window_event_loop<W: WindowManager>(
    broker: Arc<ApprovalBroker<W>>,
    mut events: mpsc::Receiver<WindowEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            trace!(?event, "window event");
            broker.handle_window_event(event).await;
        }
        debug!("window event channel closed");
    })
}
