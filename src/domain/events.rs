//! Link lifecycle events and the broadcast bus that carries them.
//!
//! Services publish events after a successful store write. Subscribers receive
//! them asynchronously; a slow or absent subscriber never affects the request
//! that produced the event.

use tokio::sync::broadcast;

use crate::domain::entities::ModerationStatus;

/// Something that happened to a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Shortened {
        slug: String,
    },
    Resolved {
        slug: String,
        click_count: i64,
    },
    Reported {
        slug: String,
        previous_status: Option<ModerationStatus>,
    },
    StatusChanged {
        slug: String,
        status: ModerationStatus,
    },
}

impl LinkEvent {
    pub fn slug(&self) -> &str {
        match self {
            Self::Shortened { slug }
            | Self::Resolved { slug, .. }
            | Self::Reported { slug, .. }
            | Self::StatusChanged { slug, .. } => slug,
        }
    }
}

/// Explicit publish/subscribe handle, cloned into every service that emits events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LinkEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event. Events published with no subscriber are dropped.
    pub fn publish(&self, event: LinkEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

/// Logs every event until the bus is closed.
///
/// Lagging is reported and skipped over rather than treated as fatal.
pub async fn run_event_logger(mut rx: broadcast::Receiver<LinkEvent>) {
    loop {
        match rx.recv().await {
            Ok(LinkEvent::Shortened { slug }) => {
                tracing::info!(%slug, "link shortened");
            }
            Ok(LinkEvent::Resolved { slug, click_count }) => {
                tracing::debug!(%slug, click_count, "link resolved");
            }
            Ok(LinkEvent::Reported {
                slug,
                previous_status,
            }) => {
                tracing::info!(
                    %slug,
                    previous_status = previous_status.map(|s| s.as_str()).unwrap_or("none"),
                    "link reported, pending review"
                );
            }
            Ok(LinkEvent::StatusChanged { slug, status }) => {
                tracing::info!(%slug, %status, "moderation status changed");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event logger lagged behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
