// Draft feed: the boundary between the room's publisher and the app.

pub mod protocol;
pub mod ws_server;

use async_trait::async_trait;
use tokio::sync::mpsc;

use self::protocol::FeedMessage;

/// Events emitted by a feed to the application layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A publisher has connected.
    Connected { addr: String },
    /// The current publisher has disconnected.
    Disconnected,
    /// A decoded message from the publisher.
    Message(FeedMessage),
}

/// A source of feed events.
#[async_trait]
pub trait DraftFeed: Send {
    /// Wait for the next event. `None` means the feed has shut down.
    async fn next_event(&mut self) -> Option<FeedEvent>;
}

#[async_trait]
impl DraftFeed for mpsc::Receiver<FeedEvent> {
    async fn next_event(&mut self) -> Option<FeedEvent> {
        self.recv().await
    }
}
