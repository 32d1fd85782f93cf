// WebSocket listener for the draft room publisher.
//
// One publisher is served at a time. Text frames are decoded into
// `FeedMessage`s here, so the app loop only ever sees typed messages.

use futures_util::{Stream, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info, warn};

use super::protocol::{parse_message, FeedMessage};
use super::FeedEvent;

/// Capacity of the channel between the listener and the app loop.
pub const FEED_CHANNEL_CAPACITY: usize = 256;

/// The app loop dropped its end of the feed channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedClosed;

/// Per-publisher counters, logged when the publisher leaves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub messages: usize,
    pub malformed: usize,
}

/// What a single WebSocket frame means for the feed.
#[derive(Debug, PartialEq)]
enum Frame {
    Feed(FeedMessage),
    /// Text that does not decode as a feed message.
    Malformed,
    /// Binary, ping and pong frames.
    Ignored,
    Close,
}

fn decode_frame(msg: Message) -> Frame {
    match msg {
        Message::Text(text) => match parse_message(&text) {
            Ok(m) => Frame::Feed(m),
            Err(e) => {
                warn!("Dropping malformed feed frame: {e}");
                Frame::Malformed
            }
        },
        Message::Close(_) => Frame::Close,
        _ => Frame::Ignored,
    }
}

/// Bind `127.0.0.1:{port}` and spawn the listener.
///
/// Returns the receiving end of the feed together with the listener task.
pub async fn spawn(
    port: u16,
) -> anyhow::Result<(mpsc::Receiver<FeedEvent>, JoinHandle<anyhow::Result<()>>)> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
    let handle = tokio::spawn(serve(listener, tx));
    Ok((rx, handle))
}

/// Serve publishers on `listener` one after another until the app loop goes
/// away.
pub async fn serve(listener: TcpListener, tx: mpsc::Sender<FeedEvent>) -> anyhow::Result<()> {
    info!("Waiting for a publisher on {}", listener.local_addr()?);

    loop {
        let (stream, addr) = listener.accept().await?;
        if publisher_session(stream, addr.to_string(), &tx).await == Err(FeedClosed) {
            debug!("Feed channel closed, stopping listener");
            return Ok(());
        }
    }
}

/// Handshake with one publisher, relay its frames, and report the session
/// boundaries as `Connected` / `Disconnected`.
async fn publisher_session(
    stream: TcpStream,
    addr: String,
    tx: &mpsc::Sender<FeedEvent>,
) -> Result<(), FeedClosed> {
    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("Handshake with {addr} failed: {e}");
            return Ok(());
        }
    };

    info!("Publisher connected from {addr}");
    forward(tx, FeedEvent::Connected { addr: addr.clone() }).await?;

    let stats = relay_frames(ws, tx).await?;
    info!(
        "Publisher {addr} left after {} messages ({} malformed)",
        stats.messages, stats.malformed
    );
    forward(tx, FeedEvent::Disconnected).await
}

/// Decode frames from `frames` and forward feed messages through `tx`.
///
/// Stops at a close frame or a transport error.
pub async fn relay_frames<St>(
    mut frames: St,
    tx: &mpsc::Sender<FeedEvent>,
) -> Result<SessionStats, FeedClosed>
where
    St: Stream<Item = Result<Message, WsError>> + Unpin,
{
    let mut stats = SessionStats::default();
    while let Some(frame) = frames.next().await {
        let msg = match frame {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Feed transport error: {e}");
                break;
            }
        };
        match decode_frame(msg) {
            Frame::Feed(m) => {
                stats.messages += 1;
                forward(tx, FeedEvent::Message(m)).await?;
            }
            Frame::Malformed => stats.malformed += 1,
            Frame::Ignored => {}
            Frame::Close => break,
        }
    }
    Ok(stats)
}

async fn forward(tx: &mpsc::Sender<FeedEvent>, event: FeedEvent) -> Result<(), FeedClosed> {
    tx.send(event).await.map_err(|_| FeedClosed)
}
