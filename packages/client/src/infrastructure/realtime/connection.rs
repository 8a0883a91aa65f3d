//! The single realtime connection shared by every screen.
//!
//! A background transport loop multiplexes the outbound queue of the
//! [`EventHub`] and inbound frames from the socket. When the loop exits the
//! hub is closed, so later emits fail with `ChannelError::Closed`.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::TcpStream,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use super::hub::EventHub;
use crate::{
    domain::ChannelError,
    infrastructure::dto::realtime::{ClientEvent, decode_server_event, encode_client_event},
};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Default socket URL: the backend URL with a `ws`/`wss` scheme plus `/ws`
pub fn derive_ws_url(backend_url: &str) -> String {
    let base = backend_url.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{base}/ws")
}

pub struct RealtimeConnection {
    url: String,
    hub: EventHub,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RealtimeConnection {
    pub async fn connect(url: &str) -> Result<Self, ChannelError> {
        let (socket, _) = connect_async(url)
            .await
            .map_err(|e| ChannelError::Connect {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        tracing::info!("Connected to realtime channel at {}", url);

        let (hub, outbound) = EventHub::new();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(transport_loop(socket, hub.clone(), outbound, shutdown_rx));

        Ok(Self {
            url: url.to_string(),
            hub,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn is_connected(&self) -> bool {
        !self.hub.is_closed()
    }

    /// Close the socket, flushing queued outbound events first.
    pub async fn disconnect(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(mut task) = self.task.take() {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("Realtime transport ended abnormally: {}", e),
                Err(_) => {
                    tracing::warn!("Realtime transport did not stop in time; aborting");
                    task.abort();
                }
            }
        }
        self.hub.close();
        tracing::info!("Disconnected from realtime channel");
    }
}

impl Drop for RealtimeConnection {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.hub.close();
    }
}

async fn transport_loop(
    socket: Socket,
    hub: EventHub,
    mut outbound: mpsc::UnboundedReceiver<ClientEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = outbound.recv() => {
                let Some(event) = event else {
                    tracing::debug!("Outbound queue closed");
                    let _ = sink.close().await;
                    break;
                };
                match encode_client_event(&event) {
                    Ok(text) => {
                        if let Err(e) = sink.send(Message::Text(text.into())).await {
                            tracing::warn!("Failed to send realtime event: {}", e);
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Failed to encode realtime event: {}", e),
                }
            }

            _ = &mut shutdown_rx => {
                while let Ok(event) = outbound.try_recv() {
                    if let Ok(text) = encode_client_event(&event) {
                        let _ = sink.send(Message::Text(text.into())).await;
                    }
                }
                let _ = sink.close().await;
                break;
            }

            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => match decode_server_event(text.as_str()) {
                        Ok(Some(event)) => {
                            hub.dispatch(event);
                        }
                        Ok(None) => tracing::debug!("Ignoring unknown realtime event: {}", text.as_str()),
                        Err(e) => tracing::warn!("Dropping malformed realtime frame: {}", e),
                    },
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Realtime channel closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Realtime receive error: {}", e);
                        break;
                    }
                }
            }
        }
    }

    hub.close();
    tracing::debug!("Realtime transport loop exited");
}
