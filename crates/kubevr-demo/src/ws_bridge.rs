//! WebSocket client bridge to the cluster event server.
//!
//! The socket lives on a dedicated thread running a current-thread tokio
//! runtime. Bevy talks to it only through unbounded mpsc channels, wrapped
//! as an [`EventChannel`] so the pod layout never sees the transport.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use kubevr_core::{ChannelError, ClientEvent, EventChannel, ServerEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// [`EventChannel`] backed by the WebSocket thread.
pub struct WsChannel {
    /// Encoded frames to the server.
    outbound_tx: mpsc::UnboundedSender<String>,
    /// Raw text frames from the server.
    inbound_rx: mpsc::UnboundedReceiver<String>,
}

impl EventChannel for WsChannel {
    fn publish(&mut self, event: ClientEvent) -> Result<(), ChannelError> {
        let json = event.encode()?;
        self.outbound_tx
            .send(json)
            .map_err(|_| ChannelError::Closed)
    }

    fn poll(&mut self) -> Option<ServerEvent> {
        loop {
            let text = self.inbound_rx.try_recv().ok()?;
            match ServerEvent::decode(&text) {
                Ok(event) => return Some(event),
                Err(e) => tracing::warn!("Dropping frame from event server: {e}"),
            }
        }
    }
}

/// Spawn the WebSocket client thread and return its channel.
///
/// The client connects to `url`, and after a failed attempt or a dropped
/// connection waits `reconnect_delay` before trying again. Outbound events
/// published while disconnected are held and sent after reconnecting.
pub fn spawn_ws_client(url: &str, reconnect_delay: Duration) -> std::io::Result<WsChannel> {
    let (bevy_to_ws_tx, mut bevy_to_ws_rx) = mpsc::unbounded_channel::<String>();
    let (ws_to_bevy_tx, ws_to_bevy_rx) = mpsc::unbounded_channel::<String>();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let url = url.to_string();

    std::thread::Builder::new()
        .name("kubevr-ws".into())
        .spawn(move || {
            rt.block_on(async move {
                loop {
                    match tokio_tungstenite::connect_async(url.as_str()).await {
                        Ok((ws_stream, _)) => {
                            tracing::info!("Connected to event server {url}");
                            let (mut ws_sink, mut ws_source) = ws_stream.split();

                            loop {
                                tokio::select! {
                                    frame = ws_source.next() => match frame {
                                        Some(Ok(Message::Text(text))) => {
                                            if ws_to_bevy_tx.send(text.to_string()).is_err() {
                                                // App is gone.
                                                return;
                                            }
                                        }
                                        Some(Ok(Message::Close(_))) | None => break,
                                        Some(Ok(_)) => {}
                                        Some(Err(e)) => {
                                            tracing::warn!("Event server read failed: {e}");
                                            break;
                                        }
                                    },
                                    msg = bevy_to_ws_rx.recv() => match msg {
                                        Some(text) => {
                                            if let Err(e) = ws_sink.send(Message::Text(text.into())).await {
                                                tracing::warn!("Event server write failed: {e}");
                                                break;
                                            }
                                        }
                                        None => return,
                                    },
                                }
                            }

                            tracing::info!("Disconnected from event server {url}");
                        }
                        Err(e) => tracing::warn!("Could not connect to event server {url}: {e}"),
                    }
                    tokio::time::sleep(reconnect_delay).await;
                }
            });
        })?;

    Ok(WsChannel {
        outbound_tx: bevy_to_ws_tx,
        inbound_rx: ws_to_bevy_rx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_pair() -> (
        WsChannel,
        mpsc::UnboundedReceiver<String>,
        mpsc::UnboundedSender<String>,
    ) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        (
            WsChannel {
                outbound_tx,
                inbound_rx,
            },
            outbound_rx,
            inbound_tx,
        )
    }

    #[test]
    fn test_publish_encodes_frame() {
        let (mut channel, mut outbound, _inbound) = channel_pair();
        channel
            .publish(ClientEvent::DestroyPod { name: "web-1".into() })
            .unwrap();
        assert_eq!(
            outbound.try_recv().unwrap(),
            r#"{"event":"k8sDestroyPod","data":{"name":"web-1"}}"#
        );
    }

    #[test]
    fn test_poll_skips_malformed_frames() {
        let (mut channel, _outbound, inbound) = channel_pair();
        inbound.send("garbage".into()).unwrap();
        inbound
            .send(r#"{"event":"removePod","data":{"name":"a"}}"#.into())
            .unwrap();

        assert!(matches!(channel.poll(), Some(ServerEvent::PodRemoved(_))));
        assert_eq!(channel.poll(), None);
    }

    #[test]
    fn test_publish_after_bridge_exit_reports_closed() {
        let (mut channel, outbound, _inbound) = channel_pair();
        drop(outbound);
        assert!(matches!(
            channel.publish(ClientEvent::RequestSnapshot),
            Err(ChannelError::Closed)
        ));
    }
}
