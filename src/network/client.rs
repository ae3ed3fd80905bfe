use std::sync::Mutex;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use rust_socketio::asynchronous::{Client, ClientBuilder};
use rust_socketio::{Event, Payload};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::common::{AckCallback, Message, OutboundEvent, ServerEvent, names};
use crate::config::AppConfig;

use super::error::TransportError;
use super::transport::SocketHandle;

/// How long an emit waits for the server's acknowledgement.
const ACK_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the socket.io connection: translates server events into
/// [`ServerEvent`]s and sends the emits queued through [`SocketHandle`].
/// Reconnecting after a dropped connection is left to the client library.
pub struct SocketClient {
    server_url: String,
    reconnect_delay: Duration,
    reconnect_attempts: u32,
    event_sender: mpsc::Sender<ServerEvent>,
    outbound_receiver: mpsc::UnboundedReceiver<OutboundEvent>,
}

impl SocketClient {
    pub fn new(
        config: &AppConfig,
        event_sender: mpsc::Sender<ServerEvent>,
    ) -> (Self, SocketHandle) {
        let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel();
        let client = Self {
            server_url: config.server_url.clone(),
            reconnect_delay: config.reconnect_delay(),
            reconnect_attempts: config.reconnect_attempts,
            event_sender,
            outbound_receiver,
        };
        (client, SocketHandle::new(outbound_sender))
    }

    /// Connects, then forwards queued emits until every handle is dropped.
    pub async fn run(self) -> Result<(), TransportError> {
        let Self {
            server_url,
            reconnect_delay,
            reconnect_attempts,
            event_sender,
            mut outbound_receiver,
        } = self;

        let mut failures = 0u32;
        let socket = loop {
            match build_client(&server_url, reconnect_delay, &event_sender)
                .connect()
                .await
            {
                Ok(socket) => break socket,
                Err(err) => {
                    failures = failures.saturating_add(1);
                    log::warn!("Unable to reach {server_url} (attempt {failures}): {err}");
                    if reconnect_attempts != 0 && failures >= reconnect_attempts {
                        return Err(err.into());
                    }
                    if event_sender.is_closed() {
                        log::info!("UI closed before the first connect");
                        return Ok(());
                    }
                    tokio::time::sleep(reconnect_delay).await;
                }
            }
        };
        log::info!("Socket opened to {server_url}");

        while let Some(outbound) = outbound_receiver.recv().await {
            emit(&socket, outbound).await;
        }

        log::info!("All socket handles dropped; disconnecting");
        socket.disconnect().await?;
        Ok(())
    }
}

fn build_client(
    server_url: &str,
    reconnect_delay: Duration,
    event_sender: &mpsc::Sender<ServerEvent>,
) -> ClientBuilder {
    let delay_ms = u64::try_from(reconnect_delay.as_millis()).unwrap_or(u64::MAX);

    ClientBuilder::new(server_url)
        .reconnect(true)
        .reconnect_delay(delay_ms, delay_ms)
        .on(Event::Connect, forward(event_sender, |_| ServerEvent::Connect))
        .on(Event::Close, forward(event_sender, |_| ServerEvent::Disconnect))
        .on(
            names::NEW_MESSAGE,
            forward(event_sender, |payload| {
                let message = Message::from_value(&first_argument(payload));
                log::debug!("newMessage {message:?}");
                ServerEvent::NewMessage(message)
            }),
        )
        .on(Event::Error, |payload, _socket: Client| {
            async move { log::warn!("Socket error: {payload:?}") }.boxed()
        })
}

/// Builds a listener that turns a payload into a [`ServerEvent`] for the UI.
fn forward<F>(
    event_sender: &mpsc::Sender<ServerEvent>,
    translate: F,
) -> impl FnMut(Payload, Client) -> BoxFuture<'static, ()> + Send + Sync + 'static
where
    F: Fn(Payload) -> ServerEvent + Send + Sync + 'static,
{
    let event_sender = event_sender.clone();
    move |payload, _socket| {
        let event = translate(payload);
        let event_sender = event_sender.clone();
        async move {
            if let Err(err) = event_sender.send(event).await {
                log::info!("UI stopped listening; dropping {:?}", err.0);
            }
        }
        .boxed()
    }
}

async fn emit(socket: &Client, outbound: OutboundEvent) {
    let OutboundEvent { event, data, ack } = outbound;

    let result = match ack {
        Some(callback) => {
            let mut slot = AckSlot::new(callback);
            socket
                .emit_with_ack(event.as_str(), data, ACK_TIMEOUT, move |payload, _socket| {
                    slot.fire(payload);
                    async {}.boxed()
                })
                .await
        }
        None => socket.emit(event.as_str(), data).await,
    };

    if let Err(err) = result {
        log::warn!("Failed to emit `{event}`: {err}");
    }
}

/// Holds an acknowledgement callback until the server answers.
struct AckSlot(Mutex<Option<AckCallback>>);

impl AckSlot {
    fn new(callback: AckCallback) -> Self {
        Self(Mutex::new(Some(callback)))
    }

    /// Runs the callback with the first acknowledgement argument. Later
    /// answers are ignored.
    fn fire(&mut self, payload: Payload) {
        let callback = self.0.get_mut().ok().and_then(Option::take);
        match callback {
            Some(callback) => callback(first_argument(payload)),
            None => log::debug!("Acknowledgement already handled"),
        }
    }
}

/// First argument of an event, as a listener would receive it.
fn first_argument(payload: Payload) -> Value {
    match payload {
        Payload::Text(values) => values.into_iter().next().unwrap_or(Value::Null),
        other => {
            log::debug!("Non-JSON payload {other:?}");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    #[test]
    fn first_argument_takes_the_leading_value() {
        let payload = Payload::Text(vec![json!({"from": "a"}), json!("extra")]);
        assert_eq!(first_argument(payload), json!({"from": "a"}));
        assert_eq!(first_argument(Payload::Text(Vec::new())), Value::Null);
        assert_eq!(first_argument(Payload::Binary(vec![1, 2].into())), Value::Null);
    }

    #[test]
    fn incoming_messages_keep_non_string_fields() {
        let payloads = [
            json!({"from": 42, "text": "hi"}),
            json!({"from": null, "text": "yo"}),
            json!({"from": "a", "text": "sentinel"}),
        ];

        let items: Vec<String> = payloads
            .into_iter()
            .map(|value| Message::from_value(&first_argument(Payload::Text(vec![value]))))
            .map(|message| message.list_item())
            .collect();

        assert_eq!(items, vec!["42: hi", "null: yo", "a: sentinel"]);
    }

    #[test]
    fn ack_slot_fires_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut slot = AckSlot::new(Box::new(move |data: Value| {
            assert_eq!(data, json!("stored"));
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        slot.fire(Payload::Text(vec![json!("stored")]));
        slot.fire(Payload::Text(vec![json!("again")]));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn spawned_client_gives_up_after_configured_attempts() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = AppConfig {
            server_url: format!("http://127.0.0.1:{port}"),
            reconnect_delay_ms: 1,
            reconnect_attempts: 2,
            ..AppConfig::default()
        };
        let (event_tx, mut event_rx) = mpsc::channel(4);
        let (client, _socket) = SocketClient::new(&config, event_tx);

        let result = tokio::spawn(client.run()).await.unwrap();

        assert!(matches!(result, Err(TransportError::Socket(_))));
        assert!(event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn spawned_client_stops_retrying_once_the_ui_is_gone() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = AppConfig {
            server_url: format!("http://127.0.0.1:{port}"),
            reconnect_delay_ms: 1,
            reconnect_attempts: 0,
            ..AppConfig::default()
        };
        let (event_tx, event_rx) = mpsc::channel(4);
        let (client, _socket) = SocketClient::new(&config, event_tx);
        drop(event_rx);

        let result = tokio::spawn(client.run()).await.unwrap();

        assert!(result.is_ok());
    }
}
