use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::common::{AckCallback, OutboundEvent};

use super::error::TransportError;

/// Outbound half of the socket as seen by the UI.
pub trait Transport {
    /// Queues `event` for delivery. `ack` runs once the server acknowledges it.
    fn emit(&self, event: &str, data: Value, ack: Option<AckCallback>)
    -> Result<(), TransportError>;

    fn emit_payload<T: Serialize>(
        &self,
        event: &str,
        payload: &T,
        ack: Option<AckCallback>,
    ) -> Result<(), TransportError>
    where
        Self: Sized,
    {
        let data = serde_json::to_value(payload)?;
        self.emit(event, data, ack)
    }
}

/// Cloneable handle feeding the connection task. Emits never block; those
/// made before the first connect wait in the queue until it succeeds.
#[derive(Debug, Clone)]
pub struct SocketHandle {
    outbound: mpsc::UnboundedSender<OutboundEvent>,
}

impl SocketHandle {
    pub fn new(outbound: mpsc::UnboundedSender<OutboundEvent>) -> Self {
        Self { outbound }
    }
}

impl Transport for SocketHandle {
    fn emit(
        &self,
        event: &str,
        data: Value,
        ack: Option<AckCallback>,
    ) -> Result<(), TransportError> {
        self.outbound
            .send(OutboundEvent {
                event: event.to_string(),
                data,
                ack,
            })
            .map_err(|_| TransportError::Closed)
    }
}
