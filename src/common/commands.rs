/// Event names spoken on the wire.
pub mod names {
    pub const NEW_MESSAGE: &str = "newMessage";
    pub const CREATE_MESSAGE: &str = "createMessage";
}

/// Invoked once with the server's acknowledgement payload.
pub type AckCallback = Box<dyn FnOnce(serde_json::Value) + Send + 'static>;

/// An event queued for the connection task.
pub struct OutboundEvent {
    pub event: String,
    pub data: serde_json::Value,
    pub ack: Option<AckCallback>,
}

impl std::fmt::Debug for OutboundEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundEvent")
            .field("event", &self.event)
            .field("data", &self.data)
            .field("ack", &self.ack.is_some())
            .finish()
    }
}
