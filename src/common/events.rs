use super::types::Message;

/// Notifications coming up from the transport client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Connect,
    Disconnect,
    NewMessage(Message),
}
