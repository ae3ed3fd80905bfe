//! Glue between the socket and the chat window.
//!
//! [`ChatBridge`] reacts to connection lifecycle and message notifications by
//! logging or appending to the message list, and turns a form submission into
//! a `createMessage` emit. It keeps no state of its own beyond the view it
//! renders into.

use serde_json::Value;

use crate::common::{LOCAL_SENDER, Message, ServerEvent, names};
use crate::network::Transport;

use super::state::AppState;

/// Submission of the `message-form`.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses the shell's default submit action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// One callback per event the chat window listens to.
pub trait ChatEventHandler {
    fn on_connect(&mut self);
    fn on_disconnect(&mut self);
    fn on_new_message(&mut self, message: Message);
    fn on_submit(&mut self, event: &mut SubmitEvent);

    fn dispatch(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Connect => self.on_connect(),
            ServerEvent::Disconnect => self.on_disconnect(),
            ServerEvent::NewMessage(message) => self.on_new_message(message),
        }
    }
}

pub struct ChatBridge<T: Transport> {
    state: AppState,
    transport: T,
}

impl<T: Transport> ChatBridge<T> {
    pub fn new(transport: T) -> Self {
        Self {
            state: AppState::new(),
            transport,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }
}

impl<T: Transport> ChatEventHandler for ChatBridge<T> {
    fn on_connect(&mut self) {
        log::info!("Connected to server");
    }

    fn on_disconnect(&mut self) {
        log::info!("Disconnected from server");
    }

    fn on_new_message(&mut self, message: Message) {
        log::info!("newMessage {message:?}");
        self.state.push_item(message.list_item());
    }

    fn on_submit(&mut self, event: &mut SubmitEvent) {
        log::debug!("{event:?}");
        event.prevent_default();

        // The input keeps its text after sending.
        let message = Message::new(LOCAL_SENDER, self.state.input_text.clone());
        if let Err(err) =
            self.transport
                .emit_payload(names::CREATE_MESSAGE, &message, Some(Box::new(|_: Value| {})))
        {
            log::warn!("Failed to emit {}: {err}", names::CREATE_MESSAGE);
        }
    }
}
