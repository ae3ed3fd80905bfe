use eframe::egui;
use tokio::sync::mpsc;

use crate::common::ServerEvent;
use crate::network::{SocketHandle, Transport};

use super::bridge::{ChatBridge, ChatEventHandler, SubmitEvent};
use super::components::{chat_area, input_bar};

pub struct ChatApp<T: Transport = SocketHandle> {
    title: String,
    bridge: ChatBridge<T>,
    event_receiver: mpsc::Receiver<ServerEvent>,
}

impl<T: Transport> ChatApp<T> {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        title: String,
        socket: T,
        event_receiver: mpsc::Receiver<ServerEvent>,
    ) -> Self {
        Self::from_parts(title, socket, event_receiver)
    }

    fn from_parts(title: String, socket: T, event_receiver: mpsc::Receiver<ServerEvent>) -> Self {
        Self {
            title,
            bridge: ChatBridge::new(socket),
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.bridge.dispatch(event);
        }
    }

    fn submit(&mut self) {
        let mut event = SubmitEvent::new();
        self.bridge.on_submit(&mut event);
        log::trace!("Submit handled, default prevented: {}", event.default_prevented());
    }
}

impl<T: Transport> eframe::App for ChatApp<T> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.title.as_str());
            ui.separator();
            chat_area::render(ui, &self.bridge.state().messages);

            ui.separator();
            if input_bar::render(ui, &mut self.bridge.state_mut().input_text) {
                self.submit();
            }
        });

        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::common::Message;
    use crate::network::transport::testing::RecordingTransport;

    #[test]
    fn pending_events_are_drained_into_the_list() {
        let (event_tx, event_rx) = mpsc::channel(8);
        let mut app = ChatApp::from_parts("chat".into(), RecordingTransport::default(), event_rx);

        event_tx.try_send(ServerEvent::Connect).unwrap();
        event_tx
            .try_send(ServerEvent::NewMessage(Message::new("andrew", "hey")))
            .unwrap();
        event_tx
            .try_send(ServerEvent::NewMessage(Message::new("jan", "hi")))
            .unwrap();
        event_tx.try_send(ServerEvent::Disconnect).unwrap();
        app.handle_network_events();

        assert_eq!(app.bridge.state().messages, vec!["andrew: hey", "jan: hi"]);

        // nothing left to drain
        app.handle_network_events();
        assert_eq!(app.bridge.state().messages.len(), 2);
    }

    #[test]
    fn submit_sends_the_typed_text_and_keeps_it() {
        let (_event_tx, event_rx) = mpsc::channel(8);
        let transport = RecordingTransport::default();
        let sent = Rc::clone(&transport.sent);
        let mut app = ChatApp::from_parts("chat".into(), transport, event_rx);
        app.bridge.state_mut().input_text = "hello".into();

        app.submit();

        let sent = sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].event, "createMessage");
        assert_eq!(sent[0].data, json!({"from": "User", "text": "hello"}));
        assert!(sent[0].ack.is_some());
        assert_eq!(app.bridge.state().input_text, "hello");
        assert!(app.bridge.state().messages.is_empty());
    }
}
