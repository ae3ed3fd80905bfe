/// What the chat window currently shows.
#[derive(Debug, Default)]
pub struct AppState {
    /// Rendered items of the `messages` list, oldest first.
    pub messages: Vec<String>,
    /// Current value of the `message` input.
    pub input_text: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_item(&mut self, item: String) {
        self.messages.push(item);
    }
}
