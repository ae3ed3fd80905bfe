use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sender name attached to every message typed into the form.
pub const LOCAL_SENDER: &str = "User";

/// One chat line as it travels over the socket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub text: String,
}

impl Message {
    pub fn new(from: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            text: text.into(),
        }
    }

    /// Reads an incoming payload without validating it. String fields are
    /// taken as-is, other JSON values by their JSON text, and missing fields
    /// (or a payload that is not an object) as empty.
    pub fn from_value(value: &Value) -> Self {
        Self {
            from: field_text(value.get("from")),
            text: field_text(value.get("text")),
        }
    }

    /// Text of the list item shown for this message.
    pub fn list_item(&self) -> String {
        format!("{}: {}", self.from, self.text)
    }
}

fn field_text(field: Option<&Value>) -> String {
    match field {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
