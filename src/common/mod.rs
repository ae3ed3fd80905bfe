pub mod commands;
pub mod events;
pub mod types;

pub use commands::{AckCallback, OutboundEvent, names};
pub use events::ServerEvent;
pub use types::{LOCAL_SENDER, Message};
