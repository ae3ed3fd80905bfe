pub mod client;
pub mod error;
pub mod transport;

pub use client::SocketClient;
pub use error::TransportError;
pub use transport::{SocketHandle, Transport};
