pub mod app;
pub mod bridge;
pub mod components;
pub mod state;

pub use app::ChatApp;
