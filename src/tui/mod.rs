pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::{Completion, InboxApp, InputMode};
