//! Concrete delivery collaborators
//!
//! - `JsonFileSubscriberStore`: subscriber chat ids kept in a JSON file
//! - `TelegramNotifier`: Bot API `sendMessage` delivery

pub mod subscribers;
pub mod telegram;

pub use subscribers::JsonFileSubscriberStore;
pub use telegram::TelegramNotifier;
