pub mod bot;
pub mod chart;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod goals;
pub mod health;
pub mod menu;
pub mod progress;
pub mod render;
pub mod state;
pub mod store;
pub mod telegram;

pub use config::Config;
pub use dispatch::{Channel, Dispatcher, Inbound};
pub use errors::Error;
pub use store::Store;
pub use telegram::TelegramApi;
