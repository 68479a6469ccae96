pub mod ai;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod theme;
#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;

pub use config::ChatConfig;
pub use conversation::{Conversation, Phase};
pub use error::{ChatError, ChatResult};
pub use format::{FormattedReply, format_reply};
