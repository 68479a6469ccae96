pub mod chat;
pub mod settings;

pub use chat::ChatView;
pub use settings::SettingsView;
