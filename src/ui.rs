use crate::ai::{InferenceBackend, OllamaClient};
use crate::config::ChatConfig;
use crate::theme::theme_definition;
use crate::types::ThemeMode;
use crate::views::{ChatView, SettingsView};
use dioxus::prelude::*;
use std::sync::Arc;

const CHAT_CSS: Asset = asset!("/assets/chat.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Chat,
    Settings,
}

/// Shared by every view: the loaded configuration and the inference client.
#[derive(Clone)]
pub struct AppContext {
    pub config: ChatConfig,
    pub backend: Arc<dyn InferenceBackend>,
}

impl AppContext {
    fn load() -> Self {
        let config = ChatConfig::from_env().unwrap_or_else(|err| {
            tracing::error!(%err, "invalid configuration, using defaults");
            ChatConfig::default()
        });
        let client = OllamaClient::from_config(&config).unwrap_or_else(|err| {
            tracing::error!(%err, "failed to build HTTP client, using defaults");
            OllamaClient::new(config.endpoint.clone(), config.model.clone())
        });
        Self {
            config,
            backend: Arc::new(client),
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(AppContext::load);
    let active_tab = use_signal(|| AppTab::Chat);
    let theme = use_signal(ThemeMode::default);

    rsx! {
        ThemeStyles { theme }
        AppHeader { active_tab }
        TabPanels { active_tab, theme }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: CHAT_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(active_tab: Signal<AppTab>) -> Element {
    let ctx = use_context::<AppContext>();
    rsx! {
        div { class: "header",
            div { class: "header-content",
                span { class: "header-title", "{ctx.config.assistant_name}" }
                TabNavigation { active_tab }
            }
        }
    }
}

#[component]
fn TabPanels(active_tab: Signal<AppTab>, theme: Signal<ThemeMode>) -> Element {
    rsx! {
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Chat,
                children: rsx!( ChatView {} ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Settings,
                children: rsx!( SettingsView { theme } ),
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let class = if active_tab() == tab {
        "tab-panel active"
    } else {
        "tab-panel"
    };
    rsx! {
        div { class: class, {children} }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tabs",
            TabButton { active_tab, tab: AppTab::Chat, label: "Chat" }
            TabButton { active_tab, tab: AppTab::Settings, label: "Settings" }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab, label: &'static str) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab { "tab active" } else { "tab" };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| active_tab.set(tab),
            "{label}"
        }
    }
}
