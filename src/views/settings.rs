use crate::theme::theme_definition;
use crate::types::ThemeMode;
use crate::ui::AppContext;
use dioxus::prelude::*;

#[component]
pub fn SettingsView(theme: Signal<ThemeMode>) -> Element {
    let mut theme = theme;
    let ctx = use_context::<AppContext>();
    let timeout = match ctx.config.timeout {
        Some(timeout) => format!("{}s", timeout.as_secs()),
        None => "none".to_string(),
    };

    rsx! {
        div { class: "main-container",
            div { class: "settings-section",
                h3 { class: "section-title", "Display" }
                div { class: "theme-toggle",
                    for mode in [ThemeMode::Dark, ThemeMode::Light] {
                        button {
                            class: format_args!(
                                "theme-option {}",
                                if theme() == mode { "active" } else { "" }
                            ),
                            r#type: "button",
                            onclick: move |_| theme.set(mode),
                            {theme_definition(mode).label}
                        }
                    }
                }
            }
            div { class: "settings-section",
                h3 { class: "section-title", "Model" }
                div { class: "locked-input",
                    label { "Endpoint" }
                    input { r#type: "text", value: "{ctx.config.endpoint}", readonly: true, disabled: true }
                }
                div { class: "locked-input",
                    label { "Model" }
                    input { r#type: "text", value: "{ctx.config.model}", readonly: true, disabled: true }
                }
                p { class: "text-muted", "Request timeout: {timeout}" }
            }
        }
    }
}
