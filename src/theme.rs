use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            label: "Dark",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            label: "Light",
        },
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0b0b0c;
    --color-bg-secondary: #141416;
    --color-text-primary: #f2f2f2;
    --color-text-muted: #a0a0a0;
    --color-border: #2a2a2e;
    --color-input-bg: #141416;
    --color-chat-user-bg: #3a6df0;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #1c1c20;
    --color-chat-assistant-text: #f2f2f2;
    --color-notice-bg: rgba(220, 60, 60, 0.15);
    --color-notice-text: #ff8a8a;
    --color-code-bg: #2b303b;
    --color-code-header-bg: #1f232b;
    --color-timestamp: #8a8a8a;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-border); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f5f5f5;
    --color-text-primary: #111111;
    --color-text-muted: #4a4a4a;
    --color-border: #d0d0d0;
    --color-input-bg: #ffffff;
    --color-chat-user-bg: #3a6df0;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f0f0f2;
    --color-chat-assistant-text: #111111;
    --color-notice-bg: rgba(220, 60, 60, 0.1);
    --color-notice-text: #b3261e;
    --color-code-bg: #2b303b;
    --color-code-header-bg: #1f232b;
    --color-timestamp: #606060;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-border); }
"#;
