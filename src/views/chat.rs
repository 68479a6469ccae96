use crate::ai::InferenceBackend;
use crate::conversation::Conversation;
use crate::types::{ChatMessage, MessageBody, Sender, format_message_timestamp};
use crate::ui::AppContext;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::sync::Arc;

fn sender_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Assistant => "assistant",
        Sender::System => "notice",
    }
}

fn alignment_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "align-end",
        Sender::Assistant | Sender::System => "align-start",
    }
}

#[component]
pub fn ChatView() -> Element {
    let ctx = use_context::<AppContext>();
    let assistant_name = ctx.config.assistant_name.clone();
    let conversation = use_signal(|| Conversation::from_config(&ctx.config));
    let backend = use_signal(|| ctx.backend.clone());
    let mut input = use_signal(String::new);

    let mut send_message = {
        let mut conversation = conversation;
        let mut input_signal = input;
        move |text: String| {
            let prompt = match conversation.with_mut(|c| c.submit(text)) {
                Ok(prompt) => prompt,
                Err(err) => {
                    tracing::warn!(%err, "message not sent");
                    return;
                }
            };
            input_signal.set(String::new());

            let backend: Arc<dyn InferenceBackend> = backend();
            spawn(async move {
                let outcome = backend.generate(&prompt).await;
                if let Err(err) = conversation.with_mut(|c| c.complete(outcome)) {
                    tracing::warn!(%err, "reply arrived without a pending request");
                }
            });
        }
    };

    let snapshot = conversation.read();
    let pending = snapshot.is_pending();
    let messages: Vec<ChatMessage> = snapshot.messages().to_vec();
    drop(snapshot);

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for (i, msg) in messages.into_iter().enumerate() {
                        MessageRow { key: "{i}", message: msg }
                    }
                    if pending {
                        div { class: "typing-indicator",
                            span { class: "shimmer-text", "{assistant_name} is typing" }
                        }
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    div { class: "hstack",
                        textarea {
                            rows: "1", placeholder: "Type message here",
                            value: "{input}", oninput: move |ev| input.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    let text = input();
                                    if !text.trim().is_empty() {
                                        send_message(text);
                                    }
                                }
                            },
                            autofocus: true,
                        }
                        button {
                            class: "btn btn-primary", r#type: "button",
                            disabled: pending || input().trim().is_empty(),
                            onclick: move |_| {
                                let text = input();
                                send_message(text);
                            },
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage) -> Element {
    let role = sender_class(message.sender);
    let align = alignment_class(message.sender);
    let timestamp = format_message_timestamp(message.sent_at);
    rsx! {
        div { class: "message-row {role}",
            div { class: "message-stack",
                div { class: "bubble {role}",
                    {match &message.body {
                        MessageBody::Reply { raw, formatted } => rsx! {
                            ReplyBody { raw: raw.clone(), html: formatted.to_html() }
                        },
                        MessageBody::Plain(text) => rsx! { "{text}" },
                    }}
                }
                if let Some(ts) = timestamp {
                    div { class: "message-meta {align}",
                        span { class: "message-timestamp", "{ts}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ReplyBody(raw: String, html: String) -> Element {
    let on_copy = move |_| {
        let raw = raw.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    if let Err(err) = cb.set_text(raw) {
                        tracing::warn!(%err, "failed to copy reply");
                    }
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };

    rsx! {
        div { class: "bubble-controls",
            button { class: "action-btn", title: "Copy reply", onclick: on_copy, "Copy" }
        }
        div { class: "md", dangerous_inner_html: "{html}" }
    }
}
