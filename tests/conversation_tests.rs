//! Integration tests for conversation flow
//!
//! Drives full exchanges through a scripted backend

use async_trait::async_trait;
use llama_chat::ai::InferenceBackend;
use llama_chat::conversation::send;
use llama_chat::types::{Direction, Sender};
use llama_chat::{ChatError, ChatResult, Conversation};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with pre-programmed outcomes, in order, and records every prompt.
struct ScriptedBackend {
    outcomes: Mutex<VecDeque<ChatResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(outcomes: impl IntoIterator<Item = ChatResult<String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts poisoned").clone()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> ChatResult<String> {
        self.prompts
            .lock()
            .expect("prompts poisoned")
            .push(prompt.to_string());
        self.outcomes
            .lock()
            .expect("outcomes poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::network("script exhausted")))
    }
}

mod exchange_tests {
    use super::*;

    #[tokio::test]
    async fn replies_alternate_with_prompts() {
        let backend = ScriptedBackend::new((0..3).map(|i| Ok(format!("answer {i}"))));
        let mut conversation = Conversation::new();

        for i in 0..3 {
            send(&mut conversation, &backend, format!("question {i}"))
                .await
                .expect("exchange succeeds");
        }

        assert_eq!(conversation.len(), 6);
        for (i, msg) in conversation.messages().iter().enumerate() {
            let turn = i / 2;
            if i % 2 == 0 {
                assert_eq!(msg.sender, Sender::User);
                assert_eq!(msg.direction, Direction::Outgoing);
                assert_eq!(msg.text(), format!("question {turn}"));
            } else {
                assert_eq!(msg.sender, Sender::Assistant);
                assert_eq!(msg.direction, Direction::Incoming);
                assert_eq!(msg.text(), format!("answer {turn}"));
            }
        }
        assert_eq!(
            backend.prompts(),
            vec!["question 0", "question 1", "question 2"]
        );
        assert!(!conversation.is_pending());
    }

    #[tokio::test]
    async fn only_latest_message_is_sent_as_prompt() {
        let backend = ScriptedBackend::new([Ok("hi".to_string()), Ok("bye".to_string())]);
        let mut conversation = Conversation::new();
        send(&mut conversation, &backend, "hello").await.expect("first");
        send(&mut conversation, &backend, "goodbye").await.expect("second");
        assert_eq!(backend.prompts(), vec!["hello", "goodbye"]);
    }

    #[tokio::test]
    async fn failed_request_keeps_only_outgoing_message() {
        let backend = ScriptedBackend::new([Err(ChatError::network("Ollama error 500"))]);
        let mut conversation = Conversation::new();

        let result = send(&mut conversation, &backend, "hello").await;

        assert_eq!(result, Err(ChatError::network("Ollama error 500")));
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].sender, Sender::User);
        assert!(!conversation.is_pending());
    }

    #[tokio::test]
    async fn failed_request_adds_notice_when_opted_in() {
        let backend = ScriptedBackend::new([Err(ChatError::network("connection refused"))]);
        let mut conversation = Conversation::new().with_error_notices(true);

        let result = send(&mut conversation, &backend, "hello").await;

        assert!(result.expect_err("request fails").is_network());
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[1].sender, Sender::System);
        assert!(!conversation.is_pending());
    }

    #[tokio::test]
    async fn conversation_recovers_after_failure() {
        let backend = ScriptedBackend::new([
            Err(ChatError::network("timed out")),
            Ok("back online".to_string()),
        ]);
        let mut conversation = Conversation::new();

        assert!(send(&mut conversation, &backend, "one").await.is_err());
        send(&mut conversation, &backend, "two").await.expect("second");

        let texts: Vec<_> = conversation.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["one", "two", "back online"]);
    }
}

mod guard_tests {
    use super::*;

    #[tokio::test]
    async fn send_while_pending_is_rejected_without_calling_backend() {
        let backend = ScriptedBackend::new([Ok("unused".to_string())]);
        let mut conversation = Conversation::new();
        conversation.submit("in flight").expect("idle");

        let result = send(&mut conversation, &backend, "second").await;

        assert_eq!(result, Err(ChatError::Busy));
        assert!(backend.prompts().is_empty());
        assert_eq!(conversation.len(), 1);
        assert!(conversation.is_pending());
    }
}

mod formatting_tests {
    use super::*;

    #[tokio::test]
    async fn code_replies_are_formatted_on_arrival() {
        let backend = ScriptedBackend::new([Ok(
            "Here you go:\n```python\nprint(1)\n```".to_string()
        )]);
        let mut conversation = Conversation::new();
        send(&mut conversation, &backend, "print one").await.expect("exchange");

        let reply = &conversation.messages()[1];
        let formatted = reply.formatted().expect("assistant reply is formatted");
        let block = formatted.code_blocks().next().expect("code block");
        assert_eq!(block.language, "python");
        assert!(formatted.to_html().contains("code-language\">python<"));
    }

    #[tokio::test]
    async fn empty_reply_renders_nothing() {
        let backend = ScriptedBackend::new([Ok(String::new())]);
        let mut conversation = Conversation::new();
        send(&mut conversation, &backend, "say nothing").await.expect("exchange");

        let formatted = conversation.messages()[1].formatted().expect("formatted");
        assert_eq!(formatted.to_html(), "");
    }
}
