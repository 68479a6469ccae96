use crate::format::{FormattedReply, format_reply};
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
    /// Client-generated notices, e.g. a failed request.
    System,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl From<Sender> for Direction {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Direction::Outgoing,
            Sender::Assistant | Sender::System => Direction::Incoming,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MessageBody {
    Plain(String),
    Reply { raw: String, formatted: FormattedReply },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub direction: Direction,
    pub body: MessageBody,
    pub sent_at: Option<OffsetDateTime>,
}

impl ChatMessage {
    fn new(sender: Sender, body: MessageBody) -> Self {
        Self {
            sender,
            direction: sender.into(),
            body,
            sent_at: Some(OffsetDateTime::now_utc()),
        }
    }

    pub fn outgoing(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageBody::Plain(text.into()))
    }

    /// An assistant message whose text was composed locally, such as a greeting.
    pub fn assistant_note(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, MessageBody::Plain(text.into()))
    }

    pub fn reply(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let formatted = format_reply(&raw);
        Self::new(Sender::Assistant, MessageBody::Reply { raw, formatted })
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self::new(Sender::System, MessageBody::Plain(text.into()))
    }

    pub fn text(&self) -> &str {
        match &self.body {
            MessageBody::Plain(text) => text,
            MessageBody::Reply { raw, .. } => raw,
        }
    }

    pub fn formatted(&self) -> Option<&FormattedReply> {
        match &self.body {
            MessageBody::Reply { formatted, .. } => Some(formatted),
            MessageBody::Plain(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn direction_follows_sender() {
        assert_eq!(ChatMessage::outgoing("hi").direction, Direction::Outgoing);
        assert_eq!(ChatMessage::reply("hello").direction, Direction::Incoming);
        assert_eq!(ChatMessage::notice("failed").direction, Direction::Incoming);
    }

    #[test]
    fn reply_keeps_raw_text_and_formatting() {
        let msg = ChatMessage::reply("```rust\nfn main() {}\n```");
        assert_eq!(msg.text(), "```rust\nfn main() {}\n```");
        let formatted = msg.formatted().expect("formatted reply");
        assert_eq!(formatted.code_blocks().count(), 1);
    }

    #[test]
    fn plain_messages_are_not_formatted() {
        assert!(ChatMessage::outgoing("```rust\n```").formatted().is_none());
    }

    #[test]
    fn timestamp_uses_twelve_hour_clock() {
        let formatted = format_message_timestamp(Some(datetime!(2024-03-01 15:07 UTC)))
            .expect("formatted timestamp");
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));
        assert_eq!(formatted.len(), "03:07 PM".len());
        assert!(format_message_timestamp(None).is_none());
    }
}
