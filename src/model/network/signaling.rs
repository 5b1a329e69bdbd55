use super::Payload;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Names of every event that can cross the wire, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventName {
    FindPartner,
    CancelSearch,
    PartnerFound,
    PartnerDisconnected,
    Answer,
    IceCandidate,
    ChatMessage,
    TypingStart,
    TypingStop,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::FindPartner => "find-partner",
            EventName::CancelSearch => "cancel-search",
            EventName::PartnerFound => "partner-found",
            EventName::PartnerDisconnected => "partner-disconnected",
            EventName::Answer => "answer",
            EventName::IceCandidate => "ice-candidate",
            EventName::ChatMessage => "chat-message",
            EventName::TypingStart => "typing-start",
            EventName::TypingStop => "typing-stop",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One text frame on the socket: `{"event": "<name>", "data": <json>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: EventName,
    #[serde(
        default,
        deserialize_with = "present_payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Payload>,
}

/// A `data` key that is present is kept as sent, `null` included. Only a
/// missing key means no payload.
fn present_payload<'de, D>(deserializer: D) -> Result<Option<Payload>, D::Error>
where
    D: Deserializer<'de>,
{
    Payload::deserialize(deserializer).map(Some)
}

impl Frame {
    pub fn new(event: EventName, data: Option<Payload>) -> Self {
        Frame { event, data }
    }

    pub fn empty(event: EventName) -> Self {
        Frame { event, data: None }
    }
}
