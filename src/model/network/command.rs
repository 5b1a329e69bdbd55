use super::{EventName, Frame, NetworkError, Payload};

/// Events that are forwarded verbatim to the sender's partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayKind {
    Answer,
    IceCandidate,
    ChatMessage,
    TypingStart,
    TypingStop,
}

impl RelayKind {
    pub fn event_name(self) -> EventName {
        match self {
            RelayKind::Answer => EventName::Answer,
            RelayKind::IceCandidate => EventName::IceCandidate,
            RelayKind::ChatMessage => EventName::ChatMessage,
            RelayKind::TypingStart => EventName::TypingStart,
            RelayKind::TypingStop => EventName::TypingStop,
        }
    }

    pub fn from_event_name(name: EventName) -> Option<Self> {
        match name {
            EventName::Answer => Some(RelayKind::Answer),
            EventName::IceCandidate => Some(RelayKind::IceCandidate),
            EventName::ChatMessage => Some(RelayKind::ChatMessage),
            EventName::TypingStart => Some(RelayKind::TypingStart),
            EventName::TypingStop => Some(RelayKind::TypingStop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayEvent {
    pub kind: RelayKind,
    pub data: Option<Payload>,
}

impl RelayEvent {
    pub fn new(kind: RelayKind, data: Option<Payload>) -> Self {
        RelayEvent { kind, data }
    }
}

/// Inbound events (client -> server).
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    FindPartner { offer: Option<Payload> },
    CancelSearch,
    Relay(RelayEvent),
}

impl ClientEvent {
    pub fn name(&self) -> EventName {
        match self {
            ClientEvent::FindPartner { .. } => EventName::FindPartner,
            ClientEvent::CancelSearch => EventName::CancelSearch,
            ClientEvent::Relay(relay) => relay.kind.event_name(),
        }
    }
}

/// Outbound events (server -> client).
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    PartnerFound { offer: Option<Payload> },
    PartnerDisconnected,
    Relay(RelayEvent),
}

impl ServerEvent {
    pub fn name(&self) -> EventName {
        match self {
            ServerEvent::PartnerFound { .. } => EventName::PartnerFound,
            ServerEvent::PartnerDisconnected => EventName::PartnerDisconnected,
            ServerEvent::Relay(relay) => relay.kind.event_name(),
        }
    }
}

impl TryFrom<Frame> for ClientEvent {
    type Error = NetworkError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        match frame.event {
            EventName::FindPartner => Ok(ClientEvent::FindPartner { offer: frame.data }),
            EventName::CancelSearch => Ok(ClientEvent::CancelSearch),
            name => RelayKind::from_event_name(name)
                .map(|kind| ClientEvent::Relay(RelayEvent::new(kind, frame.data)))
                .ok_or(NetworkError::UnexpectedEvent(name)),
        }
    }
}

impl From<ClientEvent> for Frame {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::FindPartner { offer } => Frame::new(EventName::FindPartner, offer),
            ClientEvent::CancelSearch => Frame::empty(EventName::CancelSearch),
            ClientEvent::Relay(relay) => Frame::new(relay.kind.event_name(), relay.data),
        }
    }
}

impl TryFrom<Frame> for ServerEvent {
    type Error = NetworkError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        match frame.event {
            EventName::PartnerFound => Ok(ServerEvent::PartnerFound { offer: frame.data }),
            EventName::PartnerDisconnected => Ok(ServerEvent::PartnerDisconnected),
            name => RelayKind::from_event_name(name)
                .map(|kind| ServerEvent::Relay(RelayEvent::new(kind, frame.data)))
                .ok_or(NetworkError::UnexpectedEvent(name)),
        }
    }
}

impl From<ServerEvent> for Frame {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::PartnerFound { offer } => Frame::new(EventName::PartnerFound, offer),
            ServerEvent::PartnerDisconnected => Frame::empty(EventName::PartnerDisconnected),
            ServerEvent::Relay(relay) => Frame::new(relay.kind.event_name(), relay.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_frame_conversion() {
        let frame: Frame =
            serde_json::from_str(r#"{"event":"chat-message","data":"hello"}"#).unwrap();
        let event = ClientEvent::try_from(frame).unwrap();
        assert_eq!(
            event,
            ClientEvent::Relay(RelayEvent::new(
                RelayKind::ChatMessage,
                Some(Payload::text("hello").unwrap())
            ))
        );
        assert_eq!(event.name(), EventName::ChatMessage);
    }

    #[test]
    fn test_find_partner_without_offer() {
        let event = ClientEvent::try_from(Frame::empty(EventName::FindPartner)).unwrap();
        assert_eq!(event, ClientEvent::FindPartner { offer: None });
    }

    #[test]
    fn test_server_only_events_are_rejected_from_clients() {
        for name in [EventName::PartnerFound, EventName::PartnerDisconnected] {
            let result = ClientEvent::try_from(Frame::empty(name));
            assert!(matches!(result, Err(NetworkError::UnexpectedEvent(n)) if n == name));
        }
    }

    #[test]
    fn test_client_only_events_are_not_server_events() {
        let result = ServerEvent::try_from(Frame::empty(EventName::CancelSearch));
        assert!(matches!(
            result,
            Err(NetworkError::UnexpectedEvent(EventName::CancelSearch))
        ));
    }

    #[test]
    fn test_server_event_serialize() {
        let offer = Payload::from_json(r#"{"type":"offer","sdp":"x"}"#).unwrap();
        let frame = Frame::from(ServerEvent::PartnerFound { offer: Some(offer) });
        let serialized = serde_json::to_string(&frame).unwrap();
        assert_eq!(
            serialized,
            r#"{"event":"partner-found","data":{"type":"offer","sdp":"x"}}"#
        );
    }
}
