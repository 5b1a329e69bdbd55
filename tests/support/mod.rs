#![allow(dead_code)]

use std::collections::HashSet;
use stranger_relay::prelude::*;

/// Panics if the loop's queue and directory disagree with each other or with
/// the registry.
pub fn assert_consistent<H>(event_loop: &PairingEventLoop<H>) {
    let registry = event_loop.registry();
    let queue = event_loop.queue();
    let directory = event_loop.directory();

    let waiting: Vec<ClientId> = queue.iter().collect();
    let unique: HashSet<ClientId> = waiting.iter().copied().collect();
    assert_eq!(waiting.len(), unique.len(), "queue holds a duplicate");
    assert_eq!(waiting.len(), queue.len(), "queue length drifted");

    for client_id in &waiting {
        assert!(registry.contains(*client_id), "queued client is not connected");
        assert!(!directory.is_paired(*client_id), "queued client is also paired");
    }

    for (a, b) in directory.iter() {
        assert_ne!(a, b, "client paired with itself");
        assert_eq!(directory.partner_of(b), Some(a), "pairing is not symmetric");
        assert!(registry.contains(a), "paired client is not connected");
        assert!(!queue.contains(a), "paired client is also queued");
    }
}

pub fn offer(tag: &str) -> Option<Payload> {
    Some(Payload::from_json(format!(r#"{{"type":"offer","sdp":"{}"}}"#, tag)).unwrap())
}

pub fn chat(text: &str) -> ClientEvent {
    ClientEvent::Relay(RelayEvent::new(
        RelayKind::ChatMessage,
        Some(Payload::text(text).unwrap()),
    ))
}

pub fn find_partner(tag: &str) -> ClientEvent {
    ClientEvent::FindPartner { offer: offer(tag) }
}

/// Apply `event` and check consistency afterwards.
pub fn step<H>(
    event_loop: &mut PairingEventLoop<H>,
    from: ClientId,
    event: ClientEvent,
) -> Vec<Envelope> {
    let envelopes = event_loop.handle_event(from, event);
    assert_consistent(event_loop);
    envelopes
}

pub fn leave<H>(event_loop: &mut PairingEventLoop<H>, client_id: ClientId) -> Vec<Envelope> {
    let envelopes = event_loop.disconnect(client_id);
    assert_consistent(event_loop);
    envelopes
}
