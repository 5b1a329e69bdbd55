use crate::domain::PairingError;
use crate::model::ClientId;
use std::collections::{HashMap, VecDeque};

/// Stale slots tolerated before the queue rewrites its backing deque.
const COMPACT_THRESHOLD: usize = 64;

/// FIFO queue of identities seeking a partner.
///
/// Each enqueue issues a ticket. `tickets` holds the live ticket per identity
/// and is the source of truth for membership; `order` may still hold slots
/// whose ticket was withdrawn. Those are skipped on dequeue, which keeps
/// membership tests, enqueue and arbitrary removal O(1) and dequeue amortised
/// O(1).
#[derive(Debug, Default)]
pub struct WaitingQueue {
    order: VecDeque<(ClientId, u64)>,
    tickets: HashMap<ClientId, u64>,
    next_ticket: u64,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `client_id` at the back of the queue.
    pub fn enqueue(&mut self, client_id: ClientId) -> Result<(), PairingError> {
        let ticket = self.issue(client_id)?;
        self.order.push_back((client_id, ticket));
        Ok(())
    }

    /// Put `client_id` back at the head, ahead of everyone else waiting.
    pub fn enqueue_front(&mut self, client_id: ClientId) -> Result<(), PairingError> {
        let ticket = self.issue(client_id)?;
        self.order.push_front((client_id, ticket));
        Ok(())
    }

    /// Withdraw `client_id`. Returns whether it was waiting.
    pub fn remove(&mut self, client_id: ClientId) -> bool {
        let removed = self.tickets.remove(&client_id).is_some();
        if removed {
            self.compact_if_needed();
        }
        removed
    }

    /// Dequeue the identity that has been waiting longest.
    pub fn pop_oldest(&mut self) -> Option<ClientId> {
        while let Some((client_id, ticket)) = self.order.pop_front() {
            if self.tickets.get(&client_id) == Some(&ticket) {
                self.tickets.remove(&client_id);
                return Some(client_id);
            }
        }
        None
    }

    pub fn peek_oldest(&self) -> Option<ClientId> {
        self.iter().next()
    }

    pub fn contains(&self, client_id: ClientId) -> bool {
        self.tickets.contains_key(&client_id)
    }

    /// Live identities, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.order
            .iter()
            .filter(|(client_id, ticket)| self.tickets.get(client_id) == Some(ticket))
            .map(|(client_id, _)| *client_id)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    fn issue(&mut self, client_id: ClientId) -> Result<u64, PairingError> {
        if self.tickets.contains_key(&client_id) {
            return Err(PairingError::AlreadyWaiting(client_id));
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.tickets.insert(client_id, ticket);
        Ok(ticket)
    }

    fn compact_if_needed(&mut self) {
        let live = self.tickets.len();
        if self.order.len() > COMPACT_THRESHOLD && self.order.len() > live * 2 {
            let tickets = &self.tickets;
            self.order
                .retain(|(client_id, ticket)| tickets.get(client_id) == Some(ticket));
        }
    }
}
