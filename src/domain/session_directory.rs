use crate::domain::PairingError;
use crate::model::ClientId;
use std::collections::HashMap;

/// Symmetric partner-of mapping for every active pairing.
///
/// Entries are only ever inserted and removed in pairs, so `a -> b` exists
/// exactly when `b -> a` does.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    partners: HashMap<ClientId, ClientId>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_pairing(&mut self, a: ClientId, b: ClientId) -> Result<(), PairingError> {
        if a == b {
            return Err(PairingError::SelfPairing(a));
        }
        if self.partners.contains_key(&a) {
            return Err(PairingError::AlreadyPaired(a));
        }
        if self.partners.contains_key(&b) {
            return Err(PairingError::AlreadyPaired(b));
        }
        self.partners.insert(a, b);
        self.partners.insert(b, a);
        Ok(())
    }

    /// Dissolve the pairing `a` belongs to and return the former partner.
    pub fn end_pairing(&mut self, a: ClientId) -> Option<ClientId> {
        let b = self.partners.remove(&a)?;
        self.partners.remove(&b);
        Some(b)
    }

    pub fn partner_of(&self, a: ClientId) -> Option<ClientId> {
        self.partners.get(&a).copied()
    }

    pub fn is_paired(&self, a: ClientId) -> bool {
        self.partners.contains_key(&a)
    }

    /// Every `(a, b)` entry; each pairing appears once per direction.
    pub fn iter(&self) -> impl Iterator<Item = (ClientId, ClientId)> + '_ {
        self.partners.iter().map(|(a, b)| (*a, *b))
    }

    /// Number of identities currently paired.
    pub fn paired_clients(&self) -> usize {
        self.partners.len()
    }

    /// Number of active pairings.
    pub fn pair_count(&self) -> usize {
        self.partners.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> ClientId {
        ClientId::from_u128(n)
    }

    #[test]
    fn test_start_pairing_is_symmetric() {
        let mut directory = SessionDirectory::new();
        directory.start_pairing(id(1), id(2)).unwrap();

        assert_eq!(directory.partner_of(id(1)), Some(id(2)));
        assert_eq!(directory.partner_of(id(2)), Some(id(1)));
        assert_eq!(directory.pair_count(), 1);
        assert_eq!(directory.paired_clients(), 2);
    }

    #[test]
    fn test_cannot_pair_with_self() {
        let mut directory = SessionDirectory::new();
        assert_eq!(
            directory.start_pairing(id(1), id(1)),
            Err(PairingError::SelfPairing(id(1)))
        );
        assert_eq!(directory.partner_of(id(1)), None);
    }

    #[test]
    fn test_cannot_pair_twice() {
        let mut directory = SessionDirectory::new();
        directory.start_pairing(id(1), id(2)).unwrap();

        assert_eq!(
            directory.start_pairing(id(3), id(2)),
            Err(PairingError::AlreadyPaired(id(2)))
        );
        assert_eq!(
            directory.start_pairing(id(1), id(3)),
            Err(PairingError::AlreadyPaired(id(1)))
        );
        assert_eq!(directory.partner_of(id(3)), None);
        assert_eq!(directory.pair_count(), 1);
    }

    #[test]
    fn test_end_pairing_is_idempotent() {
        let mut directory = SessionDirectory::new();
        directory.start_pairing(id(1), id(2)).unwrap();

        assert_eq!(directory.end_pairing(id(2)), Some(id(1)));
        assert_eq!(directory.end_pairing(id(2)), None);
        assert_eq!(directory.end_pairing(id(1)), None);
        assert!(!directory.is_paired(id(1)));
        assert_eq!(directory.iter().count(), 0);
    }
}
