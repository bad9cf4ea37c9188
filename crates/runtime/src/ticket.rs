/// Tags an asynchronous request with the key it was dispatched for.
///
/// Tickets are ordered by dispatch sequence. Only the most recently issued
/// ticket is current; responses carrying an older ticket are stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket<K> {
    seq: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Issues tickets and answers "is this response still wanted?".
#[derive(Debug)]
pub struct Tickets<K> {
    next_seq: u64,
    latest: Option<Ticket<K>>,
}

impl<K> Default for Tickets<K> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            latest: None,
        }
    }
}

impl<K: Clone + PartialEq> Tickets<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket for `key`, superseding every earlier ticket.
    pub fn issue(&mut self, key: K) -> Ticket<K> {
        let ticket = Ticket {
            seq: self.next_seq,
            key,
        };
        self.next_seq += 1;
        self.latest = Some(ticket.clone());
        ticket
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.latest.as_ref() == Some(ticket)
    }

    pub fn latest(&self) -> Option<&Ticket<K>> {
        self.latest.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::Tickets;

    #[test]
    fn newest_ticket_wins() {
        let mut tickets = Tickets::new();
        let a = tickets.issue("main");
        let b = tickets.issue("obioakpa");
        assert!(!tickets.is_current(&a));
        assert!(tickets.is_current(&b));
        assert!(a.seq() < b.seq());
    }

    #[test]
    fn same_key_redispatch_supersedes_earlier_request() {
        let mut tickets = Tickets::new();
        let first = tickets.issue("main");
        let _other = tickets.issue("obioakpa");
        let again = tickets.issue("main");
        assert_eq!(first.key(), again.key());
        assert!(!tickets.is_current(&first));
        assert!(tickets.is_current(&again));
    }
}
