/// Severity of a user-facing notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A transient message shown to the user (toast, status line, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// 0-based emission order.
    pub seq: u64,
    pub level: Level,
    pub message: String,
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn notify(&mut self, level: Level, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Records notifications in emission order.
#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<Notification>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, level: Level, message: impl Into<String>) {
        self.events.push(Notification {
            seq: self.next_seq,
            level,
            message: message.into(),
        });
        self.next_seq += 1;
    }

    pub fn events(&self) -> &[Notification] {
        &self.events
    }

    pub fn last(&self) -> Option<&Notification> {
        self.events.last()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.events)
    }
}

impl Notifier for EventBus {
    fn notify(&mut self, level: Level, message: &str) {
        self.emit(level, message);
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, Level, Notifier};

    #[test]
    fn records_notifications_in_order() {
        let mut bus = EventBus::new();
        bus.success("switched");
        bus.error("failed");
        assert_eq!(bus.events().len(), 2);
        assert_eq!(bus.events()[0].level, Level::Success);
        assert_eq!(bus.events()[1].seq, 1);
        assert_eq!(bus.last().map(|n| n.message.as_str()), Some("failed"));
    }

    #[test]
    fn drain_clears_events_but_keeps_sequence() {
        let mut bus = EventBus::new();
        bus.emit(Level::Success, "a");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());

        bus.emit(Level::Error, "b");
        assert_eq!(bus.events()[0].seq, 1);
    }
}
