use adk_api::TraceEvent;

/// Append-only ordered collection of trace events.
///
/// There is deliberately no update or delete operation: the append-only
/// shape is what makes idempotent full-rebuild rendering trivial. Append
/// assigns each event the next `sequence` value, so sorting by `sequence`
/// always reproduces arrival order even when ids are not comparable across
/// batches.
#[derive(Debug, Default)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
    next_sequence: u64,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert events in the given order, stamping arrival sequence numbers.
    pub fn append(&mut self, events: Vec<TraceEvent>) {
        for mut event in events {
            event.sequence = self.next_sequence;
            self.next_sequence += 1;
            self.events.push(event);
        }
    }

    /// Events in arrival order. The sort is defensive: insertion order
    /// already satisfies it, but the contract must hold if a concurrent
    /// producer is ever introduced.
    pub fn snapshot(&self) -> Vec<TraceEvent> {
        let mut events = self.events.clone();
        events.sort_by_key(|event| event.sequence);
        events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
