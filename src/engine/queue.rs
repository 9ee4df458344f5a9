//! Event Queue: decoded events waiting for dispatch.

use crate::input::Event;
use std::collections::VecDeque;

/// FIFO of pending events, except that resizes jump the line.
///
/// At most one resize is ever queued: a newer one replaces it. Input
/// decoded before the resize is therefore always handled against the new
/// geometry.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Resizes go through [`push_resize`](Self::push_resize).
    pub fn push(&mut self, event: Event) {
        match event {
            Event::Resize { width, height } => self.push_resize(width, height),
            other => self.events.push_back(other),
        }
    }

    /// Queue a resize ahead of everything else, replacing any queued one.
    pub fn push_resize(&mut self, width: u16, height: u16) {
        self.events.retain(|e| !matches!(e, Event::Resize { .. }));
        self.events.push_front(Event::Resize { width, height });
    }

    /// Append every event from `events`.
    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.push(event);
        }
    }

    /// Take the next event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new();
        queue.extend([Event::Key(Key::char('a')), Event::Key(Key::char('b'))]);
        assert_eq!(queue.pop(), Some(Event::Key(Key::char('a'))));
        assert_eq!(queue.pop(), Some(Event::Key(Key::char('b'))));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_resize_jumps_and_coalesces() {
        let mut queue = EventQueue::new();
        queue.push(Event::Key(Key::char('a')));
        queue.push_resize(80, 24);
        queue.push(Event::Key(Key::char('b')));
        queue.push(Event::Resize {
            width: 100,
            height: 30,
        });
        assert_eq!(queue.len(), 3);
        assert_eq!(
            queue.pop(),
            Some(Event::Resize {
                width: 100,
                height: 30
            })
        );
        assert_eq!(queue.pop(), Some(Event::Key(Key::char('a'))));
        assert_eq!(queue.pop(), Some(Event::Key(Key::char('b'))));
        assert!(queue.is_empty());
    }
}
