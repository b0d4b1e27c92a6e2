//! # Event Bus
//!
//! Distributes console events to subscribers (display, scroll handling)
//! using the observer pattern.

use std::sync::{Arc, Mutex};

use super::console_events::ConsoleEvent;

/// Type alias for console event handlers to reduce complexity
pub type ConsoleEventHandler = Box<dyn Fn(&ConsoleEvent) + Send + Sync>;

/// Event bus for decoupled communication between session and display
pub trait EventBus: Send + Sync {
    /// Publish a console event
    fn publish(&mut self, event: ConsoleEvent);

    /// Subscribe to console events
    fn subscribe(&mut self, handler: ConsoleEventHandler);
}

/// Simple in-memory event bus implementation
pub struct SimpleEventBus {
    handlers: Vec<ConsoleEventHandler>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl Default for SimpleEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for SimpleEventBus {
    fn publish(&mut self, event: ConsoleEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }

    fn subscribe(&mut self, handler: ConsoleEventHandler) {
        self.handlers.push(handler);
    }
}

/// Shared queue of events a subscriber has not processed yet
#[derive(Debug, Clone, Default)]
pub struct PendingEvents {
    events: Arc<Mutex<Vec<ConsoleEvent>>>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler that records every published event into this queue
    pub fn recorder(&self) -> ConsoleEventHandler {
        let events = Arc::clone(&self.events);
        Box::new(move |event| {
            if let Ok(mut events) = events.lock() {
                events.push(*event);
            }
        })
    }

    /// Take all recorded events, oldest first
    pub fn drain(&self) -> Vec<ConsoleEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}
