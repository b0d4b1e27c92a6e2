//! # Events Module
//!
//! Console events and the bus that carries them to the display.

pub mod console_events;
pub mod event_bus;

pub use console_events::ConsoleEvent;
pub use event_bus::{ConsoleEventHandler, EventBus, PendingEvents, SimpleEventBus};
